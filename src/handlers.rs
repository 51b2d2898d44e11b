use actix_web::http::header::ContentType;
use actix_web::{get, post, web, HttpResponse};
use log::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    ChirpResponse, CreateChirpRequest, CreateUserRequest, ValidateChirpRequest,
    ValidateChirpResponse,
};
use crate::moderation::moderate;
use crate::state::AppState;

/// Register the API and admin routes together with the shared JSON config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api")
                .service(healthz)
                .service(validate_chirp)
                .service(create_user)
                .service(create_chirp)
                .service(list_chirps)
                .service(get_chirp),
        )
        .service(web::scope("/admin").service(metrics).service(reset));
}

/// Decode JSON bodies regardless of their content type; failures map to
/// [`ApiError::Parse`].
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| ApiError::Parse(err.to_string()).into())
}

#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK")
}

#[post("/validate_chirp")]
pub async fn validate_chirp(payload: web::Json<ValidateChirpRequest>) -> HttpResponse {
    let moderated = moderate(&payload.body);
    let mut response = if moderated.verdict.is_valid() {
        HttpResponse::Ok()
    } else {
        HttpResponse::BadRequest()
    };
    response.json(ValidateChirpResponse::from(moderated))
}

#[post("/users")]
pub async fn create_user(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.store.create_user(&payload.email).await?;
    info!("User created: {}", user.id);
    Ok(HttpResponse::Created().json(user))
}

#[post("/chirps")]
pub async fn create_chirp(
    state: web::Data<AppState>,
    payload: web::Json<CreateChirpRequest>,
) -> ApiResult<HttpResponse> {
    let CreateChirpRequest { body, user_id } = payload.into_inner();
    let moderated = moderate(&body);

    if !moderated.verdict.is_valid() {
        warn!(
            "Rejected chirp from {}: {}",
            user_id,
            moderated.verdict.error_message()
        );
        return Ok(HttpResponse::BadRequest().json(ChirpResponse::rejected(moderated)));
    }

    let chirp = state.store.create_chirp(&moderated.body, user_id).await?;
    info!("Chirp created successfully: {}", chirp.id);
    Ok(HttpResponse::Created().json(ChirpResponse::accepted(chirp)))
}

#[get("/chirps")]
pub async fn list_chirps(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let chirps = state.store.list_chirps().await?;
    Ok(HttpResponse::Ok().json(chirps))
}

#[get("/chirps/{chirp_id}")]
pub async fn get_chirp(
    state: web::Data<AppState>,
    chirp_id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let chirp_id = Uuid::parse_str(&chirp_id).map_err(|_| ApiError::NotFound)?;
    let chirp = state.store.get_chirp(chirp_id).await?;
    Ok(HttpResponse::Ok().json(chirp))
}

#[get("/metrics")]
pub async fn metrics(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(format!(
        "<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>",
        state.hits.read()
    ))
}

/// Zero the visit counter and, on the dev platform only, drop every user.
#[post("/reset")]
pub async fn reset(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    state.hits.reset();

    if !state.platform.is_dev() {
        warn!("Reset requested outside dev; users left intact");
        return Err(ApiError::Forbidden);
    }

    state.store.delete_all_users().await?;
    info!("Visit counter reset and all users deleted");
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK"))
}
