use anyhow::Context;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use std::sync::Arc;
use uuid::Uuid;

use chirpy::config::Config;
use chirpy::db;
use chirpy::moderation::moderate;
use chirpy::store::{ChirpStore, ScyllaStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Starting data seeding...");

    if dotenvy::dotenv().is_err() {
        println!("No .env file found, using process environment");
    }
    let config = Config::from_env().context("invalid configuration")?;

    let session = db::create_session(&config.db_url)
        .await
        .context("failed to create database session")?;
    db::ensure_schema(&session)
        .await
        .context("failed to create schema")?;
    let store = ScyllaStore::new(Arc::new(session));

    // Configuration
    let num_users = 100;
    let chirps_per_user = 20;

    let users = seed_users(&store, num_users).await?;
    seed_chirps(&store, &users, chirps_per_user).await?;

    println!("Seeding completed!");
    Ok(())
}

async fn seed_users(store: &dyn ChirpStore, count: usize) -> anyhow::Result<Vec<Uuid>> {
    println!("Creating {} users...", count);
    let mut users = Vec::with_capacity(count);

    for i in 0..count {
        let email: String = SafeEmail().fake();
        let user = store.create_user(&email).await?;

        users.push(user.id);
        println!("Created user {}/{}: {} ({})", i + 1, count, email, user.id);
    }

    Ok(users)
}

async fn seed_chirps(
    store: &dyn ChirpStore,
    users: &[Uuid],
    chirps_per_user: usize,
) -> anyhow::Result<()> {
    println!("Creating {} chirps per user...", chirps_per_user);
    let total_chirps = users.len() * chirps_per_user;
    let mut current_chirp = 0;

    for &user_id in users {
        for _ in 0..chirps_per_user {
            let sentence: String = Sentence(3..10).fake();
            let moderated = moderate(&sentence);
            if !moderated.verdict.is_valid() {
                continue;
            }

            store.create_chirp(&moderated.body, user_id).await?;

            current_chirp += 1;
            if current_chirp % 100 == 0 {
                println!("Created {}/{} chirps", current_chirp, total_chirps);
            }
        }
    }

    Ok(())
}
