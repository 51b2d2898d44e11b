//! Chirp body validation and banned-word masking.

/// Longest body, in characters, that a chirp may carry.
pub const MAX_CHIRP_LENGTH: usize = 140;

const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const MASK: &str = "****";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    TooLong,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Message surfaced in the `error` field of chirp responses.
    pub fn error_message(self) -> &'static str {
        match self {
            Verdict::Valid => "",
            Verdict::TooLong => "This chirp is too long",
        }
    }
}

/// Outcome of running a candidate body through [`moderate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moderated {
    pub verdict: Verdict,
    pub body: String,
}

/// Checks the length of `body` and masks every banned token.
///
/// The length is measured on the raw input. Masking runs even when the body
/// is too long so callers can echo the cleaned text back.
pub fn moderate(body: &str) -> Moderated {
    let verdict = if body.chars().count() > MAX_CHIRP_LENGTH {
        Verdict::TooLong
    } else {
        Verdict::Valid
    };

    let body = body
        .split(' ')
        .map(|token| if is_banned(token) { MASK } else { token })
        .collect::<Vec<_>>()
        .join(" ");

    Moderated { verdict, body }
}

fn is_banned(token: &str) -> bool {
    let lowered = token.to_lowercase();
    BANNED_WORDS.contains(&lowered.as_str())
}
