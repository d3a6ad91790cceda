/// Errors raised by the core crate
#[derive(Debug, thiserror::Error)]
pub enum HeroError {
    #[error("invalid hero config: {0}")]
    InvalidConfig(String),
    #[error("hero config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type HeroResult<T> = Result<T, HeroError>;
