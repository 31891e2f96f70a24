//! Error types for `billboard-core`.

use thiserror::Error;

use crate::{campaign::Level, draft::DraftError};

#[derive(Debug, Error)]
pub enum Error {
  #[error("{level} not found: {id}")]
  NotFound { level: Level, id: String },

  #[error("invalid campaign draft: {0}")]
  Draft(#[from] DraftError),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  pub(crate) fn not_found(level: Level, id: &str) -> Self {
    Self::NotFound { level, id: id.to_string() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
