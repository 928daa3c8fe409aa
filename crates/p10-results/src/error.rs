//! Error type for `p10-results`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("GET {url} returned {status}")]
  Status { url: String, status: u16 },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The provider returned a classification the core rejects.
  #[error("invalid classification: {0}")]
  Core(#[from] p10_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
