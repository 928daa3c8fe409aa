//! A participant in the prediction league.

use serde::{Deserialize, Serialize};

/// Shown wherever a player has no display name.
pub const UNKNOWN_PLAYER: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
  pub uid:          String,
  #[serde(default)]
  pub display_name: String,
}

impl Player {
  pub fn new(uid: impl Into<String>, display_name: impl Into<String>) -> Self {
    Self {
      uid:          uid.into(),
      display_name: display_name.into(),
    }
  }

  /// The display name, or [`UNKNOWN_PLAYER`] if none was set.
  pub fn label(&self) -> &str {
    let name = self.display_name.trim();
    if name.is_empty() { UNKNOWN_PLAYER } else { name }
  }
}
