//! ETags for the standings table.
//!
//! The tag is a SHA-256 over every standing row in order, so it changes
//! exactly when the rendered standings would.

use p10_core::standings::PlayerStanding;
use sha2::{Digest, Sha256};

/// Compute a strong, quoted ETag for `standings`.
pub fn compute_etag(standings: &[PlayerStanding]) -> String {
  let mut hasher = Sha256::new();
  for s in standings {
    hasher.update(s.uid.as_bytes());
    hasher.update([0]);
    hasher.update(s.display_name.as_bytes());
    hasher.update([0]);
    for n in [
      s.total_points,
      s.correct_p10,
      s.wrong_guesses,
      s.biggest_loss,
      s.correct_dnfs,
    ] {
      hasher.update(n.to_le_bytes());
    }
  }
  let hash = hasher.finalize();
  format!("\"{}\"", hex::encode(hash))
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Accepts `*` and comma-separated lists; weak tags compare by their opaque
/// part.
pub fn if_none_match(header: &str, etag: &str) -> bool {
  let etag = strip_etag(etag);
  header.split(',').map(str::trim).any(|candidate| {
    candidate == "*" || strip_etag(candidate) == etag
  })
}

fn strip_etag(s: &str) -> &str {
  let s = s.strip_prefix("W/").unwrap_or(s);
  s.trim_matches('"')
}

#[cfg(test)]
mod tests {
  use super::*;

  fn standing(uid: &str, total_points: u32) -> PlayerStanding {
    PlayerStanding {
      uid: uid.into(),
      display_name: uid.into(),
      total_points,
      correct_p10: 0,
      wrong_guesses: 0,
      biggest_loss: 0,
      correct_dnfs: 0,
    }
  }

  #[test]
  fn etag_is_quoted_hex() {
    let tag = compute_etag(&[standing("u1", 10)]);
    assert!(tag.starts_with('"') && tag.ends_with('"'));
    assert_eq!(tag.len(), 66);
  }

  #[test]
  fn any_change_changes_the_tag() {
    let base = compute_etag(&[standing("u1", 10), standing("u2", 5)]);
    assert_eq!(base, compute_etag(&[standing("u1", 10), standing("u2", 5)]));
    assert_ne!(base, compute_etag(&[standing("u1", 11), standing("u2", 5)]));
    assert_ne!(base, compute_etag(&[standing("u2", 5), standing("u1", 10)]));
    assert_ne!(base, compute_etag(&[standing("u1", 10)]));
  }

  #[test]
  fn if_none_match_forms() {
    let tag = compute_etag(&[]);
    assert!(if_none_match(&tag, &tag));
    assert!(if_none_match("*", &tag));
    assert!(if_none_match(&format!("\"other\", W/{tag}"), &tag));
    assert!(!if_none_match("\"other\"", &tag));
  }
}
