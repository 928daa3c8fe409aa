//! End-of-season superlatives derived from the standings.

use serde::{Deserialize, Serialize};

use crate::standings::PlayerStanding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
  Champion,
  Sharpshooter,
  Gambler,
  BiggestLoss,
  CrashProphet,
}

impl AwardKind {
  pub const ALL: [AwardKind; 5] = [
    Self::Champion,
    Self::Sharpshooter,
    Self::Gambler,
    Self::BiggestLoss,
    Self::CrashProphet,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Self::Champion => "Champion",
      Self::Sharpshooter => "Sharpshooter",
      Self::Gambler => "The Gambler",
      Self::BiggestLoss => "Biggest Loss",
      Self::CrashProphet => "Crash Prophet",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Self::Champion => "Most points",
      Self::Sharpshooter => "Most correct P10s",
      Self::Gambler => "Most wrong guesses",
      Self::BiggestLoss => "Furthest off P10",
      Self::CrashProphet => "Most correct DNFs",
    }
  }

  /// The standing statistic this award is decided on.
  pub fn metric(self, standing: &PlayerStanding) -> u32 {
    match self {
      Self::Champion => standing.total_points,
      Self::Sharpshooter => standing.correct_p10,
      Self::Gambler => standing.wrong_guesses,
      Self::BiggestLoss => standing.biggest_loss,
      Self::CrashProphet => standing.correct_dnfs,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
  pub kind:         AwardKind,
  pub title:        String,
  pub description:  String,
  pub uid:          String,
  pub display_name: String,
  pub value:        u32,
}

/// Decide every award from `standings`.
///
/// Each award goes to the highest value of its metric. On a tie the player
/// listed first in `standings` wins. Returns `None` when there are no players.
pub fn season_awards(standings: &[PlayerStanding]) -> Option<Vec<Award>> {
  AwardKind::ALL
    .into_iter()
    .map(|kind| award(kind, standings))
    .collect()
}

/// Decide a single award; `None` when `standings` is empty.
pub fn award(kind: AwardKind, standings: &[PlayerStanding]) -> Option<Award> {
  // `max_by_key` keeps the last maximum, so walk in reverse to favour the
  // earliest standing on ties.
  let winner = standings.iter().rev().max_by_key(|s| kind.metric(s))?;
  Some(Award {
    kind,
    title: kind.title().to_owned(),
    description: kind.description().to_owned(),
    uid: winner.uid.clone(),
    display_name: winner.display_name.clone(),
    value: kind.metric(winner),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn standing(uid: &str, total: u32, p10: u32, wrong: u32, loss: u32, dnfs: u32) -> PlayerStanding {
    PlayerStanding {
      uid:           uid.into(),
      display_name:  uid.to_uppercase(),
      total_points:  total,
      correct_p10:   p10,
      wrong_guesses: wrong,
      biggest_loss:  loss,
      correct_dnfs:  dnfs,
    }
  }

  #[test]
  fn empty_standings_have_no_awards() {
    assert!(season_awards(&[]).is_none());
  }

  #[test]
  fn clear_champion_among_tied_runners_up() {
    let standings = [
      standing("a", 50, 1, 0, 2, 0),
      standing("b", 30, 0, 3, 7, 1),
      standing("c", 30, 2, 3, 7, 2),
    ];
    let awards = season_awards(&standings).unwrap();
    assert_eq!(awards.len(), 5);

    let by_kind = |k: AwardKind| awards.iter().find(|a| a.kind == k).unwrap();
    assert_eq!(by_kind(AwardKind::Champion).uid, "a");
    assert_eq!(by_kind(AwardKind::Champion).value, 50);
    assert_eq!(by_kind(AwardKind::Sharpshooter).uid, "c");
    assert_eq!(by_kind(AwardKind::CrashProphet).uid, "c");
  }

  #[test]
  fn ties_go_to_earlier_standing() {
    let standings = [
      standing("a", 50, 1, 0, 2, 0),
      standing("b", 30, 0, 3, 7, 1),
      standing("c", 30, 2, 3, 7, 2),
    ];
    assert_eq!(award(AwardKind::Gambler, &standings).unwrap().uid, "b");
    assert_eq!(award(AwardKind::BiggestLoss, &standings).unwrap().uid, "b");
  }

  #[test]
  fn all_zero_goes_to_leader() {
    let standings = [standing("a", 0, 0, 0, 0, 0), standing("b", 0, 0, 0, 0, 0)];
    for award in season_awards(&standings).unwrap() {
      assert_eq!(award.uid, "a", "{:?}", award.kind);
      assert_eq!(award.value, 0);
    }
  }

  #[test]
  fn award_titles() {
    assert_eq!(AwardKind::Gambler.title(), "The Gambler");
    let json = serde_json::to_value(AwardKind::CrashProphet).unwrap();
    assert_eq!(json, "crash_prophet");
  }
}
