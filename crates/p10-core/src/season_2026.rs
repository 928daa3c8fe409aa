//! Built-in reference data for the 2026 championship.

use chrono::NaiveDate;

use crate::{
  Error, Result,
  reference::{Driver, Race, ReferenceData, Team},
};

/// `(id, name, colour)`
const TEAMS: &[(&str, &str, &str)] = &[
  ("mclaren", "McLaren", "#FF8000"),
  ("mercedes", "Mercedes", "#27F4D2"),
  ("red_bull", "Red Bull", "#3671C6"),
  ("ferrari", "Ferrari", "#E8002D"),
  ("williams", "Williams", "#64C4FF"),
  ("racing_bulls", "Racing Bulls", "#6692FF"),
  ("aston_martin", "Aston Martin", "#229971"),
  ("haas", "Haas", "#B6BABD"),
  ("audi", "Audi", "#FF5733"),
  ("alpine", "Alpine", "#FF87BC"),
  ("cadillac", "Cadillac", "#1E3A5F"),
];

/// `(id, name, code, number, team)`
const DRIVERS: &[(&str, &str, &str, u32, &str)] = &[
  ("norris", "Lando Norris", "NOR", 1, "mclaren"),
  ("piastri", "Oscar Piastri", "PIA", 81, "mclaren"),
  ("russell", "George Russell", "RUS", 63, "mercedes"),
  ("antonelli", "Kimi Antonelli", "ANT", 12, "mercedes"),
  ("verstappen", "Max Verstappen", "VER", 33, "red_bull"),
  ("hadjar", "Isack Hadjar", "HAD", 6, "red_bull"),
  ("leclerc", "Charles Leclerc", "LEC", 16, "ferrari"),
  ("hamilton", "Lewis Hamilton", "HAM", 44, "ferrari"),
  ("albon", "Alex Albon", "ALB", 23, "williams"),
  ("sainz", "Carlos Sainz", "SAI", 55, "williams"),
  ("lawson", "Liam Lawson", "LAW", 30, "racing_bulls"),
  ("lindblad", "Arvid Lindblad", "LIN", 45, "racing_bulls"),
  ("alonso", "Fernando Alonso", "ALO", 14, "aston_martin"),
  ("stroll", "Lance Stroll", "STR", 18, "aston_martin"),
  ("ocon", "Esteban Ocon", "OCO", 31, "haas"),
  ("bearman", "Oliver Bearman", "BEA", 87, "haas"),
  ("hulkenberg", "Nico Hulkenberg", "HUL", 27, "audi"),
  ("bortoleto", "Gabriel Bortoleto", "BOR", 5, "audi"),
  ("gasly", "Pierre Gasly", "GAS", 10, "alpine"),
  ("colapinto", "Franco Colapinto", "COL", 43, "alpine"),
  ("perez", "Sergio Perez", "PER", 11, "cadillac"),
  ("bottas", "Valtteri Bottas", "BOT", 77, "cadillac"),
];

/// `(round, name, location, (month, day), sprint)`
const RACES: &[(u32, &str, &str, (u32, u32), bool)] = &[
  (1, "Australian Grand Prix", "Melbourne", (3, 8), false),
  (2, "Chinese Grand Prix", "Shanghai", (3, 15), true),
  (3, "Japanese Grand Prix", "Suzuka", (3, 29), false),
  (4, "Bahrain Grand Prix", "Sakhir", (4, 12), false),
  (5, "Saudi Arabian Grand Prix", "Jeddah", (4, 19), false),
  (6, "Miami Grand Prix", "Miami", (5, 3), true),
  (7, "Canadian Grand Prix", "Montreal", (5, 24), true),
  (8, "Monaco Grand Prix", "Monaco", (6, 7), false),
  (9, "Barcelona-Catalunya Grand Prix", "Barcelona", (6, 14), false),
  (10, "Austrian Grand Prix", "Spielberg", (6, 28), false),
  (11, "British Grand Prix", "Silverstone", (7, 5), true),
  (12, "Belgian Grand Prix", "Spa", (7, 19), false),
  (13, "Hungarian Grand Prix", "Budapest", (7, 26), false),
  (14, "Dutch Grand Prix", "Zandvoort", (8, 23), true),
  (15, "Italian Grand Prix", "Monza", (9, 6), false),
  (16, "Spanish Grand Prix", "Madrid", (9, 13), false),
  (17, "Azerbaijan Grand Prix", "Baku", (9, 26), false),
  (18, "Singapore Grand Prix", "Singapore", (10, 11), true),
  (19, "United States Grand Prix", "Austin", (10, 25), false),
  (20, "Mexico City Grand Prix", "Mexico City", (11, 1), false),
  (21, "São Paulo Grand Prix", "São Paulo", (11, 8), false),
  (22, "Las Vegas Grand Prix", "Las Vegas", (11, 21), false),
  (23, "Qatar Grand Prix", "Lusail", (11, 29), false),
  (24, "Abu Dhabi Grand Prix", "Yas Marina", (12, 6), false),
];

const YEAR: i32 = 2026;

/// The 2026 season: 11 teams, 22 drivers, 24 rounds.
pub fn reference_data() -> Result<ReferenceData> {
  let teams = TEAMS
    .iter()
    .map(|&(id, name, color)| Team {
      id:    id.to_owned(),
      name:  name.to_owned(),
      color: color.to_owned(),
    })
    .collect();

  let drivers = DRIVERS
    .iter()
    .map(|&(id, name, code, number, team)| Driver {
      id: id.to_owned(),
      name: name.to_owned(),
      code: code.to_owned(),
      number,
      team: team.to_owned(),
    })
    .collect();

  let races = RACES
    .iter()
    .map(|&(round, name, location, (month, day), has_sprint)| {
      let date =
        NaiveDate::from_ymd_opt(YEAR, month, day).ok_or(Error::InvalidDate(round))?;
      Ok(Race {
        round,
        name: name.to_owned(),
        location: location.to_owned(),
        date,
        has_sprint,
      })
    })
    .collect::<Result<Vec<_>>>()?;

  ReferenceData::new(teams, drivers, races)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn season_is_valid() {
    let data = reference_data().unwrap();
    assert_eq!(data.teams().len(), 11);
    assert_eq!(data.drivers().len(), 22);
    assert_eq!(data.races().len(), 24);
    assert_eq!(data.races().iter().filter(|r| r.has_sprint).count(), 6);
  }

  #[test]
  fn calendar_dates_are_increasing() {
    let data = reference_data().unwrap();
    assert!(data.races().windows(2).all(|w| w[0].date < w[1].date));
  }

  #[test]
  fn every_team_has_two_seats() {
    let data = reference_data().unwrap();
    for team in data.teams() {
      let seats = data.drivers().iter().filter(|d| d.team == team.id).count();
      assert_eq!(seats, 2, "team {}", team.id);
    }
  }
}
