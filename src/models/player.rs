//! Player model
//!
//! This module provides:
//! - `Player` entity (a character owned by an account)
//! - `PlayerVocation`, `PlayerPronoun` and `PlayerSex` closed enumerations
//! - `PlayerListRow`, the raw projection used by the account character list
//! - `CharacterSummary`, its normalized form
//!
//! Stored enum values are text. Anything outside the known members is coerced
//! to the enumeration's default when read, never rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: i64,
    /// Owning account
    pub account_id: i64,
    /// Character name (unique)
    pub name: String,
    /// Experience level
    pub level: i32,
    pub vocation: PlayerVocation,
    pub pronoun: PlayerPronoun,
    pub sex: PlayerSex,
    /// Whether this is the account's main character
    pub is_main: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new level 1 character for the given account
    pub fn new(account_id: i64, name: String) -> Self {
        Self {
            id: 0, // Will be set by database
            account_id,
            name,
            level: 1,
            vocation: PlayerVocation::default(),
            pronoun: PlayerPronoun::default(),
            sex: PlayerSex::default(),
            is_main: false,
            created_at: Utc::now(),
        }
    }

    /// Mark the character as the account's main character
    pub fn as_main(mut self) -> Self {
        self.is_main = true;
        self
    }
}

/// Generates the text mapping shared by the three player enumerations.
///
/// `normalize` is the lenient read path: unknown values become the default.
macro_rules! text_enum {
    ($name:ident, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// All members, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Stored/displayed text of the member
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Map a stored value to a member, falling back to the default
            pub fn normalize(raw: &str) -> Self {
                raw.parse().unwrap_or_default()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(anyhow::anyhow!(concat!("Invalid player ", $label, ": {}"), s)),
                }
            }
        }
    };
}

/// Character vocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerVocation {
    #[default]
    None,
    Sorcerer,
    Druid,
    Paladin,
    Knight,
    #[serde(rename = "Master Sorcerer")]
    MasterSorcerer,
    #[serde(rename = "Elder Druid")]
    ElderDruid,
    #[serde(rename = "Royal Paladin")]
    RoyalPaladin,
    #[serde(rename = "Elite Knight")]
    EliteKnight,
}

text_enum!(PlayerVocation, "vocation", {
    None => "None",
    Sorcerer => "Sorcerer",
    Druid => "Druid",
    Paladin => "Paladin",
    Knight => "Knight",
    MasterSorcerer => "Master Sorcerer",
    ElderDruid => "Elder Druid",
    RoyalPaladin => "Royal Paladin",
    EliteKnight => "Elite Knight",
});

/// Character pronoun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerPronoun {
    #[default]
    Unset,
    #[serde(rename = "They/Them")]
    TheyThem,
    #[serde(rename = "She/Her")]
    SheHer,
    #[serde(rename = "He/Him")]
    HeHim,
    #[serde(rename = "It/Its")]
    ItIts,
}

text_enum!(PlayerPronoun, "pronoun", {
    Unset => "Unset",
    TheyThem => "They/Them",
    SheHer => "She/Her",
    HeHim => "He/Him",
    ItIts => "It/Its",
});

/// Character sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerSex {
    #[default]
    Female,
    Male,
}

text_enum!(PlayerSex, "sex", {
    Female => "Female",
    Male => "Male",
});

/// Raw character row as projected for the account character list.
///
/// Enum columns are kept as stored; `presence_count` is the number of
/// `players_online` records referencing the player.
#[derive(Debug, Clone)]
pub struct PlayerListRow {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub vocation: String,
    pub pronoun: String,
    pub sex: String,
    pub is_main: bool,
    pub presence_count: i64,
}

/// Normalized character entry of the account character list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: i64,
    pub name: String,
    pub level: i32,
    pub online: bool,
    pub vocation: PlayerVocation,
    pub pronoun: PlayerPronoun,
    pub sex: PlayerSex,
    pub is_main: bool,
}

impl From<PlayerListRow> for CharacterSummary {
    fn from(row: PlayerListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            level: row.level,
            online: row.presence_count > 0,
            vocation: PlayerVocation::normalize(&row.vocation),
            pronoun: PlayerPronoun::normalize(&row.pronoun),
            sex: PlayerSex::normalize(&row.sex),
            is_main: row.is_main,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(vocation: &str, pronoun: &str, sex: &str, presence_count: i64) -> PlayerListRow {
        PlayerListRow {
            id: 1,
            name: "Knightly".to_string(),
            level: 8,
            vocation: vocation.to_string(),
            pronoun: pronoun.to_string(),
            sex: sex.to_string(),
            is_main: true,
            presence_count,
        }
    }

    #[test]
    fn test_known_values_pass_through() {
        let summary = CharacterSummary::from(row("Elite Knight", "She/Her", "Male", 0));

        assert_eq!(summary.vocation, PlayerVocation::EliteKnight);
        assert_eq!(summary.pronoun, PlayerPronoun::SheHer);
        assert_eq!(summary.sex, PlayerSex::Male);
        assert!(summary.is_main);
    }

    #[test]
    fn test_unknown_values_fall_back_to_defaults() {
        let summary = CharacterSummary::from(row("Monk", "xe/xem", "3", 0));

        assert_eq!(summary.vocation, PlayerVocation::None);
        assert_eq!(summary.pronoun, PlayerPronoun::Unset);
        assert_eq!(summary.sex, PlayerSex::Female);
    }

    #[test]
    fn test_member_matching_is_exact() {
        assert_eq!(PlayerVocation::normalize("knight"), PlayerVocation::None);
        assert_eq!(PlayerVocation::normalize(" Knight"), PlayerVocation::None);
        assert_eq!(PlayerVocation::normalize("Knight"), PlayerVocation::Knight);
    }

    #[test]
    fn test_online_from_presence_count() {
        assert!(!CharacterSummary::from(row("None", "Unset", "Female", 0)).online);
        assert!(CharacterSummary::from(row("None", "Unset", "Female", 1)).online);
        assert!(CharacterSummary::from(row("None", "Unset", "Female", 17)).online);
    }

    #[test]
    fn test_serialized_names_match_stored_text() {
        for vocation in PlayerVocation::ALL {
            let json = serde_json::to_value(vocation).unwrap();
            assert_eq!(json, serde_json::json!(vocation.as_str()));
        }
        for pronoun in PlayerPronoun::ALL {
            let json = serde_json::to_value(pronoun).unwrap();
            assert_eq!(json, serde_json::json!(pronoun.as_str()));
        }
        for sex in PlayerSex::ALL {
            let json = serde_json::to_value(sex).unwrap();
            assert_eq!(json, serde_json::json!(sex.as_str()));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(PlayerSex::from_str("Other").is_err());
        assert_eq!(PlayerSex::from_str("Male").unwrap(), PlayerSex::Male);
    }
}
