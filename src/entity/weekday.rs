// src/entity/weekday.rs
use serde::{Deserialize, Serialize};

use crate::error::GoalplanError;

/// A day of the week a goal's routine is scheduled on.
///
/// Variants are declared Monday-first so a `BTreeSet<Weekday>` iterates in
/// calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Weekday::Mon => write!(f, "mon"),
            Weekday::Tue => write!(f, "tue"),
            Weekday::Wed => write!(f, "wed"),
            Weekday::Thu => write!(f, "thu"),
            Weekday::Fri => write!(f, "fri"),
            Weekday::Sat => write!(f, "sat"),
            Weekday::Sun => write!(f, "sun"),
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = GoalplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mon" | "monday" => Ok(Weekday::Mon),
            "tue" | "tues" | "tuesday" => Ok(Weekday::Tue),
            "wed" | "wednesday" => Ok(Weekday::Wed),
            "thu" | "thur" | "thurs" | "thursday" => Ok(Weekday::Thu),
            "fri" | "friday" => Ok(Weekday::Fri),
            "sat" | "saturday" => Ok(Weekday::Sat),
            "sun" | "sunday" => Ok(Weekday::Sun),
            _ => Err(GoalplanError::UnknownWeekday(s.to_string())),
        }
    }
}
