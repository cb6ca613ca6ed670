// src/logger/level.rs
use crate::utils::error::LogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verbosity tag attached to every message.
///
/// Ordered from "always shown" to "most verbose". A message at level `L` is
/// emitted when the configured threshold `T` satisfies `T >= L`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    /// Always shown as a message level; as a threshold, hides everything else.
    Any,
    Out,
    #[default]
    Err,
    Wrn,
    Inf,
    Dbg,
    Db2,
    Idb,
    Log,
}

// Fixed name table; index order matches the enum order.
const NAMES: [(&str, Level); 9] = [
    ("any", Level::Any),
    ("out", Level::Out),
    ("err", Level::Err),
    ("wrn", Level::Wrn),
    ("inf", Level::Inf),
    ("dbg", Level::Dbg),
    ("db2", Level::Db2),
    ("idb", Level::Idb),
    ("log", Level::Log),
];

// Accepted on input only.
const ALIASES: [(&str, Level); 2] = [("none", Level::Any), ("dbg2", Level::Db2)];

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 9] = [
        Level::Any,
        Level::Out,
        Level::Err,
        Level::Wrn,
        Level::Inf,
        Level::Dbg,
        Level::Db2,
        Level::Idb,
        Level::Log,
    ];

    /// Short lowercase name used in headers and on the command line.
    pub const fn name(self) -> &'static str {
        NAMES[self as usize].0
    }

    /// True when a message at `level` passes a threshold of `self`.
    pub fn allows(self, level: Level) -> bool {
        self >= level
    }

    /// Comma separated list of accepted names, for help text.
    pub fn names() -> String {
        NAMES.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = LogError;

    // `Self::Err` would be ambiguous with the `Err` variant.
    fn from_str(s: &str) -> Result<Self, LogError> {
        let key = s.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .chain(ALIASES.iter())
            .find(|(name, _)| *name == key)
            .map(|(_, level)| *level)
            .ok_or_else(|| LogError::UnknownLevel(s.to_string()))
    }
}

impl TryFrom<String> for Level {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_table() {
        for level in Level::ALL {
            assert_eq!(level.name().parse::<Level>().unwrap(), level);
        }
        assert_eq!(Level::Db2.to_string(), "db2");
        assert_eq!(Level::default(), Level::Err);
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!("none".parse::<Level>().unwrap(), Level::Any);
        assert_eq!("dbg2".parse::<Level>().unwrap(), Level::Db2);
        assert_eq!(" WRN ".parse::<Level>().unwrap(), Level::Wrn);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        match "loud".parse::<Level>() {
            Err(LogError::UnknownLevel(name)) => assert_eq!(name, "loud"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_gating_is_monotonic() {
        for threshold in Level::ALL {
            for level in Level::ALL {
                assert_eq!(threshold.allows(level), level <= threshold);
            }
        }
        assert!(Level::Any.allows(Level::Any));
        assert!(!Level::Any.allows(Level::Out));
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Level::Inf).unwrap();
        assert_eq!(json, "\"inf\"");
        let back: Level = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(back, Level::Any);
        assert!(serde_json::from_str::<Level>("\"loud\"").is_err());
    }
}
