#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Namespace token every DRS identifier starts with.
pub const DRS_PREFIX: &str = "esacci";

/// A DRS identifier without its realization suffix.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DrsStem(String);

impl DrsStem {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ModelError::EmptyStem);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Facet segments after the namespace prefix.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0
            .strip_prefix(DRS_PREFIX)
            .unwrap_or(&self.0)
            .split('.')
            .filter(|segment| !segment.is_empty())
    }

    /// Append a realization, producing the full identifier.
    pub fn realize(&self, realization: Realization) -> DrsId {
        DrsId(format!("{}.{}", self.0, realization))
    }

    /// If `id` is `<stem>.<suffix>`, return the suffix.
    pub fn suffix_of<'a>(&self, id: &'a str) -> Option<&'a str> {
        id.strip_prefix(self.0.as_str())?.strip_prefix('.')
    }
}

impl fmt::Display for DrsStem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `rN` disambiguator appended to a stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Realization(u32);

impl Realization {
    pub const FIRST: Realization = Realization(1);

    pub fn new(number: u32) -> Result<Self, ModelError> {
        if number == 0 {
            return Err(ModelError::InvalidRealization("r0".to_string()));
        }
        Ok(Self(number))
    }

    pub fn number(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Realization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl FromStr for Realization {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .strip_prefix('r')
            .and_then(|digits| digits.parse::<u32>().ok())
            .ok_or_else(|| ModelError::InvalidRealization(s.to_string()))?;
        Self::new(number)
    }
}

/// A complete DRS identifier: stem plus realization.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DrsId(String);

impl DrsId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn realization_round_trips_through_text() {
        let r: Realization = "r3".parse().unwrap();
        assert_eq!(r.number(), 3);
        assert_eq!(r.to_string(), "r3");
        assert!("3".parse::<Realization>().is_err());
        assert!("r0".parse::<Realization>().is_err());
        assert!("rx".parse::<Realization>().is_err());
    }

    #[test]
    fn suffix_requires_dot_boundary() {
        let stem = DrsStem::new("esacci.SST.day").unwrap();
        assert_eq!(stem.suffix_of("esacci.SST.day.r2"), Some("r2"));
        assert_eq!(stem.suffix_of("esacci.SST.days.r2"), None);
        assert_eq!(stem.suffix_of("esacci.SST"), None);
    }

    #[test]
    fn segments_skip_prefix() {
        let stem = DrsStem::new("esacci.SST.day.L3C").unwrap();
        assert_eq!(stem.segments().collect::<Vec<_>>(), vec!["SST", "day", "L3C"]);
    }

    #[test]
    fn realize_appends_suffix() {
        let stem = DrsStem::new("esacci.SST").unwrap();
        assert_eq!(stem.realize(Realization::FIRST).as_str(), "esacci.SST.r1");
        assert!(DrsStem::new("  ").is_err());
    }
}
