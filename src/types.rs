use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two independent palette domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Hotbar,
    Crossbar,
}
impl Namespace {
    pub const ALL: [Namespace; 2] = [Namespace::Hotbar, Namespace::Crossbar];

    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Hotbar => "hotbar",
            Namespace::Crossbar => "crossbar",
        }
    }
    /// Marker placed between the job id and the palette name in a storage key.
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Namespace::Hotbar => "hotbar:",
            Namespace::Crossbar => "crossbar:",
        }
    }
    /// Number of physical containers holding this namespace's slot data.
    pub fn containers(self) -> usize {
        match self {
            Namespace::Hotbar => HOTBARS,
            Namespace::Crossbar => 1,
        }
    }
    /// Every logical unit that displays this namespace's active palette.
    pub fn consumers(self) -> impl Iterator<Item = ConsumerId> {
        let consumers: Vec<ConsumerId> = match self {
            Namespace::Hotbar => (0..HOTBARS as u8).map(ConsumerId::Bar).collect(),
            Namespace::Crossbar => ComboMode::ALL.into_iter().map(ConsumerId::Crossbar).collect(),
        };
        consumers.into_iter()
    }
}
impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const HOTBARS: usize = 6;

/// Controller combo-modes sharing the crossbar's single palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComboMode {
    LeftHold,
    RightHold,
    LeftRight,
    RightLeft,
    DoubleLeft,
    DoubleRight,
}
impl ComboMode {
    pub const ALL: [ComboMode; 6] = [
        ComboMode::LeftHold,
        ComboMode::RightHold,
        ComboMode::LeftRight,
        ComboMode::RightLeft,
        ComboMode::DoubleLeft,
        ComboMode::DoubleRight,
    ];
}

/// Receiver of a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsumerId {
    /// Hotbar index, `0..HOTBARS`.
    Bar(u8),
    Crossbar(ComboMode),
}

/// Job identifier handed to us by the job tracker. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u32);
impl JobId {
    /// Used whenever the job is unknown.
    pub const FALLBACK: JobId = JobId(1);

    pub fn new(id: u32) -> Self {
        if id == 0 {
            Self::FALLBACK
        } else {
            JobId(id)
        }
    }
    pub fn get(self) -> u32 {
        self.0
    }
}
impl Default for JobId {
    fn default() -> Self {
        Self::FALLBACK
    }
}
impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A validated palette name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaletteName(String);
impl PaletteName {
    /// Surrounding whitespace is stripped before the constraints are checked.
    pub fn new(name: &str, max_len: usize) -> Result<Self> {
        let name = name.trim();
        let reason = if name.is_empty() {
            "name must not be empty".to_owned()
        } else if name.chars().count() > max_len {
            format!("name must be at most {max_len} characters")
        } else if name.contains(crate::key::SEPARATOR) {
            format!("name must not contain '{}'", crate::key::SEPARATOR)
        } else {
            return Ok(PaletteName(name.to_owned()));
        };
        Err(PaletteError::InvalidName {
            name: name.to_owned(),
            reason,
        })
    }
    /// Names recovered from storage skip the length check so hand-edited
    /// settings stay addressable.
    pub(crate) fn from_stored(name: &str) -> Option<Self> {
        (!name.is_empty()).then(|| PaletteName(name.to_owned()))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
impl std::borrow::Borrow<str> for PaletteName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
impl PartialEq<str> for PaletteName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for PaletteName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Opaque slot bindings. Owned by the slot editor, never interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotData(pub serde_json::Value);
impl SlotData {
    pub fn empty() -> Self {
        SlotData(serde_json::Value::Object(Default::default()))
    }
}
impl Default for SlotData {
    fn default() -> Self {
        Self::empty()
    }
}

/// `-1` moves towards the front of the order, `+1` towards the back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Back,
    Forward,
}
impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Back => -1,
            Direction::Forward => 1,
        }
    }
}
impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.step().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_checked() {
        assert_eq!(PaletteName::new("  Heals ", 32).unwrap(), "Heals");
        assert!(matches!(PaletteName::new("   ", 32), Err(PaletteError::InvalidName { .. })));
        assert!(PaletteName::new(&"x".repeat(32), 32).is_ok());
        assert!(PaletteName::new(&"x".repeat(33), 32).is_err());
        assert!(PaletteName::new("a|b", 32).is_err());
    }

    #[test]
    fn zero_job_falls_back() {
        assert_eq!(JobId::new(0), JobId::FALLBACK);
        assert_eq!(JobId::new(19).get(), 19);
    }

    #[test]
    fn consumers_cover_every_unit() {
        assert_eq!(Namespace::Hotbar.consumers().count(), HOTBARS);
        assert!(Namespace::Hotbar.consumers().all(|c| matches!(c, ConsumerId::Bar(b) if b < 6)));
        assert_eq!(Namespace::Crossbar.consumers().count(), ComboMode::ALL.len());
    }
}
