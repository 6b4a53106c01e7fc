//! Storage keys: the only place a job id and palette name are glued into a string.
//!
//! `5` addresses job 5's base slots, `5|hotbar:Stuns` addresses its `Stuns`
//! hotbar palette. Older settings used `job_subjob` prefixes (`5_2|hotbar:Stuns`);
//! those still decode, keeping only the leading job number.
use crate::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StorageKey {
    pub job: JobId,
    /// Absent for the base slot data.
    pub palette: Option<(Namespace, PaletteName)>,
}
impl StorageKey {
    pub fn base(job: JobId) -> Self {
        Self { job, palette: None }
    }
    pub fn palette(job: JobId, ns: Namespace, name: PaletteName) -> Self {
        Self {
            job,
            palette: Some((ns, name)),
        }
    }
    /// Key for `name` in `ns`, or the base key when `name` is absent.
    pub fn for_name(job: JobId, ns: Namespace, name: Option<&PaletteName>) -> Self {
        Self {
            job,
            palette: name.map(|n| (ns, n.clone())),
        }
    }
    pub fn name(&self) -> Option<&PaletteName> {
        self.palette.as_ref().map(|(_, n)| n)
    }
    /// `None` for anything that isn't a palette key with a name or a base
    /// key made of a job number (`5`, or the older `5_2`).
    pub fn parse(key: &str) -> Option<Self> {
        let tagged = Namespace::ALL
            .iter()
            .filter_map(|&ns| find_tag(key, ns).map(|at| (at, ns)))
            .min_by_key(|(at, _)| *at);
        match tagged {
            Some((at, ns)) => {
                let name = PaletteName::from_stored(&key[at + 1 + ns.tag().len()..])?;
                Some(Self::palette(leading_job(&key[..at]).unwrap_or_default(), ns, name))
            }
            None => {
                let (job, sub) = key.split_once('_').unwrap_or((key, "0"));
                let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
                if numeric(job) && numeric(sub) {
                    leading_job(job).map(Self::base)
                } else {
                    None
                }
            }
        }
    }
}
impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.palette {
            None => write!(f, "{}", self.job),
            Some((ns, name)) => write!(f, "{}{}{}{}", self.job, SEPARATOR, ns.tag(), name),
        }
    }
}

/// String form of the key for `name`, or of the base key when absent.
pub fn encode(job: JobId, ns: Namespace, name: Option<&PaletteName>) -> String {
    StorageKey::for_name(job, ns, name).to_string()
}

/// Palette name carried by `key` for namespace `ns`. The job part may be
/// anything; an empty name after the tag counts as no palette.
pub fn decode(key: &str, ns: Namespace) -> Option<&str> {
    let at = find_tag(key, ns)?;
    let name = &key[at + 1 + ns.tag().len()..];
    (!name.is_empty()).then_some(name)
}

fn find_tag(key: &str, ns: Namespace) -> Option<usize> {
    let tag = ns.tag();
    key.match_indices(SEPARATOR)
        .map(|(at, _)| at)
        .find(|&at| key[at + 1..].starts_with(tag))
}

fn leading_job(prefix: &str) -> Option<JobId> {
    let digits = prefix.len() - prefix.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    // an absurdly long digit run is still a job, just not one we can name
    prefix[..digits]
        .parse::<u32>()
        .ok()
        .map(JobId::new)
        .or_else(|| (digits > 0).then_some(JobId::FALLBACK))
}

impl Serialize for StorageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> Deserialize<'de> for StorageKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StorageKey::parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognised storage key {raw:?}")))
    }
}
