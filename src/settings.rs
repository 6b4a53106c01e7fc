use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Tunables, stored alongside the slot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Name given to the palette created for a job that has none.
    pub default_name: String,
    pub max_name_len: usize,
    /// How many numbered variants of `default_name` to try before giving up.
    pub default_name_attempts: u32,
}
impl Default for Options {
    fn default() -> Self {
        Self {
            default_name: "Default".to_owned(),
            max_name_len: 32,
            default_name_attempts: 99,
        }
    }
}

/// The configuration object this crate mutates: every bar's slot data plus
/// the palette bookkeeping that lives next to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub options: Options,
    pub hotbars: [SlotContainer; HOTBARS],
    pub crossbar: SlotContainer,
    /// Preferred display order, per namespace per job.
    pub order: BTreeMap<Namespace, BTreeMap<JobId, Vec<String>>>,
    /// Palette last selected while playing each job.
    pub last_used: BTreeMap<Namespace, BTreeMap<JobId, String>>,
}
impl Settings {
    /// A missing file yields fresh settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, starting fresh", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
    pub fn containers(&self, ns: Namespace) -> &[SlotContainer] {
        match ns {
            Namespace::Hotbar => &self.hotbars,
            Namespace::Crossbar => core::slice::from_ref(&self.crossbar),
        }
    }
    pub fn containers_mut(&mut self, ns: Namespace) -> &mut [SlotContainer] {
        match ns {
            Namespace::Hotbar => &mut self.hotbars,
            Namespace::Crossbar => core::slice::from_mut(&mut self.crossbar),
        }
    }
    pub fn order(&self, ns: Namespace, job: JobId) -> Option<&Vec<String>> {
        self.order.get(&ns)?.get(&job)
    }
    pub fn order_mut(&mut self, ns: Namespace, job: JobId) -> &mut Vec<String> {
        self.order.entry(ns).or_default().entry(job).or_default()
    }
    pub fn last_used(&self, ns: Namespace, job: JobId) -> Option<&str> {
        self.last_used.get(&ns)?.get(&job).map(String::as_str)
    }
    pub fn remember(&mut self, ns: Namespace, job: JobId, name: Option<&PaletteName>) {
        let per_job = self.last_used.entry(ns).or_default();
        match name {
            Some(name) => {
                per_job.insert(job, name.to_string());
            }
            None => {
                per_job.remove(&job);
            }
        }
    }
}

/// Called after every mutation. Failures are logged by the caller, never surfaced.
pub trait Persist {
    fn persist(&mut self, settings: &Settings) -> io::Result<()>;
}

impl<F: FnMut(&Settings) -> io::Result<()>> Persist for F {
    fn persist(&mut self, settings: &Settings) -> io::Result<()> {
        self(settings)
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPersist;
impl Persist for NoPersist {
    fn persist(&mut self, _: &Settings) -> io::Result<()> {
        Ok(())
    }
}

/// Writes the settings as pretty JSON, replacing the file in one rename.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}
impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl Persist for JsonFile {
    fn persist(&mut self, settings: &Settings) -> io::Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let bytes = serde_json::to_vec_pretty(settings)?;
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)
    }
}
