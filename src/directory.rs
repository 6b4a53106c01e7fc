use crate::prelude::*;
use std::collections::BTreeSet;

/// Read-only view answering "which palettes does this job have, in what order".
#[derive(Debug, Clone, Copy)]
pub struct Directory<'a> {
    settings: &'a Settings,
}
impl<'a> Directory<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Names held by any container, stored order first, then the rest sorted.
    pub fn list(&self, ns: Namespace, job: JobId) -> Vec<PaletteName> {
        let mut present: BTreeSet<PaletteName> = self
            .settings
            .containers(ns)
            .iter()
            .flat_map(|c| c.keys())
            .filter(|key| key.job == job)
            .filter_map(|key| match &key.palette {
                Some((key_ns, name)) if *key_ns == ns => Some(name.clone()),
                _ => None,
            })
            .collect();

        let mut listed = Vec::with_capacity(present.len());
        for name in self.settings.order(ns, job).into_iter().flatten() {
            if let Some(name) = present.take(name.as_str()) {
                listed.push(name);
            }
        }
        listed.extend(present);
        listed
    }

    /// Listing for the first job in `chain` that has any palettes at all.
    pub fn list_chain(&self, ns: Namespace, chain: &[JobId]) -> Option<(JobId, Vec<PaletteName>)> {
        chain.iter().find_map(|&job| {
            let names = self.list(ns, job);
            (!names.is_empty()).then_some((job, names))
        })
    }

    pub fn exists(&self, ns: Namespace, job: JobId, name: &str) -> bool {
        self.index_of(ns, job, name).is_some()
    }
    pub fn index_of(&self, ns: Namespace, job: JobId, name: &str) -> Option<usize> {
        self.list(ns, job).iter().position(|n| n == name)
    }
    pub fn count(&self, ns: Namespace, job: JobId) -> usize {
        self.list(ns, job).len()
    }
    pub fn first(&self, ns: Namespace, job: JobId) -> Option<PaletteName> {
        self.list(ns, job).into_iter().next()
    }
    /// True when any container of `ns` holds `key`.
    pub(crate) fn held_anywhere(&self, ns: Namespace, key: &StorageKey) -> bool {
        self.settings.containers(ns).iter().any(|c| c.contains(key))
    }
}
