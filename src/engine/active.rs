use super::Palettes;
use crate::prelude::*;

impl<P: Persist> Palettes<P> {
    /// The palette shown by every bar (or every combo-mode) of `ns`.
    pub fn active(&self, ns: Namespace) -> Option<&PaletteName> {
        self.active.get(ns)
    }

    /// Selects `name` for the whole namespace. With a `job`, the choice is also
    /// remembered for the next time that job comes around. Returns false when
    /// nothing changed.
    pub fn set_active(&mut self, ns: Namespace, name: Option<&str>, job: Option<JobId>) -> bool {
        let new = name.and_then(PaletteName::from_stored);
        let selection = self.active.selection_mut(ns);
        if selection.name == new {
            selection.job = job.or(selection.job);
            return false;
        }
        let old = core::mem::replace(&mut selection.name, new.clone());
        selection.job = job;

        if let Some(job) = job {
            match self.settings.as_mut() {
                Some(settings) => {
                    settings.remember(ns, job, new.as_ref());
                    self.commit();
                }
                None => log::warn!("cannot remember {ns} palette for job {job}: settings not loaded"),
            }
        }

        let (old, new) = (old.as_ref().map(PaletteName::as_str), new.as_ref().map(PaletteName::as_str));
        log::info!("{ns} palette {old:?} -> {new:?}");
        for consumer in ns.consumers() {
            self.notifier.fire(consumer, old, new);
        }
        true
    }

    /// Steps through the job's palettes with wraparound. Does nothing when
    /// there is at most one palette.
    pub fn cycle(&mut self, ns: Namespace, direction: Direction, job: JobId) -> Option<PaletteName> {
        let names = self.list(ns, job);
        if names.len() <= 1 {
            return None;
        }
        let current = self
            .active(ns)
            .and_then(|active| names.iter().position(|n| n == active))
            .unwrap_or(0);
        let next = (current as isize + direction.step()).rem_euclid(names.len() as isize) as usize;
        let next = names[next].clone();
        self.set_active(ns, Some(next.as_str()), Some(job));
        Some(next)
    }

    /// Run whenever the player's job changes: guarantees a palette exists and
    /// that the selection points at one of this job's palettes, preferring the
    /// one last used on it.
    pub fn validate_for_job(&mut self, ns: Namespace, job: JobId) -> Result<Option<PaletteName>> {
        self.ensure_default(ns, job)?;
        let dir = self.directory()?;
        let names = dir.list(ns, job);
        if let Some(active) = self.active(ns).filter(|a| names.contains(*a)).cloned() {
            self.active.selection_mut(ns).job = Some(job);
            return Ok(Some(active));
        }
        let settings = self.settings_ref()?;
        let chosen = settings
            .last_used(ns, job)
            .and_then(|last| names.iter().find(|n| *n == last))
            .or_else(|| names.first())
            .cloned();
        self.set_active(ns, chosen.as_ref().map(PaletteName::as_str), Some(job));
        Ok(chosen)
    }

    /// [`Palettes::validate_for_job`] for both namespaces.
    pub fn switch_job(&mut self, job: JobId) -> Result<()> {
        for ns in Namespace::ALL {
            self.validate_for_job(ns, job)?;
        }
        Ok(())
    }
}
