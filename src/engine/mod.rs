use crate::prelude::*;

mod active;
mod crud;

pub use crud::PaletteRef;

/// Owns the settings object while palettes are being managed, along with the
/// currently selected palette of each namespace.
#[derive(Debug)]
pub struct Palettes<P = NoPersist> {
    settings: Option<Settings>,
    persist: P,
    active: Active,
    notifier: Notifier,
}

#[derive(Debug, Default)]
struct Active {
    hotbar: Selection,
    crossbar: Selection,
}
/// A namespace's selected palette, and the job it was picked for when known.
#[derive(Debug, Default)]
struct Selection {
    name: Option<PaletteName>,
    job: Option<JobId>,
}
impl Active {
    fn get(&self, ns: Namespace) -> Option<&PaletteName> {
        self.selection(ns).name.as_ref()
    }
    fn selection(&self, ns: Namespace) -> &Selection {
        match ns {
            Namespace::Hotbar => &self.hotbar,
            Namespace::Crossbar => &self.crossbar,
        }
    }
    fn selection_mut(&mut self, ns: Namespace) -> &mut Selection {
        match ns {
            Namespace::Hotbar => &mut self.hotbar,
            Namespace::Crossbar => &mut self.crossbar,
        }
    }
    /// Whether `ns` shows `job`'s `name`. A selection made without a job
    /// matches every job.
    fn shows(&self, ns: Namespace, job: JobId, name: &PaletteName) -> bool {
        let selection = self.selection(ns);
        selection.name.as_ref() == Some(name) && selection.job.map_or(true, |owner| owner == job)
    }
}

impl<P: Persist> Palettes<P> {
    pub fn new(settings: Settings, persist: P) -> Self {
        Self {
            settings: Some(settings),
            ..Self::unattached(persist)
        }
    }
    /// An engine whose settings haven't been loaded yet. Everything is refused
    /// with [`PaletteError::ConfigUnavailable`] until [`Palettes::attach`].
    pub fn unattached(persist: P) -> Self {
        Self {
            settings: None,
            persist,
            active: Active::default(),
            notifier: Notifier::new(),
        }
    }
    pub fn attach(&mut self, settings: Settings) {
        self.settings = Some(settings);
    }
    pub fn detach(&mut self) -> Option<Settings> {
        self.settings.take()
    }
    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    pub fn subscribe(
        &mut self,
        callback: impl FnMut(ConsumerId, Option<&str>, Option<&str>) -> std::result::Result<(), CallbackError> + 'static,
    ) -> Subscription {
        self.notifier.subscribe(callback)
    }
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    pub fn directory(&self) -> Result<Directory<'_>> {
        self.settings_ref().map(Directory::new)
    }
    pub fn list(&self, ns: Namespace, job: JobId) -> Vec<PaletteName> {
        self.directory().map(|d| d.list(ns, job)).unwrap_or_default()
    }
    pub fn list_chain(&self, ns: Namespace, chain: &[JobId]) -> Option<(JobId, Vec<PaletteName>)> {
        self.directory().ok()?.list_chain(ns, chain)
    }
    pub fn exists(&self, ns: Namespace, job: JobId, name: &str) -> bool {
        self.directory().map_or(false, |d| d.exists(ns, job, name))
    }
    pub fn index_of(&self, ns: Namespace, job: JobId, name: &str) -> Option<usize> {
        self.directory().ok()?.index_of(ns, job, name)
    }
    pub fn count(&self, ns: Namespace, job: JobId) -> usize {
        self.directory().map_or(0, |d| d.count(ns, job))
    }

    fn settings_ref(&self) -> Result<&Settings> {
        self.settings.as_ref().ok_or_else(unavailable)
    }
    fn settings_mut(&mut self) -> Result<&mut Settings> {
        self.settings.as_mut().ok_or_else(unavailable)
    }
    /// Hands the settings to the persistence hook.
    fn commit(&mut self) {
        if let Some(settings) = &self.settings {
            if let Err(e) = self.persist.persist(settings) {
                log::warn!("failed to save palette settings: {e}");
            }
        }
    }
}

fn unavailable() -> PaletteError {
    log::warn!("palette settings requested before they were loaded");
    PaletteError::ConfigUnavailable
}
