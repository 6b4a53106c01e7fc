use super::Palettes;
use crate::prelude::*;

/// One side of a copy: a job's named palette, or its base slots when `name` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteRef<'a> {
    pub job: JobId,
    pub name: Option<&'a str>,
}
impl<'a> PaletteRef<'a> {
    pub fn base(job: JobId) -> Self {
        Self { job, name: None }
    }
    pub fn named(job: JobId, name: &'a str) -> Self {
        Self { job, name: Some(name) }
    }
}

impl<P: Persist> Palettes<P> {
    /// Adds an empty palette to every container of `ns`.
    pub fn create(&mut self, ns: Namespace, job: JobId, name: &str) -> Result<PaletteName> {
        let settings = self.settings_mut()?;
        let name = PaletteName::new(name, settings.options.max_name_len)?;
        let key = StorageKey::palette(job, ns, name.clone());
        if Directory::new(settings).held_anywhere(ns, &key) {
            return Err(PaletteError::AlreadyExists(name.to_string()));
        }
        let order = materialize_order(settings, ns, job);
        order.push(name.to_string());
        for container in settings.containers_mut(ns) {
            container.set(key.clone(), SlotData::empty());
        }
        log::debug!("created {ns} palette {name:?} for job {job}");
        self.commit();
        Ok(name)
    }

    /// Makes sure `job` has at least one palette, creating the default one if
    /// needed. Returns the first palette either way.
    pub fn ensure_default(&mut self, ns: Namespace, job: JobId) -> Result<PaletteName> {
        let settings = self.settings_ref()?;
        if let Some(first) = Directory::new(settings).first(ns, job) {
            return Ok(first);
        }
        let base = settings.options.default_name.clone();
        let candidates = std::iter::once(base.clone())
            .chain((2..=settings.options.default_name_attempts).map(|n| format!("{base} {n}")));
        for candidate in candidates {
            match self.create(ns, job, &candidate) {
                Ok(name) => {
                    log::info!("job {job} had no {ns} palettes, created {name:?}");
                    return Ok(name);
                }
                Err(PaletteError::AlreadyExists(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(PaletteError::AlreadyExists(base))
    }

    pub fn delete(&mut self, ns: Namespace, job: JobId, name: &str) -> Result<()> {
        let settings = self.settings_mut()?;
        let names = Directory::new(settings).list(ns, job);
        let name = find(&names, name)?;
        if names.len() <= 1 {
            return Err(PaletteError::LastPaletteProtected(name.to_string()));
        }
        let key = StorageKey::palette(job, ns, name.clone());
        for container in settings.containers_mut(ns) {
            container.remove(&key);
        }
        settings.order_mut(ns, job).retain(|n| n != name.as_str());
        if settings.last_used(ns, job) == Some(name.as_str()) {
            settings.remember(ns, job, None);
        }
        let next = Directory::new(settings).first(ns, job);
        log::debug!("deleted {ns} palette {name:?} of job {job}");
        self.commit();

        if self.active.shows(ns, job, &name) {
            self.set_active(ns, next.as_ref().map(PaletteName::as_str), Some(job));
        }
        Ok(())
    }

    /// Slot contents, display position and active selection follow the new name.
    pub fn rename(&mut self, ns: Namespace, job: JobId, old: &str, new: &str) -> Result<PaletteName> {
        let settings = self.settings_mut()?;
        let new = PaletteName::new(new, settings.options.max_name_len)?;
        let names = Directory::new(settings).list(ns, job);
        let old = find(&names, old)?;
        if old == new {
            return Err(PaletteError::SameName(new.to_string()));
        }
        let new_key = StorageKey::palette(job, ns, new.clone());
        if Directory::new(settings).held_anywhere(ns, &new_key) {
            return Err(PaletteError::AlreadyExists(new.to_string()));
        }

        let order = materialize_order(settings, ns, job);
        if let Some(entry) = order.iter_mut().find(|n| n.as_str() == old.as_str()) {
            *entry = new.to_string();
        }
        let old_key = StorageKey::palette(job, ns, old.clone());
        for container in settings.containers_mut(ns) {
            let data = container.remove(&old_key).unwrap_or_default();
            container.set(new_key.clone(), data);
        }
        if settings.last_used(ns, job) == Some(old.as_str()) {
            settings.remember(ns, job, Some(&new));
        }
        if self.active.shows(ns, job, &old) {
            self.active.selection_mut(ns).name = Some(new.clone());
        }
        log::debug!("renamed {ns} palette {old:?} of job {job} to {new:?}");
        self.commit();
        Ok(new)
    }

    /// Swaps `name` with its neighbour. Returns its new position.
    pub fn move_palette(&mut self, ns: Namespace, job: JobId, name: &str, direction: Direction) -> Result<usize> {
        let name = name.trim();
        let settings = self.settings_mut()?;
        let order = materialize_order(settings, ns, job);
        let from = order
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| PaletteError::NotFound(name.to_owned()))?;
        let to = from
            .checked_add_signed(direction.step())
            .filter(|&to| to < order.len())
            .ok_or_else(|| PaletteError::OutOfBounds {
                name: name.to_owned(),
                direction,
            })?;
        order.swap(from, to);
        log::debug!("moved {ns} palette {name:?} of job {job} to position {to}");
        self.commit();
        Ok(to)
    }

    /// Duplicates slot data between palettes or base slots, possibly across jobs.
    /// A named destination must not exist yet; base slots are overwritten.
    pub fn copy(&mut self, ns: Namespace, from: PaletteRef<'_>, to: PaletteRef<'_>) -> Result<()> {
        let settings = self.settings_mut()?;
        let max_len = settings.options.max_name_len;
        let dir = Directory::new(settings);

        let source = match from.name {
            Some(name) => {
                let names = dir.list(ns, from.job);
                StorageKey::palette(from.job, ns, find(&names, name)?)
            }
            None => StorageKey::base(from.job),
        };
        if !dir.held_anywhere(ns, &source) {
            return Err(PaletteError::NotFound(source.to_string()));
        }
        let target = match to.name {
            Some(name) => {
                let name = PaletteName::new(name, max_len)?;
                let key = StorageKey::palette(to.job, ns, name.clone());
                if dir.held_anywhere(ns, &key) {
                    return Err(PaletteError::AlreadyExists(name.to_string()));
                }
                key
            }
            None => StorageKey::base(to.job),
        };

        if let Some(name) = target.name() {
            let name = name.to_string();
            materialize_order(settings, ns, to.job).push(name);
        }
        for container in settings.containers_mut(ns) {
            let data = container.get(&source).cloned().unwrap_or_default();
            container.set(target.clone(), data);
        }
        log::debug!("copied {ns} slots {source} to {target}");
        self.commit();
        Ok(())
    }

    /// Slot data a bar should show: the active palette's, else the job's base slots.
    pub fn slot_data(&self, ns: Namespace, container: usize, job: JobId) -> Option<&SlotData> {
        let container = self.settings.as_ref()?.containers(ns).get(container)?;
        self.active
            .get(ns)
            .and_then(|name| container.get(&StorageKey::palette(job, ns, name.clone())))
            .or_else(|| container.get(&StorageKey::base(job)))
    }

    /// Stores slot data for the active palette, or the base slots when none is
    /// active or `job` has no palette by that name.
    pub fn set_slot_data(&mut self, ns: Namespace, container: usize, job: JobId, data: SlotData) -> Result<()> {
        let active = self.active.get(ns).cloned();
        let settings = self.settings_mut()?;
        let name = match active {
            Some(name) if Directory::new(settings).exists(ns, job, name.as_str()) => Some(name),
            _ => None,
        };
        let key = StorageKey::for_name(job, ns, name.as_ref());
        let slots = settings
            .containers_mut(ns)
            .get_mut(container)
            .ok_or_else(|| PaletteError::NotFound(format!("{ns} container {container}")))?;
        slots.set(key, data);
        self.commit();
        Ok(())
    }
}

/// Looks `name` up the way [`PaletteName::new`] would have stored it.
fn find(names: &[PaletteName], name: &str) -> Result<PaletteName> {
    let name = name.trim();
    names
        .iter()
        .find(|n| *n == name)
        .cloned()
        .ok_or_else(|| PaletteError::NotFound(name.to_owned()))
}

/// Replaces the stored order with the effective one so positions can be edited.
fn materialize_order(settings: &mut Settings, ns: Namespace, job: JobId) -> &mut Vec<String> {
    let effective = Directory::new(settings)
        .list(ns, job)
        .into_iter()
        .map(|n| n.to_string())
        .collect();
    let order = settings.order_mut(ns, job);
    *order = effective;
    order
}
