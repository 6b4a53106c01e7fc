/// Vec-backed storage that hands out stable keys and reuses released slots.
#[derive(Debug)]
pub struct SlotMap<T> {
    /// Most recently released index, `u32::MAX` when none are free.
    free: u32,
    entries: Vec<Entry<T>>,
}

/// Slot index plus the generation it was handed out in. A key never
/// addresses a later occupant of its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    index: u32,
    generation: u32,
}
impl SlotKey {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug)]
struct Entry<T> {
    /// Bumped on every release.
    generation: u32,
    slot: Slot<T>,
}
#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    /// Links to the next free index.
    Vacant(u32),
}
impl<T> SlotMap<T> {
    pub fn new() -> Self {
        Self {
            free: u32::MAX,
            entries: vec![],
        }
    }
    pub fn insert(&mut self, value: T) -> SlotKey {
        if self.free == u32::MAX {
            self.entries.push(Entry {
                generation: 0,
                slot: Slot::Occupied(value),
            });
            return SlotKey {
                index: (self.entries.len() - 1) as u32,
                generation: 0,
            };
        }
        let index = self.free;
        let entry = &mut self.entries[index as usize];
        match core::mem::replace(&mut entry.slot, Slot::Occupied(value)) {
            Slot::Vacant(next) => self.free = next,
            Slot::Occupied(_) => unreachable!("free list pointed at a live slot"),
        }
        SlotKey {
            index,
            generation: entry.generation,
        }
    }
    /// `None` when the key's slot was already released, even if it has been
    /// handed out again since.
    pub fn release(&mut self, key: SlotKey) -> Option<T> {
        let entry = self.entries.get_mut(key.index())?;
        if entry.generation != key.generation || matches!(entry.slot, Slot::Vacant(_)) {
            return None;
        }
        match core::mem::replace(&mut entry.slot, Slot::Vacant(self.free)) {
            Slot::Occupied(v) => {
                entry.generation = entry.generation.wrapping_add(1);
                self.free = key.index;
                Some(v)
            }
            Slot::Vacant(_) => None,
        }
    }
    pub fn len(&self) -> usize {
        self.iter().count()
    }
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().enumerate().filter_map(|(i, e)| match &e.slot {
            Slot::Occupied(v) => Some((i, v)),
            Slot::Vacant(_) => None,
        })
    }
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.entries.iter_mut().enumerate().filter_map(|(i, e)| match &mut e.slot {
            Slot::Occupied(v) => Some((i, v)),
            Slot::Vacant(_) => None,
        })
    }
}
impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
