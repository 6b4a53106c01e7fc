use crate::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// One physical bar's slot data, keyed by storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SlotContainer {
    entries: BTreeMap<StorageKey, SlotData>,
}
impl SlotContainer {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn contains(&self, key: &StorageKey) -> bool {
        self.entries.contains_key(key)
    }
    pub fn get(&self, key: &StorageKey) -> Option<&SlotData> {
        self.entries.get(key)
    }
    pub fn set(&mut self, key: StorageKey, data: SlotData) -> Option<SlotData> {
        self.entries.insert(key, data)
    }
    pub fn remove(&mut self, key: &StorageKey) -> Option<SlotData> {
        self.entries.remove(key)
    }
    pub fn keys(&self) -> impl Iterator<Item = &StorageKey> {
        self.entries.keys()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Keys we can't make sense of are dropped rather than failing the whole load.
// When two spellings decode to the same key, the one written in the current
// format wins.
impl<'de> Deserialize<'de> for SlotContainer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = BTreeMap::<String, SlotData>::deserialize(deserializer)?;
        let mut entries: BTreeMap<StorageKey, (bool, SlotData)> = BTreeMap::new();
        for (spelling, data) in raw {
            let key = match StorageKey::parse(&spelling) {
                Some(key) => key,
                None => {
                    log::warn!("dropping slot data under unrecognised key {spelling:?}");
                    continue;
                }
            };
            let current = key.to_string() == spelling;
            match entries.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert((current, data));
                }
                Entry::Occupied(mut slot) if current && !slot.get().0 => {
                    log::warn!("slot data under {spelling:?} replaces an older spelling of the same key");
                    slot.insert((current, data));
                }
                Entry::Occupied(_) => log::warn!("dropping slot data under {spelling:?}: key already loaded"),
            }
        }
        Ok(Self {
            entries: entries.into_iter().map(|(key, (_, data))| (key, data)).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_are_dropped_on_load() {
        let container: SlotContainer = serde_json::from_str(
            r#"{ "4": [1, 2], "4|hotbar:Aoe": {}, "nonsense": null }"#,
        )
        .unwrap();
        assert_eq!(container.len(), 2);
        assert_eq!(
            container.get(&StorageKey::base(JobId::new(4))),
            Some(&SlotData(serde_json::json!([1, 2])))
        );
    }

    #[test]
    fn lookalike_keys_never_replace_real_ones() {
        let container: SlotContainer = serde_json::from_str(
            r#"{ "7": ["real base"], "7|crossbar:": ["junk"], "7abc": ["junk"] }"#,
        )
        .unwrap();
        assert_eq!(container.len(), 1);
        assert_eq!(
            container.get(&StorageKey::base(JobId::new(7))),
            Some(&SlotData(serde_json::json!(["real base"])))
        );
    }

    #[test]
    fn current_spelling_beats_legacy_spelling() {
        let container: SlotContainer = serde_json::from_str(
            r#"{ "3_1|hotbar:Aoe": ["legacy"], "3|hotbar:Aoe": ["current"], "3_9": ["legacy"], "3": ["current"] }"#,
        )
        .unwrap();
        assert_eq!(container.len(), 2);
        let aoe = StorageKey::palette(JobId::new(3), Namespace::Hotbar, PaletteName::new("Aoe", 32).unwrap());
        assert_eq!(container.get(&aoe), Some(&SlotData(serde_json::json!(["current"]))));
        assert_eq!(
            container.get(&StorageKey::base(JobId::new(3))),
            Some(&SlotData(serde_json::json!(["current"])))
        );
    }
}
