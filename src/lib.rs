//! Named hotbar and crossbar palettes.
//!
//! A player keeps several complete sets of action-bar bindings per job and
//! flips between them. The hotbar namespace is spread over six bar containers
//! that must always agree on which palettes exist; the crossbar lives in one
//! container. [`Palettes`] owns the settings object while it edits them, tracks
//! the selected palette of each namespace, and tells subscribers when the
//! selection changes.
mod collections;
pub mod directory;
pub mod engine;
pub mod error;
pub mod key;
pub mod notify;
pub mod settings;
pub mod types;

pub use collections::SlotContainer;
pub use directory::Directory;
pub use engine::{PaletteRef, Palettes};
pub use error::{PaletteError, Result};
pub use key::StorageKey;
pub use notify::{CallbackError, Notifier, Subscription};
pub use settings::{JsonFile, NoPersist, Options, Persist, Settings};
pub use types::*;

mod prelude {
    pub(crate) use crate::collections::*;
    pub(crate) use crate::directory::Directory;
    pub(crate) use crate::error::{PaletteError, Result};
    pub(crate) use crate::key::StorageKey;
    pub(crate) use crate::notify::{CallbackError, Notifier, Subscription};
    pub(crate) use crate::settings::{NoPersist, Persist, Settings};
    pub(crate) use crate::types::*;
    pub(crate) use std::io;
}
