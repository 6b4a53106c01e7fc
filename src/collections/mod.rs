mod container;
mod slotmap;

pub use container::SlotContainer;
pub(crate) use slotmap::{SlotKey, SlotMap};
