use thiserror::Error;

/// Why a palette operation was refused. The message is meant for the player.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("invalid palette name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("a palette named {0:?} already exists")]
    AlreadyExists(String),

    #[error("no palette named {0:?}")]
    NotFound(String),

    #[error("{0:?} is the last palette and cannot be deleted")]
    LastPaletteProtected(String),

    #[error("{name:?} cannot move {direction} any further")]
    OutOfBounds { name: String, direction: crate::Direction },

    #[error("{0:?} already has that name")]
    SameName(String),

    #[error("hotbar settings are not loaded yet")]
    ConfigUnavailable,

    #[error("could not access settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
