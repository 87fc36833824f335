//! Error types for the editing core.
//!
//! Every fallible operation returns a typed error with enough machine-readable
//! context (clip id, asset reference) for the caller to build a user-facing
//! message. Read queries never error; absence is `None` or an empty list.

use thiserror::Error;

use crate::timeline::{AssetRef, ClipId};

/// Core error types.
#[derive(Error, Debug)]
pub enum Error {
    /// A placement was requested with an invalid shape, e.g. a non-positive
    /// duration.
    #[error("invalid clip for asset '{asset}': {reason}")]
    InvalidClip { asset: AssetRef, reason: String },

    /// A mutator targeted a clip id that is not in the store.
    #[error("no clip with id {0}")]
    ClipNotFound(ClipId),

    /// A clip's asset has no resource registry entry. The registry is built
    /// from the same clip set being serialized, so this indicates an
    /// internal-consistency fault, not a recoverable user error.
    #[error("asset '{0}' has no resource registry entry")]
    AssetNotRegistered(AssetRef),

    /// An export was requested for a store containing no clips.
    #[error("cannot export an empty timeline")]
    EmptyTimeline,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Core result type.
pub type Result<T> = std::result::Result<T, Error>;
