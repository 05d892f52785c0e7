//! Error types for armature-model.

use thiserror::Error;

/// Construction and configuration errors.
///
/// Construction errors fail fast: a tree that would violate an invariant is
/// never returned partially built.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate link name: {0:?}")]
    DuplicateName(String),

    #[error("unknown parent link: {0:?}")]
    UnknownParent(String),

    #[error("no link named {0:?}")]
    NameNotFound(String),

    #[error("configuration has {got} entries, tree has {expected} joints")]
    ConfigurationSizeMismatch { expected: usize, got: usize },

    #[error("link {0:?} is not reachable from the base")]
    DisconnectedLink(String),

    #[error("unsupported joint pitch: {0}")]
    UnsupportedJointType(f64),

    #[error("link indices are not in parent-before-child order (link {0})")]
    CorruptTopology(usize),
}

pub type Result<T> = std::result::Result<T, ModelError>;
