//! Model types for the armature manipulator engine.
//!
//! `KinematicTree` is the static description of a manipulator (topology,
//! joint kinds, fixed transforms, inertias). `Configuration` is the
//! transient per-query state (q, q̇, q̈). The tree is immutable once built;
//! all scratch buffers used by the algorithms live outside it.

pub mod config;
pub mod dh;
pub mod error;
pub mod joint;
pub mod link;
pub mod tree;

pub use config::Configuration;
pub use dh::DhRow;
pub use error::{ModelError, Result};
pub use joint::JointKind;
pub use link::{Link, LinkId};
pub use tree::{KinematicTree, TreeBuilder};
