//! Inverse dynamics for the armature manipulator engine.

pub mod rnea;

pub use rnea::{rne, static_torques, Gravity};
