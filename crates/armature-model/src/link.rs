//! Arena link node.

use armature_math::{SpatialInertia, SpatialTransform};

use crate::joint::JointKind;

/// Index of a link in the tree's arena. Doubles as the link's column in the
/// configuration vector and the Jacobian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// One rigid link and the joint connecting it to its parent.
///
/// Links are arena nodes: ownership lives in the tree's flat array, and
/// parent/children are plain indices, so the parent back-reference cannot
/// dangle and the graph cannot form an ownership cycle.
#[derive(Debug, Clone)]
pub struct Link {
    /// Unique name.
    pub name: String,
    /// The joint connecting this link to its parent.
    pub joint: JointKind,
    /// Fixed transform from the joint's moved frame to the link frame.
    /// For a simple arm segment this is the translation to the link tip.
    pub local: SpatialTransform,
    /// Spatial inertia about the link frame origin.
    pub inertia: SpatialInertia,
    /// Parent link index; `None` means attached to the fixed base.
    pub parent: Option<usize>,
    /// Child link indices, in insertion order.
    pub children: Vec<usize>,
}
