//! Transient configuration state.

use armature_math::DVec;

use crate::error::Result;
use crate::tree::KinematicTree;

/// Joint positions, velocities, and accelerations for one query.
///
/// This is scratch state, not part of a tree's identity: queries take it by
/// reference, derive per-link velocity/acceleration/force in their own
/// buffers, and leave it untouched. Two threads may query the same tree
/// with different configurations concurrently.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Joint positions.
    pub q: DVec,
    /// Joint velocities.
    pub qd: DVec,
    /// Joint accelerations.
    pub qdd: DVec,
}

impl Configuration {
    /// All-zero configuration for an n-joint tree.
    pub fn zeros(dof: usize) -> Self {
        Self {
            q: DVec::zeros(dof),
            qd: DVec::zeros(dof),
            qdd: DVec::zeros(dof),
        }
    }

    /// Positions only, with zero rates.
    pub fn from_positions(q: DVec) -> Self {
        let n = q.len();
        Self {
            q,
            qd: DVec::zeros(n),
            qdd: DVec::zeros(n),
        }
    }

    pub fn new(q: DVec, qd: DVec, qdd: DVec) -> Self {
        Self { q, qd, qdd }
    }

    /// Check all three vectors against the tree's dimension.
    pub fn validate(&self, tree: &KinematicTree) -> Result<()> {
        tree.check_configuration(&self.q)?;
        tree.check_configuration(&self.qd)?;
        tree.check_configuration(&self.qdd)?;
        Ok(())
    }
}
