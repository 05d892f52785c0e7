//! Kinematic tree construction from a Denavit-Hartenberg table
//! (Hollerbach convention).
//!
//! Each row contributes `RotX(alpha) · Translate(a, 0, d)` followed by the
//! joint variable transform. In the tree's joint-then-offset frame layout
//! this means row i+1's fixed part becomes link i's `local` offset, and the
//! first row's fixed part becomes the tree base transform.

use armature_math::{SpatialInertia, SpatialTransform, Vec3};
use tracing::debug;

use crate::error::Result;
use crate::joint::JointKind;
use crate::tree::{KinematicTree, TreeBuilder};

/// One row of a DH table.
#[derive(Debug, Clone, Copy)]
pub struct DhRow {
    /// Twist angle about the X axis (rad).
    pub alpha: f64,
    /// Offset along the Z axis.
    pub d: f64,
    /// Offset along the X axis.
    pub a: f64,
    /// Joint kind for this row's variable.
    pub joint: JointKind,
    /// Link inertia about the link frame.
    pub inertia: SpatialInertia,
}

impl DhRow {
    /// Revolute row with massless link.
    pub fn revolute(alpha: f64, d: f64, a: f64) -> Self {
        Self {
            alpha,
            d,
            a,
            joint: JointKind::Revolute,
            inertia: SpatialInertia::zero(),
        }
    }

    /// Prismatic row with massless link.
    pub fn prismatic(alpha: f64, d: f64, a: f64) -> Self {
        Self {
            alpha,
            d,
            a,
            joint: JointKind::Prismatic,
            inertia: SpatialInertia::zero(),
        }
    }

    /// Attach an inertia to the row's link.
    pub fn with_inertia(mut self, inertia: SpatialInertia) -> Self {
        self.inertia = inertia;
        self
    }

    /// The row's fixed Plücker transform: rotate alpha about X, then
    /// translate (a, 0, d) in the rotated frame.
    fn fixed_transform(&self) -> SpatialTransform {
        SpatialTransform::translation(Vec3::new(self.a, 0.0, self.d))
            .compose(&SpatialTransform::rot_x(-self.alpha))
    }
}

/// Build a serial chain from DH rows. Links are named `link1..linkN` in row
/// order, each the child of its predecessor.
pub(crate) fn tree_from_dh(rows: &[DhRow]) -> Result<KinematicTree> {
    let mut builder = TreeBuilder::new();
    if let Some(first) = rows.first() {
        builder = builder.base(first.fixed_transform());
    }

    let mut parent: Option<String> = None;
    for (i, row) in rows.iter().enumerate() {
        // The fixed part of the NEXT row sits between this joint and the
        // next, so it is this link's frame offset.
        let local = match rows.get(i + 1) {
            Some(next) => next.fixed_transform(),
            None => SpatialTransform::identity(),
        };
        let name = format!("link{}", i + 1);
        builder.add_link(&name, row.joint, local, row.inertia, parent.as_deref())?;
        parent = Some(name);
    }

    debug!(rows = rows.len(), "built tree from DH table");
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn planar_chain_offsets_land_on_links() {
        // Two revolute joints, a = L1 between them.
        let rows = [DhRow::revolute(0.0, 0.0, 0.0), DhRow::revolute(0.0, 0.0, 1.5)];
        let tree = KinematicTree::from_dh(&rows).unwrap();
        assert_eq!(tree.dof(), 2);

        let first = tree.link(tree.link_by_name("link1").unwrap());
        assert_relative_eq!(first.local.pos, Vec3::new(1.5, 0.0, 0.0), epsilon = 1e-12);
        let second = tree.link(tree.link_by_name("link2").unwrap());
        assert_relative_eq!(second.local.pos, Vec3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn first_row_fixed_part_becomes_base() {
        let rows = [DhRow::revolute(std::f64::consts::FRAC_PI_2, 0.3, 0.0)];
        let tree = KinematicTree::from_dh(&rows).unwrap();
        // Base pose: RotX(π/2) then translate (0, 0, 0.3).
        let h = tree.base().to_homogeneous();
        assert_relative_eq!(h[(0, 3)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(h[(1, 3)], -0.3, epsilon = 1e-12);
        assert_relative_eq!(h[(2, 3)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_table_is_empty_tree() {
        let tree = KinematicTree::from_dh(&[]).unwrap();
        assert_eq!(tree.dof(), 0);
    }
}
