//! Forward kinematics — compose joint transforms root-to-link.

use armature_math::{DVec, SpatialTransform};
use armature_model::{KinematicTree, LinkId, ModelError};

use crate::error::Result;

/// Base-to-link Plücker transforms for every link, in one pre-order pass.
///
/// Each link's transform is defined relative to its parent's frame, so the
/// pass visits parents strictly before children; index order gives exactly
/// that. Inverting a returned transform (or [`SpatialTransform::to_homogeneous`])
/// yields the link pose in world coordinates; the `pos` field is already the
/// link origin in world coordinates.
pub fn link_transforms(tree: &KinematicTree, q: &DVec) -> Result<Vec<SpatialTransform>> {
    tree.check_configuration(q)?;

    let mut xforms = vec![SpatialTransform::identity(); tree.dof()];
    for id in tree.pre_order() {
        let i = id.0;
        let step = tree.parent_to_link(id, q[i]);
        xforms[i] = match tree.link(id).parent {
            Some(p) => step.compose(&xforms[p]),
            None => step,
        };
    }
    Ok(xforms)
}

/// Pose of a single link: the Plücker transform from the world frame to the
/// link frame. A pure function of `q`; nothing in the tree is mutated.
pub fn pose(tree: &KinematicTree, id: LinkId, q: &DVec) -> Result<SpatialTransform> {
    tree.check_configuration(q)?;

    let mut x = SpatialTransform::identity();
    for &i in ancestor_path(tree, id)?.iter().rev() {
        x = tree.parent_to_link(LinkId(i), q[i]).compose(&x);
    }
    Ok(x)
}

/// Indices from `id` up to its root, leaf first.
///
/// Guards against a parent chain that escapes the arena or loops longer
/// than the link count; either means the link is not connected to the base.
pub(crate) fn ancestor_path(tree: &KinematicTree, id: LinkId) -> Result<Vec<usize>> {
    let disconnected = || ModelError::DisconnectedLink(tree.link(id).name.clone());

    let mut path = Vec::new();
    let mut current = Some(id.0);
    while let Some(i) = current {
        if i >= tree.dof() || path.len() >= tree.dof() {
            return Err(disconnected().into());
        }
        path.push(i);
        current = tree.link(LinkId(i)).parent;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use armature_math::{SpatialInertia, Vec3};
    use armature_model::{JointKind, TreeBuilder};
    use std::f64::consts::FRAC_PI_2;

    fn seg(len: f64) -> SpatialTransform {
        SpatialTransform::translation(Vec3::new(len, 0.0, 0.0))
    }

    /// Planar two-revolute arm, both segments length 2, joints about Z.
    fn planar_2r() -> KinematicTree {
        let mut b = TreeBuilder::new();
        b.add_link(
            "upper",
            JointKind::Revolute,
            seg(2.0),
            SpatialInertia::zero(),
            None,
        )
        .unwrap();
        b.add_link(
            "fore",
            JointKind::Revolute,
            seg(2.0),
            SpatialInertia::zero(),
            Some("upper"),
        )
        .unwrap();
        b.build().unwrap()
    }

    #[test]
    fn straight_arm_reaches_along_x() {
        let tree = planar_2r();
        let ee = tree.link_by_name("fore").unwrap();
        let x = pose(&tree, ee, &DVec::zeros(2)).unwrap();
        assert_relative_eq!(x.pos, Vec3::new(4.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn shoulder_rotation_swings_whole_arm() {
        let tree = planar_2r();
        let ee = tree.link_by_name("fore").unwrap();
        let q = DVec::from_vec(vec![FRAC_PI_2, 0.0]);
        let x = pose(&tree, ee, &q).unwrap();
        assert_relative_eq!(x.pos, Vec3::new(0.0, 4.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn elbow_rotation_bends_forearm() {
        let tree = planar_2r();
        let ee = tree.link_by_name("fore").unwrap();
        let q = DVec::from_vec(vec![0.0, FRAC_PI_2]);
        let x = pose(&tree, ee, &q).unwrap();
        assert_relative_eq!(x.pos, Vec3::new(2.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn prismatic_link_extends() {
        let mut b = TreeBuilder::new();
        b.add_link(
            "slide",
            JointKind::Prismatic,
            SpatialTransform::identity(),
            SpatialInertia::zero(),
            None,
        )
        .unwrap();
        let tree = b.build().unwrap();
        let x = pose(&tree, armature_model::LinkId(0), &DVec::from_vec(vec![1.5])).unwrap();
        assert_relative_eq!(x.pos, Vec3::new(0.0, 0.0, 1.5), epsilon = 1e-12);
    }

    #[test]
    fn zero_configuration_with_identity_offsets_is_identity() {
        let mut b = TreeBuilder::new();
        b.add_link(
            "anchor",
            JointKind::Revolute,
            SpatialTransform::identity(),
            SpatialInertia::zero(),
            None,
        )
        .unwrap();
        let tree = b.build().unwrap();
        let x = pose(&tree, armature_model::LinkId(0), &DVec::zeros(1)).unwrap();
        assert_relative_eq!(x.rot, armature_math::Mat3::identity(), epsilon = 1e-12);
        assert_relative_eq!(x.pos, Vec3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn pose_is_pure_in_q() {
        let tree = planar_2r();
        let ee = tree.link_by_name("fore").unwrap();
        let qa = DVec::zeros(2);
        let qb = DVec::from_vec(vec![FRAC_PI_2, 0.0]);

        let first = pose(&tree, ee, &qa).unwrap();
        let _ = pose(&tree, ee, &qb).unwrap();
        let again = pose(&tree, ee, &qa).unwrap();
        assert_relative_eq!(first.pos, again.pos, epsilon = 1e-15);
        assert_relative_eq!(first.rot, again.rot, epsilon = 1e-15);
    }

    #[test]
    fn wrong_q_length_is_rejected() {
        let tree = planar_2r();
        let ee = tree.link_by_name("fore").unwrap();
        assert!(pose(&tree, ee, &DVec::zeros(5)).is_err());
    }

    #[test]
    fn batch_matches_single_link_queries() {
        let tree = planar_2r();
        let q = DVec::from_vec(vec![0.3, -0.7]);
        let all = link_transforms(&tree, &q).unwrap();
        for (i, x) in all.iter().enumerate() {
            let single = pose(&tree, armature_model::LinkId(i), &q).unwrap();
            assert_relative_eq!(x.pos, single.pos, epsilon = 1e-12);
            assert_relative_eq!(x.rot, single.rot, epsilon = 1e-12);
        }
    }
}
