//! armature — spatial-vector kinematics and dynamics for serial-link
//! manipulators.
//!
//! This is the umbrella crate that provides the [`Manipulator`] façade and
//! re-exports core types from the sub-crates.

pub use armature_dyn::{self, rne, static_torques, Gravity};
pub use armature_kin::{self, jacobian, link_transforms, pose, solve_ik, IkConfig, KinError};
pub use armature_math::{
    self, DMat, DVec, Mat3, Mat4, SpatialInertia, SpatialTransform, SpatialVec, Vec3, GRAVITY,
};
pub use armature_model::{
    self, Configuration, DhRow, JointKind, KinematicTree, Link, LinkId, ModelError, TreeBuilder,
};

/// Convenience façade over a kinematic tree.
///
/// This is the surface external visualization and animation layers consume:
/// an ordered joint list and per-link homogeneous poses, plus pass-throughs
/// to the Jacobian, IK, and inverse-dynamics queries. It owns nothing but
/// the immutable tree; all queries are per-call and side-effect free.
pub struct Manipulator {
    tree: KinematicTree,
    gravity: Gravity,
}

impl Manipulator {
    pub fn new(tree: KinematicTree) -> Self {
        Self {
            tree,
            gravity: Gravity::default(),
        }
    }

    /// Override the world gravity vector used by the dynamics queries.
    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn tree(&self) -> &KinematicTree {
        &self.tree
    }

    /// Link names in topological order — stable across calls, index equals
    /// configuration slot.
    pub fn link_names(&self) -> Vec<&str> {
        self.tree.links().iter().map(|l| l.name.as_str()).collect()
    }

    /// Homogeneous 4×4 world pose of a named link.
    pub fn link_pose(&self, name: &str, q: &DVec) -> Result<Mat4, KinError> {
        let id = self.tree.link_by_name(name)?;
        Ok(pose(&self.tree, id, q)?.to_homogeneous())
    }

    /// Homogeneous world poses for every link, in link order.
    pub fn link_poses(&self, q: &DVec) -> Result<Vec<Mat4>, KinError> {
        Ok(link_transforms(&self.tree, q)?
            .iter()
            .map(SpatialTransform::to_homogeneous)
            .collect())
    }

    /// Body-frame Jacobian of a named link.
    pub fn jacobian(&self, name: &str, q: &DVec) -> Result<DMat, KinError> {
        let id = self.tree.link_by_name(name)?;
        jacobian(&self.tree, id, q)
    }

    /// Iterative IK toward a target world pose for a named link.
    pub fn solve_ik(
        &self,
        name: &str,
        target: &SpatialTransform,
        q0: &DVec,
        cfg: &IkConfig,
    ) -> Result<DVec, KinError> {
        let id = self.tree.link_by_name(name)?;
        solve_ik(&self.tree, id, target, q0, cfg)
    }

    /// Inverse-dynamics torques for a full configuration.
    pub fn torques(&self, cfg: &Configuration) -> Result<DVec, ModelError> {
        rne(&self.tree, cfg, &self.gravity)
    }

    /// Gravity-compensation torques at a given position.
    pub fn holding_torques(&self, q: &DVec) -> Result<DVec, ModelError> {
        static_torques(&self.tree, q, &self.gravity)
    }
}
