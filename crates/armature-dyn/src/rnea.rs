//! Recursive Newton-Euler inverse dynamics.
//!
//! Given (q, q̇, q̈), compute the joint torques that realize them. Two
//! passes over the tree: velocities and accelerations propagate root→leaf,
//! forces accumulate leaf→root. Both passes run in link-index order, which
//! construction guarantees is topological; a misordered tree would compute
//! silently wrong torques, which is exactly why the builder refuses one.

use armature_math::{DVec, SpatialTransform, SpatialVec, Vec3, GRAVITY};
use armature_model::{Configuration, KinematicTree, Result};

/// Gravity acting on the mechanism, as a world-frame vector.
#[derive(Debug, Clone, Copy)]
pub struct Gravity(pub Vec3);

impl Default for Gravity {
    /// Standard gravity pulling along world -Z.
    fn default() -> Self {
        Gravity(Vec3::new(0.0, 0.0, -GRAVITY))
    }
}

/// Compute inverse dynamics torques.
///
/// All per-link state (velocity, acceleration, force) lives in buffers
/// local to this call; the tree and configuration are read-only, so
/// concurrent queries against one tree are safe and a failed size check
/// commits nothing.
pub fn rne(tree: &KinematicTree, cfg: &Configuration, gravity: &Gravity) -> Result<DVec> {
    cfg.validate(tree)?;

    let nb = tree.dof();
    let mut tau = DVec::zeros(nb);

    let mut x_tree = vec![SpatialTransform::identity(); nb];
    let mut vel = vec![SpatialVec::zero(); nb];
    let mut force = vec![SpatialVec::zero(); nb];

    // Seeding the base acceleration with -g makes every link "accelerate
    // upward" relative to free fall, which folds gravity into the same
    // propagation as real accelerations.
    let a0 = SpatialVec::new(Vec3::zeros(), -gravity.0);

    // ── Forward pass: velocities, accelerations, bias forces ──
    let mut acc = vec![SpatialVec::zero(); nb];
    for id in tree.pre_order() {
        let i = id.0;
        x_tree[i] = tree.parent_to_link(id, cfg.q[i]);

        let s = tree.link_subspace(id);
        let v_joint = s * cfg.qd[i];
        let a_joint = s * cfg.qdd[i];

        match tree.link(id).parent {
            None => {
                vel[i] = v_joint;
                acc[i] = x_tree[i].apply_motion(&a0) + a_joint;
            }
            Some(p) => {
                vel[i] = x_tree[i].apply_motion(&vel[p]) + v_joint;
                acc[i] = x_tree[i].apply_motion(&acc[p])
                    + a_joint
                    + vel[i].cross_motion(&v_joint);
            }
        }

        let inertia = tree.link(id).inertia.to_matrix();
        force[i] = inertia.mul_vec(&acc[i]) + vel[i].cross_force(&inertia.mul_vec(&vel[i]));
    }

    // ── Backward pass: project torques, push forces to parents ──
    for id in tree.post_order() {
        let i = id.0;
        tau[i] = tree.link_subspace(id).dot(&force[i]);
        if let Some(p) = tree.link(id).parent {
            force[p] = force[p] + x_tree[i].inv_apply_force(&force[i]);
        }
    }

    Ok(tau)
}

/// Gravity-compensation torques: RNE with zero rates and accelerations.
pub fn static_torques(tree: &KinematicTree, q: &DVec, gravity: &Gravity) -> Result<DVec> {
    let cfg = Configuration::from_positions(q.clone());
    rne(tree, &cfg, gravity)
}
