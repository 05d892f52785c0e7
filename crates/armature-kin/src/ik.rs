//! Damped Jacobian-iteration inverse kinematics.
//!
//! First-order local method: linearize FK around the current configuration,
//! take a pseudo-inverse step toward the target pose, repeat. Valid while
//! the residual stays small; near singularities the undamped step is known
//! to diverge, which is why a Levenberg-Marquardt damping term is exposed.

use armature_math::{DVec, SpatialTransform, SpatialVec, Vec3};
use armature_model::{KinematicTree, LinkId};
use nalgebra as na;
use tracing::debug;

use crate::error::{KinError, Result};
use crate::forward::pose;
use crate::jacobian::jacobian;

/// Solver parameters.
#[derive(Debug, Clone)]
pub struct IkConfig {
    /// Convergence threshold on the 6D residual norm.
    pub tol: f64,
    /// Iteration cap; exhausting it is an error, not a silent best-effort.
    pub max_iter: usize,
    /// Levenberg-Marquardt damping λ. Zero gives the plain Gauss-Newton
    /// pseudo-inverse step.
    pub damping: f64,
}

impl Default for IkConfig {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iter: 100,
            damping: 0.0,
        }
    }
}

/// Solve for a configuration that places `id`'s frame at `target`.
///
/// Iterates `dq = J⁺ · r` where `r` is the first-order error twist between
/// the current and target pose and `J⁺` the Moore-Penrose pseudo-inverse,
/// damped by λ when configured. The normal equations are formed on the
/// smaller side of the 6×N Jacobian, so both reduced (N < 6) and redundant
/// (N > 6) chains are handled.
///
/// Fails with `NumericalSingularity` when the damped normal matrix loses
/// positive definiteness and `NoConvergence` when the iteration cap is
/// exhausted. No partial result is returned in either case.
pub fn solve_ik(
    tree: &KinematicTree,
    id: LinkId,
    target: &SpatialTransform,
    q0: &DVec,
    cfg: &IkConfig,
) -> Result<DVec> {
    tree.check_configuration(q0)?;

    let mut q = q0.clone();
    let mut residual = f64::INFINITY;

    for iter in 0..cfg.max_iter {
        let x = pose(tree, id, &q)?;
        let r = error_twist(&x, target);
        residual = r.data.norm();
        debug!(iter, residual, "ik iteration");
        if residual < cfg.tol {
            return Ok(q);
        }

        let j = jacobian(tree, id, &q)?;
        let dq = pseudo_inverse_step(&j, &r, cfg.damping)?;
        q += dq;
    }

    Err(KinError::NoConvergence {
        iterations: cfg.max_iter,
        residual,
    })
}

/// First-order error twist taking the current frame toward the target.
///
/// Extracts the small-rotation part of the relative pose (valid only for
/// small residuals): angular error from the antisymmetric part of the
/// relative rotation, linear error from the frame-origin offset expressed
/// in the current body frame.
fn error_twist(current: &SpatialTransform, target: &SpatialTransform) -> SpatialVec {
    let r_rel = current.rot * target.rot.transpose();
    let angular = Vec3::new(
        0.5 * (r_rel[(2, 1)] - r_rel[(1, 2)]),
        0.5 * (r_rel[(0, 2)] - r_rel[(2, 0)]),
        0.5 * (r_rel[(1, 0)] - r_rel[(0, 1)]),
    );
    let linear = current.rot * (target.pos - current.pos);
    SpatialVec::new(angular, linear)
}

/// `dq = Jᵀ(JJᵀ + λ²I)⁻¹ r`, evaluated through whichever normal-equation
/// side is smaller (the two forms agree algebraically).
fn pseudo_inverse_step(j: &armature_math::DMat, r: &SpatialVec, damping: f64) -> Result<DVec> {
    let n = j.ncols();
    let lambda2 = damping * damping;
    let rhs = na::DVector::from_column_slice(r.data.as_slice());

    let singular = || KinError::NumericalSingularity("JJᵀ is not positive definite");

    if n >= 6 {
        let mut jjt = j * j.transpose();
        for i in 0..6 {
            jjt[(i, i)] += lambda2;
        }
        let chol = na::Cholesky::new(jjt).ok_or_else(singular)?;
        Ok(j.transpose() * chol.solve(&rhs))
    } else {
        let mut jtj = j.transpose() * j;
        for i in 0..n {
            jtj[(i, i)] += lambda2;
        }
        let chol = na::Cholesky::new(jtj).ok_or_else(singular)?;
        Ok(chol.solve(&(j.transpose() * rhs)))
    }
}
