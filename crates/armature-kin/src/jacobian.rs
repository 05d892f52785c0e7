//! Manipulator Jacobian assembly.

use armature_math::{DMat, DVec, SpatialTransform};
use armature_model::{KinematicTree, LinkId};
use nalgebra as na;

use crate::error::{KinError, Result};
use crate::forward::ancestor_path;

/// Singular values below this fraction of the largest are treated as rank
/// deficiency in the per-column solve.
const SVD_EPS: f64 = 1e-12;

/// Body-frame manipulator Jacobian: the 6×N matrix mapping joint velocities
/// to the spatial velocity of `id`'s frame, expressed in that frame.
///
/// Column j is joint j's motion subspace carried through the cumulative
/// transform from joint j's moved frame to the target frame; columns of
/// joints that are not ancestors of `id` stay zero. Placement solves the
/// 6×6 motion-matrix system `X_{joint←target} · col = s` by SVD least
/// squares rather than inverting the transform.
pub fn jacobian(tree: &KinematicTree, id: LinkId, q: &DVec) -> Result<DMat> {
    tree.check_configuration(q)?;

    let mut jac = DMat::zeros(6, tree.dof());
    // Accumulates the transform from the current ancestor's moved joint
    // frame to the target frame, growing rootward one link at a time.
    let mut to_target = SpatialTransform::identity();

    let path = ancestor_path(tree, id)?;
    for (step, &i) in path.iter().enumerate() {
        let link = tree.link(LinkId(i));
        to_target = if step == 0 {
            link.local
        } else {
            to_target
                .compose(&tree.link(LinkId(path[step - 1])).joint.transform(q[path[step - 1]]))
                .compose(&link.local)
        };

        let col = place_column(&to_target, &link.joint.motion_subspace().data)?;
        jac.view_mut((0, i), (6, 1)).copy_from(&col);
    }
    Ok(jac)
}

/// Solve `X_{joint←target} · col = s` for the column in target coordinates.
fn place_column(
    to_target: &SpatialTransform,
    subspace: &armature_math::Vec6,
) -> Result<na::DVector<f64>> {
    let from_target = to_target.inverse().to_motion_matrix();
    let m = DMat::from_column_slice(6, 6, from_target.as_slice());
    let rhs = na::DVector::from_column_slice(subspace.as_slice());

    let svd = m.svd(true, true);
    svd.solve(&rhs, SVD_EPS)
        .map_err(|_| KinError::NumericalSingularity("jacobian column solve failed"))
}
