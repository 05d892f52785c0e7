//! Joint kinds: revolute, prismatic, and helical screw joints.

use armature_math::{SpatialTransform, SpatialVec, Vec3};

use crate::error::{ModelError, Result};

/// The three single-DOF joint kinds, selected once at construction.
///
/// Replaces the legacy float-pitch encoding (0 = revolute, ∞ = prismatic,
/// finite = helical) with a tagged union; all matches on it are exhaustive
/// and no code compares floats against sentinel values. The joint axis is
/// the local Z axis; other axes are expressed by rotating the neighbouring
/// fixed transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointKind {
    /// Rotation about local Z.
    Revolute,
    /// Translation along local Z.
    Prismatic,
    /// Screw motion: rotation by q about Z plus translation by q·pitch along Z.
    Helical(f64),
}

impl JointKind {
    /// Classify a legacy pitch value. Zero is revolute, infinite is
    /// prismatic, any other finite value is helical. NaN is rejected.
    pub fn from_pitch(pitch: f64) -> Result<Self> {
        if pitch.is_nan() {
            Err(ModelError::UnsupportedJointType(pitch))
        } else if pitch == 0.0 {
            Ok(JointKind::Revolute)
        } else if pitch.is_infinite() {
            Ok(JointKind::Prismatic)
        } else {
            Ok(JointKind::Helical(pitch))
        }
    }

    /// The pitch value this kind corresponds to.
    pub fn pitch(&self) -> f64 {
        match self {
            JointKind::Revolute => 0.0,
            JointKind::Prismatic => f64::INFINITY,
            JointKind::Helical(p) => *p,
        }
    }

    /// Motion subspace vector s: the direction of allowed relative motion,
    /// expressed in the joint frame.
    pub fn motion_subspace(&self) -> SpatialVec {
        let z = Vec3::new(0.0, 0.0, 1.0);
        match self {
            JointKind::Revolute => SpatialVec::new(z, Vec3::zeros()),
            JointKind::Prismatic => SpatialVec::new(Vec3::zeros(), z),
            JointKind::Helical(p) => SpatialVec::new(z, z * *p),
        }
    }

    /// Plücker transform from the parent-side joint frame to the moved
    /// frame, for joint position `q`.
    ///
    /// Passive convention: rotations enter with a negated angle because the
    /// result transforms coordinates into the moved frame.
    pub fn transform(&self, q: f64) -> SpatialTransform {
        match self {
            JointKind::Revolute => SpatialTransform::rot_z(-q),
            JointKind::Prismatic => SpatialTransform::translation(Vec3::new(0.0, 0.0, q)),
            JointKind::Helical(p) => SpatialTransform::new(
                SpatialTransform::rot_z(-q).rot,
                Vec3::new(0.0, 0.0, q * *p),
            ),
        }
    }
}
