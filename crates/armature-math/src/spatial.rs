//! 6D spatial algebra following Featherstone's "Rigid Body Dynamics Algorithms".
//!
//! Convention: spatial vectors are [angular; linear] (Featherstone order).
//! A spatial motion vector (twist): [ω; v]
//! A spatial force vector (wrench): [τ; f]
//!
//! Motion and force vectors live in dual spaces. They share the `SpatialVec`
//! storage but are never mixed implicitly: motion vectors travel through
//! `apply_motion`/`cross_motion`, force vectors through
//! `apply_force`/`cross_force`, and the two 6×6 transform matrices are
//! transpose-inverses of each other.

use crate::{Mat3, Mat4, Mat6, Vec3, Vec6, skew};

/// 6D spatial vector — either a motion vector (twist) or force vector (wrench).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialVec {
    /// The underlying 6D vector [angular(3); linear(3)].
    pub data: Vec6,
}

impl SpatialVec {
    /// Create from angular and linear parts.
    #[inline]
    pub fn new(angular: Vec3, linear: Vec3) -> Self {
        Self {
            data: Vec6::new(
                angular.x, angular.y, angular.z, linear.x, linear.y, linear.z,
            ),
        }
    }

    /// Zero spatial vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            data: Vec6::zeros(),
        }
    }

    /// Angular (top 3) component.
    #[inline]
    pub fn angular(&self) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Linear (bottom 3) component.
    #[inline]
    pub fn linear(&self) -> Vec3 {
        Vec3::new(self.data[3], self.data[4], self.data[5])
    }

    /// Spatial cross product for motion vectors: v ×ₘ w.
    ///
    /// Antisymmetric: `a.cross_motion(b) == -(b.cross_motion(a))`. This and
    /// its force dual are the sole source of Coriolis/centrifugal terms in
    /// the inverse dynamics recursion.
    pub fn cross_motion(&self, other: &SpatialVec) -> SpatialVec {
        let w = self.angular();
        let v = self.linear();
        let w2 = other.angular();
        let v2 = other.linear();
        SpatialVec::new(w.cross(&w2), w.cross(&v2) + v.cross(&w2))
    }

    /// Spatial cross product for force vectors: v ×* f, the dual of
    /// `cross_motion` acting on wrenches.
    pub fn cross_force(&self, other: &SpatialVec) -> SpatialVec {
        let w = self.angular();
        let v = self.linear();
        let t = other.angular();
        let f = other.linear();
        SpatialVec::new(w.cross(&t) + v.cross(&f), w.cross(&f))
    }

    /// Dot product. Pairing a twist with a wrench yields power; this is how
    /// joint torques are projected out of link forces.
    #[inline]
    pub fn dot(&self, other: &SpatialVec) -> f64 {
        self.data.dot(&other.data)
    }
}

impl std::ops::Add for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn add(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            data: self.data + rhs.data,
        }
    }
}

impl std::ops::Sub for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn sub(self, rhs: SpatialVec) -> SpatialVec {
        SpatialVec {
            data: self.data - rhs.data,
        }
    }
}

impl std::ops::Mul<f64> for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn mul(self, rhs: f64) -> SpatialVec {
        SpatialVec {
            data: self.data * rhs,
        }
    }
}

impl std::ops::Neg for SpatialVec {
    type Output = SpatialVec;
    #[inline]
    fn neg(self) -> SpatialVec {
        SpatialVec { data: -self.data }
    }
}

/// 6×6 motion cross-product operator [v ×ₘ]:
///
/// ```text
/// | [ω]×   0   |
/// | [v]×  [ω]× |
/// ```
pub fn cross_motion_matrix(v: &SpatialVec) -> Mat6 {
    let wx = skew(&v.angular());
    let vx = skew(&v.linear());
    let mut m = Mat6::zeros();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&wx);
    m.fixed_view_mut::<3, 3>(3, 0).copy_from(&vx);
    m.fixed_view_mut::<3, 3>(3, 3).copy_from(&wx);
    m
}

/// 6×6 force cross-product operator [v ×*] = -[v ×ₘ]ᵀ:
///
/// ```text
/// | [ω]×  [v]× |
/// |  0    [ω]× |
/// ```
pub fn cross_force_matrix(v: &SpatialVec) -> Mat6 {
    let wx = skew(&v.angular());
    let vx = skew(&v.linear());
    let mut m = Mat6::zeros();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&wx);
    m.fixed_view_mut::<3, 3>(0, 3).copy_from(&vx);
    m.fixed_view_mut::<3, 3>(3, 3).copy_from(&wx);
    m
}

/// 6x6 spatial matrix (inertia, transforms acting on spatial vectors).
#[derive(Debug, Clone, Copy)]
pub struct SpatialMat {
    pub data: Mat6,
}

impl SpatialMat {
    /// Create from a 6x6 nalgebra matrix.
    #[inline]
    pub fn from_mat6(data: Mat6) -> Self {
        Self { data }
    }

    /// Identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self {
            data: Mat6::identity(),
        }
    }

    /// Multiply by a spatial vector.
    #[inline]
    pub fn mul_vec(&self, v: &SpatialVec) -> SpatialVec {
        SpatialVec {
            data: self.data * v.data,
        }
    }

    /// Matrix-matrix multiply.
    #[inline]
    pub fn mul_mat(&self, other: &SpatialMat) -> SpatialMat {
        SpatialMat {
            data: self.data * other.data,
        }
    }

    /// Transpose.
    #[inline]
    pub fn transpose(&self) -> SpatialMat {
        SpatialMat {
            data: self.data.transpose(),
        }
    }
}

/// Plücker transform: rigid coordinate transform acting on spatial vectors.
///
/// Represents the transform from frame A to frame B, stored compactly as the
/// rotation `rot` (A axes → B axes) and `pos` (origin of B expressed in A).
/// The 6×6 motion and force matrix forms are derived on demand; the
/// homogeneous 4×4 *pose* of B in A is a separate, explicit view
/// ([`SpatialTransform::to_homogeneous`]).
#[derive(Debug, Clone, Copy)]
pub struct SpatialTransform {
    /// Rotation from frame A to frame B.
    pub rot: Mat3,
    /// Position of frame B's origin expressed in frame A.
    pub pos: Vec3,
}

impl SpatialTransform {
    /// Create from rotation matrix and translation.
    pub fn new(rot: Mat3, pos: Vec3) -> Self {
        Self { rot, pos }
    }

    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            rot: Mat3::identity(),
            pos: Vec3::zeros(),
        }
    }

    /// Pure rotation about the X axis.
    pub fn rot_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rot: Mat3::new(1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c),
            pos: Vec3::zeros(),
        }
    }

    /// Pure rotation about the Y axis.
    pub fn rot_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rot: Mat3::new(c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c),
            pos: Vec3::zeros(),
        }
    }

    /// Pure rotation about the Z axis.
    pub fn rot_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self {
            rot: Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0),
            pos: Vec3::zeros(),
        }
    }

    /// Pure translation.
    pub fn translation(pos: Vec3) -> Self {
        Self {
            rot: Mat3::identity(),
            pos,
        }
    }

    /// 6x6 Plücker matrix acting on motion vectors.
    ///
    /// X = | R       0 |
    ///     | -R[p]×  R |
    pub fn to_motion_matrix(&self) -> Mat6 {
        let r = self.rot;
        let neg_rpx = -r * skew(&self.pos);

        let mut m = Mat6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        m.fixed_view_mut::<3, 3>(3, 0).copy_from(&neg_rpx);
        m.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        m
    }

    /// 6x6 Plücker matrix acting on force vectors: the transpose-inverse of
    /// the motion form.
    ///
    /// X* = | R  -R[p]× |
    ///      | 0     R   |
    pub fn to_force_matrix(&self) -> Mat6 {
        let r = self.rot;
        let neg_rpx = -r * skew(&self.pos);

        let mut m = Mat6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        m.fixed_view_mut::<3, 3>(0, 3).copy_from(&neg_rpx);
        m.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        m
    }

    /// Transform a spatial motion vector from frame A to frame B.
    pub fn apply_motion(&self, v: &SpatialVec) -> SpatialVec {
        let w = v.angular();
        let vel = v.linear();
        SpatialVec::new(self.rot * w, self.rot * (vel - self.pos.cross(&w)))
    }

    /// Transform a spatial force vector from frame A to frame B.
    pub fn apply_force(&self, f: &SpatialVec) -> SpatialVec {
        let tau = f.angular();
        let force = f.linear();
        SpatialVec::new(
            self.rot * (tau - self.pos.cross(&force)),
            self.rot * force,
        )
    }

    /// Inverse transform a spatial motion vector (from B back to A).
    pub fn inv_apply_motion(&self, v: &SpatialVec) -> SpatialVec {
        let rt = self.rot.transpose();
        let w = rt * v.angular();
        SpatialVec::new(w, rt * v.linear() + self.pos.cross(&w))
    }

    /// Inverse transform a spatial force vector (from B back to A).
    pub fn inv_apply_force(&self, f: &SpatialVec) -> SpatialVec {
        let rt = self.rot.transpose();
        let force = rt * f.linear();
        SpatialVec::new(rt * f.angular() + self.pos.cross(&force), force)
    }

    /// Compose two transforms: `self ∘ other` (apply `other` first).
    ///
    /// Chained root→leaf, the transform for link i is
    /// `x_tree_i.compose(&x_chain_parent)`: the parent's chain runs first,
    /// then this link's own step. Equivalently, the homogeneous poses
    /// multiply in the opposite (root→child, left-to-right) order; see
    /// `to_homogeneous`.
    pub fn compose(&self, other: &SpatialTransform) -> SpatialTransform {
        SpatialTransform {
            rot: self.rot * other.rot,
            pos: other.pos + other.rot.transpose() * self.pos,
        }
    }

    /// Inverse of this transform.
    pub fn inverse(&self) -> SpatialTransform {
        SpatialTransform {
            rot: self.rot.transpose(),
            pos: -(self.rot * self.pos),
        }
    }

    /// Homogeneous 4×4 pose of frame B in frame A:
    ///
    /// H = | Rᵀ  p |
    ///     | 0   1 |
    ///
    /// Poses compose left-to-right along the chain:
    /// `(x1.compose(&x2)).to_homogeneous() == x2.to_homogeneous() * x1.to_homogeneous()`.
    pub fn to_homogeneous(&self) -> Mat4 {
        let mut h = Mat4::identity();
        h.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&self.rot.transpose());
        h.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.pos);
        h
    }

    /// Build from a homogeneous 4×4 pose matrix. Inverse of `to_homogeneous`.
    pub fn from_homogeneous(h: &Mat4) -> Self {
        let r = h.fixed_view::<3, 3>(0, 0).into_owned();
        let p = h.fixed_view::<3, 1>(0, 3).into_owned();
        Self {
            rot: r.transpose(),
            pos: p,
        }
    }
}

/// Spatial inertia of a rigid body about its own frame origin.
///
/// Stored as mass, center of mass offset, and rotational inertia about the
/// center of mass; expanded to the 6×6 symmetric PSD matrix on demand.
#[derive(Debug, Clone, Copy)]
pub struct SpatialInertia {
    /// Mass of the body.
    pub mass: f64,
    /// Center of mass position in body frame.
    pub com: Vec3,
    /// Rotational inertia about the center of mass (3x3 symmetric).
    pub inertia: Mat3,
}

impl SpatialInertia {
    /// Create a spatial inertia with the given mass, CoM offset, and inertia matrix.
    pub fn new(mass: f64, com: Vec3, inertia: Mat3) -> Self {
        Self { mass, com, inertia }
    }

    /// Massless placeholder (pure kinematic links).
    pub fn zero() -> Self {
        Self {
            mass: 0.0,
            com: Vec3::zeros(),
            inertia: Mat3::zeros(),
        }
    }

    /// Point mass at a given position in the body frame.
    pub fn point_mass(mass: f64, pos: Vec3) -> Self {
        Self {
            mass,
            com: pos,
            inertia: Mat3::zeros(),
        }
    }

    /// Uniform rod of given mass and length along the body X axis, with one
    /// end at the frame origin.
    pub fn rod_x(mass: f64, length: f64) -> Self {
        let i = mass * length * length / 12.0;
        Self {
            mass,
            com: Vec3::new(length / 2.0, 0.0, 0.0),
            inertia: Mat3::new(0.0, 0.0, 0.0, 0.0, i, 0.0, 0.0, 0.0, i),
        }
    }

    /// Expand to the 6x6 spatial inertia matrix about the body frame origin.
    ///
    /// I_spatial = | I_com + m[c]×[c]×ᵀ   m[c]× |
    ///             | m[c]×ᵀ                mE   |
    pub fn to_matrix(&self) -> SpatialMat {
        let cx = skew(&self.com);
        let m = self.mass;

        let mut mat = Mat6::zeros();
        let top_left = self.inertia + cx * cx.transpose() * m;
        mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&top_left);
        let mcx = cx * m;
        mat.fixed_view_mut::<3, 3>(0, 3).copy_from(&mcx);
        mat.fixed_view_mut::<3, 3>(3, 0).copy_from(&mcx.transpose());
        mat.fixed_view_mut::<3, 3>(3, 3)
            .copy_from(&(Mat3::identity() * m));

        SpatialMat::from_mat6(mat)
    }
}
