//! Integration tests for the armature manipulator engine.

use approx::assert_relative_eq;
use armature::{
    jacobian, pose, rne, solve_ik, static_torques, Configuration, DVec, DhRow, Gravity, IkConfig,
    JointKind, KinematicTree, LinkId, ModelError, SpatialInertia, SpatialTransform, TreeBuilder,
    Vec3, GRAVITY,
};
use std::f64::consts::{FRAC_PI_2, PI};

fn seg(len: f64) -> SpatialTransform {
    SpatialTransform::translation(Vec3::new(len, 0.0, 0.0))
}

/// Planar test arm: two revolute joints about Z, both segments length 2,
/// operating in the X-Y plane. Point masses at the segment tips.
fn planar_2r(m1: f64, m2: f64) -> KinematicTree {
    let mut b = TreeBuilder::new();
    b.add_link(
        "upper",
        JointKind::Revolute,
        seg(2.0),
        SpatialInertia::point_mass(m1, Vec3::zeros()),
        None,
    )
    .unwrap();
    b.add_link(
        "fore",
        JointKind::Revolute,
        seg(2.0),
        SpatialInertia::point_mass(m2, Vec3::zeros()),
        Some("upper"),
    )
    .unwrap();
    b.build().unwrap()
}

// ── Forward kinematics ──────────────────────────────────────────────────

#[test]
fn planar_arm_reference_positions() {
    let tree = planar_2r(0.0, 0.0);
    let ee = tree.link_by_name("fore").unwrap();

    let cases = [
        (vec![0.0, 0.0], Vec3::new(4.0, 0.0, 0.0)),
        (vec![FRAC_PI_2, 0.0], Vec3::new(0.0, 4.0, 0.0)),
        (vec![0.0, FRAC_PI_2], Vec3::new(2.0, 2.0, 0.0)),
    ];
    for (q, expected) in cases {
        let x = pose(&tree, ee, &DVec::from_vec(q)).unwrap();
        assert_relative_eq!(x.pos, expected, epsilon = 1e-12);
    }
}

#[test]
fn fk_does_not_couple_between_calls() {
    let tree = planar_2r(1.0, 1.0);
    let ee = tree.link_by_name("fore").unwrap();
    let qa = DVec::from_vec(vec![0.2, 0.4]);
    let qb = DVec::from_vec(vec![-1.0, 2.2]);

    let a1 = pose(&tree, ee, &qa).unwrap();
    let _b = pose(&tree, ee, &qb).unwrap();
    let a2 = pose(&tree, ee, &qa).unwrap();
    assert_relative_eq!(a1.pos, a2.pos, epsilon = 1e-15);
    assert_relative_eq!(a1.rot, a2.rot, epsilon = 1e-15);
}

#[test]
fn base_anchor_stays_fixed_under_rotation() {
    // A link rotating about its own axis keeps its origin pinned at the
    // anchor; with zero offsets the zero-configuration pose is identity.
    let mut b = TreeBuilder::new();
    b.add_link(
        "spinner",
        JointKind::Revolute,
        SpatialTransform::identity(),
        SpatialInertia::zero(),
        None,
    )
    .unwrap();
    let tree = b.build().unwrap();

    let x0 = pose(&tree, LinkId(0), &DVec::zeros(1)).unwrap();
    assert_relative_eq!(x0.to_homogeneous(), armature::Mat4::identity(), epsilon = 1e-12);

    for q in [-2.0, 0.5, 3.0] {
        let x = pose(&tree, LinkId(0), &DVec::from_vec(vec![q])).unwrap();
        assert_relative_eq!(x.pos, Vec3::zeros(), epsilon = 1e-12);
    }
}

#[test]
fn dh_table_matches_hand_built_chain() {
    // Planar 2R via DH: the inter-joint offset a = 2 sits in the second
    // row; frames land on the joints, so the second link frame is the
    // elbow, one segment out.
    let rows = [DhRow::revolute(0.0, 0.0, 0.0), DhRow::revolute(0.0, 0.0, 2.0)];
    let tree = KinematicTree::from_dh(&rows).unwrap();
    let elbow = tree.link_by_name("link2").unwrap();

    let x = pose(&tree, elbow, &DVec::from_vec(vec![FRAC_PI_2, 0.0])).unwrap();
    assert_relative_eq!(x.pos, Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-12);

    let x = pose(&tree, elbow, &DVec::from_vec(vec![0.0, 0.0])).unwrap();
    assert_relative_eq!(x.pos, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-12);
}

// ── Jacobian ────────────────────────────────────────────────────────────

#[test]
fn jacobian_matches_finite_differences_everywhere() {
    let tree = planar_2r(0.0, 0.0);
    let ee = tree.link_by_name("fore").unwrap();
    let h = 1e-7;

    for q in [
        vec![0.0, 0.0],
        vec![FRAC_PI_2, 0.0],
        vec![0.0, FRAC_PI_2],
        vec![0.8, -1.3],
    ] {
        let q0 = DVec::from_vec(q);
        let j = jacobian(&tree, ee, &q0).unwrap();
        let x0 = pose(&tree, ee, &q0).unwrap();

        for i in 0..2 {
            let mut qp = q0.clone();
            qp[i] += h;
            let mut qm = q0.clone();
            qm[i] -= h;
            let dp = (pose(&tree, ee, &qp).unwrap().pos - pose(&tree, ee, &qm).unwrap().pos)
                / (2.0 * h);
            let v_body = x0.rot * dp;
            for (row, axis) in (3..6).zip(0..3) {
                assert_relative_eq!(j[(row, i)], v_body[axis], epsilon = 1e-5);
            }
        }
    }
}

// ── Inverse kinematics ──────────────────────────────────────────────────

#[test]
fn ik_fk_roundtrip_away_from_singularities() {
    let tree = planar_2r(0.0, 0.0);
    let ee = tree.link_by_name("fore").unwrap();

    for q_true in [vec![0.5, 0.8], vec![-0.4, 1.2], vec![1.1, -0.9]] {
        let q_true = DVec::from_vec(q_true);
        let target = pose(&tree, ee, &q_true).unwrap();

        let q0 = &q_true * 0.7; // warm start in the same basin
        let q = solve_ik(&tree, ee, &target, &q0, &IkConfig::default()).unwrap();
        assert_relative_eq!(q, q_true, epsilon = 1e-6);
    }
}

// ── Inverse dynamics ────────────────────────────────────────────────────

#[test]
fn static_torques_match_planar_statics() {
    // Closed-form statics for the 2R arm with tip masses, gravity -Y:
    //   tau2 = g m2 L2 cos(q1+q2)
    //   tau1 = g [m1 L1 cos q1 + m2 (L1 cos q1 + L2 cos(q1+q2))]
    let (m1, m2, l1, l2) = (1.5, 0.8, 2.0, 2.0);
    let tree = planar_2r(m1, m2);
    let gravity = Gravity(Vec3::new(0.0, -GRAVITY, 0.0));

    for q in [vec![0.0, 0.0], vec![0.4, 0.3], vec![-0.7, 1.1], vec![FRAC_PI_2, 0.0]] {
        let (q1, q2) = (q[0], q[1]);
        let tau = static_torques(&tree, &DVec::from_vec(q), &gravity).unwrap();

        let expected2 = GRAVITY * m2 * l2 * (q1 + q2).cos();
        let expected1 =
            GRAVITY * (m1 * l1 * q1.cos() + m2 * (l1 * q1.cos() + l2 * (q1 + q2).cos()));
        assert_relative_eq!(tau[1], expected2, epsilon = 1e-9);
        assert_relative_eq!(tau[0], expected1, epsilon = 1e-9);
    }
}

#[test]
fn hanging_arm_is_torque_free() {
    // Arm pointing straight down (-Y), gravity -Y: no moment anywhere.
    let tree = planar_2r(1.0, 1.0);
    let gravity = Gravity(Vec3::new(0.0, -GRAVITY, 0.0));
    let tau = static_torques(&tree, &DVec::from_vec(vec![-FRAC_PI_2, 0.0]), &gravity).unwrap();
    assert_relative_eq!(tau[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(tau[1], 0.0, epsilon = 1e-9);
}

#[test]
fn rne_rejects_mismatched_configuration_sizes() {
    let tree = planar_2r(1.0, 1.0);
    let cfg = Configuration::zeros(3);
    assert!(matches!(
        rne(&tree, &cfg, &Gravity::default()),
        Err(ModelError::ConfigurationSizeMismatch { expected: 2, got: 3 })
    ));
}

// ── Topology and error taxonomy ─────────────────────────────────────────

#[test]
fn unknown_parent_fails_fast() {
    let mut b = TreeBuilder::new();
    let err = b
        .add_link(
            "hand",
            JointKind::Revolute,
            seg(1.0),
            SpatialInertia::zero(),
            Some("forearm"),
        )
        .unwrap_err();
    assert!(matches!(err, ModelError::UnknownParent(name) if name == "forearm"));
}

#[test]
fn duplicate_names_fail_fast() {
    let mut b = TreeBuilder::new();
    b.add_link("a", JointKind::Revolute, seg(1.0), SpatialInertia::zero(), None)
        .unwrap();
    assert!(matches!(
        b.add_link("a", JointKind::Revolute, seg(1.0), SpatialInertia::zero(), None),
        Err(ModelError::DuplicateName(_))
    ));
}

#[test]
fn traversals_visit_parents_before_children() {
    let mut b = TreeBuilder::new();
    b.add_link("torso", JointKind::Revolute, seg(1.0), SpatialInertia::zero(), None)
        .unwrap();
    b.add_link("arm_l", JointKind::Revolute, seg(1.0), SpatialInertia::zero(), Some("torso"))
        .unwrap();
    b.add_link("arm_r", JointKind::Revolute, seg(1.0), SpatialInertia::zero(), Some("torso"))
        .unwrap();
    b.add_link("hand_l", JointKind::Revolute, seg(1.0), SpatialInertia::zero(), Some("arm_l"))
        .unwrap();
    let tree = b.build().unwrap();

    let mut visited = vec![false; tree.dof()];
    for id in tree.pre_order() {
        if let Some(p) = tree.link(id).parent {
            assert!(visited[p]);
        }
        visited[id.0] = true;
    }
}

// ── Manipulator façade ──────────────────────────────────────────────────

#[test]
fn manipulator_exposes_ordered_names_and_homogeneous_poses() {
    let arm = armature::Manipulator::new(planar_2r(1.0, 1.0));
    assert_eq!(arm.link_names(), vec!["upper", "fore"]);

    let q = DVec::from_vec(vec![0.0, FRAC_PI_2]);
    let h = arm.link_pose("fore", &q).unwrap();
    assert_relative_eq!(h[(0, 3)], 2.0, epsilon = 1e-12);
    assert_relative_eq!(h[(1, 3)], 2.0, epsilon = 1e-12);

    let all = arm.link_poses(&q).unwrap();
    assert_eq!(all.len(), 2);
    assert_relative_eq!(all[1], h, epsilon = 1e-12);
}

#[test]
fn manipulator_ik_and_dynamics_pass_through() {
    let arm = armature::Manipulator::new(planar_2r(1.0, 1.0))
        .with_gravity(Gravity(Vec3::new(0.0, -GRAVITY, 0.0)));

    let q_true = DVec::from_vec(vec![0.3, 0.9]);
    let target = pose(arm.tree(), arm.tree().link_by_name("fore").unwrap(), &q_true).unwrap();
    let q = arm
        .solve_ik("fore", &target, &DVec::from_vec(vec![0.1, 0.5]), &IkConfig::default())
        .unwrap();
    assert_relative_eq!(q, q_true, epsilon = 1e-6);

    let tau = arm.holding_torques(&q_true).unwrap();
    assert_eq!(tau.len(), 2);
}

#[test]
fn helical_joint_advances_like_a_screw() {
    let pitch = 0.5;
    let mut b = TreeBuilder::new();
    b.add_link(
        "screw",
        JointKind::Helical(pitch),
        SpatialTransform::identity(),
        SpatialInertia::zero(),
        None,
    )
    .unwrap();
    let tree = b.build().unwrap();

    let q = PI;
    let x = pose(&tree, LinkId(0), &DVec::from_vec(vec![q])).unwrap();
    // Half a turn, advanced by q * pitch along Z.
    assert_relative_eq!(x.pos, Vec3::new(0.0, 0.0, q * pitch), epsilon = 1e-12);
    let h = x.to_homogeneous();
    assert_relative_eq!(h[(0, 0)], -1.0, epsilon = 1e-12);
    assert_relative_eq!(h[(1, 1)], -1.0, epsilon = 1e-12);
}
