//! Kinematic tree: an arena of links plus name lookup.

use std::collections::HashMap;

use armature_math::{DVec, SpatialInertia, SpatialTransform, SpatialVec};
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::joint::JointKind;
use crate::link::{Link, LinkId};

/// Immutable manipulator topology.
///
/// Links are stored in a flat array in topological (parent-before-child)
/// order; this is enforced at construction, and the forward/backward
/// recursions in the kinematics and dynamics crates rely on it. Link index
/// doubles as the joint's slot in the configuration vector.
#[derive(Debug, Clone)]
pub struct KinematicTree {
    links: Vec<Link>,
    names: HashMap<String, usize>,
    base: SpatialTransform,
}

impl KinematicTree {
    /// Build a tree from a Denavit-Hartenberg table; see [`crate::dh`].
    pub fn from_dh(rows: &[crate::dh::DhRow]) -> Result<Self> {
        crate::dh::tree_from_dh(rows)
    }

    /// Number of links (equals the number of joints and the configuration
    /// dimension; every link carries exactly one single-DOF joint).
    pub fn dof(&self) -> usize {
        self.links.len()
    }

    /// All links in topological order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Link by id.
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// Fixed transform from the world frame to the base frame the root
    /// joints hang from. Identity unless set by the builder or a DH table.
    pub fn base(&self) -> &SpatialTransform {
        &self.base
    }

    /// O(1) name lookup.
    pub fn link_by_name(&self, name: &str) -> Result<LinkId> {
        self.names
            .get(name)
            .copied()
            .map(LinkId)
            .ok_or_else(|| ModelError::NameNotFound(name.to_owned()))
    }

    /// Check a configuration vector against this tree's dimension.
    pub fn check_configuration(&self, q: &DVec) -> Result<()> {
        if q.len() != self.dof() {
            return Err(ModelError::ConfigurationSizeMismatch {
                expected: self.dof(),
                got: q.len(),
            });
        }
        Ok(())
    }

    /// Pre-order walk: yields every link strictly after its parent.
    ///
    /// Because link indices are topological, this is a forward index scan;
    /// it is the traversal order for velocity/acceleration propagation.
    pub fn pre_order(&self) -> impl Iterator<Item = LinkId> + '_ {
        (0..self.links.len()).map(LinkId)
    }

    /// Post-order walk: yields every link strictly before its parent.
    ///
    /// The traversal order for force accumulation.
    pub fn post_order(&self) -> impl Iterator<Item = LinkId> + '_ {
        (0..self.links.len()).rev().map(LinkId)
    }

    /// Plücker transform from the parent link frame (the world frame for a
    /// root link, including the base offset) to this link's frame, for
    /// joint position `q`.
    ///
    /// The joint transform acts first, then the link's fixed `local` offset.
    pub fn parent_to_link(&self, id: LinkId, q: f64) -> SpatialTransform {
        let link = &self.links[id.0];
        let step = link.local.compose(&link.joint.transform(q));
        match link.parent {
            Some(_) => step,
            None => step.compose(&self.base),
        }
    }

    /// Joint motion subspace expressed in the link frame.
    ///
    /// The joint acts on the parent side of the link's fixed offset, so its
    /// subspace must be carried through `local` before it can meet the
    /// link-frame velocity, acceleration, and force vectors.
    pub fn link_subspace(&self, id: LinkId) -> SpatialVec {
        let link = &self.links[id.0];
        link.local.apply_motion(&link.joint.motion_subspace())
    }
}

/// Fail-fast tree construction. An invalid topology is never observable:
/// `build` either returns a verified tree or an error.
#[derive(Debug)]
pub struct TreeBuilder {
    links: Vec<Link>,
    names: HashMap<String, usize>,
    base: SpatialTransform,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            links: Vec::new(),
            names: HashMap::new(),
            base: SpatialTransform::identity(),
        }
    }

    /// Set the fixed world→base offset applied before every root joint.
    pub fn base(mut self, base: SpatialTransform) -> Self {
        self.base = base;
        self
    }

    /// Attach a link. With `parent: None` the link hangs from the fixed
    /// base; otherwise the parent must already be registered, which keeps
    /// insertion order topological by construction.
    pub fn add_link(
        &mut self,
        name: &str,
        joint: JointKind,
        local: SpatialTransform,
        inertia: SpatialInertia,
        parent: Option<&str>,
    ) -> Result<LinkId> {
        if self.names.contains_key(name) {
            return Err(ModelError::DuplicateName(name.to_owned()));
        }
        let parent_idx = match parent {
            Some(p) => Some(
                *self
                    .names
                    .get(p)
                    .ok_or_else(|| ModelError::UnknownParent(p.to_owned()))?,
            ),
            None => None,
        };

        let idx = self.links.len();
        self.links.push(Link {
            name: name.to_owned(),
            joint,
            local,
            inertia,
            parent: parent_idx,
            children: Vec::new(),
        });
        if let Some(p) = parent_idx {
            self.links[p].children.push(idx);
        }
        self.names.insert(name.to_owned(), idx);
        debug!(link = name, index = idx, parent = ?parent, "added link");
        Ok(LinkId(idx))
    }

    /// Finalize. Verifies the topological ordering invariant the recursive
    /// algorithms depend on; a tree violating it would compute silently
    /// wrong dynamics, so construction is the place that refuses it.
    pub fn build(self) -> Result<KinematicTree> {
        for (i, link) in self.links.iter().enumerate() {
            if let Some(p) = link.parent {
                if p >= i {
                    return Err(ModelError::CorruptTopology(i));
                }
                if !self.links[p].children.contains(&i) {
                    return Err(ModelError::CorruptTopology(i));
                }
            }
            for &c in &link.children {
                if c <= i || c >= self.links.len() {
                    return Err(ModelError::CorruptTopology(i));
                }
            }
        }
        debug!(links = self.links.len(), "kinematic tree built");
        Ok(KinematicTree {
            links: self.links,
            names: self.names,
            base: self.base,
        })
    }
}
