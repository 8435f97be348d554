//! # Set and Query Utilities
//!
//! Spatial queries over nodes and element-set duplication.

use glam::DVec3;
use tracing::debug;

use crate::error::MeshResult;
use crate::mesh::Mesh;
use crate::node::{AxisOrder, ElementId, NodeId};

/// Optional node and element set names that builders file their output
/// under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetNames<'a> {
    pub node_set: Option<&'a str>,
    pub element_set: Option<&'a str>,
}

impl<'a> SetNames<'a> {
    /// No sets.
    pub const NONE: SetNames<'static> = SetNames {
        node_set: None,
        element_set: None,
    };

    /// Both set names given.
    pub fn new(node_set: &'a str, element_set: &'a str) -> Self {
        Self {
            node_set: Some(node_set),
            element_set: Some(element_set),
        }
    }
}

impl Mesh {
    fn node_scope(&self, node_set: Option<&str>) -> MeshResult<Vec<NodeId>> {
        match node_set {
            Some(name) => Ok(self.node_set(name)?.to_vec()),
            None => Ok(self.nodes().map(|n| n.label()).collect()),
        }
    }

    /// Axis-aligned bounding box of all nodes, or of a node set.
    ///
    /// Returns `(min, max)`; an empty scope yields `(ZERO, ZERO)`.
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use hexmesh::Mesh;
    ///
    /// let mut mesh = Mesh::new();
    /// mesh.create_node(DVec3::new(-1.0, 0.0, 2.0), None, None).unwrap();
    /// mesh.create_node(DVec3::new(3.0, 1.0, 0.0), None, None).unwrap();
    /// let (min, max) = mesh.bounding_box(None).unwrap();
    /// assert_eq!(min, DVec3::new(-1.0, 0.0, 0.0));
    /// assert_eq!(max, DVec3::new(3.0, 1.0, 2.0));
    /// ```
    pub fn bounding_box(&self, node_set: Option<&str>) -> MeshResult<(DVec3, DVec3)> {
        let ids = self.node_scope(node_set)?;
        let mut points = ids.iter().map(|&id| self.position(id));
        let first = match points.next() {
            Some(p) => p?,
            None => return Ok((DVec3::ZERO, DVec3::ZERO)),
        };
        points.try_fold((first, first), |(min, max), p| {
            let p = p?;
            Ok((min.min(p), max.max(p)))
        })
    }

    /// Nodes whose coordinates lie inside `[min, max]` on every axis
    /// (bounds inclusive), optionally restricted to a node set.
    ///
    /// Set order is preserved, duplicates included.
    pub fn nodes_in_box(
        &self,
        min: DVec3,
        max: DVec3,
        node_set: Option<&str>,
    ) -> MeshResult<Vec<NodeId>> {
        let mut found = Vec::new();
        for id in self.node_scope(node_set)? {
            let p = self.position(id)?;
            if p.cmpge(min).all() && p.cmple(max).all() {
                found.push(id);
            }
        }
        Ok(found)
    }

    /// Clones every element of `old_set` into `new_set` with permuted
    /// coordinates.
    ///
    /// Each copied element gets fresh nodes (added to `node_set` when given)
    /// and keeps its type; the corner sort re-winds elements that the
    /// permutation mirrored.
    pub fn copy_element_set(
        &mut self,
        old_set: &str,
        new_set: &str,
        node_set: Option<&str>,
        axis_order: AxisOrder,
    ) -> MeshResult<Vec<ElementId>> {
        let members = self.element_set(old_set)?.to_vec();
        let mut created = Vec::with_capacity(members.len());
        for id in members {
            let element = self.element(id)?;
            let element_type = element.element_type();
            let sources = element.nodes().to_vec();
            let mut fresh = Vec::with_capacity(sources.len());
            for source in sources {
                let p = axis_order.apply(self.position(source)?);
                fresh.push(self.create_node(p, node_set, None)?);
            }
            created.push(self.create_element(&fresh, element_type, Some(new_set), None)?);
        }
        debug!(
            "Copied {} elements from '{}' to '{}' ({:?})",
            created.len(),
            old_set,
            new_set,
            axis_order
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::error::MeshError;

    fn unit_hex(mesh: &mut Mesh, set: &str) -> ElementId {
        let mut ids = Vec::new();
        for z in 0..2 {
            for y in 0..2 {
                for x in 0..2 {
                    let p = DVec3::new(x as f64, 2.0 * y as f64, 3.0 * z as f64);
                    ids.push(mesh.create_node(p, Some("src"), None).unwrap());
                }
            }
        }
        mesh.create_element(&ids, ElementType::C3D8R, Some(set), None).unwrap()
    }

    #[test]
    fn test_bounding_box_of_set() {
        let mut mesh = Mesh::new();
        mesh.create_node(DVec3::splat(10.0), None, None).unwrap();
        mesh.create_node(DVec3::new(1.0, 2.0, 3.0), Some("a"), None).unwrap();
        mesh.create_node(DVec3::new(-1.0, 5.0, 0.0), Some("a"), None).unwrap();
        let (min, max) = mesh.bounding_box(Some("a")).unwrap();
        assert_eq!(min, DVec3::new(-1.0, 2.0, 0.0));
        assert_eq!(max, DVec3::new(1.0, 5.0, 3.0));
        assert!(matches!(mesh.bounding_box(Some("b")), Err(MeshError::UnknownSet(_))));
    }

    #[test]
    fn test_bounding_box_empty() {
        let mesh = Mesh::new();
        assert_eq!(mesh.bounding_box(None).unwrap(), (DVec3::ZERO, DVec3::ZERO));
    }

    #[test]
    fn test_nodes_in_box_inclusive() {
        let mut mesh = Mesh::new();
        let a = mesh.create_node(DVec3::new(0.0, 0.0, 0.0), None, None).unwrap();
        let b = mesh.create_node(DVec3::new(1.0, 1.0, 1.0), None, None).unwrap();
        mesh.create_node(DVec3::new(1.0, 1.0, 1.5), None, None).unwrap();
        let found = mesh.nodes_in_box(DVec3::ZERO, DVec3::ONE, None).unwrap();
        assert_eq!(found, vec![a, b]);
    }

    #[test]
    fn test_copy_element_set_permutes_coordinates() {
        let mut mesh = Mesh::new();
        unit_hex(&mut mesh, "orig");
        let copies = mesh
            .copy_element_set("orig", "copy", Some("copied"), AxisOrder::Zyx)
            .unwrap();
        assert_eq!(copies.len(), 1);
        assert_eq!(mesh.node_count(), 16);
        let (min, max) = mesh.bounding_box(Some("copied")).unwrap();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::new(3.0, 2.0, 1.0));
        let copy = mesh.element(copies[0]).unwrap();
        assert_eq!(copy.element_type(), ElementType::C3D8R);
        assert_eq!(mesh.element_set("copy").unwrap(), copies.as_slice());
    }

    #[test]
    fn test_copy_unknown_set() {
        let mut mesh = Mesh::new();
        assert!(mesh
            .copy_element_set("missing", "copy", None, AxisOrder::Xyz)
            .is_err());
    }
}
