//! # Mesh Registry
//!
//! Owns every node, element and named set of one mesh and hands out labels.
//! All builders take `&mut Mesh`; there is no global mesh state.

use std::collections::BTreeMap;

use config::constants::{MeshConfig, FIRST_LABEL};
use glam::DVec3;

use crate::element::{corner_order, Element, ElementType};
use crate::error::{MeshError, MeshResult};
use crate::grid::NodeGrid;
use crate::node::{ElementId, Node, NodeId};

/// Anything that flattens into an ordered list of node labels.
///
/// Implemented for single labels, arrays, slices, vectors and grids, and
/// nests freely, so `[[a, b, c, d], [e, f, g, h]]` or
/// `[&plane as &dyn NodeGroup, &corner]` are both valid element inputs.
pub trait NodeGroup {
    /// Appends the labels in order.
    fn collect_into(&self, out: &mut Vec<NodeId>);

    /// Collects the labels into a new vector.
    fn flatten(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }
}

impl NodeGroup for NodeId {
    fn collect_into(&self, out: &mut Vec<NodeId>) {
        out.push(*self);
    }
}

impl<T: NodeGroup> NodeGroup for [T] {
    fn collect_into(&self, out: &mut Vec<NodeId>) {
        for item in self {
            item.collect_into(out);
        }
    }
}

impl<T: NodeGroup, const N: usize> NodeGroup for [T; N] {
    fn collect_into(&self, out: &mut Vec<NodeId>) {
        self.as_slice().collect_into(out);
    }
}

impl<T: NodeGroup> NodeGroup for Vec<T> {
    fn collect_into(&self, out: &mut Vec<NodeId>) {
        self.as_slice().collect_into(out);
    }
}

impl<T: NodeGroup + ?Sized> NodeGroup for &T {
    fn collect_into(&self, out: &mut Vec<NodeId>) {
        (**self).collect_into(out);
    }
}

impl NodeGroup for NodeGrid {
    fn collect_into(&self, out: &mut Vec<NodeId>) {
        out.extend(self.iter().map(|(_, id)| id));
    }
}

/// A finite-element mesh under construction.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use hexmesh::{ElementType, Mesh};
///
/// let mut mesh = Mesh::new();
/// let a = mesh.create_node(DVec3::new(0.0, 0.0, 0.0), None, None).unwrap();
/// let b = mesh.create_node(DVec3::new(1.0, 0.0, 0.0), None, None).unwrap();
/// let c = mesh.create_node(DVec3::new(1.0, 1.0, 0.0), None, None).unwrap();
/// let d = mesh.create_node(DVec3::new(0.0, 1.0, 0.0), Some("corner"), None).unwrap();
/// mesh.create_element(&[a, b, c, d], ElementType::CAX4, Some("all"), None).unwrap();
/// assert_eq!(mesh.node_count(), 4);
/// assert_eq!(mesh.element_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    config: MeshConfig,
    nodes: BTreeMap<NodeId, Node>,
    elements: BTreeMap<ElementId, Element>,
    elements_by_type: BTreeMap<ElementType, Vec<ElementId>>,
    pub(crate) node_sets: BTreeMap<String, Vec<NodeId>>,
    pub(crate) element_sets: BTreeMap<String, Vec<ElementId>>,
    next_node: u32,
    next_element: u32,
}

/// Counter value that follows `label`.
fn label_after(label: u32) -> MeshResult<u32> {
    label.checked_add(1).ok_or(MeshError::LabelOverflow(label))
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh with default settings.
    pub fn new() -> Self {
        Self::with_config(MeshConfig::default())
    }

    /// Creates an empty mesh with the given settings.
    pub fn with_config(config: MeshConfig) -> Self {
        Self {
            config,
            nodes: BTreeMap::new(),
            elements: BTreeMap::new(),
            elements_by_type: BTreeMap::new(),
            node_sets: BTreeMap::new(),
            element_sets: BTreeMap::new(),
            next_node: FIRST_LABEL,
            next_element: FIRST_LABEL,
        }
    }

    /// Creates an empty mesh from raw settings, validated by
    /// [`MeshConfig::new`].
    ///
    /// ```rust
    /// use hexmesh::{Mesh, MeshError};
    ///
    /// let mesh = Mesh::with_settings(1.0e-9, 1.0, true).unwrap();
    /// assert!(mesh.config().strict_transition_sizing);
    /// assert!(matches!(Mesh::with_settings(0.0, 1.0, false), Err(MeshError::Config(_))));
    /// ```
    pub fn with_settings(
        tolerance: f64,
        blend_exponent: f64,
        strict_transition_sizing: bool,
    ) -> MeshResult<Self> {
        let config = MeshConfig::new(tolerance, blend_exponent, strict_transition_sizing)?;
        Ok(Self::with_config(config))
    }

    /// Settings the mesh was created with.
    #[inline]
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    // =========================================================================
    // NODES
    // =========================================================================

    /// Creates a node, optionally appending it to `node_set`.
    ///
    /// Without `label` the next free label is used. An explicit label moves
    /// the counter past it; a label that is already taken is rejected.
    pub fn create_node(
        &mut self,
        position: DVec3,
        node_set: Option<&str>,
        label: Option<NodeId>,
    ) -> MeshResult<NodeId> {
        let id = match label {
            Some(id) => {
                if self.nodes.contains_key(&id) {
                    return Err(MeshError::DuplicateLabel(id.0));
                }
                self.next_node = self.next_node.max(label_after(id.0)?);
                id
            }
            None => {
                let id = NodeId(self.next_node);
                self.next_node = label_after(id.0)?;
                id
            }
        };
        self.nodes.insert(id, Node::new(id, position));
        if let Some(name) = node_set {
            self.node_sets.entry(name.to_string()).or_default().push(id);
        }
        Ok(id)
    }

    /// Looks up a node.
    pub fn node(&self, id: NodeId) -> MeshResult<&Node> {
        self.nodes.get(&id).ok_or(MeshError::UnknownNode(id))
    }

    /// Position of a node.
    #[inline]
    pub fn position(&self, id: NodeId) -> MeshResult<DVec3> {
        self.node(id).map(|n| n.position)
    }

    /// Overwrites the position of a node.
    pub fn set_position(&mut self, id: NodeId, position: DVec3) -> MeshResult<()> {
        let node = self.nodes.get_mut(&id).ok_or(MeshError::UnknownNode(id))?;
        node.position = position;
        Ok(())
    }

    /// Iterates nodes in label order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // =========================================================================
    // ELEMENTS
    // =========================================================================

    /// Creates an element from a flat or nested node group.
    ///
    /// The flattened nodes are split into corner planes and re-sorted so the
    /// element is consistently wound, whatever order the groups arrived in.
    /// Nothing is stored when the group does not fit `element_type`.
    pub fn create_element<G: NodeGroup + ?Sized>(
        &mut self,
        nodes: &G,
        element_type: ElementType,
        element_set: Option<&str>,
        label: Option<ElementId>,
    ) -> MeshResult<ElementId> {
        let flat = nodes.flatten();
        let points = flat
            .iter()
            .map(|&id| self.position(id))
            .collect::<MeshResult<Vec<_>>>()?;
        let order = corner_order(element_type, &points, self.config.tolerance)?;
        let sorted: Vec<NodeId> = order.into_iter().map(|i| flat[i]).collect();

        let id = match label {
            Some(id) => {
                if self.elements.contains_key(&id) {
                    return Err(MeshError::DuplicateLabel(id.0));
                }
                self.next_element = self.next_element.max(label_after(id.0)?);
                id
            }
            None => {
                let id = ElementId(self.next_element);
                self.next_element = label_after(id.0)?;
                id
            }
        };
        self.elements
            .insert(id, Element::new(id, element_type, sorted));
        self.elements_by_type.entry(element_type).or_default().push(id);
        if let Some(name) = element_set {
            self.element_sets
                .entry(name.to_string())
                .or_default()
                .push(id);
        }
        Ok(id)
    }

    /// Looks up an element.
    pub fn element(&self, id: ElementId) -> MeshResult<&Element> {
        self.elements.get(&id).ok_or(MeshError::UnknownElement(id))
    }

    /// Iterates elements in label order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Element labels grouped by type.
    pub fn elements_by_type(&self) -> &BTreeMap<ElementType, Vec<ElementId>> {
        &self.elements_by_type
    }

    /// Labels of all elements of `element_type`.
    pub fn elements_of_type(&self, element_type: ElementType) -> &[ElementId] {
        self.elements_by_type
            .get(&element_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of elements over all types.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Reassigns the type tag of an element without touching its nodes.
    ///
    /// The new type must take the same number of nodes.
    pub fn set_element_type(&mut self, id: ElementId, element_type: ElementType) -> MeshResult<()> {
        let element = self.elements.get_mut(&id).ok_or(MeshError::UnknownElement(id))?;
        let old = element.element_type;
        if old == element_type {
            return Ok(());
        }
        if old.node_count() != element_type.node_count() {
            return Err(MeshError::malformed(
                element_type,
                format!(
                    "cannot retype element {id} with {} nodes",
                    old.node_count()
                ),
            ));
        }
        element.element_type = element_type;
        if let Some(bucket) = self.elements_by_type.get_mut(&old) {
            bucket.retain(|&e| e != id);
            if bucket.is_empty() {
                self.elements_by_type.remove(&old);
            }
        }
        let bucket = self.elements_by_type.entry(element_type).or_default();
        let at = bucket.partition_point(|&e| e < id);
        bucket.insert(at, id);
        Ok(())
    }

    /// Reassigns the type tag of every element in a set.
    ///
    /// All elements are checked before any is changed.
    pub fn set_element_set_type(&mut self, set: &str, element_type: ElementType) -> MeshResult<()> {
        let members = self.element_set(set)?.to_vec();
        for &id in &members {
            let old = self.element(id)?.element_type;
            if old.node_count() != element_type.node_count() {
                return Err(MeshError::malformed(
                    element_type,
                    format!("set '{set}' holds {old} element {id}"),
                ));
            }
        }
        for id in members {
            self.set_element_type(id, element_type)?;
        }
        Ok(())
    }

    // =========================================================================
    // SETS
    // =========================================================================

    /// Members of a node set in insertion order.
    pub fn node_set(&self, name: &str) -> MeshResult<&[NodeId]> {
        self.node_sets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| MeshError::UnknownSet(name.to_string()))
    }

    /// Members of an element set in insertion order.
    pub fn element_set(&self, name: &str) -> MeshResult<&[ElementId]> {
        self.element_sets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| MeshError::UnknownSet(name.to_string()))
    }

    /// Names of all node sets.
    pub fn node_set_names(&self) -> impl Iterator<Item = &str> {
        self.node_sets.keys().map(String::as_str)
    }

    /// Names of all element sets.
    pub fn element_set_names(&self) -> impl Iterator<Item = &str> {
        self.element_sets.keys().map(String::as_str)
    }

    /// Appends nodes to a set, creating it when absent. Duplicates are kept.
    pub fn add_to_node_set<G: NodeGroup + ?Sized>(&mut self, name: &str, nodes: &G) -> MeshResult<()> {
        let flat = nodes.flatten();
        if let Some(&missing) = flat.iter().find(|id| !self.nodes.contains_key(id)) {
            return Err(MeshError::UnknownNode(missing));
        }
        self.node_sets.entry(name.to_string()).or_default().extend(flat);
        Ok(())
    }

    /// Appends elements to a set, creating it when absent.
    pub fn add_to_element_set(&mut self, name: &str, elements: &[ElementId]) -> MeshResult<()> {
        if let Some(&missing) = elements.iter().find(|id| !self.elements.contains_key(id)) {
            return Err(MeshError::UnknownElement(missing));
        }
        self.element_sets
            .entry(name.to_string())
            .or_default()
            .extend_from_slice(elements);
        Ok(())
    }
}
