//! # Structured Blocks
//!
//! Regular `nx × ny × nz` node lattices and the hexahedra (or, for
//! axisymmetric blocks, quads) connecting neighbouring lattice points.
//!
//! ## Stitching
//!
//! A block can be attached to existing geometry by handing it node planes
//! for any of its six faces. Slots covered by a plane reuse the plane's
//! nodes instead of creating new ones, and the lattice origin along the
//! face normal is taken from the plane's first node, so two blocks built
//! this way share their interface nodes.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use hexmesh::{create_block, BlockSpec, Mesh};
//!
//! let mut mesh = Mesh::new();
//! let block = create_block(&mut mesh, &BlockSpec::new([2, 2, 2], DVec3::ONE)).unwrap();
//! assert_eq!(mesh.node_count(), 8);
//! assert_eq!(block.elements.len(), 1);
//! ```

use glam::DVec3;
use tracing::debug;

use crate::element::{ElementShape, ElementType};
use crate::error::{MeshError, MeshResult};
use crate::grid::NodeGrid;
use crate::mesh::Mesh;
use crate::node::{Axis, ElementId, NodeId};
use crate::sets::SetNames;

/// Existing node planes to stitch onto, one optional plane per block face.
///
/// Each plane must have the block's extents with a single layer along the
/// face normal, e.g. `[1, ny, nz]` for `x_neg`/`x_pos`.
#[derive(Debug, Clone, Default)]
pub struct BoundaryPlanes {
    pub x_neg: Option<NodeGrid>,
    pub x_pos: Option<NodeGrid>,
    pub y_neg: Option<NodeGrid>,
    pub y_pos: Option<NodeGrid>,
    pub z_neg: Option<NodeGrid>,
    pub z_pos: Option<NodeGrid>,
}

impl BoundaryPlanes {
    /// Planes on `axis` as `(negative, positive)`.
    fn on(&self, axis: Axis) -> (Option<&NodeGrid>, Option<&NodeGrid>) {
        match axis {
            Axis::X => (self.x_neg.as_ref(), self.x_pos.as_ref()),
            Axis::Y => (self.y_neg.as_ref(), self.y_pos.as_ref()),
            Axis::Z => (self.z_neg.as_ref(), self.z_pos.as_ref()),
        }
    }
}

/// Parameters of a structured block.
#[derive(Debug, Clone)]
pub struct BlockSpec<'a> {
    /// Lattice node counts along x, y and z
    pub counts: [usize; 3],
    /// Node spacing along x, y and z
    pub spacing: DVec3,
    /// Position of lattice node `(0, 0, 0)` before plane re-derivation
    pub origin: DVec3,
    pub boundary: BoundaryPlanes,
    pub sets: SetNames<'a>,
    /// Element type; `C3D8R` for 3D blocks and `CAX4` for axisymmetric ones
    /// when unset
    pub element_type: Option<ElementType>,
}

impl<'a> BlockSpec<'a> {
    /// Block at the origin with no planes, sets or explicit element type.
    pub fn new(counts: [usize; 3], spacing: DVec3) -> Self {
        Self {
            counts,
            spacing,
            origin: DVec3::ZERO,
            boundary: BoundaryPlanes::default(),
            sets: SetNames::default(),
            element_type: None,
        }
    }

    pub fn with_origin(mut self, origin: DVec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPlanes) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_sets(mut self, sets: SetNames<'a>) -> Self {
        self.sets = sets;
        self
    }

    pub fn with_element_type(mut self, element_type: ElementType) -> Self {
        self.element_type = Some(element_type);
        self
    }
}

/// Nodes and elements of a freshly built block.
#[derive(Debug, Clone)]
pub struct StructuredBlock {
    pub nodes: NodeGrid,
    pub elements: Vec<ElementId>,
}

impl StructuredBlock {
    /// Face of the block's node lattice, ready to stitch onto.
    pub fn face(&self, axis: Axis, positive: bool) -> NodeGrid {
        let index = if positive {
            self.nodes.dims()[axis.index()] - 1
        } else {
            0
        };
        self.nodes.face(axis, index)
    }
}

/// Builds a 3D hexahedral block.
///
/// # Errors
///
/// - `InvalidDimensions` for a zero count or a degenerate spacing
/// - `PlaneShape` when a boundary plane does not fit its face
/// - `UnsupportedElementType` for a non-hexahedral element type
pub fn create_block(mesh: &mut Mesh, spec: &BlockSpec) -> MeshResult<StructuredBlock> {
    let element_type = spec.element_type.unwrap_or(ElementType::C3D8R);
    if element_type.shape() != ElementShape::Hex8 {
        return Err(MeshError::unsupported(element_type, "3D structured block"));
    }
    let nodes = fill_lattice(mesh, spec)?;
    let [nx, ny, nz] = spec.counts;

    let mut elements = Vec::new();
    for i in 1..nx {
        for j in 1..ny {
            for k in 1..nz {
                let corners = [
                    [i - 1, j - 1, k - 1],
                    [i, j - 1, k - 1],
                    [i - 1, j - 1, k],
                    [i, j - 1, k],
                    [i - 1, j, k - 1],
                    [i, j, k - 1],
                    [i - 1, j, k],
                    [i, j, k],
                ];
                let group = corners
                    .iter()
                    .map(|&idx| nodes.require(idx))
                    .collect::<MeshResult<Vec<NodeId>>>()?;
                elements.push(mesh.create_element(
                    &group,
                    element_type,
                    spec.sets.element_set,
                    None,
                )?);
            }
        }
    }

    debug!(
        "Created {}x{}x{} block with {} elements",
        nx,
        ny,
        nz,
        elements.len()
    );
    Ok(StructuredBlock { nodes, elements })
}

/// Builds an axisymmetric block of quads in the x-y plane.
///
/// The z count must be 1; z planes are ignored beyond fixing the origin.
pub fn create_block_axi(mesh: &mut Mesh, spec: &BlockSpec) -> MeshResult<StructuredBlock> {
    let element_type = spec.element_type.unwrap_or(ElementType::CAX4);
    if element_type.shape() != ElementShape::Quad4 {
        return Err(MeshError::unsupported(element_type, "axisymmetric block"));
    }
    if spec.counts[2] != 1 {
        return Err(MeshError::invalid_dimensions(format!(
            "axisymmetric block needs nz = 1, got {}",
            spec.counts[2]
        )));
    }
    let nodes = fill_lattice(mesh, spec)?;
    let [nx, ny, _] = spec.counts;

    let mut elements = Vec::new();
    for i in 1..nx {
        for j in 1..ny {
            let group = [
                nodes.require([i - 1, j - 1, 0])?,
                nodes.require([i, j - 1, 0])?,
                nodes.require([i - 1, j, 0])?,
                nodes.require([i, j, 0])?,
            ];
            elements.push(mesh.create_element(&group, element_type, spec.sets.element_set, None)?);
        }
    }

    debug!("Created {}x{} axisymmetric block with {} elements", nx, ny, elements.len());
    Ok(StructuredBlock { nodes, elements })
}

/// Creates a copy of `plane` moved by `distance` along `axis`.
///
/// Every filled slot gets a fresh node; the returned grid has the same
/// shape as `plane`.
pub fn copy_node_plane(
    mesh: &mut Mesh,
    plane: &NodeGrid,
    axis: Axis,
    distance: f64,
    node_set: Option<&str>,
) -> MeshResult<NodeGrid> {
    let offset = axis.unit() * distance;
    let mut copy = NodeGrid::new(plane.dims());
    for (idx, id) in plane.iter() {
        let position = mesh.position(id)? + offset;
        copy.set(idx, mesh.create_node(position, node_set, None)?);
    }
    Ok(copy)
}

/// Places supplied planes into a new lattice, re-derives the origin from
/// them and creates every node still missing.
fn fill_lattice(mesh: &mut Mesh, spec: &BlockSpec) -> MeshResult<NodeGrid> {
    let counts = spec.counts;
    if counts.iter().any(|&n| n == 0) {
        return Err(MeshError::invalid_dimensions(format!(
            "node counts must be at least 1, got {counts:?}"
        )));
    }
    for axis in Axis::ALL {
        let d = spec.spacing[axis.index()];
        if counts[axis.index()] > 1 && (!d.is_finite() || d.abs() <= mesh.config().tolerance) {
            return Err(MeshError::invalid_dimensions(format!(
                "spacing along {axis} must be finite and non-zero, got {d}"
            )));
        }
    }

    let mut nodes = NodeGrid::new(counts);
    let mut origin = spec.origin;
    for axis in Axis::ALL {
        let a = axis.index();
        let last = counts[a] - 1;
        let (neg, pos) = spec.boundary.on(axis);
        // The negative plane wins when both are given
        if let Some(plane) = pos {
            nodes.set_face(axis, last, plane)?;
            origin[a] = first_position(mesh, plane)?[a] - last as f64 * spec.spacing[a];
        }
        if let Some(plane) = neg {
            nodes.set_face(axis, 0, plane)?;
            origin[a] = first_position(mesh, plane)?[a];
        }
    }

    for i in 0..counts[0] {
        for j in 0..counts[1] {
            for k in 0..counts[2] {
                if nodes.get([i, j, k]).is_none() {
                    let offset = DVec3::new(i as f64, j as f64, k as f64) * spec.spacing;
                    let id = mesh.create_node(origin + offset, spec.sets.node_set, None)?;
                    nodes.set([i, j, k], id);
                }
            }
        }
    }
    Ok(nodes)
}

fn first_position(mesh: &Mesh, plane: &NodeGrid) -> MeshResult<DVec3> {
    let id = plane
        .iter()
        .next()
        .map(|(_, id)| id)
        .ok_or_else(|| MeshError::incomplete([0, 0, 0], "empty boundary plane"))?;
    mesh.position(id)
}

#[cfg(test)]
mod tests;
