//! # Hexmesh
//!
//! Structured hexahedral and axisymmetric quad mesh construction for
//! finite-element solvers.
//!
//! ## Architecture
//!
//! ```text
//! block (lattices) ─┐
//! transition (3:1) ─┼─> Mesh (nodes, elements, sets) ─> export (MeshExport)
//! transform (warps) ┘
//! ```
//!
//! A [`Mesh`] owns every node and element under solver-style labels
//! starting at 1. Builders return [`NodeGrid`]s of the nodes they touched,
//! so the next builder can stitch onto them instead of duplicating nodes.
//!
//! ## Algorithms
//!
//! - **Blocks**: regular lattices stitched through shared boundary planes
//! - **Transitions**: 3:1 cells joining a fine face to a coarse one with no
//!   hanging nodes, tiled and recursed by the plate, line and corner drivers
//! - **Transforms**: square-to-cylinder, square-to-sector and sweep warps
//!   of node sets
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use hexmesh::{create_block, create_transition_plate, Axis, BlockSpec, Direction, Mesh, SetNames};
//!
//! let mut mesh = Mesh::new();
//! let block = create_block(&mut mesh, &BlockSpec::new([7, 7, 3], DVec3::splat(0.5))).unwrap();
//! let coarse = create_transition_plate(
//!     &mut mesh,
//!     &block.face(Axis::Z, true),
//!     Axis::Z,
//!     1,
//!     Direction::Positive,
//!     SetNames::NONE,
//! )
//! .unwrap();
//! assert_eq!(coarse.dims(), [3, 3, 1]);
//!
//! let export = mesh.export();
//! assert_eq!(export.nodes.len(), mesh.node_count());
//! ```

pub mod block;
pub mod element;
pub mod error;
pub mod export;
pub mod grid;
pub mod mesh;
pub mod node;
pub mod sets;
pub mod transform;
pub mod transition;

pub use block::{copy_node_plane, create_block, create_block_axi, BlockSpec, BoundaryPlanes, StructuredBlock};
pub use element::{Element, ElementShape, ElementType, UnknownElementType};
pub use error::{MeshError, MeshResult};
pub use export::{ElementBlock, ExportElement, ExportNode, MeshExport};
pub use grid::NodeGrid;
pub use mesh::{Mesh, NodeGroup};
pub use node::{Axis, AxisOrder, Direction, ElementId, Node, NodeId};
pub use sets::SetNames;
pub use transform::{sweep_block, transform_square_to_cylinder, transform_square_to_sector, RotationFrame};
pub use transition::{
    check_transition_size, create_transition_cell, create_transition_cell_2d,
    create_transition_cell_corner, create_transition_cell_corner_out, create_transition_corner,
    create_transition_corner_2d, create_transition_corner_axi, create_transition_corner_out,
    create_transition_corner_out_2d, create_transition_line_axi, create_transition_plate,
    create_transition_slab, create_transition_slab_axi,
};
