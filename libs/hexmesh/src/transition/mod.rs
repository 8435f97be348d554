//! # Transition Cells
//!
//! Patterns that join a fine structured face to a face three times coarser
//! without hanging nodes, plus drivers that tile whole plates, lines and
//! corner regions with them and recurse on the coarse result.
//!
//! ## Windows
//!
//! Every cell works on a window of a [`NodeGrid`]: four slots along each
//! direction the cell spans, starting at an `origin` slot. Layer 0 of the
//! window holds the fine face; layer 3 holds the coarse face, of which only
//! the corner slots are ever filled. A cell reuses every slot that is
//! already filled and writes the nodes it creates back into empty slots,
//! so cells sharing one grid share their boundary nodes. Nodes that no
//! neighbour can see (the mid-layer nodes of the interior cell) are never
//! stored in the grid.
//!
//! Positions of new nodes are derived from nodes already in the window,
//! never from the grid axes, so windows may be arbitrarily placed and
//! oriented as long as the slot topology matches.
//!
//! ## Catalogue
//!
//! | Cell | Elements | Use |
//! |------|----------|-----|
//! | [`create_transition_cell`] | 22 hexes | interior of a plate |
//! | [`create_transition_cell_corner`] | 40 hexes | concave edge between two fine faces |
//! | [`create_transition_cell_corner_out`] | 11 hexes | convex edge of a fine surface |
//! | [`create_transition_cell_2d`] | 7 quads | interior of an axisymmetric line |
//! | [`create_transition_corner_2d`] | 8 quads | concave axisymmetric corner |
//! | [`create_transition_corner_out_2d`] | 3 quads | convex axisymmetric corner |

mod cell;
mod corner_out;
mod drivers;
mod edge;
mod planar;

pub use cell::create_transition_cell;
pub use corner_out::create_transition_cell_corner_out;
pub use drivers::{
    create_transition_corner, create_transition_corner_axi, create_transition_corner_out,
    create_transition_line_axi, create_transition_plate,
};
pub use edge::create_transition_cell_corner;
pub use planar::{
    create_transition_cell_2d, create_transition_corner_2d, create_transition_corner_out_2d,
    create_transition_slab, create_transition_slab_axi,
};

use config::constants::{fits_transition_order, TRANSITION_CELL_NODES, TRANSITION_RATIO};
use glam::DVec3;
use tracing::debug;

use crate::element::ElementType;
use crate::error::{MeshError, MeshResult};
use crate::grid::NodeGrid;
use crate::mesh::{Mesh, NodeGroup};
use crate::node::{Axis, ElementId, NodeId};
use crate::sets::SetNames;

/// Last local slot of a cell window along a direction it spans.
const REACH: usize = TRANSITION_CELL_NODES - 1;
/// Window reach of the hex cells.
pub(crate) const SOLID_WINDOW: [usize; 3] = [REACH; 3];
/// Window reach of the planar cells, one node deep along the third axis.
pub(crate) const PLANAR_WINDOW: [usize; 3] = [REACH, REACH, 0];

/// Checks that `count` nodes support `order` plate or line levels, i.e.
/// `count == 3^order * k + 1` with `k >= 1`.
///
/// ```rust
/// use hexmesh::check_transition_size;
/// assert!(check_transition_size(10, 2).is_ok());
/// assert!(check_transition_size(7, 2).is_err());
/// ```
pub fn check_transition_size(count: usize, order: u32) -> MeshResult<()> {
    if fits_transition_order(count, order) {
        Ok(())
    } else {
        Err(MeshError::TransitionSizing { count, order })
    }
}

/// True when `count` nodes split into whole cells for one level.
#[inline]
pub(crate) fn fits_level(count: usize) -> bool {
    fits_transition_order(count, 1)
}

/// Node count left along a level direction once one level has been
/// tiled and the first coarse layer is peeled off, as in the corner
/// drivers.
#[inline]
pub(crate) fn inner_count(count: usize) -> usize {
    (count - 1) / TRANSITION_RATIO
}

/// Checks the shrinking extents of a corner region for `order` levels.
pub(crate) fn check_corner_size(count: usize, order: u32) -> MeshResult<()> {
    let mut n = count;
    for _ in 0..order {
        if !fits_level(n) {
            return Err(MeshError::TransitionSizing { count, order });
        }
        n = inner_count(n);
    }
    Ok(())
}

/// Levels a driver runs for `order`: all of them when `sizing` passed,
/// none when it failed, or the failure itself under strict sizing.
pub(crate) fn planned_levels(
    mesh: &Mesh,
    driver: &str,
    order: u32,
    sizing: MeshResult<()>,
) -> MeshResult<u32> {
    match sizing {
        Ok(()) => Ok(order),
        Err(err) if mesh.config().strict_transition_sizing => Err(err),
        Err(err) => {
            debug!("{} transition skipped: {}", driver, err);
            Ok(0)
        }
    }
}

/// Builder over one window: maps local `[usize; 3]` slots to grid slots,
/// hands out shared or private nodes and collects the elements it emits.
pub(crate) struct Cell<'a> {
    mesh: &'a mut Mesh,
    grid: &'a mut NodeGrid,
    origin: [usize; 3],
    axes: [Axis; 3],
    sets: SetNames<'a>,
    element_type: ElementType,
    elements: Vec<ElementId>,
}

impl<'a> Cell<'a> {
    /// Opens a window whose local axis `n` runs along grid axis `axes[n]`
    /// and reaches local index `reach[n]`.
    pub(crate) fn open(
        mesh: &'a mut Mesh,
        grid: &'a mut NodeGrid,
        origin: [usize; 3],
        axes: [Axis; 3],
        reach: [usize; 3],
        sets: SetNames<'a>,
        element_type: ElementType,
    ) -> MeshResult<Self> {
        if axes[0] == axes[1] || axes[1] == axes[2] || axes[0] == axes[2] {
            return Err(MeshError::invalid_axis(format!(
                "window axes {}{}{} repeat",
                axes[0], axes[1], axes[2]
            )));
        }
        let cell = Self {
            mesh,
            grid,
            origin,
            axes,
            sets,
            element_type,
            elements: Vec::new(),
        };
        let far = cell.slot(reach);
        if !cell.grid.contains(far) {
            return Err(MeshError::invalid_dimensions(format!(
                "window at {origin:?} reaching {far:?} exceeds grid {:?}",
                cell.grid.dims()
            )));
        }
        Ok(cell)
    }

    #[inline]
    fn slot(&self, local: [usize; 3]) -> [usize; 3] {
        let mut idx = self.origin;
        for (n, axis) in self.axes.iter().enumerate() {
            idx[axis.index()] += local[n];
        }
        idx
    }

    /// Node that must already be in the window.
    pub(crate) fn existing(&self, local: [usize; 3]) -> MeshResult<NodeId> {
        let slot = self.slot(local);
        self.grid
            .get(slot)
            .ok_or_else(|| MeshError::incomplete(slot, format!("transition window slot {local:?}")))
    }

    /// Position of a node that must already be in the window.
    pub(crate) fn position(&self, local: [usize; 3]) -> MeshResult<DVec3> {
        self.mesh.position(self.existing(local)?)
    }

    /// Node at `local`, created at `position` when the slot is empty.
    pub(crate) fn node(&mut self, local: [usize; 3], position: DVec3) -> MeshResult<NodeId> {
        let slot = self.slot(local);
        if let Some(id) = self.grid.get(slot) {
            return Ok(id);
        }
        let id = self.mesh.create_node(position, self.sets.node_set, None)?;
        self.grid.set(slot, id);
        Ok(id)
    }

    /// Node that belongs to this cell alone and never enters the grid.
    pub(crate) fn private_node(&mut self, position: DVec3) -> MeshResult<NodeId> {
        self.mesh.create_node(position, self.sets.node_set, None)
    }

    /// One third of the offset from `from` to `to`.
    pub(crate) fn third_of(&self, from: DVec3, to: DVec3) -> MeshResult<DVec3> {
        let step = (to - from) / TRANSITION_RATIO as f64;
        if step.length() <= self.mesh.config().tolerance {
            return Err(MeshError::invalid_dimensions(format!(
                "transition window at {:?} has no thickness",
                self.origin
            )));
        }
        Ok(step)
    }

    pub(crate) fn element<G: NodeGroup + ?Sized>(&mut self, nodes: &G) -> MeshResult<()> {
        let id = self
            .mesh
            .create_element(nodes, self.element_type, self.sets.element_set, None)?;
        self.elements.push(id);
        Ok(())
    }

    pub(crate) fn finish(self) -> Vec<ElementId> {
        self.elements
    }
}

/// Fills a 4×4 table of nodes from `f(a, b)`.
pub(crate) fn try_square<F>(mut f: F) -> MeshResult<[[NodeId; 4]; 4]>
where
    F: FnMut(usize, usize) -> MeshResult<NodeId>,
{
    let mut out = [[NodeId(0); 4]; 4];
    for (a, row) in out.iter_mut().enumerate() {
        for (b, slot) in row.iter_mut().enumerate() {
            *slot = f(a, b)?;
        }
    }
    Ok(out)
}
