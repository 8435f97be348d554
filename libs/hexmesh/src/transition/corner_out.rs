//! Convex edge transition cell.

use glam::DVec3;

use crate::element::ElementType;
use crate::error::MeshResult;
use crate::grid::NodeGrid;
use crate::mesh::Mesh;
use crate::node::{Axis, ElementId, NodeId};
use crate::sets::SetNames;

use super::{Cell, SOLID_WINDOW};

/// Wraps a convex fine edge with 11 hexes that coarsen away from it.
///
/// `axis` runs along the edge; `(p, q)` follow `axis.others()`. The window
/// needs the edge line `(0, e, 0)` for `e = 0..=3` plus its first
/// neighbours `(1, 0, 0)` and `(0, 0, 1)`, which fix the two directions the
/// cell grows in. The faces `p = 0` and `q = 0` carry the planar 3:1
/// pattern; the coarse line comes out at `(3, {0, 3}, 3)`.
pub fn create_transition_cell_corner_out(
    mesh: &mut Mesh,
    grid: &mut NodeGrid,
    origin: [usize; 3],
    axis: Axis,
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    let (p_axis, q_axis) = axis.others();
    let mut cell = Cell::open(
        mesh,
        grid,
        origin,
        [p_axis, axis, q_axis],
        SOLID_WINDOW,
        sets,
        ElementType::C3D8R,
    )?;

    let start = cell.position([0, 0, 0])?;
    let d1 = cell.position([1, 0, 0])? - start;
    let d2 = cell.position([0, 0, 1])? - start;
    // Zero-length directions would collapse every element
    cell.third_of(DVec3::ZERO, d1 * 3.0)?;
    cell.third_of(DVec3::ZERO, d2 * 3.0)?;

    let mut line = [DVec3::ZERO; 4];
    for (e, p) in line.iter_mut().enumerate() {
        *p = cell.position([0, e, 0])?;
    }
    let at = |p: usize, e: usize, q: usize| line[e] + d1 * p as f64 + d2 * q as f64;

    let mut edge = [NodeId(0); 4];
    let mut side1 = [NodeId(0); 4];
    let mut side2 = [NodeId(0); 4];
    let mut center = [NodeId(0); 4];
    for e in 0..4 {
        edge[e] = cell.existing([0, e, 0])?;
        side1[e] = cell.node([1, e, 0], at(1, e, 0))?;
        side2[e] = cell.node([0, e, 1], at(0, e, 1))?;
        center[e] = cell.node([1, e, 1], at(1, e, 1))?;
    }
    let mid1 = [cell.node([0, 1, 2], at(0, 1, 2))?, cell.node([0, 2, 2], at(0, 2, 2))?];
    let mid2 = [cell.node([2, 1, 0], at(2, 1, 0))?, cell.node([2, 2, 0], at(2, 2, 0))?];
    let center2 = [cell.node([2, 1, 2], at(2, 1, 2))?, cell.node([2, 2, 2], at(2, 2, 2))?];
    let edge1 = [cell.node([0, 0, 3], at(0, 0, 3))?, cell.node([0, 3, 3], at(0, 3, 3))?];
    let edge2 = [cell.node([3, 0, 0], at(3, 0, 0))?, cell.node([3, 3, 0], at(3, 3, 0))?];
    let corner = [cell.node([3, 0, 3], at(3, 0, 3))?, cell.node([3, 3, 3], at(3, 3, 3))?];

    // Unit column along the edge
    for e in 0..3 {
        cell.element(&[
            edge[e],
            side1[e],
            center[e],
            side2[e],
            edge[e + 1],
            side1[e + 1],
            center[e + 1],
            side2[e + 1],
        ])?;
    }

    // Sharp hexes over the middle of the edge
    cell.element(&[
        side2[1], mid1[0], center2[0], center[1], side2[2], mid1[1], center2[1], center[2],
    ])?;
    cell.element(&[
        side1[1], mid2[0], center2[0], center[1], side1[2], mid2[1], center2[1], center[2],
    ])?;

    // Fans from the coarse ends of the edge
    for (end, inner, k) in [(0, 1, 0), (3, 2, 1)] {
        cell.element(&[
            side2[end],
            edge1[k],
            corner[k],
            center[end],
            side2[inner],
            mid1[k],
            center2[k],
            center[inner],
        ])?;
        cell.element(&[
            side1[end],
            edge2[k],
            corner[k],
            center[end],
            side1[inner],
            mid2[k],
            center2[k],
            center[inner],
        ])?;
    }

    // Coarse blocks on the two faces
    cell.element(&[
        mid1[0], center2[0], corner[0], edge1[0], mid1[1], center2[1], corner[1], edge1[1],
    ])?;
    cell.element(&[
        mid2[0], center2[0], corner[0], edge2[0], mid2[1], center2[1], corner[1], edge2[1],
    ])?;

    Ok(cell.finish())
}
