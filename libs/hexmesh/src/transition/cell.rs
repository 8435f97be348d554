//! Interior 3D transition cell.

use glam::DVec3;

use crate::element::ElementType;
use crate::error::MeshResult;
use crate::grid::NodeGrid;
use crate::mesh::Mesh;
use crate::node::{Axis, ElementId};
use crate::sets::SetNames;

use super::{try_square, Cell, SOLID_WINDOW};

/// Fills a 4×4×4 window with the 22-hex interior transition pattern.
///
/// `axis` is the grid axis running from the fine face (local layer 0, all
/// 16 slots filled) to the coarse face (local layer 3, corner slot
/// `(0, 0)` filled; the other three corners are created when empty). The
/// in-plane slots `(a, b)` follow `axis.others()`.
///
/// Layer 1 is a full copy of the fine face. Layer 2 holds the two side
/// nodes of each coarse edge, and four nodes private to the cell sit
/// halfway between layers 1 and 2 over the central fine square.
///
/// ```rust
/// use glam::DVec3;
/// use hexmesh::{create_transition_cell, Axis, Mesh, NodeGrid, SetNames};
///
/// let mut mesh = Mesh::new();
/// let mut window = NodeGrid::new([4, 4, 4]);
/// for a in 0..4 {
///     for b in 0..4 {
///         let p = DVec3::new(a as f64, b as f64, 0.0);
///         window.set([a, b, 0], mesh.create_node(p, None, None).unwrap());
///     }
/// }
/// let top = mesh.create_node(DVec3::new(0.0, 0.0, 3.0), None, None).unwrap();
/// window.set([0, 0, 3], top);
///
/// let elements =
///     create_transition_cell(&mut mesh, &mut window, [0, 0, 0], Axis::Z, SetNames::NONE).unwrap();
/// assert_eq!(elements.len(), 22);
/// ```
pub fn create_transition_cell(
    mesh: &mut Mesh,
    grid: &mut NodeGrid,
    origin: [usize; 3],
    axis: Axis,
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    let (u, v) = axis.others();
    let mut cell = Cell::open(
        mesh,
        grid,
        origin,
        [u, v, axis],
        SOLID_WINDOW,
        sets,
        ElementType::C3D8R,
    )?;

    let mut base = [[DVec3::ZERO; 4]; 4];
    for (a, row) in base.iter_mut().enumerate() {
        for (b, p) in row.iter_mut().enumerate() {
            *p = cell.position([a, b, 0])?;
        }
    }
    let step = cell.third_of(base[0][0], cell.position([0, 0, 3])?)?;
    let at = |a: usize, b: usize, layer: f64| base[a][b] + step * layer;

    let fine = try_square(|a, b| cell.existing([a, b, 0]))?;
    let s = try_square(|a, b| cell.node([a, b, 1], at(a, b, 1.0)))?;

    let c11 = cell.private_node(at(1, 1, 1.5))?;
    let c12 = cell.private_node(at(1, 2, 1.5))?;
    let c21 = cell.private_node(at(2, 1, 1.5))?;
    let c22 = cell.private_node(at(2, 2, 1.5))?;

    let mx10 = cell.node([1, 0, 2], at(1, 0, 2.0))?;
    let mx20 = cell.node([2, 0, 2], at(2, 0, 2.0))?;
    let mx13 = cell.node([1, 3, 2], at(1, 3, 2.0))?;
    let mx23 = cell.node([2, 3, 2], at(2, 3, 2.0))?;
    let my01 = cell.node([0, 1, 2], at(0, 1, 2.0))?;
    let my02 = cell.node([0, 2, 2], at(0, 2, 2.0))?;
    let my31 = cell.node([3, 1, 2], at(3, 1, 2.0))?;
    let my32 = cell.node([3, 2, 2], at(3, 2, 2.0))?;

    let t00 = cell.existing([0, 0, 3])?;
    let t30 = cell.node([3, 0, 3], at(3, 0, 3.0))?;
    let t03 = cell.node([0, 3, 3], at(0, 3, 3.0))?;
    let t33 = cell.node([3, 3, 3], at(3, 3, 3.0))?;

    // Fine layer to layer 1
    for a in 0..3 {
        for b in 0..3 {
            cell.element(&[
                fine[a][b],
                fine[a + 1][b],
                fine[a + 1][b + 1],
                fine[a][b + 1],
                s[a][b],
                s[a + 1][b],
                s[a + 1][b + 1],
                s[a][b + 1],
            ])?;
        }
    }

    // Center and the four arms of the cross
    cell.element(&[s[1][1], s[2][1], s[2][2], s[1][2], c11, c21, c22, c12])?;
    cell.element(&[s[1][0], s[2][0], s[2][1], s[1][1], mx10, mx20, c21, c11])?;
    cell.element(&[s[1][2], s[2][2], s[2][3], s[1][3], c12, c22, mx23, mx13])?;
    cell.element(&[s[0][1], s[1][1], s[1][2], s[0][2], my01, c11, c12, my02])?;
    cell.element(&[s[2][1], s[3][1], s[3][2], s[2][2], c21, my31, my32, c22])?;

    // Corner plugs
    cell.element(&[s[0][0], s[1][0], s[1][1], s[0][1], t00, mx10, c11, my01])?;
    cell.element(&[s[2][0], s[3][0], s[3][1], s[2][1], mx20, t30, my31, c21])?;
    cell.element(&[s[0][2], s[1][2], s[1][3], s[0][3], my02, c12, mx13, t03])?;
    cell.element(&[s[2][2], s[3][2], s[3][3], s[2][3], c22, my32, t33, mx23])?;

    // Private layer up to the coarse edge nodes
    cell.element(&[c11, c21, c22, c12, mx10, mx20, mx23, mx13])?;

    // Skewed sides, coarse face on one end and the private layer on the other
    cell.element(&[t00, my01, my02, t03, mx10, c11, c12, mx13])?;
    cell.element(&[t30, my31, my32, t33, mx20, c21, c22, mx23])?;

    cell.element(&[mx10, mx20, mx23, mx13, t00, t30, t33, t03])?;

    Ok(cell.finish())
}
