//! Planar transition patterns: axisymmetric quad cells and the
//! one-element-thick hex slab.

use glam::DVec3;
use tracing::debug;

use crate::element::ElementType;
use crate::error::{MeshError, MeshResult};
use crate::grid::NodeGrid;
use crate::mesh::Mesh;
use crate::node::{Axis, ElementId, NodeId};
use crate::sets::SetNames;

use super::{Cell, PLANAR_WINDOW};

/// Slots `(u, l)` of the planar 3:1 pattern: two full fine rows, the two
/// inner nodes of row 2 and the coarse corners of row 3.
const PLANAR_SLOTS: [(usize, usize); 12] = [
    (0, 0),
    (1, 0),
    (2, 0),
    (3, 0),
    (0, 1),
    (1, 1),
    (2, 1),
    (3, 1),
    (1, 2),
    (2, 2),
    (0, 3),
    (3, 3),
];

/// Quads of the planar 3:1 pattern.
const PLANAR_QUADS: [[(usize, usize); 4]; 7] = [
    [(0, 0), (1, 0), (1, 1), (0, 1)],
    [(1, 0), (2, 0), (2, 1), (1, 1)],
    [(2, 0), (3, 0), (3, 1), (2, 1)],
    [(1, 1), (2, 1), (2, 2), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (0, 3)],
    [(2, 1), (3, 1), (3, 3), (2, 2)],
    [(1, 2), (2, 2), (3, 3), (0, 3)],
];

/// Quads of the concave corner pattern in `(p, q)` slots.
const CORNER_QUADS: [[(usize, usize); 4]; 8] = [
    [(0, 0), (1, 0), (1, 1), (0, 1)],
    [(0, 1), (1, 1), (1, 2), (0, 2)],
    [(1, 0), (2, 0), (2, 1), (1, 1)],
    [(0, 2), (1, 2), (1, 3), (0, 3)],
    [(2, 0), (3, 0), (3, 1), (2, 1)],
    [(1, 1), (2, 1), (2, 2), (1, 2)],
    [(1, 2), (2, 2), (3, 3), (1, 3)],
    [(2, 1), (3, 1), (3, 3), (2, 2)],
];

type Table = [[Option<NodeId>; 4]; 4];

fn quad(table: &Table, corners: &[(usize, usize); 4]) -> MeshResult<[NodeId; 4]> {
    let mut out = [NodeId(0); 4];
    for (slot, &(a, b)) in out.iter_mut().zip(corners) {
        *slot = table[a][b]
            .ok_or_else(|| MeshError::incomplete([a, b, 0], "planar pattern slot left empty"))?;
    }
    Ok(out)
}

/// In-plane axis of the x-y plane other than `axis`.
pub(super) fn in_plane_partner(axis: Axis) -> MeshResult<Axis> {
    match axis {
        Axis::X => Ok(Axis::Y),
        Axis::Y => Ok(Axis::X),
        Axis::Z => Err(MeshError::invalid_axis(
            "axisymmetric transitions run along x or y",
        )),
    }
}

/// Fills a 4×4 window of an x-y grid with the 7-quad planar pattern.
///
/// `axis` (x or y) runs from the fine row (local row 0, four slots
/// filled) to the coarse row (local row 3, slot 0 filled).
pub fn create_transition_cell_2d(
    mesh: &mut Mesh,
    grid: &mut NodeGrid,
    origin: [usize; 3],
    axis: Axis,
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    let u = in_plane_partner(axis)?;
    let mut cell = Cell::open(
        mesh,
        grid,
        origin,
        [u, axis, Axis::Z],
        PLANAR_WINDOW,
        sets,
        ElementType::CAX4,
    )?;

    let mut base = [DVec3::ZERO; 4];
    for (a, p) in base.iter_mut().enumerate() {
        *p = cell.position([a, 0, 0])?;
    }
    let step = cell.third_of(base[0], cell.position([0, 3, 0])?)?;

    let mut table: Table = [[None; 4]; 4];
    for (a, l) in PLANAR_SLOTS {
        let position = base[a] + step * l as f64;
        table[a][l] = Some(cell.node([a, l, 0], position)?);
    }
    for corners in &PLANAR_QUADS {
        cell.element(&quad(&table, corners)?)?;
    }
    Ok(cell.finish())
}

/// Fills a 4×4 window of an x-y grid around a concave corner with 8 quads.
///
/// The fine lines `p = 0` (along y) and `q = 0` (along x) must be
/// complete; the lines `p = 3` and `q = 3` come out coarse.
pub fn create_transition_corner_2d(
    mesh: &mut Mesh,
    grid: &mut NodeGrid,
    origin: [usize; 3],
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    let mut cell = Cell::open(
        mesh,
        grid,
        origin,
        [Axis::X, Axis::Y, Axis::Z],
        PLANAR_WINDOW,
        sets,
        ElementType::CAX4,
    )?;
    let step = cell.third_of(cell.position([0, 0, 0])?, cell.position([3, 0, 0])?)?;

    let mut table: Table = [[None; 4]; 4];
    for k in 0..4 {
        table[0][k] = Some(cell.existing([0, k, 0])?);
        table[k][0] = Some(cell.existing([k, 0, 0])?);
    }
    for (p, q) in [(1, 1), (1, 2), (1, 3), (2, 1), (3, 1), (2, 2), (3, 3)] {
        let position = cell.position([0, q, 0])? + step * p as f64;
        table[p][q] = Some(cell.node([p, q, 0], position)?);
    }
    for corners in &CORNER_QUADS {
        cell.element(&quad(&table, corners)?)?;
    }
    Ok(cell.finish())
}

/// Closes a convex corner of an x-y grid with 3 quads.
///
/// Needs `(0, 0)`, `(1, 0)`, `(3, 0)` along x and `(0, 1)`, `(0, 3)` along
/// y. The inner node `(1, 1)` and the coarse corner `(3, 3)` take their x
/// from the x line and their y from the y line, which assumes the two lines
/// are axis-aligned.
pub fn create_transition_corner_out_2d(
    mesh: &mut Mesh,
    grid: &mut NodeGrid,
    origin: [usize; 3],
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    let mut cell = Cell::open(
        mesh,
        grid,
        origin,
        [Axis::X, Axis::Y, Axis::Z],
        PLANAR_WINDOW,
        sets,
        ElementType::CAX4,
    )?;
    let corner = cell.existing([0, 0, 0])?;
    let x1 = cell.existing([1, 0, 0])?;
    let x3 = cell.existing([3, 0, 0])?;
    let y1 = cell.existing([0, 1, 0])?;
    let y3 = cell.existing([0, 3, 0])?;

    let z = cell.position([0, 0, 0])?.z;
    let inner = DVec3::new(cell.position([1, 0, 0])?.x, cell.position([0, 1, 0])?.y, z);
    let far = DVec3::new(cell.position([3, 0, 0])?.x, cell.position([0, 3, 0])?.y, z);
    let inner = cell.node([1, 1, 0], inner)?;
    let far = cell.node([3, 3, 0], far)?;

    cell.element(&[corner, x1, inner, y1])?;
    cell.element(&[x1, x3, far, inner])?;
    cell.element(&[y1, inner, far, y3])?;
    Ok(cell.finish())
}

fn check_axes<const N: usize>(axes: &[Axis; N]) -> MeshResult<()> {
    for (n, a) in axes.iter().enumerate() {
        if axes[n + 1..].contains(a) {
            return Err(MeshError::same_axis(*a));
        }
    }
    Ok(())
}

/// Builds a standalone planar transition extruded one element thick: 7
/// hexes on fresh nodes.
///
/// Local coordinates are `(t, u, l)`: `t` across the slab, `u` along the
/// fine edge and `l` from fine to coarse. Local component `n` is laid
/// along `axes[n]` with spacing `spacing[n]`, offset by `origin`.
pub fn create_transition_slab(
    mesh: &mut Mesh,
    origin: DVec3,
    axes: [Axis; 3],
    spacing: DVec3,
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    check_axes(&axes)?;
    if spacing.abs().min_element() <= mesh.config().tolerance || !spacing.is_finite() {
        return Err(MeshError::invalid_dimensions(format!(
            "slab spacing must be non-zero, got {spacing:?}"
        )));
    }
    let place = |t: usize, u: usize, l: usize| {
        let local = [t as f64, u as f64, l as f64];
        (0..3).fold(origin, |p, n| p + axes[n].unit() * local[n] * spacing[n])
    };

    let mut layers: [Table; 2] = [[[None; 4]; 4]; 2];
    for (t, table) in layers.iter_mut().enumerate() {
        for (u, l) in PLANAR_SLOTS {
            table[u][l] = Some(mesh.create_node(place(t, u, l), sets.node_set, None)?);
        }
    }

    let mut elements = Vec::with_capacity(PLANAR_QUADS.len());
    for corners in &PLANAR_QUADS {
        let near = quad(&layers[0], corners)?;
        let far = quad(&layers[1], corners)?;
        elements.push(mesh.create_element(
            &[near, far],
            ElementType::C3D8R,
            sets.element_set,
            None,
        )?);
    }
    debug!("Created transition slab at {:?} along {:?}", origin, axes);
    Ok(elements)
}

/// Builds a standalone axisymmetric planar transition: 7 quads on fresh
/// nodes in the x-y plane.
///
/// `axes[0]` runs along the fine edge, `axes[1]` from fine to coarse.
pub fn create_transition_slab_axi(
    mesh: &mut Mesh,
    origin: DVec3,
    axes: [Axis; 2],
    spacing: [f64; 2],
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    let [u, l] = axes;
    if in_plane_partner(l)? != u {
        return Err(MeshError::invalid_axis(format!(
            "axisymmetric slab needs x and y, got {u} and {l}"
        )));
    }
    if spacing.iter().any(|d| !d.is_finite() || d.abs() <= mesh.config().tolerance) {
        return Err(MeshError::invalid_dimensions(format!(
            "slab spacing must be non-zero, got {spacing:?}"
        )));
    }

    let mut dims = [1; 3];
    dims[u.index()] = 4;
    dims[l.index()] = 4;
    let mut grid = NodeGrid::new(dims);
    for a in 0..4 {
        let mut idx = [0; 3];
        idx[u.index()] = a;
        let p = origin + u.unit() * a as f64 * spacing[0];
        grid.set(idx, mesh.create_node(p, sets.node_set, None)?);
    }
    let mut top = [0; 3];
    top[l.index()] = 3;
    let p = origin + l.unit() * 3.0 * spacing[1];
    grid.set(top, mesh.create_node(p, sets.node_set, None)?);

    create_transition_cell_2d(mesh, &mut grid, [0, 0, 0], l, sets)
}
