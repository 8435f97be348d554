//! Drivers that tile whole surfaces, lines and corner regions with
//! transition cells, one level per pass, and recurse on the coarse result.
//!
//! Every driver checks up front that its extents carry all `order`
//! levels. When they do not, strict sizing
//! (`MeshConfig::strict_transition_sizing`) turns that into an error, and
//! the default mode runs no level at all: plates and lines come back
//! untouched, and corner regions are meshed 1:1.

use glam::DVec3;
use tracing::debug;

use crate::element::{ElementShape, ElementType};
use crate::error::{MeshError, MeshResult};
use crate::grid::NodeGrid;
use crate::mesh::Mesh;
use crate::node::{Axis, Direction, ElementId, NodeId};
use crate::sets::SetNames;

use super::planar::in_plane_partner;
use super::{
    check_corner_size, check_transition_size, create_transition_cell,
    create_transition_cell_2d, create_transition_cell_corner, create_transition_cell_corner_out,
    create_transition_corner_2d, planned_levels,
};

/// Offsets of the coarse corners of one cell.
const COARSE_CORNERS: [(usize, usize); 4] = [(0, 0), (3, 0), (0, 3), (3, 3)];

fn slot(parts: [(Axis, usize); 3]) -> [usize; 3] {
    let mut idx = [0; 3];
    for (axis, value) in parts {
        idx[axis.index()] = value;
    }
    idx
}

/// Distance between two neighbouring fine nodes.
fn spacing(mesh: &Mesh, a: NodeId, b: NodeId) -> MeshResult<f64> {
    let gap = (mesh.position(b)? - mesh.position(a)?).length();
    if gap <= mesh.config().tolerance {
        return Err(MeshError::invalid_dimensions(format!(
            "fine nodes {a} and {b} coincide"
        )));
    }
    Ok(gap)
}

/// Node at `idx`, created when empty at the position completed from the
/// two faces through slot 0 along `a` and along `b`: the node on face
/// `b = 0` plus the node on face `a = 0`, minus their shared edge node.
fn complete(
    mesh: &mut Mesh,
    grid: &mut NodeGrid,
    idx: [usize; 3],
    a: Axis,
    b: Axis,
    node_set: Option<&str>,
) -> MeshResult<NodeId> {
    if let Some(id) = grid.get(idx) {
        return Ok(id);
    }
    let mut on_a_face = idx;
    on_a_face[a.index()] = 0;
    let mut on_b_face = idx;
    on_b_face[b.index()] = 0;
    let mut edge = on_b_face;
    edge[a.index()] = 0;

    let position: DVec3 = mesh.position(grid.require(on_b_face)?)?
        + mesh.position(grid.require(on_a_face)?)?
        - mesh.position(grid.require(edge)?)?;
    let id = mesh.create_node(position, node_set, None)?;
    grid.set(idx, id);
    Ok(id)
}

/// Completes every slot of a corner region and meshes it 1:1.
///
/// The faces `x = 0` and `b = 0` must be filled. Hex regions use the
/// structured block corner pattern; quad regions are meshed in the x-y
/// plane.
fn fill_box(
    mesh: &mut Mesh,
    grid: &mut NodeGrid,
    b: Axis,
    element_type: ElementType,
    sets: SetNames,
) -> MeshResult<Vec<ElementId>> {
    let [nx, ny, nz] = grid.dims();
    for i in 0..nx {
        for j in 0..ny {
            for k in 0..nz {
                complete(mesh, grid, [i, j, k], Axis::X, b, sets.node_set)?;
            }
        }
    }

    let mut elements = Vec::new();
    if element_type.shape() == ElementShape::Hex8 {
        for i in 1..nx {
            for j in 1..ny {
                for k in 1..nz {
                    let group = [
                        grid.require([i - 1, j - 1, k - 1])?,
                        grid.require([i, j - 1, k - 1])?,
                        grid.require([i - 1, j - 1, k])?,
                        grid.require([i, j - 1, k])?,
                        grid.require([i - 1, j, k - 1])?,
                        grid.require([i, j, k - 1])?,
                        grid.require([i - 1, j, k])?,
                        grid.require([i, j, k])?,
                    ];
                    elements.push(mesh.create_element(
                        &group,
                        element_type,
                        sets.element_set,
                        None,
                    )?);
                }
            }
        }
    } else {
        for i in 1..nx {
            for j in 1..ny {
                let group = [
                    grid.require([i - 1, j - 1, 0])?,
                    grid.require([i, j - 1, 0])?,
                    grid.require([i - 1, j, 0])?,
                    grid.require([i, j, 0])?,
                ];
                elements.push(mesh.create_element(&group, element_type, sets.element_set, None)?);
            }
        }
    }
    Ok(elements)
}

// =============================================================================
// PLATES AND LINES
// =============================================================================

/// Coarsens a fine surface by `order` levels of interior cells stacked
/// along `axis` in `direction`.
///
/// `surface` must have extent 1 along `axis`. Each level lays a 4-slot
/// thick grid on the current surface, with the layer spacing taken from
/// the first two surface nodes, and passes its sampled coarse face on.
/// Returns the final coarse surface.
///
/// ```rust
/// use glam::DVec3;
/// use hexmesh::{create_block, create_transition_plate, Axis, BlockSpec, Direction, Mesh, SetNames};
///
/// let mut mesh = Mesh::new();
/// let block = create_block(&mut mesh, &BlockSpec::new([4, 4, 2], DVec3::ONE)).unwrap();
/// let top = block.face(Axis::Z, true);
/// let coarse = create_transition_plate(
///     &mut mesh, &top, Axis::Z, 1, Direction::Positive, SetNames::NONE,
/// ).unwrap();
/// assert_eq!(coarse.dims(), [2, 2, 1]);
/// ```
pub fn create_transition_plate(
    mesh: &mut Mesh,
    surface: &NodeGrid,
    axis: Axis,
    order: u32,
    direction: Direction,
    sets: SetNames,
) -> MeshResult<NodeGrid> {
    let (u, v) = axis.others();
    let dims = surface.dims();
    if dims[axis.index()] != 1 {
        return Err(MeshError::invalid_dimensions(format!(
            "plate surface {dims:?} is not flat along {axis}"
        )));
    }
    let sizing = check_transition_size(dims[u.index()], order)
        .and_then(|()| check_transition_size(dims[v.index()], order));
    let levels = planned_levels(mesh, "Plate", order, sizing)?;

    let at = |a: usize, b: usize, layer: usize| slot([(u, a), (v, b), (axis, layer)]);
    let mut current = surface.clone();
    for level in 0..levels {
        let extents = current.dims();
        let (nu, nv) = (extents[u.index()], extents[v.index()]);

        let mut grid_dims = extents;
        grid_dims[axis.index()] = 4;
        let mut grid = NodeGrid::new(grid_dims);
        grid.set_face(axis, 0, &current)?;

        let gap = spacing(mesh, grid.require(at(0, 0, 0))?, grid.require(at(1, 0, 0))?)?;
        let step = axis.unit() * direction.sign() * gap;
        for a in (0..nu).step_by(3) {
            for b in (0..nv).step_by(3) {
                let base = mesh.position(grid.require(at(a, b, 0))?)?;
                let id = mesh.create_node(base + step * 3.0, sets.node_set, None)?;
                grid.set(at(a, b, 3), id);
            }
        }

        let mut created = 0;
        for a in (0..nu - 1).step_by(3) {
            for b in (0..nv - 1).step_by(3) {
                created += create_transition_cell(mesh, &mut grid, at(a, b, 0), axis, sets)?.len();
            }
        }
        debug!(
            "Plate transition level {} on {}x{} nodes: {} elements",
            level, nu, nv, created
        );

        let mut stride = [3; 3];
        stride[axis.index()] = 1;
        current = grid.face(axis, 3).sample(stride);
    }
    Ok(current)
}

/// Coarsens a fine line of an axisymmetric mesh by `order` levels of
/// planar cells growing along `axis` (x or y) in `direction`.
///
/// Returns the final coarse line.
pub fn create_transition_line_axi(
    mesh: &mut Mesh,
    line: &[NodeId],
    axis: Axis,
    order: u32,
    direction: Direction,
    sets: SetNames,
) -> MeshResult<Vec<NodeId>> {
    let u = in_plane_partner(axis)?;
    let levels = planned_levels(mesh, "Line", order, check_transition_size(line.len(), order))?;

    let at = |a: usize, layer: usize| slot([(u, a), (axis, layer), (Axis::Z, 0)]);
    let mut current = line.to_vec();
    for level in 0..levels {
        let n = current.len();

        let mut dims = [1; 3];
        dims[u.index()] = n;
        dims[axis.index()] = 4;
        let mut grid = NodeGrid::new(dims);
        for (a, &id) in current.iter().enumerate() {
            grid.set(at(a, 0), id);
        }
        let step = axis.unit() * direction.sign() * spacing(mesh, current[0], current[1])?;
        for a in (0..n).step_by(3) {
            let base = mesh.position(current[a])?;
            let id = mesh.create_node(base + step * 3.0, sets.node_set, None)?;
            grid.set(at(a, 3), id);
        }

        let mut created = 0;
        for a in (0..n - 1).step_by(3) {
            created += create_transition_cell_2d(mesh, &mut grid, at(a, 0), axis, sets)?.len();
        }
        debug!("Line transition level {} on {} nodes: {} elements", level, n, created);

        current = (0..n)
            .step_by(3)
            .map(|a| grid.require(at(a, 3)))
            .collect::<MeshResult<Vec<_>>>()?;
    }
    Ok(current)
}

// =============================================================================
// CORNERS
// =============================================================================

fn corner_grid(floor: &NodeGrid, wall: &NodeGrid) -> MeshResult<NodeGrid> {
    let [nx, ny, _] = floor.dims();
    let nz = wall.dims()[2];
    let mut grid = NodeGrid::new([nx, ny, nz]);
    grid.set_face(Axis::Z, 0, floor)?;
    grid.set_face(Axis::X, 0, wall)?;
    Ok(grid)
}

/// Coarsens the region inside a concave edge along y.
///
/// `surf1` is the fine face `[nx, ny, 1]` and `surf2` the fine face
/// `[1, ny, nz]`; both start from the same edge line. Each level places
/// edge cells along the edge, interior cells on the rest of both faces,
/// and moves diagonally onto the coarse faces three slots in. Whatever
/// region is left when the levels run out is meshed with unit hexes.
/// Returns the node grid of that final region.
pub fn create_transition_corner(
    mesh: &mut Mesh,
    surf1: &NodeGrid,
    surf2: &NodeGrid,
    order: u32,
    sets: SetNames,
) -> MeshResult<NodeGrid> {
    let [nx, ny, flat1] = surf1.dims();
    let [flat2, ny2, nz] = surf2.dims();
    if flat1 != 1 || flat2 != 1 || ny != ny2 {
        return Err(MeshError::invalid_dimensions(format!(
            "corner faces {:?} and {:?} do not meet along y",
            surf1.dims(),
            surf2.dims()
        )));
    }
    for j in 0..ny {
        if surf1.require([0, j, 0])? != surf2.require([0, j, 0])? {
            return Err(MeshError::invalid_dimensions(format!(
                "corner faces disagree on edge node {j}"
            )));
        }
    }
    let sizing = check_corner_size(nx, order)
        .and_then(|()| check_transition_size(ny, order))
        .and_then(|()| check_corner_size(nz, order));
    let levels = planned_levels(mesh, "Corner", order, sizing)?;

    let mut floor = surf1.clone();
    let mut wall = surf2.clone();
    for level in 0..levels {
        let [nx, ny, _] = floor.dims();
        let nz = wall.dims()[2];

        let mut grid = corner_grid(&floor, &wall)?;
        let mut created = 0;
        for j in (0..ny - 1).step_by(3) {
            created += create_transition_cell_corner(mesh, &mut grid, [0, j, 0], Axis::Y, sets)?.len();
        }
        for j in (0..ny - 1).step_by(3) {
            for i in (3..nx - 1).step_by(3) {
                for (di, dj) in COARSE_CORNERS {
                    complete(mesh, &mut grid, [i + di, j + dj, 3], Axis::X, Axis::Z, sets.node_set)?;
                }
                created += create_transition_cell(mesh, &mut grid, [i, j, 0], Axis::Z, sets)?.len();
            }
            for k in (3..nz - 1).step_by(3) {
                for (dj, dk) in COARSE_CORNERS {
                    complete(mesh, &mut grid, [3, j + dj, k + dk], Axis::X, Axis::Z, sets.node_set)?;
                }
                created += create_transition_cell(mesh, &mut grid, [0, j, k], Axis::X, sets)?.len();
            }
        }
        debug!(
            "Corner transition level {} on {}x{}x{} nodes: {} elements",
            level, nx, ny, nz, created
        );

        floor = grid.window([3, 0, 3], [nx - 3, ny, 1]).sample([3, 3, 1]);
        wall = grid.window([3, 0, 3], [1, ny, nz - 3]).sample([1, 3, 3]);
    }

    let mut core = corner_grid(&floor, &wall)?;
    let filled = fill_box(mesh, &mut core, Axis::Z, ElementType::C3D8R, sets)?;
    debug!("Corner transition core {:?}: {} elements", core.dims(), filled.len());
    Ok(core)
}

/// Coarsens the region around a convex edge.
///
/// `line` runs along the axis that is neither `first.0` nor `second.0`;
/// the region grows from it along both given axes in their directions.
/// Every level places convex edge cells along the line and continues on
/// the coarse line three slots out along both axes. Returns that line.
pub fn create_transition_corner_out(
    mesh: &mut Mesh,
    line: &[NodeId],
    first: (Axis, Direction),
    second: (Axis, Direction),
    order: u32,
    sets: SetNames,
) -> MeshResult<Vec<NodeId>> {
    let line_axis = first.0.third(second.0)?;
    let (p_axis, q_axis) = line_axis.others();
    let sign_of = |axis: Axis| {
        if first.0 == axis {
            first.1.sign()
        } else {
            second.1.sign()
        }
    };
    let sizing = check_transition_size(line.len(), order);
    let levels = planned_levels(mesh, "Convex corner", order, sizing)?;

    let at = |p: usize, e: usize, q: usize| slot([(p_axis, p), (line_axis, e), (q_axis, q)]);
    let mut current = line.to_vec();
    for level in 0..levels {
        let n = current.len();

        let gap = spacing(mesh, current[0], current[1])?;
        let dp = p_axis.unit() * sign_of(p_axis) * gap;
        let dq = q_axis.unit() * sign_of(q_axis) * gap;
        let mut dims = [4; 3];
        dims[line_axis.index()] = n;
        let mut grid = NodeGrid::new(dims);
        for (e, &id) in current.iter().enumerate() {
            let base = mesh.position(id)?;
            grid.set(at(0, e, 0), id);
            grid.set(at(1, e, 0), mesh.create_node(base + dp, sets.node_set, None)?);
            grid.set(at(0, e, 1), mesh.create_node(base + dq, sets.node_set, None)?);
        }

        let mut created = 0;
        for e in (0..n - 1).step_by(3) {
            created += create_transition_cell_corner_out(mesh, &mut grid, at(0, e, 0), line_axis, sets)?
                .len();
        }
        debug!(
            "Convex corner transition level {} on {} nodes: {} elements",
            level, n, created
        );

        current = (0..n)
            .step_by(3)
            .map(|e| grid.require(at(3, e, 3)))
            .collect::<MeshResult<Vec<_>>>()?;
    }
    Ok(current)
}

fn axi_corner_grid(along_x: &[NodeId], along_y: &[NodeId]) -> NodeGrid {
    let mut grid = NodeGrid::new([along_x.len(), along_y.len(), 1]);
    for (i, &id) in along_x.iter().enumerate() {
        grid.set([i, 0, 0], id);
    }
    for (k, &id) in along_y.iter().enumerate() {
        grid.set([0, k, 0], id);
    }
    grid
}

/// Coarsens the region inside a concave corner of an axisymmetric mesh.
///
/// `line1` runs along x and `line2` along y, both starting from the corner
/// node. Each level places a corner cell, planar cells along both lines,
/// and moves diagonally onto the coarse lines three slots in. The region
/// left at the end is meshed with unit quads, and its node grid returned.
pub fn create_transition_corner_axi(
    mesh: &mut Mesh,
    line1: &[NodeId],
    line2: &[NodeId],
    order: u32,
    sets: SetNames,
) -> MeshResult<NodeGrid> {
    match (line1.first(), line2.first()) {
        (Some(a), Some(b)) if a == b => {}
        _ => {
            return Err(MeshError::invalid_dimensions(
                "axisymmetric corner lines must start at the same node",
            ))
        }
    }
    let sizing = check_corner_size(line1.len(), order)
        .and_then(|()| check_corner_size(line2.len(), order));
    let levels = planned_levels(mesh, "Axisymmetric corner", order, sizing)?;

    let mut along_x = line1.to_vec();
    let mut along_y = line2.to_vec();
    for level in 0..levels {
        let (nx, ny) = (along_x.len(), along_y.len());

        let mut grid = axi_corner_grid(&along_x, &along_y);
        let mut created = create_transition_corner_2d(mesh, &mut grid, [0, 0, 0], sets)?.len();
        for i in (3..nx - 1).step_by(3) {
            for di in [0, 3] {
                complete(mesh, &mut grid, [i + di, 3, 0], Axis::X, Axis::Y, sets.node_set)?;
            }
            created += create_transition_cell_2d(mesh, &mut grid, [i, 0, 0], Axis::Y, sets)?.len();
        }
        for k in (3..ny - 1).step_by(3) {
            for dk in [0, 3] {
                complete(mesh, &mut grid, [3, k + dk, 0], Axis::X, Axis::Y, sets.node_set)?;
            }
            created += create_transition_cell_2d(mesh, &mut grid, [0, k, 0], Axis::X, sets)?.len();
        }
        debug!(
            "Axisymmetric corner transition level {} on {}x{} nodes: {} elements",
            level, nx, ny, created
        );

        along_x = (3..nx)
            .step_by(3)
            .map(|i| grid.require([i, 3, 0]))
            .collect::<MeshResult<Vec<_>>>()?;
        along_y = (3..ny)
            .step_by(3)
            .map(|k| grid.require([3, k, 0]))
            .collect::<MeshResult<Vec<_>>>()?;
    }

    let mut core = axi_corner_grid(&along_x, &along_y);
    let filled = fill_box(mesh, &mut core, Axis::Y, ElementType::CAX4, sets)?;
    debug!(
        "Axisymmetric corner core {:?}: {} elements",
        core.dims(),
        filled.len()
    );
    Ok(core)
}
