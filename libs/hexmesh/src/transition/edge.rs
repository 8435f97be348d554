//! Concave edge transition cell.
//!
//! Local slots are `(p, e, q)`: `e` runs along the edge, the fine faces are
//! `p = 0` and `q = 0`. Next to the fine faces sits a band of unit hexes.
//! Beyond it, the `p = 3` side is closed by a middle hex, two end wedges and
//! a diagonal hex. The `q = 3` side is a prism of four hexes (two end
//! wedges, a middle hex and a diagonal hex) that does not fit around the
//! edge `(2, 0, 2)`–`(2, 3, 2)` on its own. It is pillowed: the prism is
//! rebuilt on private inner nodes and every outer face of the prism is
//! joined to its inner copy by one more hex.

use glam::DVec3;

use crate::element::ElementType;
use crate::error::{MeshError, MeshResult};
use crate::grid::NodeGrid;
use crate::mesh::Mesh;
use crate::node::{Axis, ElementId, NodeId};
use crate::sets::SetNames;

use super::{Cell, SOLID_WINDOW};

type Slot = [usize; 3];
type Table = [[[Option<NodeId>; 4]; 4]; 4];

/// Unit hexes hugging both fine faces, per slab along the edge.
const BAND: [(usize, usize); 6] = [(0, 0), (0, 1), (1, 0), (0, 2), (2, 0), (1, 1)];

/// Hexes closing the `p = 3` side.
const P_SIDE: [[Slot; 8]; 4] = [
    [[2, 1, 1], [3, 1, 1], [3, 1, 2], [2, 1, 2], [2, 2, 1], [3, 2, 1], [3, 2, 2], [2, 2, 2]],
    [[2, 0, 1], [3, 0, 1], [3, 0, 3], [2, 0, 2], [2, 1, 1], [3, 1, 1], [3, 1, 2], [2, 1, 2]],
    [[2, 3, 1], [3, 3, 1], [3, 3, 3], [2, 3, 2], [2, 2, 1], [3, 2, 1], [3, 2, 2], [2, 2, 2]],
    [[2, 1, 2], [2, 0, 2], [3, 0, 3], [3, 1, 2], [2, 2, 2], [2, 3, 2], [3, 3, 3], [3, 2, 2]],
];

/// Hexes of the pillowed prism on the `q = 3` side.
const PRISM: [[Slot; 8]; 4] = [
    [[1, 0, 2], [2, 0, 2], [3, 0, 3], [1, 0, 3], [1, 1, 2], [2, 1, 2], [2, 1, 3], [1, 1, 3]],
    [[1, 1, 2], [2, 1, 2], [2, 1, 3], [1, 1, 3], [1, 2, 2], [2, 2, 2], [2, 2, 3], [1, 2, 3]],
    [[1, 3, 2], [2, 3, 2], [3, 3, 3], [1, 3, 3], [1, 2, 2], [2, 2, 2], [2, 2, 3], [1, 2, 3]],
    [[2, 1, 2], [2, 0, 2], [3, 0, 3], [2, 1, 3], [2, 2, 2], [2, 3, 2], [3, 3, 3], [2, 2, 3]],
];

/// Faces of a hex given as two planes of four corners.
const HEX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Inner copies of the prism nodes at the `e = 0` end, in window steps.
/// The `e = 3` end mirrors them along the edge.
const PILLOW: [(Slot, [f64; 3]); 8] = [
    ([1, 0, 2], [1.2, 0.35, 2.25]),
    ([1, 0, 3], [1.3, 0.3, 2.55]),
    ([2, 0, 2], [1.9, 0.1, 2.05]),
    ([3, 0, 3], [2.6, 0.25, 2.8]),
    ([1, 1, 2], [1.15, 0.9, 2.1]),
    ([1, 1, 3], [1.35, 1.3, 2.8]),
    ([2, 1, 2], [1.6, 0.9, 2.0]),
    ([2, 1, 3], [1.95, 1.05, 2.8]),
];

/// How far the two diagonal nodes `(2, e, 2)` lean towards the `p = 3`
/// side, in window steps. On the `p = q` plane the diagonal hexes would
/// flatten at the edge ends.
const DIAGONAL_LEAN: f64 = 0.45;

fn pick<const N: usize>(table: &Table, slots: &[Slot; N]) -> MeshResult<[NodeId; N]> {
    let mut out = [NodeId(0); N];
    for (id, &[p, e, q]) in out.iter_mut().zip(slots) {
        *id = table[p][e][q]
            .ok_or_else(|| MeshError::incomplete([p, e, q], "edge cell slot left empty"))?;
    }
    Ok(out)
}

/// Faces of prism hexes not shared with another prism hex.
fn prism_hull() -> Vec<[Slot; 4]> {
    let mut hull = Vec::new();
    for (i, hex) in PRISM.iter().enumerate() {
        for face in HEX_FACES {
            let corners = face.map(|k| hex[k]);
            let shared = PRISM
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && corners.iter().all(|s| other.contains(s)));
            if !shared {
                hull.push(corners);
            }
        }
    }
    hull
}

/// Fills a 4×4×4 window straddling a concave edge with 40 hexes.
///
/// `axis` runs along the edge; `(p, q)` follow `axis.others()`. The two
/// fine faces `p = 0` and `q = 0` must be complete. The opposite faces
/// `p = 3` and `q = 3` come out coarse and match the side faces of
/// interior cells laid on the fine faces next to this one. The end faces
/// `e = 0` and `e = 3` carry the 8-quad corner pattern, so cells chained
/// along the edge share them. 16 inner nodes stay private to the cell.
pub fn create_transition_cell_corner(
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

    let base = cell.position([0, 0, 0])?;
    let steps = [
        cell.third_of(base, cell.position([3, 0, 0])?)?,
        cell.third_of(base, cell.position([0, 3, 0])?)?,
        cell.third_of(base, cell.position([0, 0, 3])?)?,
    ];
    let at = |[p, e, q]: [f64; 3]| -> DVec3 { base + steps[0] * p + steps[1] * e + steps[2] * q };

    let mut nodes: Table = [[[None; 4]; 4]; 4];
    for e in 0..4 {
        let mut wanted = vec![(1, 1), (1, 2), (1, 3), (2, 1), (3, 1), (2, 2)];
        if e == 0 || e == 3 {
            wanted.push((3, 3));
        } else {
            wanted.extend([(2, 3), (3, 2)]);
        }
        for q in 0..4 {
            nodes[0][e][q] = Some(cell.existing([0, e, q])?);
        }
        for p in 1..4 {
            nodes[p][e][0] = Some(cell.existing([p, e, 0])?);
        }
        for (p, q) in wanted {
            let mut position = cell.position([0, e, q])? + steps[0] * p as f64;
            if (p, q) == (2, 2) && e != 0 && e != 3 {
                position += (steps[0] - steps[2]) * DIAGONAL_LEAN;
            }
            nodes[p][e][q] = Some(cell.node([p, e, q], position)?);
        }
    }

    let mut inner: Table = [[[None; 4]; 4]; 4];
    for ([p, e, q], [u, v, w]) in PILLOW {
        inner[p][e][q] = Some(cell.private_node(at([u, v, w]))?);
        inner[p][3 - e][q] = Some(cell.private_node(at([u, 3.0 - v, w]))?);
    }

    for e in 0..3 {
        for (p, q) in BAND {
            cell.element(&pick(
                &nodes,
                &[
                    [p, e, q],
                    [p + 1, e, q],
                    [p + 1, e, q + 1],
                    [p, e, q + 1],
                    [p, e + 1, q],
                    [p + 1, e + 1, q],
                    [p + 1, e + 1, q + 1],
                    [p, e + 1, q + 1],
                ],
            )?)?;
        }
    }
    for hex in &P_SIDE {
        cell.element(&pick(&nodes, hex)?)?;
    }
    for hex in &PRISM {
        cell.element(&pick(&inner, hex)?)?;
    }
    for face in prism_hull() {
        cell.element(&[pick(&nodes, &face)?, pick(&inner, &face)?])?;
    }

    Ok(cell.finish())
}
