//! Node-conformity checks over whole transition regions: no two nodes share
//! a position, no node sits inside an element edge it is not a corner of,
//! and the elements fill their region exactly without folding.

use approx::assert_relative_eq;
use glam::DVec3;
use hexmesh::{
    create_block, create_block_axi, create_transition_corner, create_transition_corner_axi,
    create_transition_corner_out, create_transition_line_axi, create_transition_plate, Axis,
    BlockSpec, Direction, ElementShape, Mesh, NodeGrid, NodeId, SetNames,
};

const TOLERANCE: f64 = 1.0e-9;

fn assert_distinct_positions(mesh: &Mesh) {
    let points: Vec<DVec3> = mesh.nodes().map(|n| n.position).collect();
    for (a, p) in points.iter().enumerate() {
        for q in &points[a + 1..] {
            assert!(p.distance(*q) > TOLERANCE, "coincident nodes at {p:?}");
        }
    }
}

/// Corner pairs forming the edges of an element in solver order.
fn edges(shape: ElementShape) -> Vec<(usize, usize)> {
    let n = shape.corners_per_plane();
    let mut out = Vec::new();
    for r in 0..n {
        out.push((r, (r + 1) % n));
        if shape.plane_count() == 2 {
            out.push((r + n, (r + 1) % n + n));
            out.push((r, r + n));
        }
    }
    out
}

fn assert_no_hanging_nodes(mesh: &Mesh) {
    let points: Vec<(NodeId, DVec3)> = mesh.nodes().map(|n| (n.label(), n.position)).collect();
    for element in mesh.elements() {
        let corners = element.nodes();
        for (a, b) in edges(element.element_type().shape()) {
            let pa = mesh.position(corners[a]).unwrap();
            let pb = mesh.position(corners[b]).unwrap();
            let length = pa.distance(pb);
            assert!(length > TOLERANCE, "element {} has a collapsed edge", element.label());
            for &(id, p) in &points {
                if id == corners[a] || id == corners[b] {
                    continue;
                }
                let detour = p.distance(pa) + p.distance(pb) - length;
                assert!(
                    detour > TOLERANCE,
                    "node {id} hangs on edge {}-{} of element {}",
                    corners[a],
                    corners[b],
                    element.label()
                );
            }
        }
    }
}

fn assert_conforming(mesh: &Mesh) {
    assert_distinct_positions(mesh);
    assert_no_hanging_nodes(mesh);
}

/// Corners of each hex face in solver order, wound outwards.
const HEX_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Summed hex volume or quad area of the whole mesh. Fails on any corner
/// whose Jacobian is not positive.
fn measure(mesh: &Mesh) -> f64 {
    let mut total = 0.0;
    for element in mesh.elements() {
        let p: Vec<DVec3> = element
            .nodes()
            .iter()
            .map(|&n| mesh.position(n).unwrap())
            .collect();
        let label = element.label();
        match element.element_type().shape() {
            ElementShape::Hex8 => {
                for r in 0..4 {
                    let (next, prev) = ((r + 1) % 4, (r + 3) % 4);
                    let up = p[r + 4] - p[r];
                    let bottom = (p[next] - p[r]).cross(p[prev] - p[r]).dot(up);
                    let top = (p[next + 4] - p[r + 4]).cross(p[prev + 4] - p[r + 4]).dot(up);
                    assert!(bottom > 0.0 && top > 0.0, "element {label} folds at corner {r}");
                }
                let center = p.iter().sum::<DVec3>() / 8.0;
                for face in HEX_FACES {
                    let mid = face.iter().map(|&k| p[k]).sum::<DVec3>() / 4.0;
                    for n in 0..4 {
                        let a = p[face[n]] - center;
                        let b = p[face[(n + 1) % 4]] - center;
                        total += a.cross(b).dot(mid - center) / 6.0;
                    }
                }
            }
            ElementShape::Quad4 => {
                for r in 0..4 {
                    let (next, prev) = ((r + 1) % 4, (r + 3) % 4);
                    let turn = (p[next] - p[r]).cross(p[prev] - p[r]).z;
                    assert!(turn > 0.0, "element {label} folds at corner {r}");
                    total += (p[r].x * p[next].y - p[next].x * p[r].y) / 2.0;
                }
            }
            ElementShape::Wedge6 => panic!("element {label} is a wedge"),
        }
    }
    total
}

#[test]
fn test_plate_on_block_is_conforming() {
    let mut mesh = Mesh::new();
    let block = create_block(&mut mesh, &BlockSpec::new([10, 10, 2], DVec3::ONE)).unwrap();
    let coarse = create_transition_plate(
        &mut mesh,
        &block.face(Axis::Z, true),
        Axis::Z,
        2,
        Direction::Positive,
        SetNames::NONE,
    )
    .unwrap();
    assert_eq!(coarse.dims(), [2, 2, 1]);
    assert_relative_eq!(measure(&mesh), 81.0 + 9.0 * 27.0 + 729.0, epsilon = 1e-9);
    assert_conforming(&mesh);
}

#[test]
fn test_plate_under_block_is_conforming() {
    let mut mesh = Mesh::new();
    let block = create_block(&mut mesh, &BlockSpec::new([7, 2, 4], DVec3::splat(0.25))).unwrap();
    create_transition_plate(
        &mut mesh,
        &block.face(Axis::Y, false),
        Axis::Y,
        1,
        Direction::Negative,
        SetNames::NONE,
    )
    .unwrap();
    // Block of 6x1x3 cells and two transition cells, all at spacing 0.25
    let cube = 0.25f64.powi(3);
    assert_relative_eq!(measure(&mesh), (18.0 + 2.0 * 27.0) * cube, epsilon = 1e-12);
    assert_conforming(&mesh);
}

#[test]
fn test_corner_region_is_conforming() {
    let mut mesh = Mesh::new();
    let n = 7;
    let mut grid = NodeGrid::new([n, n, n]);
    for i in 0..n {
        for j in 0..n {
            for (idx, p) in [
                ([i, j, 0], DVec3::new(i as f64, j as f64, 0.0)),
                ([0, i, j], DVec3::new(0.0, i as f64, j as f64)),
            ] {
                if grid.get(idx).is_none() {
                    grid.set(idx, mesh.create_node(p, None, None).unwrap());
                }
            }
        }
    }
    let core = create_transition_corner(
        &mut mesh,
        &grid.face(Axis::Z, 0),
        &grid.face(Axis::X, 0),
        1,
        SetNames::NONE,
    )
    .unwrap();
    assert_eq!(core.dims(), [2, 3, 2]);
    assert_relative_eq!(measure(&mesh), 216.0, epsilon = 1e-9);
    assert_conforming(&mesh);
}

#[test]
fn test_convex_corner_is_conforming() {
    let mut mesh = Mesh::new();
    let line: Vec<NodeId> = (0..10)
        .map(|k| {
            mesh.create_node(DVec3::new(0.0, 0.0, k as f64 * 0.5), None, None)
                .unwrap()
        })
        .collect();
    create_transition_corner_out(
        &mut mesh,
        &line,
        (Axis::X, Direction::Negative),
        (Axis::Y, Direction::Positive),
        2,
        SetNames::NONE,
    )
    .unwrap();
    // Three cells at spacing 0.5, then one at 1.5, along a 4.5 long line
    assert_relative_eq!(measure(&mesh), 1.5 * 1.5 * 4.5 + 4.5 * 4.5 * 4.5, epsilon = 1e-9);
    assert_conforming(&mesh);
}

#[test]
fn test_axisymmetric_transitions_are_conforming() {
    let mut mesh = Mesh::new();
    let block = create_block_axi(&mut mesh, &BlockSpec::new([10, 3, 1], DVec3::ONE)).unwrap();
    let line = block.face(Axis::Y, true).nodes();
    let coarse =
        create_transition_line_axi(&mut mesh, &line, Axis::Y, 2, Direction::Positive, SetNames::NONE)
            .unwrap();
    assert_eq!(coarse.len(), 2);
    assert_relative_eq!(measure(&mesh), 18.0 + 3.0 * 9.0 + 81.0, epsilon = 1e-9);
    assert_conforming(&mesh);

    let mut mesh = Mesh::new();
    let corner = mesh.create_node(DVec3::ZERO, None, None).unwrap();
    let mut along_x = vec![corner];
    let mut along_y = vec![corner];
    for n in 1..13 {
        let d = n as f64;
        along_x.push(mesh.create_node(DVec3::new(d, 0.0, 0.0), None, None).unwrap());
        along_y.push(mesh.create_node(DVec3::new(0.0, d, 0.0), None, None).unwrap());
    }
    create_transition_corner_axi(&mut mesh, &along_x, &along_y, 2, SetNames::NONE).unwrap();
    assert_relative_eq!(measure(&mesh), 144.0, epsilon = 1e-9);
    assert_conforming(&mesh);
}
