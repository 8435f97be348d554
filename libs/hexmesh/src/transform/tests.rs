use super::*;
use approx::assert_relative_eq;
use std::f64::consts::PI;

use crate::block::{create_block, BlockSpec};
use crate::sets::SetNames;

fn patch(mesh: &mut Mesh) {
    let spec = BlockSpec::new([4, 4, 2], DVec3::ONE).with_sets(SetNames::new("patch", "patch"));
    create_block(mesh, &spec).unwrap();
}

fn positions(mesh: &Mesh, set: &str) -> Vec<DVec3> {
    mesh.node_set(set)
        .unwrap()
        .iter()
        .map(|&id| mesh.position(id).unwrap())
        .collect()
}

#[test]
fn test_frame_axes() {
    let frame = RotationFrame::new(Axis::Y, Axis::Z).unwrap();
    assert_eq!(frame.rotation_axis(), Axis::Y);
    assert_eq!(frame.radial_axis(), Axis::Z);
    assert_eq!(frame.tangential_axis(), Axis::X);
    assert!(matches!(
        RotationFrame::new(Axis::X, Axis::X),
        Err(MeshError::InvalidAxis { .. })
    ));
}

#[test]
fn test_cylinder_zero_angle_is_identity() {
    let mut mesh = Mesh::new();
    patch(&mut mesh);
    let before = positions(&mesh, "patch");
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    transform_square_to_cylinder(&mut mesh, "patch", frame, 0.0, None).unwrap();
    for (a, b) in before.iter().zip(positions(&mesh, "patch")) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }
}

#[test]
fn test_cylinder_small_angle_jumps_to_radial_axis() {
    let mut mesh = Mesh::new();
    let n = mesh
        .create_node(DVec3::new(3.0, 4.0, 0.0), Some("outer"), None)
        .unwrap();
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    let angle = 1.0e-6;
    transform_square_to_cylinder(&mut mesh, "outer", frame, angle, None).unwrap();

    // Alone in its set, the node sits at r_max and takes the full warp
    let theta = (4.0 / 3.0) * angle / 2.0;
    let p = mesh.position(n).unwrap();
    assert_relative_eq!(p.x, 5.0 * theta.cos(), epsilon = 1e-12);
    assert_relative_eq!(p.y, 5.0 * theta.sin(), epsilon = 1e-12);
    assert!(p.y < 1.0e-5);

    // Below the comparison threshold the angle counts as zero
    transform_square_to_cylinder(&mut mesh, "outer", frame, 1.0e-12, None).unwrap();
    assert_eq!(mesh.position(n).unwrap(), p);
}

#[test]
fn test_sector_maps_to_radius() {
    let mut mesh = Mesh::new();
    let n = mesh
        .create_node(DVec3::new(3.0, 4.0, 0.0), Some("s"), None)
        .unwrap();
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    transform_square_to_sector(&mut mesh, "s", frame, PI).unwrap();

    let theta = (4.0 / 3.0) * (PI / 2.0);
    let p = mesh.position(n).unwrap();
    assert_relative_eq!(p.x, 5.0 * theta.cos(), epsilon = 1e-12);
    assert_relative_eq!(p.y, 5.0 * theta.sin(), epsilon = 1e-12);
    assert_relative_eq!(p.z, 0.0);
}

#[test]
fn test_sector_keeps_rotation_coordinate() {
    let mut mesh = Mesh::new();
    patch(&mut mesh);
    let before = positions(&mesh, "patch");
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    transform_square_to_sector(&mut mesh, "patch", frame, PI / 2.0).unwrap();
    for (a, b) in before.iter().zip(positions(&mesh, "patch")) {
        assert_eq!(a.z, b.z);
        // Radius is preserved
        assert_relative_eq!(a.truncate().length(), b.truncate().length(), epsilon = 1e-12);
    }
}

#[test]
fn test_cylinder_blend_scales_with_radius() {
    let mut mesh = Mesh::new();
    let outer = mesh
        .create_node(DVec3::new(2.0, 2.0, 0.0), Some("c"), None)
        .unwrap();
    let inner = mesh
        .create_node(DVec3::new(1.0, 1.0, 0.0), Some("c"), None)
        .unwrap();
    let axis = mesh.create_node(DVec3::ZERO, Some("c"), None).unwrap();
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    let angle = PI / 3.0;
    transform_square_to_cylinder(&mut mesh, "c", frame, angle, Some(1.0)).unwrap();

    // Diagonal nodes target angle/2 at their own radius
    let theta = angle / 2.0;
    let r_outer = 8.0_f64.sqrt();
    let p = mesh.position(outer).unwrap();
    assert_relative_eq!(p.x, r_outer * theta.cos(), epsilon = 1e-12);
    assert_relative_eq!(p.y, r_outer * theta.sin(), epsilon = 1e-12);

    // Half the radius, half the displacement with f = 1
    let r_inner = 2.0_f64.sqrt();
    let q = mesh.position(inner).unwrap();
    assert_relative_eq!(q.x, 1.0 + 0.5 * (r_inner * theta.cos() - 1.0), epsilon = 1e-12);
    assert_relative_eq!(q.y, 1.0 + 0.5 * (r_inner * theta.sin() - 1.0), epsilon = 1e-12);

    assert_eq!(mesh.position(axis).unwrap(), DVec3::ZERO);
}

#[test]
fn test_cylinder_uses_config_exponent() {
    let mut a = Mesh::new();
    let mut b = Mesh::new();
    for mesh in [&mut a, &mut b] {
        mesh.create_node(DVec3::new(4.0, 4.0, 0.0), Some("c"), None).unwrap();
        mesh.create_node(DVec3::new(1.0, 2.0, 0.0), Some("c"), None).unwrap();
    }
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    transform_square_to_cylinder(&mut a, "c", frame, 0.4, None).unwrap();
    transform_square_to_cylinder(&mut b, "c", frame, 0.4, Some(0.75)).unwrap();
    assert_eq!(positions(&a, "c"), positions(&b, "c"));
}

#[test]
fn test_sweep_block() {
    let mut mesh = Mesh::new();
    let on_axis = mesh
        .create_node(DVec3::new(2.0, 0.0, 1.0), Some("w"), None)
        .unwrap();
    let mid = mesh
        .create_node(DVec3::new(2.0, 1.5, 0.0), Some("w"), None)
        .unwrap();
    let end = mesh
        .create_node(DVec3::new(-2.0, 3.0, 0.0), Some("w"), None)
        .unwrap();
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    sweep_block(&mut mesh, "w", frame, PI / 2.0).unwrap();

    let p = mesh.position(on_axis).unwrap();
    assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(p.y, 2.0, epsilon = 1e-12);
    assert_relative_eq!(p.z, 1.0);

    let q = mesh.position(mid).unwrap();
    assert_relative_eq!(q.x, 2.0_f64.sqrt(), epsilon = 1e-12);
    assert_relative_eq!(q.y, 2.0_f64.sqrt(), epsilon = 1e-12);

    let e = mesh.position(end).unwrap();
    assert_relative_eq!(e.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(e.y, 2.0, epsilon = 1e-12);
}

#[test]
fn test_duplicate_members_moved_once() {
    let mut mesh = Mesh::new();
    let n = mesh.create_node(DVec3::new(3.0, 4.0, 0.0), Some("d"), None).unwrap();
    mesh.add_to_node_set("d", &n).unwrap();
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    transform_square_to_sector(&mut mesh, "d", frame, PI).unwrap();
    assert_relative_eq!(mesh.position(n).unwrap().length(), 5.0, epsilon = 1e-12);
    let theta = (4.0 / 3.0) * (PI / 2.0);
    assert_relative_eq!(mesh.position(n).unwrap().x, 5.0 * theta.cos(), epsilon = 1e-12);
}

#[test]
fn test_unknown_set() {
    let mut mesh = Mesh::new();
    let frame = RotationFrame::new(Axis::Z, Axis::X).unwrap();
    assert!(matches!(
        sweep_block(&mut mesh, "missing", frame, 1.0),
        Err(MeshError::UnknownSet(_))
    ));
    let empty: [NodeId; 0] = [];
    mesh.add_to_node_set("empty", &empty).unwrap();
    assert!(matches!(
        transform_square_to_sector(&mut mesh, "empty", frame, 1.0),
        Err(MeshError::UnknownSet(_))
    ));
}
