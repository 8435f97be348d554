use super::*;
use approx::assert_relative_eq;

#[test]
fn test_unit_block_labels_and_counts() {
    let mut mesh = Mesh::new();
    let block = create_block(&mut mesh, &BlockSpec::new([2, 2, 2], DVec3::ONE)).unwrap();
    assert_eq!(mesh.node_count(), 8);
    assert_eq!(mesh.element_count(), 1);

    let mut labels = block.nodes.nodes();
    labels.sort();
    assert_eq!(labels, (1..=8).map(NodeId).collect::<Vec<_>>());

    let element = mesh.element(block.elements[0]).unwrap();
    assert_eq!(element.element_type(), ElementType::C3D8R);
    let mut used = element.nodes().to_vec();
    used.sort();
    assert_eq!(used, labels);
}

#[test]
fn test_unit_block_corner_positions() {
    let mut mesh = Mesh::new();
    let block = create_block(&mut mesh, &BlockSpec::new([2, 2, 2], DVec3::ONE)).unwrap();
    for (idx, id) in block.nodes.iter() {
        let expected = DVec3::new(idx[0] as f64, idx[1] as f64, idx[2] as f64);
        assert_eq!(mesh.position(id).unwrap(), expected);
    }
}

#[test]
fn test_block_counts() {
    let mut mesh = Mesh::new();
    let block = create_block(&mut mesh, &BlockSpec::new([4, 3, 5], DVec3::splat(0.5))).unwrap();
    assert_eq!(mesh.node_count(), 4 * 3 * 5);
    assert_eq!(block.elements.len(), 3 * 2 * 4);
    assert_eq!(mesh.elements_of_type(ElementType::C3D8R).len(), 24);
}

#[test]
fn test_block_bounding_box_with_origin() {
    let mut mesh = Mesh::new();
    let spec = BlockSpec::new([3, 2, 4], DVec3::new(1.0, 2.0, 0.5))
        .with_origin(DVec3::new(-1.0, 1.0, 2.0))
        .with_sets(SetNames::new("block_nodes", "block"));
    create_block(&mut mesh, &spec).unwrap();
    let (min, max) = mesh.bounding_box(Some("block_nodes")).unwrap();
    assert_eq!(min, DVec3::new(-1.0, 1.0, 2.0));
    assert_relative_eq!(max.x, 1.0);
    assert_relative_eq!(max.y, 3.0);
    assert_relative_eq!(max.z, 3.5);
    assert_eq!(mesh.element_set("block").unwrap().len(), 2 * 1 * 3);
}

#[test]
fn test_stitching_reuses_plane() {
    let mut mesh = Mesh::new();
    let first = create_block(&mut mesh, &BlockSpec::new([3, 3, 3], DVec3::ONE)).unwrap();
    let before = mesh.node_count();

    let boundary = BoundaryPlanes {
        x_neg: Some(first.face(Axis::X, true)),
        ..Default::default()
    };
    let second = create_block(
        &mut mesh,
        &BlockSpec::new([4, 3, 3], DVec3::ONE).with_boundary(boundary),
    )
    .unwrap();

    // 4x3x3 lattice minus the shared 3x3 plane
    assert_eq!(mesh.node_count() - before, 4 * 3 * 3 - 9);
    for j in 0..3 {
        for k in 0..3 {
            assert_eq!(second.nodes.get([0, j, k]), first.nodes.get([2, j, k]));
        }
    }
    // Origin along x follows the plane
    let far = second.nodes.get([3, 0, 0]).unwrap();
    assert_relative_eq!(mesh.position(far).unwrap().x, 5.0);
}

#[test]
fn test_positive_plane_rederives_origin() {
    let mut mesh = Mesh::new();
    let top = create_block(
        &mut mesh,
        &BlockSpec::new([2, 2, 2], DVec3::ONE).with_origin(DVec3::new(0.0, 0.0, 10.0)),
    )
    .unwrap();
    let boundary = BoundaryPlanes {
        z_pos: Some(top.face(Axis::Z, false)),
        ..Default::default()
    };
    let below = create_block(
        &mut mesh,
        &BlockSpec::new([2, 2, 3], DVec3::new(1.0, 1.0, 2.0)).with_boundary(boundary),
    )
    .unwrap();
    let bottom = below.nodes.get([0, 0, 0]).unwrap();
    assert_relative_eq!(mesh.position(bottom).unwrap().z, 6.0);
    assert_eq!(mesh.node_count(), 8 + 8);
}

#[test]
fn test_plane_shape_mismatch() {
    let mut mesh = Mesh::new();
    let small = create_block(&mut mesh, &BlockSpec::new([2, 2, 2], DVec3::ONE)).unwrap();
    let boundary = BoundaryPlanes {
        x_neg: Some(small.face(Axis::X, true)),
        ..Default::default()
    };
    let result = create_block(
        &mut mesh,
        &BlockSpec::new([2, 3, 2], DVec3::ONE).with_boundary(boundary),
    );
    assert!(matches!(result, Err(MeshError::PlaneShape { .. })));
}

#[test]
fn test_invalid_dimensions() {
    let mut mesh = Mesh::new();
    assert!(matches!(
        create_block(&mut mesh, &BlockSpec::new([0, 2, 2], DVec3::ONE)),
        Err(MeshError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        create_block(&mut mesh, &BlockSpec::new([2, 2, 2], DVec3::new(1.0, 0.0, 1.0))),
        Err(MeshError::InvalidDimensions { .. })
    ));
    assert_eq!(mesh.node_count(), 0);
}

#[test]
fn test_block_rejects_quad_type() {
    let mut mesh = Mesh::new();
    let spec = BlockSpec::new([2, 2, 2], DVec3::ONE).with_element_type(ElementType::CAX4);
    assert!(matches!(
        create_block(&mut mesh, &spec),
        Err(MeshError::UnsupportedElementType { .. })
    ));
}

#[test]
fn test_axi_block() {
    let mut mesh = Mesh::new();
    let block = create_block_axi(&mut mesh, &BlockSpec::new([4, 3, 1], DVec3::ONE)).unwrap();
    assert_eq!(mesh.node_count(), 12);
    assert_eq!(block.elements.len(), 6);
    assert_eq!(mesh.elements_of_type(ElementType::CAX4).len(), 6);
    assert!(matches!(
        create_block_axi(&mut mesh, &BlockSpec::new([2, 2, 2], DVec3::ONE)),
        Err(MeshError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_axi_block_stitching() {
    let mut mesh = Mesh::new();
    let left = create_block_axi(&mut mesh, &BlockSpec::new([3, 4, 1], DVec3::ONE)).unwrap();
    let boundary = BoundaryPlanes {
        x_neg: Some(left.face(Axis::X, true)),
        ..Default::default()
    };
    create_block_axi(
        &mut mesh,
        &BlockSpec::new([2, 4, 1], DVec3::ONE)
            .with_boundary(boundary)
            .with_element_type(ElementType::DCAX4),
    )
    .unwrap();
    assert_eq!(mesh.node_count(), 12 + 4);
    assert_eq!(mesh.elements_of_type(ElementType::DCAX4).len(), 3);
}

#[test]
fn test_copy_node_plane() {
    let mut mesh = Mesh::new();
    let block = create_block(&mut mesh, &BlockSpec::new([2, 3, 2], DVec3::ONE)).unwrap();
    let face = block.face(Axis::X, true);
    let copy = copy_node_plane(&mut mesh, &face, Axis::X, 2.5, Some("copy")).unwrap();
    assert_eq!(copy.dims(), face.dims());
    assert_eq!(mesh.node_set("copy").unwrap().len(), 6);
    for ((_, src), (_, dst)) in face.iter().zip(copy.iter()) {
        let delta = mesh.position(dst).unwrap() - mesh.position(src).unwrap();
        assert_relative_eq!(delta.x, 2.5);
        assert_relative_eq!(delta.y, 0.0);
        assert_relative_eq!(delta.z, 0.0);
    }
}
