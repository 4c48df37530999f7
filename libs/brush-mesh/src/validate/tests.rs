//! Tests for the brush validator.

use super::*;
use crate::mesh::tests::{box_mesh, mesh_from_loops};
use crate::mesh::{HalfEdge, Polygon};
use glam::DVec3;

fn unit_box() -> BrushMesh {
    box_mesh(DVec3::ZERO, DVec3::ONE)
}

/// Rebuilds `mesh` after letting `edit` change its polygons and half-edges.
fn edited(mesh: &BrushMesh, edit: impl FnOnce(&mut Vec<Polygon>, &mut Vec<HalfEdge>)) -> BrushMesh {
    let mut polygons = mesh.polygons().to_vec();
    let mut half_edges = mesh.half_edges().to_vec();
    edit(&mut polygons, &mut half_edges);
    BrushMesh::from_parts(mesh.vertices().to_vec(), polygons, half_edges)
}

fn check(mesh: &BrushMesh) -> ValidationResult<()> {
    mesh.validate_with(&MeshTolerances::default())
}

#[test]
fn box_is_valid() {
    let mesh = unit_box();
    assert!(mesh.validate());
    assert_eq!(check(&mesh), Ok(()));
}

#[test]
fn empty_mesh_is_rejected() {
    assert_eq!(check(&BrushMesh::empty()), Err(ValidationError::EmptyMesh));
}

#[test]
fn twin_of_twin_is_identity_on_valid_mesh() {
    let mesh = unit_box();
    for (edge, half_edge) in mesh.half_edges().iter().enumerate() {
        let twin = half_edge.twin_index.expect("closed box");
        assert_eq!(mesh.half_edges()[twin].twin_index, Some(edge));
    }
}

#[test]
fn invalid_vertex_index_is_rejected() {
    let mesh = edited(&unit_box(), |_, half_edges| half_edges[3].vertex_index = 42);
    assert_eq!(
        check(&mesh),
        Err(ValidationError::InvalidVertexIndex { edge: 3, vertex: 42 })
    );
}

#[test]
fn invalid_twin_index_is_rejected() {
    let mesh = edited(&unit_box(), |_, half_edges| half_edges[5].twin_index = Some(100));
    assert_eq!(
        check(&mesh),
        Err(ValidationError::InvalidTwinIndex { edge: 5, twin: 100 })
    );
}

#[test]
fn degenerate_polygon_is_rejected() {
    let mesh = edited(&unit_box(), |polygons, _| polygons[2].edge_count = 2);
    assert_eq!(
        check(&mesh),
        Err(ValidationError::DegeneratePolygon {
            polygon: 2,
            edge_count: 2
        })
    );
}

#[test]
fn edge_range_out_of_bounds_is_rejected() {
    let mesh = edited(&unit_box(), |polygons, _| polygons[5].first_edge = 22);
    assert!(matches!(
        check(&mesh),
        Err(ValidationError::EdgeRangeOutOfBounds { polygon: 5, end: 26, .. })
    ));
}

#[test]
fn shared_half_edge_is_rejected() {
    let mesh = edited(&unit_box(), |polygons, _| polygons[1].first_edge = 0);
    assert_eq!(
        check(&mesh),
        Err(ValidationError::SharedHalfEdge {
            edge: 0,
            first: 0,
            second: 1
        })
    );
}

#[test]
fn orphan_half_edge_is_rejected() {
    let mesh = edited(&unit_box(), |_, half_edges| half_edges.push(HalfEdge::new(0)));
    assert_eq!(check(&mesh), Err(ValidationError::OrphanHalfEdge { edge: 24 }));
}

#[test]
fn asymmetric_twin_is_rejected() {
    let mesh = edited(&unit_box(), |_, half_edges| half_edges[0].twin_index = Some(9));
    assert!(matches!(
        check(&mesh),
        Err(ValidationError::AsymmetricTwin { edge: 0, twin: 9, .. })
    ));
}

#[test]
fn twin_with_wrong_endpoints_is_rejected() {
    let mesh = edited(&unit_box(), |_, half_edges| {
        half_edges[0].twin_index = Some(1);
        half_edges[1].twin_index = Some(0);
    });
    assert_eq!(
        check(&mesh),
        Err(ValidationError::MismatchedTwin { edge: 0, twin: 1 })
    );
}

#[test]
fn open_boundary_needs_opt_in() {
    let mesh = edited(&unit_box(), |_, half_edges| {
        let twin = half_edges[0].twin_index.take().expect("closed box");
        half_edges[twin].twin_index = None;
    });
    assert_eq!(check(&mesh), Err(ValidationError::OpenBoundary { edge: 0 }));

    let tolerances = MeshTolerances::default().with_open_boundaries();
    assert_eq!(mesh.validate_with(&tolerances), Ok(()));
}

#[test]
fn non_planar_polygon_is_rejected() {
    let mut vertices = unit_box().vertices().to_vec();
    vertices[6].z += 0.5;
    let loops = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [3, 7, 6, 2],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    let mesh = mesh_from_loops(vertices, &loops);
    assert!(matches!(
        check(&mesh),
        Err(ValidationError::NonPlanarPolygon { polygon: 1, .. })
    ));
}

#[test]
fn looser_plane_tolerance_accepts_small_warp() {
    let mut vertices = unit_box().vertices().to_vec();
    vertices[6].z += 0.01;
    let loops = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [3, 7, 6, 2],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    let mesh = mesh_from_loops(vertices, &loops);
    assert!(!mesh.validate());

    let loose = MeshTolerances::new(0.1, 1.0e-9).expect("valid tolerances");
    assert_eq!(mesh.validate_with(&loose), Ok(()));
}

#[test]
fn inside_out_box_is_rejected() {
    let loops = [
        [1, 2, 3, 0],
        [7, 6, 5, 4],
        [4, 5, 1, 0],
        [2, 6, 7, 3],
        [3, 7, 4, 0],
        [5, 6, 2, 1],
    ];
    let mesh = mesh_from_loops(unit_box().vertices().to_vec(), &loops);
    assert!(matches!(
        check(&mesh),
        Err(ValidationError::NonPositiveVolume { .. })
    ));
}

#[test]
fn validated_returns_mesh_or_error() {
    assert!(unit_box().validated().is_ok());
    assert_eq!(
        BrushMesh::empty().validated(),
        Err(ValidationError::EmptyMesh)
    );
}
