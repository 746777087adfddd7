//! Tests for geometry assembly.

use super::*;
use crate::material::{MaterialOverride, UvOverride};
use approx::assert_relative_eq;
use config::constants::ConfigError;
use prim_mesher::{Coord, MesherError, TOP_FACE_NUMBER as TOP_FACET};

fn stone() -> FaceMaterials {
    FaceMaterials {
        default_texture: "stone".to_string(),
        ..FaceMaterials::default()
    }
}

// =============================================================================
// FINITE CHECK
// =============================================================================

#[test]
fn test_check_accepts_finite_faces() {
    let mesh = build_prim_mesh(&PrimShape::cylinder(), &MesherConfig::default()).unwrap();
    assert!(check_viewer_faces(&mesh.viewer_faces).is_ok());
}

#[test]
fn test_check_names_first_bad_face() {
    let mut faces = vec![ViewerFace::default(); 3];
    faces[1].v[2] = Coord::new(0.0, f64::NAN, 0.0);
    faces[2].v[0] = Coord::splat(f64::INFINITY);
    assert_eq!(
        check_viewer_faces(&faces),
        Err(GeometryError::NonFiniteCoordinate { face: 1 })
    );
}

#[test]
fn test_check_ignores_normals() {
    let mut faces = vec![ViewerFace::default()];
    faces[0].n[0] = Coord::splat(f64::NAN);
    assert!(check_viewer_faces(&faces).is_ok());
}

// =============================================================================
// ASSEMBLY
// =============================================================================

#[test]
fn test_cube_single_submesh() {
    let geometry =
        create_prim_geometry(&PrimShape::cube(), &stone(), &MesherConfig::default()).unwrap();
    assert_eq!(geometry.submeshes.len(), 1);
    assert_eq!(geometry.submeshes[0].material, "stonevcol");
    assert_eq!(geometry.triangle_count(), 12);
    assert_eq!(geometry.vertex_count(), 36);
}

#[test]
fn test_indices_are_sequential_per_submesh() {
    let mut materials = stone();
    materials.textures.insert(2, "wood".to_string());
    let geometry =
        create_prim_geometry(&PrimShape::cube(), &materials, &MesherConfig::default()).unwrap();

    for submesh in &geometry.submeshes {
        let expected: Vec<u32> = (0..submesh.vertices.len() as u32).collect();
        assert_eq!(submesh.indices, expected);
    }
}

#[test]
fn test_material_runs_split_submeshes() {
    let mut materials = stone();
    materials.textures.insert(2, "wood".to_string());
    let geometry =
        create_prim_geometry(&PrimShape::cube(), &materials, &MesherConfig::default()).unwrap();

    // Bottom cap and first side, the wood side, then the rest.
    let names: Vec<&str> = geometry
        .submeshes
        .iter()
        .map(|s| s.material.as_str())
        .collect();
    assert_eq!(names, ["stonevcol", "woodvcol", "stonevcol"]);
    let triangles: Vec<usize> = geometry
        .submeshes
        .iter()
        .map(Submesh::triangle_count)
        .collect();
    assert_eq!(triangles, [4, 2, 6]);
}

#[test]
fn test_transparent_faces_are_skipped() {
    let mut materials = stone();
    materials.colors.insert(0, Color::new(1.0, 1.0, 1.0, 0.11));
    let geometry =
        create_prim_geometry(&PrimShape::cube(), &materials, &MesherConfig::default()).unwrap();
    assert_eq!(geometry.triangle_count(), 10);
}

#[test]
fn test_translucent_faces_use_alpha_material() {
    let mut materials = stone();
    materials.default_color = Color::new(0.2, 0.4, 0.6, 0.5);
    let geometry =
        create_prim_geometry(&PrimShape::cube(), &materials, &MesherConfig::default()).unwrap();
    assert_eq!(geometry.submeshes.len(), 1);
    assert_eq!(geometry.submeshes[0].material, "stonevcolalpha");
    let vertex = geometry.submeshes[0].vertices[0];
    assert_eq!(vertex.color, [0.2, 0.4, 0.6, 0.5]);
}

#[test]
fn test_fully_transparent_prim_is_empty() {
    let mut materials = stone();
    materials.default_color = Color::new(1.0, 1.0, 1.0, 0.0);
    let geometry =
        create_prim_geometry(&PrimShape::torus(), &materials, &MesherConfig::default()).unwrap();
    assert!(geometry.is_empty());
}

#[test]
fn test_override_material_names_every_submesh() {
    let mut materials = stone();
    materials.textures.insert(2, "wood".to_string());
    materials.material_override = Some(MaterialOverride {
        name: "Chrome".to_string(),
        available: true,
    });
    let geometry =
        create_prim_geometry(&PrimShape::cube(), &materials, &MesherConfig::default()).unwrap();
    assert_eq!(geometry.submeshes.len(), 1);
    assert_eq!(geometry.submeshes[0].material, "Chrome");
}

#[test]
fn test_uv_override_applied_per_facet() {
    let mut materials = stone();
    materials.uv_overrides.insert(
        TOP_FACET,
        UvOverride {
            offset_u: Some(0.25),
            ..UvOverride::default()
        },
    );
    let shape = PrimShape::cube();
    let config = MesherConfig::default();
    let mesh = build_prim_mesh(&shape, &config).unwrap();
    let geometry = create_prim_geometry(&shape, &materials, &config).unwrap();

    // One submesh keeps face order, three vertices per face.
    let vertices = &geometry.submeshes[0].vertices;
    for (i, face) in mesh.viewer_faces.iter().enumerate() {
        let shift = if face.prim_face_number == TOP_FACET { 0.25 } else { 0.0 };
        for corner in 0..3 {
            let vertex = vertices[i * 3 + corner];
            assert_relative_eq!(
                f64::from(vertex.uv.x),
                face.uv[corner].u + shift,
                epsilon = 1e-5
            );
            assert_relative_eq!(f64::from(vertex.position.z), face.v[corner].z, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_rotation_override_keeps_default_repeat() {
    let mut materials = stone();
    materials.default_uv = UvTransform {
        repeat_u: 2.0,
        repeat_v: 2.0,
        ..UvTransform::default()
    };
    materials
        .uv_overrides
        .insert(TOP_FACET, UvOverride::rotation(std::f64::consts::PI));
    let shape = PrimShape::cube();
    let config = MesherConfig::default();
    let mesh = build_prim_mesh(&shape, &config).unwrap();
    let geometry = create_prim_geometry(&shape, &materials, &config).unwrap();

    let vertices = &geometry.submeshes[0].vertices;
    for (i, face) in mesh.viewer_faces.iter().enumerate() {
        for corner in 0..3 {
            let uv = face.uv[corner];
            // A half turn mirrors about the centre; the repeat still applies.
            let expected = if face.prim_face_number == TOP_FACET {
                (0.5 - 2.0 * (uv.u - 0.5), 0.5 - 2.0 * (uv.v - 0.5))
            } else {
                (0.5 + 2.0 * (uv.u - 0.5), 0.5 + 2.0 * (uv.v - 0.5))
            };
            let vertex = vertices[i * 3 + corner];
            assert_relative_eq!(f64::from(vertex.uv.x), expected.0, epsilon = 1e-5);
            assert_relative_eq!(f64::from(vertex.uv.y), expected.1, epsilon = 1e-5);
        }
    }
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_invalid_config_is_rejected() {
    let config = MesherConfig {
        steps_per_revolution: 0,
        ..MesherConfig::default()
    };
    assert_eq!(
        create_prim_geometry(&PrimShape::torus(), &stone(), &config),
        Err(GeometryError::InvalidConfig(
            ConfigError::InvalidStepsPerRevolution(0)
        ))
    );
}

#[test]
fn test_non_finite_shape_abandons_build() {
    let shape = PrimShape {
        path_shear_x: f64::INFINITY,
        ..PrimShape::cube()
    };
    let result = create_prim_geometry(&shape, &stone(), &MesherConfig::default());
    assert!(matches!(
        result,
        Err(GeometryError::Mesher(MesherError::NonFiniteParameter {
            name: "top_shear_x",
            ..
        }))
    ));
    assert_eq!(
        build_geometry_logged(&shape, &stone(), &MesherConfig::default()),
        None
    );
}

#[test]
fn test_nan_shear_torus_returns_error() {
    let shape = PrimShape {
        path_shear_y: f64::NAN,
        ..PrimShape::torus()
    };
    let result = create_prim_geometry(&shape, &stone(), &MesherConfig::default());
    assert!(matches!(
        result,
        Err(GeometryError::Mesher(MesherError::NonFiniteParameter { .. }))
    ));
}

#[test]
fn test_infinite_twist_returns_error() {
    let shape = PrimShape {
        path_twist: f64::INFINITY,
        ..PrimShape::cube()
    };
    assert!(create_prim_geometry(&shape, &stone(), &MesherConfig::default()).is_err());

    let huge = PrimShape {
        path_twist: 1e12,
        ..PrimShape::cube()
    };
    let geometry = create_prim_geometry(&huge, &stone(), &MesherConfig::default()).unwrap();
    assert!(geometry.triangle_count() > 12);
}

#[test]
fn test_logged_build_returns_geometry() {
    let geometry = build_geometry_logged(&PrimShape::prism(), &stone(), &MesherConfig::default());
    assert!(geometry.is_some_and(|g| g.triangle_count() == 8));
}

// =============================================================================
// BATCH
// =============================================================================

#[test]
fn test_build_many_keeps_order() {
    let bad = PrimShape {
        path_shear_y: f64::NAN,
        ..PrimShape::cube()
    };
    let prims = vec![
        (PrimShape::cube(), stone()),
        (bad, stone()),
        (PrimShape::cylinder(), stone()),
    ];
    let results = build_many(&prims, &MesherConfig::default());

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().map(PrimGeometry::triangle_count), Ok(12));
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}
