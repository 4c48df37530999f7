//! Tests for the spiral stairs generator.

use super::*;
use crate::error::GeneratorError;
use crate::generators::SlotRange;
use approx::assert_abs_diff_eq;
use brush_mesh::MaterialId;
use config::constants::MAX_STEP_COUNT;

fn surfaces() -> Vec<BrushSurface> {
    BrushSurface::numbered_table(SpiralStairsSurface::COUNT)
}

fn assert_all_valid(brushes: &[GeneratedBrush]) {
    for (index, brush) in brushes.iter().enumerate() {
        assert!(brush.mesh.validate(), "brush {index} is invalid");
    }
}

fn material_facing(mesh: &BrushMesh, direction: DVec3) -> Option<MaterialId> {
    mesh.polygons()
        .iter()
        .zip(mesh.planes())
        .find(|(_, plane)| plane.is_some_and(|p| p.normal.dot(direction) > 0.999))
        .map(|(polygon, _)| polygon.material)
}

#[test]
fn default_layout() {
    let layout = SpiralStairsLayout::new(&SpiralStairsDefinition::default()).unwrap();

    assert_eq!(layout.step_count, 5);
    assert_abs_diff_eq!(layout.step_height, 0.2, epsilon = 1e-12);
    assert_abs_diff_eq!(layout.step_angle, 18f64.to_radians(), epsilon = 1e-12);
    assert_eq!(layout.risers, SlotRange { start: 0, count: 5 });
    assert_eq!(layout.treads, SlotRange { start: 5, count: 5 });
    assert_eq!(layout.outer_cylinder, 10);
    assert_eq!(layout.inner_cylinder, Some(11));
    assert_eq!(layout.total, 12);
    assert_eq!(layout.parts()[11], SpiralStairsPart::InnerCylinder);
}

#[test]
fn default_stairs_validate() {
    let definition = SpiralStairsDefinition::default();
    let brushes = definition.generate_brushes(&surfaces()).unwrap();

    assert_eq!(brushes.len(), 12);
    assert_all_valid(&brushes);
    assert!(brushes[..10]
        .iter()
        .all(|brush| brush.operation == CsgOperation::Additive));
    assert_eq!(brushes[10].operation, CsgOperation::Intersecting);
    assert_eq!(brushes[11].operation, CsgOperation::Subtractive);
}

#[test]
fn solid_core_drops_inner_cylinder() {
    let definition = SpiralStairsDefinition {
        inner_diameter: 0.0,
        ..SpiralStairsDefinition::default()
    };
    let layout = SpiralStairsLayout::new(&definition).unwrap();
    assert_eq!(layout.inner_cylinder, None);
    assert_eq!(layout.total, 11);

    let brushes = definition.generate_brushes(&surfaces()).unwrap();
    assert_all_valid(&brushes);
    // Wedge risers: three sides plus two caps.
    assert_eq!(brushes[0].mesh.polygon_count(), 5);
    assert_eq!(brushes[0].mesh.vertex_count(), 6);
}

#[test]
fn every_riser_type_validates_in_both_directions() {
    let risers = [
        StairsRiserType::None,
        StairsRiserType::ThinRiser,
        StairsRiserType::ThickRiser,
        StairsRiserType::Smooth,
        StairsRiserType::FillDown,
    ];
    for riser_type in risers {
        for rotation in [90.0, -90.0, 400.0] {
            for inner_diameter in [0.0, 1.0] {
                let definition = SpiralStairsDefinition {
                    riser_type,
                    rotation,
                    inner_diameter,
                    start_angle: 30.0,
                    origin: DVec3::new(2.0, -1.0, 0.5),
                    ..SpiralStairsDefinition::default()
                };
                let brushes = definition
                    .generate_brushes(&surfaces())
                    .unwrap_or_else(|e| panic!("{riser_type:?} {rotation} {inner_diameter}: {e}"));
                assert_eq!(brushes.len(), definition.required_sub_mesh_count().unwrap());
                assert_all_valid(&brushes);
            }
        }
    }
}

#[test]
fn brushes_stay_between_floor_and_ceiling() {
    let definition = SpiralStairsDefinition {
        origin: DVec3::new(0.0, 3.0, 0.0),
        height: 2.0,
        rotation: 270.0,
        riser_type: StairsRiserType::Smooth,
        ..SpiralStairsDefinition::default()
    };
    for brush in definition.generate_brushes(&surfaces()).unwrap() {
        let (min, max) = brush.mesh.bounding_box();
        assert!(min.y >= 3.0 - 1e-9);
        assert!(max.y <= 5.0 + 1e-9);
    }
}

#[test]
fn smooth_box_riser_splits_its_underside() {
    let definition = SpiralStairsDefinition {
        riser_type: StairsRiserType::Smooth,
        ..SpiralStairsDefinition::default()
    };
    let brushes = definition.generate_brushes(&surfaces()).unwrap();
    let riser = &brushes[2].mesh;

    assert!(riser.validate());
    // Four faces stay quads, the twisted underside becomes two triangles.
    assert_eq!(riser.polygon_count(), 7);
    assert!(riser
        .polygons()
        .iter()
        .any(|polygon| polygon.description.smoothing_group != 0));
}

#[test]
fn faces_use_their_surfaces() {
    let definition = SpiralStairsDefinition::default();
    let brushes = definition.generate_brushes(&surfaces()).unwrap();
    let id = |surface: SpiralStairsSurface| Some(MaterialId(surface as u32));

    let tread = &brushes[5].mesh;
    assert_eq!(material_facing(tread, DVec3::Y), id(SpiralStairsSurface::Tread));
    assert_eq!(material_facing(tread, -DVec3::Y), id(SpiralStairsSurface::Bottom));

    // The first riser's front face lies on the +x axis and faces +z.
    let riser = &brushes[0].mesh;
    assert_eq!(material_facing(riser, DVec3::Z), id(SpiralStairsSurface::Step));
    assert_eq!(material_facing(riser, DVec3::Y), id(SpiralStairsSurface::Top));

    let outer = &brushes[10].mesh;
    assert!(outer
        .polygons()
        .iter()
        .skip(2)
        .all(|polygon| polygon.material == MaterialId(SpiralStairsSurface::Outer as u32)));
}

#[test]
fn cylinders_use_configured_segments() {
    let definition = SpiralStairsDefinition {
        inner_segments: 5,
        outer_segments: 24,
        ..SpiralStairsDefinition::default()
    };
    let brushes = definition.generate_brushes(&surfaces()).unwrap();
    assert_eq!(brushes[10].mesh.polygon_count(), 24 + 2);
    assert_eq!(brushes[11].mesh.polygon_count(), 5 + 2);
    assert_abs_diff_eq!(
        brushes[11].mesh.volume(),
        2.5 * 0.25 * (TAU / 5.0).sin(),
        epsilon = 1e-9
    );
}

#[test]
fn generation_is_idempotent() {
    let definition = SpiralStairsDefinition {
        riser_type: StairsRiserType::Smooth,
        rotation: -200.0,
        ..SpiralStairsDefinition::default()
    };
    let first = definition.generate_brushes(&surfaces()).unwrap();
    let second = definition.generate_brushes(&surfaces()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_definitions_are_rejected() {
    let base = SpiralStairsDefinition::default();
    let cases = [
        SpiralStairsDefinition {
            rotation: 150.0,
            height: 0.2,
            ..base
        },
        SpiralStairsDefinition {
            rotation: 0.0,
            ..base
        },
        SpiralStairsDefinition {
            rotation: 119.0,
            height: 0.2,
            nosing_depth: 2.5,
            ..base
        },
        SpiralStairsDefinition {
            inner_diameter: 4.0,
            ..base
        },
        SpiralStairsDefinition {
            outer_segments: 2,
            ..base
        },
        SpiralStairsDefinition {
            inner_segments: 300,
            ..base
        },
        SpiralStairsDefinition {
            riser_type: StairsRiserType::Smooth,
            riser_depth: 0.0,
            ..base
        },
        SpiralStairsDefinition {
            height: f64::NAN,
            ..base
        },
        SpiralStairsDefinition {
            step_height: 0.0,
            ..base
        },
    ];
    for definition in cases {
        let error = definition.required_sub_mesh_count().unwrap_err();
        assert!(
            matches!(error, GeneratorError::InvalidDefinition { .. }),
            "{definition:?} gave {error:?}"
        );
    }
}

#[test]
fn step_count_is_capped() {
    let at_limit = SpiralStairsDefinition {
        height: MAX_STEP_COUNT as f64 * 0.01,
        step_height: 0.01,
        rotation: 360.0,
        ..SpiralStairsDefinition::default()
    };
    assert_eq!(SpiralStairsLayout::new(&at_limit).unwrap().step_count, MAX_STEP_COUNT);

    let too_tall = SpiralStairsDefinition {
        height: 1.0e13,
        ..at_limit
    };
    assert!(matches!(
        too_tall.generate_brushes(&surfaces()),
        Err(GeneratorError::InvalidDefinition { .. })
    ));
}

#[test]
fn sector_orders_rays_counter_clockwise() {
    use SpiralStairsSurface::{Back, Front, Inner, Outer};

    let forward = Sector::new([0.0, 0.5], [1.0, 2.0], [Front, Back]);
    let backward = Sector::new([0.5, 0.0], [1.0, 2.0], [Front, Back]);

    assert_eq!(forward.plan().tags, vec![Front, Outer, Back, Inner]);
    assert_eq!(backward.plan().tags, vec![Back, Outer, Front, Inner]);
    assert_eq!(forward.plan().points, backward.plan().points);
    assert_abs_diff_eq!(forward.far() * 0.25f64.cos(), 2.0, epsilon = 1e-12);
}
