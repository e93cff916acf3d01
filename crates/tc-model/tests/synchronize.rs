//! Discovery and synchronization against synthetic archives.

use tc_archive::MemoryArchive;
use tc_core::Id;
use tc_model::*;

/// Two records; submodel "A" without temperature records, "B" with nodes
/// 1 and 2 at global ids 5 and 6.
fn scenario_archive() -> MemoryArchive {
    let mut archive = MemoryArchive::new();
    let r1 = archive.add_record(0.0);
    let r2 = archive.add_record(1.0);

    archive.add_submodel("A");
    archive.add_node("A", 1, 0, vec![]).unwrap();

    archive.add_submodel("B");
    archive.add_node("B", 1, 5, vec![310.0, 320.0]).unwrap();
    archive.add_node("B", 2, 6, vec![311.0, 321.0]).unwrap();

    archive.set_field_samples("POS_X", r1, vec![(5, 1.5), (6, 2.5)]);
    archive.set_field_samples("POS_Y", r1, vec![(5, -1.0)]);
    archive.set_field_samples("HEAT_LOAD", r1, vec![(5, 99.0)]);
    archive.set_field_samples("POS_X", r2, vec![(5, 1.75), (6, 2.75)]);
    archive
}

fn assert_aligned(ctx: &CouplingContext) {
    for region in ctx.catalog().regions() {
        let view = ctx.point_cloud(&region.name).unwrap();
        let temperature = ctx.scalar_field(&region.name, TEMPERATURE).unwrap();
        assert_eq!(view.ids.len(), view.coords.len());
        assert_eq!(view.ids.len(), temperature.len());
    }
}

#[test]
fn region_without_temperature_records_is_excluded() {
    let archive = scenario_archive();
    let ctx = CouplingContext::discover(&archive, true).unwrap();

    let names: Vec<&str> = ctx
        .catalog()
        .regions()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["B"]);
    assert!(matches!(
        ctx.point_cloud("A"),
        Err(ModelError::UnknownRegion(_))
    ));
}

#[test]
fn discovery_maps_node_ids_to_local_ids() {
    let archive = scenario_archive();
    let ctx = CouplingContext::discover(&archive, true).unwrap();

    let b = ctx.catalog().find("B").unwrap();
    let region = ctx.catalog().region(b).unwrap();
    assert_eq!(region.topology, Topology::Volume);
    assert_eq!(region.discretization, Discretization::PointCloud);

    let at5 = ctx.index().get(Id::from_index(5)).unwrap();
    let at6 = ctx.index().get(Id::from_index(6)).unwrap();
    assert_eq!(at5, NodeLocation { region: b, local: Id::from_index(0) });
    assert_eq!(at6, NodeLocation { region: b, local: Id::from_index(1) });
    assert_eq!(ctx.index().get(Id::from_index(0)), None);

    // Before any synchronization: zero coordinates, default temperature.
    let view = ctx.point_cloud("B").unwrap();
    assert_eq!(view.coords, &[[0.0; 3]; 2]);
    assert_eq!(
        ctx.scalar_field("B", TEMPERATURE).unwrap(),
        &[DEFAULT_TEMPERATURE; 2]
    );
    assert_aligned(&ctx);
}

#[test]
fn position_field_overwrites_one_axis() {
    let archive = scenario_archive();
    let mut ctx = CouplingContext::discover(&archive, true).unwrap();

    let report = ctx.synchronize(&archive, 0).unwrap();
    assert_eq!(report.record, 1);
    assert_eq!(report.position_fields, vec!["POS_X", "POS_Y"]);
    assert_eq!(report.skipped_fields, vec!["HEAT_LOAD"]);
    assert_eq!(report.coordinates_written, 3);

    let view = ctx.point_cloud("B").unwrap();
    assert_eq!(view.coords[0], [1.5, -1.0, 0.0]);
    assert_eq!(view.coords[1], [2.5, 0.0, 0.0]);
    assert_eq!(ctx.scalar_field("B", TEMPERATURE).unwrap(), &[310.0, 311.0]);

    ctx.synchronize(&archive, 1).unwrap();
    let view = ctx.point_cloud("B").unwrap();
    // POS_Y is absent at record 2, so y keeps its previous value.
    assert_eq!(view.coords[0], [1.75, -1.0, 0.0]);
    assert_eq!(ctx.scalar_field("B", TEMPERATURE).unwrap(), &[320.0, 321.0]);
    assert_aligned(&ctx);
}

#[test]
fn synchronizing_twice_is_idempotent() {
    let archive = scenario_archive();
    let mut ctx = CouplingContext::discover(&archive, false).unwrap();

    ctx.synchronize(&archive, 1).unwrap();
    let coords = ctx.point_cloud("B").unwrap().coords.to_vec();
    let temps = ctx.scalar_field("B", TEMPERATURE).unwrap().to_vec();

    ctx.synchronize(&archive, 1).unwrap();
    assert_eq!(ctx.point_cloud("B").unwrap().coords, coords.as_slice());
    assert_eq!(ctx.scalar_field("B", TEMPERATURE).unwrap(), temps.as_slice());
}

#[test]
fn unrecognized_position_token_leaves_state_unchanged() {
    let mut archive = scenario_archive();
    let mut ctx = CouplingContext::discover(&archive, false).unwrap();
    ctx.synchronize(&archive, 0).unwrap();
    let before = ctx.clone();

    archive.set_field_samples("POS_Q", 2, vec![(5, 42.0)]);
    let err = ctx.synchronize(&archive, 1).unwrap_err();
    assert!(matches!(err, ModelError::UnrecognizedPositionToken { .. }));

    assert_eq!(
        ctx.point_cloud("B").unwrap(),
        before.point_cloud("B").unwrap()
    );
    assert_eq!(
        ctx.scalar_field("B", TEMPERATURE).unwrap(),
        before.scalar_field("B", TEMPERATURE).unwrap()
    );
}

#[test]
fn ambiguous_position_token_is_fatal() {
    let mut archive = scenario_archive();
    archive.set_field_samples("POS_X_POS_Z", 1, vec![(5, 1.0)]);
    let mut ctx = CouplingContext::discover(&archive, false).unwrap();
    assert!(matches!(
        ctx.synchronize(&archive, 0),
        Err(ModelError::AmbiguousPositionToken { .. })
    ));
}

#[test]
fn time_step_out_of_range() {
    let archive = scenario_archive();
    let mut ctx = CouplingContext::discover(&archive, false).unwrap();
    assert!(matches!(
        ctx.synchronize(&archive, 2),
        Err(ModelError::TimeStepOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn unmapped_global_id_is_fatal() {
    let mut archive = scenario_archive();
    // Global id 0 belongs to the excluded submodel "A".
    archive.set_field_samples("POS_Z", 1, vec![(6, 3.0), (0, 1.0)]);
    let mut ctx = CouplingContext::discover(&archive, false).unwrap();

    let err = ctx.synchronize(&archive, 0).unwrap_err();
    assert!(matches!(
        err,
        ModelError::UnmappedGlobalId { global: 0, .. }
    ));
    // The valid sample before the bad one was not applied either.
    assert_eq!(ctx.point_cloud("B").unwrap().coords[1], [0.0; 3]);
}

#[test]
fn temperature_follows_point_cloud_order() {
    // Regions of sizes 2, 3 and 1; R3's node ids are listed out of order.
    let mut archive = MemoryArchive::new();
    archive.add_record(0.0);
    archive.add_submodel("R2");
    archive.add_node("R2", 1, 0, vec![20.0]).unwrap();
    archive.add_node("R2", 2, 1, vec![21.0]).unwrap();
    archive.add_submodel("R3");
    archive.add_node("R3", 3, 4, vec![32.0]).unwrap();
    archive.add_node("R3", 1, 2, vec![30.0]).unwrap();
    archive.add_node("R3", 2, 3, vec![31.0]).unwrap();
    archive.add_submodel("R1");
    archive.add_node("R1", 1, 5, vec![10.0]).unwrap();
    archive.set_field_samples("POS_X", 1, vec![(4, 0.3), (2, 0.1), (3, 0.2)]);

    let mut ctx = CouplingContext::discover(&archive, true).unwrap();
    ctx.synchronize(&archive, 0).unwrap();

    assert_eq!(ctx.scalar_field("R2", TEMPERATURE).unwrap(), &[20.0, 21.0]);
    assert_eq!(ctx.scalar_field("R1", TEMPERATURE).unwrap(), &[10.0]);

    let view = ctx.point_cloud("R3").unwrap();
    let locals: Vec<u32> = view.ids.iter().map(|id| id.index()).collect();
    assert_eq!(locals, vec![2, 0, 1]);
    assert_eq!(
        ctx.scalar_field("R3", TEMPERATURE).unwrap(),
        &[32.0, 30.0, 31.0]
    );
    let xs: Vec<f64> = view.coords.iter().map(|c| c[0]).collect();
    assert_eq!(xs, vec![0.3, 0.1, 0.2]);
    assert_aligned(&ctx);
}

#[test]
fn series_length_mismatch_is_fatal() {
    let mut archive = MemoryArchive::new();
    archive.add_record(0.0);
    archive.add_submodel("P");
    archive.add_node("P", 1, 0, vec![300.0]).unwrap();
    archive.add_node("P", 2, 1, vec![]).unwrap();

    let mut ctx = CouplingContext::discover(&archive, false).unwrap();
    assert!(matches!(
        ctx.synchronize(&archive, 0),
        Err(ModelError::SeriesLengthMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));
}

#[test]
fn duplicate_submodel_is_a_build_error() {
    let mut archive = MemoryArchive::new();
    archive.add_record(0.0);
    archive.add_submodel("P");
    archive.add_node("P", 1, 0, vec![300.0]).unwrap();
    archive.add_submodel("P");
    archive.add_node("P", 1, 1, vec![300.0]).unwrap();

    assert!(matches!(
        CouplingContext::discover(&archive, false),
        Err(ModelError::DuplicateRegion { .. })
    ));
}
