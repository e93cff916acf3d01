//! Property tests for discovery: the global index is total and collision-free.

use proptest::prelude::*;
use tc_archive::MemoryArchive;
use tc_core::Id;
use tc_model::*;

/// Build an archive from region sizes, handing out global ids from a
/// shuffled permutation so they interleave across regions.
fn archive_from(sizes: &[usize], globals: &[i64]) -> MemoryArchive {
    let mut archive = MemoryArchive::new();
    archive.add_record(0.0);
    let mut next = globals.iter();
    for (r, &size) in sizes.iter().enumerate() {
        let name = format!("R{r}");
        archive.add_submodel(name.as_str());
        for node in 0..size {
            let global = *next.next().unwrap();
            archive
                .add_node(&name, node as i64 + 1, global, vec![global as f64])
                .unwrap();
        }
    }
    archive
}

fn sizes_and_globals() -> impl Strategy<Value = (Vec<usize>, Vec<i64>)> {
    prop::collection::vec(1usize..6, 1..5).prop_flat_map(|sizes| {
        let total: usize = sizes.iter().sum();
        let globals: Vec<i64> = (0..total as i64).map(|g| g * 2 + 1).collect();
        (Just(sizes), Just(globals).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn every_global_resolves_once((sizes, globals) in sizes_and_globals()) {
        let archive = archive_from(&sizes, &globals);
        let ctx = CouplingContext::discover(&archive, true).unwrap();

        prop_assert_eq!(ctx.index().len(), globals.len());
        for &g in &globals {
            let location = ctx.index().get(Id::from_index(g as u32)).unwrap();
            let cloud = ctx.catalog().point_cloud(location.region).unwrap();
            prop_assert!(location.local.slot() < cloud.len());
            prop_assert!(cloud.position_of(location.local).is_some());
        }
        // Even slots were never handed out.
        prop_assert_eq!(ctx.index().get(Id::from_index(0)), None);
    }

    #[test]
    fn stores_stay_aligned_after_sync((sizes, globals) in sizes_and_globals()) {
        let archive = archive_from(&sizes, &globals);
        let mut ctx = CouplingContext::discover(&archive, true).unwrap();
        ctx.synchronize(&archive, 0).unwrap();

        for region in ctx.catalog().regions() {
            let view = ctx.point_cloud(&region.name).unwrap();
            let temperature = ctx.scalar_field(&region.name, TEMPERATURE).unwrap();
            prop_assert_eq!(view.ids.len(), view.coords.len());
            prop_assert_eq!(view.ids.len(), temperature.len());
        }
    }
}
