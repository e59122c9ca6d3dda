//! End-to-end integration tests for a full MiniMap run.
//!
//! Each test seeds a MemoryStore with a small WholeMap, runs the finder and
//! checks the written maps: names, row selection, ordering and skip rules.

use minimap_finder::{
    Error, FinderConfig, MapStore, MemoryStore, MiniMapFinder, Nucleus, Point,
};

// ============================================================================
// Helper: a WholeMap exercising every filter and tie rule.
// ============================================================================

//  M    E  ELD ESH  B10  B20   B30   B40  B50  B60
const WHOLE_MAP: &str = "\
1 -10 0 0 0.95 1.0  0.0  -0.3 0.0 0.1
2  -5 0 0 0.95 1.0  0.0   0.0 0.0 0.0
3  -7 0 0 0.94 1.0  0.0  -0.3 0.0 0.1
4  -8 0 0 0.95 1.5  0.1  -0.3 0.0 0.0
5 -20 0 0 0.95 2.5  0.0   0.0 0.0 0.0
6  -1 0 0 0.95 0.5 -0.5   0.0 0.0 0.0
7  -9 0 0 0.90 0.5 -0.5   0.0 0.0 0.0
8  -9 0 0 0.90 0.5 -0.5   0.0 0.0 0.0
";

fn seeded(nucleus: Nucleus) -> MiniMapFinder<MemoryStore> {
    let store = MemoryStore::new();
    store.insert_whole_map(nucleus.whole_map_name(), WHOLE_MAP);
    MiniMapFinder::with_store(store)
}

fn masses(finder: &MiniMapFinder<MemoryStore>, name: &str) -> Vec<f64> {
    finder
        .store()
        .minimap_points(name)
        .unwrap_or_else(|e| panic!("{name}: {e}"))
        .iter()
        .map(|p| p.m)
        .collect()
}

// ============================================================================
// 1. Output set for a nucleus with a reference point
// ============================================================================

#[test]
fn test_writes_every_map_for_known_nucleus() {
    let nucleus = Nucleus::new(102, 154);
    let finder = seeded(nucleus);
    let report = finder.run(nucleus).unwrap();

    assert_eq!(
        finder.store().minimap_names(),
        vec![
            "102_154_6D_B20B30_MiniMap.txt",
            "102_154_4D_B20B30_MiniMap.txt",
            "102_154_6D_B10const_MiniMap_B10_0.950.txt",
            "102_154_4D_B10const_MiniMap_B10_0.950.txt",
            "102_154_6D_B10const_MiniMap_B10_0.940.txt",
            "102_154_6D_B10const_MiniMap_B10_0.900.txt",
            "102_154_4D_B10const_MiniMap_B10_0.900.txt",
            "102_154_6D_Starting_MiniMap.txt",
            "102_154_4D_Starting_MiniMap.txt",
            "102_154_6D_Fusion_MiniMap.txt",
            "102_154_4D_Fusion_MiniMap.txt",
        ]
    );
    assert_eq!(report.records_read, 8);
    assert!(report.row_format.integer_m);
    assert_eq!(report.six_d_points, 7);
    assert_eq!(report.four_d_points, 5);
    assert_eq!(report.b10_values, 3);
    assert!(report.reference_found);
    assert_eq!(report.maps.len(), 11);
}

// ============================================================================
// 2. Base maps: minimum E per (B20, B30), first-encountered tie-break
// ============================================================================

#[test]
fn test_base_maps_keep_minimum_energy() {
    let nucleus = Nucleus::new(102, 154);
    let finder = seeded(nucleus);
    finder.run(nucleus).unwrap();

    // (0.5,-0.5): 7 and 8 tie at -9, 7 was first; (1.0,0.0): 1; (1.5,0.1): 4.
    assert_eq!(masses(&finder, "102_154_6D_B20B30_MiniMap.txt"), vec![7.0, 1.0, 4.0]);
    // Row 1 has B60 = 0.1, so the 4D cell (1.0, 0.0) falls to row 2.
    assert_eq!(masses(&finder, "102_154_4D_B20B30_MiniMap.txt"), vec![7.0, 2.0, 4.0]);
}

#[test]
fn test_4d_base_map_rows_respect_subspace() {
    let nucleus = Nucleus::new(102, 154);
    let finder = seeded(nucleus);
    finder.run(nucleus).unwrap();

    let rows = finder.store().minimap_points("102_154_4D_B20B30_MiniMap.txt").unwrap();
    assert!(!rows.is_empty());
    for p in rows {
        assert_eq!(p.b50, 0.0);
        assert_eq!(p.b60, 0.0);
        assert!((0.0..=2.0).contains(&p.b20));
        assert!((-0.5..=0.5).contains(&p.b30));
    }
}

// ============================================================================
// 3. B10-constant partitions
// ============================================================================

#[test]
fn test_b10_partitions() {
    let nucleus = Nucleus::new(102, 154);
    let finder = seeded(nucleus);
    finder.run(nucleus).unwrap();

    assert_eq!(masses(&finder, "102_154_6D_B10const_MiniMap_B10_0.950.txt"), vec![6.0, 1.0, 4.0]);
    assert_eq!(masses(&finder, "102_154_4D_B10const_MiniMap_B10_0.950.txt"), vec![6.0, 2.0, 4.0]);
    assert_eq!(masses(&finder, "102_154_6D_B10const_MiniMap_B10_0.940.txt"), vec![3.0]);
    assert_eq!(masses(&finder, "102_154_6D_B10const_MiniMap_B10_0.900.txt"), vec![7.0]);

    // 0.94 only occurs off the 4D subspace.
    assert!(finder.store().minimap("102_154_4D_B10const_MiniMap_B10_0.940.txt").is_none());
}

// ============================================================================
// 4. Starting and fusion neighborhoods
// ============================================================================

#[test]
fn test_starting_maps_use_snapped_reference() {
    let nucleus = Nucleus::new(102, 154);
    let finder = seeded(nucleus);
    finder.run(nucleus).unwrap();

    // Snapped reference: B10 0.95, B40 -0.3, B50 0.0, B60 0.1. Row 3 (B10 0.94) is out.
    assert_eq!(masses(&finder, "102_154_6D_Starting_MiniMap.txt"), vec![1.0]);
    assert_eq!(masses(&finder, "102_154_4D_Starting_MiniMap.txt"), vec![4.0]);
}

#[test]
fn test_fusion_maps_sorted_by_grid() {
    let nucleus = Nucleus::new(102, 154);
    let finder = seeded(nucleus);
    finder.run(nucleus).unwrap();

    assert_eq!(masses(&finder, "102_154_6D_Fusion_MiniMap.txt"), vec![6.0, 2.0]);
    assert_eq!(masses(&finder, "102_154_4D_Fusion_MiniMap.txt"), vec![6.0, 2.0]);
}

// ============================================================================
// 5. Nucleus without a reference point
// ============================================================================

#[test]
fn test_unknown_nucleus_skips_starting_and_fusion() {
    let nucleus = Nucleus::new(50, 50);
    let finder = seeded(nucleus);
    let report = finder.run(nucleus).unwrap();

    assert!(!report.reference_found);
    let names = finder.store().minimap_names();
    assert_eq!(names.len(), 7);
    assert!(names.iter().all(|n| !n.contains("Starting") && !n.contains("Fusion")));
    assert!(names.contains(&"50_50_6D_B20B30_MiniMap.txt".to_string()));
    assert!(names.contains(&"50_50_4D_B10const_MiniMap_B10_0.900.txt".to_string()));
}

// ============================================================================
// 6. Fatal errors
// ============================================================================

#[test]
fn test_missing_whole_map_is_fatal() {
    let finder = MiniMapFinder::with_store(MemoryStore::new());
    let err = finder.run(Nucleus::new(102, 154)).unwrap_err();
    assert!(matches!(err, Error::InputNotFound(ref name) if name == "102_154_6D_Whole_Map.txt"));
    assert!(finder.store().minimap_names().is_empty());
}

#[test]
fn test_malformed_record_is_fatal() {
    let nucleus = Nucleus::new(102, 154);
    let store = MemoryStore::new();
    store.insert_whole_map(
        nucleus.whole_map_name(),
        "1 -1 0 0 0.95 1.0 0.0 0.0 0.0 0.0\n2 -2 0 0 0.95 1.0 0.0 0.0 0.0\n",
    );
    let finder = MiniMapFinder::with_store(store);

    match finder.run(nucleus).unwrap_err() {
        Error::MalformedRecord { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
    assert!(finder.store().minimap_names().is_empty());
}

#[test]
fn test_zero_read_chunk_is_config_error() {
    let nucleus = Nucleus::new(102, 154);
    let store = MemoryStore::new();
    store.insert_whole_map(nucleus.whole_map_name(), WHOLE_MAP);
    let config = FinderConfig { read_chunk: 0, ..FinderConfig::default() };
    let finder = MiniMapFinder::with_config(store, config);
    assert!(matches!(finder.run(nucleus), Err(Error::ConfigError(_))));
}

// ============================================================================
// 7. Empty results are not errors
// ============================================================================

#[test]
fn test_everything_outside_subspace_gives_empty_maps() {
    let nucleus = Nucleus::new(102, 154);
    let store = MemoryStore::new();
    store.insert_whole_map(nucleus.whole_map_name(), "1 -1 0 0 0.95 2.5 0.0 0.0 0.0 0.0\n");
    let finder = MiniMapFinder::with_store(store);

    let report = finder.run(nucleus).unwrap();
    assert_eq!(report.b10_values, 0);
    // Base, starting and fusion maps are still written, just empty.
    assert_eq!(finder.store().minimap_names().len(), 6);
    assert_eq!(finder.store().minimap("102_154_6D_B20B30_MiniMap.txt").as_deref(), Some(""));
    assert_eq!(report.map("102_154_4D_Fusion_MiniMap.txt").map(|m| m.rows), Some(0));
}

// ============================================================================
// 8. Chunk size never changes results
// ============================================================================

#[test]
fn test_read_chunk_size_is_invisible() {
    let nucleus = Nucleus::new(102, 154);
    let reference = seeded(nucleus);
    reference.run(nucleus).unwrap();

    for read_chunk in [1, 2, 3, 7, 1_000] {
        let store = MemoryStore::new();
        store.insert_whole_map(nucleus.whole_map_name(), WHOLE_MAP);
        let config = FinderConfig { read_chunk, write_chunk: 2, ..FinderConfig::default() };
        let finder = MiniMapFinder::with_config(store, config);
        finder.run(nucleus).unwrap();

        for name in reference.store().minimap_names() {
            assert_eq!(
                finder.store().minimap(&name),
                reference.store().minimap(&name),
                "{name} differs at read_chunk = {read_chunk}"
            );
        }
    }
}

// ============================================================================
// 9. Store used directly
// ============================================================================

#[test]
fn test_store_streams_every_record_once() {
    let store = MemoryStore::new();
    store.insert_whole_map("w.txt", WHOLE_MAP);
    let mut seen: Vec<Point> = Vec::new();
    let total = store
        .read_whole_map("w.txt", 3, &mut |chunk| {
            assert!(chunk.len() <= 3);
            seen.extend_from_slice(chunk);
            Ok(())
        })
        .unwrap();
    assert_eq!(total.records, 8);
    let ms: Vec<f64> = seen.iter().map(|p| p.m).collect();
    assert_eq!(ms, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
}
