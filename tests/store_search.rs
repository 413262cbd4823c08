// tests/store_search.rs
mod common;

use std::fs;

use common::rec;
use tdec_scrape::store::{search_file_name, SearchHit, SnapshotStore};

fn store() -> (tempfile::TempDir, SnapshotStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SnapshotStore::new(dir.path().join("data"));
    (dir, store)
}

#[test]
fn save_writes_counts_and_overwrites() {
    let (_dir, store) = store();
    let recs = vec![rec(&[("ID", "1"), ("County", "Wilson")]), rec(&[("ID", "2"), ("County", "Knox")])];

    store.save("all_tdec_wells.json", &recs, 40).unwrap();
    let doc = store.load("all_tdec_wells.json").unwrap();
    assert_eq!(doc.records, recs);
    assert_eq!(doc.total_count, 2);
    assert_eq!(doc.all_state_records, 40);

    store.save("all_tdec_wells.json", &recs[..1], 1).unwrap();
    let doc = store.load("all_tdec_wells.json").unwrap();
    assert_eq!(doc.total_count, 1);
    assert_eq!(doc.records.len(), 1);
}

#[test]
fn saved_document_has_expected_fields() {
    let (_dir, store) = store();
    let path = store.save("tdec_permits.json", &[rec(&[("Permit No", "P1")])], 9).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(raw["records"][0]["Permit No"], "P1");
    assert_eq!(raw["total_count"], 1);
    assert_eq!(raw["all_state_records"], 9);
    assert!(raw["last_updated"].as_str().unwrap().contains('T'));
}

#[test]
fn records_keep_header_order_on_disk() {
    let (_dir, store) = store();
    let path = store.save("x.json", &[rec(&[("Zeta", "1"), ("Alpha", "2")])], 1).unwrap();
    let text = fs::read_to_string(path).unwrap();
    assert!(text.find("Zeta").unwrap() < text.find("Alpha").unwrap());
}

#[test]
fn search_scans_only_full_documents() {
    let (_dir, store) = store();
    let hit_a = rec(&[("ID", "1"), ("Site", "1200 BAKER ROAD")]);
    let hit_b = rec(&[("ID", "9"), ("Location", "Baker Road, Murfreesboro")]);
    let miss = rec(&[("ID", "2"), ("Site", "Poplar Hill")]);

    store.save("all_tdec_complaints.json", &[hit_a.clone(), miss.clone()], 2).unwrap();
    store.save("all_tdec_wells.json", &[miss.clone(), hit_b.clone()], 2).unwrap();
    // filtered copies must not double-count
    store.save("tdec_complaints.json", &[hit_a.clone()], 2).unwrap();

    let out = store.search("baker road").unwrap();

    assert_eq!(out.hits, vec![
        SearchHit { file: "all_tdec_complaints.json".into(), record: hit_a },
        SearchHit { file: "all_tdec_wells.json".into(), record: hit_b },
    ]);
    assert!(out.path.ends_with("search_baker_road.json"));
    let saved: Vec<SearchHit> = serde_json::from_str(&fs::read_to_string(&out.path).unwrap()).unwrap();
    assert_eq!(saved, out.hits);
}

#[test]
fn search_skips_broken_documents() {
    let (_dir, store) = store();
    store.save("all_tdec_drillers.json", &[rec(&[("Name", "RG Anderson")])], 1).unwrap();
    fs::write(store.path_of("all_tdec_permits.json"), "{ not json").unwrap();

    let out = store.search("rg anderson").unwrap();
    assert_eq!(out.hits.len(), 1);
}

#[test]
fn search_overwrites_previous_results() {
    let (_dir, store) = store();
    store.save("all_a.json", &[rec(&[("Note", "karst"), ("ID", "1")])], 1).unwrap();
    assert_eq!(store.search("karst").unwrap().hits.len(), 1);

    store.save("all_a.json", &[], 0).unwrap();
    let out = store.search("karst").unwrap();
    assert!(out.hits.is_empty());
    assert_eq!(fs::read_to_string(out.path).unwrap().trim(), "[]");
}

#[test]
fn search_with_no_data_dir_writes_empty_result() {
    let (_dir, store) = store();
    let out = store.search("cave").unwrap();
    assert!(out.hits.is_empty());
    assert!(out.path.exists());
    assert_eq!(search_file_name("cave"), "search_cave.json");
}
