//! Test assertion helpers
//!
//! Provides checks on snapshot files as they land on disk, independent of
//! the library types that wrote them.

#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::Path;

const METRICS: [&str; 3] = ["raw", "gzip", "brotli"];

/// Read a snapshot file as untyped JSON
pub fn read_snapshot_json(path: &Path) -> Value {
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&contents)
        .unwrap_or_else(|e| panic!("{} is not valid JSON: {}", path.display(), e))
}

/// Assert that the `total` entry is the per-metric sum of every other entry
pub fn assert_total_is_sum(snapshot: &Value) {
    let object = snapshot.as_object().expect("snapshot should be a JSON object");
    let total = object.get("total").expect("snapshot should have a total");

    for metric in METRICS {
        let sum: u64 = object
            .iter()
            .filter(|(name, _)| name.as_str() != "total")
            .map(|(_, record)| record[metric].as_u64().expect("sizes are integers"))
            .sum();
        assert_eq!(
            total[metric].as_u64(),
            Some(sum),
            "total.{} should equal the sum of all files",
            metric
        );
    }
}

/// Assert the file names recorded in a snapshot, excluding the total
pub fn assert_snapshot_files(snapshot: &Value, expected: &[&str]) {
    let mut names: Vec<&str> = snapshot
        .as_object()
        .expect("snapshot should be a JSON object")
        .keys()
        .map(String::as_str)
        .filter(|name| *name != "total")
        .collect();
    names.sort_unstable();

    let mut expected = expected.to_vec();
    expected.sort_unstable();
    assert_eq!(names, expected);
}
