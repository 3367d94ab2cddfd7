//! Golden datasets and observation scenarios shared by the Helios test suites.
//!
//! Paths are relative to this crate's root, e.g.
//! `load_fixture_value("golden/aggregation/two_detector_split.json")`.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the fixture files, independent of the calling crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// Read a numeric field, panicking with the field name when it is absent.
pub fn f64_field(value: &serde_json::Value, key: &str) -> f64 {
    value[key]
        .as_f64()
        .unwrap_or_else(|| panic!("fixture field {key} is missing or not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().join("golden").exists());
    }

    #[test]
    fn all_golden_aggregation_files_exist() {
        let files = [
            "golden/aggregation/two_detector_split.json",
            "golden/aggregation/maximal_split.json",
            "golden/aggregation/unanimous.json",
            "golden/aggregation/weighted_three.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn every_golden_file_parses_as_json() {
        let mut total = 0;
        for dir in ["golden/aggregation", "golden/recalibration", "golden/physics", "scenarios"] {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file)
                    .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
                total += 1;
            }
        }
        assert_eq!(total, 8, "Expected 8 fixture files, found {}", total);
    }

    #[test]
    fn aggregation_fixtures_have_matching_keys() {
        for file in list_fixtures("golden/aggregation") {
            let rel = format!(
                "golden/aggregation/{}",
                file.file_name().unwrap().to_string_lossy()
            );
            let v = load_fixture_value(&rel);
            let preds = v["predictions"].as_object().unwrap();
            let weights = v["weights"].as_object().unwrap();
            assert_eq!(
                preds.keys().collect::<Vec<_>>(),
                weights.keys().collect::<Vec<_>>(),
                "{rel}"
            );
        }
    }
}
