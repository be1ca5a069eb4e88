//! Build script: validates fallback-models.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let catalog_path: PathBuf = [&manifest_dir, "config", "fallback-models.json"]
        .iter()
        .collect();
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let json = std::fs::read_to_string(&catalog_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. fallback-models.json must exist and be valid.",
            catalog_path.display(),
            e
        )
    });
    let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "fallback-models.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    for (i, entry) in entries.iter().enumerate() {
        let name = entry.get("name").and_then(|v| v.as_str()).unwrap_or("");
        if name.trim().is_empty() {
            panic!("fallback-models.json entry {} has no \"name\"", i);
        }
    }
}
