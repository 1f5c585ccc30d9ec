//! Inspect command implementation.

use labstore_storage::{DirBackend, KvBackend};
use serde::Serialize;
use std::path::Path;

/// Store inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Store path.
    pub path: String,
    /// Total size of all collection values in bytes.
    pub total_size: usize,
    /// Per-collection statistics.
    pub collections: Vec<CollectionStats>,
}

/// Statistics for a single collection key.
#[derive(Debug, Serialize)]
pub struct CollectionStats {
    /// Collection key.
    pub key: String,
    /// Number of records, or `None` when the value is a single object
    /// (the session key) or unparseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    /// Value size in bytes.
    pub size: usize,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.is_dir() {
        return Err(format!("no store found at {}", path.display()).into());
    }

    let backend = DirBackend::open(path)?;
    let mut collections = Vec::new();
    let mut total_size = 0;

    for key in backend.keys()? {
        let value = backend.get(&key)?.unwrap_or_default();
        let record_count = serde_json::from_slice::<Vec<serde_json::Value>>(&value)
            .map(|records| records.len())
            .ok();
        total_size += value.len();
        collections.push(CollectionStats {
            key,
            record_count,
            size: value.len(),
        });
    }

    let result = InspectResult {
        path: path.display().to_string(),
        total_size,
        collections,
    };

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            println!("Store: {}", result.path);
            println!("Total size: {} bytes", result.total_size);
            println!();
            println!("{:<16} {:>8} {:>10}", "COLLECTION", "RECORDS", "BYTES");
            for stats in &result.collections {
                let records = stats
                    .record_count
                    .map_or_else(|| "-".to_string(), |n| n.to_string());
                println!("{:<16} {:>8} {:>10}", stats.key, records, stats.size);
            }
        }
    }

    Ok(())
}
