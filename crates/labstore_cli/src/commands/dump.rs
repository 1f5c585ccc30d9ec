//! Dump command implementation.

use labstore_storage::{DirBackend, KvBackend};
use std::path::Path;

/// Runs the dump command: pretty-prints one collection's stored JSON.
pub fn run(path: &Path, collection: &str) -> Result<(), Box<dyn std::error::Error>> {
    let backend = DirBackend::open(path)?;

    let Some(value) = backend.get(collection)? else {
        return Err(format!("collection {collection:?} has no stored value").into());
    };

    let parsed: serde_json::Value = serde_json::from_slice(&value)
        .map_err(|err| format!("collection {collection:?} is not valid JSON: {err}"))?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);

    Ok(())
}
