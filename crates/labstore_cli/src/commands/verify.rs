//! Verify command implementation.

use labstore_storage::{DirBackend, KvBackend};
use std::path::Path;
use tracing::info;

/// Runs the verify command: parses every stored value and reports corrupt
/// keys.
///
/// Exits with an error when any key fails to parse, so the command is
/// usable as a health check.
pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Verifying store at {}", path.display());
    let backend = DirBackend::open(path)?;

    let mut checked = 0;
    let mut corrupt = Vec::new();

    for key in backend.keys()? {
        let value = backend.get(&key)?.unwrap_or_default();
        checked += 1;

        match serde_json::from_slice::<serde_json::Value>(&value) {
            Ok(parsed) if key == "user" || parsed.is_array() => {
                println!("[OK]      {key}");
            }
            Ok(_) => {
                println!("[SHAPE]   {key}: expected a JSON array");
                corrupt.push(key);
            }
            Err(err) => {
                println!("[CORRUPT] {key}: {err}");
                corrupt.push(key);
            }
        }
    }

    println!();
    println!("Checked {checked} keys, {} corrupt", corrupt.len());

    if corrupt.is_empty() {
        Ok(())
    } else {
        Err(format!("corrupt keys: {}", corrupt.join(", ")).into())
    }
}
