use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Input files larger than this are refused; a loan request is a handful of
/// numbers.
const MAX_INPUT_BYTES: u64 = 1024 * 1024;

/// Read a JSON file and deserialise into a typed request.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?;
    Ok(value)
}

/// Resolve a relative path against the working directory and check that it
/// names a reasonably sized regular file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    let metadata = fs::metadata(&resolved)
        .map_err(|_| format!("File not found: {}", resolved.display()))?;

    if !metadata.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }
    if metadata.len() > MAX_INPUT_BYTES {
        return Err(format!(
            "Input file too large: {} ({} bytes)",
            resolved.display(),
            metadata.len()
        )
        .into());
    }

    Ok(resolved)
}
