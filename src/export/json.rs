use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{ProfileError, Result};

/// Read a JSON document (profile, review, block) from disk
pub fn read_document<T, P>(path: P, kind: &str) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let document = serde_json::from_str(&content).map_err(|e| ProfileError::Parse {
        kind: kind.to_string(),
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(document)
}

/// Write any serializable value as pretty JSON
pub fn write_document<T, P>(data: &T, output_path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let json_data = serde_json::to_string_pretty(data)?;
    let mut file = fs::File::create(output_path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}
