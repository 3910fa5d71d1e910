//! Loading limits from disk.
//!
//! A limits file is a JSON object with any subset of the [`Limits`] fields;
//! fields left out keep their defaults.
//!
//! ```json
//! { "recursion_max_depth": 2, "max_dim_size": 8 }
//! ```

use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;
use voltest_core::Limits;

/// Read and validate a limits file
pub fn load_limits(path: impl AsRef<Path>) -> Result<Limits> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let limits = Limits::from_json(&text)?;
    debug!(path = %path.display(), ?limits, "loaded limits");
    Ok(limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"compound_max_members": 2}}"#).unwrap();
        let limits = load_limits(file.path()).unwrap();
        assert_eq!(limits.compound_max_members, 2);
        assert_eq!(limits.max_rank, Limits::default().max_rank);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_limits(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.is_config());
    }
}
