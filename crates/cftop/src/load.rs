//! Snapshot input.
//!
//! Accepts either a full snapshot object (`{"timestamp": .., "spaces": [..]}`)
//! or a bare array of space rows. Parse errors keep serde_json's line and
//! column.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use tracing::debug;

use cftop_core::models::{SpaceRow, SpaceSnapshot};

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "invalid snapshot in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}

/// Parses a snapshot from `reader`; `path` is only used in error messages.
///
/// The first non-blank byte picks the shape: `[` is a bare row array,
/// anything else must be a snapshot object.
pub fn read_snapshot<R: Read>(
    mut reader: R,
    path: PathBuf,
) -> Result<SpaceSnapshot, LoadError> {
    let mut buf = Vec::new();
    if let Err(source) = reader.read_to_end(&mut buf) {
        return Err(LoadError::Io { path, source });
    }

    let parsed = match buf.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => serde_json::from_slice::<Vec<SpaceRow>>(&buf)
            .map(|spaces| SpaceSnapshot { timestamp: 0, spaces }),
        _ => serde_json::from_slice::<SpaceSnapshot>(&buf),
    };
    let snapshot = match parsed {
        Ok(snapshot) => snapshot,
        Err(source) => return Err(LoadError::Parse { path, source }),
    };
    debug!(
        path = %path.display(),
        bytes = buf.len(),
        spaces = snapshot.spaces.len(),
        timestamp = snapshot.timestamp,
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Loads a snapshot from a file, or from stdin when `input` is "-".
pub fn load_snapshot(input: &str) -> Result<SpaceSnapshot, LoadError> {
    if input == "-" {
        return read_snapshot(io::stdin().lock(), PathBuf::from("<stdin>"));
    }
    let path = PathBuf::from(input);
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => return Err(LoadError::Io { path, source }),
    };
    read_snapshot(BufReader::new(file), path)
}
