//! Guard against entries that would be written outside the destination

use std::path::{Component, Path, PathBuf};

use crate::error::{ExtractError, Result};

/// Resolve an entry name against `destination`.
///
/// Normalisation is purely lexical: `.` segments are dropped and `..` may
/// only climb back through segments of the entry itself. Absolute names,
/// drive or UNC prefixes and names climbing above `destination` are rejected.
pub fn resolve_entry_path(entry_name: &str, destination: &Path) -> Result<PathBuf> {
    let mut relative = PathBuf::new();
    let mut depth = 0usize;

    for component in Path::new(entry_name).components() {
        match component {
            Component::Normal(part) => {
                relative.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => {
                relative.pop();
                depth -= 1;
            }
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ExtractError::path_traversal(entry_name, destination));
            }
        }
    }

    Ok(destination.join(relative))
}
