//! External tool detection.
//!
//! Resolves the documentation generator before it is spawned so a missing
//! tool is reported as a missing input rather than a spawn failure.

use crate::release::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Locates `tool` on `PATH`, or relative to `root` when it contains a path separator.
pub fn locate_tool(tool: &str, root: &Path) -> Result<PathBuf> {
    let candidate = Path::new(tool);
    let lookup = if candidate.components().count() > 1 && !candidate.is_absolute() {
        root.join(candidate)
    } else {
        candidate.to_path_buf()
    };

    match which::which(&lookup) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found: {}", tool, e);
            Err(Error::not_found("locating documentation tool", lookup))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tool_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_tool("definitely-not-a-real-doc-tool-7f3a", dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[cfg(unix)]
    #[test]
    fn relative_tool_paths_resolve_against_root() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("node_modules/.bin");
        std::fs::create_dir_all(&bin).unwrap();
        let tool = bin.join("jsdoc");
        std::fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let found = locate_tool("node_modules/.bin/jsdoc", dir.path()).unwrap();
        assert_eq!(found, tool);
    }
}
