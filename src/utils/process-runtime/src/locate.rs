// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub trait BinaryLocator: Send + Sync {
    /// Resolves a program name to an executable file, `None` if it cannot be
    /// found
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Resolves binaries the way a shell would: names containing a path separator
/// are checked directly, bare names are searched in every directory of the
/// search path in order.
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    search_path: Option<OsString>,
}

impl PathLocator {
    pub fn from_env() -> Self {
        Self {
            search_path: std::env::var_os("PATH"),
        }
    }

    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
        cfg_if::cfg_if! {
            if #[cfg(windows)] {
                let mut ret = vec![dir.join(name)];
                let extensions = std::env::var("PATHEXT")
                    .unwrap_or_else(|_| ".EXE;.CMD;.BAT".to_owned());
                ret.extend(
                    extensions
                        .split(';')
                        .filter(|ext| !ext.is_empty())
                        .map(|ext| dir.join(format!("{name}{ext}"))),
                );
                ret
            } else {
                vec![dir.join(name)]
            }
        }
    }
}

impl BinaryLocator for PathLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        let as_path = Path::new(name);
        if as_path.is_absolute() || as_path.components().count() > 1 {
            return is_executable(as_path).then(|| as_path.to_path_buf());
        }

        let search_path = self.search_path.as_ref()?;

        std::env::split_paths(search_path)
            // Empty entries would resolve against the working directory
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| Self::candidates(&dir, name))
            .find(|candidate| is_executable(candidate))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };

    if !metadata.is_file() {
        return false;
    }

    cfg_if::cfg_if! {
        if #[cfg(unix)] {
            use std::os::unix::fs::PermissionsExt as _;
            metadata.permissions().mode() & 0o111 != 0
        } else {
            true
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
