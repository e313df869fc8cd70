// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::StoreLayout;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub layout: StoreLayout,
    /// Directories that did not exist before this run
    pub created: Vec<PathBuf>,
}

impl ProvisionReport {
    pub fn was_created(&self, path: &Path) -> bool {
        self.created.iter().any(|p| p == path)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Creates the root and every bucket directory if absent. Existing
/// directories and any unrelated entries under the root are left untouched,
/// so running this repeatedly or concurrently over the same root is safe.
pub fn provision(layout: &StoreLayout) -> Result<ProvisionReport, ProvisionError> {
    let mut created = Vec::new();

    for dir in layout.all_dirs() {
        if ensure_dir(&dir)? {
            tracing::debug!(path = %dir.display(), "Created directory");
            created.push(dir);
        }
    }

    tracing::info!(
        root_dir = %layout.root_dir.display(),
        buckets = ?layout.buckets,
        num_created = created.len(),
        "Provisioned blob store layout"
    );

    Ok(ProvisionReport {
        layout: layout.clone(),
        created,
    })
}

fn ensure_dir(path: &Path) -> Result<bool, ProvisionError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => return Ok(false),
        Ok(_) => return Err(ProvisionError::not_a_directory(path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ProvisionError::create_dir(path, e)),
    }

    std::fs::create_dir_all(path).map_err(|e| ProvisionError::create_dir(path, e))?;
    Ok(true)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Failed to create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[error("Path {} exists but is not a directory", path.display())]
    NotADirectory { path: PathBuf, backtrace: Backtrace },
}

impl ProvisionError {
    pub fn create_dir(path: &Path, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
            backtrace: Backtrace::capture(),
        }
    }

    pub fn not_a_directory(path: &Path) -> Self {
        Self::NotADirectory {
            path: path.to_path_buf(),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::CreateDir { path, .. } | Self::NotADirectory { path, .. } => path,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
