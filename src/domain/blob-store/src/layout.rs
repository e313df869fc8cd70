// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use crate::FixtureConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Directory structure served by the storage server: one subdirectory per
/// bucket under the root
///
/// ```text
/// <root>/
///   the-extensions-bucket/
///   zed-crash-reports/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    pub root_dir: PathBuf,
    pub buckets: Vec<String>,
}

impl StoreLayout {
    pub fn new<I, S>(root_dir: impl Into<PathBuf>, buckets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            root_dir: root_dir.into(),
            buckets: buckets.into_iter().map(Into::into).collect(),
        }
    }

    pub fn for_config(config: &FixtureConfig) -> Self {
        Self::new(config.root_dir.clone(), config.bucket_names())
    }

    pub fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.root_dir.join(bucket)
    }

    pub fn bucket_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.buckets.iter().map(|b| self.bucket_dir(b))
    }

    /// Root first, then buckets in declaration order
    pub fn all_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        std::iter::once(self.root_dir.clone()).chain(self.bucket_dirs())
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
