// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Operator defaults read from the `stack` configuration file.
///
/// Every field is optional; command line flags and environment variables take precedence over
/// anything set here.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the inventory service.
    pub server: Option<String>,
    /// Zone used when a command needs one and none is given.
    pub zone: Option<String>,
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load the config file at `path`.
    ///
    /// When `explicit` is false a missing file yields the default config, so that the default
    /// location does not have to exist.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
                Ok(Config::default())
            }
            Err(e) => Err(Error::Config {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
