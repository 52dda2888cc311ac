//! Configuration file for `shelterctl`.
//!
//! ```hcl
//! version  = 1
//! base_url = "https://shelters.example.net"
//! login    = "user@example.net"
//! password = "secret"
//!
//! # optional, these are the defaults
//! routes {
//!   token = "/api/auth/signin"
//!   list  = "/api/petshelter"
//!   get   = "/api/petshelter"
//! }
//!
//! # optional, origin for `closest`
//! home {
//!   lat = 40.4167047
//!   lon = -3.7035825
//! }
//! ```
//!

use std::path::Path;

use eyre::Result;
use serde::Deserialize;
use tracing::trace;

use petshelter_common::{ConfigFile, IntoConfig, Location, Versioned};
use petshelter_macros::into_configfile;
use petshelter_shelters::{RemoteRepository, Routes, TokenStore};

#[into_configfile(version = 1, filename = "config.hcl")]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// API endpoint
    pub base_url: String,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub routes: Routes,
    /// Where the user is
    pub home: Option<Location>,
}

impl Config {
    /// Load from `fname` or the default location, return the config and its directory.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<(Config, std::path::PathBuf)> {
        let cfg = ConfigFile::<Config>::load(fname)?;
        let base = cfg.config_path();
        trace!("config in {base:?}");
        Ok((cfg.into_inner(), base))
    }

    /// Build the API client, tokens are cached under `base`.
    ///
    pub fn remote(&self, base: &Path) -> RemoteRepository {
        RemoteRepository::new(
            &self.base_url,
            &self.login,
            &self.password,
            self.routes.clone(),
            TokenStore::new(base),
        )
    }
}
