//! This is the `ConfigFile` struct.
//!
//! This is for finding the right default locations for various configuration files for
//! `petshelter`.  This is a configuration file/struct neutral loading engine, storing only the
//! base directory and with `load()` read the proper file or the default one.
//!
//! This encapsulates the configuration file, available with `.inner()` or `.inner_mut()`.
//!
//! The struct itself describes its version and default filename through the `IntoConfig`
//! trait, see `#[into_configfile]` in `petshelter-macros`.
//!

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use eyre::Result;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, trace};

use crate::makepath;

/// Main name for the directory base
const TAG: &str = "petshelter";

/// Anything with a version number.
///
pub trait Versioned {
    fn version(&self) -> usize;
}

/// Describe a configuration file: expected version and default basename.
///
pub trait IntoConfig: Versioned {
    const VERSION: usize;
    const FILENAME: &'static str;
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Bad file version {0}, expected {1}")]
    BadFileVersion(usize, usize),
    #[error("Missing configuration file, use -c or create {0}")]
    MissingConfig(String),
    #[error("Can not find home directory")]
    NoHome,
}

/// Return the base directory for all our files (config, tokens).
///
/// - UNIX: `$HOME/.config/petshelter`
/// - Windows: `%LOCALAPPDATA%\petshelter`
///
#[tracing::instrument]
pub fn config_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or(ConfigError::NoHome)?;

    #[cfg(unix)]
    let base = makepath!(base.home_dir(), ".config", TAG);

    #[cfg(windows)]
    let base = makepath!(base.data_local_dir(), TAG);

    debug!("base = {base:?}");
    Ok(base)
}

/// Configuration for the CLI tool, supposed to include parameters and most importantly
/// credentials for the remote API.
///
#[derive(Debug)]
pub struct ConfigFile<T: Debug + DeserializeOwned + IntoConfig> {
    /// This is the base directory for all files.
    basedir: PathBuf,
    inner: T,
}

impl<T> ConfigFile<T>
where
    T: Debug + DeserializeOwned + IntoConfig,
{
    /// Returns the path of the default config directory
    ///
    #[tracing::instrument(skip(self))]
    pub fn config_path(&self) -> PathBuf {
        self.basedir.clone()
    }

    /// Returns the path of the default config file
    ///
    #[tracing::instrument]
    pub fn default_file() -> Result<PathBuf> {
        let cfg = config_dir()?.join(T::FILENAME);
        debug!("default = {cfg:?}");
        Ok(cfg)
    }

    /// Load the file and return a struct T in the right format.
    ///
    /// Use the following search path:
    /// - file specified on CLI
    /// - default basedir (base on $HOME or $LOCALAPPDATA)
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<ConfigFile<T>> {
        let fname = match fname {
            Some(fname) => fname.to_path_buf(),
            None => Self::default_file()?,
        };

        // Use a full path
        //
        let fname = if fname.exists() {
            fname.canonicalize()?
        } else {
            return Err(ConfigError::MissingConfig(fname.to_string_lossy().to_string()).into());
        };
        let basedir = match fname.parent() {
            Some(dir) => dir.to_path_buf(),
            None => config_dir()?,
        };

        trace!("Loading config file {fname:?} from {basedir:?}");

        let data = fs::read_to_string(&fname)?;
        debug!("string data = {data}");

        let data: T = hcl::from_str(&data)?;
        debug!("struct data = {data:?}");

        if data.version() != T::VERSION {
            return Err(ConfigError::BadFileVersion(data.version(), T::VERSION).into());
        }
        Ok(ConfigFile {
            basedir,
            inner: data,
        })
    }

    /// Return the inner configuration file
    ///
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Return the inner configuration file as putable
    ///
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the engine and return the configuration
    ///
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntoConfig, Versioned};
    use petshelter_macros::into_configfile;
    use serde::Deserialize;
    use std::io::Write;

    #[into_configfile(version = 2, filename = "foo.hcl")]
    #[derive(Clone, Debug, Default, Deserialize)]
    struct Foo {
        pub name: String,
    }

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_config_attributes() {
        assert_eq!(2, Foo::VERSION);
        assert_eq!("foo.hcl", Foo::FILENAME);
    }

    #[test]
    fn test_config_default_file() -> Result<()> {
        let f = ConfigFile::<Foo>::default_file()?;
        assert!(f.ends_with("petshelter/foo.hcl"));
        Ok(())
    }

    #[test_pretty_log::test]
    fn test_config_engine_load_file() -> Result<()> {
        let f = write_config("version = 2\nname = \"shelter\"\n");
        let cfg = ConfigFile::<Foo>::load(Some(f.path()))?;
        assert_eq!(2, cfg.inner().version());
        assert_eq!("shelter", cfg.inner().name);
        Ok(())
    }

    #[test]
    fn test_config_engine_bad_version() {
        let f = write_config("version = 1\nname = \"shelter\"\n");
        let cfg = ConfigFile::<Foo>::load(Some(f.path()));
        assert!(cfg.is_err());
        let err = cfg.unwrap_err();
        assert_eq!(
            Some(&ConfigError::BadFileVersion(1, 2)),
            err.downcast_ref::<ConfigError>()
        );
    }

    #[test]
    fn test_config_engine_missing_file() {
        let cfg = ConfigFile::<Foo>::load(Some(Path::new("/nonexistent/foo.hcl")));
        assert!(cfg.is_err());
    }
}
