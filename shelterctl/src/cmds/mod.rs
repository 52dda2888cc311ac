//! Implementation of the sub-commands needing shelters.
//!
//! Every command returns the text to display, the caller decides where it goes.
//!

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eyre::Result;
use tracing::{debug, trace};

use petshelter_common::{config_dir, Location};
use petshelter_shelters::{FileRepository, Repository, TokenStore};

use crate::{Config, Opts, Status};

pub use closest::*;
pub use edit::*;
pub use list::*;

mod closest;
mod edit;
mod list;

/// Everything a command may need
///
#[derive(Debug)]
pub struct Context {
    /// Where shelters come from
    pub repo: Arc<dyn Repository>,
    /// Default origin for `closest`
    pub home: Location,
    /// Token cache
    pub tokens: TokenStore,
    /// Do we talk to the API?
    pub remote: bool,
}

impl Context {
    /// With `-f` we read a file and do not need any configuration, otherwise load it.
    ///
    #[tracing::instrument(skip(opts))]
    pub fn new(opts: &Opts) -> Result<Self> {
        match &opts.file {
            Some(file) => {
                debug!("using shelters from {file:?}");
                Ok(Context {
                    repo: Arc::new(FileRepository::new(file)),
                    home: Location::default(),
                    tokens: TokenStore::new(&offline_base(config_dir())),
                    remote: false,
                })
            }
            None => {
                let (cfg, base) = Config::load(opts.config.as_deref())?;
                debug!("using API at {}", cfg.base_url);
                Ok(Context {
                    repo: Arc::new(cfg.remote(&base)),
                    home: cfg.home.unwrap_or_default(),
                    tokens: TokenStore::new(&base),
                    remote: true,
                })
            }
        }
    }
}

/// Tokens are useless without the API, any directory will do when there is no home.
///
fn offline_base(dir: Result<PathBuf>) -> PathBuf {
    dir.unwrap_or_else(|e| {
        debug!("no config dir ({e}), using the temporary one");
        std::env::temp_dir()
    })
}

fn token_message(path: &Path, token: &str) -> String {
    if token.is_empty() {
        format!("Empty token from the API, nothing stored in {path:?}")
    } else {
        format!("Token stored in {path:?} ({} chars)", token.len())
    }
}

/// Get a new token from the API (and cache it).
///
#[tracing::instrument(skip(ctx))]
pub fn fetch_token(ctx: &Context) -> Result<String> {
    trace!("token");

    if !ctx.remote {
        return Err(Status::NeedsApi.into());
    }
    let token = ctx.repo.get_token()?;
    Ok(token_message(&ctx.tokens.token_path(), &token))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn file_context() -> Context {
        let file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/shelters.json");
        let dir = std::env::temp_dir();
        Context {
            repo: Arc::new(FileRepository::new(&file)),
            home: Location::default(),
            tokens: TokenStore::new(&dir),
            remote: false,
        }
    }

    #[test]
    fn test_token_needs_api() {
        let ctx = file_context();
        let r = fetch_token(&ctx);
        assert_eq!(
            Some(&Status::NeedsApi),
            r.unwrap_err().downcast_ref::<Status>()
        );
    }

    #[test]
    fn test_token_message() {
        let path = Path::new("/tmp/tokens");
        let msg = token_message(path, "FOOBAR");
        assert!(msg.starts_with("Token stored in"));
        assert!(msg.contains("(6 chars)"));

        let msg = token_message(path, "");
        assert!(msg.starts_with("Empty token"));
        assert!(!msg.contains("Token stored"));
    }

    #[test]
    fn test_offline_base_without_home() {
        let dir = offline_base(Err(eyre::eyre!("no home")));
        assert_eq!(std::env::temp_dir(), dir);

        let dir = offline_base(Ok(PathBuf::from("/some/where")));
        assert_eq!(PathBuf::from("/some/where"), dir);
    }
}
