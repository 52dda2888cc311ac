//! Module for caching the API token on disk.
//!
//! There is only one token, stored as JSON in `<basedir>/tokens/TOKEN`.  The token itself is
//! opaque to us, we only add the time we got it.
//!

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use chrono::{DateTime, TimeZone, Utc};
use eyre::Result;
use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{trace, warn};

use crate::TokenError;

/// Sub-directory for tokens
pub const TOKEN_BASE: &str = "tokens";

/// Token filename
const DEF_TOKEN: &str = "TOKEN";

/// What we store
///
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct StoredToken {
    /// The actual token
    pub token: String,
    /// When we got it
    pub created_at: i64,
}

impl StoredToken {
    pub fn new(token: &str) -> Self {
        StoredToken {
            token: token.to_string(),
            created_at: Utc::now().timestamp(),
        }
    }
}

/// Where tokens live
///
#[derive(Clone, Debug)]
pub struct TokenStore {
    base: PathBuf,
}

impl TokenStore {
    /// `basedir` is the configuration directory, tokens are in a sub-directory.
    ///
    pub fn new(basedir: &Path) -> Self {
        TokenStore {
            base: basedir.join(TOKEN_BASE),
        }
    }

    /// Returns the path of the directory storing tokens
    ///
    pub fn token_path(&self) -> PathBuf {
        self.base.clone()
    }

    #[inline]
    fn token_file(&self) -> PathBuf {
        self.base.join(DEF_TOKEN)
    }

    /// Return the cached token
    ///
    #[tracing::instrument(skip(self))]
    pub fn retrieve(&self) -> Result<StoredToken> {
        let fname = self.token_file();
        trace!("get_token from {fname:?}");
        if !fname.exists() {
            return Err(TokenError::Retrieval(fname.to_string_lossy().to_string()).into());
        }
        let data = fs::read_to_string(&fname)?;
        let token: StoredToken = serde_json::from_str(&data)
            .map_err(|_| TokenError::Invalid(fname.to_string_lossy().to_string()))?;
        if token.token.is_empty() {
            warn!("empty token in {fname:?}");
            return Err(TokenError::Invalid(fname.to_string_lossy().to_string()).into());
        }
        Ok(token)
    }

    /// Store (overwrite) the token.  Empty tokens are refused.
    ///
    #[tracing::instrument(skip(self, token))]
    pub fn store(&self, token: &str) -> Result<StoredToken> {
        if token.is_empty() {
            return Err(TokenError::Empty.into());
        }

        // Check token cache
        //
        if !self.base.exists() {
            trace!("create token store: {:?}", self.base);
            fs::create_dir_all(&self.base).map_err(|e| TokenError::Storing(e.to_string()))?;
        }

        let fname = self.token_file();
        trace!("store_token: {fname:?}");

        let stored = StoredToken::new(token);
        let data = serde_json::to_string(&stored)?;
        fs::write(&fname, data).map_err(|e| TokenError::Storing(e.to_string()))?;
        Ok(stored)
    }

    /// Remove the cached token
    ///
    #[tracing::instrument(skip(self))]
    pub fn purge(&self) -> Result<()> {
        let fname = self.token_file();
        trace!("purge token in {fname:?}");
        Ok(fs::remove_file(fname)?)
    }

    /// List tokens
    ///
    #[tracing::instrument(skip(self))]
    pub fn list(&self) -> Result<String> {
        trace!("listing tokens");

        let mut builder = Builder::default();
        builder.push_record(vec!["Path", "Created at"]);

        if let Ok(dir) = fs::read_dir(&self.base) {
            for fname in dir.flatten() {
                let name = fname.file_name().to_string_lossy().to_string();
                let created = fs::read_to_string(fname.path())
                    .ok()
                    .and_then(|data| serde_json::from_str::<StoredToken>(&data).ok())
                    .and_then(|t| Utc.timestamp_opt(t.created_at, 0).single())
                    .unwrap_or(DateTime::<Utc>::from(UNIX_EPOCH));
                builder.push_record(vec![name, created.to_string()]);
            }
        }
        let table = builder.build().with(Style::rounded()).to_string();
        Ok(format!("Listing all tokens:\n{}", table))
    }
}
