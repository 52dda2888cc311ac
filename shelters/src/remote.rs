//! Access to the shelter API.
//!
//! Phases:
//! 1. use login & password submitted to get a token, cached on disk
//! 2. fetch the list of shelters (or a single one) with the token as bearer
//!
//! If the API refuses a cached token, it is purged and a fresh one fetched once.
//!

use clap::{crate_name, crate_version};
use eyre::Result;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tap::Tap;
use tracing::{debug, trace, warn};

use crate::{Repository, Shelter, ShelterError, TokenStore};

/// Credentials to submit to the site to get the token
///
#[derive(Debug, Serialize)]
struct Credentials {
    username: String,
    password: String,
}

/// Paths added to `base_url`
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Routes {
    /// Submit credentials here to get a token
    pub token: String,
    /// Get all shelters
    pub list: String,
    /// Get one shelter as `<get>/<id>`
    pub get: String,
}

impl Default for Routes {
    fn default() -> Self {
        Routes {
            token: "/api/auth/signin".to_string(),
            list: "/api/petshelter".to_string(),
            get: "/api/petshelter".to_string(),
        }
    }
}

/// RemoteRepository represent what is needed to connect & auth to and fetch data from the API.
///
#[derive(Clone, Debug)]
pub struct RemoteRepository {
    /// Base site url taken from config
    pub base_url: String,
    /// Different URLs available
    pub routes: Routes,
    /// Username
    pub login: String,
    /// Password
    password: String,
    /// Token cache
    pub tokens: TokenStore,
    /// reqwest blocking client
    client: Client,
}

impl RemoteRepository {
    #[tracing::instrument(skip(password))]
    pub fn new(base_url: &str, login: &str, password: &str, routes: Routes, tokens: TokenStore) -> Self {
        trace!("remote::new");
        RemoteRepository {
            base_url: base_url.trim_end_matches('/').to_string(),
            routes,
            login: login.to_string(),
            password: password.to_string(),
            tokens,
            client: Client::new(),
        }
    }

    /// Use the cached token if we have one, otherwise get a new one.
    ///
    #[tracing::instrument(skip(self))]
    pub fn authenticate(&self) -> Result<String> {
        match self.tokens.retrieve() {
            Ok(token) => {
                trace!("token is cached");
                Ok(token.token)
            }
            Err(e) => {
                trace!("no token ({e}), fetching one");
                self.get_token()
            }
        }
    }

    /// Perform an authenticated GET, retrying once with a fresh token if refused.
    ///
    #[tracing::instrument(skip(self))]
    fn get(&self, url: String) -> Result<Response> {
        let token = self.authenticate()?;
        let resp = http_get_auth!(self, url, &token).map_err(|e| ShelterError::HTTP(e.to_string()))?;

        let resp = match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("token refused, fetching a new one");
                if let Err(e) = self.tokens.purge() {
                    debug!("nothing to purge: {e}");
                }
                let token = self.get_token()?;
                http_get_auth!(self, url, &token).map_err(|e| ShelterError::HTTP(e.to_string()))?
            }
            _ => resp,
        };
        debug!("status={}", resp.status());
        Ok(resp)
    }
}

/// The API sends the token as plain text, sometimes as a JSON string.
///
fn clean_token(body: &str) -> String {
    body.trim().trim_matches('"').to_string()
}

impl Repository for RemoteRepository {
    #[tracing::instrument(skip(self))]
    fn get_all_shelters(&self) -> Result<Vec<Shelter>> {
        let url = format!("{}{}", self.base_url, self.routes.list);
        trace!("Fetching shelters through {}…", url);

        let resp = self.get(url)?;
        if !resp.status().is_success() {
            return Err(ShelterError::HTTP(resp.status().to_string()).into());
        }
        let body = resp.text().map_err(|e| ShelterError::HTTP(e.to_string()))?;
        let list: Vec<Shelter> =
            serde_json::from_str(&body).map_err(|e| ShelterError::Decoding(e.to_string()))?;
        debug!("got {} shelters", list.len());
        Ok(list)
    }

    #[tracing::instrument(skip(self))]
    fn get_shelter(&self, id: &str) -> Result<Shelter> {
        let url = format!("{}{}/{}", self.base_url, self.routes.get, id);
        trace!("Fetching shelter through {}…", url);

        let resp = self.get(url)?;
        match resp.status() {
            StatusCode::NOT_FOUND => return Err(ShelterError::NotFound(id.to_string()).into()),
            code if !code.is_success() => return Err(ShelterError::HTTP(code.to_string()).into()),
            _ => (),
        }
        let body = resp.text().map_err(|e| ShelterError::HTTP(e.to_string()))?;
        let shelter: Shelter =
            serde_json::from_str(&body).map_err(|e| ShelterError::Decoding(e.to_string()))?;
        Ok(shelter)
    }

    /// Always ask the API for a new token, and cache it when non-empty.
    ///
    #[tracing::instrument(skip(self))]
    fn get_token(&self) -> Result<String> {
        trace!("authenticate as ({:?})", &self.login);

        if self.login.is_empty() {
            return Err(ShelterError::NoCredentials(self.base_url.clone()).into());
        }

        // Prepare our submission data
        //
        let cred = Credentials {
            username: self.login.clone(),
            password: self.password.clone(),
        };

        let url = format!("{}{}", self.base_url, self.routes.token);
        trace!("Fetching token through {}…", url);
        let resp = http_post!(self, url, &cred)
            .map_err(|e| ShelterError::HTTP(e.to_string()))?
            .tap(|r| debug!("resp={:?}", r));

        if !resp.status().is_success() {
            return Err(ShelterError::HTTP(resp.status().to_string()).into());
        }
        let token = clean_token(&resp.text().map_err(|e| ShelterError::HTTP(e.to_string()))?);

        if !token.is_empty() {
            self.tokens.store(&token)?;
        } else {
            warn!("empty token from {url}");
        }
        Ok(token)
    }
}
