//! State behind the detail screen: one shelter being looked at and edited.
//!
//! Edits never touch the repository, they replace the current snapshot with a modified copy.
//!

use std::sync::Arc;

use eyre::Result;
use tokio::sync::watch;
use tracing::trace;

use petshelter_common::parse_coord;

use crate::{Address, Repository, Shelter, ShelterError, ShelterType};

#[derive(Debug)]
pub struct DetailState {
    repo: Arc<dyn Repository>,
    shelter: watch::Sender<Shelter>,
}

impl DetailState {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        DetailState {
            repo,
            shelter: watch::channel(Shelter::default()).0,
        }
    }

    /// Fetch shelter `id`.  On error the current snapshot is kept.
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&self, id: &str) -> Result<()> {
        let shelter = self.repo.get_shelter(id)?;
        trace!("loaded {}", shelter.name);
        self.shelter.send_replace(shelter);
        Ok(())
    }

    pub fn update_shelter_type(&self, shelter_type: ShelterType) {
        self.shelter.send_modify(|s| s.shelter_type = shelter_type);
    }

    pub fn update_phone(&self, phone: &str) {
        self.shelter.send_modify(|s| s.phone_number = phone.to_string());
    }

    pub fn update_name(&self, name: &str) {
        self.shelter.send_modify(|s| s.name = name.to_string());
    }

    /// Both values come as text from the user.  Nothing changes unless both parse.
    ///
    #[tracing::instrument(skip(self))]
    pub fn update_address(&self, latitude: &str, longitude: &str) -> Result<()> {
        let lat = parse_coord(latitude).map_err(|e| ShelterError::BadCoordinate(e.to_string()))?;
        let lon = parse_coord(longitude).map_err(|e| ShelterError::BadCoordinate(e.to_string()))?;
        self.shelter.send_modify(|s| s.address = Address::new(lat, lon));
        Ok(())
    }

    /// Current snapshot
    ///
    pub fn shelter(&self) -> Shelter {
        self.shelter.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Shelter> {
        self.shelter.subscribe()
    }
}
