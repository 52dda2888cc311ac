//! State behind the map screen: shelter list, info panel, user position and camera.
//!

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use petshelter_common::Location;

use crate::{find_closest, Repository, Shelter, ShelterError};

/// Zoom level when showing the whole area
pub const DEF_ZOOM: f32 = 6.;
/// Zoom level when focusing on one point
pub const CLOSE_ZOOM: f32 = 9.;

/// Loading state of the shelter list
///
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ShelterListState {
    #[default]
    Loading,
    Success(Vec<Shelter>),
    Error(String),
}

impl ShelterListState {
    /// Shelters if loaded, empty otherwise
    ///
    pub fn shelters(&self) -> &[Shelter] {
        match self {
            ShelterListState::Success(list) => list,
            _ => &[],
        }
    }
}

/// Info panel position
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SheetState {
    #[default]
    Collapsed,
    Expanded,
}

/// Where the map looks at
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub target: Location,
    pub zoom: f32,
}

impl Camera {
    pub fn new(target: Location, zoom: f32) -> Self {
        Camera { target, zoom }
    }
}

#[derive(Debug)]
pub struct MapState {
    repo: Arc<dyn Repository>,
    list: watch::Sender<ShelterListState>,
    modal: watch::Sender<Vec<Shelter>>,
    sheet: watch::Sender<SheetState>,
    permission: watch::Sender<bool>,
    user_location: watch::Sender<Location>,
    camera: watch::Sender<Camera>,
}

impl MapState {
    /// Create the state, nothing is loaded yet.  User location defaults to Madrid.
    ///
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        let home = Location::default();
        MapState {
            repo,
            list: watch::channel(ShelterListState::Loading).0,
            modal: watch::channel(vec![]).0,
            sheet: watch::channel(SheetState::Collapsed).0,
            permission: watch::channel(false).0,
            user_location: watch::channel(home).0,
            camera: watch::channel(Camera::new(home, DEF_ZOOM)).0,
        }
    }

    /// Fetch all shelters from the repository.  An empty list is an error.
    ///
    #[tracing::instrument(skip(self))]
    pub fn load(&self) {
        self.list.send_replace(ShelterListState::Loading);

        let state = match self.repo.get_all_shelters() {
            Ok(list) if list.is_empty() => {
                warn!("no shelters");
                ShelterListState::Error(ShelterError::EmptyList.to_string())
            }
            Ok(list) => {
                debug!("loaded {} shelters", list.len());
                ShelterListState::Success(list)
            }
            Err(e) => {
                warn!("can not load shelters: {e}");
                ShelterListState::Error(e.to_string())
            }
        };
        self.list.send_replace(state);
    }

    /// Show in the info panel every shelter named `name`.
    ///
    #[tracing::instrument(skip(self))]
    pub fn set_modal_shelter(&self, name: &str) {
        let modal: Vec<Shelter> = self
            .list
            .borrow()
            .shelters()
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect();
        trace!("{} shelter(s) in modal", modal.len());
        self.modal.send_replace(modal);
    }

    pub fn toggle_modal(&self) {
        self.sheet.send_modify(|s| {
            *s = match s {
                SheetState::Collapsed => SheetState::Expanded,
                SheetState::Expanded => SheetState::Collapsed,
            }
        });
    }

    pub fn collapse_modal(&self) {
        self.sheet.send_replace(SheetState::Collapsed);
    }

    /// Record the answer to the location permission request.  When granted and we know where
    /// the user is, recenter the map there.
    ///
    #[tracing::instrument(skip(self))]
    pub fn on_permission_result(&self, granted: bool, location: Option<Location>) {
        self.permission.send_replace(granted);
        if !granted {
            return;
        }
        if let Some(loc) = location {
            self.user_location.send_replace(loc);
            self.camera.send_replace(Camera::new(loc, DEF_ZOOM));
        }
    }

    pub fn move_camera_to_user_location(&self) {
        let loc = *self.user_location.borrow();
        self.camera.send_replace(Camera::new(loc, CLOSE_ZOOM));
    }

    /// Closest shelter from the user, only if we have shelters and are allowed to use the
    /// user's position.
    ///
    #[tracing::instrument(skip(self))]
    pub fn closest_shelter(&self) -> Option<Shelter> {
        let list = self.list.borrow();
        let shelters = list.shelters();
        if shelters.is_empty() || !*self.permission.borrow() {
            return None;
        }
        let origin = *self.user_location.borrow();
        find_closest(&origin, shelters).cloned()
    }

    /// Put the closest shelter in the info panel, toggle it and move the camera on it.
    /// Nothing happens if there is no such shelter.
    ///
    #[tracing::instrument(skip(self))]
    pub fn on_closest_shelter_clicked(&self) -> Option<Shelter> {
        let closest = self.closest_shelter()?;

        self.modal.send_replace(vec![closest.clone()]);
        self.toggle_modal();
        self.camera
            .send_replace(Camera::new(closest.location(), CLOSE_ZOOM));
        Some(closest)
    }

    // Snapshots

    pub fn list_state(&self) -> ShelterListState {
        self.list.borrow().clone()
    }

    pub fn modal_shelters(&self) -> Vec<Shelter> {
        self.modal.borrow().clone()
    }

    pub fn sheet(&self) -> SheetState {
        *self.sheet.borrow()
    }

    pub fn permission_granted(&self) -> bool {
        *self.permission.borrow()
    }

    pub fn user_location(&self) -> Location {
        *self.user_location.borrow()
    }

    pub fn camera(&self) -> Camera {
        *self.camera.borrow()
    }

    // Subscriptions

    pub fn subscribe_list(&self) -> watch::Receiver<ShelterListState> {
        self.list.subscribe()
    }

    pub fn subscribe_modal(&self) -> watch::Receiver<Vec<Shelter>> {
        self.modal.subscribe()
    }

    pub fn subscribe_sheet(&self) -> watch::Receiver<SheetState> {
        self.sheet.subscribe()
    }

    pub fn subscribe_permission(&self) -> watch::Receiver<bool> {
        self.permission.subscribe()
    }

    pub fn subscribe_user_location(&self) -> watch::Receiver<Location> {
        self.user_location.subscribe()
    }

    pub fn subscribe_camera(&self) -> watch::Receiver<Camera> {
        self.camera.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Address, MemoryRepository};

    fn shelter(name: &str, lat: f64, lon: f64) -> Shelter {
        Shelter {
            id: name.to_lowercase(),
            name: name.to_string(),
            address: Address::new(lat, lon),
            ..Default::default()
        }
    }

    fn loaded(list: Vec<Shelter>) -> MapState {
        let state = MapState::new(Arc::new(MemoryRepository::new(list)));
        state.load();
        state
    }

    fn madrid() -> Vec<Shelter> {
        vec![
            shelter("Alcala", 40.482, -3.364),
            shelter("Centro", 40.42, -3.70),
            shelter("Burgos", 42.34, -3.70),
        ]
    }

    #[test]
    fn test_initial_state() {
        let state = MapState::new(Arc::new(MemoryRepository::default()));
        assert_eq!(ShelterListState::Loading, state.list_state());
        assert_eq!(SheetState::Collapsed, state.sheet());
        assert!(!state.permission_granted());
        assert_eq!(Location::default(), state.user_location());
        assert_eq!(Camera::new(Location::default(), DEF_ZOOM), state.camera());
    }

    #[test]
    fn test_load_success() {
        let state = loaded(madrid());
        assert_eq!(ShelterListState::Success(madrid()), state.list_state());
    }

    #[test_pretty_log::test]
    fn test_load_empty_is_error() {
        let state = loaded(vec![]);
        assert_eq!(
            ShelterListState::Error("Empty pet shelter list".to_string()),
            state.list_state()
        );
    }

    #[test]
    fn test_set_modal_shelter() {
        let state = loaded(madrid());
        state.set_modal_shelter("Centro");
        assert_eq!(vec![madrid()[1].clone()], state.modal_shelters());

        state.set_modal_shelter("Nowhere");
        assert!(state.modal_shelters().is_empty());
    }

    #[test]
    fn test_set_modal_shelter_not_loaded() {
        let state = MapState::new(Arc::new(MemoryRepository::new(madrid())));
        state.set_modal_shelter("Centro");
        assert!(state.modal_shelters().is_empty());
    }

    #[test]
    fn test_toggle_and_collapse() {
        let state = loaded(madrid());
        state.toggle_modal();
        assert_eq!(SheetState::Expanded, state.sheet());
        state.toggle_modal();
        assert_eq!(SheetState::Collapsed, state.sheet());
        state.toggle_modal();
        state.collapse_modal();
        assert_eq!(SheetState::Collapsed, state.sheet());
    }

    #[test]
    fn test_closest_needs_permission() {
        let state = loaded(madrid());
        assert!(state.closest_shelter().is_none());
        assert!(state.on_closest_shelter_clicked().is_none());
        assert!(state.modal_shelters().is_empty());
        assert_eq!(SheetState::Collapsed, state.sheet());
    }

    #[test]
    fn test_closest_with_permission() {
        let state = loaded(madrid());
        state.on_permission_result(true, None);
        assert_eq!("Centro", state.closest_shelter().unwrap().name);
    }

    #[test]
    fn test_permission_moves_camera() {
        let state = loaded(madrid());
        let here = Location::new(40.45, -3.40);
        state.on_permission_result(true, Some(here));
        assert_eq!(here, state.user_location());
        assert_eq!(Camera::new(here, DEF_ZOOM), state.camera());
        assert_eq!("Alcala", state.closest_shelter().unwrap().name);
    }

    #[test]
    fn test_permission_denied_ignores_location() {
        let state = loaded(madrid());
        state.on_permission_result(false, Some(Location::new(0., 0.)));
        assert!(!state.permission_granted());
        assert_eq!(Location::default(), state.user_location());
    }

    #[test_pretty_log::test]
    fn test_on_closest_shelter_clicked() {
        let state = loaded(madrid());
        state.on_permission_result(true, None);

        let closest = state.on_closest_shelter_clicked().unwrap();
        assert_eq!("Centro", closest.name);
        assert_eq!(vec![closest.clone()], state.modal_shelters());
        assert_eq!(SheetState::Expanded, state.sheet());
        assert_eq!(Camera::new(closest.location(), CLOSE_ZOOM), state.camera());
    }

    #[test]
    fn test_closest_none_in_range() {
        let state = loaded(vec![shelter("Burgos", 42.34, -3.70)]);
        state.on_permission_result(true, None);
        assert!(state.on_closest_shelter_clicked().is_none());
        assert_eq!(Camera::new(Location::default(), DEF_ZOOM), state.camera());
    }

    #[test]
    fn test_move_camera_to_user() {
        let state = loaded(madrid());
        state.move_camera_to_user_location();
        assert_eq!(Camera::new(Location::default(), CLOSE_ZOOM), state.camera());
    }

    #[tokio::test]
    async fn test_subscribe_modal() {
        let state = loaded(madrid());
        let mut rx = state.subscribe_modal();

        state.set_modal_shelter("Alcala");
        rx.changed().await.unwrap();
        assert_eq!("Alcala", rx.borrow()[0].name);
    }

    #[tokio::test]
    async fn test_subscribe_permission_and_location() {
        let state = loaded(madrid());
        let mut perm = state.subscribe_permission();
        let mut loc = state.subscribe_user_location();
        let mut cam = state.subscribe_camera();
        assert!(!*perm.borrow());

        let here = Location::new(40.48, -3.37);
        state.on_permission_result(true, Some(here));

        perm.changed().await.unwrap();
        assert!(*perm.borrow());
        loc.changed().await.unwrap();
        assert_eq!(here, *loc.borrow());
        cam.changed().await.unwrap();
        assert_eq!(Camera::new(here, DEF_ZOOM), *cam.borrow());
    }
}
