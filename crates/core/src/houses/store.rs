//! Fetch orchestration state for the houses catalog.
//!
//! [`reduce`] is a pure state transition; [`HousesStore`] drives it around
//! calls to a [`HousesApi`]. Instrumentation lives in the API client, so the
//! store emits no analytics of its own.

use std::sync::Arc;

use housewatch_domain::{ApiError, House};
use parking_lot::RwLock;
use tracing::debug;

use super::ports::HousesApi;

/// Snapshot of the catalog as seen by a consumer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HousesState {
    pub houses: Vec<House>,
    pub selected_house: Option<House>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HousesAction {
    FetchHousesStart,
    FetchHousesSuccess(Vec<House>),
    FetchHousesError(ApiError),
    FetchHouseStart,
    FetchHouseSuccess(House),
    FetchHouseError(ApiError),
    ClearError,
    ClearSelectedHouse,
}

/// Apply one action to a state.
///
/// A failed list fetch empties the list; a failed detail fetch clears the
/// selection.
pub fn reduce(state: HousesState, action: HousesAction) -> HousesState {
    match action {
        HousesAction::FetchHousesStart | HousesAction::FetchHouseStart => {
            HousesState { loading: true, error: None, ..state }
        }
        HousesAction::FetchHousesSuccess(houses) => {
            HousesState { houses, loading: false, error: None, ..state }
        }
        HousesAction::FetchHousesError(error) => {
            HousesState { houses: Vec::new(), loading: false, error: Some(error), ..state }
        }
        HousesAction::FetchHouseSuccess(house) => {
            HousesState { selected_house: Some(house), loading: false, error: None, ..state }
        }
        HousesAction::FetchHouseError(error) => {
            HousesState { selected_house: None, loading: false, error: Some(error), ..state }
        }
        HousesAction::ClearError => HousesState { error: None, ..state },
        HousesAction::ClearSelectedHouse => HousesState { selected_house: None, ..state },
    }
}

/// Shared catalog state backed by a [`HousesApi`].
pub struct HousesStore {
    api: Arc<dyn HousesApi>,
    state: RwLock<HousesState>,
}

impl HousesStore {
    pub fn new(api: Arc<dyn HousesApi>) -> Self {
        Self { api, state: RwLock::new(HousesState::default()) }
    }

    /// Current state (cloned).
    pub fn state(&self) -> HousesState {
        self.state.read().clone()
    }

    fn dispatch(&self, action: HousesAction) {
        let mut guard = self.state.write();
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, action);
    }

    /// Load the full list. Failures are kept in the state, not returned.
    pub async fn fetch_houses(&self) {
        self.dispatch(HousesAction::FetchHousesStart);
        match self.api.list_houses().await {
            Ok(houses) => {
                debug!(count = houses.len(), "houses loaded into store");
                self.dispatch(HousesAction::FetchHousesSuccess(houses));
            }
            Err(err) => self.dispatch(HousesAction::FetchHousesError(err)),
        }
    }

    /// Load one house into the selection.
    pub async fn fetch_house_by_id(&self, id: &str) {
        self.dispatch(HousesAction::FetchHouseStart);
        match self.api.get_house_by_id(id).await {
            Ok(house) => self.dispatch(HousesAction::FetchHouseSuccess(house)),
            Err(err) => self.dispatch(HousesAction::FetchHouseError(err)),
        }
    }

    pub fn clear_error(&self) {
        self.dispatch(HousesAction::ClearError);
    }

    pub fn clear_selected_house(&self) {
        self.dispatch(HousesAction::ClearSelectedHouse);
    }
}
