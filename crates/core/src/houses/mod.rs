//! Houses catalog: API client and fetch orchestration.

pub mod ports;
pub mod service;
pub mod store;

pub use ports::HousesApi;
pub use service::HousesService;
pub use store::{reduce, HousesAction, HousesState, HousesStore};
