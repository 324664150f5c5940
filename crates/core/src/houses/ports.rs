//! Port interface for the houses API

use async_trait::async_trait;
use housewatch_domain::{ApiError, House};

/// Read access to the houses catalog.
#[async_trait]
pub trait HousesApi: Send + Sync {
    /// Fetch every house.
    async fn list_houses(&self) -> Result<Vec<House>, ApiError>;

    /// Fetch one house. An empty id is rejected without any I/O.
    async fn get_house_by_id(&self, id: &str) -> Result<House, ApiError>;
}
