// Repository trait for weather query persistence
use crate::domain::weather_query::{NewWeatherQuery, WeatherQuery, WeatherQueryPatch};
use async_trait::async_trait;

#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Insert a record and return its assigned id
    async fn create(&self, query: NewWeatherQuery) -> anyhow::Result<i64>;

    /// All records ordered by id
    async fn list(&self) -> anyhow::Result<Vec<WeatherQuery>>;

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<WeatherQuery>>;

    /// Overwrite the provided fields. Returns false when no record has this id.
    async fn update(&self, id: i64, patch: WeatherQueryPatch) -> anyhow::Result<bool>;

    /// Returns false when no record has this id.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}
