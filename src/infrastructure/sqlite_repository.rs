// SQLite repository implementation
use crate::application::query_repository::QueryRepository;
use crate::domain::weather_query::{NewWeatherQuery, WeatherQuery, WeatherQueryPatch};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tracing::instrument;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS weather_queries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    location TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    weather_data TEXT NOT NULL
);
"#;

const SELECT_COLUMNS: &str =
    "SELECT id, location, start_date, end_date, created_at, weather_data FROM weather_queries";

pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database url {database_url}"))?
        .create_if_missing(true);

    // Each connection to an in-memory database sees its own empty database
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("Failed to open SQLite database")
}

#[derive(Debug, FromRow)]
struct WeatherQueryRow {
    id: i64,
    location: String,
    start_date: String,
    end_date: String,
    created_at: DateTime<Utc>,
    weather_data: String,
}

impl TryFrom<WeatherQueryRow> for WeatherQuery {
    type Error = anyhow::Error;

    fn try_from(row: WeatherQueryRow) -> Result<Self> {
        let weather_data = serde_json::from_str(&row.weather_data)
            .with_context(|| format!("Stored weather_data for query {} is not JSON", row.id))?;
        Ok(WeatherQuery {
            id: row.id,
            location: row.location,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: row.created_at,
            weather_data,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SqliteQueryRepository {
    pool: SqlitePool,
}

impl SqliteQueryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to create weather_queries table")?;
        Ok(())
    }
}

#[async_trait]
impl QueryRepository for SqliteQueryRepository {
    #[instrument(skip(self, query), fields(location = %query.location))]
    async fn create(&self, query: NewWeatherQuery) -> Result<i64> {
        let weather_data = serde_json::to_string(&query.weather_data)?;
        let result = sqlx::query(
            "INSERT INTO weather_queries (location, start_date, end_date, created_at, weather_data) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&query.location)
        .bind(&query.start_date)
        .bind(&query.end_date)
        .bind(Utc::now())
        .bind(weather_data)
        .execute(&self.pool)
        .await
        .context("Failed to insert weather query")?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self) -> Result<Vec<WeatherQuery>> {
        let rows: Vec<WeatherQueryRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list weather queries")?;

        rows.into_iter().map(WeatherQuery::try_from).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<WeatherQuery>> {
        let row: Option<WeatherQueryRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to load weather query")?;

        row.map(WeatherQuery::try_from).transpose()
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i64, patch: WeatherQueryPatch) -> Result<bool> {
        let weather_data = patch
            .weather_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        // NULL binds leave the column as it is
        let result = sqlx::query(
            "UPDATE weather_queries SET \
                location = COALESCE(?, location), \
                start_date = COALESCE(?, start_date), \
                end_date = COALESCE(?, end_date), \
                weather_data = COALESCE(?, weather_data) \
             WHERE id = ?",
        )
        .bind(patch.location)
        .bind(patch.start_date)
        .bind(patch.end_date)
        .bind(weather_data)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update weather query")?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM weather_queries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete weather query")?;

        Ok(result.rows_affected() > 0)
    }
}
