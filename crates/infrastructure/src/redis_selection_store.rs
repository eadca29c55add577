//! Redis-backed persisted storage for the active term selection.

use async_trait::async_trait;
use uuid::Uuid;

use semestra_application::SelectionStore;
use semestra_core::{AppError, AppResult, InstitutionId};
use semestra_domain::{AcademicYearLabel, TermId};

use redis::AsyncCommands;

/// Redis implementation of the selection store port.
///
/// Keys combine the configured prefix with the institution and year, so two
/// institutions sharing a year label can never collide.
#[derive(Clone)]
pub struct RedisSelectionStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisSelectionStore {
    /// Creates a store adapter with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn key_for(&self, institution_id: InstitutionId, year: &AcademicYearLabel) -> String {
        format!("{}:{institution_id}:term:{year}", self.key_prefix)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Fetch(format!("failed to connect to redis: {error}")))
    }
}

#[async_trait]
impl SelectionStore for RedisSelectionStore {
    async fn get_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<Option<TermId>> {
        let key = self.key_for(institution_id, year);
        let mut connection = self.connection().await?;

        let encoded: Option<String> = connection.get(key).await.map_err(|error| {
            AppError::Fetch(format!("failed to read term selection entry: {error}"))
        })?;

        encoded
            .as_deref()
            .map(|value| {
                Uuid::parse_str(value).map(TermId::from_uuid).map_err(|error| {
                    AppError::Internal(format!(
                        "invalid term selection value '{value}' stored for year '{year}': {error}"
                    ))
                })
            })
            .transpose()
    }

    async fn set_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
        term_id: TermId,
    ) -> AppResult<()> {
        let key = self.key_for(institution_id, year);
        let mut connection = self.connection().await?;

        connection
            .set::<_, _, ()>(key, term_id.to_string())
            .await
            .map_err(|error| {
                AppError::Fetch(format!("failed to write term selection entry: {error}"))
            })
    }

    async fn delete_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<()> {
        let key = self.key_for(institution_id, year);
        let mut connection = self.connection().await?;

        connection.del::<_, ()>(key).await.map_err(|error| {
            AppError::Fetch(format!("failed to remove term selection entry: {error}"))
        })
    }
}
