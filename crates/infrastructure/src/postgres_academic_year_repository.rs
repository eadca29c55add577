use async_trait::async_trait;

use semestra_application::AcademicYearRepository;
use semestra_core::{AppError, AppResult, InstitutionId};
use semestra_domain::AcademicYearLabel;

use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed repository for academic year listings.
#[derive(Clone)]
pub struct PostgresAcademicYearRepository {
    pool: PgPool,
}

impl PostgresAcademicYearRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct YearRow {
    label: String,
}

#[async_trait]
impl AcademicYearRepository for PostgresAcademicYearRepository {
    async fn list_years(
        &self,
        institution_id: InstitutionId,
    ) -> AppResult<Vec<AcademicYearLabel>> {
        let rows = sqlx::query_as::<_, YearRow>(
            r#"
            SELECT label
            FROM academic_years
            WHERE institution_id = $1
            ORDER BY label ASC
            "#,
        )
        .bind(institution_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Fetch(format!(
                "failed to load academic years for institution '{institution_id}': {error}"
            ))
        })?;

        rows.into_iter()
            .map(|row| {
                AcademicYearLabel::parse(row.label.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "invalid academic year label stored for institution '{institution_id}': {error}"
                    ))
                })
            })
            .collect()
    }

    async fn insert_year(
        &self,
        institution_id: InstitutionId,
        label: &AcademicYearLabel,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO academic_years (institution_id, label)
            VALUES ($1, $2)
            "#,
        )
        .bind(institution_id.as_uuid())
        .bind(label.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "academic year '{label}' already exists for institution '{institution_id}'"
                    )));
                }

                Err(AppError::Fetch(format!(
                    "failed to insert academic year '{label}' for institution '{institution_id}': {error}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests;
