use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use semestra_application::TermRepository;
use semestra_core::{AppError, AppResult, InstitutionId};
use semestra_domain::{AcademicYearLabel, Term, TermId};

use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed repository for term listings.
#[derive(Clone)]
pub struct PostgresTermRepository {
    pool: PgPool,
}

impl PostgresTermRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TermRow {
    term_id: Uuid,
    year_label: String,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl TermRow {
    fn into_term(self) -> AppResult<Term> {
        let year = AcademicYearLabel::parse(self.year_label.as_str()).map_err(|error| {
            AppError::Internal(format!(
                "invalid year label stored on term '{}': {error}",
                self.term_id
            ))
        })?;

        Term::new(
            TermId::from_uuid(self.term_id),
            year,
            self.name,
            self.start_date,
            self.end_date,
        )
        .map_err(|error| {
            AppError::Internal(format!("invalid term '{}' in store: {error}", self.term_id))
        })
    }
}

#[async_trait]
impl TermRepository for PostgresTermRepository {
    async fn list_terms(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<Vec<Term>> {
        let rows = sqlx::query_as::<_, TermRow>(
            r#"
            SELECT term_id, year_label, name, start_date, end_date
            FROM terms
            WHERE institution_id = $1
                AND year_label = $2
            ORDER BY start_date ASC
            "#,
        )
        .bind(institution_id.as_uuid())
        .bind(year.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Fetch(format!(
                "failed to load terms for institution '{institution_id}' year '{year}': {error}"
            ))
        })?;

        rows.into_iter().map(TermRow::into_term).collect()
    }
}
