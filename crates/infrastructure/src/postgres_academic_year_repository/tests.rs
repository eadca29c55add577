use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use semestra_application::AcademicYearRepository;
use semestra_core::{AppError, InstitutionId};
use semestra_domain::AcademicYearLabel;

use super::PostgresAcademicYearRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for academic year repository tests: {error}");
    }

    Some(pool)
}

fn label(value: &str) -> AcademicYearLabel {
    AcademicYearLabel::parse(value).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn insert_list_round_trip_orders_ascending_and_rejects_duplicates() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresAcademicYearRepository::new(pool);
    let institution_id = InstitutionId::new();

    repository
        .insert_year(institution_id, &label("2024-2025"))
        .await
        .unwrap_or_else(|_| unreachable!());
    repository
        .insert_year(institution_id, &label("2023-2024"))
        .await
        .unwrap_or_else(|_| unreachable!());

    let years = repository
        .list_years(institution_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(years, vec![label("2023-2024"), label("2024-2025")]);

    let duplicate = repository
        .insert_year(institution_id, &label("2024-2025"))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    // Other institutions are unaffected by this one's labels.
    let other = InstitutionId::new();
    let other_years = repository
        .list_years(other)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(other_years.is_empty());
}
