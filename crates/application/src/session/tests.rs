use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;

use semestra_core::{AppResult, InstitutionId, UserIdentity};
use semestra_domain::{AcademicYearLabel, Term, TermId};

use crate::notify::{Notice, NotificationSink};
use crate::period_service::{AcademicYearRepository, PeriodService};
use crate::term_resolver::{Clock, SelectionStore, TermRepository, TermResolver};

use super::SessionContext;

struct FakeAcademicYearRepository {
    years: Vec<AcademicYearLabel>,
}

#[async_trait]
impl AcademicYearRepository for FakeAcademicYearRepository {
    async fn list_years(
        &self,
        _institution_id: InstitutionId,
    ) -> AppResult<Vec<AcademicYearLabel>> {
        Ok(self.years.clone())
    }

    async fn insert_year(
        &self,
        _institution_id: InstitutionId,
        _label: &AcademicYearLabel,
    ) -> AppResult<()> {
        Ok(())
    }
}

struct FakeTermRepository {
    terms: HashMap<AcademicYearLabel, Vec<Term>>,
}

#[async_trait]
impl TermRepository for FakeTermRepository {
    async fn list_terms(
        &self,
        _institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<Vec<Term>> {
        Ok(self.terms.get(year).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeSelectionStore {
    entries: Mutex<HashMap<(InstitutionId, AcademicYearLabel), TermId>>,
}

#[async_trait]
impl SelectionStore for FakeSelectionStore {
    async fn get_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<Option<TermId>> {
        Ok(self
            .entries
            .lock()
            .await
            .get(&(institution_id, year.clone()))
            .copied())
    }

    async fn set_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
        term_id: TermId,
    ) -> AppResult<()> {
        self.entries
            .lock()
            .await
            .insert((institution_id, year.clone()), term_id);
        Ok(())
    }

    async fn delete_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<()> {
        self.entries
            .lock()
            .await
            .remove(&(institution_id, year.clone()));
        Ok(())
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

struct NullNotificationSink;

#[async_trait]
impl NotificationSink for NullNotificationSink {
    async fn publish(&self, _notice: Notice) {}
}

fn year(value: &str) -> AcademicYearLabel {
    AcademicYearLabel::parse(value).unwrap_or_else(|_| unreachable!())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| unreachable!())
}

fn identity() -> UserIdentity {
    UserIdentity::new(
        "subject-1",
        "Dana Naser",
        None,
        InstitutionId::new(),
        "teacher",
    )
}

async fn context_with_years() -> SessionContext {
    let label = year("2024-2025");
    let first_term = Term::new(
        TermId::new(),
        label.clone(),
        "First Term",
        date(2024, 9, 1),
        date(2024, 12, 20),
    )
    .unwrap_or_else(|_| unreachable!());

    let sink = Arc::new(NullNotificationSink);
    let period = PeriodService::new(
        Arc::new(FakeAcademicYearRepository {
            years: vec![year("2023-2024"), label.clone()],
        }),
        sink.clone(),
    );
    let terms = TermResolver::new(
        Arc::new(FakeTermRepository {
            terms: HashMap::from([(label, vec![first_term])]),
        }),
        Arc::new(FakeSelectionStore::default()),
        Arc::new(FixedClock(
            date(2024, 10, 1)
                .and_hms_opt(8, 0, 0)
                .unwrap_or_else(|| unreachable!())
                .and_utc(),
        )),
        sink,
    );

    SessionContext::initialize(identity(), period, terms).await
}

#[tokio::test]
async fn initialize_loads_years_and_leaves_terms_empty_without_an_active_year() {
    let context = context_with_years().await;

    assert!(!context.period().is_loading().await);
    assert_eq!(context.period().years().await.len(), 2);
    assert_eq!(context.period().active_year().await, None);
    assert!(context.terms().terms().await.is_empty());
    assert_eq!(context.terms().selected_term().await, None);
}

#[tokio::test]
async fn switching_the_year_resolves_terms_before_returning() {
    let context = context_with_years().await;

    let resolved = context.set_active_year(year("2024-2025")).await;

    assert_eq!(
        resolved.map(|term| term.name().as_str().to_owned()),
        Some("First Term".to_owned())
    );
    assert_eq!(context.period().active_year().await, Some(year("2024-2025")));
    assert_eq!(context.terms().terms().await.len(), 1);
}

#[tokio::test]
async fn switching_to_a_year_without_terms_clears_the_selection() {
    let context = context_with_years().await;
    context.set_active_year(year("2024-2025")).await;

    let resolved = context.set_active_year(year("2023-2024")).await;

    assert_eq!(resolved, None);
    assert!(context.terms().terms().await.is_empty());
    assert_eq!(context.terms().selected_term().await, None);
}

#[tokio::test]
async fn teardown_clears_in_session_state() {
    let context = context_with_years().await;
    context.set_active_year(year("2024-2025")).await;

    context.teardown().await;

    assert_eq!(context.period().active_year().await, None);
    assert!(context.terms().terms().await.is_empty());
    assert!(context.period().is_loading().await);
}
