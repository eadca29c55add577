//! Academic year listing and active-year selection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use semestra_core::{AppError, AppResult, InstitutionId, UserIdentity};
use semestra_domain::AcademicYearLabel;

use crate::notify::{Notice, NotificationSink};

/// Repository port for academic year persistence.
#[async_trait]
pub trait AcademicYearRepository: Send + Sync {
    /// Lists an institution's academic years in ascending label order.
    async fn list_years(
        &self,
        institution_id: InstitutionId,
    ) -> AppResult<Vec<AcademicYearLabel>>;

    /// Appends a new academic year. Fails with a conflict when the label
    /// already exists for the institution.
    async fn insert_year(
        &self,
        institution_id: InstitutionId,
        label: &AcademicYearLabel,
    ) -> AppResult<()>;
}

#[derive(Debug)]
struct PeriodState {
    years: Vec<AcademicYearLabel>,
    active_year: Option<AcademicYearLabel>,
    loading: bool,
}

impl Default for PeriodState {
    fn default() -> Self {
        Self {
            years: Vec::new(),
            active_year: None,
            loading: true,
        }
    }
}

/// Application service owning the available years and the active selection.
///
/// Year-dependent UI must not render while [`PeriodService::is_loading`]
/// reports `true`.
pub struct PeriodService {
    years: Arc<dyn AcademicYearRepository>,
    notifications: Arc<dyn NotificationSink>,
    state: RwLock<PeriodState>,
}

impl PeriodService {
    /// Creates a period service over a year repository.
    #[must_use]
    pub fn new(
        years: Arc<dyn AcademicYearRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            years,
            notifications,
            state: RwLock::new(PeriodState::default()),
        }
    }

    /// Fetches the institution's years into the cached set.
    ///
    /// A fetch failure degrades to an empty set, emits a warning notice and
    /// clears the loading flag; it is never surfaced to the caller.
    pub async fn load(&self, actor: &UserIdentity) {
        let fetched = match self.years.list_years(actor.institution_id()).await {
            Ok(years) => years,
            Err(error) => {
                warn!(
                    institution = %actor.institution_id(),
                    %error,
                    "academic year fetch failed, degrading to empty set"
                );
                self.notifications
                    .publish(Notice::warning("Could not load academic years."))
                    .await;
                Vec::new()
            }
        };

        let mut state = self.state.write().await;
        state.years = fetched;
        state.loading = false;
    }

    /// Returns the cached year set in ascending order.
    pub async fn years(&self) -> Vec<AcademicYearLabel> {
        self.state.read().await.years.clone()
    }

    /// Returns whether the initial fetch is still outstanding.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Returns the active year selection, if any.
    pub async fn active_year(&self) -> Option<AcademicYearLabel> {
        self.state.read().await.active_year.clone()
    }

    /// Validates, persists and caches a new academic year.
    ///
    /// Fails with [`AppError::Validation`] for malformed labels before any
    /// write, and with [`AppError::Conflict`] for duplicates.
    pub async fn add_year(
        &self,
        actor: &UserIdentity,
        label: &str,
    ) -> AppResult<AcademicYearLabel> {
        let label = AcademicYearLabel::parse(label)?;

        {
            let state = self.state.read().await;
            if state.years.contains(&label) {
                return Err(AppError::Conflict(format!(
                    "academic year '{label}' already exists for institution '{}'",
                    actor.institution_id()
                )));
            }
        }

        self.years
            .insert_year(actor.institution_id(), &label)
            .await?;

        let mut state = self.state.write().await;
        if let Err(position) = state.years.binary_search(&label) {
            state.years.insert(position, label.clone());
        }

        Ok(label)
    }

    /// Switches the active year.
    ///
    /// A pure state transition: membership is not validated because callers
    /// pick from [`PeriodService::years`]. Term re-resolution is driven by
    /// the owning [`crate::SessionContext`].
    pub async fn set_active_year(&self, year: AcademicYearLabel) {
        self.state.write().await.active_year = Some(year);
    }

    /// Clears in-session state back to its pre-load shape.
    pub async fn reset(&self) {
        *self.state.write().await = PeriodState::default();
    }
}
