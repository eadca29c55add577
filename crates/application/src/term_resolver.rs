//! Deterministic term resolution for the active reporting period.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::warn;

use semestra_core::{AppResult, InstitutionId, UserIdentity};
use semestra_domain::{AcademicYearLabel, Term, TermId};

use crate::notify::{Notice, NotificationSink};

/// Repository port for term listings.
#[async_trait]
pub trait TermRepository: Send + Sync {
    /// Lists terms for one institution and year, ascending by start date.
    async fn list_terms(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<Vec<Term>>;
}

/// Persisted key-value port for the active term selection.
///
/// Selections are keyed by the composite `(institution, year)` so two
/// institutions can never collide on the same year label.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Returns the persisted term selection for one institution and year.
    async fn get_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<Option<TermId>>;

    /// Persists the term selection for one institution and year.
    async fn set_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
        term_id: TermId,
    ) -> AppResult<()>;

    /// Removes the persisted selection for one institution and year.
    async fn delete_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<()>;
}

/// Time source port, kept injectable so date-driven resolution stays
/// deterministic under test.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
struct TermState {
    year: Option<AcademicYearLabel>,
    terms: Vec<Term>,
    selected: Option<TermId>,
    loading: bool,
}

/// Application service resolving exactly one current term per active year.
///
/// Resolution precedence: a still-valid persisted selection, then the term
/// containing today, then the earliest term, else nothing. Selections
/// produced by the date or earliest rule are persisted immediately so later
/// sessions reuse them.
pub struct TermResolver {
    terms: Arc<dyn TermRepository>,
    selections: Arc<dyn SelectionStore>,
    clock: Arc<dyn Clock>,
    notifications: Arc<dyn NotificationSink>,
    state: RwLock<TermState>,
    epoch: AtomicU64,
}

impl TermResolver {
    /// Creates a term resolver over its collaborator ports.
    #[must_use]
    pub fn new(
        terms: Arc<dyn TermRepository>,
        selections: Arc<dyn SelectionStore>,
        clock: Arc<dyn Clock>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            terms,
            selections,
            clock,
            notifications,
            state: RwLock::new(TermState::default()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Resolves the term set and current selection for the given year.
    ///
    /// Fetch failures degrade to an empty set plus a warning notice and are
    /// never surfaced to the caller. A resolution whose triggering year is
    /// superseded before its fetch completes is discarded without touching
    /// state. Returns the resulting selection.
    pub async fn resolve(
        &self,
        actor: &UserIdentity,
        year: Option<AcademicYearLabel>,
    ) -> Option<Term> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(year) = year else {
            let mut state = self.state.write().await;
            if self.current_epoch() == epoch {
                *state = TermState::default();
            }
            return None;
        };

        {
            let mut state = self.state.write().await;
            if self.current_epoch() != epoch {
                return None;
            }
            state.year = Some(year.clone());
            state.loading = true;
        }

        let institution_id = actor.institution_id();
        let fetched = match self.terms.list_terms(institution_id, &year).await {
            Ok(terms) => terms,
            Err(error) => {
                warn!(
                    institution = %institution_id,
                    year = %year,
                    %error,
                    "term fetch failed, degrading to empty set"
                );
                self.notifications
                    .publish(Notice::warning(format!(
                        "Could not load terms for {year}."
                    )))
                    .await;

                let mut state = self.state.write().await;
                if self.current_epoch() == epoch {
                    state.terms.clear();
                    state.selected = None;
                    state.loading = false;
                }
                return None;
            }
        };

        if self.current_epoch() != epoch {
            return None;
        }

        let persisted = match self.selections.get_selection(institution_id, &year).await {
            Ok(selection) => selection,
            Err(error) => {
                // Degraded read: fall through to the date-based rules.
                warn!(
                    institution = %institution_id,
                    year = %year,
                    %error,
                    "selection read failed, falling back to date-based resolution"
                );
                None
            }
        };

        if self.current_epoch() != epoch {
            return None;
        }

        let restored = persisted
            .and_then(|id| fetched.iter().find(|term| term.term_id() == id))
            .cloned();

        let resolved = match restored {
            Some(term) => Some(term),
            None => {
                let derived = Self::derive_selection(&fetched, self.clock.now());
                match &derived {
                    Some(term) => {
                        if let Err(error) = self
                            .selections
                            .set_selection(institution_id, &year, term.term_id())
                            .await
                        {
                            warn!(
                                institution = %institution_id,
                                year = %year,
                                %error,
                                "failed to persist term selection"
                            );
                        }
                    }
                    None => {
                        if persisted.is_some()
                            && let Err(error) = self
                                .selections
                                .delete_selection(institution_id, &year)
                                .await
                        {
                            warn!(
                                institution = %institution_id,
                                year = %year,
                                %error,
                                "failed to remove stale term selection"
                            );
                        }
                    }
                }
                derived
            }
        };

        let mut state = self.state.write().await;
        if self.current_epoch() != epoch {
            return None;
        }
        state.terms = fetched;
        state.selected = resolved.as_ref().map(Term::term_id);
        state.loading = false;

        resolved
    }

    /// Applies an explicit term choice from the currently fetched set.
    ///
    /// Unknown ids are ignored without an error so callers can race against
    /// admin edits elsewhere. Returns whether the selection changed.
    pub async fn change_term(&self, actor: &UserIdentity, term_id: TermId) -> bool {
        let mut state = self.state.write().await;
        let Some(year) = state.year.clone() else {
            return false;
        };
        if !state.terms.iter().any(|term| term.term_id() == term_id) {
            return false;
        }

        state.selected = Some(term_id);

        if let Err(error) = self
            .selections
            .set_selection(actor.institution_id(), &year, term_id)
            .await
        {
            warn!(
                institution = %actor.institution_id(),
                year = %year,
                %error,
                "failed to persist explicit term selection"
            );
        }

        true
    }

    /// Re-runs resolution for the current year after external changes, e.g.
    /// a term added by an administrator elsewhere.
    pub async fn refetch(&self, actor: &UserIdentity) -> Option<Term> {
        let year = self.state.read().await.year.clone();
        self.resolve(actor, year).await
    }

    /// Returns the fetched term set in ascending start-date order.
    pub async fn terms(&self) -> Vec<Term> {
        self.state.read().await.terms.clone()
    }

    /// Returns the selected term, if any.
    pub async fn selected_term(&self) -> Option<Term> {
        let state = self.state.read().await;
        let selected = state.selected?;
        state
            .terms
            .iter()
            .find(|term| term.term_id() == selected)
            .cloned()
    }

    /// Returns whether a resolution fetch is outstanding.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Clears in-session state; persisted selections remain untouched.
    pub async fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = TermState::default();
    }

    fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// The date rule: the single term containing `now` wins, otherwise the
    /// earliest term. Ambiguous overlaps fall through to the earliest rule.
    fn derive_selection(terms: &[Term], now: DateTime<Utc>) -> Option<Term> {
        let today = now.date_naive();
        let mut containing = terms.iter().filter(|term| term.contains(today));
        let current = match (containing.next(), containing.next()) {
            (Some(term), None) => Some(term),
            _ => None,
        };

        current.or_else(|| terms.first()).cloned()
    }
}
