//! Per-session contextual state shared by presentation components.

use semestra_core::UserIdentity;
use semestra_domain::{AcademicYearLabel, Term};

use crate::period_service::PeriodService;
use crate::term_resolver::TermResolver;

/// Explicit per-session context replacing ambient global providers.
///
/// Initialization order is fixed: identity, then period, then term. Every
/// consumer receives the context by reference; nothing in this layer holds
/// process-wide mutable state.
pub struct SessionContext {
    identity: UserIdentity,
    period: PeriodService,
    terms: TermResolver,
}

impl SessionContext {
    /// Builds the context and runs the ordered initial load: the year set is
    /// fetched first, then the term selection is resolved for whatever year
    /// is active (none, on a fresh session).
    pub async fn initialize(
        identity: UserIdentity,
        period: PeriodService,
        terms: TermResolver,
    ) -> Self {
        let context = Self {
            identity,
            period,
            terms,
        };

        context.period.load(&context.identity).await;
        let active = context.period.active_year().await;
        context.terms.resolve(&context.identity, active).await;

        context
    }

    /// Returns the current actor.
    #[must_use]
    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    /// Returns the period service.
    #[must_use]
    pub fn period(&self) -> &PeriodService {
        &self.period
    }

    /// Returns the term resolver.
    #[must_use]
    pub fn terms(&self) -> &TermResolver {
        &self.terms
    }

    /// Switches the active year and awaits term re-resolution before
    /// returning, so no later change can observe a half-applied period.
    pub async fn set_active_year(&self, year: AcademicYearLabel) -> Option<Term> {
        self.period.set_active_year(year.clone()).await;
        self.terms.resolve(&self.identity, Some(year)).await
    }

    /// Clears in-session selection state. Persisted selections remain for
    /// the next session.
    pub async fn teardown(&self) {
        self.terms.reset().await;
        self.period.reset().await;
    }
}

#[cfg(test)]
mod tests;
