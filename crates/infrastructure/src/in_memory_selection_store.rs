use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use semestra_application::SelectionStore;
use semestra_core::{AppResult, InstitutionId};
use semestra_domain::{AcademicYearLabel, TermId};

/// In-memory selection store adapter for tests and single-process hosts.
#[derive(Debug, Default)]
pub struct InMemorySelectionStore {
    entries: RwLock<HashMap<(InstitutionId, AcademicYearLabel), TermId>>,
}

impl InMemorySelectionStore {
    /// Creates an empty in-memory selection store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SelectionStore for InMemorySelectionStore {
    async fn get_selection(
        &self,
        institution_id: InstitutionId,
        year: &AcademicYearLabel,
    ) -> AppResult<Option<TermId>> {
        Ok(self
            .entries
            .read()
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
            .write()
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
            .write()
            .await
            .remove(&(institution_id, year.clone()));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use semestra_application::SelectionStore;
    use semestra_core::InstitutionId;
    use semestra_domain::{AcademicYearLabel, TermId};

    use super::InMemorySelectionStore;

    fn label(value: &str) -> AcademicYearLabel {
        AcademicYearLabel::parse(value).unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn set_get_delete_round_trip() {
        let store = InMemorySelectionStore::new();
        let institution_id = InstitutionId::new();
        let year = label("2024-2025");
        let term_id = TermId::new();

        store
            .set_selection(institution_id, &year, term_id)
            .await
            .unwrap_or_else(|_| unreachable!());
        let stored = store
            .get_selection(institution_id, &year)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(stored, Some(term_id));

        store
            .delete_selection(institution_id, &year)
            .await
            .unwrap_or_else(|_| unreachable!());
        let stored = store
            .get_selection(institution_id, &year)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(stored, None);
    }

    #[tokio::test]
    async fn institutions_sharing_a_year_label_never_collide() {
        let store = InMemorySelectionStore::new();
        let first = InstitutionId::new();
        let second = InstitutionId::new();
        let year = label("2024-2025");
        let term_id = TermId::new();

        store
            .set_selection(first, &year, term_id)
            .await
            .unwrap_or_else(|_| unreachable!());

        let other = store
            .get_selection(second, &year)
            .await
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(other, None);
    }
}
