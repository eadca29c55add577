//! Staff access-scope listing over role-assignment records.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use semestra_core::{AppResult, InstitutionId, UserIdentity};
use semestra_domain::{AssignmentGroup, RoleAssignmentRecord};

use crate::notify::{Notice, NotificationSink};

/// Repository port for role-assignment persistence.
#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Lists an institution's assignment records in stored order.
    async fn list_assignments(
        &self,
        institution_id: InstitutionId,
    ) -> AppResult<Vec<RoleAssignmentRecord>>;

    /// Deletes every record owned by one staff member atomically.
    /// Returns the number of removed records.
    async fn delete_assignments_for_user(
        &self,
        institution_id: InstitutionId,
        user_id: &str,
    ) -> AppResult<u64>;
}

/// One staff member's grouped assignments with the rendered scope summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffScopeEntry {
    /// Grouped records for the staff member, first-seen order preserved.
    pub group: AssignmentGroup,
    /// Rendered scope, absent when the staff profile join is incomplete.
    pub scope_summary: Option<String>,
}

/// Application service aggregating role assignments per staff member.
#[derive(Clone)]
pub struct ScopeService {
    assignments: Arc<dyn RoleAssignmentRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl ScopeService {
    /// Creates a scope service over an assignment repository.
    #[must_use]
    pub fn new(
        assignments: Arc<dyn RoleAssignmentRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            assignments,
            notifications,
        }
    }

    /// Fetches, groups and annotates the institution's assignment records.
    ///
    /// A fetch failure degrades to an empty listing plus a warning notice.
    /// Entries without a scope summary carry incomplete join data; the UI
    /// skips rendering them.
    pub async fn list_staff_scopes(&self, actor: &UserIdentity) -> Vec<StaffScopeEntry> {
        let records = match self.assignments.list_assignments(actor.institution_id()).await {
            Ok(records) => records,
            Err(error) => {
                warn!(
                    institution = %actor.institution_id(),
                    %error,
                    "role assignment fetch failed, degrading to empty listing"
                );
                self.notifications
                    .publish(Notice::warning("Could not load staff access scopes."))
                    .await;
                return Vec::new();
            }
        };

        AssignmentGroup::group_records(records)
            .into_iter()
            .map(|group| {
                let scope_summary = group.scope_summary();
                StaffScopeEntry {
                    group,
                    scope_summary,
                }
            })
            .collect()
    }

    /// Removes all of one staff member's scope records.
    ///
    /// The group's representative record identifies the member; atomicity is
    /// delegated to the repository adapter. Returns the removed count.
    pub async fn remove_staff_assignments(
        &self,
        actor: &UserIdentity,
        user_id: &str,
    ) -> AppResult<u64> {
        self.assignments
            .delete_assignments_for_user(actor.institution_id(), user_id)
            .await
    }
}
