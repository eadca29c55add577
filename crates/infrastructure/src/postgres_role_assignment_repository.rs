use async_trait::async_trait;
use uuid::Uuid;

use semestra_application::RoleAssignmentRepository;
use semestra_core::{AppError, AppResult, InstitutionId};
use semestra_domain::{RoleAssignmentRecord, StaffProfileRef, StaffRole, SubjectRef};

use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed repository for role-assignment records.
#[derive(Clone)]
pub struct PostgresRoleAssignmentRepository {
    pool: PgPool,
}

impl PostgresRoleAssignmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    record_id: Uuid,
    user_id: String,
    role: String,
    secondary_role: Option<String>,
    staff_id: Option<Uuid>,
    staff_full_name: Option<String>,
    subject_id: Option<Uuid>,
    subject_name: Option<String>,
    major: Option<String>,
    group_desc: Option<String>,
    class_desc: Option<String>,
    section_name: Option<String>,
}

impl From<AssignmentRow> for RoleAssignmentRecord {
    fn from(row: AssignmentRow) -> Self {
        let staff_profile = match (row.staff_id, row.staff_full_name) {
            (Some(staff_id), Some(full_name)) => Some(StaffProfileRef {
                staff_id,
                full_name,
            }),
            _ => None,
        };
        let subject = match (row.subject_id, row.subject_name) {
            (Some(subject_id), Some(name)) => Some(SubjectRef { subject_id, name }),
            _ => None,
        };

        Self {
            record_id: row.record_id,
            user_id: row.user_id,
            role: StaffRole::parse(row.role.as_str()),
            secondary_role: row
                .secondary_role
                .as_deref()
                .map(StaffRole::parse),
            staff_profile,
            major: row.major,
            group_desc: row.group_desc,
            class_desc: row.class_desc,
            section_name: row.section_name,
            subject,
        }
    }
}

#[async_trait]
impl RoleAssignmentRepository for PostgresRoleAssignmentRepository {
    async fn list_assignments(
        &self,
        institution_id: InstitutionId,
    ) -> AppResult<Vec<RoleAssignmentRecord>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT
                assignments.record_id,
                assignments.user_id,
                assignments.role,
                assignments.secondary_role,
                staff.staff_id AS staff_id,
                staff.full_name AS staff_full_name,
                subjects.subject_id AS subject_id,
                subjects.name AS subject_name,
                assignments.major,
                assignments.group_desc,
                assignments.class_desc,
                assignments.section_name
            FROM role_assignments AS assignments
            LEFT JOIN staff_profiles AS staff
                ON staff.staff_id = assignments.staff_id
            LEFT JOIN subjects
                ON subjects.subject_id = assignments.subject_id
            WHERE assignments.institution_id = $1
            ORDER BY assignments.created_at ASC, assignments.record_id ASC
            "#,
        )
        .bind(institution_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Fetch(format!(
                "failed to load role assignments for institution '{institution_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(RoleAssignmentRecord::from).collect())
    }

    async fn delete_assignments_for_user(
        &self,
        institution_id: InstitutionId,
        user_id: &str,
    ) -> AppResult<u64> {
        // One statement, so the member's records disappear atomically.
        let result = sqlx::query(
            r#"
            DELETE FROM role_assignments
            WHERE institution_id = $1
                AND user_id = $2
            "#,
        )
        .bind(institution_id.as_uuid())
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Fetch(format!(
                "failed to delete role assignments of '{user_id}' for institution '{institution_id}': {error}"
            ))
        })?;

        Ok(result.rows_affected())
    }
}
