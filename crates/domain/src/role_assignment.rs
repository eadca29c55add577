use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of staff roles recognized by scope rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaffRole {
    /// Oversees one or more majors.
    AcademicDirector,
    /// Oversees a section, optionally narrowed by major, group or class.
    HeadOfSection,
    /// Coordinates a single subject across classes.
    SubjectCoordinator,
    /// Regular teaching staff.
    Teacher,
    /// Institution administrator.
    SchoolAdmin,
    /// Any role this layer does not scope further.
    Other,
}

impl StaffRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AcademicDirector => "academic-director",
            Self::HeadOfSection => "head-of-section",
            Self::SubjectCoordinator => "subject-coordinator",
            Self::Teacher => "teacher",
            Self::SchoolAdmin => "school-admin",
            Self::Other => "other",
        }
    }

    /// Decodes a stored role tag. Unknown tags map to [`StaffRole::Other`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "academic-director" => Self::AcademicDirector,
            "head-of-section" => Self::HeadOfSection,
            "subject-coordinator" => Self::SubjectCoordinator,
            "teacher" => Self::Teacher,
            "school-admin" => Self::SchoolAdmin,
            _ => Self::Other,
        }
    }
}

/// Joined staff profile data attached to an assignment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfileRef {
    /// Stable staff profile identifier.
    pub staff_id: Uuid,
    /// Staff member full name.
    pub full_name: String,
}

/// Joined subject data attached to an assignment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRef {
    /// Stable subject identifier.
    pub subject_id: Uuid,
    /// Subject display name.
    pub name: String,
}

/// One staff member's authorization grant.
///
/// A staff member may own several records, one per scope unit (e.g. one row
/// per major for a director responsible for several majors). Records sharing
/// a `user_id` carry the same role, secondary role and staff profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignmentRecord {
    /// Stable record identifier.
    pub record_id: Uuid,
    /// Subject identifier of the staff member owning the grant.
    pub user_id: String,
    /// Primary role carried by the grant.
    pub role: StaffRole,
    /// Optional secondary role.
    pub secondary_role: Option<StaffRole>,
    /// Joined staff profile, absent when join data is incomplete.
    pub staff_profile: Option<StaffProfileRef>,
    /// Major scoping dimension.
    pub major: Option<String>,
    /// Group scoping dimension.
    pub group_desc: Option<String>,
    /// Class scoping dimension.
    pub class_desc: Option<String>,
    /// Section scoping dimension.
    pub section_name: Option<String>,
    /// Joined subject, for subject coordinators.
    pub subject: Option<SubjectRef>,
}

/// Maximum number of section scope strings rendered before eliding.
const SECTION_SCOPE_PREVIEW: usize = 2;

/// A staff member's assignment records in first-seen order.
///
/// Groups are always non-empty; they can only be produced by
/// [`AssignmentGroup::group_records`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentGroup {
    records: Vec<RoleAssignmentRecord>,
}

impl AssignmentGroup {
    /// Groups a flat record batch by `user_id`, preserving first-seen order.
    #[must_use]
    pub fn group_records(records: Vec<RoleAssignmentRecord>) -> Vec<Self> {
        let mut order: Vec<String> = Vec::new();
        let mut buckets: HashMap<String, Vec<RoleAssignmentRecord>> = HashMap::new();

        for record in records {
            if !buckets.contains_key(record.user_id.as_str()) {
                order.push(record.user_id.clone());
            }
            buckets.entry(record.user_id.clone()).or_default().push(record);
        }

        order
            .into_iter()
            .filter_map(|user_id| buckets.remove(user_id.as_str()))
            .map(|records| Self { records })
            .collect()
    }

    /// Returns the representative record for edit and delete dispatch.
    #[must_use]
    pub fn representative(&self) -> &RoleAssignmentRecord {
        // Non-empty by construction.
        &self.records[0]
    }

    /// Returns every record in the group.
    #[must_use]
    pub fn records(&self) -> &[RoleAssignmentRecord] {
        &self.records
    }

    /// Returns the staff member subject identifier shared by the group.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.representative().user_id.as_str()
    }

    /// Renders the group's access scope as a single display string.
    ///
    /// Returns `None` when the representative record lacks its staff profile
    /// join; callers skip rendering such groups instead of failing.
    #[must_use]
    pub fn scope_summary(&self) -> Option<String> {
        let representative = self.representative();
        representative.staff_profile.as_ref()?;

        let summary = match representative.role {
            StaffRole::AcademicDirector => self.major_summary(),
            StaffRole::HeadOfSection => self.section_summary(),
            StaffRole::SubjectCoordinator => representative
                .subject
                .as_ref()
                .map_or_else(|| "N/A".to_owned(), |subject| subject.name.clone()),
            StaffRole::Teacher | StaffRole::SchoolAdmin | StaffRole::Other => {
                "General Access".to_owned()
            }
        };

        Some(summary)
    }

    fn major_summary(&self) -> String {
        let mut majors: Vec<&str> = Vec::new();
        for record in &self.records {
            if let Some(major) = non_empty(record.major.as_deref())
                && !majors.contains(&major)
            {
                majors.push(major);
            }
        }

        if majors.is_empty() {
            "All".to_owned()
        } else {
            majors.join(", ")
        }
    }

    fn section_summary(&self) -> String {
        let mut scopes: Vec<String> = Vec::new();
        for record in &self.records {
            let parts: Vec<&str> = [
                record.major.as_deref(),
                record.group_desc.as_deref(),
                record.class_desc.as_deref(),
                record.section_name.as_deref(),
            ]
            .into_iter()
            .filter_map(non_empty)
            .collect();

            if parts.is_empty() {
                continue;
            }

            let scope = parts.join(" / ");
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }

        let elided = scopes.len() > SECTION_SCOPE_PREVIEW;
        scopes.truncate(SECTION_SCOPE_PREVIEW);
        let mut summary = scopes.join(", ");
        if elided {
            summary.push_str(", ...");
        }

        summary
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|candidate| !candidate.trim().is_empty())
}
