//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod academic_year;
mod role_assignment;
mod term;

pub use academic_year::AcademicYearLabel;
pub use role_assignment::{
    AssignmentGroup, RoleAssignmentRecord, StaffProfileRef, StaffRole, SubjectRef,
};
pub use term::{Term, TermId};
