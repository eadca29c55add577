//! Application services and ports.

#![forbid(unsafe_code)]

mod notify;
mod period_service;
mod scope_service;
mod session;
mod term_resolver;

pub use notify::{Notice, NoticeSeverity, NotificationSink};
pub use period_service::{AcademicYearRepository, PeriodService};
pub use scope_service::{RoleAssignmentRepository, ScopeService, StaffScopeEntry};
pub use session::SessionContext;
pub use term_resolver::{Clock, SelectionStore, TermRepository, TermResolver};
