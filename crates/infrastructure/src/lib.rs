//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod config;
mod in_memory_selection_store;
mod postgres_academic_year_repository;
mod postgres_role_assignment_repository;
mod postgres_term_repository;
mod redis_selection_store;
mod system_clock;
mod tracing_notification_sink;

pub use config::StorageSettings;
pub use in_memory_selection_store::InMemorySelectionStore;
pub use postgres_academic_year_repository::PostgresAcademicYearRepository;
pub use postgres_role_assignment_repository::PostgresRoleAssignmentRepository;
pub use postgres_term_repository::PostgresTermRepository;
pub use redis_selection_store::RedisSelectionStore;
pub use system_clock::SystemClock;
pub use tracing_notification_sink::TracingNotificationSink;
