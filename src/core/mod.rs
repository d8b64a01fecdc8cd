//! Core business logic, independent of the HTTP layer and of any particular
//! storage backend.

/// Action recorder - the guarded write path for care actions
pub mod care;
/// Validated plant create and update operations
pub mod plant;
/// Care scheduling calculator - due dates and task generation
pub mod schedule;
