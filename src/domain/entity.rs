use uuid::Uuid;

use crate::error::AppError;

/// Contract shared by all domain entities: a stable identity plus
/// self-validation.
///
/// Identity is assigned at construction and never changes. Two entities of
/// the same concrete type are equal iff their ids are equal; implementations
/// derive their `PartialEq` from the id alone.
pub trait Entity {
    fn id(&self) -> Uuid;

    /// Re-runs the entity's validation rules against its current state.
    ///
    /// Clears the notification, accumulates any rule violations into it, and
    /// fails with the entity's validation error kind when violations exist.
    fn validate(&mut self) -> Result<(), AppError>;
}
