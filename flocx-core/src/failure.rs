use thiserror::Error;

/// The ways a repository operation can be refused.
///
/// These are the domain outcomes of an operation, as opposed to failures of
/// the underlying store, which surface through the repository's associated
/// `Error` type. The `kind` fields name the entity (e.g. `"Offer"`) or, for a
/// refused offer listing, the resource type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// No row matches the requested id
    #[error("{kind} {id} could not be found")]
    NotFound {
        /// The kind of thing that was looked up
        kind: String,
        /// The id that did not resolve
        id: String,
    },

    /// The row exists but the caller may not act on it
    #[error("no permission for {kind} {id}")]
    NoPermission {
        /// The kind of thing that was refused
        kind: String,
        /// The id of the refused thing
        id: String,
    },

    /// The operation is reserved for administrators
    #[error("{kind} operations require admin")]
    RequiresAdmin {
        /// The kind of thing the operation targets
        kind: String,
    },

    /// The request conflicts with existing state
    #[error("validation failed: {0}")]
    Validation(String),
}

impl Failure {
    /// Shorthand for [`Failure::NotFound`]
    pub fn not_found(kind: &str, id: impl ToString) -> Self {
        Self::NotFound {
            kind: kind.to_owned(),
            id: id.to_string(),
        }
    }

    /// Shorthand for [`Failure::NoPermission`]
    pub fn no_permission(kind: &str, id: impl ToString) -> Self {
        Self::NoPermission {
            kind: kind.to_owned(),
            id: id.to_string(),
        }
    }

    /// Shorthand for [`Failure::RequiresAdmin`]
    pub fn requires_admin(kind: &str) -> Self {
        Self::RequiresAdmin {
            kind: kind.to_owned(),
        }
    }
}
