//! Error types shared by the host and plugins.

use thiserror::Error;

/// A navigation or folder tree that breaks its structural rules.
///
/// These are programming errors in whoever built the tree, not conditions to
/// show to users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeInvariantViolation {
    /// The same id appears more than once in one tree.
    #[error("duplicate id '{id}' in tree")]
    DuplicateId { id: String },

    /// A children list is not ordered by effective order.
    #[error("children of '{parent}' are not sorted by order")]
    UnsortedChildren { parent: String },

    /// An item was added under a parent that does not exist.
    #[error("cannot attach '{id}': parent '{parent}' not found")]
    MissingParent { id: String, parent: String },

    /// A node references a parent id that no node carries.
    #[error("'{id}' references unknown parent '{parent}'")]
    DanglingReference { id: String, parent: String },

    /// Following parent references from a node leads back to it.
    #[error("'{id}' is its own ancestor")]
    Cycle { id: String },
}

/// Failure to complete an HTTP exchange with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response (connect, timeout, TLS, body read).
    #[error("request failed: {message}")]
    Request { message: String },

    /// The server answered with a status the caller does not handle.
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },
}

impl TransportError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }
}
