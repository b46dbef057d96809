//! Atrium Plugin SDK
//!
//! Types, traits, and the HTTP seam shared by the Atrium host and its
//! feature plugins. Plugins depend on this crate to contribute navigation
//! entries and routes, and to talk to the backend through whatever
//! transport the host provides.

pub mod error;
pub mod menu;
pub mod transport;
pub mod types;

pub use error::{TransportError, TreeInvariantViolation};

// Re-export async_trait for Transport implementors
#[doc(hidden)]
pub use async_trait::async_trait;

pub mod prelude {
    pub use crate::error::{TransportError, TreeInvariantViolation};
    pub use crate::menu::{MenuContributor, MenuNode, UNORDERED, effective_order};
    pub use crate::transport::{ApiRequest, ApiResponse, Body, Method, Part, Transport};
    pub use crate::types::*;
}
