//! Menu system for navigation and route management.
//!
//! The host owns the base trees for each named menu; plugins add their
//! entries through [`MenuContributor`](atrium_sdk::menu::MenuContributor)s
//! collected in the [`MenuRegistry`]. Routes contributed by plugins are
//! collected in the [`RouteTable`].

mod base;
mod registry;
mod routes;

pub use base::{ADMIN_MENU, MAIN_MENU, base_menu};
pub use registry::{ContributorEntry, MenuRegistry};
pub use routes::{RouteMatch, RouteTable};
