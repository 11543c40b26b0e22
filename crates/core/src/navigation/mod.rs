//! Backstack navigation.
//!
//! The module is split into:
//! - [`stack`]: the backstack and its mutation algorithm
//! - [`deep_link`]: resolution of external links into routes
//! - [`host`]: the single owner of a session's stack, dispatching actions and
//!   notifying listeners

pub mod deep_link;
pub mod host;
pub mod stack;

pub use deep_link::{DeepLinkResolver, RouteError};
pub use host::{Action, NavigationHost, NavigationListener};
pub use stack::NavigationStack;
