//! Navigation core of the Wavecast podcast player.
//!
//! UI shells render [`NavigationHost::current_destination`] and feed user
//! actions back through [`NavigationHost::handle`].

pub mod helpers;
pub mod logging;
pub mod navigation;
pub mod route;
pub mod settings;

pub use navigation::{Action, DeepLinkResolver, NavigationHost, NavigationStack, RouteError};
pub use route::{EpisodeId, PodcastId, Route, TopLevelRoute};
