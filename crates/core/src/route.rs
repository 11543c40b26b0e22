//! Navigable destinations of the application.
//!
//! A [`Route`] is an immutable value naming one screen and the parameters it
//! needs. Routes compare structurally: two episode routes are the same
//! destination only when both the episode and the podcast ids match.
//!
//! A subset of routes are *top-level*: they back the primary sections of the
//! bottom navigation (see [`TopLevelRoute`]). Selecting one of them resets the
//! navigation history of that section.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters escaped in query values of generated deep links.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Identifier of a podcast in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodcastId(pub i64);

/// Identifier of an episode in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(pub i64);

impl fmt::Display for PodcastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary sections reachable from the bottom navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopLevelRoute {
    Home,
    Explore,
    Library,
}

impl TopLevelRoute {
    pub const ALL: [TopLevelRoute; 3] = [
        TopLevelRoute::Home,
        TopLevelRoute::Explore,
        TopLevelRoute::Library,
    ];
}

impl From<TopLevelRoute> for Route {
    fn from(route: TopLevelRoute) -> Self {
        match route {
            TopLevelRoute::Home => Route::Home,
            TopLevelRoute::Explore => Route::Explore,
            TopLevelRoute::Library => Route::Library,
        }
    }
}

/// A destination of the navigation graph.
///
/// Serialized in an internally tagged form, e.g.
/// `{"route":"episode-details","episode_id":7,"podcast_id":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", rename_all = "kebab-case")]
pub enum Route {
    Home,
    Explore,
    Library,
    PodcastDetails {
        podcast_id: PodcastId,
        /// Whether the feed should be refreshed when the screen opens.
        refresh: bool,
    },
    EpisodeDetails {
        episode_id: EpisodeId,
        podcast_id: PodcastId,
    },
    Search {
        query: String,
    },
    Player,
    Queue,
    Downloads,
    YearInReview {
        year: u16,
    },
    Settings,
}

impl Route {
    /// Returns the primary section this route stands for, if it is one.
    pub fn top_level(&self) -> Option<TopLevelRoute> {
        match self {
            Route::Home => Some(TopLevelRoute::Home),
            Route::Explore => Some(TopLevelRoute::Explore),
            Route::Library => Some(TopLevelRoute::Library),
            _ => None,
        }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self, Route::Home | Route::Explore | Route::Library)
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Route::Home)
    }

    /// Renders the canonical deep link for this route.
    ///
    /// The result resolves back to an equal route through
    /// [`DeepLinkResolver`](crate::navigation::deep_link::DeepLinkResolver)
    /// configured with the same scheme.
    pub fn deep_link(&self, scheme: &str) -> String {
        let path = match self {
            Route::Home => "home".to_string(),
            Route::Explore => "explore".to_string(),
            Route::Library => "library".to_string(),
            Route::PodcastDetails {
                podcast_id,
                refresh,
            } => format!("podcast/{}?refresh={}", podcast_id, refresh),
            Route::EpisodeDetails {
                episode_id,
                podcast_id,
            } => format!("episode/{}?podcast={}", episode_id, podcast_id),
            Route::Search { query } => {
                format!("search?q={}", utf8_percent_encode(query, QUERY_VALUE))
            }
            Route::Player => "player".to_string(),
            Route::Queue => "queue".to_string(),
            Route::Downloads => "downloads".to_string(),
            Route::YearInReview { year } => format!("review/{}", year),
            Route::Settings => "settings".to_string(),
        };

        format!("{}://{}", scheme, path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "Home"),
            Route::Explore => write!(f, "Explore"),
            Route::Library => write!(f, "Library"),
            Route::PodcastDetails { podcast_id, .. } => write!(f, "Podcast {}", podcast_id),
            Route::EpisodeDetails { episode_id, .. } => write!(f, "Episode {}", episode_id),
            Route::Search { query } if query.is_empty() => write!(f, "Search"),
            Route::Search { query } => write!(f, "Search \"{}\"", query),
            Route::Player => write!(f, "Now Playing"),
            Route::Queue => write!(f, "Up Next"),
            Route::Downloads => write!(f, "Downloads"),
            Route::YearInReview { year } => write!(f, "{} in Review", year),
            Route::Settings => write!(f, "Settings"),
        }
    }
}
