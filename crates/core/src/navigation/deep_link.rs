//! Resolution of external links into [`Route`] values.
//!
//! Links have the shape `<scheme>://<path>[?<query>][#<fragment>]`:
//!
//! ```txt
//! wavecast://home
//! wavecast://podcast/42?refresh=true
//! wavecast://episode/1337?podcast=42
//! wavecast://search?q=true%20crime
//! wavecast://review/2025
//! ```
//!
//! Path segments and query values are percent-decoded; `+` in a query value
//! decodes to a space. The fragment is ignored.

use crate::route::{EpisodeId, PodcastId, Route};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::str::FromStr;

pub const DEFAULT_SCHEME: &str = "wavecast";

/// Reasons an external link can't be turned into a route.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The link has no `scheme://` prefix or uses a foreign scheme
    #[error("unsupported link scheme in '{0}'")]
    UnsupportedScheme(String),

    /// The path doesn't name a known destination
    #[error("unknown destination '{0}'")]
    UnknownDestination(String),

    /// A path segment or query value required by the destination is absent
    #[error("missing parameter '{parameter}' for {destination}")]
    MissingParameter {
        destination: &'static str,
        parameter: &'static str,
    },

    /// A parameter is present but can't be parsed
    #[error("invalid value '{value}' for parameter '{parameter}'")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
    },
}

/// Maps deep links of one scheme to routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkResolver {
    scheme: String,
}

impl Default for DeepLinkResolver {
    fn default() -> Self {
        DeepLinkResolver::new(DEFAULT_SCHEME)
    }
}

impl DeepLinkResolver {
    pub fn new(scheme: impl Into<String>) -> Self {
        DeepLinkResolver {
            scheme: scheme.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Resolves `link` into a route.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] if the scheme doesn't match, the path names no
    /// known destination, or a parameter is missing or malformed.
    pub fn resolve(&self, link: &str) -> Result<Route, RouteError> {
        let link = link.trim();
        let (scheme, rest) = link
            .split_once("://")
            .ok_or_else(|| RouteError::UnsupportedScheme(link.to_string()))?;
        if !scheme.eq_ignore_ascii_case(&self.scheme) {
            return Err(RouteError::UnsupportedScheme(scheme.to_string()));
        }

        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, query),
            None => (rest, ""),
        };

        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| decode("path", segment))
            .collect::<Result<Vec<_>, _>>()?;
        let segments: Vec<&str> = segments.iter().map(|segment| segment.as_ref()).collect();
        let query = Query::from_raw(query)?;

        let route = match segments.as_slice() {
            [] | ["home"] => Route::Home,
            ["explore"] => Route::Explore,
            ["library"] => Route::Library,
            ["podcast"] => return Err(missing("podcast", "id")),
            ["podcast", id] => Route::PodcastDetails {
                podcast_id: PodcastId(parse("podcast", id)?),
                refresh: query.value::<bool>("refresh")?.unwrap_or(false),
            },
            ["episode"] => return Err(missing("episode", "id")),
            ["episode", id] => Route::EpisodeDetails {
                episode_id: EpisodeId(parse("episode", id)?),
                podcast_id: PodcastId(
                    query
                        .value("podcast")?
                        .ok_or_else(|| missing("episode", "podcast"))?,
                ),
            },
            ["search"] => Route::Search {
                query: query
                    .get("q")
                    .ok_or_else(|| missing("search", "q"))?
                    .to_string(),
            },
            ["player"] => Route::Player,
            ["queue"] => Route::Queue,
            ["downloads"] => Route::Downloads,
            ["settings"] => Route::Settings,
            ["review"] => return Err(missing("review", "year")),
            ["review", year] => Route::YearInReview {
                year: parse("year", year)?,
            },
            _ => return Err(RouteError::UnknownDestination(segments.join("/"))),
        };

        Ok(route)
    }
}

fn missing(destination: &'static str, parameter: &'static str) -> RouteError {
    RouteError::MissingParameter {
        destination,
        parameter,
    }
}

fn parse<T: FromStr>(parameter: &'static str, value: &str) -> Result<T, RouteError> {
    value.parse().map_err(|_| RouteError::InvalidParameter {
        parameter,
        value: value.to_string(),
    })
}

fn decode<'a>(parameter: &'static str, raw: &'a str) -> Result<Cow<'a, str>, RouteError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| RouteError::InvalidParameter {
            parameter,
            value: raw.to_string(),
        })
}

/// Decoded query pairs, in link order.
struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    fn from_raw(raw: &str) -> Result<Self, RouteError> {
        let mut pairs = Vec::new();
        for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = value.replace('+', " ");
            pairs.push((
                decode("query", key)?.into_owned(),
                decode("query", &value)?.into_owned(),
            ));
        }

        Ok(Query { pairs })
    }

    /// First value for `key`.
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn value<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, RouteError> {
        self.get(key).map(|value| parse(key, value)).transpose()
    }
}
