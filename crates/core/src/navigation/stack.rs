use crate::route::Route;
use std::fmt::Write as _;

/// Ordered history of visited routes.
///
/// The last entry is the current destination. The stack is never empty:
/// [`Route::Home`] sits at index 0 from construction onwards and can't be
/// popped.
///
/// # Mutation
///
/// Only [`navigate`](Self::navigate) and [`go_back`](Self::go_back) change the
/// stack. Readers get a read-only slice through [`backstack`](Self::backstack).
///
/// ```txt
///   [Home]                          navigate(Explore)
///   [Home, Explore]                 navigate(Episode e1)
///   [Home, Explore, Episode e1]     navigate(Podcast p1)
///   [Home, Explore, Episode e1, Podcast p1]
///                                   navigate(Episode e1)  -> truncates
///   [Home, Explore, Episode e1]     navigate(Library)     -> resets
///   [Home, Library]
/// ```
///
/// # Deduplication
///
/// A structurally-equal route never appears twice. Navigating to a route that
/// is already in the stack pops back to that entry instead of pushing a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<Route>,
}

impl NavigationStack {
    /// Creates a stack seeded with [`Route::Home`].
    ///
    /// When `start` is given and isn't `Home` it is pushed on top, so the
    /// result holds one or two entries.
    pub fn new(start: Option<Route>) -> Self {
        let mut entries = vec![Route::Home];
        if let Some(route) = start.filter(|route| !route.is_home()) {
            entries.push(route);
        }

        tracing::debug!(
            depth = entries.len(),
            current = %entries[entries.len() - 1],
            "navigation stack created"
        );

        NavigationStack { entries }
    }

    /// Returns the route currently on screen.
    pub fn current_destination(&self) -> &Route {
        // Never empty: Home is pushed on construction and `go_back` keeps it.
        &self.entries[self.entries.len() - 1]
    }

    /// Returns the full history, oldest entry first.
    pub fn backstack(&self) -> &[Route] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true outside of a bug.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Navigates to `route`.
    ///
    /// # Algorithm
    ///
    /// 1. If `route` is the current destination, nothing happens
    /// 2. A top-level route resets the stack to `[Home]` or `[Home, route]`
    /// 3. A leaf route already in the stack at index `i` truncates the stack
    ///    to `i + 1` entries
    /// 4. Any other leaf route is pushed
    ///
    /// # Returns
    ///
    /// `true` if the stack changed, `false` for the no-op in step 1.
    pub fn navigate(&mut self, route: Route) -> bool {
        if *self.current_destination() == route {
            tracing::trace!(route = %route, "already on destination");
            return false;
        }

        if route.is_top_level() {
            self.entries.clear();
            self.entries.push(Route::Home);
            if !route.is_home() {
                self.entries.push(route);
            }

            tracing::debug!(
                current = %self.current_destination(),
                depth = self.entries.len(),
                "reset to top-level route"
            );

            return true;
        }

        match self.entries.iter().position(|entry| *entry == route) {
            Some(index) => {
                let dropped = self.entries.len() - index - 1;
                self.entries.truncate(index + 1);

                tracing::debug!(
                    current = %route,
                    depth = self.entries.len(),
                    dropped,
                    "popped back to existing route"
                );
            }
            None => {
                tracing::debug!(current = %route, depth = self.entries.len() + 1, "pushed route");
                self.entries.push(route);
            }
        }

        true
    }

    /// Pops the current destination.
    ///
    /// The root entry is never removed: with a single entry left this is a
    /// no-op and returns `false`.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            tracing::debug!("back pressed on root destination, ignoring");
            return false;
        }

        let popped = self.entries.pop();
        tracing::debug!(
            popped = ?popped,
            current = %self.current_destination(),
            depth = self.entries.len(),
            "navigated back"
        );

        true
    }

    /// Joins the titles of all entries, oldest first.
    pub fn breadcrumb(&self, separator: &str) -> String {
        let mut crumb = String::new();
        for (index, route) in self.entries.iter().enumerate() {
            if index > 0 {
                crumb.push_str(separator);
            }
            let _ = write!(crumb, "{}", route);
        }
        crumb
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        NavigationStack::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{EpisodeId, PodcastId};

    fn episode(episode: i64, podcast: i64) -> Route {
        Route::EpisodeDetails {
            episode_id: EpisodeId(episode),
            podcast_id: PodcastId(podcast),
        }
    }

    fn podcast(podcast: i64) -> Route {
        Route::PodcastDetails {
            podcast_id: PodcastId(podcast),
            refresh: false,
        }
    }

    #[test]
    fn test_new_starts_at_home() {
        let stack = NavigationStack::new(None);
        assert_eq!(stack.backstack(), &[Route::Home]);
        assert_eq!(stack.current_destination(), &Route::Home);
    }

    #[test]
    fn test_new_with_start_route_pushes_it_after_home() {
        let stack = NavigationStack::new(Some(episode(1, 2)));
        assert_eq!(stack.backstack(), &[Route::Home, episode(1, 2)]);
    }

    #[test]
    fn test_new_with_home_start_route_does_not_duplicate() {
        let stack = NavigationStack::new(Some(Route::Home));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_navigate_to_current_is_noop() {
        let mut stack = NavigationStack::new(Some(Route::Player));
        let before = stack.clone();

        assert!(!stack.navigate(Route::Player));
        assert_eq!(stack, before);
    }

    #[test]
    fn test_navigate_home_on_fresh_stack_is_noop() {
        let mut stack = NavigationStack::default();
        assert!(!stack.navigate(Route::Home));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_top_level_route_resets_history() {
        let mut stack = NavigationStack::default();
        stack.navigate(Route::Explore);
        stack.navigate(podcast(1));
        stack.navigate(episode(2, 1));

        assert!(stack.navigate(Route::Library));
        assert_eq!(stack.backstack(), &[Route::Home, Route::Library]);

        assert!(stack.navigate(Route::Home));
        assert_eq!(stack.backstack(), &[Route::Home]);
    }

    #[test]
    fn test_reselecting_top_level_section_from_detail_resets_to_its_root() {
        let mut stack = NavigationStack::default();
        stack.navigate(Route::Library);
        stack.navigate(Route::Downloads);

        assert!(stack.navigate(Route::Library));
        assert_eq!(stack.backstack(), &[Route::Home, Route::Library]);
    }

    #[test]
    fn test_new_leaf_route_is_pushed() {
        let mut stack = NavigationStack::default();
        assert!(stack.navigate(Route::Queue));
        assert!(stack.navigate(Route::Player));
        assert_eq!(
            stack.backstack(),
            &[Route::Home, Route::Queue, Route::Player]
        );
    }

    #[test]
    fn test_existing_leaf_route_truncates_back_to_it() {
        let mut stack = NavigationStack::default();
        stack.navigate(Route::Queue);
        stack.navigate(episode(1, 1));
        stack.navigate(podcast(1));
        stack.navigate(Route::Player);

        assert!(stack.navigate(episode(1, 1)));
        assert_eq!(
            stack.backstack(),
            &[Route::Home, Route::Queue, episode(1, 1)]
        );
    }

    #[test]
    fn test_parameters_distinguish_leaf_routes() {
        let mut stack = NavigationStack::default();
        stack.navigate(episode(1, 1));
        stack.navigate(episode(1, 2));
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_go_back_pops_one_entry() {
        let mut stack = NavigationStack::default();
        stack.navigate(Route::Explore);
        stack.navigate(Route::Search {
            query: "history".to_string(),
        });

        assert!(stack.go_back());
        assert_eq!(stack.current_destination(), &Route::Explore);
        assert!(stack.go_back());
        assert_eq!(stack.current_destination(), &Route::Home);
    }

    #[test]
    fn test_go_back_on_root_is_noop() {
        let mut stack = NavigationStack::default();
        assert!(!stack.can_go_back());
        assert!(!stack.go_back());
        assert_eq!(stack.backstack(), &[Route::Home]);
    }

    #[test]
    fn test_tab_and_detail_scenario() {
        let mut stack = NavigationStack::default();

        stack.navigate(Route::Explore);
        assert_eq!(stack.backstack(), &[Route::Home, Route::Explore]);

        stack.navigate(episode(1, 1));
        assert_eq!(
            stack.backstack(),
            &[Route::Home, Route::Explore, episode(1, 1)]
        );

        stack.navigate(podcast(1));
        assert_eq!(stack.len(), 4);

        stack.navigate(episode(1, 1));
        assert_eq!(
            stack.backstack(),
            &[Route::Home, Route::Explore, episode(1, 1)]
        );

        stack.navigate(Route::Library);
        assert_eq!(stack.backstack(), &[Route::Home, Route::Library]);
    }

    #[test]
    fn test_breadcrumb_joins_titles() {
        let mut stack = NavigationStack::default();
        stack.navigate(Route::Library);
        stack.navigate(podcast(12));
        assert_eq!(stack.breadcrumb(" > "), "Home > Library > Podcast 12");
    }
}
