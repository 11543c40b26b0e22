use super::deep_link::{DeepLinkResolver, RouteError};
use super::stack::NavigationStack;
use crate::route::Route;
use crate::settings::NavigationSettings;

/// A user or system request the host turns into a stack transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigate to an already-built route.
    Navigate(Route),
    /// Back gesture or button.
    Back,
    /// Open an external deep link.
    Open(String),
}

/// Observer of destination changes.
///
/// Listeners run synchronously after every transition that changed the
/// backstack. They are never called for no-ops such as navigating to the
/// current destination or pressing back on the root.
pub trait NavigationListener {
    fn on_destination_changed(&mut self, current: &Route, backstack: &[Route]);
}

impl<F> NavigationListener for F
where
    F: FnMut(&Route, &[Route]),
{
    fn on_destination_changed(&mut self, current: &Route, backstack: &[Route]) {
        self(current, backstack)
    }
}

/// Single owner of one navigation session.
///
/// The host keeps its [`NavigationStack`] private: every mutation goes through
/// [`handle`](Self::handle) so listeners see each change exactly once. Each
/// window or task gets its own host.
pub struct NavigationHost {
    stack: NavigationStack,
    resolver: DeepLinkResolver,
    listeners: Vec<Box<dyn NavigationListener>>,
}

impl std::fmt::Debug for NavigationHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationHost")
            .field("stack", &self.stack)
            .field("resolver", &self.resolver)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl NavigationHost {
    pub fn new(resolver: DeepLinkResolver, start: Option<Route>) -> Self {
        NavigationHost {
            stack: NavigationStack::new(start),
            resolver,
            listeners: Vec::new(),
        }
    }

    /// Builds a host from the `[navigation]` settings section.
    ///
    /// A start link that fails to resolve is logged and the session starts on
    /// the home screen instead.
    pub fn from_settings(settings: &NavigationSettings) -> Self {
        let resolver = DeepLinkResolver::new(settings.deep_link_scheme.clone());
        let start = settings
            .start_link
            .as_deref()
            .and_then(|link| match resolver.resolve(link) {
                Ok(route) => Some(route),
                Err(e) => {
                    tracing::warn!(link, error = %e, "ignoring invalid start link");
                    None
                }
            });

        NavigationHost::new(resolver, start)
    }

    pub fn add_listener(&mut self, listener: impl NavigationListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn current_destination(&self) -> &Route {
        self.stack.current_destination()
    }

    pub fn backstack(&self) -> &[Route] {
        self.stack.backstack()
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn resolver(&self) -> &DeepLinkResolver {
        &self.resolver
    }

    /// Applies `action` to the backstack.
    ///
    /// # Returns
    ///
    /// `Ok(true)` when the backstack changed and listeners were notified,
    /// `Ok(false)` for a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] when an [`Action::Open`] link can't be
    /// resolved. The backstack is left untouched in that case.
    #[tracing::instrument(level = "trace", skip(self), ret)]
    pub fn handle(&mut self, action: Action) -> Result<bool, RouteError> {
        let changed = match action {
            Action::Navigate(route) => self.stack.navigate(route),
            Action::Back => self.stack.go_back(),
            Action::Open(link) => {
                let route = self.resolver.resolve(&link).inspect_err(|e| {
                    tracing::warn!(link = %link, error = %e, "rejected deep link");
                })?;
                self.stack.navigate(route)
            }
        };

        if changed {
            self.notify();
        }

        Ok(changed)
    }

    pub fn navigate(&mut self, route: Route) -> bool {
        // Only `Open` can fail.
        self.handle(Action::Navigate(route)).unwrap_or(false)
    }

    pub fn go_back(&mut self) -> bool {
        self.handle(Action::Back).unwrap_or(false)
    }

    pub fn open(&mut self, link: &str) -> Result<bool, RouteError> {
        self.handle(Action::Open(link.to_string()))
    }

    fn notify(&mut self) {
        let current = self.stack.current_destination();
        let backstack = self.stack.backstack();
        for listener in &mut self.listeners {
            listener.on_destination_changed(current, backstack);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{EpisodeId, PodcastId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_host() -> (NavigationHost, Rc<RefCell<Vec<Vec<Route>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut host = NavigationHost::new(DeepLinkResolver::default(), None);
        let sink = Rc::clone(&seen);
        host.add_listener(move |_: &Route, backstack: &[Route]| {
            sink.borrow_mut().push(backstack.to_vec());
        });
        (host, seen)
    }

    #[test]
    fn test_open_resolves_and_navigates() {
        let (mut host, seen) = recording_host();

        assert_eq!(host.open("wavecast://episode/3?podcast=9"), Ok(true));
        assert_eq!(
            host.current_destination(),
            &Route::EpisodeDetails {
                episode_id: EpisodeId(3),
                podcast_id: PodcastId(9),
            }
        );
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_invalid_link_leaves_stack_untouched() {
        let (mut host, seen) = recording_host();
        host.navigate(Route::Explore);
        let before = host.backstack().to_vec();

        let result = host.open("wavecast://episode/3");

        assert!(matches!(result, Err(RouteError::MissingParameter { .. })));
        assert_eq!(host.backstack(), before.as_slice());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_listeners_skip_noops() {
        let (mut host, seen) = recording_host();

        assert!(!host.go_back());
        assert!(!host.navigate(Route::Home));
        assert!(host.navigate(Route::Queue));
        assert!(!host.navigate(Route::Queue));
        assert!(host.go_back());

        assert_eq!(
            *seen.borrow(),
            vec![vec![Route::Home, Route::Queue], vec![Route::Home]]
        );
    }

    #[test]
    fn test_from_settings_uses_start_link() {
        let settings = NavigationSettings {
            deep_link_scheme: "pods".to_string(),
            start_link: Some("pods://review/2024".to_string()),
        };

        let host = NavigationHost::from_settings(&settings);
        assert_eq!(
            host.backstack(),
            &[Route::Home, Route::YearInReview { year: 2024 }]
        );
        assert_eq!(host.resolver().scheme(), "pods");
    }

    #[test]
    fn test_from_settings_ignores_invalid_start_link() {
        let settings = NavigationSettings {
            deep_link_scheme: "pods".to_string(),
            start_link: Some("wavecast://library".to_string()),
        };

        let host = NavigationHost::from_settings(&settings);
        assert_eq!(host.backstack(), &[Route::Home]);
    }
}
