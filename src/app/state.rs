//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Route changes go through the methods below so the home screen is always
//! mounted and torn down in the right order.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::core::clock::Clock;
use crate::core::feed::Thread;
use crate::core::search::{rank_threads, split_mentions, SearchHandoff};
use crate::core::store::{ScrollStore, SessionStore};
use crate::ui::layout::AppLayout;

use super::home::HomeScreen;

/// Most threads listed under a search question.
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Which view is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search {
        handoff: SearchHandoff,
        /// Indices into [`AppState::threads`], best match first.
        results: Vec<usize>,
        selected: Option<usize>,
    },
    Thread(usize),
}

/// Top-level application state.
pub struct AppState {
    pub route: Route,
    /// Present only while the home route is shown.
    pub home: Option<HomeScreen>,
    pub threads: Vec<Thread>,
    pub config: AppConfig,
    pub clock: Arc<dyn Clock>,
    pub scroll_store: Arc<dyn ScrollStore>,
    pub session: Arc<SessionStore>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Frames drawn so far (drives the snap spinner).
    pub frame: u64,
    /// Full terminal area, kept for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(
        threads: Vec<Thread>,
        config: AppConfig,
        clock: Arc<dyn Clock>,
        scroll_store: Arc<dyn ScrollStore>,
        session: Arc<SessionStore>,
        terminal_area: Rect,
    ) -> Self {
        let mut state = Self {
            route: Route::Home,
            home: None,
            threads,
            config,
            clock,
            scroll_store,
            session,
            should_quit: false,
            status_message: None,
            frame: 0,
            terminal_area,
        };
        state.mount_home();
        state
    }

    pub fn body_area(&self) -> Rect {
        AppLayout::from_area(self.terminal_area).body_area
    }

    /// Wall-clock time used for relative thread ages.
    pub fn today(&self) -> DateTime<Utc> {
        Utc::now()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        let body = self.body_area();
        if let Some(home) = self.home.as_mut() {
            home.resize(body.width, body.height);
        }
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if let Some(home) = self.home.as_mut() {
            home.tick();
        }
    }

    pub fn is_snapping(&self) -> bool {
        self.home
            .as_ref()
            .is_some_and(|h| h.coordinator.is_suppressed())
    }

    /// Show the home view, restoring any remembered scroll position.
    pub fn go_home(&mut self) {
        self.route = Route::Home;
        self.status_message = None;
        self.mount_home();
    }

    /// Leave the home view for a thread.  The scroll position is kept so the
    /// way back lands where the user was.
    pub fn open_thread(&mut self, index: usize) {
        if index >= self.threads.len() {
            return;
        }
        self.unmount_home(true);
        info!(thread = index, "opening thread");
        self.route = Route::Thread(index);
    }

    /// Hand the home prompt's question over to the search view.
    pub fn submit_search(&mut self) {
        let Some(home) = self.home.as_mut() else {
            return;
        };
        let (question, contexts) = split_mentions(home.input.value());
        if !SearchHandoff::submit(&self.session, &question, &contexts) {
            self.status_message = Some("Type a question first".into());
            return;
        }
        home.input.clear();
        self.unmount_home(false);
        self.open_search();
    }

    /// Show the search view for the pending handoff.
    pub fn open_search(&mut self) {
        let Some(handoff) = SearchHandoff::take(&self.session) else {
            self.go_home();
            return;
        };
        let results: Vec<usize> = rank_threads(&self.threads, &handoff.question, SEARCH_RESULT_LIMIT)
            .into_iter()
            .map(|t| t.id)
            .collect();
        info!(question = %handoff.question, matches = results.len(), "search opened");
        let selected = (!results.is_empty()).then_some(0);
        self.route = Route::Search {
            handoff,
            results,
            selected,
        };
    }

    fn mount_home(&mut self) {
        let body = self.body_area();
        self.home = Some(HomeScreen::mount(
            body.width,
            body.height,
            self.threads.len(),
            &self.config,
            self.clock.clone(),
            self.scroll_store.clone(),
        ));
        debug!("home view mounted");
    }

    fn unmount_home(&mut self, remember_position: bool) {
        if let Some(mut home) = self.home.take() {
            home.leave(remember_position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::feed::demo_feed;
    use crate::core::store::MemoryScrollStore;

    fn state() -> (AppState, ManualClock, Arc<MemoryScrollStore>) {
        let clock = ManualClock::new(0);
        let store = Arc::new(MemoryScrollStore::new());
        let state = AppState::new(
            demo_feed(Utc::now()),
            AppConfig::default(),
            Arc::new(clock.clone()),
            store.clone(),
            Arc::new(SessionStore::new()),
            Rect::new(0, 0, 120, 31),
        );
        (state, clock, store)
    }

    #[test]
    fn test_thread_round_trip_restores_scroll() {
        let (mut state, _clock, store) = state();
        let home = state.home.as_mut().expect("mounted");
        home.select(8);
        let top = home.scroll_top();
        assert!(top > 0);

        state.open_thread(8);
        assert_eq!(state.route, Route::Thread(8));
        assert!(state.home.is_none());
        assert_eq!(store.get(), Some(top));

        state.go_home();
        assert_eq!(state.route, Route::Home);
        assert_eq!(state.home.as_ref().map(|h| h.scroll_top()), Some(top));
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_search_submit_hands_question_over() {
        let (mut state, _clock, store) = state();
        let query = state.threads[0].title.split_whitespace().next().map(str::to_string);
        let home = state.home.as_mut().expect("mounted");
        for c in query.as_deref().unwrap_or("a").chars() {
            home.input.insert(c);
        }

        state.submit_search();
        let Route::Search { handoff, results, selected } = &state.route else {
            panic!("expected search route, got {:?}", state.route);
        };
        assert_eq!(Some(handoff.question.as_str()), query.as_deref());
        assert!(!results.is_empty());
        assert_eq!(*selected, Some(0));
        assert!(state.home.is_none());
        assert_eq!(store.get(), None, "search does not remember scroll");
        assert!(SearchHandoff::take(&state.session).is_none(), "handoff consumed");
    }

    #[test]
    fn test_search_submit_carries_mentions_as_contexts() {
        let (mut state, _clock, _store) = state();
        let home = state.home.as_mut().expect("mounted");
        for c in "@mira @sam snapping feed".chars() {
            home.input.insert(c);
        }

        state.submit_search();
        let Route::Search { handoff, .. } = &state.route else {
            panic!("expected search route, got {:?}", state.route);
        };
        assert_eq!(handoff.question, "snapping feed");
        assert_eq!(handoff.contexts, vec!["mira".to_string(), "sam".to_string()]);
    }

    #[test]
    fn test_mentions_alone_are_not_a_question() {
        let (mut state, _clock, _store) = state();
        let home = state.home.as_mut().expect("mounted");
        for c in "@mira".chars() {
            home.input.insert(c);
        }
        state.submit_search();
        assert_eq!(state.route, Route::Home);
        assert_eq!(state.home.as_ref().map(|h| h.input.value()), Some("@mira"));
    }

    #[test]
    fn test_blank_search_stays_home() {
        let (mut state, _clock, _store) = state();
        state.submit_search();
        assert_eq!(state.route, Route::Home);
        assert!(state.home.is_some());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_out_of_range_thread_is_ignored() {
        let (mut state, _clock, _store) = state();
        let count = state.threads.len();
        state.open_thread(count);
        assert_eq!(state.route, Route::Home);
        assert!(state.home.is_some());
    }
}
