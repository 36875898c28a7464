//! Synchronization controller for the explore view.
//!
//! The controller exclusively owns the [`FilterState`] and reconciles three
//! event sources: user mutations, inbound navigation (back/forward, direct
//! loads, shared links) and the debounced search commit. Every operation runs
//! to completion in one of three phases, so an inbound decode can never
//! trigger an outbound write and an outbound write always follows the mutation
//! that caused it.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::constants::{DEFAULT_PAGE_SIZE, SEARCH_DEBOUNCE};
use crate::debounce::Debouncer;
use crate::filter::filter_courses;
use crate::models::{Category, CategoryFilter, Course, FacetKind, FacetValue, FilterState};
use crate::navigation::{NavigationMode, Navigator};
use crate::pagination::{clamp_page, paginate, total_pages, PageView};
use crate::url_codec::{decode, encode, normalize_search_term};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// What the controller is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncPhase {
    Idle,
    /// Decoding a URL into the filter state.
    ApplyingInbound,
    /// Writing the filter state out to the URL.
    ApplyingOutbound,
}

/// How an operation affected the authoritative page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageChange {
    Unchanged,
    /// The user picked a page.
    Explicit,
    /// A filter change sent the user back to page 1.
    Reset,
    /// Inbound navigation carried a different page.
    Restored,
}

/// Outcome of a controller operation, for the render boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub state_changed: bool,
    pub page: PageChange,
    pub url_write: Option<NavigationMode>,
}

impl Transition {
    /// Nothing happened.
    pub fn none() -> Self {
        Self {
            state_changed: false,
            page: PageChange::Unchanged,
            url_write: None,
        }
    }

    /// Only explicit page navigation scrolls back to the top of the results.
    pub fn should_scroll_to_top(&self) -> bool {
        self.page == PageChange::Explicit
    }
}

/// Result list as seen by the render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreResults<'a> {
    /// The catalog has not arrived yet.
    Loading,
    /// A page of results, possibly empty.
    Ready(PageView<&'a Course>),
}

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExploreOptions {
    pub page_size: usize,
    pub search_debounce: Duration,
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }
}

impl ExploreOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size.max(1),
            search_debounce: config.search_debounce,
        }
    }
}

/// Owns the explore filter state and keeps it in sync with the URL.
pub struct ExploreController<N: Navigator> {
    catalog: Option<Arc<Catalog>>,
    navigator: N,
    state: FilterState,
    phase: SyncPhase,
    search_input: String,
    search_debounce: Debouncer<String>,
    // Search value most recently written to or read from the URL.
    last_pushed_search: String,
    page_size: usize,
    torn_down: bool,
}

impl<N: Navigator> ExploreController<N> {
    /// Create a controller and apply the navigator's current location as a
    /// direct load.
    ///
    /// # Arguments
    /// - `catalog`: The loaded catalog, or `None` while it is still loading.
    /// - `navigator`: Host navigation API.
    /// - `options`: Page size and debounce interval.
    pub fn new(catalog: Option<Arc<Catalog>>, navigator: N, options: ExploreOptions) -> Self {
        let mut controller = Self {
            catalog,
            navigator,
            state: FilterState::default(),
            phase: SyncPhase::Idle,
            search_input: String::new(),
            search_debounce: Debouncer::new(options.search_debounce),
            last_pushed_search: String::new(),
            page_size: options.page_size.max(1),
            torn_down: false,
        };
        let initial = controller.navigator.current_query();
        controller.on_navigation(&initial);
        controller
    }

    /// Provide the catalog once it has loaded. Later calls are ignored.
    pub fn attach_catalog(&mut self, catalog: Arc<Catalog>) -> bool {
        if self.catalog.is_some() {
            warn!("catalog already attached; ignoring replacement");
            return false;
        }
        debug!(courses = catalog.len(), "catalog attached to explore controller");
        self.catalog = Some(catalog);
        true
    }

    /// The attached catalog, if it has loaded.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    /// Read-only view of the authoritative filter state.
    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    /// Raw search box text, updated on every keystroke.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether a search commit is waiting for its quiet period.
    pub fn search_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }

    /// When the pending search commit fires, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search_debounce.due_at()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Mutable access for hosts that drive history (back/forward).
    ///
    /// Locations obtained this way must be fed back through
    /// [`ExploreController::on_navigation`].
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Canonical query for the current state.
    pub fn canonical_query(&self) -> String {
        encode(&self.state)
    }

    /// Courses matching the current state, in catalog order.
    pub fn filtered(&self) -> Vec<&Course> {
        match self.catalog.as_deref() {
            Some(catalog) => filter_courses(catalog.courses(), &self.state),
            None => Vec::new(),
        }
    }

    /// Derive the page to render. Recomputed on every call.
    pub fn results(&self) -> ExploreResults<'_> {
        match self.catalog.as_deref() {
            None => ExploreResults::Loading,
            Some(catalog) => {
                let matched = filter_courses(catalog.courses(), &self.state);
                ExploreResults::Ready(paginate(&matched, self.state.page, self.page_size))
            }
        }
    }

    /// The current page, or `None` while the catalog is loading.
    pub fn current_page_view(&self) -> Option<PageView<&Course>> {
        match self.results() {
            ExploreResults::Ready(view) => Some(view),
            ExploreResults::Loading => None,
        }
    }

    /// Apply an inbound location (back/forward, direct load, shared link).
    ///
    /// The decoded state replaces the current one wholesale, page included,
    /// and no outbound write is issued. Uncommitted search input is discarded
    /// so it can never land on the entry navigated to.
    pub fn on_navigation(&mut self, query: &str) -> Transition {
        if self.torn_down {
            return Transition::none();
        }
        self.phase = SyncPhase::ApplyingInbound;
        let decoded = decode(query);

        if let Some(pending) = self.search_debounce.cancel() {
            trace!(pending = %pending, "inbound navigation discarded pending search");
        }
        self.search_input = decoded.search_term.clone();
        self.last_pushed_search = decoded.search_term.clone();

        let page = if decoded.page != self.state.page {
            PageChange::Restored
        } else {
            PageChange::Unchanged
        };
        let state_changed = decoded != self.state;
        self.state = decoded;
        self.phase = SyncPhase::Idle;

        debug!(
            query,
            state_changed,
            page = self.state.page,
            "applied inbound navigation"
        );
        Transition {
            state_changed,
            page,
            url_write: None,
        }
    }

    /// Echo raw search text immediately and schedule its commit.
    pub fn set_search_input(&mut self, raw: impl Into<String>, now: Instant) {
        if self.torn_down {
            return;
        }
        let raw = raw.into();
        self.search_input = raw.clone();
        self.search_debounce.schedule(raw, now);
        trace!(input = %self.search_input, "search input scheduled");
    }

    /// Fire the debounced search commit if its quiet period elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Transition> {
        if self.torn_down {
            return None;
        }
        let value = self.search_debounce.poll(now)?;
        Some(self.commit_search(value))
    }

    /// Commit pending search input immediately (for example on Enter).
    pub fn flush_search(&mut self) -> Option<Transition> {
        if self.torn_down {
            return None;
        }
        let value = self.search_debounce.cancel()?;
        Some(self.commit_search(value))
    }

    /// Select a category; `None` is "All Topics". Resets to page 1 when the
    /// selection changes; re-selecting the active category does nothing.
    pub fn set_category(&mut self, category: Option<Category>) -> Transition {
        let category = CategoryFilter::from(category);
        if self.state.category == category {
            return Transition::none();
        }
        self.apply_user_mutation(NavigationMode::Push, |state| {
            state.category = category;
            reset_page(state)
        })
    }

    /// Flip a facet checkbox. Resets to page 1.
    pub fn toggle_facet(&mut self, value: FacetValue) -> Transition {
        self.apply_user_mutation(NavigationMode::Push, |state| {
            state.toggle_facet(value);
            reset_page(state)
        })
    }

    /// Flip a facet checkbox by its string token.
    ///
    /// # Returns
    /// `None`, leaving the state untouched, when `token` is not a value of `kind`.
    pub fn toggle_facet_token(&mut self, kind: FacetKind, token: &str) -> Option<Transition> {
        let value = kind.value(token)?;
        Some(self.toggle_facet(value))
    }

    /// Empty one facet dimension, unrecognized tokens included. Resets to page 1.
    pub fn clear_facet(&mut self, kind: FacetKind) -> Transition {
        if self.state.facet_joined(kind).is_empty() {
            return Transition::none();
        }
        self.apply_user_mutation(NavigationMode::Push, |state| {
            state.clear_facet(kind);
            reset_page(state)
        })
    }

    /// Navigate to page `page`, clamped to the pages that currently exist.
    ///
    /// While the catalog is loading the page count is unknown, so only the
    /// lower bound applies; rendering clamps once results arrive.
    pub fn set_page(&mut self, page: u32) -> Transition {
        let target = match self.catalog.as_deref() {
            Some(catalog) => clamp_page(
                page,
                total_pages(
                    filter_courses(catalog.courses(), &self.state).len(),
                    self.page_size,
                ),
            ),
            None => page.max(1),
        };
        self.apply_user_mutation(NavigationMode::Push, |state| {
            if state.page == target {
                return PageChange::Unchanged;
            }
            state.page = target;
            PageChange::Explicit
        })
    }

    /// Drop every filter, including uncommitted search input.
    pub fn clear_all(&mut self) -> Transition {
        if self.torn_down {
            return Transition::none();
        }
        self.search_debounce.cancel();
        self.search_input.clear();
        self.apply_user_mutation(NavigationMode::Push, |state| {
            let page = reset_page(state);
            *state = FilterState::default();
            page
        })
    }

    /// Stop reacting to events; a pending search commit never fires.
    pub fn teardown(&mut self) {
        if self.search_debounce.cancel().is_some() {
            debug!("teardown cancelled pending search commit");
        }
        self.torn_down = true;
    }

    fn commit_search(&mut self, raw: String) -> Transition {
        let value = normalize_search_term(&raw);
        if value == self.last_pushed_search {
            trace!(value = %value, "search unchanged since last write");
            return Transition::none();
        }
        self.apply_user_mutation(NavigationMode::Replace, move |state| {
            state.search_term = value;
            reset_page(state)
        })
    }

    fn apply_user_mutation<F>(&mut self, mode: NavigationMode, mutate: F) -> Transition
    where
        F: FnOnce(&mut FilterState) -> PageChange,
    {
        if self.torn_down {
            return Transition::none();
        }
        debug_assert_eq!(self.phase, SyncPhase::Idle);
        let before = self.state.clone();
        let page = mutate(&mut self.state);
        let state_changed = before != self.state;
        let url_write = self.write_outbound(mode);
        debug!(
            state_changed,
            ?page,
            url_write = ?url_write,
            "applied user mutation"
        );
        Transition {
            state_changed,
            page,
            url_write,
        }
    }

    fn write_outbound(&mut self, mode: NavigationMode) -> Option<NavigationMode> {
        self.phase = SyncPhase::ApplyingOutbound;
        let query = encode(&self.state);
        let current = self.navigator.current_query();
        let current = current.strip_prefix('?').unwrap_or(&current);
        let written = if current == query {
            None
        } else {
            self.navigator.navigate(&query, mode);
            Some(mode)
        };
        self.last_pushed_search = self.state.search_term.clone();
        self.phase = SyncPhase::Idle;
        written
    }
}

impl<N: Navigator> Drop for ExploreController<N> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn reset_page(state: &mut FilterState) -> PageChange {
    if state.page == 1 {
        PageChange::Unchanged
    } else {
        state.page = 1;
        PageChange::Reset
    }
}
