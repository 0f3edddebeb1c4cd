use crate::feed::{LoadError, ALL_CATEGORIES};
use crate::keybindings::KeybindingRegistry;
use crate::pipeline::{
    Card, DerivedView, FeedQuery, Invocation, Pipeline, RequestToken, Sequencer, Trigger,
};
use crate::preferences::Preferences;
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::path::PathBuf;
use tokio::time::Instant;

/// Maximum scroll offset for the detail view (ratatui u16 limit).
pub const MAX_SCROLL: usize = u16::MAX as usize;

/// How long a status message stays visible.
const STATUS_TTL_SECS: u64 = 3;

// ============================================================================
// View and Focus Enums
// ============================================================================

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Browse, // Sidebar + featured + cards
    Detail, // Full article
}

/// Which panel has focus in Browse view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Categories,
    Cards,
}

// ============================================================================
// Events
// ============================================================================

/// Results of background tasks, delivered to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A pipeline invocation finished.
    ///
    /// Fields:
    /// - `token`: the request token issued when the invocation was spawned
    /// - `result`: the derived view or the load failure
    FeedLoaded {
        token: RequestToken,
        result: Result<Invocation, LoadError>,
    },
    /// A background task panicked.
    ///
    /// Fields:
    /// - `token`: Token of the invocation the task was running
    /// - `task`: Name of the task that panicked (e.g., "feed_load")
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked {
        token: RequestToken,
        task: &'static str,
        error: String,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Settings `App` needs from config and preferences at startup.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub initial_query: FeedQuery,
    pub sticky_filters: bool,
    pub theme: ThemeVariant,
    pub preferences: Preferences,
    /// Where to save preferences; `None` disables persistence.
    pub preferences_path: Option<PathBuf>,
    pub keybindings: KeybindingRegistry,
}

/// All UI state, owned explicitly and handed to the pipeline on each trigger.
pub struct App {
    pub pipeline: Pipeline,
    pub sticky_filters: bool,

    /// Query of the most recent invocation.
    pub query: FeedQuery,
    pub sequencer: Sequencer,
    pub loading: bool,
    /// Handle of the in-flight invocation, aborted when a newer one starts.
    pub load_handle: Option<tokio::task::JoinHandle<()>>,
    pub spinner_frame: usize,

    /// Last successfully rendered view; kept when a later load fails.
    pub derived: Option<DerivedView>,
    /// Categories seen in the last loaded feed (without "all").
    pub categories: Vec<String>,
    /// Hides the "most popular" block. Picking any category, "all" included,
    /// sets it; a search trigger sets it to whether the query is filtered.
    pub featured_hidden: bool,

    pub view: View,
    pub focus: Focus,
    pub selected_category: usize,
    pub selected_card: usize,
    pub detail: Option<Card>,
    pub detail_scroll: usize,
    pub detail_visible_lines: usize,

    pub show_sidebar: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub search_mode: bool,
    pub search_input: String,

    pub keybindings: KeybindingRegistry,
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub preferences: Preferences,
    pub preferences_path: Option<PathBuf>,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// The current status message reports a failure.
    pub status_is_error: bool,
    pub needs_redraw: bool,
}

impl App {
    pub fn new(pipeline: Pipeline, options: AppOptions) -> Self {
        let search_input = options.initial_query.search_term.clone();
        let featured_hidden = options.initial_query.is_filtered();
        Self {
            pipeline,
            sticky_filters: options.sticky_filters,
            query: options.initial_query,
            sequencer: Sequencer::new(),
            loading: false,
            load_handle: None,
            spinner_frame: 0,
            derived: None,
            categories: Vec::new(),
            featured_hidden,
            view: View::Browse,
            focus: Focus::Cards,
            selected_category: 0,
            selected_card: 0,
            detail: None,
            detail_scroll: 0,
            detail_visible_lines: 0,
            show_sidebar: true,
            show_help: false,
            help_scroll: 0,
            search_mode: false,
            search_input,
            keybindings: options.keybindings,
            theme_variant: options.theme,
            theme: StyleMap::from_palette(&options.theme.palette()),
            preferences: options.preferences,
            preferences_path: options.preferences_path,
            status_message: None,
            status_is_error: false,
            needs_redraw: true,
        }
    }

    // ========================================================================
    // Theme
    // ========================================================================

    /// Resolve a semantic role to a style in the current theme.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch theme and remember the choice for the next session.
    pub fn toggle_theme(&mut self) {
        let variant = self.theme_variant.next();
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;

        self.preferences.theme = Some(variant.key().to_string());
        if let Some(path) = &self.preferences_path {
            if let Err(e) = self.preferences.save(path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to save theme preference");
                self.set_status(format!("Theme: {} (not saved: {})", variant.name(), e));
                return;
            }
        }
        self.set_status(format!("Theme: {}", variant.name()));
    }

    // ========================================================================
    // Pipeline invocations
    // ========================================================================

    /// Record a new invocation for `trigger` and return its token and query.
    ///
    /// Every earlier invocation becomes stale from this point on.
    pub fn begin_invocation(&mut self, trigger: &Trigger) -> (RequestToken, FeedQuery) {
        let query = trigger.apply(&self.query, self.sticky_filters);
        let token = self.sequencer.issue();

        tracing::debug!(
            token = token.get(),
            sort = %query.sort_key,
            search = %query.search_term,
            category = %query.category,
            "Starting pipeline invocation"
        );

        match trigger {
            Trigger::SearchChanged(_) => self.featured_hidden = query.is_filtered(),
            Trigger::CategorySelected(_) => self.featured_hidden = true,
            Trigger::SortChanged(_) | Trigger::Reload => {}
        }

        self.query = query.clone();
        if !self.search_mode {
            self.search_input = query.search_term.clone();
        }
        self.loading = true;
        (token, query)
    }

    /// Apply a finished invocation if it is still the latest one.
    ///
    /// Returns `false` for stale results, which are dropped untouched. A load
    /// error keeps the previously rendered view.
    pub fn accept_invocation(
        &mut self,
        token: RequestToken,
        result: Result<Invocation, LoadError>,
    ) -> bool {
        if !self.sequencer.is_current(token) {
            tracing::debug!(token = token.get(), "Dropping stale invocation result");
            return false;
        }
        self.loading = false;

        match result {
            Ok(invocation) => {
                tracing::debug!(
                    token = token.get(),
                    cards = invocation.view.len(),
                    "Rendering invocation result"
                );
                self.categories = invocation.categories;
                self.derived = Some(invocation.view);
                self.selected_card = 0;
                self.sync_category_selection();
            }
            Err(e) => {
                tracing::warn!(token = token.get(), error = %e, "Error loading articles");
                self.set_error(format!("Error loading articles: {}", e));
            }
        }
        true
    }

    /// Handle a panicked background task.
    /// Record a panicked invocation. Returns false if `token` was superseded.
    pub fn task_panicked(
        &mut self,
        token: RequestToken,
        task: &'static str,
        error: &str,
    ) -> bool {
        tracing::error!(task, error, token = token.get(), "Background task panicked");
        if !self.sequencer.is_current(token) {
            return false;
        }
        self.loading = false;
        self.set_error(format!("Internal error in {}: {}", task, error));
        true
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Sidebar entries: "all" followed by the feed's categories.
    pub fn category_items(&self) -> Vec<&str> {
        std::iter::once(ALL_CATEGORIES)
            .chain(self.categories.iter().map(String::as_str))
            .collect()
    }

    fn sync_category_selection(&mut self) {
        let index = self
            .category_items()
            .iter()
            .position(|c| *c == self.query.category)
            .unwrap_or(0);
        self.selected_category = index;
    }

    /// The "most popular" block, unless a search or category pick hid it.
    pub fn featured(&self) -> Option<&Card> {
        if self.featured_hidden {
            return None;
        }
        self.derived.as_ref().and_then(|v| v.featured.as_ref())
    }

    pub fn card_count(&self) -> usize {
        self.derived.as_ref().map_or(0, DerivedView::len)
    }

    pub fn selected_category_name(&self) -> Option<&str> {
        self.category_items().get(self.selected_category).copied()
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Categories => {
                let max = self.category_items().len().saturating_sub(1);
                self.selected_category = (self.selected_category + 1).min(max);
            }
            Focus::Cards => {
                let max = self.card_count().saturating_sub(1);
                self.selected_card = (self.selected_card + 1).min(max);
            }
        }
    }

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Categories => self.selected_category = self.selected_category.saturating_sub(1),
            Focus::Cards => self.selected_card = self.selected_card.saturating_sub(1),
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Categories => Focus::Cards,
            Focus::Cards if self.show_sidebar => Focus::Categories,
            Focus::Cards => Focus::Cards,
        };
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
        if !self.show_sidebar && self.focus == Focus::Categories {
            self.focus = Focus::Cards;
        }
    }

    /// Open the detail view for the selected card. Returns false if there is none.
    pub fn open_detail(&mut self) -> bool {
        let Some(card) = self
            .derived
            .as_ref()
            .and_then(|v| v.cards.get(self.selected_card))
        else {
            return false;
        };
        self.detail = Some(card.clone());
        self.detail_scroll = 0;
        self.view = View::Detail;
        true
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.detail_scroll = 0;
        self.view = View::Browse;
    }

    pub fn scroll_detail(&mut self, delta: isize) {
        self.detail_scroll = self
            .detail_scroll
            .saturating_add_signed(delta)
            .min(MAX_SCROLL);
    }

    // ========================================================================
    // Status bar
    // ========================================================================

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.status_is_error = false;
    }

    /// Like `set_status`, shown in the error style.
    pub fn set_error(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.set_status(msg);
        self.status_is_error = true;
    }

    /// Clear status message if expired. Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= STATUS_TTL_SECS {
                self.status_message = None;
                self.status_is_error = false;
                return true;
            }
        }
        false
    }
}
