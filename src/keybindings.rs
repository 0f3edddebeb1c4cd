//! Keybinding registry: maps key events to actions, with config overrides.
//!
//! Overrides come from the `[keybindings]` table in config.toml, keyed by
//! action name (`reload = "F5"`).
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// Everything a key can trigger outside of search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    CycleFocus,
    Select,
    Back,
    EnterSearch,
    SortByViews,
    SortByDate,
    Reload,
    ToggleTheme,
    ToggleSidebar,
    ShowHelp,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
}

impl Action {
    /// Human-readable description for the help overlay.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::NavDown => "Move down",
            Self::NavUp => "Move up",
            Self::CycleFocus => "Switch between categories and articles",
            Self::Select => "Apply category / open article",
            Self::Back => "Close article",
            Self::EnterSearch => "Search titles",
            Self::SortByViews => "Sort by views",
            Self::SortByDate => "Sort by date",
            Self::Reload => "Reload articles",
            Self::ToggleTheme => "Toggle light/dark theme",
            Self::ToggleSidebar => "Show/hide category sidebar",
            Self::ShowHelp => "Show this help",
            Self::ScrollDown => "Scroll down",
            Self::ScrollUp => "Scroll up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
        }
    }

    /// Config name of the action, as used in `[keybindings]`.
    pub fn config_name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::NavDown => "nav_down",
            Self::NavUp => "nav_up",
            Self::CycleFocus => "cycle_focus",
            Self::Select => "select",
            Self::Back => "back",
            Self::EnterSearch => "search",
            Self::SortByViews => "sort_views",
            Self::SortByDate => "sort_date",
            Self::Reload => "reload",
            Self::ToggleTheme => "toggle_theme",
            Self::ToggleSidebar => "toggle_sidebar",
            Self::ShowHelp => "help",
            Self::ScrollDown => "scroll_down",
            Self::ScrollUp => "scroll_up",
            Self::PageDown => "page_down",
            Self::PageUp => "page_up",
        }
    }

    const ALL: [Action; 17] = [
        Self::Quit,
        Self::NavDown,
        Self::NavUp,
        Self::CycleFocus,
        Self::Select,
        Self::Back,
        Self::EnterSearch,
        Self::SortByViews,
        Self::SortByDate,
        Self::Reload,
        Self::ToggleTheme,
        Self::ToggleSidebar,
        Self::ShowHelp,
        Self::ScrollDown,
        Self::ScrollUp,
        Self::PageDown,
        Self::PageUp,
    ];

    fn from_config_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|a| a.config_name() == name)
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Which bindings are active. Specific contexts fall back to `Global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Browse,
    Detail,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Everywhere",
            Self::Browse => "Article list",
            Self::Detail => "Article view",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// Parse a key string from config.
    ///
    /// Accepts single characters (`"q"`, `"/"`), named keys (`"Enter"`,
    /// `"PageDown"`), function keys (`"F5"`) and `Ctrl+` combos (`"Ctrl+r"`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(rest) = s.strip_prefix("Ctrl+") {
            let mut chars = rest.trim().chars();
            let c = chars.next()?;
            return chars
                .next()
                .is_none()
                .then(|| Self::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        }

        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::ch(c));
        }

        let code = match s.to_ascii_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "backspace" => KeyCode::Backspace,
            "space" => KeyCode::Char(' '),
            other => {
                let n = other.strip_prefix('f')?.parse::<u8>().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
        };
        Some(Self::plain(code))
    }
}

impl std::fmt::Display for KeySpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => f.write_str("Enter"),
            KeyCode::Esc => f.write_str("Esc"),
            KeyCode::Tab => f.write_str("Tab"),
            KeyCode::Up => f.write_str("↑"),
            KeyCode::Down => f.write_str("↓"),
            KeyCode::Left => f.write_str("←"),
            KeyCode::Right => f.write_str("→"),
            KeyCode::PageUp => f.write_str("PgUp"),
            KeyCode::PageDown => f.write_str("PgDn"),
            KeyCode::Backspace => f.write_str("Backspace"),
            KeyCode::F(n) => write!(f, "F{}", n),
            _ => f.write_str("?"),
        }
    }
}

// ============================================================================
// Keybinding Registry
// ============================================================================

const DEFAULT_BINDINGS: &[(Context, KeySpec, Action)] = &[
    (Context::Global, KeySpec::ch('q'), Action::Quit),
    (Context::Global, KeySpec::ch('?'), Action::ShowHelp),
    (Context::Global, KeySpec::ch('t'), Action::ToggleTheme),
    (Context::Global, KeySpec::ch('r'), Action::Reload),
    (Context::Browse, KeySpec::ch('j'), Action::NavDown),
    (Context::Browse, KeySpec::plain(KeyCode::Down), Action::NavDown),
    (Context::Browse, KeySpec::ch('k'), Action::NavUp),
    (Context::Browse, KeySpec::plain(KeyCode::Up), Action::NavUp),
    (Context::Browse, KeySpec::plain(KeyCode::Tab), Action::CycleFocus),
    (Context::Browse, KeySpec::plain(KeyCode::Enter), Action::Select),
    (Context::Browse, KeySpec::ch('/'), Action::EnterSearch),
    (Context::Browse, KeySpec::ch('v'), Action::SortByViews),
    (Context::Browse, KeySpec::ch('d'), Action::SortByDate),
    (Context::Browse, KeySpec::ch('c'), Action::ToggleSidebar),
    (Context::Detail, KeySpec::plain(KeyCode::Esc), Action::Back),
    (Context::Detail, KeySpec::ch('b'), Action::Back),
    (Context::Detail, KeySpec::ch('j'), Action::ScrollDown),
    (Context::Detail, KeySpec::plain(KeyCode::Down), Action::ScrollDown),
    (Context::Detail, KeySpec::ch('k'), Action::ScrollUp),
    (Context::Detail, KeySpec::plain(KeyCode::Up), Action::ScrollUp),
    (Context::Detail, KeySpec::plain(KeyCode::PageDown), Action::PageDown),
    (Context::Detail, KeySpec::ch(' '), Action::PageDown),
    (Context::Detail, KeySpec::plain(KeyCode::PageUp), Action::PageUp),
];

/// Context-aware key lookup, seeded with the default bindings.
#[derive(Debug, Clone)]
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// Insertion-ordered copy for the help overlay.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        for &(context, key, action) in DEFAULT_BINDINGS {
            registry.bind(context, key, action);
        }
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        // A key can only do one thing per context
        if let Some(previous) = self.lookup.insert((context, key), action) {
            self.bindings
                .retain(|&(c, k, a)| !(c == context && k == key && a == previous));
        }
        self.bindings.push((context, key, action));
    }

    /// Replace the keys of the named actions.
    ///
    /// Each override replaces every default key of that action, in every
    /// context it was bound in. Returns warnings for unknown action names
    /// and unparseable keys; those entries are skipped.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = Action::from_config_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = KeySpec::parse(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);
            for context in contexts {
                self.bind(context, key, action);
            }

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    /// Action for a key in `context`, falling back to `Global`.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);
        self.lookup
            .get(&(context, key))
            .or_else(|| self.lookup.get(&(Context::Global, key)))
            .copied()
    }

    /// Bindings grouped per context and action, for the help overlay.
    ///
    /// Returns `(context, keys, description)` with multiple keys joined by "/".
    pub fn help_rows(&self) -> Vec<(Context, String, &'static str)> {
        let mut rows: Vec<(Context, Action, Vec<String>)> = Vec::new();
        for &(context, key, action) in &self.bindings {
            match rows
                .iter_mut()
                .find(|(c, a, _)| *c == context && *a == action)
            {
                Some((_, _, keys)) => keys.push(key.to_string()),
                None => rows.push((context, action, vec![key.to_string()])),
            }
        }
        rows.into_iter()
            .map(|(c, a, keys)| (c, keys.join("/"), a.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup(reg: &KeybindingRegistry, code: KeyCode, ctx: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_default_browse_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('v'), Context::Browse), Some(Action::SortByViews));
        assert_eq!(lookup(&reg, KeyCode::Char('d'), Context::Browse), Some(Action::SortByDate));
        assert_eq!(lookup(&reg, KeyCode::Char('/'), Context::Browse), Some(Action::EnterSearch));
        assert_eq!(lookup(&reg, KeyCode::Down, Context::Browse), Some(Action::NavDown));
    }

    #[test]
    fn test_global_fallback() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Detail), Some(Action::Quit));
        assert_eq!(lookup(&reg, KeyCode::Char('t'), Context::Browse), Some(Action::ToggleTheme));
    }

    #[test]
    fn test_context_specific_meaning() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Detail), Some(Action::ScrollDown));
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Browse), Some(Action::NavDown));
        assert_eq!(lookup(&reg, KeyCode::Char('v'), Context::Detail), None);
    }

    #[test]
    fn test_override_replaces_all_default_keys() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("reload".to_string(), "F5".to_string())]);
        assert!(reg.apply_overrides(&overrides).is_empty());

        assert_eq!(lookup(&reg, KeyCode::F(5), Context::Browse), Some(Action::Reload));
        assert_eq!(lookup(&reg, KeyCode::Char('r'), Context::Browse), None);
    }

    #[test]
    fn test_override_keeps_contexts() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("back".to_string(), "h".to_string())]);
        reg.apply_overrides(&overrides);

        assert_eq!(lookup(&reg, KeyCode::Char('h'), Context::Detail), Some(Action::Back));
        assert_eq!(lookup(&reg, KeyCode::Char('h'), Context::Browse), None);
        assert_eq!(lookup(&reg, KeyCode::Esc, Context::Detail), None);
    }

    #[test]
    fn test_override_warnings() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([
            ("teleport".to_string(), "x".to_string()),
            ("quit".to_string(), "Hyper+q".to_string()),
        ]);
        let mut warnings = reg.apply_overrides(&overrides);
        warnings.sort();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Cannot parse key"));
        assert!(warnings[1].contains("Unknown action"));
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Browse), Some(Action::Quit));
    }

    #[test]
    fn test_parse_key_strings() {
        assert_eq!(KeySpec::parse("q"), Some(KeySpec::ch('q')));
        assert_eq!(KeySpec::parse("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(KeySpec::parse("pagedown"), Some(KeySpec::plain(KeyCode::PageDown)));
        assert_eq!(KeySpec::parse("F12"), Some(KeySpec::plain(KeyCode::F(12))));
        assert_eq!(KeySpec::parse("F13"), None);
        assert_eq!(
            KeySpec::parse("Ctrl+r"),
            Some(KeySpec::new(KeyCode::Char('r'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeySpec::parse("Ctrl+rr"), None);
        assert_eq!(KeySpec::parse("nonsense"), None);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(KeySpec::ch('/').to_string(), "/");
        assert_eq!(KeySpec::plain(KeyCode::PageDown).to_string(), "PgDn");
        assert_eq!(
            KeySpec::new(KeyCode::Char('r'), KeyModifiers::CONTROL).to_string(),
            "Ctrl+r"
        );
    }

    #[test]
    fn test_help_rows_group_keys() {
        let reg = KeybindingRegistry::new();
        let rows = reg.help_rows();
        let nav = rows
            .iter()
            .find(|(c, _, d)| *c == Context::Browse && *d == Action::NavDown.describe())
            .unwrap();
        assert_eq!(nav.1, "j/↓");
        assert!(rows.iter().any(|(c, _, _)| *c == Context::Global));
    }

    #[test]
    fn test_config_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_config_name(action.config_name()), Some(action));
        }
    }
}
