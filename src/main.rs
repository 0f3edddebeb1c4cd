use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use newsdesk::app::{App, AppEvent, AppOptions};
use newsdesk::config::Config;
use newsdesk::feed::{Loader, Source, ALL_CATEGORIES};
use newsdesk::keybindings::KeybindingRegistry;
use newsdesk::pipeline::{FeedQuery, Pipeline, PresentOptions, SortKey};
use newsdesk::preferences::Preferences;
use newsdesk::theme::ThemeVariant;
use newsdesk::ui;

/// Get the config directory path (~/.config/newsdesk/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsdesk"))
}

/// Create the config directory with user-only permissions.
fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
        tracing::info!(path = %config_dir.display(), "Created config directory");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o700);
        if let Err(e) = std::fs::set_permissions(config_dir, perms) {
            tracing::warn!(
                path = %config_dir.display(),
                error = %e,
                "Failed to set config directory permissions to 0700"
            );
        }
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "newsdesk",
    version,
    about = "Browse, search and sort an article feed in the terminal"
)]
struct Args {
    /// Feed location: http(s) URL, file:// URL or path (overrides config)
    #[arg(long, value_name = "SRC")]
    source: Option<String>,

    /// Config file (default: ~/.config/newsdesk/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the articles once as plain text instead of starting the TUI
    #[arg(long)]
    print: bool,

    /// Initial title search term
    #[arg(long, value_name = "TERM")]
    search: Option<String>,

    /// Initial category filter ("all" for none)
    #[arg(long, value_name = "CAT")]
    category: Option<String>,

    /// Initial sort key: "views" or "date"
    #[arg(long, value_name = "KEY")]
    sort: Option<String>,
}

impl Args {
    fn initial_query(&self, config: &Config) -> FeedQuery {
        let sort = self
            .sort
            .as_deref()
            .map(SortKey::parse_or_default)
            .unwrap_or_else(|| config.sort_key());

        FeedQuery::default()
            .with_sort(sort)
            .with_search(self.search.clone().unwrap_or_default())
            .with_category(
                self.category
                    .clone()
                    .unwrap_or_else(|| ALL_CATEGORIES.to_string()),
            )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config_dir = get_config_dir()?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let source_str = args.source.as_deref().unwrap_or(&config.source);
    let source = Source::parse(source_str)
        .with_context(|| format!("Invalid feed source '{}'", source_str))?;

    let client = reqwest::Client::builder()
        .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .context("Failed to build HTTP client")?;
    let loader = Loader::new(client, source)
        .with_timeout(Duration::from_secs(config.request_timeout_secs.max(1)));
    let pipeline = Pipeline::new(
        loader,
        PresentOptions {
            placeholder_image: config.placeholder_image.clone(),
        },
    );

    let query = args.initial_query(&config);

    if args.print {
        tracing::info!(source = %pipeline.loader().source(), "Printing articles");
        let invocation = pipeline
            .invoke(&query)
            .await
            .context("Error loading articles")?;
        print!(
            "{}",
            ui::render_plain(&invocation.view, !query.is_filtered())
        );
        return Ok(());
    }

    ensure_config_dir(&config_dir)?;
    let preferences_path = config_dir.join("state.toml");
    let preferences = Preferences::load(&preferences_path).unwrap_or_else(|e| {
        tracing::warn!(path = %preferences_path.display(), error = %e, "Ignoring unreadable preferences");
        Preferences::default()
    });

    let theme_name = preferences.theme_name(&config);
    let theme = ThemeVariant::from_str_name(theme_name).unwrap_or_else(|| {
        tracing::warn!(theme = %theme_name, "Unknown theme, using dark");
        ThemeVariant::Dark
    });

    let mut keybindings = KeybindingRegistry::new();
    for warning in keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }

    let mut app = App::new(
        pipeline,
        AppOptions {
            initial_query: query,
            sticky_filters: config.sticky_filters,
            theme,
            preferences,
            preferences_path: Some(preferences_path),
            keybindings,
        },
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_query_from_args() {
        let args = Args::parse_from([
            "newsdesk",
            "--search",
            "alp",
            "--category",
            "tech",
            "--sort",
            "date",
        ]);
        let query = args.initial_query(&Config::default());
        assert_eq!(query.search_term, "alp");
        assert_eq!(query.category, "tech");
        assert_eq!(query.sort_key, SortKey::Date);
    }

    #[test]
    fn test_initial_query_defaults_to_config() {
        let args = Args::parse_from(["newsdesk"]);
        let config = Config {
            default_sort: "date".into(),
            ..Config::default()
        };
        let query = args.initial_query(&config);
        assert_eq!(query.sort_key, SortKey::Date);
        assert_eq!(query.category, "all");
        assert!(!query.is_filtered());
    }

    #[test]
    fn test_unknown_sort_falls_back_to_views() {
        let args = Args::parse_from(["newsdesk", "--sort", "trending"]);
        assert_eq!(args.initial_query(&Config::default()).sort_key, SortKey::Views);
    }
}
