//! `docnav render` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use docnav_config::{CliSettings, Config};
use docnav_sidebar::{
    DocRoute, Logo, SearchBar, SidebarContainer, SidebarOptions, VersionMetadata, render_sidebar,
};

use crate::error::CliError;
use crate::output::Output;

/// Output format of the rendered sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Menu markup.
    Html,
    /// Serialized sidebar view.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Location pathname of the page, e.g. `/docs/intro`.
    path: String,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Version metadata file (overrides config).
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Enable collapsible categories (default: enabled).
    #[arg(long)]
    collapsible: Option<bool>,

    /// Disable collapsible categories.
    #[arg(long, conflicts_with = "collapsible")]
    no_collapsible: bool,

    /// Hide the navbar on scroll (overrides config).
    #[arg(long)]
    hide_on_scroll: Option<bool>,

    /// Render with the mobile sidebar shown.
    #[arg(long)]
    mobile: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or metadata cannot be loaded, the
    /// path is not a doc page, or its sidebar is missing.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            metadata_path: self.metadata.clone(),
            sidebar_collapsible: self.resolve_collapsible(),
            hide_on_scroll: self.hide_on_scroll,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let metadata = VersionMetadata::load(&config.docs_resolved.metadata_path)?;

        match render_page(&config, metadata, &self.path, self.mobile, self.format)? {
            Some(rendered) => output.emit(&rendered)?,
            None => output.warning(&format!("No sidebar for {}", self.path)),
        }

        Ok(())
    }

    /// Resolve `sidebar_collapsible` from --collapsible/--no-collapsible flags.
    fn resolve_collapsible(&self) -> Option<bool> {
        self.no_collapsible.then_some(false).or(self.collapsible)
    }
}

/// Render the sidebar of the doc page at `pathname`.
///
/// Returns `Ok(None)` when the page has no sidebar.
fn render_page(
    config: &Config,
    metadata: VersionMetadata,
    pathname: &str,
    mobile: bool,
    format: Format,
) -> Result<Option<String>, CliError> {
    let (registry, routes) = metadata.into_parts();
    let routes = routes
        .with_base_path(config.site.base_url.clone())
        .with_default_sidebar(config.docs_resolved.default_sidebar.clone());

    let DocRoute::Page {
        active_path,
        sidebar,
        is_home_page,
    } = routes.resolve(pathname)
    else {
        return Err(CliError::PageNotFound(pathname.to_owned()));
    };
    tracing::info!(
        path = %pathname,
        active_path = %active_path,
        sidebar = ?sidebar,
        is_home_page,
        "Resolved doc page"
    );

    let options = SidebarOptions {
        collapsible: config.theme.sidebar.collapsible,
        hide_on_scroll: config.theme.navbar.hide_on_scroll,
    };
    let mut container = SidebarContainer::new(registry, options).with_logo(logo(config));
    if let Some(search) = config.search()? {
        container = container.with_search(SearchBar {
            app_id: search.app_id.clone(),
            api_key: search.api_key.clone(),
            index_name: search.index_name.clone(),
        });
    }
    container.set_mobile_visible(mobile);

    let Some(view) = container.render(sidebar.as_deref(), &active_path)? else {
        return Ok(None);
    };

    let rendered = match format {
        Format::Html => render_sidebar(&view),
        Format::Json => serde_json::to_string_pretty(&view)?,
    };
    Ok(Some(rendered))
}

/// Build the logo widget from navbar settings.
fn logo(config: &Config) -> Logo {
    let image = config.theme.navbar.logo.as_ref();
    Logo {
        href: config.site.base_url.clone(),
        title: config.navbar_title().to_owned(),
        src: image.map(|logo| logo.src.clone()),
        alt: image.map(|logo| logo.alt.clone()).unwrap_or_default(),
    }
}
