//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `search.app_id`
//! - `search.api_key`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override version metadata file path.
    pub metadata_path: Option<PathBuf>,
    /// Override sidebar collapsibility.
    pub sidebar_collapsible: Option<bool>,
    /// Override navbar hide-on-scroll.
    pub hide_on_scroll: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Default sidebar id used when a page has no explicit sidebar mapping.
const DEFAULT_SIDEBAR: &str = "docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,
    /// Theme configuration (navbar and sidebar).
    pub theme: ThemeConfig,
    /// Search integration (optional section).
    pub search: Option<SearchConfig>,
    /// Docs configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site tagline.
    pub tagline: String,
    /// Public site URL (empty when unknown).
    pub url: String,
    /// Base URL path the site is served under.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Site".to_owned(),
            tagline: String::new(),
            url: String::new(),
            base_url: "/".to_owned(),
        }
    }
}

/// Theme configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Navbar presentation.
    pub navbar: NavbarConfig,
    /// Sidebar behavior.
    pub sidebar: SidebarConfig,
}

/// Navbar configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Navbar title shown next to the logo. Falls back to `site.title`.
    pub title: Option<String>,
    /// Whether the navbar hides while scrolling.
    pub hide_on_scroll: bool,
    /// Navbar logo.
    pub logo: Option<LogoConfig>,
}

/// Logo image configuration.
#[derive(Debug, Deserialize)]
pub struct LogoConfig {
    /// Alternative text.
    #[serde(default)]
    pub alt: String,
    /// Image source path or URL.
    pub src: String,
}

/// Sidebar configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    /// Whether categories can be collapsed.
    pub collapsible: bool,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self { collapsible: true }
    }
}

/// Search integration configuration.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    /// Search application id.
    #[serde(default)]
    pub app_id: Option<String>,
    /// Search-only API key.
    pub api_key: String,
    /// Index name.
    pub index_name: String,
}

impl SearchConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api_key, "search.api_key")?;
        require_non_empty(&self.index_name, "search.index_name")?;
        Ok(())
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    metadata: Option<String>,
    default_sidebar: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Version metadata file (sidebars and permalink mapping).
    pub metadata_path: PathBuf,
    /// Sidebar used for pages without an explicit mapping.
    ///
    /// `None` when `docs.default_sidebar` is set to an empty string.
    pub default_sidebar: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`search.api_key`").
        field: String,
        /// Error message (e.g., "${`ALGOLIA_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Navbar title, falling back to the site title.
    #[must_use]
    pub fn navbar_title(&self) -> &str {
        self.theme
            .navbar
            .title
            .as_deref()
            .unwrap_or(&self.site.title)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(metadata_path) = &settings.metadata_path {
            self.docs_resolved.metadata_path.clone_from(metadata_path);
        }
        if let Some(collapsible) = settings.sidebar_collapsible {
            self.theme.sidebar.collapsible = collapsible;
        }
        if let Some(hide_on_scroll) = settings.hide_on_scroll {
            self.theme.navbar.hide_on_scroll = hide_on_scroll;
        }
    }

    /// Get validated search configuration.
    ///
    /// Returns `None` when the `[search]` section is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is present but invalid.
    pub fn search(&self) -> Result<Option<&SearchConfig>, ConfigError> {
        match &self.search {
            Some(search) => {
                search.validate()?;
                Ok(Some(search))
            }
            None => Ok(None),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            theme: ThemeConfig::default(),
            search: None,
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                metadata_path: base.join("build").join("docs-metadata.json"),
                default_sidebar: Some(DEFAULT_SIDEBAR.to_owned()),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file. The `[search]` section
    /// is validated lazily by [`Config::search`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_theme()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;

        if !self.site.url.is_empty() {
            require_http_url(&self.site.url, "site.url")?;
        }

        let base_url = &self.site.base_url;
        if !base_url.starts_with('/') || !base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_url must start and end with '/', got \"{base_url}\""
            )));
        }

        Ok(())
    }

    /// Validate theme configuration.
    fn validate_theme(&self) -> Result<(), ConfigError> {
        if let Some(logo) = &self.theme.navbar.logo {
            require_non_empty(&logo.src, "theme.navbar.logo.src")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.url = expand::expand_env(&self.site.url, "site.url")?;

        if let Some(ref mut search) = self.search {
            if let Some(ref app_id) = search.app_id {
                search.app_id = Some(expand::expand_env(app_id, "search.app_id")?);
            }
            search.api_key = expand::expand_env(&search.api_key, "search.api_key")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let metadata_path = match self.docs.metadata.as_deref() {
            Some(path) => config_dir.join(path),
            None => config_dir.join("build").join("docs-metadata.json"),
        };

        // An explicit empty value disables the fallback sidebar
        let default_sidebar = match self.docs.default_sidebar.as_deref() {
            Some("") => None,
            Some(id) => Some(id.to_owned()),
            None => Some(DEFAULT_SIDEBAR.to_owned()),
        };

        self.docs_resolved = DocsConfig {
            metadata_path,
            default_sidebar,
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "My Site");
        assert_eq!(config.site.base_url, "/");
        assert!(config.theme.sidebar.collapsible);
        assert!(!config.theme.navbar.hide_on_scroll);
        assert!(config.search.is_none());
        assert_eq!(
            config.docs_resolved.metadata_path,
            PathBuf::from("/test/build/docs-metadata.json")
        );
        assert_eq!(config.docs_resolved.default_sidebar.as_deref(), Some("docs"));
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "My Site");
        assert!(config.theme.sidebar.collapsible);
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
title = "Developers"
tagline = "Build things"
url = "https://developers.example.com"
base_url = "/docs/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Developers");
        assert_eq!(config.site.tagline, "Build things");
        assert_eq!(config.site.url, "https://developers.example.com");
        assert_eq!(config.site.base_url, "/docs/");
    }

    #[test]
    fn test_parse_theme_config() {
        let toml = r#"
[theme.navbar]
title = "Docs"
hide_on_scroll = true

[theme.navbar.logo]
alt = "Site Logo"
src = "img/logo.svg"

[theme.sidebar]
collapsible = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.navbar.title.as_deref(), Some("Docs"));
        assert!(config.theme.navbar.hide_on_scroll);
        let logo = config.theme.navbar.logo.as_ref().unwrap();
        assert_eq!(logo.alt, "Site Logo");
        assert_eq!(logo.src, "img/logo.svg");
        assert!(!config.theme.sidebar.collapsible);
    }

    #[test]
    fn test_parse_search_config() {
        let toml = r#"
[search]
api_key = "d081a1783dc1"
index_name = "developers"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.api_key, "d081a1783dc1");
        assert_eq!(search.index_name, "developers");
        assert!(search.app_id.is_none());
    }

    #[test]
    fn test_navbar_title_falls_back_to_site_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.navbar_title(), "My Site");

        config.theme.navbar.title = Some("Docs".to_owned());
        assert_eq!(config.navbar_title(), "Docs");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
metadata = "build/current.json"
default_sidebar = "api"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.metadata_path,
            PathBuf::from("/project/build/current.json")
        );
        assert_eq!(config.docs_resolved.default_sidebar.as_deref(), Some("api"));
    }

    #[test]
    fn test_resolve_paths_empty_default_sidebar_disables_fallback() {
        let toml = r#"
[docs]
default_sidebar = ""
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert!(config.docs_resolved.default_sidebar.is_none());
        assert_eq!(
            config.docs_resolved.metadata_path,
            PathBuf::from("/project/build/docs-metadata.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_metadata_path() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            metadata_path: Some(PathBuf::from("/custom/meta.yaml")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.metadata_path,
            PathBuf::from("/custom/meta.yaml")
        );
        assert!(config.theme.sidebar.collapsible); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_collapsible() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            sidebar_collapsible: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.theme.sidebar.collapsible);
    }

    #[test]
    fn test_apply_cli_settings_hide_on_scroll() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            hide_on_scroll: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(config.theme.navbar.hide_on_scroll);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.docs_resolved.metadata_path,
            config_before.docs_resolved.metadata_path
        );
        assert_eq!(
            config.theme.sidebar.collapsible,
            config_before.theme.sidebar.collapsible
        );
    }

    #[test]
    fn test_expand_env_vars_search() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_SEARCH_API_KEY", "secret-key");
        }

        let toml = r#"
[search]
app_id = "${TEST_SEARCH_APP_ID:-BH4D9OD16A}"
api_key = "${TEST_SEARCH_API_KEY}"
index_name = "developers"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        let search = config.search.unwrap();
        assert_eq!(search.api_key, "secret-key");
        assert_eq!(search.app_id.as_deref(), Some("BH4D9OD16A"));

        unsafe {
            std::env::remove_var("TEST_SEARCH_API_KEY");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_CONFIG_TEST");
        }

        let toml = r#"
[site]
url = "${MISSING_VAR_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let result = config.expand_env_vars();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_CONFIG_TEST"));
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(
            &path,
            r#"
[site]
title = "Developers"

[docs]
metadata = "meta/current.yaml"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.title, "Developers");
        assert_eq!(
            config.docs_resolved.metadata_path,
            dir.path().join("meta/current.yaml")
        );
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_applies_cli_settings_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(&path, "[theme.sidebar]\ncollapsible = true\n").unwrap();

        let settings = CliSettings {
            sidebar_collapsible: Some(false),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert!(!config.theme.sidebar.collapsible);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/docnav.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(&path, "[site\ntitle = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_site_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = String::new();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_site_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.url = "ftp://docs.example.com".to_owned();
        assert_validation_error(&config, &["site.url", "http"]);
    }

    #[test]
    fn test_validate_base_url_without_slashes() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "docs".to_owned();
        assert_validation_error(&config, &["site.base_url", "'/'"]);
    }

    #[test]
    fn test_validate_logo_src_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.theme.navbar.logo = Some(LogoConfig {
            alt: "Logo".to_owned(),
            src: String::new(),
        });
        assert_validation_error(&config, &["theme.navbar.logo.src"]);
    }

    #[test]
    fn test_search_absent_is_none() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.search().unwrap().is_none());
    }

    #[test]
    fn test_search_invalid_index_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.search = Some(SearchConfig {
            app_id: None,
            api_key: "key".to_owned(),
            index_name: String::new(),
        });
        let err = config.search().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("search.index_name"));
    }

    #[test]
    fn test_validate_passes_with_search_section_present_but_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.search = Some(SearchConfig {
            app_id: None,
            api_key: String::new(),
            index_name: String::new(),
        });
        // Config::validate() should pass; search is validated lazily
        assert!(config.validate().is_ok());
    }
}
