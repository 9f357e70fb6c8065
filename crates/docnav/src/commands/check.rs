//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_sidebar::VersionMetadata;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Version metadata file (overrides config).
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Problems found in a version metadata file.
#[derive(Debug, Default, PartialEq, Eq)]
struct CheckReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the metadata has errors.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            metadata_path: self.metadata,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let metadata_path = &config.docs_resolved.metadata_path;

        output.info(&format!("Metadata: {}", metadata_path.display()));
        let metadata = VersionMetadata::load(metadata_path)?;

        let report = check_metadata(&metadata, config.docs_resolved.default_sidebar.as_deref());
        for warning in &report.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        for error in &report.errors {
            output.error(error);
        }

        if !report.errors.is_empty() {
            return Err(CliError::Validation(format!(
                "{} problem(s) found in {}",
                report.errors.len(),
                metadata_path.display()
            )));
        }

        output.success(&format!(
            "{} sidebar(s) OK for version \"{}\"",
            metadata.docs_sidebars.len(),
            metadata.version
        ));
        Ok(())
    }
}

/// Collect the problems of `metadata`.
///
/// Permalinks pointing to unknown sidebars are errors since rendering those
/// pages fails. Permalinks missing from their sidebar and empty categories
/// only produce warnings.
fn check_metadata(metadata: &VersionMetadata, default_sidebar: Option<&str>) -> CheckReport {
    let mut report = CheckReport::default();

    for dangling in metadata.dangling_sidebar_refs() {
        report.errors.push(format!(
            "{}: cannot find the sidebar \"{}\"",
            dangling.permalink, dangling.sidebar
        ));
    }

    // Unmapped routes and an unmapped home page fall back to the default sidebar
    if let Some(id) = default_sidebar
        && !metadata.docs_sidebars.contains(id)
        && metadata
            .routes
            .iter()
            .chain(&metadata.home_page_path)
            .any(|route| !metadata.permalink_to_sidebar.contains_key(route))
    {
        report.errors.push(format!(
            "default sidebar \"{id}\" is used by unmapped routes but not defined"
        ));
    }

    for unlisted in metadata.unlisted_permalinks() {
        report.warnings.push(format!(
            "{}: not linked from its sidebar \"{}\"",
            unlisted.permalink, unlisted.sidebar
        ));
    }

    for empty in metadata.empty_categories() {
        report.warnings.push(format!(
            "{}: category \"{}\" has no items and is not shown",
            empty.sidebar, empty.label
        ));
    }

    tracing::info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Checked version metadata"
    );

    report
}
