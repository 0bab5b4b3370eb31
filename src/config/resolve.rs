use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{Result, SpecDiffError};
use crate::output::{OutputFormat, ReportKind};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = ".specdiff.toml";

const KEYS: [&str; 4] = [
    "defaults.format",
    "defaults.report",
    "defaults.quiet",
    "defaults.fail_on_incompatible",
];

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub report: Option<ReportKind>,
    pub quiet: bool,
    pub no_fail: bool,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/specdiff/config.toml)
/// 3. Project config (nearest .specdiff.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_layers(
        working_dir,
        find_user_config(),
        &|name: &str| std::env::var(name).ok(),
        cli,
    )
}

/// Layer resolution with the user config location and environment lookup supplied.
fn resolve_layers(
    working_dir: &Path,
    user_config: Option<PathBuf>,
    env: &dyn Fn(&str) -> Option<String>,
    cli: &CliOverrides,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::new();
    for key in KEYS {
        prov.set(key, Source::Default);
    }

    if let Some(path) = user_config.filter(|p| p.exists()) {
        let file = load_file_config(&path, "user")?;
        apply_file_config(&mut config, &file, Source::UserConfig(path.clone()), &mut prov)?;
        config.loaded_files.push(path);
    }

    if let Some(path) = find_project_config(working_dir) {
        let file = load_file_config(&path, "project")?;
        apply_file_config(
            &mut config,
            &file,
            Source::ProjectConfig(path.clone()),
            &mut prov,
        )?;
        config.loaded_files.push(path);
    }

    apply_env_vars(&mut config, env, &mut prov);
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.provenance = prov;
    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("specdiff").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|candidate| candidate.exists())
}

fn load_file_config(path: &Path, layer: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        SpecDiffError::Config(format!(
            "Could not read {layer} config: {}",
            path.display()
        ))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| SpecDiffError::Config(format!("Invalid {layer} config: {e}")))
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    let defaults = &file.defaults;
    if let Some(ref format) = defaults.format {
        config.format = format.parse().map_err(SpecDiffError::Config)?;
        prov.set("defaults.format", source.clone());
    }
    if let Some(ref report) = defaults.report {
        config.report = report.parse().map_err(SpecDiffError::Config)?;
        prov.set("defaults.report", source.clone());
    }
    if let Some(quiet) = defaults.quiet {
        config.quiet = quiet;
        prov.set("defaults.quiet", source.clone());
    }
    if let Some(fail) = defaults.fail_on_incompatible {
        config.fail_on_incompatible = fail;
        prov.set("defaults.fail_on_incompatible", source);
    }
    Ok(())
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn apply_env_vars(
    config: &mut ResolvedConfig,
    env: &dyn Fn(&str) -> Option<String>,
    prov: &mut ProvenanceMap,
) {
    if let Some(val) = env("SPECDIFF_FORMAT") {
        match val.parse() {
            Ok(format) => {
                config.format = format;
                prov.set("defaults.format", Source::EnvVar("SPECDIFF_FORMAT"));
            }
            Err(e) => tracing::warn!("Ignoring SPECDIFF_FORMAT: {e}"),
        }
    }
    if let Some(val) = env("SPECDIFF_REPORT") {
        match val.parse() {
            Ok(report) => {
                config.report = report;
                prov.set("defaults.report", Source::EnvVar("SPECDIFF_REPORT"));
            }
            Err(e) => tracing::warn!("Ignoring SPECDIFF_REPORT: {e}"),
        }
    }
    if let Some(val) = env("SPECDIFF_QUIET") {
        config.quiet = env_flag(&val);
        prov.set("defaults.quiet", Source::EnvVar("SPECDIFF_QUIET"));
    }
    if let Some(val) = env("SPECDIFF_FAIL_ON_INCOMPATIBLE") {
        config.fail_on_incompatible = env_flag(&val);
        prov.set(
            "defaults.fail_on_incompatible",
            Source::EnvVar("SPECDIFF_FAIL_ON_INCOMPATIBLE"),
        );
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("defaults.format", Source::CliFlag("--format"));
    }
    if let Some(report) = cli.report {
        config.report = report;
        prov.set("defaults.report", Source::CliFlag("--report"));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("defaults.quiet", Source::CliFlag("--quiet"));
    }
    if cli.no_fail {
        config.fail_on_incompatible = false;
        prov.set("defaults.fail_on_incompatible", Source::CliFlag("--no-fail"));
    }
}
