use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.iter() {
        writeln!(w, "  {}: {} <- {}", key, value_for_key(config, key), source)?;
    }

    Ok(())
}

fn value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "defaults.format" => config.format.to_string(),
        "defaults.report" => config.report.to_string(),
        "defaults.quiet" => config.quiet.to_string(),
        "defaults.fail_on_incompatible" => config.fail_on_incompatible.to_string(),
        _ => "(unknown)".to_string(),
    }
}
