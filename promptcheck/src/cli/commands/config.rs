//! Settings command

use anyhow::{bail, Context, Result};
use promptcheck_core::settings::Settings;
use std::path::Path;
use tracing::info;

use crate::cli::app::ConfigArgs;

/// Execute the config command
pub fn execute(args: ConfigArgs, config: Option<&Path>) -> Result<()> {
    if args.init {
        let path = config.map(Path::to_path_buf).unwrap_or_else(Settings::default_config_path);
        return init(&path, args.force);
    }

    let settings = Settings::load_or_default(config).context("Failed to load settings")?;
    print!("{}", describe(&settings)?);
    Ok(())
}

/// Write the default settings file
fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("Settings file already exists: {} (use --force to overwrite)", path.display());
    }

    Settings::default()
        .save(path)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    info!("Wrote default settings to {}", path.display());
    println!("Settings written to: {}", path.display());
    Ok(())
}

/// Settings as TOML, followed by API key status
fn describe(settings: &Settings) -> Result<String> {
    let mut out = settings.to_toml()?;

    let status = |key: &Option<String>| if key.is_some() { "set" } else { "not set" };
    out.push_str("\n# API keys\n");
    out.push_str(&format!("# OPENAI_API_KEY: {}\n", status(&settings.api_keys.openai)));
    out.push_str(&format!("# ANTHROPIC_API_KEY: {}\n", status(&settings.api_keys.anthropic)));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init(&path, false).unwrap();
        assert!(Settings::from_file(&path).is_ok());
        assert!(init(&path, false).is_err());
        assert!(init(&path, true).is_ok());
    }

    #[test]
    fn test_describe_hides_keys() {
        let mut settings = Settings::default();
        settings.api_keys.openai = Some("sk-secret".to_string());

        let text = describe(&settings).unwrap();
        assert!(text.contains("constraint_compliance"));
        assert!(text.contains("# OPENAI_API_KEY: set"));
        assert!(text.contains("# ANTHROPIC_API_KEY: not set"));
        assert!(!text.contains("sk-secret"));
    }
}
