//! Configuration management commands.

use std::path::Path;

use crate::cli::icons::{dim_arrow, success};
use crate::config::Config;

/// Print the effective configuration.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    match &config.source_path {
        Some(path) => eprintln!("{} Loaded from {}", dim_arrow(), path.display()),
        None => eprintln!("{} No config file found, showing defaults", dim_arrow()),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the built-in defaults to `path`.
pub async fn cmd_config_init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, Config::default().to_toml()?).await?;
    eprintln!("{} Wrote default config to {}", success(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_writes_loadable_defaults_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("refugee-digest.toml");

        cmd_config_init(&path, false).await.unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.sites, Config::default().sites);
        assert_eq!(loaded.source_path.as_deref(), Some(path.as_path()));

        assert!(cmd_config_init(&path, false).await.is_err());
        cmd_config_init(&path, true).await.unwrap();
    }
}
