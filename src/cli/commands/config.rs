//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, LOCAL_CONFIG_FILE};
use crate::error::{CacheDiskError, CacheDiskResult};
use crate::ui::{self, UiContext};
use tokio::fs;

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    manager: &ConfigManager,
    config: &Config,
) -> CacheDiskResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value, local }) => {
            if local {
                set_local_value(&key, &value).await?
            } else {
                set_value(manager, &key, &value).await?
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> CacheDiskResult<()> {
    let ctx = UiContext::detect();
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            &ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    ui::step_ok_detail(
        &ctx,
        "Configuration initialized",
        &path.display().to_string(),
    );

    Ok(())
}

async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> CacheDiskResult<()> {
    let ctx = UiContext::detect();
    // Edit the global file as it is on disk, not the merged view
    let mut config = manager.load().await?;

    // Parse dot-separated key path
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["cache", "volumes"] => config.cache.volumes = parse_list(value),
        ["cache", "dir"] => config.cache.dir = value.to_string(),
        ["export", "vars"] => config.export.vars = parse_list(value),
        _ => return Err(unknown_key_error(key)),
    }

    manager.save(&config).await?;
    ui::step_ok(&ctx, &format!("Set {} = {}", key, value));

    Ok(())
}

async fn set_local_value(key: &str, value: &str) -> CacheDiskResult<()> {
    let ctx = UiContext::detect();

    let cwd =
        std::env::current_dir().map_err(|e| CacheDiskError::io("getting current directory", e))?;
    let local_path = cwd.join(LOCAL_CONFIG_FILE);

    // Validate the key before touching the file
    validate_config_key(key)?;

    // Load existing local config or start with an empty TOML table
    let mut doc: toml::Value = if local_path.exists() {
        let content = fs::read_to_string(&local_path)
            .await
            .map_err(|e| CacheDiskError::io(format!("reading {}", local_path.display()), e))?;
        content
            .parse()
            .map_err(|e: toml::de::Error| CacheDiskError::ConfigInvalid {
                path: local_path.clone(),
                reason: e.to_string(),
            })?
    } else {
        toml::Value::Table(toml::map::Map::new())
    };

    // Set the key in the TOML tree
    set_toml_value(&mut doc, key, value)?;

    // Write back only the keys the user has explicitly set
    let content = toml::to_string_pretty(&doc)?;
    fs::write(&local_path, content)
        .await
        .map_err(|e| CacheDiskError::io(format!("writing {}", local_path.display()), e))?;

    ui::step_ok(
        &ctx,
        &format!("Set {} = {} in {}", key, value, local_path.display()),
    );

    Ok(())
}

/// Validate that a config key is one we recognise.
fn validate_config_key(key: &str) -> CacheDiskResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["cache", "volumes" | "dir"] | ["export", "vars"] => Ok(()),
        _ => Err(unknown_key_error(key)),
    }
}

fn unknown_key_error(key: &str) -> CacheDiskError {
    CacheDiskError::User(format!(
        "Unknown config key: {}. Valid keys: cache.volumes, cache.dir, export.vars",
        key
    ))
}

/// Set a dot-separated key in a TOML value tree, creating intermediate tables as needed.
fn set_toml_value(doc: &mut toml::Value, key: &str, value: &str) -> CacheDiskResult<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let mut current = doc;

    // Navigate/create intermediate tables
    for &part in &parts[..parts.len() - 1] {
        current = current
            .as_table_mut()
            .ok_or_else(|| CacheDiskError::User(format!("Expected table at key: {}", part)))?
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    let leaf = parts
        .last()
        .ok_or_else(|| CacheDiskError::User(format!("Empty config key: {}", key)))?;
    let table = current
        .as_table_mut()
        .ok_or_else(|| CacheDiskError::User(format!("Expected table for key: {}", key)))?;

    // Keys that store as arrays take comma-separated values
    let is_list_key = key.ends_with("volumes") || key.ends_with("vars");

    let toml_value = if is_list_key {
        let items: Vec<toml::Value> = parse_list(value)
            .into_iter()
            .map(toml::Value::String)
            .collect();
        toml::Value::Array(items)
    } else {
        toml::Value::String(value.to_string())
    };

    table.insert((*leaf).to_string(), toml_value);
    Ok(())
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_splits_and_trims() {
        assert_eq!(
            parse_list("FastSSD, SlowRAID ,"),
            vec!["FastSSD", "SlowRAID"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn validate_known_keys() {
        assert!(validate_config_key("cache.volumes").is_ok());
        assert!(validate_config_key("cache.dir").is_ok());
        assert!(validate_config_key("export.vars").is_ok());
        assert!(validate_config_key("cache.nope").is_err());
        assert!(validate_config_key("nope").is_err());
    }

    #[test]
    fn set_toml_value_creates_intermediate_tables() {
        let mut doc = toml::Value::Table(toml::map::Map::new());
        set_toml_value(&mut doc, "cache.dir", "_caches/nuke").unwrap();

        let dir = doc
            .get("cache")
            .and_then(|t| t.get("dir"))
            .and_then(|v| v.as_str());
        assert_eq!(dir, Some("_caches/nuke"));
    }

    #[test]
    fn set_toml_value_list_keys_become_arrays() {
        let mut doc = toml::Value::Table(toml::map::Map::new());
        set_toml_value(&mut doc, "cache.volumes", "FastSSD,SlowRAID").unwrap();

        let volumes = doc
            .get("cache")
            .and_then(|t| t.get("volumes"))
            .and_then(|v| v.as_array())
            .map(|a| a.len());
        assert_eq!(volumes, Some(2));
    }

    #[test]
    fn set_toml_value_preserves_other_keys() {
        let mut doc: toml::Value = "[cache]\ndir = \"_caches\"\n".parse().unwrap();
        set_toml_value(&mut doc, "cache.volumes", "FastSSD").unwrap();

        let dir = doc
            .get("cache")
            .and_then(|t| t.get("dir"))
            .and_then(|v| v.as_str());
        assert_eq!(dir, Some("_caches"));
    }
}
