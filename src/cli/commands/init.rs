//! Init command - create project-local .cachedisk.toml

use crate::cli::args::InitArgs;
use crate::config::LOCAL_CONFIG_FILE;
use crate::error::{CacheDiskError, CacheDiskResult};
use crate::ui::{self, UiContext};
use std::path::Path;
use tokio::fs;

/// Template for project-local config
const INIT_TEMPLATE: &str = r#"# cachedisk project configuration
# Settings here override your global config (~/.config/cachedisk/config.toml)

[cache]
# volumes = ["FastSSD", "SlowRAID"]  # volume names in preference order
# dir = "_caches/nuke"               # relative path created on the volume

# [export]
# vars = ["NUKE_TEMP_DIR", "NUKE_DISK_CACHE"]
"#;

/// Execute the init command
pub async fn execute(args: InitArgs) -> CacheDiskResult<()> {
    let ctx = UiContext::detect();

    let target_dir = match args.path {
        Some(ref p) => p.clone(),
        None => std::env::current_dir()
            .map_err(|e| CacheDiskError::io("getting current directory", e))?,
    };

    let config_path = target_dir.join(LOCAL_CONFIG_FILE);

    if config_path.exists() && !args.force {
        return Err(CacheDiskError::User(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        )));
    }

    ensure_dir(&target_dir).await?;

    fs::write(&config_path, INIT_TEMPLATE)
        .await
        .map_err(|e| CacheDiskError::io(format!("writing {}", config_path.display()), e))?;

    ui::step_ok_detail(
        &ctx,
        "Created project config",
        &config_path.display().to_string(),
    );
    ui::remark(&ctx, "List your preferred volumes under [cache]");

    Ok(())
}

async fn ensure_dir(dir: &Path) -> CacheDiskResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| CacheDiskError::io(format!("creating directory {}", dir.display()), e))?;
    }
    Ok(())
}
