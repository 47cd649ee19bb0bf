//! Resolve command - pick the cache path

use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::Config;
use crate::error::CacheDiskResult;
use crate::resolver::{Resolution, Resolver};
use crate::ui::{self, UiContext};
use tracing::warn;

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> CacheDiskResult<()> {
    let preferred = if args.volumes.is_empty() {
        config.cache.volumes.clone()
    } else {
        args.volumes.clone()
    };
    let cache_dir = args.dir.as_deref().unwrap_or(&config.cache.dir);

    let resolver = Resolver::from_host()?;
    let resolution = resolver.resolve(&preferred, cache_dir)?;

    if args.export {
        print_export(&resolution, &config.export.vars);
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&resolution),
        OutputFormat::Json => print_json(&resolution)?,
        OutputFormat::Plain => println!("{}", resolution.path.display()),
    }

    Ok(())
}

fn print_table(resolution: &Resolution) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Cache path");

    for rejection in &resolution.rejections {
        ui::step_warn(
            &ctx,
            &format!("Volume '{}' skipped: {}", rejection.volume, rejection.reason),
        );
    }

    match resolution.source.volume_name() {
        Some(name) => ui::step_ok_detail(&ctx, "Volume selected", name),
        None => ui::step_info(&ctx, "No preferred volume was usable, using the home directory"),
    }
    ui::key_value(&ctx, "Path", &resolution.path.display().to_string());
    ui::key_value(&ctx, "Source", resolution.source.as_label());

    if resolution.is_fallback() {
        ui::outro_warn(&ctx, &resolution.path.display().to_string());
    } else {
        ui::outro_success(&ctx, &resolution.path.display().to_string());
    }
}

fn print_json(resolution: &Resolution) -> CacheDiskResult<()> {
    let rejections: Vec<serde_json::Value> = resolution
        .rejections
        .iter()
        .map(|r| {
            serde_json::json!({
                "volume": r.volume,
                "reason": r.reason.as_label(),
                "detail": r.reason.to_string(),
            })
        })
        .collect();

    let doc = serde_json::json!({
        "path": resolution.path,
        "source": resolution.source.as_label(),
        "volume": resolution.source.volume_name(),
        "rejections": rejections,
    });

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Print `export VAR='path'` lines for `eval` in shell startup files
fn print_export(resolution: &Resolution, vars: &[String]) {
    if vars.is_empty() {
        warn!("No export variables configured. Set [export] vars in the config.");
        return;
    }

    for var in vars {
        println!("export {}={}", var, shell_quote(&resolution.path.display().to_string()));
    }
}

/// Quote a value for a POSIX shell, single-quote style
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_quote_plain_path() {
        assert_eq!(shell_quote("/Volumes/FastSSD/_caches"), "'/Volumes/FastSSD/_caches'");
    }

    #[test]
    fn shell_quote_path_with_spaces() {
        assert_eq!(shell_quote("/Volumes/My Disk/c"), "'/Volumes/My Disk/c'");
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}
