//! Volumes command - list mounted volumes

use crate::cli::args::{OutputFormat, VolumesArgs};
use crate::config::Config;
use crate::error::CacheDiskResult;
use crate::platform::{create_provider, format_bytes, free_bytes, Locality, MountedVolume, Platform};
use crate::ui::{self, UiContext};
use console::style;
use tracing::debug;

struct VolumeRow {
    name: String,
    root: String,
    locality: Locality,
    free: Option<u64>,
}

/// Execute the volumes command
pub async fn execute(args: VolumesArgs, _config: &Config) -> CacheDiskResult<()> {
    debug!("Listing volumes on {}", Platform::detect().name());
    let provider = create_provider();
    let volumes = provider.volumes()?;

    let rows: Vec<VolumeRow> = volumes
        .iter()
        .map(|volume| VolumeRow {
            name: volume.name.clone(),
            root: volume.root.display().to_string(),
            locality: provider.locality(volume),
            free: free_space(volume),
        })
        .collect();

    if rows.is_empty() {
        match args.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {}
            OutputFormat::Table => {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "No volumes mounted");
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Plain => print_plain(&rows),
    }

    Ok(())
}

fn free_space(volume: &MountedVolume) -> Option<u64> {
    free_bytes(&volume.root)
}

fn print_table(rows: &[VolumeRow]) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Volumes");

    println!(
        "{:<20} {:<35} {:<10} {:>10}",
        style("NAME").bold(),
        style("ROOT").bold(),
        style("TYPE").bold(),
        style("FREE").bold()
    );
    println!("{}", "-".repeat(77));

    for row in rows {
        let locality_styled = match row.locality {
            Locality::Local => style("local").green(),
            Locality::Network => style("network").yellow(),
            Locality::Unknown => style("unknown").dim(),
        };
        let free = row
            .free
            .map(format_bytes)
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<20} {:<35} {:<10} {:>10}",
            row.name, row.root, locality_styled, free
        );
    }

    println!();
    println!("{} volume(s)", rows.len());
}

fn print_json(rows: &[VolumeRow]) -> CacheDiskResult<()> {
    let docs: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "name": row.name,
                "root": row.root,
                "locality": row.locality.as_label(),
                "free_bytes": row.free,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&docs)?);
    Ok(())
}

fn print_plain(rows: &[VolumeRow]) {
    for row in rows {
        println!("{}", row.name);
    }
}
