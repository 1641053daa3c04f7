use crate::cli::BuildArgs;
use crate::error::Result;
use crate::utils::progress::terminal_reporter;
use fcalgeo::core::description::DetectorDescription;
use fcalgeo::core::io::channel_map::{collect_channels, write_channel_map};
use fcalgeo::engine::progress::ProgressReporter;
use fcalgeo::workflows;
use std::fs::File;
use tracing::info;

pub fn run(args: BuildArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading detector description");
    let description = DetectorDescription::load(&args.config)?;

    let reporter = if args.no_progress {
        ProgressReporter::default()
    } else {
        terminal_reporter()
    };
    let built = workflows::run(&description, &reporter)?;

    println!(
        "Built '{}' (id {}): {} modules, {} volumes, {} placements, {} sensitive volumes.",
        built.name,
        built.id,
        built.modules_placed,
        built.tree.volume_count(),
        built.tree.placement_count(),
        built.sensitive.registered(),
    );

    if let Some(path) = &args.channel_map {
        let channels = collect_channels(&built.tree, built.world);
        let file = File::create(path)?;
        write_channel_map(file, &channels)?;
        println!("Wrote {} channels to '{}'.", channels.len(), path.display());
    }

    Ok(())
}
