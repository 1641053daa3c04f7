use crate::cli::ChannelsArgs;
use crate::error::Result;
use fcalgeo::core::description::DetectorDescription;
use fcalgeo::core::io::channel_map::{collect_channels, write_channel_map};
use fcalgeo::engine::progress::ProgressReporter;
use fcalgeo::workflows;
use std::fs::File;
use std::io::{self, Write};
use tracing::info;

pub fn run(args: ChannelsArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading detector description");
    let description = DetectorDescription::load(&args.config)?;
    let built = workflows::run(&description, &ProgressReporter::default())?;
    let channels = collect_channels(&built.tree, built.world);

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            write_channel_map(file, &channels)?;
            info!(channels = channels.len(), path = %path.display(), "Wrote channel map");
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_channel_map(&mut lock, &channels)?;
            lock.flush()?;
        }
    }

    Ok(())
}
