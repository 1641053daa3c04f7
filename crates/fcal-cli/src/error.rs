use fcalgeo::core::description::DescriptionError;
use fcalgeo::core::io::channel_map::ChannelMapError;
use fcalgeo::engine::error::BuildError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Description(#[from] DescriptionError),

    #[error(transparent)]
    ChannelMap(#[from] ChannelMapError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
