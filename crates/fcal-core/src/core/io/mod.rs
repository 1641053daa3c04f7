//! Export of built geometry to tabular formats.

pub mod channel_map;
