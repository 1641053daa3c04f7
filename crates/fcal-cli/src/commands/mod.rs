pub mod build;
pub mod channels;
