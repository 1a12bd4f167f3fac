pub mod analysis;
pub mod config;
pub mod report;
pub mod scoring;
