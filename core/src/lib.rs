pub mod catalog;
pub mod config;
pub mod dataset;
pub mod derived;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod rng;
pub mod types;
