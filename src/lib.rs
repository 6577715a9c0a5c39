pub mod category;
pub mod config;
pub mod confidence;
pub mod dataset;
pub mod error;
pub mod features;
pub mod fetch;
pub mod lookup;
pub mod model;
pub mod output;
pub mod predict;
pub mod stats;
