//! Browse precomputed paper-acceptance predictions: parse a model's
//! prediction table, summarise it, look up submissions by id.

pub mod config;
pub mod data;
pub mod state;
