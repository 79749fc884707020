//! Core types, registries, and configuration for the treasury ledger pipeline.
//!
//! This crate provides shared building blocks used across all other crates:
//! - Canonical transfer and ledger record types
//! - Reference registries (wallet entities, hash overrides, asset prices)
//! - The fiscal quarter calendar
//! - Common error and configuration types

pub mod config;
pub mod error;
pub mod quarter;
pub mod registry;
pub mod types;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use quarter::{quarter_end, quarter_label, standard_quarter_end};
pub use registry::{
    HashOverrideEntry, HashOverrides, PriceEntry, PricePoint, PriceTable, WalletEntity,
    WalletRegistry,
};
pub use types::*;
