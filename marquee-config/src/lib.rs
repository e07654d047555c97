//! Shared configuration library for Marquee.
//!
//! Centralizes config defaults, loading (TOML file, environment, `.env`)
//! and validation so the core and any host shell agree on a single source
//! of truth. The responsive breakpoint table lives here too since it is
//! pure configuration.
#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, error::ConfigLoadError};
pub use models::breakpoints::{Breakpoint, BreakpointPolicy};
pub use models::{
    CacheConfig, Config, ConfigMetadata, TmdbConfig, UiConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
