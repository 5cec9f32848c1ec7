//! ambuild - Amplitude audio asset builder
//!
//! A library for compiling the JSON definitions of an Amplitude audio project
//! (buses, sound banks, events, ...) into the binaries the engine loads, by
//! driving the external `flatc` schema compiler.

pub mod cli;
pub mod config;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod mapping;
pub mod output;
pub mod watch;

pub use config::{BuildConfig, Environment, FailurePolicy};
pub use discovery::{conversion_units, discover, ConversionUnit, DiscoveryResult, Manifest};
pub use driver::{BuildReport, CleanReport, Driver, Outcome, Staleness};
pub use error::{AmError, BuildFailure, FailureKind, Result};
pub use mapping::{classify, map_output_path, AssetCategory};
