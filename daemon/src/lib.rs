//! Library half of the curation daemon: configuration, the persisted world,
//! and call-log replay. The binary in `main.rs` is a thin clap front end.

pub mod config;
pub mod error;
pub mod world;

pub use config::DaemonConfig;
pub use error::DaemonError;
pub use world::{ContentView, ReplayReport, World};
