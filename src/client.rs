//! Chat completion client.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod config;
pub mod core;
mod response;
pub mod stats;
mod validation;

pub use builder::ChatClientBuilder;
pub use config::{ClientConfig, LocalRuntime};
pub use core::ChatClient;
pub use stats::CallStats;
