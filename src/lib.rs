//! arq-rust: capa de aplicación sobre `arq-core`.
//!
//! - `config`: variables de entorno (`ARQ_LOG`, `ARQ_OUTPUT`) y `.env`.
//! - `logging`: subscriber `tracing` para los binarios.
//! - `errors`: `AppError`, envuelve errores del motor y de JSON.
//! - `samples`: acciones de muestra y `sample_registry()`.
//!
//! Puede usarse desde `main.rs` o desde el CLI (`crates/arq-cli`).

pub mod config;
pub mod errors;
pub mod logging;
pub mod samples;

pub use config::{AppConfig, OutputFormat};
pub use errors::AppError;
pub use samples::sample_registry;
