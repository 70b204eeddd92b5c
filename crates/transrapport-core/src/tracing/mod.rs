//! Structured logging for TransRapport.
//! `tracing` with an `EnvFilter` read from `TRANSRAPPORT_LOG`.

pub mod setup;

pub use setup::init_tracing;
