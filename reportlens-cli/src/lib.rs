// Document handling lives in reportlens-core.
// This crate adds the HTTP surface and the command line on top.

pub mod error;
pub mod server;

// Re-export core types for convenience
pub use reportlens_core::*;

pub use error::{ApiError, ErrorBody};
pub use server::{build_router, serve, shutdown_signal};
