//! # promptlift core
//!
//! Domain types, traits, and error definitions for the promptlift
//! context-selection and prompt-enhancement pipeline.
//! This crate has **zero framework dependencies**; it defines the domain model
//! that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The network seam is defined as a trait here (`Transport`). Implementations
//! live in `promptlift-providers`; the pipeline in `promptlift-enhancer` only
//! ever sees the trait. This enables:
//! - Swapping wire formats via configuration
//! - Testing the pipeline with scripted transports
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod transport;

// Re-export key types at crate root for ergonomics
pub use error::{EnhanceError, TransportError};
pub use message::{Message, Role};
pub use provider::{ProviderDescriptor, WireFormat};
pub use transport::Transport;
