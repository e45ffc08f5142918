//! HTTP transport implementations for promptlift.
//!
//! All transports implement the `promptlift_core::Transport` trait.
//! `HttpTransport` dispatches on the descriptor's wire format to the
//! chat-style or generate-style request builder.

pub mod chat;
pub mod generate;
pub mod http;

pub use http::HttpTransport;
