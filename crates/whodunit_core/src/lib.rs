//! Core data types for the Whodunit script generator.
//!
//! This crate provides the conversation and request types shared by the
//! generation drivers and the pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod request;
mod role;
mod sampling;

pub use message::Message;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse, TokenUsage};
pub use role::Role;
pub use sampling::SamplingParams;
