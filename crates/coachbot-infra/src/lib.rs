//! Infrastructure layer for CoachBot.
//!
//! Contains the concrete [`LlmProvider`](coachbot_core::llm::provider::LlmProvider)
//! implementation for Google Gemini, the `config.toml` loader, and data
//! directory resolution.

pub mod config;
pub mod filesystem;
pub mod llm;
