//! Shared domain types for CoachBot.
//!
//! This crate contains the core domain types used across the CoachBot workspace:
//! athlete Profile, coaching Feature, LLM request/response shapes, history
//! entries, global configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod feature;
pub mod history;
pub mod llm;
pub mod profile;
