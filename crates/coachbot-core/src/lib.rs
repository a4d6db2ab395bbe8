//! Business logic for CoachBot.
//!
//! Holds the template engine, the LLM provider port, per-session history and
//! settings, and the interaction controller that ties them together. Depends
//! only on `coachbot-types` -- never on `coachbot-infra` or any HTTP crate.

pub mod controller;
pub mod history;
pub mod llm;
pub mod session;
pub mod template;
