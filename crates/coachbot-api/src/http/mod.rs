//! HTTP/REST API layer for CoachBot.
//!
//! Axum-based REST API at `/api/v1/` with an envelope response format, plus
//! the single-page form served at `/`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
