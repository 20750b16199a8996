//! Users module: the user-record access layer.
//!
//! Laid out as `domain` (model, validation policy and the storage port),
//! `infra` (storage implementations) and `api` (the REST surface).

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
