//! Motherboard scoring and recommendation for the eco vehicle build.
//!
//! [`catalog`] turns persisted equipment lists into typed records,
//! [`scoring`] ranks them, and [`recommendation`] shares one engine across
//! HTTP requests.

pub mod catalog;
pub mod config;
pub mod error;
pub mod recommendation;
pub mod scoring;
pub mod telemetry;
