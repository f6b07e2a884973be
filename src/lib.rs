//! # Store Monitoring Rust Backend
//!
//! Uptime/downtime reporting engine for a fleet of physical stores.
//!
//! This crate ingests periodic point-in-time status polls ("active" /
//! "inactive") per store, localizes them into each store's timezone, and
//! interpolates them into estimated uptime and downtime over three trailing
//! windows (last hour, last day, last week), restricted to the store's
//! declared business hours. Reports are exposed through an Axum REST API
//! with asynchronous report jobs and CSV export.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Identifier newtypes and the report row DTO
//! - [`models`]: Domain rows and observation timestamp handling
//! - [`report`]: The interpolation engine (timezone resolution, business
//!   hours, segment interpolation, window aggregation)
//! - [`db`]: Repository pattern over the observation data set
//! - [`services`]: Report job tracking, background execution, CSV export
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Report semantics
//!
//! Each run captures a single `now` reference and then processes stores
//! independently: resolve timezone, fetch the store's observation slice,
//! attribute the time between consecutive polls to the earlier poll's
//! status (gated by business hours), and bucket the result into the
//! trailing windows. A run either yields a row for every discovered store
//! or fails as a whole.

pub mod api;

pub mod db;
pub mod models;

pub mod report;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
