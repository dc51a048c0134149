//! # growbox-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON API** used by the sensor node and the controller
//!   (`/api/sensor-data`, `/api/control`, `/api/control/effective`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into JSON responses with the
//!   matching status code
//!
//! ## Dependency rule
//! Depends on `growbox-app` (for port traits and services) and `growbox-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
