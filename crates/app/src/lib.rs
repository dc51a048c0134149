//! # growbox-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `ControlRepository` — get-or-create and wholesale upsert of the control record
//!   - `SensorReadingRepository` — append & latest for sensor readings
//!   - `Clock` — current instant and time of day
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ControlService` — read, replace and reconcile the control record
//!   - `SensorService` — ingest readings, fetch the latest one
//! - Provide the bounded **retry wrapper** applied to contended writes
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `growbox-domain` only (plus `tokio` for sync/time).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod ports;
pub mod retry;
pub mod services;
