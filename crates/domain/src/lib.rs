//! # growbox-domain
//!
//! Pure domain model for the growbox controller.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps, time of day
//! - Define the **time window** of automatic mode and its half-open evaluation
//! - Define the **control state** record (state, mode, window) and its validation
//! - Define the **reconciler** deriving the effective ON/OFF command
//! - Define **sensor readings** and their invariants
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;
pub mod window;

pub mod control;
pub mod reconciler;
pub mod sensor;
