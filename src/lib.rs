//! Headless core of FonoTrack, a patient-management front end for a
//! speech-therapy clinic.
//!
//! The crate owns everything below the view layer: wire-faithful
//! domain models, the REST gateway, the pure validation engine and
//! derived-field calculators, and the stateful controllers that drive
//! each page (dashboard, patients, evaluations, documents, search).
//! A view layer renders controller state and dispatches intents; it
//! never mutates state directly.
//!
//! The remote store is the sole arbiter of consistency: controllers
//! re-fetch after every mutation instead of patching in place, and the
//! client holds no conflict-resolution logic.

pub mod config;
pub mod controllers;
pub mod demo;
pub mod derived;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod validation;
