//! Minimal in-memory CRUD HTTP service over generic item records.
//!
//! Items live in an ordered, process-lifetime collection; the REST layer
//! exposes list/get/create/update/delete plus a plain-text health check.

pub mod error;
pub mod model;
pub mod rest;
pub mod store;
