//! CARENET — clinic management backend.
//!
//! A JSON HTTP service over an embedded SQLite store, managing the
//! clinic's six record families: patients, doctors, appointments,
//! services, payments, and products.

pub mod allocator;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
