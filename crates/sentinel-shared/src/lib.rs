//! Shared view-state core for the Sentinel disaster-monitoring console.
//!
//! One in-memory data set (alerts, citizen reports, response teams, safety
//! guidelines) kept consistent with the views rendered from it. Front ends
//! feed operator intents to the dispatcher and re-render from the store.

pub mod action;
pub mod activity;
pub mod alert;
pub mod dashboard;
pub mod dispatcher;
pub mod error;
pub mod geo;
pub mod guideline;
pub mod lifecycle;
pub mod render;
pub mod report;
pub mod seed;
pub mod selection;
pub mod services;
pub mod store;
pub mod team;

pub use error::{Result, SentinelError};
pub use store::{Entity, EntityKind, EntityRef, EntityState, EntityStore};
