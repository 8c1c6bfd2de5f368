//! Learning-platform backend: homework lifecycle, dashboards, leaderboard,
//! contests and practice challenges over Postgres, with bearer-token
//! identity resolved against an external provider.

pub mod analytics;
pub mod api;
pub mod assignments;
pub mod auth;
pub mod config;
pub mod contests;
pub mod db;
pub mod error;
pub mod gamification;
pub mod judge;
pub mod models;
pub mod practice;
pub mod state;
pub mod store;
pub mod views;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
