//! Mental health care survey dashboard.
//!
//! Loads a survey CSV, cleans it into [`data::model::CleanedRecord`]s and
//! draws two linked charts filtered by group, time period, and indicator.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
