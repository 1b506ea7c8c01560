//! Emotional Echoes CLI library.
//!
//! This crate provides the canvas controller, the model adapters, and the
//! commands behind the `echoes` binary.

pub mod actions;
pub mod canvas;
pub mod commands;
pub mod config;
pub mod context;
pub mod flows;
pub mod logging;
pub mod model;
