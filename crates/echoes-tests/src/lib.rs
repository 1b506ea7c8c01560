//! Emotional Echoes End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the flows users depend on:
//!
//! - Compose: mood -> art -> soundscape -> saved composition on disk
//! - Golden hashes: WAV encoding stays byte-identical across releases
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p echoes-tests
//!
//! # Rewrite golden hash files after an intentional format change
//! ECHOES_UPDATE_GOLDEN_HASHES=1 cargo test -p echoes-tests --test golden_hash_verification
//! ```

pub mod fixtures;
