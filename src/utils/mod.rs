//! Utility functions for identifier encoding and request classification.
//!
//! This module provides helper functions used across the application:
//!
//! - [`short_id`] - Base-36 short identifier encoding and decoding
//! - [`traffic`] - Device, IP, language and referrer classification

pub mod short_id;
pub mod traffic;
