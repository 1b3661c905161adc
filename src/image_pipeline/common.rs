//! Common utilities module
//!
//! This module contains shared utilities used across the image pipeline.

pub mod error;
pub mod messages;

pub use error::{ConversionError, Result};
pub use messages::{Language, Message};
