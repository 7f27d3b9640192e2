//! Unit tests for configuration loading and settings resolution.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, event path, and API URL resolution tests
//! - `settings_resolution`: Parsing of lists, toggles, strategies, and messages

mod helpers;
mod precedence;
mod settings_resolution;
