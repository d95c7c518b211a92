//! Error types for color parsing and picker configuration.
//!
//! Interaction paths (touch tracking, sampling) never produce these; they
//! report "nothing happened" through `Option`/`bool` instead.

/// A hex color string that could not be parsed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("expected 6 hex digits, found {0}")]
    InvalidLength(usize),
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

/// A rejected picker configuration value.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("border width must be finite and non-negative, got {0}")]
    BorderWidth(f64),
    #[error("handle size must be positive, got {width}x{height}")]
    HandleSize { width: f64, height: f64 },
    #[error("handle hitbox extension must be finite and non-negative, got {0}")]
    HitboxExtension(f64),
    #[error("temperature ring thickness must be positive, got {0}")]
    RingThickness(f64),
}
