//! Error types for the simulation harness

use thiserror::Error;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that can occur while configuring or checking a simulation.
///
/// The neuron core itself has no error channel; everything here concerns the
/// harness around it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Malformed stimulus pattern
    #[error("Invalid stimulus pattern: {reason}")]
    InvalidStimulus {
        /// Reason the pattern was rejected
        reason: String,
    },

    /// Malformed serial parameter frame
    #[error("Invalid parameter frame {input:?}: {reason}")]
    InvalidFrame {
        /// Text that failed to parse
        input: String,
        /// Reason for rejection
        reason: String,
    },

    /// Recorded trace differs from the reference
    #[error("Trace mismatch at tick {tick}: {field} expected {expected}, got {actual}")]
    TraceMismatch {
        /// Tick of the first differing sample
        tick: u64,
        /// Name of the differing field
        field: &'static str,
        /// Reference value
        expected: i32,
        /// Recorded value
        actual: i32,
    },

    /// Recorded trace and reference have different lengths
    #[error("Trace length mismatch: expected {expected} samples, got {actual}")]
    TraceLengthMismatch {
        /// Reference length
        expected: usize,
        /// Recorded length
        actual: usize,
    },
}

impl RuntimeError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create an invalid stimulus error
    pub fn invalid_stimulus(reason: impl Into<String>) -> Self {
        Self::InvalidStimulus {
            reason: reason.into(),
        }
    }

    /// Create an invalid frame error
    pub fn invalid_frame(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFrame {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
