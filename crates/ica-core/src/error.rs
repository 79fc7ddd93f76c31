//! Error handling for the ICA artifact framework
//!
//! All detection errors are fatal to the single invocation: the pipeline
//! either returns one complete result or surfaces the first error.

use core::fmt;

/// Result type alias for framework operations
pub type IcaResult<T> = Result<T, IcaError>;

/// Error type for all framework operations
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IcaError {
    /// Missing or inconsistent required input fields
    MalformedInput {
        /// Description of the input problem
        reason: String,
    },

    /// Target sensor label absent from the layout
    SensorNotFound {
        /// Label that was searched for
        label: String,
    },

    /// Invalid detection configuration
    ConfigurationError {
        /// Description of the configuration error
        message: String,
    },

    /// Figure rendering or persistence failure
    RenderError {
        /// Description of the rendering failure
        reason: String,
    },
}

impl fmt::Display for IcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcaError::MalformedInput { reason } => {
                write!(f, "Malformed input: {}", reason)
            }
            IcaError::SensorNotFound { label } => {
                write!(f, "Sensor '{}' not found in layout", label)
            }
            IcaError::ConfigurationError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            IcaError::RenderError { reason } => {
                write!(f, "Render error: {}", reason)
            }
        }
    }
}

impl std::error::Error for IcaError {}
