use crate::enums::GwpAssessment;
use crate::units::UnitError;

/// Result type for calculation operations.
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculation error taxonomy. Front ends dispatch on the variant to render
/// remediation guidance, so kinds are never collapsed into one another.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Malformed or out-of-range activity record.
    Validation { message: String },
    /// Every documented resolution step was exhausted without a factor.
    NoMatchingFactor { searched: String },
    /// A required unit conversion failed (unknown unit or dimension mismatch).
    UnitConversion { message: String },
    /// The GWP table has no entry for the gas under the selected assessment.
    UnknownGas {
        gas: String,
        assessment: GwpAssessment,
    },
}

impl CalcError {
    pub fn validation(message: impl Into<String>) -> Self {
        CalcError::Validation {
            message: message.into(),
        }
    }

    pub fn no_matching_factor(searched: impl Into<String>) -> Self {
        CalcError::NoMatchingFactor {
            searched: searched.into(),
        }
    }

    pub fn unit_conversion(message: impl Into<String>) -> Self {
        CalcError::UnitConversion {
            message: message.into(),
        }
    }

    /// Stable kind tag for front ends and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "validation",
            CalcError::NoMatchingFactor { .. } => "no_matching_factor",
            CalcError::UnitConversion { .. } => "unit_conversion",
            CalcError::UnknownGas { .. } => "unknown_gas",
        }
    }

    /// Prefix the error with the position of the activity that produced it.
    /// Used by inventory computation, which aborts on the first failure.
    pub fn in_activity(self, index: usize) -> Self {
        let prefix = format!("activity {}: ", index);
        match self {
            CalcError::Validation { message } => CalcError::Validation {
                message: format!("{}{}", prefix, message),
            },
            CalcError::NoMatchingFactor { searched } => CalcError::NoMatchingFactor {
                searched: format!("{}{}", prefix, searched),
            },
            CalcError::UnitConversion { message } => CalcError::UnitConversion {
                message: format!("{}{}", prefix, message),
            },
            other @ CalcError::UnknownGas { .. } => other,
        }
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalcError::Validation { message } => {
                write!(f, "invalid activity record: {}", message)
            }
            CalcError::NoMatchingFactor { searched } => {
                write!(f, "no emission factor found: {}", searched)
            }
            CalcError::UnitConversion { message } => {
                write!(f, "unit conversion failed: {}", message)
            }
            CalcError::UnknownGas { gas, assessment } => {
                write!(f, "unknown gas '{}' for {}", gas, assessment.as_str())
            }
        }
    }
}

impl std::error::Error for CalcError {}

impl From<UnitError> for CalcError {
    fn from(err: UnitError) -> Self {
        CalcError::UnitConversion {
            message: err.to_string(),
        }
    }
}
