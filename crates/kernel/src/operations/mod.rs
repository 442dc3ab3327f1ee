pub mod advanced_loft;
pub mod flat_pattern;
pub mod loft;

/// Structured error type for geometry construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationError {
    /// A length, height or factor is zero, negative or not finite.
    #[error("{parameter} must be positive and finite, got {value}")]
    InvalidDimension { parameter: &'static str, value: f64 },

    /// A factor fell below its lower bound.
    #[error("{parameter} must be at least {min}, got {value}")]
    BelowMinimum {
        parameter: &'static str,
        min: f64,
        value: f64,
    },

    /// The advanced loft needs a target unit to place duct endpoints.
    #[error("advanced loft requires a target unit with supply and return openings")]
    MissingTarget,

    /// Voids remove all of the deck's area.
    #[error("deck net area is {net_area}, openings consume the whole deck")]
    DegenerateLamina { net_area: f64 },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, mesh has {vertex_count} vertices")]
    InvalidIndex {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Fail unless `value` is finite and strictly positive.
pub(crate) fn require_positive(parameter: &'static str, value: f64) -> Result<f64, OperationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OperationError::InvalidDimension { parameter, value })
    }
}

/// Fail unless `value` is finite and not negative.
pub(crate) fn require_non_negative(parameter: &'static str, value: f64) -> Result<f64, OperationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(OperationError::InvalidDimension { parameter, value })
    }
}

/// Fail unless `value` is finite. Offsets may be negative.
pub(crate) fn require_finite(parameter: &'static str, value: f64) -> Result<f64, OperationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OperationError::InvalidDimension { parameter, value })
    }
}
