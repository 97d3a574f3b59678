use thiserror::Error;

/// Failures raised while building a container.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContainerError {
    /// An input could not be turned into a non-empty numeric sequence.
    #[error("cannot coerce '{field}' into a numeric sequence: {reason}")]
    Coercion { field: String, reason: String },

    /// `x`, `y` and `yerr` do not share one length.
    #[error("x, y and yerr lengths differ: x has {x}, y has {y}, yerr has {yerr}")]
    LengthMismatch { x: usize, y: usize, yerr: usize },
}

impl ContainerError {
    pub(crate) fn coercion(field: &str, reason: impl Into<String>) -> Self {
        ContainerError::Coercion {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Attach a field name to a coercion error raised before the field was known.
    pub(crate) fn for_field(self, field: &str) -> Self {
        match self {
            ContainerError::Coercion { reason, .. } => ContainerError::coercion(field, reason),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ContainerError::coercion("y", "not a number");
        assert_eq!(
            err.to_string(),
            "cannot coerce 'y' into a numeric sequence: not a number"
        );

        let err = ContainerError::LengthMismatch { x: 3, y: 2, yerr: 3 };
        assert_eq!(
            err.to_string(),
            "x, y and yerr lengths differ: x has 3, y has 2, yerr has 3"
        );
    }

    #[test]
    fn test_for_field_renames_coercion_only() {
        let err = ContainerError::coercion("value", "empty sequence").for_field("yerr");
        assert_eq!(err, ContainerError::coercion("yerr", "empty sequence"));

        let mismatch = ContainerError::LengthMismatch { x: 1, y: 2, yerr: 3 };
        assert_eq!(mismatch.clone().for_field("x"), mismatch);
    }
}
