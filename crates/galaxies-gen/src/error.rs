//! Error types for the `galaxies-gen` crate.
//!
//! Every generation error is fatal only to the call that produced it; the
//! generator holds no state that a failure could leave half-updated.

/// Errors that can occur while composing stats or generating entities.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenError {
    /// An archetype tag ordinal does not name any value of its dimension.
    #[error("{dimension} tag {value} is out of range")]
    Configuration {
        /// Which archetype dimension was being decoded.
        dimension: &'static str,
        /// The rejected ordinal.
        value: i64,
    },

    /// A modifier table applied an operation the target field cannot take.
    #[error("cannot apply {op} to {field}")]
    IncompatibleEdit {
        /// Debug name of the field.
        field: String,
        /// Name of the operation.
        op: &'static str,
    },

    /// The universe bounding box or spacing is unusable.
    #[error("invalid universe bounds: {reason}")]
    InvalidBounds {
        /// What is wrong with the bounds.
        reason: String,
    },
}
