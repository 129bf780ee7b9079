//! Error handling for the partnership-network simulation core.

use thiserror::Error;

/// Specialized error type for simulation-core operations
#[derive(Debug, Error)]
pub enum PartnetError {
    /// A target mean duration below one time unit was supplied
    #[error(
        "invalid target duration {value} for stratum {stratum}: durations must be >= 1 time unit"
    )]
    InvalidDuration {
        /// Zero-based stratum index within the dissolution spec
        stratum: usize,
        /// The offending duration value
        value: f64,
    },

    /// The number of target durations does not match the number of strata
    #[error("dissolution spec implies {expected} strata but {found} target durations were given")]
    ArityMismatch {
        /// Stratum count implied by the stratifying term
        expected: usize,
        /// Number of durations actually supplied
        found: usize,
    },

    /// The departure rate is not a finite scalar in `[0, 1)`
    #[error("invalid departure rate {value}: must be a finite scalar in [0, 1)")]
    InvalidRate {
        /// The offending rate value
        value: f64,
    },

    /// The dissolution spec's baseline term is not the unconditional edges term
    #[error("malformed dissolution spec: {0}")]
    MalformedSpec(String),

    /// A stratifying term kind outside the supported set was requested
    #[error("unsupported dissolution term `{0}`: expected one of match, mix, factor")]
    UnsupportedTerm(String),

    /// The departure rate is too high for the requested duration
    #[error(
        "departure rate {rate} is infeasible for stratum {stratum} (target duration {duration}): \
         maximum tolerable rate is {max_rate:.4}"
    )]
    Infeasible {
        /// Zero-based stratum index that failed the feasibility check
        stratum: usize,
        /// Target duration of the failing stratum
        duration: f64,
        /// The requested departure rate
        rate: f64,
        /// Largest departure rate compatible with the target duration
        max_rate: f64,
    },

    /// An entrant rule named a distribution with empty or missing support
    #[error("no distribution available for attribute `{attribute}`")]
    DistributionUnavailable {
        /// Attribute whose distribution could not be resolved
        attribute: String,
    },

    /// The member count for a degree query could not be determined
    #[error("network size could not be determined for degree counting")]
    MissingSize,

    /// A tracked attribute was registered under a reserved schema name
    #[error("`{0}` is a reserved attribute name and cannot be registered")]
    ReservedAttribute(String),

    /// An attribute column's length violates the active-member invariant
    #[error("attribute `{attribute}` has {found} values but {expected} were expected")]
    ColumnLengthMismatch {
        /// Attribute whose column is mis-sized
        attribute: String,
        /// Expected length (current active-member count)
        expected: usize,
        /// Actual column length
        found: usize,
    },

    /// A value of the wrong kind was assigned to a typed attribute column
    #[error("value type mismatch for attribute `{0}`: label and numeric-coded values cannot mix")]
    ValueTypeMismatch(String),

    /// An operation referenced an attribute absent from the table or network
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),
}

/// Result type for simulation-core operations
pub type Result<T> = std::result::Result<T, PartnetError>;
