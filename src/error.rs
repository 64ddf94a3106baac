use thiserror::Error;

/// Error kinds.
///    invalid_input: malformed puzzle record, unparseable move token, or
///       puzzle dimensions outside the supported set.
///    missing_resource: formula file cannot be opened.
///    invariant_violated: internal consistency check failed (e.g. facelet-
///       change map disagrees with move-based application). Fatal.
///    search_exhausted: beam search reached maximum cost without a
///       solution.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid move token: {0}")]
    InvalidMoveToken(String),
    #[error("invalid formula: {0}")]
    InvalidFormula(String),
    #[error("invalid puzzle dimensions: {0}")]
    InvalidDimensions(String),
    #[error("invalid facelet string")]
    InvalidFaceletString,
    #[error("formula file `{0}` could not be opened")]
    MissingResource(String),
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
    #[error("search exhausted at max cost {0} without a solution")]
    SearchExhausted(usize),
}
