use thiserror::Error;

/// Failure modes of the evaluator's setup path. `hash` itself cannot fail:
/// once setup succeeds, every arithmetic step is total (see module docs).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EthashError {
    /// The seed's byte length is not a multiple of 4, so it cannot be
    /// packed into little-endian 32-bit words.
    #[error("seed length {len} is not a multiple of 4 bytes")]
    InvalidSeed { len: usize },

    /// `params` fails one of the structural constraints required for the
    /// rest of the pipeline to be well-defined (see `Params::validate`).
    #[error("invalid params: {reason}")]
    InvalidParams { reason: String },
}
