use primitive_types::U256;
use thiserror::Error;

/// Errors that abort a rich list run. None of these are retried: the first
/// failure surfaces to the operator and nothing is written.
#[derive(Debug, Error)]
pub enum RichListError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("selected node is not healthy")]
    UnhealthyNode,

    #[error("no foundry output found for token {token_id}")]
    TokenNotFound { token_id: String },

    #[error("malformed token metadata: {reason}")]
    MalformedMetadata { reason: String },

    #[error("cannot decode owning address: {detail}")]
    UnsupportedAddress { detail: String },

    #[error("invalid numeric string {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("accumulated balance for {address} overflows 256 bits")]
    BalanceOverflow { address: String },

    #[error("aggregated supply {actual} does not match the declared maximum supply {expected}")]
    SupplyMismatch { expected: U256, actual: U256 },

    #[error("bech32 encoding failed: {0}")]
    Bech32(#[from] bech32::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RichListError>;
