//! Error types for the marketplace client.
//!
//! - [`ConfigError`] - configuration loading errors
//! - [`ApiError`] - HTTP request/response errors
//! - [`ChainError`] - wallet and chain-query errors
//! - [`UploadError`] - module upload flow errors
//!
//! Error conversion is automatic via `From` implementations, allowing `?`
//! to work across error boundaries. No error carries an HTTP status code;
//! callers only ever see a best-effort message.

use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is not set.
    #[error("Missing {0} environment variable")]
    MissingVar(&'static str),
}

// =============================================================================
// API Errors
// =============================================================================

/// Errors from the HTTP request client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the connection failed.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status. The message is the
    /// server's `message` field when the error body is JSON, the raw body
    /// text otherwise, or a generic fallback when the body is empty.
    #[error("{message}")]
    Server { message: String },

    /// Request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(String),

    /// Response body could not be parsed.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Response payload kind did not match the operation (e.g. JSON where
    /// an audio stream was expected).
    #[error("Unexpected response payload: {0}")]
    UnexpectedPayload(&'static str),
}

// =============================================================================
// Chain Errors
// =============================================================================

/// Errors from the wallet/chain collaborator.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Wallet rejected or could not sign the transaction.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Transaction was submitted but failed to execute.
    #[error("Transaction failed: {0}")]
    Execution(String),

    /// Chain read query failed.
    #[error("Chain query failed: {0}")]
    Query(String),
}

// =============================================================================
// Upload Flow Errors
// =============================================================================

/// Errors from the module upload flow.
///
/// Every variant is terminal for the current submission attempt and leaves
/// the flow in an editable, retryable state.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Content field is not valid JSON after cleaning. Raised before any
    /// network or chain effect.
    #[error("Invalid JSON format. Please check your JSON syntax.")]
    InvalidJson,

    /// No connected account address was provided.
    #[error("No connected account")]
    NoAccount,

    /// The publish transaction was rejected or failed on-chain.
    #[error("Failed to create module: {0}")]
    Chain(#[from] ChainError),

    /// The transaction succeeded but reported no created module object.
    #[error("Failed to get created module data")]
    ModuleNotCreated,

    /// The chain publish succeeded but the marketplace registration
    /// failed, leaving an unregistered on-chain object.
    #[error("Module registration failed: {0}")]
    Registration(#[from] ApiError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Result type for upload flow operations.
pub type UploadResult<T> = Result<T, UploadError>;
