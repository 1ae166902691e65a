//! Marketplace Client
//!
//! A client library for publishing and listing agent modules on a
//! blockchain-backed marketplace. Modules (character, knowledge, speech or
//! memory fragments) live in two places: on-chain for ownership and
//! identity, and on the marketplace server for content and metadata.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      UploadFlow                          │
//! │  validate content → publish on-chain → register module   │
//! ├───────────────────────────┬──────────────────────────────┤
//! │        ApiClient          │          Wallet              │
//! │  agent server (chat, TTS) │  sign & execute transactions │
//! │  marketplace (modules)    │  query owned objects         │
//! └───────────────────────────┴──────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoint and on-chain package configuration
//! - [`types`] - Module data types shared across the client
//! - [`error`] - Error hierarchy for API, chain and upload failures
//! - [`services`] - HTTP client, wallet seam, upload flow, owned-modules query
//!
//! Signing and transaction execution are delegated to a [`services::Wallet`]
//! implementation; this crate never touches key material.

pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{ApiError, ChainError, ConfigError, UploadError};
pub use error::{ApiResult, ChainResult, UploadResult};
pub use services::{ApiClient, FileAttachment, UploadFlow, UploadPhase, Wallet};
pub use services::{owned_modules, MoveCall, ObjectChange, OwnedObject, TransactionResult};
pub use types::{CreatedModuleRecord, ModuleType, ModuleUploadData, OwnedModuleInstance};
