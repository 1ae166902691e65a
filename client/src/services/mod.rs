//! Backend and blockchain services.
//!
//! This module provides the client's external-facing services:
//!
//! # Services
//!
//! - [`api`] - HTTP request client for the agent and marketplace servers
//! - [`chain`] - Wallet seam for signing, executing and querying on-chain
//! - [`upload`] - Module upload flow (validate, publish, register)
//! - [`modules`] - Owned-modules projection from chain state

pub mod api;
pub mod chain;
pub mod modules;
pub mod upload;

pub use api::{ApiClient, FileAttachment};
pub use chain::{ChangeKind, MoveCall, ObjectChange, ObjectContent, OwnedObject};
pub use chain::{TransactionResult, Wallet};
pub use modules::owned_modules;
pub use upload::{check_content, clean_content, UploadFlow, UploadPhase};
