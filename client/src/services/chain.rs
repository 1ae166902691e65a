//! Wallet seam for on-chain interaction.
//!
//! Signing and transaction execution are owned by an external wallet; this
//! module only defines the boundary. The [`Wallet`] trait exposes the two
//! chain operations the client needs: executing a prepared move call and
//! listing owned objects of a struct type. Implementations resolve the
//! call as an awaitable future, so callers can sequence work strictly
//! after confirmed chain success.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChainResult;

// =============================================================================
// Transaction Types
// =============================================================================

/// A prepared move call, ready for signing and execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    /// Fully qualified call target, `package::module::function`.
    pub target: String,
    /// Gas budget in chain units.
    pub gas_budget: u64,
    /// Positional string arguments, in call order.
    pub arguments: Vec<String>,
}

/// Kind of object change reported in transaction effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Mutated,
    Deleted,
    #[serde(other)]
    Other,
}

/// A single object change reported by an executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    /// Change kind (`created`, `mutated`, ...).
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    /// Fully qualified struct type of the affected object.
    pub object_type: String,
    /// Object identifier.
    pub object_id: String,
}

/// Result of a signed and executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    /// Transaction digest.
    pub digest: String,
    /// Object changes reported by the transaction effects.
    #[serde(default)]
    pub object_changes: Vec<ObjectChange>,
}

// =============================================================================
// Owned Object Types
// =============================================================================

/// Inlined content of an owned object.
///
/// Only objects with `data_type == "moveObject"` carry structured fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    /// Content kind reported by the chain (`moveObject`, `package`, ...).
    pub data_type: String,
    /// Raw struct fields as JSON.
    pub fields: Value,
}

impl ObjectContent {
    /// Structured fields, present only for move objects.
    pub fn move_fields(&self) -> Option<&Value> {
        (self.data_type == "moveObject").then_some(&self.fields)
    }
}

/// An object owned by an account, with content inlined when requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedObject {
    /// Object identifier.
    pub object_id: String,
    /// Inlined content, absent for objects without readable content.
    pub content: Option<ObjectContent>,
}

// =============================================================================
// Wallet Trait
// =============================================================================

/// External wallet/chain collaborator.
///
/// Implementations own key material, signing and RPC transport. All
/// methods issue exactly one chain interaction; the client performs no
/// retries on top.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Sign and execute a move call, resolving once the chain reports the
    /// transaction outcome.
    async fn sign_and_execute(&self, call: MoveCall) -> ChainResult<TransactionResult>;

    /// List objects of `struct_type` owned by `owner`, with content inlined.
    async fn owned_objects(&self, owner: &str, struct_type: &str)
        -> ChainResult<Vec<OwnedObject>>;
}

// =============================================================================
// Mock Wallet (test support)
// =============================================================================
