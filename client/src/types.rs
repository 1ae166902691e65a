//! Common types used across the marketplace client.
//!
//! # Categories
//!
//! - **Module Types** - the four publishable module kinds
//! - **Upload Types** - form data collected before submission
//! - **Registration Types** - the record written to the marketplace server
//! - **Projection Types** - owned module instances read back from chain

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Module Types
// =============================================================================

/// Kind of content a module carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    /// Character definition
    #[default]
    Character,
    /// Knowledge base fragment
    Knowledge,
    /// Speech/voice settings
    Speech,
    /// Conversation memory
    Memory,
}

impl ModuleType {
    /// Marketplace wire name, always lowercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Character => "character",
            ModuleType::Knowledge => "knowledge",
            ModuleType::Speech => "speech",
            ModuleType::Memory => "memory",
        }
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "character" => Ok(ModuleType::Character),
            "knowledge" => Ok(ModuleType::Knowledge),
            "speech" => Ok(ModuleType::Speech),
            "memory" => Ok(ModuleType::Memory),
            other => Err(format!("Unknown module type: {}", other)),
        }
    }
}

// =============================================================================
// Upload Types
// =============================================================================

/// Form fields collected for a module upload.
///
/// Created empty when a flow starts, mutated field by field, and discarded
/// after submission. `content` holds raw JSON text; it is validated on
/// every edit and again at submit time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleUploadData {
    /// Display name
    pub name: String,
    /// Module kind
    pub module_type: ModuleType,
    /// Free-form description
    pub description: String,
    /// Image URL, also used as the thumbnail
    pub image_url: String,
    /// Raw JSON content text
    pub content: String,
}

// =============================================================================
// Registration Types
// =============================================================================

/// Payload registered with the marketplace server after a successful
/// on-chain publish. This is the sole durable record written by the
/// upload flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedModuleRecord {
    /// On-chain object identifier of the published module
    pub module_id: String,
    /// Display name
    pub name: String,
    /// Module kind
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    /// Image URL
    pub image_url: String,
    /// Cleaned JSON content
    pub content: String,
    /// Wallet address of the creator
    pub creator_id: String,
    /// Free-form description
    pub description: String,
}

// =============================================================================
// Projection Types
// =============================================================================

/// An owned, chain-resident module instance, projected from a chain query.
///
/// Regenerated on every query refresh; never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedModuleInstance {
    /// Object id of the published module this instance references
    pub on_chain_id: String,
    /// Object id of the instance itself
    pub instance_id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Image URL
    pub image_url: String,
    /// Thumbnail URL
    pub thumbnail_url: String,
    /// Module type name, lower-cased
    pub module_type: String,
}
