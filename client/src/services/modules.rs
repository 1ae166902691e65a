//! Owned-modules projection.
//!
//! Reshapes the flat list of chain-owned module instances into a mapping
//! keyed by lower-cased module type, ready for display. This is a pure
//! fetch-and-reshape step; result caching is the caller's concern.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::Config;
use crate::error::ChainResult;
use crate::services::chain::Wallet;
use crate::types::OwnedModuleInstance;

/// Fetch the module instances owned by `address`, grouped by type.
///
/// Returns an empty mapping without touching the chain when no address is
/// connected. Objects without structured content, or with malformed
/// fields, are silently skipped.
pub async fn owned_modules(
    wallet: &dyn Wallet,
    config: &Config,
    address: Option<&str>,
) -> ChainResult<BTreeMap<String, Vec<OwnedModuleInstance>>> {
    let Some(address) = address.filter(|a| !a.is_empty()) else {
        return Ok(BTreeMap::new());
    };

    let objects = wallet
        .owned_objects(address, &config.instance_struct_type())
        .await?;

    let mut grouped: BTreeMap<String, Vec<OwnedModuleInstance>> = BTreeMap::new();
    for object in &objects {
        let Some(fields) = object
            .content
            .as_ref()
            .and_then(|content| content.move_fields())
        else {
            continue;
        };

        let Some(instance) = project_instance(fields) else {
            log::debug!("Skipping malformed module instance {}", object.object_id);
            continue;
        };

        grouped
            .entry(instance.module_type.clone())
            .or_default()
            .push(instance);
    }

    Ok(grouped)
}

/// Project one move object's fields into an [`OwnedModuleInstance`].
fn project_instance(fields: &Value) -> Option<OwnedModuleInstance> {
    let module_type = str_field(fields, "type")?.to_lowercase();

    Some(OwnedModuleInstance {
        on_chain_id: str_field(fields, "module_id")?,
        instance_id: fields
            .get("id")
            .and_then(|id| id.get("id"))
            .and_then(Value::as_str)?
            .to_string(),
        name: str_field(fields, "name")?,
        description: str_field(fields, "description")?,
        image_url: str_field(fields, "url")?,
        thumbnail_url: str_field(fields, "thumbnail_url")?,
        module_type,
    })
}

fn str_field(fields: &Value, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}
