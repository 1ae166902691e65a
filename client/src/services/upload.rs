//! Module upload flow.
//!
//! Drives a single module submission through its phases:
//!
//! ```text
//! Editing → Validating → Submitting(chain) → Registering(server) → Done
//! ```
//!
//! Failure at any phase returns the flow to `Editing`; the whole attempt
//! must be retried manually. The marketplace registration is issued only
//! after the wallet reports confirmed chain success, never concurrently
//! or speculatively.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::{Config, CREATED_MODULE_SUFFIX, PUBLISH_GAS_BUDGET};
use crate::error::{UploadError, UploadResult};
use crate::services::api::ApiClient;
use crate::services::chain::{ChangeKind, MoveCall, Wallet};
use crate::types::{CreatedModuleRecord, ModuleUploadData};

/// Newline followed by any leading whitespace, stripped before validation.
static NEWLINE_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*").expect("valid regex"));

/// Phase of an upload flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Free-form field editing.
    Editing,
    /// Submit-time content validation.
    Validating,
    /// Awaiting the wallet's transaction outcome.
    Submitting,
    /// Registering the created module with the marketplace.
    Registering,
    /// Module published and registered.
    Done,
}

/// Strip newline-plus-indentation runs from raw content text.
pub fn clean_content(raw: &str) -> String {
    NEWLINE_INDENT.replace_all(raw, "").into_owned()
}

/// Live, per-edit content check.
///
/// Returns an error string for non-empty content that is not valid JSON.
/// A failing check is advisory only: it neither blocks further editing nor
/// submission, which re-validates on its own.
pub fn check_content(content: &str) -> Option<String> {
    if content.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(content) {
        Ok(_) => None,
        Err(_) => Some("Invalid JSON format".to_string()),
    }
}

/// One module submission: form state plus the collaborators needed to
/// publish and register it.
pub struct UploadFlow<W> {
    config: Config,
    api: ApiClient,
    wallet: W,
    /// Form fields under edit.
    pub data: ModuleUploadData,
    content_error: Option<String>,
    phase: UploadPhase,
    uploading: bool,
}

impl<W: Wallet> UploadFlow<W> {
    /// Start a flow with empty form data.
    pub fn new(config: Config, api: ApiClient, wallet: W) -> Self {
        Self {
            config,
            api,
            wallet,
            data: ModuleUploadData::default(),
            content_error: None,
            phase: UploadPhase::Editing,
            uploading: false,
        }
    }

    /// Update the content field, running the live JSON check.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.content_error = check_content(&content);
        self.data.content = content;
    }

    /// Current live validation error for the content field, if any.
    pub fn content_error(&self) -> Option<&str> {
        self.content_error.as_deref()
    }

    /// Current flow phase.
    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    /// Whether a submission is in flight. True from submit entry through
    /// chain confirmation and registration, cleared on every exit path.
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Submit the module for the connected account.
    ///
    /// Validates the content, publishes on-chain through the wallet, and
    /// registers the created module with the marketplace. Returns the
    /// registered record. On any error the flow returns to `Editing` and
    /// can be resubmitted as-is.
    pub async fn submit(&mut self, account_address: &str) -> UploadResult<CreatedModuleRecord> {
        self.uploading = true;
        let result = self.run_submit(account_address).await;
        self.uploading = false;
        self.phase = if result.is_ok() {
            UploadPhase::Done
        } else {
            UploadPhase::Editing
        };
        result
    }

    async fn run_submit(&mut self, account_address: &str) -> UploadResult<CreatedModuleRecord> {
        if account_address.is_empty() {
            return Err(UploadError::NoAccount);
        }

        // Validating: clean, then require valid JSON before any side effect.
        self.phase = UploadPhase::Validating;
        let cleaned = clean_content(&self.data.content);
        serde_json::from_str::<Value>(&cleaned).map_err(|_| UploadError::InvalidJson)?;
        self.data.content = cleaned;

        log::info!(
            "📤 Publishing module '{}' ({}) on {}",
            self.data.name,
            self.data.module_type,
            self.config.network
        );

        // Submitting: one publish call, resolved by the wallet.
        self.phase = UploadPhase::Submitting;
        let call = MoveCall {
            target: self.config.publish_target(),
            gas_budget: PUBLISH_GAS_BUDGET,
            arguments: vec![
                self.data.name.clone(),
                self.data.module_type.to_string(),
                self.data.image_url.clone(),
                // Same URL doubles as the thumbnail.
                self.data.image_url.clone(),
                self.data.description.clone(),
                // Creator name argument carries the account address.
                account_address.to_string(),
            ],
        };
        let result = self.wallet.sign_and_execute(call).await?;

        let created = result
            .object_changes
            .iter()
            .find(|change| {
                change.kind == ChangeKind::Created
                    && change.object_type.ends_with(CREATED_MODULE_SUFFIX)
            })
            .ok_or(UploadError::ModuleNotCreated)?;

        log::info!(
            "✅ Module object {} created in tx {}",
            created.object_id,
            result.digest
        );

        // Registering: only after confirmed chain success.
        self.phase = UploadPhase::Registering;
        let record = CreatedModuleRecord {
            module_id: created.object_id.clone(),
            name: self.data.name.clone(),
            module_type: self.data.module_type,
            image_url: self.data.image_url.clone(),
            content: self.data.content.clone(),
            creator_id: account_address.to_string(),
            description: self.data.description.clone(),
        };
        self.api.create_module(&record).await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::services::chain::mock::MockWallet;
    use crate::services::chain::{ObjectChange, TransactionResult};
    use crate::types::ModuleType;

    fn flow_for(server: &MockServer, wallet: MockWallet) -> UploadFlow<MockWallet> {
        let config = Config::new("0xabc")
            .with_agent_server_url(server.base_url())
            .with_marketplace_url(server.base_url());
        let api = ApiClient::new(&config);
        let mut flow = UploadFlow::new(config, api, wallet);
        flow.data.name = "Pirate".into();
        flow.data.module_type = ModuleType::Character;
        flow.data.description = "arr".into();
        flow.data.image_url = "https://img".into();
        flow
    }

    fn created_module_tx() -> TransactionResult {
        TransactionResult {
            digest: "0xdigest".into(),
            object_changes: vec![
                ObjectChange {
                    kind: ChangeKind::Mutated,
                    object_type: "0x2::coin::Coin".into(),
                    object_id: "0xgas".into(),
                },
                ObjectChange {
                    kind: ChangeKind::Created,
                    object_type: "0xabc::Core::ComposableModule".into(),
                    object_id: "0xmod".into(),
                },
            ],
        }
    }

    #[test]
    fn test_clean_content_strips_newline_indentation() {
        let raw = "{\n    \"name\": \"Pirate\",\n    \"bio\": [\n        \"arr\"\n    ]\n}";
        let cleaned = clean_content(raw);
        assert_eq!(cleaned, "{\"name\": \"Pirate\",\"bio\": [\"arr\"]}");
        assert!(serde_json::from_str::<serde_json::Value>(&cleaned).is_ok());
    }

    #[test]
    fn test_check_content_is_advisory() {
        assert_eq!(check_content(""), None);
        assert_eq!(check_content("   \n  "), None);
        assert_eq!(check_content(r#"{"a": 1}"#), None);
        assert_eq!(
            check_content("{not json"),
            Some("Invalid JSON format".to_string())
        );
    }

    #[test]
    fn test_set_content_tracks_live_error() {
        let server = MockServer::start();
        let mut flow = flow_for(&server, MockWallet::new());

        flow.set_content("{broken");
        assert_eq!(flow.content_error(), Some("Invalid JSON format"));

        flow.set_content(r#"{"fixed": true}"#);
        assert_eq!(flow.content_error(), None);
    }

    #[tokio::test]
    async fn test_invalid_json_rejected_before_any_call() {
        let server = MockServer::start_async().await;
        let register = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/createModule");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let mut flow = flow_for(&server, MockWallet::succeeding(created_module_tx()));
        flow.set_content("{not json at all");

        let err = flow.submit("0xme").await.unwrap_err();
        assert!(matches!(err, UploadError::InvalidJson));
        assert_eq!(flow.wallet.execute_calls(), 0);
        assert_eq!(register.hits_async().await, 0);
        assert_eq!(flow.phase(), UploadPhase::Editing);
        assert!(!flow.is_uploading());
    }

    #[tokio::test]
    async fn test_successful_submit_registers_created_module() {
        let server = MockServer::start_async().await;
        let register = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/createModule").json_body(json!({
                    "moduleId": "0xmod",
                    "name": "Pirate",
                    "type": "character",
                    "imageUrl": "https://img",
                    "content": "{\"name\": \"Pirate\"}",
                    "creatorId": "0xme",
                    "description": "arr",
                }));
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let mut flow = flow_for(&server, MockWallet::succeeding(created_module_tx()));
        flow.set_content("{\n    \"name\": \"Pirate\"\n}");

        let record = flow.submit("0xme").await.unwrap();

        register.assert_async().await;
        assert_eq!(record.module_id, "0xmod");
        assert_eq!(record.creator_id, "0xme");
        // The cleaned text replaced the stored content.
        assert_eq!(flow.data.content, "{\"name\": \"Pirate\"}");
        assert_eq!(flow.phase(), UploadPhase::Done);
        assert!(!flow.is_uploading());
    }

    #[tokio::test]
    async fn test_publish_call_shape() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/createModule");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let mut flow = flow_for(&server, MockWallet::succeeding(created_module_tx()));
        flow.set_content("{}");
        flow.submit("0xme").await.unwrap();

        let call = flow.wallet.last_call().unwrap();
        assert_eq!(call.target, "0xabc::Core::publish_module");
        assert_eq!(call.gas_budget, 20_000_000);
        assert_eq!(
            call.arguments,
            vec!["Pirate", "character", "https://img", "https://img", "arr", "0xme"]
        );
    }

    #[tokio::test]
    async fn test_no_created_module_surfaces_error_without_registration() {
        let server = MockServer::start_async().await;
        let register = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/createModule");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let tx = TransactionResult {
            digest: "0xdigest".into(),
            object_changes: vec![ObjectChange {
                kind: ChangeKind::Created,
                object_type: "0xabc::Core::SomethingElse".into(),
                object_id: "0xother".into(),
            }],
        };
        let mut flow = flow_for(&server, MockWallet::succeeding(tx));
        flow.set_content("{}");

        let err = flow.submit("0xme").await.unwrap_err();
        assert!(matches!(err, UploadError::ModuleNotCreated));
        assert_eq!(register.hits_async().await, 0);
        assert_eq!(flow.phase(), UploadPhase::Editing);
    }

    #[tokio::test]
    async fn test_chain_failure_leaves_flow_retryable() {
        let server = MockServer::start_async().await;
        let register = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/createModule");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;

        let mut flow = flow_for(&server, MockWallet::failing("user rejected"));
        flow.set_content("{}");

        let err = flow.submit("0xme").await.unwrap_err();
        assert!(err.to_string().contains("user rejected"));
        assert_eq!(register.hits_async().await, 0);
        assert_eq!(flow.phase(), UploadPhase::Editing);
        assert!(!flow.is_uploading());
    }

    #[tokio::test]
    async fn test_registration_failure_after_chain_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/createModule");
                then.status(500).body(r#"{"message":"db down"}"#);
            })
            .await;

        let mut flow = flow_for(&server, MockWallet::succeeding(created_module_tx()));
        flow.set_content("{}");

        let err = flow.submit("0xme").await.unwrap_err();
        assert!(matches!(err, UploadError::Registration(_)));
        assert!(err.to_string().contains("db down"));
        // Chain publish did happen; no compensation is attempted.
        assert_eq!(flow.wallet.execute_calls(), 1);
        assert_eq!(flow.phase(), UploadPhase::Editing);
    }

    #[tokio::test]
    async fn test_missing_account_rejected_first() {
        let server = MockServer::start_async().await;
        let mut flow = flow_for(&server, MockWallet::succeeding(created_module_tx()));
        flow.set_content("{}");

        let err = flow.submit("").await.unwrap_err();
        assert!(matches!(err, UploadError::NoAccount));
        assert_eq!(flow.wallet.execute_calls(), 0);
    }
}
