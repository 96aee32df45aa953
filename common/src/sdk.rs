//! Capability interface for the Dash Platform SDK.
//!
//! The real client lives in the browser (a JS bundle driven from the ui
//! crate); everything here is the typed seam the workflows depend on, so
//! they can be exercised natively with test doubles.

use crate::document::{PostDocument, PostPayload};

/// Data contract holding the "posts" schema instance.
/// Overridable at compile time via `EVOFEED_CONTRACT_ID`.
pub const POSTS_CONTRACT_ID: &str = match option_env!("EVOFEED_CONTRACT_ID") {
    Some(id) => id,
    None => "DguLeagz1hgqMVCiYq9Gd2f288NpJHWxFK1VPYFAxRAL",
};

/// Collection name under the contract.
pub const POSTS_COLLECTION: &str = "posts";

/// Revision for a freshly created document's state transition.
pub const INITIAL_REVISION: u64 = 0;

/// Prefix the SDK uses when an identity has no nonce for a contract yet.
/// This case is recoverable (the nonce is simply 0); anything else is not.
pub const NONCE_NOT_FOUND_MARKER: &str = "Could not get identityContractNonce";

/// Options for a document query. Only the flag this client actually passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub contract_known_keep_history: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SdkError {
    /// The identity has never transacted against this contract.
    #[error("identity contract nonce not initialized: {0}")]
    NonceNotFound(String),
    /// The SDK bundle is not loaded (or we are not running in a browser).
    #[error("platform SDK is only available in the browser")]
    Unavailable,
    /// Any other failure reported by the SDK.
    #[error("{0}")]
    Sdk(String),
}

impl SdkError {
    /// Classify a raw failure string from the SDK. The not-yet-initialized
    /// nonce case is recognized by its message prefix, matching how the
    /// SDK reports it ("Error: Could not get identityContractNonce...").
    pub fn from_sdk_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let is_nonce_missing = message
            .strip_prefix("Error: ")
            .unwrap_or(&message)
            .starts_with(NONCE_NOT_FOUND_MARKER);
        if is_nonce_missing {
            SdkError::NonceNotFound(message)
        } else {
            SdkError::Sdk(message)
        }
    }
}

/// The document-query and state-transition surface of the platform SDK.
///
/// `Document` and `Transition` stay opaque: the client hands them straight
/// back to the SDK and the wallet extension without inspecting them.
#[allow(async_fn_in_trait)]
pub trait PlatformSdk {
    type Document;
    type Transition;

    /// Query all documents in a collection.
    async fn query_documents(
        &self,
        contract_id: &str,
        collection: &str,
        opts: &QueryOptions,
    ) -> Result<Vec<PostDocument>, SdkError>;

    /// Build a draft document bound to an identity.
    async fn create_document(
        &self,
        contract_id: &str,
        collection: &str,
        payload: &PostPayload,
        owner_id: &str,
    ) -> Result<Self::Document, SdkError>;

    /// Build the state transition for a draft document.
    fn create_state_transition(
        &self,
        document: &Self::Document,
        revision: u64,
        nonce: u64,
    ) -> Result<Self::Transition, SdkError>;

    /// Current identity-contract sequence number.
    async fn identity_contract_nonce(
        &self,
        identity_id: &str,
        contract_id: &str,
    ) -> Result<u64, SdkError>;
}
