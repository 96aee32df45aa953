//! Capability interface for the browser wallet extension.

use serde::{Deserialize, Serialize};

/// Session record returned by the extension on a successful connect.
/// Held in component state only; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub current_identity: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WalletError {
    #[error("Dash Platform Extension is not installed")]
    ExtensionMissing,
    /// The extension refused or failed the connect. An empty reason falls
    /// back to a generic message.
    #[error("{}", connect_message(.0))]
    Connect(String),
    #[error("sign and broadcast failed: {0}")]
    Broadcast(String),
}

fn connect_message(reason: &str) -> &str {
    if reason.trim().is_empty() {
        "Failed to connect wallet"
    } else {
        reason
    }
}

/// Sign-and-broadcast surface of the wallet extension.
#[allow(async_fn_in_trait)]
pub trait WalletSigner {
    /// State-transition type handed over for signing. Matches the SDK's
    /// transition type in any real pairing.
    type Transition;

    async fn connect(&self) -> Result<WalletInfo, WalletError>;

    async fn sign_and_broadcast(
        &self,
        transition: &Self::Transition,
    ) -> Result<(), WalletError>;
}

/// Connect to the wallet extension, if one is injected into the page.
///
/// An absent handle fails with `ExtensionMissing` without touching the
/// extension at all.
pub async fn connect_wallet<W: WalletSigner>(
    extension: Option<&W>,
) -> Result<WalletInfo, WalletError> {
    let Some(extension) = extension else {
        return Err(WalletError::ExtensionMissing);
    };
    extension.connect().await
}
