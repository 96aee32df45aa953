//! The browser-injected Dash Platform wallet extension.
//!
//! The extension owns keys, nonce signing, and broadcast; this client only
//! holds a handle to `window.dashPlatformExtension.signer` and forwards the
//! connect and sign-and-broadcast calls.

use evofeed_common::wallet::{WalletError, WalletInfo, WalletSigner};

use super::sdk::SdkTransition;

pub struct ExtensionSigner {
    #[cfg(target_family = "wasm")]
    signer: wasm_bindgen::JsValue,
}

impl ExtensionSigner {
    /// Look up the injected extension handle. `None` when the extension is
    /// not installed (or we are not running in a browser).
    pub fn from_window() -> Option<Self> {
        #[cfg(target_family = "wasm")]
        {
            let window = wasm_bindgen::JsValue::from(web_sys::window()?);
            let extension =
                super::js::get(&window, "dashPlatformExtension").ok()?;
            if extension.is_undefined() || extension.is_null() {
                return None;
            }
            let signer = super::js::get(&extension, "signer").ok()?;
            if signer.is_undefined() || signer.is_null() {
                return None;
            }
            Some(Self { signer })
        }
        #[cfg(not(target_family = "wasm"))]
        {
            tracing::debug!("wallet extension lookup outside the browser");
            None
        }
    }
}

#[cfg(target_family = "wasm")]
impl WalletSigner for ExtensionSigner {
    type Transition = SdkTransition;

    async fn connect(&self) -> Result<WalletInfo, WalletError> {
        let info = super::js::call_async(&self.signer, "connect", &js_sys::Array::new())
            .await
            .map_err(WalletError::Connect)?;
        serde_wasm_bindgen::from_value(info)
            .map_err(|e| WalletError::Connect(format!("unexpected wallet info: {e}")))
    }

    async fn sign_and_broadcast(
        &self,
        transition: &SdkTransition,
    ) -> Result<(), WalletError> {
        let args = js_sys::Array::new();
        args.push(transition);
        super::js::call_async(&self.signer, "signAndBroadcast", &args)
            .await
            .map(|_| ())
            .map_err(WalletError::Broadcast)
    }
}

// Non-WASM stub: from_window never produces a handle natively, so these
// only exist to satisfy the trait.
#[cfg(not(target_family = "wasm"))]
impl WalletSigner for ExtensionSigner {
    type Transition = SdkTransition;

    async fn connect(&self) -> Result<WalletInfo, WalletError> {
        Err(WalletError::ExtensionMissing)
    }

    async fn sign_and_broadcast(
        &self,
        _transition: &SdkTransition,
    ) -> Result<(), WalletError> {
        Err(WalletError::ExtensionMissing)
    }
}
