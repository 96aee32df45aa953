//! Shared handle to the Dash Platform SDK client.
//!
//! One `SdkHandle` is constructed at the application root and provided via
//! context; the underlying client is built lazily on first use and reused
//! for the life of the page. In the browser it drives the page-loaded
//! `window.DashPlatformSDK` bundle; outside the browser every operation
//! reports the SDK as unavailable.

use dioxus::prelude::*;

use evofeed_common::document::{PostDocument, PostPayload};
use evofeed_common::sdk::{PlatformSdk, QueryOptions, SdkError};

/// Opaque document/transition values as produced by the SDK.
#[cfg(target_family = "wasm")]
pub type SdkDocument = wasm_bindgen::JsValue;
#[cfg(target_family = "wasm")]
pub type SdkTransition = wasm_bindgen::JsValue;
#[cfg(not(target_family = "wasm"))]
pub type SdkDocument = ();
#[cfg(not(target_family = "wasm"))]
pub type SdkTransition = ();

#[derive(Clone, Default)]
pub struct SdkHandle {
    #[cfg(target_family = "wasm")]
    client: std::rc::Rc<std::cell::RefCell<Option<wasm_impl::PlatformClient>>>,
}

impl SdkHandle {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(target_family = "wasm")]
    fn client(&self) -> Result<wasm_impl::PlatformClient, SdkError> {
        let mut slot = self.client.borrow_mut();
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = wasm_impl::PlatformClient::new()?;
        *slot = Some(client.clone());
        Ok(client)
    }
}

/// Get the context-provided SDK handle.
pub fn use_sdk() -> SdkHandle {
    use_context::<SdkHandle>()
}

#[cfg(target_family = "wasm")]
impl PlatformSdk for SdkHandle {
    type Document = SdkDocument;
    type Transition = SdkTransition;

    async fn query_documents(
        &self,
        contract_id: &str,
        collection: &str,
        opts: &QueryOptions,
    ) -> Result<Vec<PostDocument>, SdkError> {
        self.client()?
            .query_documents(contract_id, collection, opts)
            .await
    }

    async fn create_document(
        &self,
        contract_id: &str,
        collection: &str,
        payload: &PostPayload,
        owner_id: &str,
    ) -> Result<SdkDocument, SdkError> {
        self.client()?
            .create_document(contract_id, collection, payload, owner_id)
            .await
    }

    fn create_state_transition(
        &self,
        document: &SdkDocument,
        revision: u64,
        nonce: u64,
    ) -> Result<SdkTransition, SdkError> {
        self.client()?
            .create_state_transition(document, revision, nonce)
    }

    async fn identity_contract_nonce(
        &self,
        identity_id: &str,
        contract_id: &str,
    ) -> Result<u64, SdkError> {
        self.client()?
            .identity_contract_nonce(identity_id, contract_id)
            .await
    }
}

// Non-WASM stub (e.g. running component code natively)
#[cfg(not(target_family = "wasm"))]
impl PlatformSdk for SdkHandle {
    type Document = SdkDocument;
    type Transition = SdkTransition;

    async fn query_documents(
        &self,
        _contract_id: &str,
        _collection: &str,
        _opts: &QueryOptions,
    ) -> Result<Vec<PostDocument>, SdkError> {
        tracing::warn!("platform SDK query outside the browser");
        Err(SdkError::Unavailable)
    }

    async fn create_document(
        &self,
        _contract_id: &str,
        _collection: &str,
        _payload: &PostPayload,
        _owner_id: &str,
    ) -> Result<SdkDocument, SdkError> {
        Err(SdkError::Unavailable)
    }

    fn create_state_transition(
        &self,
        _document: &SdkDocument,
        _revision: u64,
        _nonce: u64,
    ) -> Result<SdkTransition, SdkError> {
        Err(SdkError::Unavailable)
    }

    async fn identity_contract_nonce(
        &self,
        _identity_id: &str,
        _contract_id: &str,
    ) -> Result<u64, SdkError> {
        Err(SdkError::Unavailable)
    }
}

// ─── WASM implementation ─────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
mod wasm_impl {
    use js_sys::{Array, BigInt, Object, Reflect};
    use wasm_bindgen::{JsCast, JsValue};

    use evofeed_common::document::{PostDocument, PostPayload, PostProperties};
    use evofeed_common::sdk::{QueryOptions, SdkError};

    use crate::components::js;

    /// A constructed `DashPlatformSDK` instance.
    #[derive(Clone)]
    pub struct PlatformClient {
        sdk: JsValue,
    }

    impl PlatformClient {
        pub fn new() -> Result<Self, SdkError> {
            let window = JsValue::from(web_sys::window().ok_or(SdkError::Unavailable)?);
            let ctor = js::get(&window, "DashPlatformSDK").map_err(SdkError::Sdk)?;
            let ctor: js_sys::Function = ctor
                .dyn_into()
                .map_err(|_| SdkError::Unavailable)?;
            let sdk = Reflect::construct(&ctor, &Array::new())
                .map_err(|e| SdkError::from_sdk_message(js::error_text(&e)))?;
            tracing::debug!("platform SDK client constructed");
            Ok(Self { sdk })
        }

        fn namespace(&self, name: &str) -> Result<JsValue, SdkError> {
            js::get(&self.sdk, name).map_err(SdkError::Sdk)
        }

        pub async fn query_documents(
            &self,
            contract_id: &str,
            collection: &str,
            opts: &QueryOptions,
        ) -> Result<Vec<PostDocument>, SdkError> {
            let documents = self.namespace("documents")?;

            let options = Object::new();
            Reflect::set(
                &options,
                &JsValue::from_str("contractKnownKeepHistory"),
                &JsValue::from_bool(opts.contract_known_keep_history),
            )
            .map_err(|e| SdkError::Sdk(js::error_text(&e)))?;

            // query(contractId, collection, where, orderBy, limit,
            //       startAt, startAfter, options)
            let args = Array::new();
            args.push(&JsValue::from_str(contract_id));
            args.push(&JsValue::from_str(collection));
            for _ in 0..5 {
                args.push(&JsValue::UNDEFINED);
            }
            args.push(&options);

            let result = js::call_async(&documents, "query", &args)
                .await
                .map_err(SdkError::from_sdk_message)?;
            let result: Array = result.dyn_into().map_err(|_| {
                SdkError::Sdk("documents.query did not return an array".into())
            })?;
            result.iter().map(|doc| post_from_js(&doc)).collect()
        }

        pub async fn create_document(
            &self,
            contract_id: &str,
            collection: &str,
            payload: &PostPayload,
            owner_id: &str,
        ) -> Result<JsValue, SdkError> {
            let documents = self.namespace("documents")?;
            let data = serde_wasm_bindgen::to_value(payload)
                .map_err(|e| SdkError::Sdk(e.to_string()))?;

            let args = Array::new();
            args.push(&JsValue::from_str(contract_id));
            args.push(&JsValue::from_str(collection));
            args.push(&data);
            args.push(&JsValue::from_str(owner_id));

            js::call_async(&documents, "create", &args)
                .await
                .map_err(SdkError::from_sdk_message)
        }

        pub fn create_state_transition(
            &self,
            document: &JsValue,
            revision: u64,
            nonce: u64,
        ) -> Result<JsValue, SdkError> {
            let documents = self.namespace("documents")?;
            // The SDK takes the nonce as a bigint.
            let nonce: JsValue = BigInt::from(nonce).into();

            let args = Array::new();
            args.push(document);
            args.push(&JsValue::from_f64(revision as f64));
            args.push(&nonce);

            js::call(&documents, "createStateTransition", &args)
                .map_err(SdkError::from_sdk_message)
        }

        pub async fn identity_contract_nonce(
            &self,
            identity_id: &str,
            contract_id: &str,
        ) -> Result<u64, SdkError> {
            let identities = self.namespace("identities")?;

            let args = Array::new();
            args.push(&JsValue::from_str(identity_id));
            args.push(&JsValue::from_str(contract_id));

            let value = js::call_async(&identities, "getIdentityContractNonce", &args)
                .await
                .map_err(SdkError::from_sdk_message)?;
            js::as_u64(&value)
                .ok_or_else(|| SdkError::Sdk("nonce is not an integer".into()))
        }
    }

    /// Map one SDK document to the rendering model. Properties the schema
    /// may omit fall back to defaults rather than failing the whole query.
    fn post_from_js(doc: &JsValue) -> Result<PostDocument, SdkError> {
        let id = base58_field(doc, "id")?;
        let owner_id = base58_field(doc, "ownerId")?;
        let created_at = js::get(doc, "createdAt")
            .ok()
            .and_then(|v| js::as_u64(&v));
        let properties = js::get(doc, "properties")
            .ok()
            .and_then(|v| serde_wasm_bindgen::from_value::<PostProperties>(v).ok())
            .unwrap_or_default();
        Ok(PostDocument {
            id,
            owner_id,
            created_at,
            properties,
        })
    }

    /// Identifier fields are objects exposing a `base58()` method.
    fn base58_field(doc: &JsValue, field: &str) -> Result<String, SdkError> {
        let value = js::get(doc, field).map_err(SdkError::Sdk)?;
        let encoded = js::call(&value, "base58", &Array::new()).map_err(SdkError::Sdk)?;
        encoded
            .as_string()
            .ok_or_else(|| SdkError::Sdk(format!("{field}.base58() is not a string")))
    }
}
