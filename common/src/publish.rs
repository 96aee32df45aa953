//! Post loading and the publish workflow.
//!
//! `publish_post` is the one multi-step sequencing contract in this client:
//! create the draft document, fetch the identity-contract nonce, build a
//! state transition with nonce + 1, then hand it to the wallet extension
//! to sign and broadcast. Each step gates the next; nothing is retried and
//! nothing rolls back.

use crate::document::{PostDocument, PostPayload};
use crate::sdk::{
    PlatformSdk, QueryOptions, SdkError, INITIAL_REVISION, POSTS_COLLECTION,
    POSTS_CONTRACT_ID,
};
use crate::wallet::{WalletError, WalletSigner};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PublishError {
    #[error("no identity connected")]
    IdentityMissing,
    #[error("post message is empty")]
    EmptyMessage,
    #[error("failed to create post document: {0}")]
    CreateDocument(#[source] SdkError),
    #[error("failed to fetch identity contract nonce: {0}")]
    NonceLookup(#[source] SdkError),
    #[error("failed to build state transition: {0}")]
    BuildTransition(#[source] SdkError),
    #[error("failed to sign and broadcast: {0}")]
    Broadcast(#[source] WalletError),
}

/// Load the full post feed. Also serves as the refresh step after a
/// successful publish — the feed has no optimistic updates or cache merge,
/// a re-fetch is the only consistency mechanism.
pub async fn load_posts<S: PlatformSdk>(sdk: &S) -> Result<Vec<PostDocument>, SdkError> {
    let opts = QueryOptions {
        contract_known_keep_history: true,
    };
    sdk.query_documents(POSTS_CONTRACT_ID, POSTS_COLLECTION, &opts)
        .await
}

/// Publish a post as the connected identity.
///
/// The nonce used for the transition is exactly `fetched + 1`. A stale or
/// duplicate nonce is a caller error rejected by the platform, not
/// something this client retries — nonce reuse corrupts ordering remotely.
/// The special case is an identity that has never transacted against the
/// contract: the SDK reports that as `NonceNotFound` and the nonce is 0.
pub async fn publish_post<S, W>(
    sdk: &S,
    signer: &W,
    identity: Option<&str>,
    message: &str,
) -> Result<(), PublishError>
where
    S: PlatformSdk,
    W: WalletSigner<Transition = S::Transition>,
{
    let identity = identity.ok_or(PublishError::IdentityMissing)?;
    let message = message.trim();
    if message.is_empty() {
        return Err(PublishError::EmptyMessage);
    }

    let payload = PostPayload {
        message: message.to_string(),
    };
    let document = sdk
        .create_document(POSTS_CONTRACT_ID, POSTS_COLLECTION, &payload, identity)
        .await
        .map_err(PublishError::CreateDocument)?;

    let nonce = match sdk
        .identity_contract_nonce(identity, POSTS_CONTRACT_ID)
        .await
    {
        Ok(nonce) => nonce,
        Err(SdkError::NonceNotFound(msg)) => {
            tracing::debug!("nonce not initialized for {identity}, using 0: {msg}");
            0
        }
        Err(e) => return Err(PublishError::NonceLookup(e)),
    };

    let transition = sdk
        .create_state_transition(&document, INITIAL_REVISION, nonce + 1)
        .map_err(PublishError::BuildTransition)?;

    signer
        .sign_and_broadcast(&transition)
        .await
        .map_err(PublishError::Broadcast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletInfo;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    const IDENTITY: &str = "5rvkW1jKKmNF2NL1J7oezWGzW6qDC7aYp5LxHhCGgqX3";

    /// Transition double: (revision, nonce) as handed to the signer.
    type Transition = (u64, u64);

    struct FakeSdk {
        nonce: Result<u64, SdkError>,
        fail_create: bool,
        queries: RefCell<Vec<(String, String, QueryOptions)>>,
        created: RefCell<Vec<(String, String)>>,
        transitions: RefCell<Vec<Transition>>,
        nonce_calls: Cell<usize>,
        posts: Vec<PostDocument>,
    }

    impl FakeSdk {
        fn with_nonce(nonce: Result<u64, SdkError>) -> Self {
            Self {
                nonce,
                fail_create: false,
                queries: RefCell::new(Vec::new()),
                created: RefCell::new(Vec::new()),
                transitions: RefCell::new(Vec::new()),
                nonce_calls: Cell::new(0),
                posts: Vec::new(),
            }
        }
    }

    impl PlatformSdk for FakeSdk {
        type Document = String;
        type Transition = Transition;

        async fn query_documents(
            &self,
            contract_id: &str,
            collection: &str,
            opts: &QueryOptions,
        ) -> Result<Vec<PostDocument>, SdkError> {
            self.queries.borrow_mut().push((
                contract_id.to_string(),
                collection.to_string(),
                opts.clone(),
            ));
            Ok(self.posts.clone())
        }

        async fn create_document(
            &self,
            _contract_id: &str,
            _collection: &str,
            payload: &PostPayload,
            owner_id: &str,
        ) -> Result<String, SdkError> {
            if self.fail_create {
                return Err(SdkError::Sdk("create failed".into()));
            }
            self.created
                .borrow_mut()
                .push((payload.message.clone(), owner_id.to_string()));
            Ok(payload.message.clone())
        }

        fn create_state_transition(
            &self,
            _document: &String,
            revision: u64,
            nonce: u64,
        ) -> Result<Transition, SdkError> {
            self.transitions.borrow_mut().push((revision, nonce));
            Ok((revision, nonce))
        }

        async fn identity_contract_nonce(
            &self,
            _identity_id: &str,
            _contract_id: &str,
        ) -> Result<u64, SdkError> {
            self.nonce_calls.set(self.nonce_calls.get() + 1);
            self.nonce.clone()
        }
    }

    struct FakeSigner {
        broadcasts: RefCell<Vec<Transition>>,
        fail: bool,
    }

    impl FakeSigner {
        fn new() -> Self {
            Self {
                broadcasts: RefCell::new(Vec::new()),
                fail: false,
            }
        }
    }

    impl WalletSigner for FakeSigner {
        type Transition = Transition;

        async fn connect(&self) -> Result<WalletInfo, WalletError> {
            Ok(WalletInfo {
                current_identity: IDENTITY.into(),
            })
        }

        async fn sign_and_broadcast(
            &self,
            transition: &Transition,
        ) -> Result<(), WalletError> {
            if self.fail {
                return Err(WalletError::Broadcast("rejected".into()));
            }
            self.broadcasts.borrow_mut().push(*transition);
            Ok(())
        }
    }

    #[test]
    fn happy_path_uses_fetched_nonce_plus_one() {
        let sdk = FakeSdk::with_nonce(Ok(41));
        let signer = FakeSigner::new();
        block_on(publish_post(&sdk, &signer, Some(IDENTITY), "hello #test")).unwrap();

        assert_eq!(
            *sdk.created.borrow(),
            vec![("hello #test".to_string(), IDENTITY.to_string())]
        );
        assert_eq!(*sdk.transitions.borrow(), vec![(0, 42)]);
        assert_eq!(*signer.broadcasts.borrow(), vec![(0, 42)]);
    }

    #[test]
    fn message_is_trimmed_before_submission() {
        let sdk = FakeSdk::with_nonce(Ok(0));
        let signer = FakeSigner::new();
        block_on(publish_post(&sdk, &signer, Some(IDENTITY), "  hi there \n")).unwrap();
        assert_eq!(sdk.created.borrow()[0].0, "hi there");
    }

    #[test]
    fn nonce_not_found_defaults_to_zero() {
        let sdk = FakeSdk::with_nonce(Err(SdkError::from_sdk_message(
            "Error: Could not get identityContractNonce for identity",
        )));
        let signer = FakeSigner::new();
        block_on(publish_post(&sdk, &signer, Some(IDENTITY), "first post")).unwrap();
        // 0 default + 1
        assert_eq!(*signer.broadcasts.borrow(), vec![(0, 1)]);
    }

    #[test]
    fn other_nonce_errors_abort_before_signing() {
        let sdk = FakeSdk::with_nonce(Err(SdkError::Sdk("connection refused".into())));
        let signer = FakeSigner::new();
        let err = block_on(publish_post(&sdk, &signer, Some(IDENTITY), "hello"))
            .unwrap_err();
        assert!(matches!(err, PublishError::NonceLookup(_)));
        assert!(sdk.transitions.borrow().is_empty());
        assert!(signer.broadcasts.borrow().is_empty());
    }

    #[test]
    fn missing_identity_makes_no_remote_calls() {
        let sdk = FakeSdk::with_nonce(Ok(0));
        let signer = FakeSigner::new();
        let err = block_on(publish_post(&sdk, &signer, None, "hello")).unwrap_err();
        assert_eq!(err, PublishError::IdentityMissing);
        assert!(sdk.created.borrow().is_empty());
        assert_eq!(sdk.nonce_calls.get(), 0);
    }

    #[test]
    fn empty_message_rejected_before_any_call() {
        let sdk = FakeSdk::with_nonce(Ok(0));
        let signer = FakeSigner::new();
        let err =
            block_on(publish_post(&sdk, &signer, Some(IDENTITY), "   \n")).unwrap_err();
        assert_eq!(err, PublishError::EmptyMessage);
        assert!(sdk.created.borrow().is_empty());
        assert_eq!(sdk.nonce_calls.get(), 0);
    }

    #[test]
    fn create_failure_aborts_before_nonce_fetch() {
        let mut sdk = FakeSdk::with_nonce(Ok(7));
        sdk.fail_create = true;
        let signer = FakeSigner::new();
        let err = block_on(publish_post(&sdk, &signer, Some(IDENTITY), "hello"))
            .unwrap_err();
        assert!(matches!(err, PublishError::CreateDocument(_)));
        assert_eq!(sdk.nonce_calls.get(), 0);
        assert!(signer.broadcasts.borrow().is_empty());
    }

    #[test]
    fn broadcast_failure_is_reported() {
        let sdk = FakeSdk::with_nonce(Ok(3));
        let mut signer = FakeSigner::new();
        signer.fail = true;
        let err = block_on(publish_post(&sdk, &signer, Some(IDENTITY), "hello"))
            .unwrap_err();
        assert!(matches!(err, PublishError::Broadcast(_)));
        // The transition was still built exactly once, with nonce 4.
        assert_eq!(*sdk.transitions.borrow(), vec![(0, 4)]);
    }

    #[test]
    fn load_posts_queries_with_full_history() {
        let mut sdk = FakeSdk::with_nonce(Ok(0));
        sdk.posts = vec![PostDocument {
            id: "doc1".into(),
            owner_id: IDENTITY.into(),
            created_at: Some(1_700_000_000_000),
            properties: Default::default(),
        }];
        let posts = block_on(load_posts(&sdk)).unwrap();
        assert_eq!(posts.len(), 1);

        let queries = sdk.queries.borrow();
        let (contract, collection, opts) = &queries[0];
        assert_eq!(contract, POSTS_CONTRACT_ID);
        assert_eq!(collection, POSTS_COLLECTION);
        assert!(opts.contract_known_keep_history);
    }
}
