use dioxus::prelude::*;

use evofeed_common::document::PostDocument;

/// Page-level state shared across components.
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    /// Posts from the last successful query, in the order returned.
    pub posts: Vec<PostDocument>,
    /// Identity asserted by the wallet extension after connect.
    pub current_identity: Option<String>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Get the context-provided feed state.
pub fn use_feed_state() -> Signal<FeedState> {
    use_context::<Signal<FeedState>>()
}
