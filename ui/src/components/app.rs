use dioxus::prelude::*;

use super::feed_state::FeedState;
use super::feed_view::FeedView;
use super::sdk::SdkHandle;

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(FeedState::new()));
    use_context_provider(SdkHandle::new);

    rsx! { FeedView {} }
}
