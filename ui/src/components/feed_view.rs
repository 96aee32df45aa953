use chrono::Utc;
use dioxus::prelude::*;

use evofeed_common::address::{format_address, initial};
use evofeed_common::document::extract_hashtags;
use evofeed_common::publish::{load_posts, publish_post};
use evofeed_common::timefmt::format_relative;

use super::connect_wallet::ConnectWallet;
use super::extension::ExtensionSigner;
use super::feed_state::use_feed_state;
use super::sdk::use_sdk;

/// The feed page: initial load, compose-and-publish, and the post list.
#[component]
pub fn FeedView() -> Element {
    let mut feed = use_feed_state();
    let sdk = use_sdk();
    let mut new_post = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    // Initial load: one query, no retry; a failure leaves the list empty.
    {
        let sdk = sdk.clone();
        use_future(move || {
            let sdk = sdk.clone();
            async move {
                match load_posts(&sdk).await {
                    Ok(documents) => feed.write().posts = documents,
                    Err(e) => tracing::error!("failed to load posts: {e}"),
                }
            }
        });
    }

    let can_post = use_memo(move || {
        !new_post.read().trim().is_empty()
            && feed.read().current_identity.is_some()
            && !*submitting.read()
    });

    let submit = {
        let sdk = sdk.clone();
        move |_| {
            if *submitting.read() {
                return;
            }
            let message = new_post.read().clone();
            let identity = feed.read().current_identity.clone();
            if message.trim().is_empty() || identity.is_none() {
                return;
            }

            submitting.set(true);
            let sdk = sdk.clone();
            spawn(async move {
                let Some(signer) = ExtensionSigner::from_window() else {
                    tracing::error!("wallet extension not available for signing");
                    submitting.set(false);
                    return;
                };
                match publish_post(&sdk, &signer, identity.as_deref(), &message).await {
                    Ok(()) => {
                        new_post.set(String::new());
                        // Refresh the feed rather than reloading the page.
                        match load_posts(&sdk).await {
                            Ok(documents) => feed.write().posts = documents,
                            Err(e) => tracing::error!("failed to reload posts: {e}"),
                        }
                    }
                    Err(e) => {
                        // Input stays populated for a manual retry.
                        tracing::error!("failed to publish post: {e}");
                    }
                }
                submitting.set(false);
            });
        }
    };

    let identity = feed.read().current_identity.clone();
    let posts = feed.read().posts.clone();

    rsx! {
        div { class: "evofeed-app",
            header { class: "app-header",
                div { class: "header-top",
                    div { class: "header-title",
                        h1 { "Dash Evolution Feed" }
                        p { "Connect with the community" }
                    }
                    ConnectWallet {
                        on_identity: move |id: String| {
                            feed.write().current_identity = Some(id);
                        },
                    }
                }
            }
            main { class: "feed-layout",
                section { class: "feed-main",
                    div { class: "compose-box",
                        textarea {
                            placeholder: "Share your thoughts with the Dash community...",
                            rows: "3",
                            value: "{new_post}",
                            disabled: *submitting.read(),
                            oninput: move |evt| new_post.set(evt.value()),
                        }
                        div { class: "compose-actions",
                            span { class: "compose-hint",
                                "Add hashtags to categorize your post"
                            }
                            button {
                                class: "post-btn",
                                disabled: !can_post(),
                                onclick: submit,
                                if *submitting.read() { "Posting..." } else { "Post" }
                            }
                        }
                    }
                    if posts.is_empty() {
                        div { class: "feed-empty",
                            p { "No posts yet. Be the first to share!" }
                        }
                    } else {
                        for post in posts {
                            {
                                let owner_short = format_address(&post.owner_id);
                                let is_owner =
                                    identity.as_deref() == Some(post.owner_id.as_str());
                                let when = format_relative(post.created_at, Utc::now());
                                let tags: Vec<String> =
                                    extract_hashtags(&post.properties.message)
                                        .into_iter()
                                        .map(String::from)
                                        .collect();
                                let star_class = if post.properties.starred {
                                    "star-btn starred"
                                } else {
                                    "star-btn"
                                };
                                let star_label =
                                    if post.properties.starred { "★ 0" } else { "☆ 0" };
                                rsx! {
                                    article { key: "{post.id}", class: "post-card",
                                        div { class: "post-avatar", "{initial(&post.owner_id)}" }
                                        div { class: "post-body",
                                            div { class: "post-meta",
                                                h3 {
                                                    class: "post-owner",
                                                    title: "{post.owner_id}",
                                                    "{owner_short}"
                                                }
                                                if is_owner {
                                                    span { class: "owner-badge", "Owner" }
                                                }
                                                time { class: "post-time", "{when}" }
                                            }
                                            p { class: "post-message", "{post.properties.message}" }
                                            if !tags.is_empty() {
                                                div { class: "post-tags",
                                                    for tag in tags {
                                                        span { class: "post-tag", "{tag}" }
                                                    }
                                                }
                                            }
                                            div { class: "post-actions",
                                                button {
                                                    class: "{star_class}",
                                                    onclick: move |_| {
                                                        tracing::debug!("star action not implemented");
                                                    },
                                                    "{star_label}"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                aside { class: "feed-sidebar",
                    div { class: "sidebar-card",
                        h2 { "Platform Stats" }
                        div { class: "stat-row",
                            span { "Active Users" }
                            span { class: "stat-value", "12,847" }
                        }
                        div { class: "stat-row",
                            span { "Total Posts" }
                            span { class: "stat-value", "45.2K" }
                        }
                        div { class: "stat-row",
                            span { "Network Growth" }
                            span { class: "stat-value stat-up", "+23%" }
                        }
                    }
                    div { class: "sidebar-card",
                        h2 { "Trending Topics" }
                        for topic in ["#DashEvolution", "#Platform", "#Development", "#DeFi", "#Identity"] {
                            button { class: "topic-btn", "{topic}" }
                        }
                    }
                }
            }
        }
    }
}
