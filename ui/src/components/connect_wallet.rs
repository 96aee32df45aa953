use dioxus::prelude::*;

use evofeed_common::address::{format_address, initial};
use evofeed_common::wallet::{connect_wallet, WalletInfo};

use super::extension::ExtensionSigner;

/// Wallet connect widget.
///
/// Disconnected: a connect button plus an error banner when the last
/// attempt failed. Connected: avatar, shortened identity, full identity on
/// hover. A successful connect notifies the parent of the new identity so
/// the compose form can be enabled.
#[component]
pub fn ConnectWallet(on_identity: EventHandler<String>) -> Element {
    let mut connected = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let mut wallet_info = use_signal(|| None::<WalletInfo>);

    let connect = move |_| {
        spawn(async move {
            tracing::info!("connect wallet");
            let extension = ExtensionSigner::from_window();
            match connect_wallet(extension.as_ref()).await {
                Ok(info) => {
                    connected.set(true);
                    error.set(None);
                    on_identity.call(info.current_identity.clone());
                    wallet_info.set(Some(info));
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let info = wallet_info.read().clone();

    rsx! {
        div { class: "connect-wallet",
            if *connected.read() {
                if let Some(info) = info {
                    div { class: "wallet-connected", title: "{info.current_identity}",
                        span { class: "wallet-avatar", "{initial(&info.current_identity)}" }
                        span { class: "wallet-address", "{format_address(&info.current_identity)}" }
                        span { class: "status-dot" }
                    }
                }
            } else {
                button { class: "connect-btn", onclick: connect, "Connect Wallet" }
                if let Some(err) = error.read().as_ref() {
                    div { class: "error-banner",
                        p { "{err}" }
                    }
                }
            }
        }
    }
}
