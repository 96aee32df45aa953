pub mod app;
pub mod connect_wallet;
pub mod extension;
pub mod feed_state;
pub mod feed_view;
#[cfg(target_family = "wasm")]
pub mod js;
pub mod sdk;
