//! Helpers for driving untyped browser globals (the SDK bundle and the
//! wallet extension expose no typed bindings).

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Render a JS error value the way the console would ("Error: message").
pub fn error_text(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        format!(
            "{}: {}",
            String::from(err.name()),
            String::from(err.message())
        )
    } else {
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"))
    }
}

/// Property lookup on an arbitrary JS object.
pub fn get(target: &JsValue, key: &str) -> Result<JsValue, String> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|e| error_text(&e))
}

/// Look up a method on `target` and call it with `target` as `this`.
pub fn call(target: &JsValue, method: &str, args: &Array) -> Result<JsValue, String> {
    let function: Function = get(target, method)?
        .dyn_into()
        .map_err(|_| format!("{method} is not a function"))?;
    function.apply(target, args).map_err(|e| error_text(&e))
}

/// Call an async method and await the returned promise.
pub async fn call_async(
    target: &JsValue,
    method: &str,
    args: &Array,
) -> Result<JsValue, String> {
    let value = call(target, method, args)?;
    let promise: Promise = value
        .dyn_into()
        .map_err(|_| format!("{method} did not return a promise"))?;
    JsFuture::from(promise).await.map_err(|e| error_text(&e))
}

/// Read an integer from a JS value that may be a number or a bigint
/// (the SDK reports nonces and timestamps as bigints).
pub fn as_u64(value: &JsValue) -> Option<u64> {
    if let Some(n) = value.as_f64() {
        return (n >= 0.0).then_some(n as u64);
    }
    value
        .dyn_ref::<js_sys::BigInt>()
        .and_then(|b| u64::try_from(b.clone()).ok())
}
