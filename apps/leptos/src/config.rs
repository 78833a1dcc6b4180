//! Runtime configuration read from the host page

use trials_core::ApiConfig;
use wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

/// `<meta name="trials-api-base">` in index.html
const API_BASE_META: &str = "meta[name=\"trials-api-base\"]";
/// localStorage key that turns on debug logging
const DEBUG_FLAG_KEY: &str = "debug_enabled";

/// API settings for this page; same-origin defaults when the meta tag is absent
pub fn api_config() -> ApiConfig {
    let base = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(API_BASE_META).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlMetaElement>().ok())
        .map(|meta| meta.content())
        .unwrap_or_default();

    ApiConfig::with_base_url(base.trim())
}

pub fn debug_enabled() -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(DEBUG_FLAG_KEY).ok().flatten())
        .is_some_and(|v| v == "true")
}
