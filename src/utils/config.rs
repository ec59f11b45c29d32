//! APIエンドポイント設定
//!
//! 優先順位: LocalStorageの上書き > ビルド時の EMPLOYEE_API_URL > 既定値

use wasm_bindgen::prelude::*;
use crate::utils::log_trace::log_info;

const API_URL_KEY: &str = "employee_manager_api_url";

/// 既定のAPIベースURL（同一オリジンのリバースプロキシ想定）
pub const DEFAULT_API_URL: &str = "/api";

/// ビルド時に埋め込まれたAPIベースURL
pub fn built_api_url() -> Option<&'static str> {
    option_env!("EMPLOYEE_API_URL").filter(|u| !u.is_empty())
}

/// 上書き・ビルド時設定・既定値からAPIベースURLを決定
pub fn pick_api_url(stored: Option<String>, built: Option<&str>) -> String {
    let url = stored
        .filter(|u| !u.trim().is_empty())
        .or_else(|| built.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    url.trim().trim_end_matches('/').to_string()
}

/// 現在有効なAPIベースURL
pub fn resolve_api_url() -> String {
    pick_api_url(get_api_url(), built_api_url())
}

/// API URLを保存
pub fn save_api_url(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// 保存済みのAPI URLを取得
pub fn get_api_url() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let url = storage.get_item(API_URL_KEY).ok()??;
    if url.is_empty() { None } else { Some(url) }
}

/// API URLの上書きをクリア
pub fn clear_api_url() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(API_URL_KEY);
        }
    }
}

/// URLパラメータからAPI URLを読み込む (?api=xxx)
///
/// `?api=` が空なら上書きを解除する。
pub fn init_api_from_url_params() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let encoded = search.strip_prefix("?api=")?;
    let decoded = js_sys::decode_uri_component(encoded).ok()?.as_string()?;

    if decoded.is_empty() {
        clear_api_url();
        log_info("config", "API URLの上書きを解除しました");
    } else {
        save_api_url(&decoded);
        log_info("config", &format!("API URLを上書き: {}", decoded));
    }

    // URLからパラメータを削除
    let location = window.location();
    let pathname = location.pathname().ok()?;
    let hash = location.hash().ok().unwrap_or_default();
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(
            &JsValue::NULL,
            "",
            Some(&format!("{}{}", pathname, hash)),
        );
    }
    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_override_wins() {
        let url = pick_api_url(Some("https://hr.example.com/api/".into()), Some("http://built"));
        assert_eq!(url, "https://hr.example.com/api");
    }

    #[test]
    fn test_built_url_used_without_override() {
        assert_eq!(pick_api_url(None, Some("http://localhost:5000/api")), "http://localhost:5000/api");
        assert_eq!(pick_api_url(Some("  ".into()), Some("http://built")), "http://built");
    }

    #[test]
    fn test_default_when_nothing_configured() {
        assert_eq!(pick_api_url(None, None), DEFAULT_API_URL);
    }
}
