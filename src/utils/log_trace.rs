//! 時系列トレースログ
//! API呼び出し・画面操作を記録し、後からダウンロードして確認できるようにする

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const MAX_LOG_ENTRIES: usize = 1000;
const STORAGE_KEY: &str = "employee_manager_log_trace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // "employee-api", "employee-list", "config", ...
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    capacity: usize,
    // false のときはコンソール出力・LocalStorage保存を行わない
    browser: bool,
}

impl LogTrace {
    /// ブラウザ用（LocalStorageから復元）
    pub fn new() -> Self {
        let mut trace = LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            capacity: MAX_LOG_ENTRIES,
            browser: true,
        };
        trace.load_from_storage();
        trace
    }

    /// メモリ上のみで保持するトレース
    #[cfg(test)]
    pub fn in_memory(capacity: usize) -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            browser: false,
        }
    }

    pub fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        let entry = LogEntry {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        if self.browser {
            let line = JsValue::from_str(&format!("[{}] {}", category, message));
            match level {
                LogLevel::Error => web_sys::console::error_1(&line),
                LogLevel::Warn => web_sys::console::warn_1(&line),
                LogLevel::Info => web_sys::console::log_1(&line),
            }
        }

        while self.logs.len() >= self.capacity {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);

        self.save_to_storage();
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.entries().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
        self.save_to_storage();
    }

    fn load_from_storage(&mut self) {
        let Some(window) = web_sys::window() else { return };
        let Ok(Some(storage)) = window.local_storage() else { return };
        if let Ok(Some(json_str)) = storage.get_item(STORAGE_KEY) {
            if let Ok(logs) = serde_json::from_str::<Vec<LogEntry>>(&json_str) {
                let skip = logs.len().saturating_sub(self.capacity);
                self.logs = logs.into_iter().skip(skip).collect();
            }
        }
    }

    fn save_to_storage(&self) {
        if !self.browser {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let json_str = serde_json::to_string(&self.logs).unwrap_or_else(|_| "[]".to_string());
                let _ = storage.set_item(STORAGE_KEY, &json_str);
            }
        }
    }

    pub fn download_logs(&self) {
        let json_str = self.get_logs_json();
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S").to_string();
        let filename = format!("employee_manager_log_{}.json", timestamp);

        let Some(document) = web_sys::window().and_then(|w| w.document()) else { return };

        let blob_parts = js_sys::Array::new();
        blob_parts.push(&JsValue::from_str(&json_str));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("application/json");

        if let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options) {
            if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
                if let Ok(a) = document.create_element("a") {
                    let _ = a.set_attribute("href", &url);
                    let _ = a.set_attribute("download", &filename);
                    if let Some(element) = a.dyn_ref::<web_sys::HtmlElement>() {
                        element.click();
                    }
                }
                let _ = web_sys::Url::revoke_object_url(&url);
            }
        }
    }
}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Info, category, message, None));
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Info, category, message, Some(data)));
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Warn, category, message, None));
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Error, category, message, None));
}

pub fn log_error_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Error, category, message, Some(data)));
}

pub fn download_logs() {
    LOG_TRACE.with(|trace| trace.borrow().download_logs());
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| trace.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut trace = LogTrace::in_memory(2);
        trace.log(LogLevel::Info, "employee-list", "first", None);
        trace.log(LogLevel::Warn, "employee-list", "second", None);
        trace.log(LogLevel::Error, "employee-api", "third", None);

        let messages: Vec<&str> = trace.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[test]
    fn test_logs_json_uses_lowercase_levels() {
        let mut trace = LogTrace::in_memory(10);
        trace.log(LogLevel::Error, "employee-api", "DELETE failed", Some(serde_json::json!({ "status": 500 })));

        let parsed: Vec<LogEntry> = serde_json::from_str(&trace.get_logs_json()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].level, LogLevel::Error);
        assert!(trace.get_logs_json().contains("\"level\": \"error\""));
        assert_eq!(parsed[0].data.as_ref().unwrap()["status"], 500);
    }

    #[test]
    fn test_clear() {
        let mut trace = LogTrace::in_memory(10);
        trace.log(LogLevel::Info, "app", "mounted", None);
        trace.clear();
        assert_eq!(trace.entries().count(), 0);
        assert_eq!(trace.get_logs_json(), "[]");
    }
}
