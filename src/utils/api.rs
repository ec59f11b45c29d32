//! 社員API (REST) クライアント

use serde_json::json;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::models::Employee;
use crate::utils::log_trace::{log_error_with_data, log_info_with_data, log_warn};

/// API呼び出しの失敗。Display がそのままユーザー向けメッセージになる。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Could not build request: {0}")]
    Request(String),
    #[error("Network error")]
    Network,
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// 社員データの取得・削除
#[allow(async_fn_in_trait)]
pub trait EmployeeApi {
    async fn get_all_employees(&self) -> Result<Vec<Employee>, ApiError>;
    async fn delete_employee(&self, guid: &str) -> Result<(), ApiError>;
}

/// fetch API を使うHTTP実装
#[derive(Debug, Clone, PartialEq)]
pub struct HttpEmployeeApi {
    base_url: String,
}

impl HttpEmployeeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn employees_url(&self) -> String {
        format!("{}/employees", self.base_url)
    }

    pub fn employee_url(&self, guid: &str) -> String {
        let encoded = encode_segment(guid);
        format!("{}/employees/{}", self.base_url, encoded)
    }

    async fn send(&self, method: &str, url: &str) -> Result<Response, ApiError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| ApiError::Request(format!("{:?}", e)))?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(|e| ApiError::Request(format!("{:?}", e)))?;

        let window = web_sys::window().ok_or_else(|| ApiError::Request("window is unavailable".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                log_error_with_data("employee-api", &format!("{} {} に失敗", method, url), json!({ "error": format!("{:?}", e) }));
                ApiError::Network
            })?;

        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Decode("fetch did not return a Response".into()))?;

        if !resp.ok() {
            log_warn("employee-api", &format!("{} {} -> {}", method, url, resp.status()));
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp)
    }
}

impl EmployeeApi for HttpEmployeeApi {
    async fn get_all_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let url = self.employees_url();
        let resp = self.send("GET", &url).await?;

        let json = JsFuture::from(resp.json().map_err(|e| ApiError::Decode(format!("{:?}", e)))?)
            .await
            .map_err(|e| ApiError::Decode(format!("{:?}", e)))?;

        let employees: Vec<Employee> = serde_wasm_bindgen::from_value(json)
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        log_info_with_data("employee-api", "社員一覧を取得", json!({ "count": employees.len() }));
        Ok(employees)
    }

    async fn delete_employee(&self, guid: &str) -> Result<(), ApiError> {
        let url = self.employee_url(guid);
        self.send("DELETE", &url).await?;
        log_info_with_data("employee-api", "社員を削除", json!({ "guid": guid }));
        Ok(())
    }
}

// パスセグメント用のエンコード（GUIDは通常そのまま）
fn encode_segment(segment: &str) -> String {
    if segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        segment.to_string()
    } else {
        String::from(js_sys::encode_uri_component(segment))
    }
}
