mod components;
mod models;
mod utils;
mod views;

use leptos::*;

use components::toast::ToastQueue;
use components::ToastHost;
use utils::api::HttpEmployeeApi;
use utils::config::{init_api_from_url_params, resolve_api_url};
use utils::log_trace::{clear_logs, download_logs, log_info};
use views::EmployeeTable;

// ============================================
// アプリ全体で共有する状態
// ============================================

#[derive(Clone)]
pub struct AppContext {
    pub api: HttpEmployeeApi,
    pub toasts: RwSignal<ToastQueue>,
}

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    init_api_from_url_params();
    let api = HttpEmployeeApi::new(resolve_api_url());
    log_info("app", &format!("API: {}", api.base_url()));

    let toasts = create_rw_signal(ToastQueue::default());
    let api_label = api.base_url().to_string();
    provide_context(AppContext { api, toasts });

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Employee Manager"</h1>
            </header>

            <main class="container">
                <h2>"Employees"</h2>
                <EmployeeTable />
            </main>

            <footer class="app-footer">
                <span class="api-url" title="API base URL">{api_label}</span>
                <button class="log-btn" on:click=move |_| download_logs()>"Download logs"</button>
                <button class="log-btn" on:click=move |_| clear_logs()>"Clear logs"</button>
            </footer>

            <ToastHost queue=toasts />
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
