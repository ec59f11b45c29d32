//! 社員一覧ビュー
//!
//! 一覧の取得・削除・再取得は `list_state` の状態遷移に任せ、
//! ここでは列定義とブラウザ側の確認ダイアログ/トーストをつなぐ。

use leptos::*;
use std::rc::Rc;

use crate::components::data_table::{ColumnSpec, DataTable};
use crate::components::toast::{show_toast, Notification, ToastQueue, ToastStatus};
use crate::models::{edit_route, Employee};
use crate::utils::format::{format_salary, format_timestamp};
use crate::utils::log_trace::{log_error, log_info};
use crate::views::list_state::{drive, EmployeeListState, ListEvent, ListShell, RefreshPhase};
use crate::AppContext;

// ============================================
// 列定義
// ============================================

/// データ列（操作列を除く）
pub fn data_columns() -> Vec<ColumnSpec<Employee>> {
    vec![
        ColumnSpec::new("First Name", |e: &Employee| e.first_name.clone()),
        ColumnSpec::new("Last Name", |e: &Employee| e.last_name.clone()),
        ColumnSpec::new("Department", |e: &Employee| e.department.name.clone()),
        ColumnSpec::new("Email", |e: &Employee| e.email_address.clone()),
        ColumnSpec::new("Age", |e: &Employee| e.age.to_string()).numeric(),
        ColumnSpec::new("Salary (Rs.)", |e: &Employee| format_salary(e.salary)).numeric(),
        ColumnSpec::new("Created On", |e: &Employee| format_timestamp(e.created_at.as_ref())),
        ColumnSpec::new("Updated On", |e: &Employee| format_timestamp(e.updated_at.as_ref())),
    ]
}

/// 全列（編集リンク・削除ボタンの操作列付き）
pub fn employee_columns(on_delete: Rc<dyn Fn(String, String)>) -> Vec<ColumnSpec<Employee>> {
    let mut columns = data_columns();
    let action = ColumnSpec::new("Action", |e: &Employee| e.guid.clone()).render_with(move |e: &Employee| {
        let guid = e.guid.clone();
        let display_name = e.display_name().to_string();
        let on_delete = on_delete.clone();
        view! {
            <div class="button-group">
                <a
                    class="icon-btn edit"
                    href=edit_route(&e.guid)
                    aria-label="Update this record"
                    title="Edit"
                >"✎"</a>
                <button
                    class="icon-btn delete"
                    aria-label="Delete this record"
                    title="Delete"
                    on:click=move |_| on_delete(guid.clone(), display_name.clone())
                >"🗑"</button>
            </div>
        }
        .into_view()
    });
    columns.push(action);
    columns
}

fn employee_key(e: &Employee) -> String {
    e.guid.clone()
}

// ============================================
// ブラウザ側の確認ダイアログ・通知
// ============================================

#[derive(Clone, Copy)]
struct BrowserShell {
    toasts: RwSignal<ToastQueue>,
}

impl ListShell for BrowserShell {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn notify(&self, notification: Notification) {
        let line = format!("{}: {}", notification.title, notification.description);
        match notification.status {
            ToastStatus::Success => log_info("employee-list", &line),
            ToastStatus::Error => log_error("employee-list", &line),
        }
        show_toast(self.toasts, notification);
    }
}

// ============================================
// 社員一覧コンポーネント
// ============================================

#[component]
pub fn EmployeeTable() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let state = create_rw_signal(EmployeeListState::default());
    let shell = BrowserShell { toasts: ctx.toasts };
    let api = store_value(ctx.api.clone());

    // イベントごとに非同期タスクを起動（画面破棄後は何もしない）
    let dispatch = move |event: ListEvent| {
        let Some(api) = api.try_get_value() else { return };
        spawn_local(async move {
            drive(&state, &api, &shell, event).await;
        });
    };

    log_info("employee-list", "社員一覧を表示");
    dispatch(ListEvent::Mounted);

    let on_delete: Rc<dyn Fn(String, String)> = Rc::new(move |guid, display_name| {
        dispatch(ListEvent::DeleteRequested { guid, display_name });
    });
    let columns: Rc<Vec<ColumnSpec<Employee>>> = Rc::new(employee_columns(on_delete));
    let rows: Signal<Vec<Employee>> = Signal::derive(move || state.with(|s| s.employees().to_vec()));

    let refreshing = move || state.with(|s| s.phase() == RefreshPhase::Refreshing);
    let load_error = move || state.with(|s| s.load_error().map(str::to_string));

    view! {
        <div class="employee-table">
            <div class="table-status">
                <button
                    class="refresh-btn"
                    disabled=refreshing
                    on:click=move |_| dispatch(ListEvent::RefreshRequested)
                >"Refresh"</button>
                {move || refreshing().then(|| view! {
                    <span class="status loading">"Loading..."</span>
                })}
                {move || load_error().map(|e| view! {
                    <span class="status error">{e}</span>
                })}
            </div>

            <DataTable
                rows=rows
                columns=columns
                row_key=employee_key
                empty_message="No employees found."
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::data_table::{table_cells, Align};
    use crate::models::Department;
    use crate::utils::format::format_local;
    use chrono::{TimeZone, Utc};

    fn sample(guid: &str, department: &str, salary: f64) -> Employee {
        Employee {
            guid: guid.to_string(),
            first_name: "Kamala".to_string(),
            last_name: "Fernando".to_string(),
            department: Department { guid: None, name: department.to_string() },
            email_address: "kamala@example.com".to_string(),
            age: 42,
            salary,
            created_at: Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
            updated_at: Some(Utc.with_ymd_and_hms(2023, 5, 20, 12, 45, 0).unwrap()),
        }
    }

    #[test]
    fn test_column_headers() {
        let headers: Vec<&str> = data_columns().iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            vec!["First Name", "Last Name", "Department", "Email", "Age", "Salary (Rs.)", "Created On", "Updated On"]
        );
    }

    #[test]
    fn test_numeric_columns_right_aligned() {
        let right: Vec<&str> = data_columns()
            .iter()
            .filter(|c| c.align == Align::Right)
            .map(|c| c.header)
            .collect();
        assert_eq!(right, vec!["Age", "Salary (Rs.)"]);
    }

    #[test]
    fn test_one_row_per_employee() {
        let rows: Vec<Employee> = (0..7).map(|i| sample(&format!("g{}", i), "HR", 100.0)).collect();
        let cells = table_cells(&data_columns(), &rows);
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|r| r.len() == 8));
    }

    #[test]
    fn test_row_cells() {
        let employee = sample("g1", "Engineering", 1234.5);
        let cells = table_cells(&data_columns(), std::slice::from_ref(&employee));
        let row = &cells[0];
        assert_eq!(row[0], "Kamala");
        assert_eq!(row[1], "Fernando");
        assert_eq!(row[2], "Engineering");
        assert_eq!(row[3], "kamala@example.com");
        assert_eq!(row[4], "42");
        assert_eq!(row[5], "1234.50");
        assert_eq!(row[6], format_local(&employee.created_at.unwrap()));
        assert_eq!(row[7], format_local(&employee.updated_at.unwrap()));
    }

    #[test]
    fn test_unparsable_dates_only_affect_their_cells() {
        let mut employee = sample("g1", "HR", 10.0);
        employee.created_at = None;
        let cells = table_cells(&data_columns(), std::slice::from_ref(&employee));
        assert_eq!(cells[0][0], "Kamala");
        assert_eq!(cells[0][6], "Invalid Date");
        assert_eq!(cells[0][7], format_local(&employee.updated_at.unwrap()));
    }

    #[test]
    fn test_row_key_is_guid() {
        assert_eq!(employee_key(&sample("abc", "HR", 1.0)), "abc");
    }
}
