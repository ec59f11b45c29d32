//! 社員一覧の状態遷移
//!
//! 状態は `Idle` と `Refreshing` の2つだけ。イベントを `handle` に渡すと
//! 状態を更新し、実行すべき副作用 (`Effect`) を返す。副作用の実行は `drive` が担う。

use leptos::*;
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::components::toast::Notification;
use crate::models::Employee;
use crate::utils::api::{ApiError, EmployeeApi};

pub const DELETED_TITLE: &str = "Employee Deleted";
pub const DELETED_DESCRIPTION: &str = "Employee record deleted from the database.";
pub const DELETE_FAILED_TITLE: &str = "Error occurred";
pub const LOAD_FAILED_TITLE: &str = "Failed to load employees";

/// 削除確認ダイアログの文言
pub fn confirm_delete_message(display_name: &str) -> String {
    format!("Are you sure you want to remove {}'s Employee record?", display_name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPhase {
    #[default]
    Idle,
    Refreshing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    Mounted,
    RefreshRequested,
    Loaded { ticket: u64, result: Result<Vec<Employee>, ApiError> },
    DeleteRequested { guid: String, display_name: String },
    DeleteConfirmed { guid: String },
    DeleteFinished { result: Result<(), ApiError> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { ticket: u64 },
    Confirm { guid: String, message: String },
    Delete { guid: String },
    Notify(Notification),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeListState {
    employees: Vec<Employee>,
    phase: RefreshPhase,
    // 最後に発行した取得チケット
    issued: u64,
    load_error: Option<String>,
}

impl EmployeeListState {
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn phase(&self) -> RefreshPhase {
        self.phase
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn handle(&mut self, event: ListEvent) -> Vec<Effect> {
        match event {
            ListEvent::Mounted | ListEvent::RefreshRequested => vec![self.begin_refresh()],

            ListEvent::Loaded { ticket, result } => {
                // 後から発行した取得がある場合、古い応答は捨てる
                if ticket != self.issued {
                    return Vec::new();
                }
                self.phase = RefreshPhase::Idle;
                match result {
                    Ok(employees) => {
                        self.employees = employees;
                        self.load_error = None;
                        Vec::new()
                    }
                    Err(e) => {
                        let message = e.to_string();
                        self.load_error = Some(message.clone());
                        vec![Effect::Notify(Notification::error(LOAD_FAILED_TITLE, message))]
                    }
                }
            }

            ListEvent::DeleteRequested { guid, display_name } => vec![Effect::Confirm {
                guid,
                message: confirm_delete_message(&display_name),
            }],

            ListEvent::DeleteConfirmed { guid } => vec![Effect::Delete { guid }],

            ListEvent::DeleteFinished { result: Ok(()) } => vec![
                Effect::Notify(Notification::success(DELETED_TITLE, DELETED_DESCRIPTION)),
                self.begin_refresh(),
            ],

            ListEvent::DeleteFinished { result: Err(e) } => {
                vec![Effect::Notify(Notification::error(DELETE_FAILED_TITLE, e.to_string()))]
            }
        }
    }

    fn begin_refresh(&mut self) -> Effect {
        self.issued += 1;
        self.phase = RefreshPhase::Refreshing;
        Effect::Fetch { ticket: self.issued }
    }
}

// ============================================
// 副作用の実行
// ============================================

/// 確認ダイアログと通知
pub trait ListShell {
    fn confirm(&self, message: &str) -> bool;
    fn notify(&self, notification: Notification);
}

/// 状態の置き場所。破棄済みなら `None` を返す。
pub trait StateCell {
    fn try_with_mut<R>(&self, f: impl FnOnce(&mut EmployeeListState) -> R) -> Option<R>;
}

impl StateCell for RefCell<EmployeeListState> {
    fn try_with_mut<R>(&self, f: impl FnOnce(&mut EmployeeListState) -> R) -> Option<R> {
        Some(f(&mut *self.borrow_mut()))
    }
}

impl StateCell for RwSignal<EmployeeListState> {
    fn try_with_mut<R>(&self, f: impl FnOnce(&mut EmployeeListState) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// イベントを処理し、発生した副作用をすべて実行する
///
/// 画面が破棄された後に届いたイベントは何もせずに終了する。
pub async fn drive<C, A, S>(cell: &C, api: &A, shell: &S, event: ListEvent)
where
    C: StateCell,
    A: EmployeeApi,
    S: ListShell,
{
    let mut pending = VecDeque::from([event]);

    while let Some(event) = pending.pop_front() {
        let Some(effects) = cell.try_with_mut(|state| state.handle(event)) else {
            return;
        };

        for effect in effects {
            match effect {
                Effect::Fetch { ticket } => {
                    let result = api.get_all_employees().await;
                    pending.push_back(ListEvent::Loaded { ticket, result });
                }
                Effect::Confirm { guid, message } => {
                    if shell.confirm(&message) {
                        pending.push_back(ListEvent::DeleteConfirmed { guid });
                    }
                }
                Effect::Delete { guid } => {
                    let result = api.delete_employee(&guid).await;
                    pending.push_back(ListEvent::DeleteFinished { result });
                }
                Effect::Notify(notification) => shell.notify(notification),
            }
        }
    }
}
