//! トースト通知コンポーネント
//!
//! 成功/エラーの一時的なメッセージを画面の隅に積み重ねて表示する

use leptos::*;

/// 自動で閉じるまでの時間
pub const TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
}

impl ToastStatus {
    fn class(self) -> &'static str {
        match self {
            ToastStatus::Success => "toast-success",
            ToastStatus::Error => "toast-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastStatus::Success => "✓",
            ToastStatus::Error => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPosition {
    Top,
    #[default]
    TopRight,
    BottomRight,
}

impl ToastPosition {
    fn class(self) -> &'static str {
        match self {
            ToastPosition::Top => "toast-stack top",
            ToastPosition::TopRight => "toast-stack top-right",
            ToastPosition::BottomRight => "toast-stack bottom-right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub status: ToastStatus,
    pub position: ToastPosition,
    pub is_closable: bool,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: ToastStatus::Success,
            position: ToastPosition::TopRight,
            is_closable: true,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status: ToastStatus::Error,
            ..Self::success(title, description)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// 表示中のトースト一覧
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, notification: Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, notification });
        id
    }

    /// 既に閉じられていれば何もしない
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn at(&self, position: ToastPosition) -> Vec<Toast> {
        self.toasts()
            .iter()
            .filter(|t| t.notification.position == position)
            .cloned()
            .collect()
    }
}

/// トーストを追加し、一定時間後に自動で閉じる
pub fn show_toast(queue: RwSignal<ToastQueue>, notification: Notification) {
    let Some(id) = queue.try_update(|q| q.push(notification)) else { return };
    spawn_local(async move {
        gloo::timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
        // 画面破棄後なら try_update が None を返すだけ
        let _ = queue.try_update(|q| q.dismiss(id));
    });
}

/// トースト表示領域
#[component]
pub fn ToastHost(queue: RwSignal<ToastQueue>) -> impl IntoView {
    let positions = [ToastPosition::Top, ToastPosition::TopRight, ToastPosition::BottomRight];

    view! {
        {positions.into_iter().map(|position| view! {
            <div class=position.class() role="status" aria-live="polite">
                {move || queue.with(|q| q.at(position)).into_iter().map(|toast| {
                    let id = toast.id;
                    let n = toast.notification;
                    view! {
                        <div class=format!("toast {}", n.status.class())>
                            <span class="toast-icon">{n.status.icon()}</span>
                            <div class="toast-body">
                                <div class="toast-title">{n.title}</div>
                                {(!n.description.is_empty()).then(|| view! {
                                    <div class="toast-description">{n.description}</div>
                                })}
                            </div>
                            {n.is_closable.then(|| view! {
                                <button
                                    class="toast-close"
                                    aria-label="Close"
                                    on:click=move |_| queue.update(|q| q.dismiss(id))
                                >"×"</button>
                            })}
                        </div>
                    }
                }).collect_view()}
            </div>
        }).collect_view()}
    }
}
