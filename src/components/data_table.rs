//! 汎用データテーブルコンポーネント
//!
//! 列定義 (`ColumnSpec`) と行データからページ付きのテーブルを描画する

use leptos::*;
use std::ops::Range;
use std::rc::Rc;

/// ページサイズの選択肢
pub const PAGE_SIZE_OPTIONS: &[usize] = &[10, 20, 30, 40, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

impl Align {
    fn class(self) -> &'static str {
        match self {
            Align::Left => "cell",
            Align::Right => "cell numeric",
        }
    }
}

pub type CellRenderer<T> = Rc<dyn Fn(&T) -> View>;

/// 列定義: ヘッダー・値の取り出し・任意のセル描画
pub struct ColumnSpec<T> {
    pub header: &'static str,
    pub value: fn(&T) -> String,
    pub align: Align,
    pub render: Option<CellRenderer<T>>,
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            value: self.value,
            align: self.align,
            render: self.render.clone(),
        }
    }
}

impl<T> ColumnSpec<T> {
    pub fn new(header: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            header,
            value,
            align: Align::Left,
            render: None,
        }
    }

    /// 数値列（右寄せ）
    pub fn numeric(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn render_with(mut self, render: impl Fn(&T) -> View + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn cell_text(&self, row: &T) -> String {
        (self.value)(row)
    }

    /// カスタム描画があればそれを、なければセル文字列を表示
    fn cell_view(&self, row: &T, text: String) -> View {
        match &self.render {
            Some(render) => render(row),
            None => text.into_view(),
        }
    }
}

/// 各行のセル文字列（カスタム描画のない列の表示内容）
pub fn table_cells<T>(columns: &[ColumnSpec<T>], rows: &[T]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| columns.iter().map(|c| c.cell_text(row)).collect())
        .collect()
}

// ============================================
// ページング
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page_index: 0, page_size: PAGE_SIZE_OPTIONS[0] }
    }
}

impl Pagination {
    /// 総ページ数（0件でも1ページ）
    pub fn page_count(&self, total: usize) -> usize {
        let size = self.page_size.max(1);
        ((total + size - 1) / size).max(1)
    }

    /// 行数が減ってページが範囲外になった場合は最終ページに戻す
    pub fn clamped(self, total: usize) -> Self {
        let last = self.page_count(total) - 1;
        Self { page_index: self.page_index.min(last), ..self }
    }

    pub fn range(&self, total: usize) -> Range<usize> {
        let p = self.clamped(total);
        let start = (p.page_index * p.page_size).min(total);
        let end = (start + p.page_size).min(total);
        start..end
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    pub fn previous(self) -> Self {
        Self { page_index: self.page_index.saturating_sub(1), ..self }
    }

    pub fn next(self, total: usize) -> Self {
        Self { page_index: self.page_index + 1, ..self }.clamped(total)
    }

    pub fn last(self, total: usize) -> Self {
        Self { page_index: self.page_count(total) - 1, ..self }
    }

    /// ページサイズ変更（先頭に表示していた行が含まれるページへ移動）
    pub fn with_page_size(self, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let first_row = self.page_index * self.page_size;
        Self { page_index: first_row / page_size, page_size }
    }
}

// ============================================
// テーブル描画
// ============================================

#[component]
pub fn DataTable<T>(
    #[prop(into)] rows: Signal<Vec<T>>,
    columns: Rc<Vec<ColumnSpec<T>>>,
    row_key: fn(&T) -> String,
    #[prop(optional)] empty_message: Option<&'static str>,
) -> impl IntoView
where
    T: Clone + 'static,
{
    let (pagination, set_pagination) = create_signal(Pagination::default());
    let total = move || rows.with(|r| r.len());
    // 再取得で件数が減った場合に備えて常に範囲内へ補正
    let page = move || pagination.get().clamped(total());

    let header_columns = columns.clone();
    let column_count = columns.len();
    let empty_message = empty_message.unwrap_or("No records found.");

    let body = move || {
        let p = page();
        let columns = columns.clone();
        rows.with(|all| {
            let visible = all[p.range(all.len())].to_vec();
            if visible.is_empty() {
                return view! {
                    <tr class="empty-row">
                        <td colspan=column_count>{empty_message}</td>
                    </tr>
                }.into_view();
            }
            let texts = table_cells(&columns, &visible);
            visible.into_iter().zip(texts).map(|(row, cells)| {
                let key = row_key(&row);
                view! {
                    <tr data-key=key>
                        {columns.iter().zip(cells).map(|(col, text)| view! {
                            <td class=col.align.class()>{col.cell_view(&row, text)}</td>
                        }).collect_view()}
                    </tr>
                }
            }).collect_view()
        })
    };

    let on_page_size = move |ev: web_sys::Event| {
        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
            set_pagination.update(|p| *p = p.with_page_size(size));
        }
    };

    view! {
        <div class="data-table">
            <table>
                <thead>
                    <tr>
                        {header_columns.iter().map(|col| view! {
                            <th class=col.align.class()>{col.header}</th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>{body}</tbody>
            </table>

            <div class="pagination">
                <button
                    aria-label="First page"
                    disabled=move || !page().can_previous()
                    on:click=move |_| set_pagination.update(|p| p.page_index = 0)
                >"«"</button>
                <button
                    aria-label="Previous page"
                    disabled=move || !page().can_previous()
                    on:click=move |_| set_pagination.set(page().previous())
                >"‹"</button>
                <span class="page-info">
                    "Page " {move || page().page_index + 1} " of " {move || page().page_count(total())}
                </span>
                <button
                    aria-label="Next page"
                    disabled=move || !page().can_next(total())
                    on:click=move |_| set_pagination.set(page().next(total()))
                >"›"</button>
                <button
                    aria-label="Last page"
                    disabled=move || !page().can_next(total())
                    on:click=move |_| set_pagination.set(page().last(total()))
                >"»"</button>
                <select class="page-size" on:change=on_page_size>
                    {PAGE_SIZE_OPTIONS.iter().map(|&size| view! {
                        <option value=size.to_string() selected=move || pagination.get().page_size == size>
                            "Show " {size}
                        </option>
                    }).collect_view()}
                </select>
            </div>
        </div>
    }
}
