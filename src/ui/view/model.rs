//! 视图描述
//!
//! build_view 是纯函数：App -> View，不依赖终端，可直接测试

use crate::ui::form::FormField;
use crate::ui::pagination::{page_window, total_pages};
use crate::ui::state::{App, AppMode};
use crate::storage::KeyValueStore;

pub const EMPTY_MESSAGE: &str = "No records found";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this record?";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub form: FormView,
    pub table: TableView,
    pub pagination: Option<PaginationView>,
    pub entry_count: usize,
    pub max_entries: usize,
    pub help: &'static str,
    pub message: Option<String>,
    pub confirm: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub total_hours: String,
    pub submit_label: &'static str,
    pub editing: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Empty(&'static str),
    Rows(Vec<RowView>),
}

/// 表格中的一行，编辑/删除操作绑定到 `id`
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: u64,
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub total_hours: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationView {
    pub prev_enabled: bool,
    pub pages: Vec<PageButton>,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

pub fn build_view<S: KeyValueStore>(app: &App<S>) -> View {
    let table_active = app.mode == AppMode::Normal;
    let table = if app.store.is_empty() {
        TableView::Empty(EMPTY_MESSAGE)
    } else {
        TableView::Rows(
            app.page_entries()
                .iter()
                .enumerate()
                .map(|(i, entry)| RowView {
                    id: entry.id,
                    date: entry.display_date(),
                    time_start: entry.time_start.clone(),
                    time_end: entry.time_end.clone(),
                    total_hours: entry.total_hours.clone(),
                    selected: table_active && i == app.selected_row,
                })
                .collect(),
        )
    };

    let confirm = match app.mode {
        AppMode::Confirm(_) => Some(DELETE_PROMPT),
        _ => None,
    };

    View {
        form: build_form(app),
        table,
        pagination: build_pagination(
            total_pages(app.store.len(), app.page_size),
            app.current_page,
        ),
        entry_count: app.store.len(),
        max_entries: app.store.max_entries(),
        help: help_text(&app.mode),
        message: app.message.clone(),
        confirm,
    }
}

fn build_form<S: KeyValueStore>(app: &App<S>) -> FormView {
    let active = app.mode == AppMode::Form;
    let form = &app.form;
    FormView {
        fields: FormField::ALL
            .iter()
            .map(|&field| FieldView {
                label: field.label(),
                value: form.value(field).to_string(),
                focused: active && form.focus == field,
            })
            .collect(),
        total_hours: form.total_hours.clone(),
        submit_label: form.submit_label(),
        editing: form.is_editing(),
        active,
    }
}

/// 总页数不超过 1 时不显示分页
pub fn build_pagination(total_pages: usize, current: usize) -> Option<PaginationView> {
    if total_pages <= 1 {
        return None;
    }
    Some(PaginationView {
        prev_enabled: current > 1,
        pages: page_window(current, total_pages)
            .map(|number| PageButton {
                number,
                active: number == current,
            })
            .collect(),
        next_enabled: current < total_pages,
    })
}

fn help_text(mode: &AppMode) -> &'static str {
    match mode {
        AppMode::Normal => {
            "[a] New  [e] Edit  [d] Delete  [j/k] Select  [h/l] Page  [1-5] Page button  [q] Quit"
        }
        AppMode::Form => "[Tab] Next field  [Enter] Submit  [Esc] Back to table",
        AppMode::Confirm(_) => "[y] Confirm  [n] Cancel",
    }
}
