//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use tracing::{debug, error};

use super::actions::Action;
use super::pagination::{clamp_page, page_window};
use super::state::{App, AppMode, ConfirmAction};
use crate::errors::AppError;
use crate::models::Entry;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> App<S> {
    /// 核心逻辑分发，返回是否退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        debug!(?action, mode = ?self.mode, "dispatch");
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::PrevPage => self.prev_page(),
            Action::NextPage => self.next_page(),
            Action::GoToPage(page) => self.go_to_page(page),
            Action::SelectPageButton(position) => self.select_page_button(position),

            Action::FocusForm => self.focus_form(),
            Action::StartEdit => self.start_edit(),
            Action::StartDelete => self.start_delete(),

            Action::NextField => self.form.focus_next(),
            Action::PrevField => self.form.focus_prev(),
            Action::Input(c) => {
                if self.mode == AppMode::Form {
                    self.form.input(c);
                }
            }
            Action::DeleteChar => {
                if self.mode == AppMode::Form {
                    self.form.delete_char();
                }
            }

            Action::Cancel => self.cancel(),
            Action::Submit => match self.mode {
                AppMode::Form => self.submit(),
                AppMode::Confirm(_) => self.execute_confirm(),
                AppMode::Normal => {}
            },
        }
        false
    }

    // ============ 导航相关 ============

    pub fn move_up(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_row + 1 < self.page_entries().len() {
            self.selected_row += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.go_to_page(self.current_page - 1);
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.go_to_page(self.current_page + 1);
        }
    }

    /// 跳转到指定页，页码限制在 [1, total_pages]
    pub fn go_to_page(&mut self, page: usize) {
        let page = clamp_page(page, self.total_pages());
        if page != self.current_page {
            self.current_page = page;
            self.selected_row = 0;
        }
    }

    /// 选择页码窗口中的第 position 个按钮（从 1 开始），超出窗口时忽略
    pub fn select_page_button(&mut self, position: usize) {
        let window = page_window(self.current_page, self.total_pages());
        if position == 0 {
            return;
        }
        let page = window.start() + position - 1;
        if page <= *window.end() {
            self.go_to_page(page);
        }
    }

    // ============ 表单相关 ============

    pub fn focus_form(&mut self) {
        self.mode = AppMode::Form;
        self.message = None;
    }

    /// 编辑选中的记录
    pub fn start_edit(&mut self) {
        if let Some(id) = self.selected_entry().map(|e| e.id) {
            self.begin_edit(id);
        }
    }

    /// 用指定记录填充表单；找不到时不做任何事
    pub fn begin_edit(&mut self, id: u64) {
        if let Some(entry) = self.store.find(id) {
            let entry = entry.clone();
            self.form.populate(&entry);
            self.mode = AppMode::Form;
            self.message = None;
        }
    }

    /// 提交表单：编辑状态下更新，否则新建
    pub fn submit(&mut self) {
        let draft = self.form.draft();
        if let Err(e) = draft.validate() {
            self.message = Some(e.to_string());
            return;
        }

        let editing = self.form.editing_id;
        let result = match editing {
            Some(id) => self
                .store
                .update(id, draft)
                .map(|updated| if updated { "Entry updated" } else { "" }),
            None => {
                let id = self.ids.next_id();
                self.store
                    .add(Entry::from_draft(id, draft))
                    .map(|_| "Entry added")
            }
        };
        self.report(result.map(str::to_string));

        self.form.reset();
        if editing.is_some() {
            self.mode = AppMode::Normal;
        }
        self.clamp_position();
    }

    // ============ 删除相关 ============

    pub fn start_delete(&mut self) {
        if let Some(id) = self.selected_entry().map(|e| e.id) {
            self.mode = AppMode::Confirm(ConfirmAction::Delete(id));
        }
    }

    /// 执行确认操作
    pub fn execute_confirm(&mut self) {
        if let AppMode::Confirm(ConfirmAction::Delete(id)) = self.mode {
            let result = self.store.remove(id).map(|removed| {
                if removed {
                    "Entry deleted".to_string()
                } else {
                    String::new()
                }
            });
            self.report(result);
            // 正在编辑的记录被删除后，表单回到新建状态
            if self.form.editing_id == Some(id) {
                self.form.reset();
            }
            self.clamp_position();
        }
        self.mode = AppMode::Normal;
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        if self.mode == AppMode::Form && self.form.is_editing() {
            self.form.reset();
        }
        self.mode = AppMode::Normal;
        self.message = None;
    }

    fn report(&mut self, result: Result<String, AppError>) {
        match result {
            Ok(msg) if msg.is_empty() => self.message = None,
            Ok(msg) => self.message = Some(msg),
            Err(e) => {
                error!("failed to save entries: {e}");
                self.message = Some(format!("Failed to save: {e}"));
            }
        }
    }
}
