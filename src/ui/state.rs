//! App 状态定义 (Model)
//!
//! 记录集合、表单、当前页码与选中行都集中在 App 中

use super::form::Form;
use super::pagination::{clamp_page, page_bounds, total_pages};
use crate::models::{Entry, IdGenerator};
use crate::storage::{EntryStore, KeyValueStore};

/// 应用状态
pub struct App<S: KeyValueStore> {
    pub store: EntryStore<S>,
    pub form: Form,
    pub ids: IdGenerator,
    pub page_size: usize,
    pub current_page: usize,
    pub selected_row: usize, // 当前页内的行下标
    pub mode: AppMode,
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    Form,
    Confirm(ConfirmAction),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Delete(u64),
}

impl<S: KeyValueStore> App<S> {
    /// 创建新的应用实例
    pub fn new(store: EntryStore<S>, page_size: usize) -> Self {
        let ids = IdGenerator::seeded(store.entries());
        Self {
            store,
            form: Form::new(),
            ids,
            page_size: page_size.max(1),
            current_page: 1,
            selected_row: 0,
            mode: AppMode::Normal,
            message: None,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.store.len(), self.page_size)
    }

    /// 当前页的记录
    pub fn page_entries(&self) -> &[Entry] {
        let bounds = page_bounds(self.current_page, self.page_size, self.store.len());
        &self.store.entries()[bounds]
    }

    /// 获取当前选中的记录
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.page_entries().get(self.selected_row)
    }

    /// 数据变化后修正页码和选中行
    pub fn clamp_position(&mut self) {
        self.current_page = clamp_page(self.current_page, self.total_pages());
        let rows = self.page_entries().len();
        if rows == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= rows {
            self.selected_row = rows - 1;
        }
    }
}
