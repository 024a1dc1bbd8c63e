//! 录入表单
//!
//! 保存三个输入字段、推导的工时以及当前是新建还是编辑

use crate::models::{Entry, EntryDraft, compute_total_hours, today_iso};

pub const SUBMIT_LABEL: &str = "Submit Entry";
pub const UPDATE_LABEL: &str = "Update Entry";

/// 可输入的字段（工时只读，不可聚焦）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    TimeStart,
    TimeEnd,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Date, FormField::TimeStart, FormField::TimeEnd];

    pub fn next(self) -> Self {
        match self {
            FormField::Date => FormField::TimeStart,
            FormField::TimeStart => FormField::TimeEnd,
            FormField::TimeEnd => FormField::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Date => FormField::TimeEnd,
            FormField::TimeStart => FormField::Date,
            FormField::TimeEnd => FormField::TimeStart,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Date => "Date (YYYY-MM-DD)",
            FormField::TimeStart => "Start (HH:MM)",
            FormField::TimeEnd => "End (HH:MM)",
        }
    }

    fn max_len(self) -> usize {
        match self {
            FormField::Date => 10,
            FormField::TimeStart | FormField::TimeEnd => 8,
        }
    }

    fn accepts(self, c: char) -> bool {
        match self {
            FormField::Date => c.is_ascii_digit() || c == '-',
            FormField::TimeStart | FormField::TimeEnd => c.is_ascii_digit() || c == ':',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub total_hours: String,
    pub editing_id: Option<u64>,
    pub focus: FormField,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    pub fn new() -> Self {
        Self {
            date: today_iso(),
            time_start: String::new(),
            time_end: String::new(),
            total_hours: String::new(),
            editing_id: None,
            focus: FormField::Date,
        }
    }

    /// 恢复为新建状态：日期为今天，其余清空
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            UPDATE_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::TimeStart => &self.time_start,
            FormField::TimeEnd => &self.time_end,
        }
    }

    fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Date => &mut self.date,
            FormField::TimeStart => &mut self.time_start,
            FormField::TimeEnd => &mut self.time_end,
        }
    }

    #[cfg(test)]
    pub fn set_field(&mut self, field: FormField, value: &str) {
        *self.value_mut(field) = value.to_string();
        self.on_change(field);
    }

    /// 向当前字段追加字符，忽略不合法的字符
    pub fn input(&mut self, c: char) {
        let field = self.focus;
        if !field.accepts(c) || self.value(field).len() >= field.max_len() {
            return;
        }
        self.value_mut(field).push(c);
        self.on_change(field);
    }

    pub fn delete_char(&mut self) {
        let field = self.focus;
        if self.value_mut(field).pop().is_some() {
            self.on_change(field);
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    fn on_change(&mut self, field: FormField) {
        if field != FormField::Date {
            self.total_hours =
                compute_total_hours(&self.time_start, &self.time_end).unwrap_or_default();
        }
    }

    /// 用已有记录填充表单并进入编辑状态
    pub fn populate(&mut self, entry: &Entry) {
        self.date = entry.date.clone();
        self.time_start = entry.time_start.clone();
        self.time_end = entry.time_end.clone();
        self.total_hours = entry.total_hours.clone();
        self.editing_id = Some(entry.id);
        self.focus = FormField::Date;
    }

    pub fn draft(&self) -> EntryDraft {
        EntryDraft::new(&self.date, &self.time_start, &self.time_end)
    }
}
