use chrono::{Local, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// 工时记录
///
/// 序列化字段名沿用 camelCase（`timeStart`、`totalHours`），与旧版网页写入的数据兼容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: u64,
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub total_hours: String,
}

impl Entry {
    pub fn from_draft(id: u64, draft: EntryDraft) -> Self {
        Self {
            id,
            date: draft.date,
            time_start: draft.time_start,
            time_end: draft.time_end,
            total_hours: draft.total_hours,
        }
    }

    /// 表格中显示的日期 (MM/DD/YYYY)
    pub fn display_date(&self) -> String {
        format_display_date(&self.date)
    }
}

/// 表单提交的字段，`total_hours` 总是由起止时间推导
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: String,
    pub time_start: String,
    pub time_end: String,
    pub total_hours: String,
}

impl EntryDraft {
    pub fn new(date: &str, time_start: &str, time_end: &str) -> Self {
        Self {
            date: date.to_string(),
            time_start: time_start.to_string(),
            time_end: time_end.to_string(),
            total_hours: compute_total_hours(time_start, time_end).unwrap_or_default(),
        }
    }

    /// 校验必填字段及格式
    pub fn validate(&self) -> AppResult<()> {
        if self.date.is_empty() || self.time_start.is_empty() || self.time_end.is_empty() {
            return Err(AppError::MissingField);
        }
        if parse_date(&self.date).is_none() {
            return Err(AppError::InvalidDate(self.date.clone()));
        }
        for t in [&self.time_start, &self.time_end] {
            if parse_time(t).is_none() {
                return Err(AppError::InvalidTime(t.clone()));
            }
        }
        Ok(())
    }
}

/// 记录 ID 生成器
///
/// 以毫秒时间戳为基础，但保证严格递增：同一毫秒内连续创建也不会重复
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// 以已有记录中最大的 ID 为起点
    pub fn seeded(entries: &[Entry]) -> Self {
        Self {
            last: entries.iter().map(|e| e.id).max().unwrap_or(0),
        }
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_at(now)
    }

    pub fn next_at(&mut self, now_ms: u64) -> u64 {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

/// 按模板检查字符串形状：`9` 表示任意数字，其他字符必须原样匹配
fn matches_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(c, p)| match p {
            b'9' => c.is_ascii_digit(),
            _ => c == p,
        })
}

/// 仅接受补零的 YYYY-MM-DD
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !matches_shape(s, "9999-99-99") {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// 仅接受补零的 HH:MM 或 HH:MM:SS
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    if matches_shape(s, "99:99") {
        NaiveTime::parse_from_str(s, "%H:%M").ok()
    } else if matches_shape(s, "99:99:99") {
        NaiveTime::parse_from_str(s, "%H:%M:%S").ok()
    } else {
        None
    }
}

/// 计算工时（小时，保留两位小数）
///
/// 结束早于开始视为跨越午夜；起止相同为 0.00。任一字段为空或无法解析时返回 None
pub fn compute_total_hours(time_start: &str, time_end: &str) -> Option<String> {
    if time_start.is_empty() || time_end.is_empty() {
        return None;
    }
    let start = parse_time(time_start)?;
    let end = parse_time(time_end)?;
    let seconds = (end - start).num_seconds().rem_euclid(SECONDS_PER_DAY);
    Some(format!("{:.2}", seconds as f64 / 3600.0))
}

/// YYYY-MM-DD -> MM/DD/YYYY，无法解析时原样返回
pub fn format_display_date(iso: &str) -> String {
    parse_date(iso)
        .map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| iso.to_string())
}

/// 今天的日期 (YYYY-MM-DD)
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_hours_same_day() {
        assert_eq!(compute_total_hours("09:00", "17:30").as_deref(), Some("8.50"));
        assert_eq!(compute_total_hours("09:00", "09:20").as_deref(), Some("0.33"));
    }

    #[test]
    fn test_total_hours_crosses_midnight() {
        assert_eq!(compute_total_hours("22:00", "02:00").as_deref(), Some("4.00"));
        assert_eq!(compute_total_hours("23:45", "00:15").as_deref(), Some("0.50"));
    }

    #[test]
    fn test_total_hours_equal_times_is_zero() {
        assert_eq!(compute_total_hours("08:00", "08:00").as_deref(), Some("0.00"));
    }

    #[test]
    fn test_total_hours_cleared_when_missing_or_invalid() {
        assert_eq!(compute_total_hours("", "17:00"), None);
        assert_eq!(compute_total_hours("09:00", ""), None);
        assert_eq!(compute_total_hours("9am", "17:00"), None);
    }

    #[test]
    fn test_total_hours_accepts_seconds() {
        assert_eq!(
            compute_total_hours("09:00:00", "10:30:00").as_deref(),
            Some("1.50")
        );
    }

    #[test]
    fn test_unpadded_fields_are_rejected() {
        assert_eq!(compute_total_hours("09:00", "17:1"), None);
        assert_eq!(compute_total_hours("9:5", "17:00"), None);
        assert!(parse_date("2025-1-2").is_none());
        assert!(parse_time("17:1").is_none());
        assert!(parse_time("09:00:0").is_none());
        assert!(matches!(
            EntryDraft::new("2025-01-02", "9:5", "17:10").validate(),
            Err(AppError::InvalidTime(_))
        ));
        assert!(matches!(
            EntryDraft::new("2025-01-02", "09:05", "17:1").validate(),
            Err(AppError::InvalidTime(_))
        ));
        assert!(matches!(
            EntryDraft::new("2025-1-2", "09:00", "17:00").validate(),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_display_date() {
        assert_eq!(format_display_date("2025-03-07"), "03/07/2025");
        assert_eq!(format_display_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn test_draft_validation() {
        assert!(EntryDraft::new("2025-01-02", "09:00", "17:00").validate().is_ok());
        assert!(matches!(
            EntryDraft::new("", "09:00", "17:00").validate(),
            Err(AppError::MissingField)
        ));
        assert!(matches!(
            EntryDraft::new("2025-01-02", "09:00", "").validate(),
            Err(AppError::MissingField)
        ));
        assert!(matches!(
            EntryDraft::new("2025-13-02", "09:00", "17:00").validate(),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            EntryDraft::new("2025-01-02", "25:00", "17:00").validate(),
            Err(AppError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_draft_derives_hours() {
        let draft = EntryDraft::new("2025-01-02", "21:00", "01:30");
        assert_eq!(draft.total_hours, "4.50");
    }

    #[test]
    fn test_id_generator_strictly_increasing() {
        let mut ids = IdGenerator::default();
        let a = ids.next_at(1_000);
        let b = ids.next_at(1_000);
        let c = ids.next_at(999);
        let d = ids.next_at(5_000);
        assert_eq!((a, b, c, d), (1_000, 1_001, 1_002, 5_000));
    }

    #[test]
    fn test_id_generator_seeded_past_existing() {
        let existing = vec![Entry::from_draft(
            9_999,
            EntryDraft::new("2025-01-02", "09:00", "10:00"),
        )];
        let mut ids = IdGenerator::seeded(&existing);
        assert_eq!(ids.next_at(10), 10_000);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let entry = Entry::from_draft(1, EntryDraft::new("2025-01-02", "09:00", "10:00"));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":1,"date":"2025-01-02","timeStart":"09:00","timeEnd":"10:00","totalHours":"1.00"}"#
        );
    }
}
