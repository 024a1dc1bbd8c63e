use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::errors::AppResult;
use crate::models::{Entry, EntryDraft};

#[cfg(test)]
pub use memory::MemoryKeyValueStore;

/// 键值持久层
pub trait KeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// 基于目录的键值存储，每个键对应一个 `<key>.json` 文件
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 先写临时文件再重命名，整体覆盖
    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }
}

/// 工时记录集合，最新的在前
pub struct EntryStore<S: KeyValueStore> {
    backend: S,
    key: String,
    max_entries: usize,
    entries: Vec<Entry>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// 创建并立即从持久层加载
    pub fn open(backend: S, key: impl Into<String>, max_entries: usize) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
            max_entries,
            entries: Vec::new(),
        };
        store.entries = store.load();
        store.entries.truncate(store.max_entries);
        info!(count = store.entries.len(), key = %store.key, "loaded entries");
        store
    }

    /// 读取持久化的集合；不存在或格式错误时返回空集合
    pub fn load(&self) -> Vec<Entry> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("failed to read {}: {e}", self.key);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("ignoring malformed data under {}: {e}", self.key);
                Vec::new()
            }
        }
    }

    /// 序列化整个集合并覆盖写入
    pub fn save(&mut self) -> AppResult<()> {
        let payload = serde_json::to_string(&self.entries)?;
        self.backend.set(&self.key, &payload)?;
        info!(count = self.entries.len(), "saved entries");
        Ok(())
    }

    /// 插入到最前面，超出上限时丢弃最旧的记录
    pub fn add(&mut self, entry: Entry) -> AppResult<()> {
        self.entries.insert(0, entry);
        self.entries.truncate(self.max_entries);
        self.save()
    }

    /// 替换指定 ID 的记录；找不到时静默忽略，返回是否更新
    pub fn update(&mut self, id: u64, draft: EntryDraft) -> AppResult<bool> {
        let Some(slot) = self.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        *slot = Entry::from_draft(id, draft);
        self.save()?;
        Ok(true)
    }

    /// 删除指定 ID 的记录；找不到时静默忽略，返回是否删除
    pub fn remove(&mut self, id: u64) -> AppResult<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn find(&self, id: u64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "workRecords";

    fn entry(id: u64) -> Entry {
        Entry::from_draft(id, EntryDraft::new("2025-06-01", "09:00", "17:00"))
    }

    fn memory_store() -> EntryStore<MemoryKeyValueStore> {
        EntryStore::open(MemoryKeyValueStore::default(), KEY, 120)
    }

    #[test]
    fn test_load_absent_is_empty() {
        let store = memory_store();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let mut backend = MemoryKeyValueStore::default();
        backend.set(KEY, "{not json").unwrap();
        let store = EntryStore::open(backend, KEY, 120);
        assert!(store.is_empty());

        let mut backend = MemoryKeyValueStore::default();
        backend.set(KEY, r#"{"id": 1}"#).unwrap();
        let store = EntryStore::open(backend, KEY, 120);
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_truncates_to_lowered_cap() {
        let mut backend = MemoryKeyValueStore::default();
        let stored: Vec<Entry> = (1..=5).rev().map(entry).collect();
        backend
            .set(KEY, &serde_json::to_string(&stored).unwrap())
            .unwrap();

        let store = EntryStore::open(backend, KEY, 3);
        assert_eq!(store.len(), 3);
        let ids: Vec<u64> = store.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[test]
    fn test_add_prepends_and_round_trips() {
        let mut store = memory_store();
        store.add(entry(1)).unwrap();
        store.add(entry(2)).unwrap();

        let ids: Vec<u64> = store.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(store.load(), store.entries());
    }

    #[test]
    fn test_add_evicts_oldest_over_cap() {
        let mut store = memory_store();
        for id in 1..=121 {
            store.add(entry(id)).unwrap();
        }
        assert_eq!(store.len(), 120);
        assert_eq!(store.entries().first().map(|e| e.id), Some(121));
        assert_eq!(store.entries().last().map(|e| e.id), Some(2));
        assert!(store.find(1).is_none());
        assert_eq!(store.load().len(), 120);
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let mut store = memory_store();
        for id in 1..=3 {
            store.add(entry(id)).unwrap();
        }
        let updated = store
            .update(2, EntryDraft::new("2025-06-02", "22:00", "02:00"))
            .unwrap();
        assert!(updated);

        let e = &store.entries()[1];
        assert_eq!(e.id, 2);
        assert_eq!(e.date, "2025-06-02");
        assert_eq!(e.total_hours, "4.00");
        assert_eq!(store.load(), store.entries());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = memory_store();
        store.add(entry(1)).unwrap();
        let before = store.backend().get(KEY).unwrap();

        let updated = store
            .update(42, EntryDraft::new("2030-01-01", "01:00", "02:00"))
            .unwrap();
        assert!(!updated);
        assert_eq!(store.backend().get(KEY).unwrap(), before);
        assert_eq!(store.entries(), &[entry(1)]);
    }

    #[test]
    fn test_remove() {
        let mut store = memory_store();
        store.add(entry(1)).unwrap();
        store.add(entry(2)).unwrap();

        assert!(!store.remove(99).unwrap());
        assert_eq!(store.len(), 2);

        assert!(store.remove(1).unwrap());
        assert_eq!(store.entries(), &[entry(2)]);
        assert_eq!(store.load(), vec![entry(2)]);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = EntryStore::open(FileKeyValueStore::new(dir.path()), KEY, 120);
            store.add(entry(7)).unwrap();
        }
        let store = EntryStore::open(FileKeyValueStore::new(dir.path()), KEY, 120);
        assert_eq!(store.entries(), &[entry(7)]);
        assert!(dir.path().join("workRecords.json").exists());
        assert!(!dir.path().join("workRecords.json.tmp").exists());
    }

    #[test]
    fn test_file_store_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("workRecords.json"), "garbage").unwrap();
        let store = EntryStore::open(FileKeyValueStore::new(dir.path()), KEY, 120);
        assert!(store.is_empty());
    }
}
