use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::{HistoryStore, NewHistoryEntry, Page};
use crate::models::history::HistoryEntry;

/// Process-local history, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    entries: RwLock<Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, AppError> {
        let entry = entry.into_entry(Uuid::new_v4());
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self, page: Page) -> Result<Vec<HistoryEntry>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<HistoryEntry>, AppError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|e| e.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;

    fn new_entry(primary: &str) -> NewHistoryEntry {
        NewHistoryEntry {
            skills: "python, math".to_string(),
            interests: "ai".to_string(),
            career_mode: "growth".to_string(),
            risk_preference: "medium".to_string(),
            primary_career: primary.to_string(),
            backup_career: "Data Scientist".to_string(),
            primary_score: 70.0,
            backup_score: 65.0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_append_assigns_unique_ids() {
        let store = MemoryHistoryStore::new();
        let a = store.append(new_entry("A")).await.unwrap();
        let b = store.append(new_entry("B")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paged() {
        let store = MemoryHistoryStore::new();
        for name in ["first", "second", "third"] {
            store.append(new_entry(name)).await.unwrap();
        }

        let all = store.list(Page::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|e| e.primary_career.as_str()).collect();
        assert_eq!(names, vec!["third", "second", "first"]);

        let page = store.list(Page::new(Some(1), Some(1))).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].primary_career, "second");
    }

    #[tokio::test]
    async fn test_delete_twice_reports_missing_second_time() {
        let store = MemoryHistoryStore::new();
        let entry = store.append(new_entry("A")).await.unwrap();
        assert!(store.delete(entry.id).await.unwrap());
        assert!(!store.delete(entry.id).await.unwrap());
        assert!(store.get(entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_leaves_other_entries_untouched() {
        let store = MemoryHistoryStore::new();
        let keep = store.append(new_entry("keep")).await.unwrap();
        let removed = store.append(new_entry("drop")).await.unwrap();
        store.delete(removed.id).await.unwrap();
        assert_eq!(store.get(keep.id).await.unwrap(), Some(keep));
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_recorded() {
        let store = Arc::new(MemoryHistoryStore::new());
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.append(new_entry(&format!("career-{i}"))).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        let all = store.list(Page::new(Some(100), None)).await.unwrap();
        assert_eq!(all.len(), 16);
    }
}
