//! In-memory todo store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Todo, TodoDraft, TodoId};
use crate::ports::{StoreError, TodoStore};

/// In-memory store state.
struct InMemoryState {
    /// All todo records, ordered by id.
    records: BTreeMap<TodoId, Todo>,

    /// Next id to assign.
    next_id: TodoId,
}

impl InMemoryState {
    fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: TodoId::new(1),
        }
    }

    fn allocate_id(&mut self) -> Result<TodoId, StoreError> {
        let id = self.next_id;
        self.next_id = id
            .next()
            .ok_or_else(|| StoreError::Corrupted(format!("todo ids exhausted at {id}")))?;
        Ok(id)
    }
}

/// In-memory store (開発・テスト用)
///
/// プロセス終了で内容は消えます。`Clone` したハンドルは同じ中身を共有します。
#[derive(Clone)]
pub struct InMemoryTodoStore {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn all(&self) -> Result<Vec<Todo>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn insert(&self, draft: TodoDraft) -> Result<Todo, StoreError> {
        let mut state = self.state.lock().await;
        let id = state.allocate_id()?;
        let todo = Todo::from_draft(id, draft);
        state.records.insert(id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, StoreError> {
        let mut state = self.state.lock().await;
        let Some(slot) = state.records.get_mut(&todo.id) else {
            return Ok(None);
        };
        *slot = todo.clone();
        Ok(Some(todo))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        Ok(state.records.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTodo;
    use chrono::{TimeZone, Utc};

    fn draft(title: &str) -> TodoDraft {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        NewTodo::new(title).into_draft(now).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryTodoStore::new();
        let a = store.insert(draft("a")).await.unwrap();
        let b = store.insert(draft("b")).await.unwrap();
        assert_eq!(a.id, TodoId::new(1));
        assert_eq!(b.id, TodoId::new(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryTodoStore::new();
        let a = store.insert(draft("a")).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        let b = store.insert(draft("b")).await.unwrap();
        assert_eq!(b.id, TodoId::new(2));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryTodoStore::new();
        let handle = store.clone();
        store.insert(draft("a")).await.unwrap();
        assert!(!handle.is_empty().await);
    }

    #[tokio::test]
    async fn update_unknown_id_returns_none() {
        let store = InMemoryTodoStore::new();
        let mut todo = store.insert(draft("a")).await.unwrap();
        todo.id = TodoId::new(99);
        assert_eq!(store.update(todo).await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn exhausted_ids_fail_without_inserting() {
        let store = InMemoryTodoStore::new();
        store.state.lock().await.next_id = TodoId::new(u64::MAX);

        let result = store.insert(draft("a")).await;
        assert!(matches!(result, Err(StoreError::Corrupted(_))));
        assert!(store.is_empty().await);
        assert_eq!(store.state.lock().await.next_id, TodoId::new(u64::MAX));
    }
}
