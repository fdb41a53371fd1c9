//! TodoService - read → rule → write の手順をまとめる薄い層
//!
//! # 責務
//! - 入力の検証（タイトル、priority）
//! - タイムスタンプの設定（`Clock` から取得）
//! - rule engine の適用と結果の書き込み
//! - 書き込み成功後のイベント発行
//!
//! not-found は `Ok(None)` / `Ok(false)`。ストレージのエラーは `TodoError::Store` で伝播。

use std::sync::Arc;

use crate::domain::{
    NewTodo, Result, Todo, TodoEvent, TodoId, TodoPatch, TodoStatus, Toggle,
};
use crate::impls::NoopEventSink;
use crate::ports::{Clock, EventSink, SystemClock, TodoStore};

/// TodoService は todo の操作 API
///
/// # 使用例
/// ```ignore
/// let service = TodoService::new(Arc::new(InMemoryTodoStore::new()));
/// let todo = service.create(NewTodo::new("buy milk")).await?;
/// let done = service.toggle_completed(todo.id).await?;
/// ```
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

impl TodoService {
    /// SystemClock と NoopEventSink で作成
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// 新しい todo を active で作成
    #[tracing::instrument(level = "debug", skip_all, err)]
    pub async fn create(&self, new: NewTodo) -> Result<Todo> {
        let draft = new.into_draft(self.clock.now())?;
        let todo = self.store.insert(draft).await?;
        tracing::debug!(todo_id = %todo.id, "created todo");
        self.events.emit(&TodoEvent::Created {
            id: todo.id,
            state: todo.state,
        });
        Ok(todo)
    }

    pub async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        Ok(self.store.get(id).await?)
    }

    /// All todos ordered by id.
    pub async fn list(&self) -> Result<Vec<Todo>> {
        let mut todos = self.store.all().await?;
        todos.sort_by_key(|todo| todo.id);
        Ok(todos)
    }

    /// Todos with the given status.
    ///
    /// active は priority 昇順（同順位は id 順）、それ以外は id 順。
    pub async fn list_by_status(&self, status: TodoStatus) -> Result<Vec<Todo>> {
        let mut todos: Vec<Todo> = self
            .list()
            .await?
            .into_iter()
            .filter(|todo| todo.status() == status)
            .collect();
        if status == TodoStatus::Active {
            todos.sort_by_key(|todo| (todo.priority(), todo.id));
        }
        Ok(todos)
    }

    /// 任意フィールドの更新
    ///
    /// status を直接変更しても priority の自動調整はしない（`TodoPatch` 参照）。
    /// 空の patch は書き込みも `updated_at` の更新も行わない。
    #[tracing::instrument(level = "debug", skip(self, patch), fields(todo_id = %id), err)]
    pub async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>> {
        let Some(mut todo) = self.store.get(id).await? else {
            tracing::debug!("todo not found");
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(todo));
        }

        patch.apply(&mut todo)?;
        todo.touch(self.clock.now());
        let Some(todo) = self.store.update(todo).await? else {
            return Ok(None);
        };
        self.events.emit(&TodoEvent::Updated {
            id: todo.id,
            state: todo.state,
        });
        Ok(Some(todo))
    }

    /// active ↔ completed（archived は no-op）
    pub async fn toggle_completed(&self, id: TodoId) -> Result<Option<Todo>> {
        self.toggle(id, Toggle::Completed).await
    }

    /// active ↔ archived（completed は no-op、archived からの復帰は priority = 1）
    pub async fn toggle_archived(&self, id: TodoId) -> Result<Option<Todo>> {
        self.toggle(id, Toggle::Archived).await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(todo_id = %id, axis = toggle.as_str()), err)]
    async fn toggle(&self, id: TodoId, toggle: Toggle) -> Result<Option<Todo>> {
        let Some(mut todo) = self.store.get(id).await? else {
            tracing::debug!("todo not found");
            return Ok(None);
        };

        let transition = toggle.apply(todo.state);
        if transition.is_noop() {
            tracing::debug!(status = %todo.status(), "toggle not applicable, leaving todo unchanged");
            return Ok(Some(todo));
        }

        todo.state = transition.to;
        todo.touch(self.clock.now());
        let Some(todo) = self.store.update(todo).await? else {
            return Ok(None);
        };
        self.events.emit(&TodoEvent::Toggled {
            id: todo.id,
            from: transition.from,
            to: transition.to,
        });
        Ok(Some(todo))
    }

    /// 明示的な削除。存在しなければ `false`。
    #[tracing::instrument(level = "debug", skip(self), fields(todo_id = %id), err)]
    pub async fn delete(&self, id: TodoId) -> Result<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            self.events.emit(&TodoEvent::Deleted { id });
        }
        Ok(deleted)
    }
}
