//! JsonFileTodoStore - JSON ファイル 1 つに全 todo を保存するストア
//!
//! # ファイル形式
//! ```json
//! { "next_id": 3, "todos": [ { "id": 1, "title": "...", "status": "active", "priority": 1, ... } ] }
//! ```
//!
//! # 実装詳細
//! - 操作ごとにファイルを読み込み、変更があれば書き戻す
//! - 書き込みは一時ファイル + fsync + rename（途中状態のファイルを残さない、失敗時は一時ファイルを消す）
//! - ファイルが存在しなければ空のストアとして扱う
//! - 同一プロセス内の操作は Mutex で直列化する

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::{Todo, TodoDraft, TodoId};
use crate::ports::{StoreError, TodoStore};

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    next_id: TodoId,
    #[serde(default)]
    todos: Vec<Todo>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            next_id: TodoId::new(1),
            todos: Vec::new(),
        }
    }
}

impl Document {
    /// 読み込んだ内容の整合性チェック
    fn validate(mut self) -> Result<Self, StoreError> {
        if self.next_id == TodoId::new(0) {
            return Err(StoreError::Corrupted("next_id must be at least 1".to_string()));
        }
        self.todos.sort_by_key(|todo| todo.id);
        if let Some(pair) = self.todos.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(StoreError::Corrupted(format!("duplicate id {}", pair[0].id)));
        }
        if let Some(last) = self.todos.last()
            && last.id >= self.next_id
        {
            return Err(StoreError::Corrupted(format!(
                "next_id {} is not greater than existing id {}",
                self.next_id, last.id
            )));
        }
        Ok(self)
    }

    fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.binary_search_by_key(&id, |todo| todo.id).ok()
    }
}

/// JsonFileTodoStore は JSON ファイルをバックエンドにしたストア
pub struct JsonFileTodoStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileTodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Document::default());
            }
            Err(e) => return Err(e.into()),
        };
        let document: Document = serde_json::from_slice(&bytes)?;
        document.validate()
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.tmp_path();
        if let Err(e) = self.replace_with(&tmp, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            tracing::warn!(path = %self.path.display(), error = %e, "failed to save todo store");
            return Err(e.into());
        }
        tracing::trace!(path = %self.path.display(), todos = document.todos.len(), "saved todo store");
        Ok(())
    }

    async fn replace_with(&self, tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(tmp, &self.path).await
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "todos.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TodoStore for JsonFileTodoStore {
    async fn all(&self) -> Result<Vec<Todo>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.todos)
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let _guard = self.lock.lock().await;
        let document = self.load().await?;
        Ok(document.position(id).map(|i| document.todos[i].clone()))
    }

    async fn insert(&self, draft: TodoDraft) -> Result<Todo, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let id = document.next_id;
        document.next_id = id
            .next()
            .ok_or_else(|| StoreError::Corrupted(format!("todo ids exhausted at {id}")))?;
        let todo = Todo::from_draft(id, draft);
        // 採番は単調増加なので末尾に追加すれば id 順が保たれる
        document.todos.push(todo.clone());
        self.save(&document).await?;
        Ok(todo)
    }

    async fn update(&self, todo: Todo) -> Result<Option<Todo>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let Some(index) = document.position(todo.id) else {
            return Ok(None);
        };
        document.todos[index] = todo.clone();
        self.save(&document).await?;
        Ok(Some(todo))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let Some(index) = document.position(id) else {
            return Ok(false);
        };
        document.todos.remove(index);
        self.save(&document).await?;
        Ok(true)
    }
}
