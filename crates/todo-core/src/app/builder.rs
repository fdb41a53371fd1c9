//! TodoServiceBuilder - service の構築とワイヤリング
//!
//! # 方針
//! - ストレージは `StorageBackend` で明示的に選ぶ（実行環境による暗黙の切り替えはしない）
//! - 起動時検証（Fail-fast）: 矛盾した指定は build() で BuildError にする

use std::sync::Arc;

use super::config::{AppConfig, ConfigError, StorageBackend};
use super::service::TodoService;
use crate::impls::{InMemoryTodoStore, JsonFileTodoStore, NoopEventSink, TracingEventSink};
use crate::ports::{Clock, EventSink, SystemClock, TodoStore};

/// TodoServiceBuilder は TodoService を構築
///
/// # 使用例
/// ```ignore
/// let service = TodoServiceBuilder::from_config(&config)?
///     .clock(Arc::new(SystemClock))
///     .build()?;
/// ```
pub struct TodoServiceBuilder {
    backend: Option<StorageBackend>,
    store: Option<Arc<dyn TodoStore>>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

/// BuildError は service 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("both a storage backend and a custom store were given; pick one")]
    ConflictingStorage,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TodoServiceBuilder {
    /// デフォルト: SystemClock, NoopEventSink, ストレージ未指定（build 時にメモリ）
    pub fn new() -> Self {
        Self {
            backend: None,
            store: None,
            clock: Arc::new(SystemClock),
            events: Arc::new(NoopEventSink),
        }
    }

    /// 設定からバックエンドとイベントログの有無を決める
    pub fn from_config(config: &AppConfig) -> Result<Self, BuildError> {
        let events: Arc<dyn EventSink> = if config.log_events {
            Arc::new(TracingEventSink)
        } else {
            Arc::new(NoopEventSink)
        };
        Ok(Self::new()
            .backend(config.storage_backend()?)
            .event_sink(events))
    }

    pub fn backend(mut self, backend: StorageBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// 任意の TodoStore 実装を直接注入する
    pub fn store(mut self, store: Arc<dyn TodoStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// # 検証
    /// - backend と store の両方が指定されていれば ConflictingStorage
    pub fn build(self) -> Result<TodoService, BuildError> {
        let store: Arc<dyn TodoStore> = match (self.backend, self.store) {
            (Some(_), Some(_)) => return Err(BuildError::ConflictingStorage),
            (None, Some(store)) => store,
            (None, None) | (Some(StorageBackend::Memory), None) => {
                Arc::new(InMemoryTodoStore::new())
            }
            (Some(StorageBackend::JsonFile(path)), None) => {
                tracing::debug!(path = %path.display(), "using json file storage");
                Arc::new(JsonFileTodoStore::new(path))
            }
        };
        Ok(TodoService::new(store)
            .with_clock(self.clock)
            .with_event_sink(self.events))
    }
}

impl Default for TodoServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
