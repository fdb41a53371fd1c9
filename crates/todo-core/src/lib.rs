//! todo-core
//!
//! Core building blocks for a personal todo list.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, priority, state, todo, rules, events, errors）
//! - **ports**: 抽象化レイヤー（TodoStore, Clock, EventSink）
//! - **impls**: 実装（InMemoryTodoStore, JsonFileTodoStore, event sinks）
//! - **app**: アプリケーションロジック（TodoService, builder, config）
//!
//! status / priority の遷移ルールは `domain::rules` にあり、
//! それ以外はすべてそのルールを読み書きで包むための配線です。

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{AppConfig, TodoService, TodoServiceBuilder};
pub use domain::{NewTodo, Priority, Todo, TodoError, TodoId, TodoPatch, TodoState, TodoStatus};
