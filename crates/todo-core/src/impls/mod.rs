//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryTodoStore**: メモリ上のストア（開発・テスト用）
//! - **JsonFileTodoStore**: JSON ファイル 1 つに保存するストア
//! - **NoopEventSink / TracingEventSink**: イベントの捨て先 / ログ出力

pub mod event_sinks;
pub mod inmem_store;
pub mod json_store;

pub use self::event_sinks::{NoopEventSink, TracingEventSink};
pub use self::inmem_store::InMemoryTodoStore;
pub use self::json_store::JsonFileTodoStore;
