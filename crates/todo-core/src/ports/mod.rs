//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! service 層はこれらの trait だけに依存し、実装は `impls` に置きます。

pub mod clock;
pub mod event_sink;
pub mod todo_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::todo_store::{StoreError, TodoStore};
