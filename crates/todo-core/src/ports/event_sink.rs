//! EventSink port - イベント記録の抽象化
//!
//! # 実装
//! - NoopEventSink: 何もしない
//! - TracingEventSink: `tracing` に構造化ログとして出す

use crate::domain::TodoEvent;

/// EventSink はドメインイベントを記録
///
/// 記録の失敗で service の操作を失敗させないため、戻り値は持ちません。
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &TodoEvent);
}
