//! EventSink の実装

use crate::domain::{TodoEvent, TodoState};
use crate::ports::EventSink;

/// NoopEventSink は何もしない
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &TodoEvent) {}
}

/// TracingEventSink はイベントを `tracing` の info ログとして出す
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &TodoEvent) {
        match event {
            TodoEvent::Created { id, state } | TodoEvent::Updated { id, state } => {
                tracing::info!(
                    event = event.name(),
                    todo_id = %id,
                    status = %state.status(),
                    priority = priority_field(state),
                    "todo event"
                );
            }
            TodoEvent::Toggled { id, from, to } => {
                tracing::info!(
                    event = event.name(),
                    todo_id = %id,
                    from = %from.status(),
                    to = %to.status(),
                    priority = priority_field(to),
                    "todo event"
                );
            }
            TodoEvent::Deleted { id } => {
                tracing::info!(event = event.name(), todo_id = %id, "todo event");
            }
        }
    }
}

fn priority_field(state: &TodoState) -> Option<u32> {
    state.priority().map(|p| p.get())
}
