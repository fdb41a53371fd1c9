//! Rules - status / priority の遷移ルール
//!
//! 純粋関数のみ。ストアや時刻には触れません（service 層が read → rule → write を担う）。
//!
//! # 遷移表
//! | 操作               | active                 | completed              | archived              |
//! |--------------------|------------------------|------------------------|-----------------------|
//! | `toggle_completed` | → completed（p を保持） | → active（p を復元）    | no-op                 |
//! | `toggle_archived`  | → archived（p を保持）  | no-op                  | → active（p = TOP）    |
//!
//! archived からの復帰は「やり直し」扱いで priority を TOP に戻し、
//! completed からの復帰は「再開」扱いで元の priority を復元する。

use super::priority::Priority;
use super::state::TodoState;

/// Transition は toggle の結果
///
/// `from == to` の場合は no-op（その軸では適用できない toggle）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: TodoState,
    pub to: TodoState,
}

impl Transition {
    fn noop(state: TodoState) -> Self {
        Self {
            from: state,
            to: state,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Toggle は遷移させる軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Completed,
    Archived,
}

impl Toggle {
    pub fn apply(self, state: TodoState) -> Transition {
        match self {
            Toggle::Completed => toggle_completed(state),
            Toggle::Archived => toggle_archived(state),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Toggle::Completed => "completed",
            Toggle::Archived => "archived",
        }
    }
}

/// active ↔ completed を切り替える。archived は触らない。
pub fn toggle_completed(state: TodoState) -> Transition {
    let to = match state {
        TodoState::Active { priority } => TodoState::Completed {
            priority: Some(priority),
        },
        // 保留値がない場合（patch で直接 completed にされた等）は TOP から再開
        TodoState::Completed { priority } => TodoState::Active {
            priority: priority.unwrap_or(Priority::TOP),
        },
        TodoState::Archived { .. } => return Transition::noop(state),
    };
    Transition { from: state, to }
}

/// active ↔ archived を切り替える。completed は触らない。
pub fn toggle_archived(state: TodoState) -> Transition {
    let to = match state {
        TodoState::Active { priority } => TodoState::Archived {
            priority: Some(priority),
        },
        TodoState::Archived { .. } => TodoState::Active {
            priority: Priority::TOP,
        },
        TodoState::Completed { .. } => return Transition::noop(state),
    };
    Transition { from: state, to }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn p(value: i64) -> Priority {
        Priority::new(value).unwrap()
    }

    #[rstest]
    #[case::top(1)]
    #[case::middle(2)]
    #[case::low(17)]
    fn completed_round_trip_restores_priority(#[case] value: i64) {
        let start = TodoState::active(p(value));
        let once = toggle_completed(start);
        assert_eq!(once.to, TodoState::Completed { priority: Some(p(value)) });

        let twice = toggle_completed(once.to);
        assert_eq!(twice.to, start);
    }

    #[rstest]
    #[case::top(1)]
    #[case::middle(2)]
    #[case::low(17)]
    fn archived_round_trip_resets_priority(#[case] value: i64) {
        let start = TodoState::active(p(value));
        let once = toggle_archived(start);
        assert_eq!(once.to, TodoState::Archived { priority: Some(p(value)) });

        let twice = toggle_archived(once.to);
        assert_eq!(twice.to, TodoState::active(Priority::TOP));
    }

    #[rstest]
    #[case::with_priority(Some(3))]
    #[case::without_priority(None)]
    fn toggle_completed_on_archived_is_noop(#[case] priority: Option<i64>) {
        let state = TodoState::Archived {
            priority: priority.map(p),
        };
        let t = toggle_completed(state);
        assert!(t.is_noop());
        assert_eq!(t.to, state);
    }

    #[rstest]
    #[case::with_priority(Some(3))]
    #[case::without_priority(None)]
    fn toggle_archived_on_completed_is_noop(#[case] priority: Option<i64>) {
        let state = TodoState::Completed {
            priority: priority.map(p),
        };
        let t = toggle_archived(state);
        assert!(t.is_noop());
        assert_eq!(t.to, state);
    }

    #[test]
    fn completed_without_suspended_priority_resumes_at_top() {
        let t = toggle_completed(TodoState::Completed { priority: None });
        assert_eq!(t.to, TodoState::active(Priority::TOP));
        assert!(!t.is_noop());
    }

    #[test]
    fn toggle_enum_dispatches() {
        let start = TodoState::active(p(4));
        assert_eq!(Toggle::Completed.apply(start), toggle_completed(start));
        assert_eq!(Toggle::Archived.apply(start), toggle_archived(start));
        assert_eq!(Toggle::Archived.as_str(), "archived");
    }

    #[test]
    fn transition_records_origin() {
        let start = TodoState::active(p(2));
        let t = toggle_archived(start);
        assert_eq!(t.from, start);
        assert!(!t.is_noop());
    }
}
