//! End-to-end toggle scenarios through TodoService.

use std::sync::Arc;

use rstest::rstest;
use todo_core::impls::{InMemoryTodoStore, JsonFileTodoStore};
use todo_core::ports::TodoStore;
use todo_core::{NewTodo, Priority, TodoService, TodoState};

fn p(value: i64) -> Priority {
    Priority::new(value).unwrap()
}

fn memory_service() -> TodoService {
    TodoService::new(Arc::new(InMemoryTodoStore::new()))
}

#[rstest]
#[case::top(1)]
#[case::second(2)]
#[case::deep(9)]
#[tokio::test]
async fn complete_twice_restores_priority(#[case] priority: i64) {
    let service = memory_service();
    let todo = service
        .create(NewTodo::new("round trip").with_priority(p(priority)))
        .await
        .unwrap();

    service.toggle_completed(todo.id).await.unwrap().unwrap();
    let back = service.toggle_completed(todo.id).await.unwrap().unwrap();

    assert_eq!(back.state, TodoState::active(p(priority)));
}

#[rstest]
#[case::top(1)]
#[case::second(2)]
#[case::deep(9)]
#[tokio::test]
async fn archive_twice_resets_priority_to_top(#[case] priority: i64) {
    let service = memory_service();
    let todo = service
        .create(NewTodo::new("fresh start").with_priority(p(priority)))
        .await
        .unwrap();

    service.toggle_archived(todo.id).await.unwrap().unwrap();
    let back = service.toggle_archived(todo.id).await.unwrap().unwrap();

    assert_eq!(back.state, TodoState::active(Priority::TOP));
}

#[tokio::test]
async fn completing_an_archived_todo_changes_nothing() {
    let service = memory_service();
    let todo = service.create(NewTodo::new("a")).await.unwrap();
    let archived = service.toggle_archived(todo.id).await.unwrap().unwrap();

    let result = service.toggle_completed(todo.id).await.unwrap().unwrap();
    assert_eq!(result, archived);
    assert_eq!(service.get(todo.id).await.unwrap(), Some(archived));
}

#[tokio::test]
async fn archiving_a_completed_todo_changes_nothing() {
    let service = memory_service();
    let todo = service.create(NewTodo::new("a")).await.unwrap();
    let completed = service.toggle_completed(todo.id).await.unwrap().unwrap();

    let result = service.toggle_archived(todo.id).await.unwrap().unwrap();
    assert_eq!(result, completed);
    assert_eq!(service.get(todo.id).await.unwrap(), Some(completed));
}

#[tokio::test]
async fn create_complete_and_reactivate() {
    let service = memory_service();
    let todo = service
        .create(NewTodo::new("single").with_priority(p(1)))
        .await
        .unwrap();

    let done = service.toggle_completed(todo.id).await.unwrap().unwrap();
    assert_eq!(done.state, TodoState::Completed { priority: Some(p(1)) });

    let active = service.toggle_completed(todo.id).await.unwrap().unwrap();
    assert_eq!(active.state, TodoState::active(p(1)));
}

async fn two_todo_scenario(store: Arc<dyn TodoStore>) {
    let service = TodoService::new(store);
    let a = service
        .create(NewTodo::new("A").with_priority(p(1)))
        .await
        .unwrap();
    let b = service
        .create(NewTodo::new("B").with_priority(p(2)))
        .await
        .unwrap();

    service.toggle_completed(a.id).await.unwrap().unwrap();
    service.toggle_archived(b.id).await.unwrap().unwrap();

    let a_active = service.toggle_completed(a.id).await.unwrap().unwrap();
    assert_eq!(a_active.state, TodoState::active(p(1)));

    let b_active = service.toggle_archived(b.id).await.unwrap().unwrap();
    assert_eq!(b_active.state, TodoState::active(Priority::TOP));

    let a_again = service.toggle_completed(a.id).await.unwrap().unwrap();
    assert_eq!(a_again.state, TodoState::Completed { priority: Some(p(1)) });

    let b_again = service.toggle_archived(b.id).await.unwrap().unwrap();
    assert_eq!(b_again.state, TodoState::Archived { priority: Some(p(1)) });

    let stored = service.list().await.unwrap();
    assert_eq!(stored, vec![a_again, b_again]);
}

#[tokio::test]
async fn two_todos_follow_their_own_axis_in_memory() {
    two_todo_scenario(Arc::new(InMemoryTodoStore::new())).await;
}

#[tokio::test]
async fn two_todos_follow_their_own_axis_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    two_todo_scenario(Arc::new(JsonFileTodoStore::new(dir.path().join("todos.json")))).await;
}
