use taskpad_core::{EditState, Task, TaskForm, TaskId, TaskValidationError};

#[test]
fn task_new_sets_defaults_and_keeps_title_untrimmed() {
    let task = Task::new(TaskId(7), "  Buy milk ", "").unwrap();

    assert_eq!(task.id, TaskId(7));
    assert_eq!(task.title, "  Buy milk ");
    assert_eq!(task.desc, "");
    assert!(!task.done);
}

#[test]
fn task_new_rejects_blank_titles() {
    assert_eq!(
        Task::new(TaskId(1), "", "desc").unwrap_err(),
        TaskValidationError::EmptyTitle
    );
    assert_eq!(
        Task::new(TaskId(1), " \t\n", "desc").unwrap_err(),
        TaskValidationError::EmptyTitle
    );
}

#[test]
fn replace_content_keeps_id_and_done() {
    let mut task = Task::new(TaskId(3), "draft", "old").unwrap();
    task.toggle();

    task.replace_content("final", "new").unwrap();
    assert_eq!(task.id, TaskId(3));
    assert!(task.done);
    assert_eq!(task.title, "final");
    assert_eq!(task.desc, "new");

    let err = task.replace_content("   ", "ignored").unwrap_err();
    assert_eq!(err, TaskValidationError::EmptyTitle);
    assert_eq!(task.title, "final");
    assert_eq!(task.desc, "new");
}

#[test]
fn toggle_twice_restores_done() {
    let mut task = Task::new(TaskId(1), "t", "").unwrap();
    task.toggle();
    assert!(task.done);
    task.toggle();
    assert!(!task.done);
}

#[test]
fn task_serialization_uses_stored_record_fields() {
    let mut task = Task::new(TaskId(1_700_000_000_000), "Buy milk", "2 liters").unwrap();
    task.done = true;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 1_700_000_000_000_i64,
            "title": "Buy milk",
            "desc": "2 liters",
            "done": true
        })
    );

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn form_and_edit_state_helpers() {
    let task = Task::new(TaskId(9), "title", "desc").unwrap();
    let mut form = TaskForm::from_task(&task);
    assert_eq!(form.title, "title");
    assert_eq!(form.desc, "desc");

    form.clear();
    assert!(form.is_empty());

    assert_eq!(EditState::default(), EditState::Idle);
    assert_eq!(EditState::Idle.target(), None);
    assert_eq!(EditState::Editing(TaskId(9)).target(), Some(TaskId(9)));
    assert!(EditState::Editing(TaskId(9)).is_editing());
}
