//! Task list controller.
//!
//! # Responsibility
//! - Own the task collection, the shared input form and the edit marker.
//! - Persist the full collection after every mutation.
//! - Report outcomes through the notification surface.
//!
//! # Invariants
//! - Construction hydrates from storage exactly once; no operation can run
//!   on an uninitialized controller.
//! - The in-memory collection only changes after the store accepted it, so
//!   memory and storage never diverge.
//! - Insertion order is preserved; the controller never re-sorts.
//! - At most one task is under edit at a time.

use crate::model::ids::TaskIdAllocator;
use crate::model::task::{validate_title, EditState, Task, TaskForm, TaskId, TaskValidationError};
use crate::notify::{MessageCatalog, Notifier};
use crate::repo::task_store::{StoreError, TaskStore};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Controller operation failure.
#[derive(Debug)]
pub enum ControllerError {
    /// Title is empty after trimming.
    Validation(TaskValidationError),
    /// The task under edit disappeared before the update was submitted.
    NotFound(TaskId),
    /// Storage rejected a load or save.
    Store(StoreError),
    /// No further task ids can be allocated.
    IdExhausted,
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::IdExhausted => write!(f, "task id space exhausted"),
        }
    }
}

impl Error for ControllerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::IdExhausted => None,
        }
    }
}

impl From<TaskValidationError> for ControllerError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ControllerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Single-session state container for the task list screen.
pub struct TaskListController<S: TaskStore, N: Notifier> {
    store: S,
    notifier: N,
    catalog: MessageCatalog,
    tasks: Vec<Task>,
    edit: EditState,
    form: TaskForm,
    ids: TaskIdAllocator,
}

impl<S: TaskStore, N: Notifier> TaskListController<S, N> {
    /// Hydrates a controller from `store`.
    ///
    /// Starts empty when nothing was persisted yet.
    ///
    /// # Errors
    /// - Returns `ControllerError::Store` when the persisted payload cannot
    ///   be read or decoded.
    pub fn initialize(store: S, notifier: N, catalog: MessageCatalog) -> ControllerResult<Self> {
        let tasks = match store.load() {
            Ok(tasks) => tasks.unwrap_or_default(),
            Err(err) => {
                error!("event=controller_init module=service status=error error={err}");
                return Err(err.into());
            }
        };
        let ids = TaskIdAllocator::seeded_from(&tasks);
        info!(
            "event=controller_init module=service status=ok count={}",
            tasks.len()
        );

        Ok(Self {
            store,
            notifier,
            catalog,
            tasks,
            edit: EditState::Idle,
            form: TaskForm::default(),
            ids,
        })
    }

    /// Adds a task, or updates the one under edit.
    ///
    /// Returns the id of the created or updated task.
    ///
    /// # Contract
    /// - Empty/whitespace titles notify an error and change nothing.
    /// - While editing, only `title`/`desc` of the target are replaced.
    /// - On success the form is cleared and editing ends.
    /// - On storage failure nothing changes and the error is surfaced.
    pub fn add_or_update(&mut self, title: &str, desc: &str) -> ControllerResult<TaskId> {
        if let Err(err) = validate_title(title) {
            warn!("event=task_submit module=service status=rejected reason=empty_title");
            self.notifier.notify_error(&self.catalog.empty_title);
            return Err(err.into());
        }

        match self.edit {
            EditState::Editing(id) => self.update_task(id, title, desc),
            EditState::Idle => self.add_task(title, desc),
        }
    }

    /// Submits the current form contents through `add_or_update`.
    pub fn submit(&mut self) -> ControllerResult<TaskId> {
        let TaskForm { title, desc } = self.form.clone();
        self.add_or_update(&title, &desc)
    }

    /// Flips `done` on the task with `id`.
    ///
    /// Returns `Ok(false)` for unknown ids; stale references are not errors.
    pub fn toggle(&mut self, id: TaskId) -> ControllerResult<bool> {
        let Some(index) = self.position(id) else {
            debug!("event=task_toggle module=service status=skipped task_id={id}");
            return Ok(false);
        };

        let mut next = self.tasks.clone();
        next[index].toggle();
        let done = next[index].done;
        self.commit(next, "task_toggle")?;

        info!("event=task_toggle module=service status=ok task_id={id} done={done}");
        Ok(true)
    }

    /// Puts the task with `id` under edit and loads it into the form.
    ///
    /// Returns `false` and changes nothing for unknown ids.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        let Some(task) = self.task(id) else {
            debug!("event=task_edit_begin module=service status=skipped task_id={id}");
            return false;
        };

        let form = TaskForm::from_task(task);
        self.form = form;
        self.edit = EditState::Editing(id);
        debug!("event=task_edit_begin module=service status=ok task_id={id}");
        true
    }

    /// Leaves edit mode and clears the form, whatever the prior state.
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.edit.target() {
            debug!("event=task_edit_cancel module=service status=ok task_id={id}");
        }
        self.reset_form();
    }

    /// Deletes the task with `id` after the user confirms.
    ///
    /// Returns `Ok(true)` when a task was removed, `Ok(false)` when the user
    /// declined or the id is unknown (no prompt is shown for unknown ids).
    pub fn delete(&mut self, id: TaskId) -> ControllerResult<bool> {
        let Some(index) = self.position(id) else {
            debug!("event=task_delete module=service status=skipped task_id={id}");
            return Ok(false);
        };

        if !self.notifier.confirm(&self.catalog.delete_confirm) {
            debug!("event=task_delete module=service status=declined task_id={id}");
            return Ok(false);
        }

        let mut next = self.tasks.clone();
        next.remove(index);
        self.commit(next, "task_delete")?;

        if self.edit.target() == Some(id) {
            self.reset_form();
        }
        self.notifier.notify_success(&self.catalog.task_deleted);
        info!(
            "event=task_delete module=service status=ok task_id={id} count={}",
            self.tasks.len()
        );
        Ok(true)
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the list has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.done).count()
    }

    pub fn done_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.done).count()
    }

    pub fn edit_state(&self) -> EditState {
        self.edit
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    /// Mutable access for presentation layers binding input widgets.
    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Tears the controller down, returning its collaborators.
    pub fn into_parts(self) -> (S, N) {
        (self.store, self.notifier)
    }

    fn add_task(&mut self, title: &str, desc: &str) -> ControllerResult<TaskId> {
        let Some(id) = self.ids.peek() else {
            error!("event=task_add module=service status=error error_code=id_exhausted");
            self.notifier.notify_error(&self.catalog.id_exhausted);
            return Err(ControllerError::IdExhausted);
        };
        let task = Task::new(id, title, desc)?;

        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next, "task_add")?;
        self.ids.allocate();

        self.notifier.notify_success(&self.catalog.task_added);
        self.reset_form();
        info!(
            "event=task_add module=service status=ok task_id={id} count={}",
            self.tasks.len()
        );
        Ok(id)
    }

    fn update_task(&mut self, id: TaskId, title: &str, desc: &str) -> ControllerResult<TaskId> {
        let Some(index) = self.position(id) else {
            warn!("event=task_update module=service status=error error_code=edit_target_missing task_id={id}");
            self.notifier.notify_error(&self.catalog.edit_target_missing);
            self.reset_form();
            return Err(ControllerError::NotFound(id));
        };

        let mut next = self.tasks.clone();
        next[index].replace_content(title, desc)?;
        self.commit(next, "task_update")?;

        self.notifier.notify_success(&self.catalog.task_updated);
        self.reset_form();
        info!("event=task_update module=service status=ok task_id={id}");
        Ok(id)
    }

    /// Persists `next` and adopts it only if the store accepted it.
    fn commit(&mut self, next: Vec<Task>, event: &'static str) -> ControllerResult<()> {
        if let Err(err) = self.store.save(&next) {
            error!(
                "event={event} module=service status=error error_code=store_save_failed error={err}"
            );
            self.notifier.notify_error(&self.catalog.storage_failed);
            return Err(err.into());
        }
        self.tasks = next;
        Ok(())
    }

    fn reset_form(&mut self) {
        self.form.clear();
        self.edit = EditState::Idle;
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{ControllerError, TaskListController};
    use crate::model::task::{EditState, Task, TaskId};
    use crate::notify::{MessageCatalog, Notification, RecordingNotifier};
    use crate::repo::task_store::MemoryTaskStore;

    #[test]
    fn update_of_vanished_edit_target_reports_not_found() {
        let store = MemoryTaskStore::with_tasks(&[Task::new(TaskId(1), "a", "").unwrap()]).unwrap();
        let mut controller =
            TaskListController::initialize(store, RecordingNotifier::new(), MessageCatalog::english())
                .unwrap();
        assert!(controller.begin_edit(TaskId(1)));

        // Only reachable if the collection changes behind the edit marker.
        controller.tasks.clear();

        let err = controller.add_or_update("fresh", "").unwrap_err();
        assert!(matches!(err, ControllerError::NotFound(TaskId(1))));
        assert_eq!(controller.edit_state(), EditState::Idle);
        assert!(controller.form().is_empty());
        assert!(controller.tasks().is_empty());
        assert_eq!(controller.store().save_count(), 0);
        assert_eq!(
            controller.notifier().last(),
            Some(&Notification::Error(MessageCatalog::english().edit_target_missing))
        );
    }
}
