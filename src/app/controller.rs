//! Client form/list controller.
//!
//! The controller owns a [`ClientState`]: a disposable copy of the record
//! list, the form being edited and the editing target. Every mutation is
//! followed by a full reload from the API, so whatever the server returns last
//! is what the caller sees.

use crate::domain::entry::{Entry, EntryForm};
use crate::domain::validation::{self, ValidationError};
use crate::transport::client::{ApiError, EntryApi};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    pub entries: Vec<Entry>,
    pub form: EntryForm,
    /// Serial number of the record loaded into the form, if any.
    pub editing: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field was left blank; nothing happened.
    Incomplete,
    Created { srno: i32 },
    Updated { srno: i32 },
    /// Validation passed but the API call failed. The list was reloaded anyway.
    RequestFailed { srno: i32, reason: String },
}

pub struct EntryController<A> {
    api: A,
    state: ClientState,
}

impl<A: EntryApi> EntryController<A> {
    pub fn new(api: A) -> Self {
        Self::with_state(api, ClientState::default())
    }

    pub fn with_state(api: A, state: ClientState) -> Self {
        Self { api, state }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn into_state(self) -> ClientState {
        self.state
    }

    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    pub fn form(&self) -> &EntryForm {
        &self.state.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.state.form
    }

    pub fn editing(&self) -> Option<i32> {
        self.state.editing
    }

    /// Replaces the cached list with the server's. On failure the stale list is kept.
    pub async fn load_all(&mut self) -> Result<usize, ApiError> {
        match self.api.list().await {
            Ok(entries) => {
                let count = entries.len();
                self.state.entries = entries;
                tracing::debug!(count, "entries reloaded");
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "fetching entries failed, keeping cached list");
                Err(e)
            }
        }
    }

    /// Validates the form and sends it.
    ///
    /// Validation failures return early without touching the network or the
    /// form. Once validation passes the form and editing target are cleared
    /// before the request goes out. In edit mode the update is addressed to the
    /// serial number in the form; if it was changed to one the server does not
    /// know, the update fails as not found and the reload restores the list.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ValidationError> {
        if !self.state.form.is_complete() {
            tracing::debug!("form incomplete, nothing submitted");
            return Ok(SubmitOutcome::Incomplete);
        }

        let entry = validation::validate(&self.state.entries, &self.state.form, self.state.editing)?;
        let editing = self.state.editing.take();
        self.state.form.clear();

        let (srno, result) = match editing {
            Some(target) => {
                let fields = entry.fields();
                for cached in self.state.entries.iter_mut().filter(|e| e.srno == target) {
                    *cached = entry.clone();
                }
                let result = self
                    .api
                    .update(entry.srno, &fields)
                    .await
                    .map(|()| SubmitOutcome::Updated { srno: entry.srno });
                (entry.srno, result)
            }
            None => {
                let result = self
                    .api
                    .create(&entry)
                    .await
                    .map(|()| SubmitOutcome::Created { srno: entry.srno });
                (entry.srno, result)
            }
        };

        let outcome = result.unwrap_or_else(|e| {
            tracing::error!(srno, error = %e, "saving entry failed");
            SubmitOutcome::RequestFailed {
                srno,
                reason: e.to_string(),
            }
        });

        self.load_all().await.ok();
        Ok(outcome)
    }

    /// Loads `entry` into the form and makes it the editing target.
    pub fn begin_edit(&mut self, entry: &Entry) {
        self.state.form = EntryForm::from(entry);
        self.state.editing = Some(entry.srno);
    }

    pub fn cancel_edit(&mut self) {
        self.state.form.clear();
        self.state.editing = None;
    }

    /// Deletes `entry` and reloads the list whether or not the delete succeeded.
    pub async fn remove(&mut self, entry: &Entry) -> Result<(), ApiError> {
        let srno = entry.srno;
        self.state.entries.retain(|e| e.srno != srno);

        let result = self.api.delete(srno).await;
        if let Err(e) = &result {
            tracing::error!(srno, error = %e, "deleting entry failed");
        }

        self.load_all().await.ok();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::EntryFields;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubApi {
        rows: Mutex<Vec<Entry>>,
        calls: Mutex<Vec<String>>,
        fail_writes: bool,
        fail_list: AtomicBool,
    }

    impl StubApi {
        fn with_rows(rows: Vec<Entry>) -> Self {
            Self {
                rows: Mutex::new(rows),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn write_failure(&self) -> ApiError {
            ApiError::Status {
                status: 500,
                body: "DB error".to_string(),
            }
        }
    }

    #[async_trait]
    impl EntryApi for StubApi {
        async fn list(&self) -> Result<Vec<Entry>, ApiError> {
            self.record("list".to_string());
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(ApiError::Status {
                    status: 500,
                    body: "DB error".to_string(),
                });
            }
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, entry: &Entry) -> Result<(), ApiError> {
            self.record(format!("create {}", entry.srno));
            let mut rows = self.rows.lock().unwrap();
            if self.fail_writes || rows.iter().any(|e| e.srno == entry.srno) {
                return Err(self.write_failure());
            }
            rows.push(entry.clone());
            Ok(())
        }

        async fn update(&self, srno: i32, fields: &EntryFields) -> Result<(), ApiError> {
            self.record(format!("update {}", srno));
            if self.fail_writes {
                return Err(self.write_failure());
            }
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|e| e.srno == srno) {
                Some(row) => {
                    *row = Entry::with_fields(srno, fields.clone());
                    Ok(())
                }
                None => Err(ApiError::NotFound(srno)),
            }
        }

        async fn delete(&self, srno: i32) -> Result<(), ApiError> {
            self.record(format!("delete {}", srno));
            if self.fail_writes {
                return Err(self.write_failure());
            }
            self.rows.lock().unwrap().retain(|e| e.srno != srno);
            Ok(())
        }
    }

    fn seeded() -> Vec<Entry> {
        vec![
            Entry::new(1, "Asha", "CSE", "10"),
            Entry::new(2, "Ravi", "ECE", "11"),
        ]
    }

    fn fill(controller: &mut EntryController<StubApi>, srno: i32, name: &str, branch: &str, rollno: &str) {
        let form = controller.form_mut();
        form.srno = Some(srno);
        form.name = name.to_string();
        form.branch = branch.to_string();
        form.rollno = rollno.to_string();
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_without_network_calls() {
        let mut controller = EntryController::new(StubApi::with_rows(seeded()));
        controller.load_all().await.unwrap();

        fill(&mut controller, 2, "Meera", "IT", "5");
        assert_eq!(controller.submit().await, Err(ValidationError::InvalidSrno));

        fill(&mut controller, 3, "Meera", "IT", "150");
        assert_eq!(controller.submit().await, Err(ValidationError::InvalidRollno));

        assert_eq!(controller.api().calls(), vec!["list"]);
        // The rejected input stays in the form for correction.
        assert_eq!(controller.form().rollno, "150");
    }

    #[tokio::test]
    async fn incomplete_form_is_a_silent_no_op() {
        let mut controller = EntryController::new(StubApi::default());
        fill(&mut controller, 3, "Meera", "  ", "5");

        assert_eq!(controller.submit().await, Ok(SubmitOutcome::Incomplete));
        assert!(controller.api().calls().is_empty());
        assert_eq!(controller.form().name, "Meera");
    }

    #[tokio::test]
    async fn create_clears_the_form_and_reloads() {
        let mut controller = EntryController::new(StubApi::with_rows(seeded()));
        controller.load_all().await.unwrap();

        fill(&mut controller, 3, "Meera", "IT", "99abc");
        assert_eq!(
            controller.submit().await,
            Ok(SubmitOutcome::Created { srno: 3 })
        );

        assert_eq!(controller.form(), &EntryForm::default());
        assert_eq!(controller.api().calls(), vec!["list", "create 3", "list"]);
        assert_eq!(
            controller.entries().iter().filter(|e| e.srno == 3).count(),
            1
        );
    }

    #[tokio::test]
    async fn edit_targets_the_loaded_record_and_leaves_others_alone() {
        let mut controller = EntryController::new(StubApi::with_rows(seeded()));
        controller.load_all().await.unwrap();

        let target = controller.entries()[1].clone();
        controller.begin_edit(&target);
        assert_eq!(controller.editing(), Some(2));
        assert_eq!(controller.form().name, "Ravi");

        controller.form_mut().branch = "EEE".to_string();
        assert_eq!(
            controller.submit().await,
            Ok(SubmitOutcome::Updated { srno: 2 })
        );
        assert_eq!(controller.editing(), None);
        assert_eq!(
            controller.entries(),
            &[
                Entry::new(1, "Asha", "CSE", "10"),
                Entry::new(2, "Ravi", "EEE", "11"),
            ]
        );
        assert_eq!(controller.api().calls(), vec!["list", "update 2", "list"]);
    }

    #[tokio::test]
    async fn changed_srno_during_edit_is_sent_and_reported_as_failed() {
        let mut controller =
            EntryController::new(StubApi::with_rows(vec![Entry::new(2, "Ravi", "ECE", "11")]));
        controller.load_all().await.unwrap();

        let target = controller.entries()[0].clone();
        controller.begin_edit(&target);
        controller.form_mut().srno = Some(5);
        controller.form_mut().name = "Ravi K".to_string();

        let outcome = controller.submit().await.unwrap();
        match outcome {
            SubmitOutcome::RequestFailed { srno, reason } => {
                assert_eq!(srno, 5);
                assert_eq!(reason, ApiError::NotFound(5).to_string());
            }
            other => panic!("expected a failed update, got {:?}", other),
        }
        assert_eq!(controller.api().calls(), vec!["list", "update 5", "list"]);
        assert_eq!(controller.entries(), &[Entry::new(2, "Ravi", "ECE", "11")]);
        assert_eq!(controller.editing(), None);
    }

    #[tokio::test]
    async fn failed_write_still_clears_the_form_and_reloads() {
        let api = StubApi {
            rows: Mutex::new(seeded()),
            fail_writes: true,
            ..Default::default()
        };
        let mut controller = EntryController::new(api);
        controller.load_all().await.unwrap();

        let target = controller.entries()[0].clone();
        controller.begin_edit(&target);
        controller.form_mut().name = "Asha R".to_string();

        let outcome = controller.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::RequestFailed { srno: 1, .. }));
        assert_eq!(controller.form(), &EntryForm::default());
        // The optimistic edit was overwritten by the reload.
        assert_eq!(controller.entries(), seeded().as_slice());
    }

    #[tokio::test]
    async fn failed_reload_keeps_the_stale_list() {
        let mut controller = EntryController::new(StubApi::with_rows(seeded()));
        controller.load_all().await.unwrap();

        controller.api().fail_list.store(true, Ordering::SeqCst);
        assert!(controller.load_all().await.is_err());
        assert_eq!(controller.entries(), seeded().as_slice());
    }

    #[tokio::test]
    async fn remove_reloads_even_for_unknown_records() {
        let mut controller = EntryController::new(StubApi::with_rows(seeded()));
        controller.load_all().await.unwrap();

        controller
            .remove(&Entry::new(42, "Ghost", "None", "1"))
            .await
            .unwrap();
        assert_eq!(controller.entries(), seeded().as_slice());

        let first = controller.entries()[0].clone();
        controller.remove(&first).await.unwrap();
        assert_eq!(controller.entries(), &[Entry::new(2, "Ravi", "ECE", "11")]);
        assert_eq!(
            controller.api().calls(),
            vec!["list", "delete 42", "list", "delete 1", "list"]
        );
    }

    #[tokio::test]
    async fn state_can_be_handed_over_between_controllers() {
        let mut controller = EntryController::new(StubApi::with_rows(seeded()));
        controller.load_all().await.unwrap();
        let target = controller.entries()[0].clone();
        controller.begin_edit(&target);

        let state = controller.into_state();
        assert_eq!(state.editing, Some(1));

        let mut resumed = EntryController::with_state(StubApi::default(), state);
        resumed.cancel_edit();
        assert_eq!(resumed.editing(), None);
        assert_eq!(resumed.entries().len(), 2);
    }
}
