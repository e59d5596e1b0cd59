use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::{ApiResult, ChatApi, RequestError};
use crate::config::UpsertMode;
use crate::event::KeyAction;
use crate::input::TextInput;
use crate::model::message::{ChatReply, Message};
use crate::model::patient::{Patient, PatientDraft};

#[derive(Debug)]
pub enum Action {
    Key(KeyAction),
    Redraw,
    LoadPatients,
    SelectPatient(String),
    CreatePatient(String),
    SendMessage,
    PatientsLoaded(ApiResult<Vec<Patient>>),
    HistoryLoaded {
        generation: u64,
        result: ApiResult<Vec<Message>>,
    },
    ReplyReceived {
        generation: u64,
        result: ApiResult<ChatReply>,
    },
    PatientSaved(ApiResult<Patient>),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Patients,
    Input,
    NewPatient,
}

pub struct App {
    pub patients: Vec<Patient>,
    pub active_patient: Option<Patient>,
    pub messages: Vec<Message>,
    pub input: TextInput,
    /// A chat message is in flight.
    pub loading: bool,
    pub loading_patients: bool,
    pub saving_patient: bool,
    pub error: Option<String>,
    pub focus: Focus,
    pub selected_patient: usize,
    pub new_patient_name: TextInput,
    pub should_quit: bool,
    /// Bumped on every active-patient change; results tagged with an older value are dropped.
    generation: u64,
    upsert_mode: UpsertMode,
    api: Arc<dyn ChatApi>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        api: Arc<dyn ChatApi>,
        upsert_mode: UpsertMode,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            patients: Vec::new(),
            active_patient: None,
            messages: Vec::new(),
            input: TextInput::default(),
            loading: false,
            loading_patients: false,
            saving_patient: false,
            error: None,
            focus: Focus::Patients,
            selected_patient: 0,
            new_patient_name: TextInput::default(),
            should_quit: false,
            generation: 0,
            upsert_mode,
            api,
            action_tx,
        }
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// True iff there is text to send, someone to send it for, and nothing in flight.
    pub fn can_send(&self) -> bool {
        !self.input.is_blank() && self.active_patient.is_some() && !self.loading
    }

    pub fn is_active(&self, patient: &Patient) -> bool {
        self.active_patient
            .as_ref()
            .is_some_and(|active| active.id == patient.id)
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Redraw => {}
            Action::LoadPatients => self.load_patients(),
            Action::SelectPatient(id) => self.select_patient(&id),
            Action::CreatePatient(name) => self.create_patient(&name),
            Action::SendMessage => self.send_message(),
            Action::PatientsLoaded(result) => self.on_patients_loaded(result),
            Action::HistoryLoaded { generation, result } => {
                self.on_history_loaded(generation, result)
            }
            Action::ReplyReceived { generation, result } => {
                self.on_reply_received(generation, result)
            }
            Action::PatientSaved(result) => self.on_patient_saved(result),
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn handle_key(&mut self, key: KeyAction) {
        match self.focus {
            Focus::Patients => match key {
                KeyAction::Up => {
                    self.selected_patient = self.selected_patient.saturating_sub(1);
                }
                KeyAction::Down => {
                    if self.selected_patient + 1 < self.patients.len() {
                        self.selected_patient += 1;
                    }
                }
                KeyAction::Enter => {
                    if let Some(patient) = self.patients.get(self.selected_patient) {
                        let id = patient.id.clone();
                        self.select_patient(&id);
                    }
                }
                KeyAction::Tab | KeyAction::Right => self.focus = Focus::Input,
                KeyAction::Char('n') => {
                    self.new_patient_name.clear();
                    self.focus = Focus::NewPatient;
                }
                KeyAction::Char('r') => self.load_patients(),
                KeyAction::Char('q') => self.should_quit = true,
                KeyAction::Escape => self.error = None,
                _ => {}
            },
            Focus::Input => match key {
                KeyAction::Enter => self.send_message(),
                KeyAction::Newline => self.input.insert('\n'),
                KeyAction::Char(c) => self.input.insert(c),
                KeyAction::Backspace => self.input.backspace(),
                KeyAction::Left => self.input.left(),
                KeyAction::Right => self.input.right(),
                KeyAction::Escape | KeyAction::Tab => self.focus = Focus::Patients,
                _ => {}
            },
            Focus::NewPatient => match key {
                KeyAction::Enter => {
                    let name = self.new_patient_name.take();
                    self.focus = Focus::Patients;
                    self.create_patient(&name);
                }
                KeyAction::Escape => {
                    self.new_patient_name.clear();
                    self.focus = Focus::Patients;
                }
                KeyAction::Char(c) => self.new_patient_name.insert(c),
                KeyAction::Backspace => self.new_patient_name.backspace(),
                KeyAction::Left => self.new_patient_name.left(),
                KeyAction::Right => self.new_patient_name.right(),
                _ => {}
            },
        }
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    fn fail(&mut self, err: RequestError) {
        tracing::warn!("{err}");
        self.error = Some(err.message);
    }

    pub fn load_patients(&mut self) {
        self.loading_patients = true;
        let api = self.api.clone();
        self.spawn(async move { Action::PatientsLoaded(api.list_patients().await) });
    }

    fn on_patients_loaded(&mut self, result: ApiResult<Vec<Patient>>) {
        self.loading_patients = false;
        match result {
            Ok(patients) => {
                tracing::info!(count = patients.len(), "patients loaded");
                self.patients = patients;
                if self.selected_patient >= self.patients.len() {
                    self.selected_patient = self.patients.len().saturating_sub(1);
                }
                if self.active_patient.is_none() {
                    if let Some(first) = self.patients.first().cloned() {
                        self.selected_patient = 0;
                        self.set_active(Some(first));
                    }
                }
            }
            Err(e) => self.fail(e),
        }
    }

    fn select_patient(&mut self, id: &str) {
        if self.active_patient.as_ref().is_some_and(|p| p.id == id) {
            return;
        }
        match self.patients.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.selected_patient = idx;
                let patient = self.patients[idx].clone();
                self.set_active(Some(patient));
            }
            None => tracing::debug!(id, "select for unknown patient ignored"),
        }
    }

    /// Change the active patient. Messages are cleared before any history is requested.
    pub fn set_active(&mut self, patient: Option<Patient>) {
        self.generation += 1;
        self.messages.clear();
        self.active_patient = patient;

        let Some(patient) = &self.active_patient else {
            return;
        };
        tracing::debug!(id = %patient.id, generation = self.generation, "active patient changed");

        let api = self.api.clone();
        let id = patient.id.clone();
        let generation = self.generation;
        self.spawn(async move {
            Action::HistoryLoaded {
                generation,
                result: api.fetch_history(&id).await,
            }
        });
    }

    fn on_history_loaded(&mut self, generation: u64, result: ApiResult<Vec<Message>>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale history");
            return;
        }
        match result {
            Ok(messages) => self.messages = messages,
            Err(e) => {
                self.messages.clear();
                self.fail(e);
            }
        }
    }

    fn send_message(&mut self) {
        if !self.can_send() {
            return;
        }
        let Some(patient_id) = self.active_patient.as_ref().map(|p| p.id.clone()) else {
            return;
        };

        let text = self.input.take().trim().to_string();
        self.messages.push(Message::user(text.clone()));
        self.loading = true;
        self.error = None;

        let api = self.api.clone();
        let generation = self.generation;
        self.spawn(async move {
            Action::ReplyReceived {
                generation,
                result: api.send_message(&patient_id, &text).await,
            }
        });
    }

    fn on_reply_received(&mut self, generation: u64, result: ApiResult<ChatReply>) {
        self.loading = false;
        if generation != self.generation {
            match result {
                Ok(_) => tracing::debug!(generation, "discarding reply for previous patient"),
                Err(e) => tracing::warn!(generation, "send for previous patient failed: {e}"),
            }
            return;
        }
        match result {
            Ok(reply) => {
                tracing::debug!(thread_id = ?reply.thread_id, "reply received");
                self.messages.extend(reply.agent_messages());
            }
            Err(e) => self.fail(e),
        }
    }

    fn create_patient(&mut self, name: &str) {
        if self.saving_patient {
            return;
        }
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.saving_patient = true;

        let api = self.api.clone();
        let draft = PatientDraft::named(name);
        self.spawn(async move { Action::PatientSaved(api.upsert_patient(&draft).await) });
    }

    fn on_patient_saved(&mut self, result: ApiResult<Patient>) {
        self.saving_patient = false;
        match result {
            Ok(patient) => {
                tracing::info!(id = %patient.id, "patient saved");
                self.selected_patient = self.merge_patient(patient.clone());
                self.set_active(Some(patient));
            }
            Err(e) => self.fail(e),
        }
    }

    /// Insert a saved patient into the list, returning its index.
    fn merge_patient(&mut self, patient: Patient) -> usize {
        if self.upsert_mode == UpsertMode::Replace {
            if let Some(idx) = self.patients.iter().position(|p| p.id == patient.id) {
                self.patients[idx] = patient;
                return idx;
            }
        }
        self.patients.insert(0, patient);
        0
    }
}
