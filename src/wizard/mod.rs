//! Step-table driven wizard engine.
//!
//! A flow is a fixed list of [`Step`]s. Every call to [`Wizard::advance`]
//! delivers at most one message to the current step and then climbs past
//! every step whose data is already present, stopping at the first one that
//! still needs the user or the network. Entering a step emits the work it
//! needs as [`Action`]s for the dispatcher to run.

mod input;
mod state;
mod steps;
mod view;


pub use input::InputBuffer;
pub use state::{Form, Transcript, WizardState};
pub use steps::{Field, Position, Selection, Step, Status};
pub use view::{Active, PickerItem, View};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::LambdaType;
use crate::error::Result;

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Something that can be listed in a picker
pub trait Selectable {
    fn title(&self) -> String;
    fn description(&self) -> String;
}

/// Choice type for flows without a selection step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoChoice {}

impl Selectable for NoChoice {
    fn title(&self) -> String {
        match *self {}
    }

    fn description(&self) -> String {
        match *self {}
    }
}

/// The remote side of a flow
#[async_trait]
pub trait Capability: Send + Sync + 'static {
    type Choice: Selectable + Clone + Send + Sync + 'static;
    type Output: Serialize + Send + Sync + 'static;

    /// Verb and noun used in failure messages, e.g. ("create", "lambda")
    fn subject(&self) -> (&'static str, &'static str);

    async fn load(&self) -> Result<Vec<Self::Choice>> {
        Ok(Vec::new())
    }

    /// Filters loaded items before they reach the picker
    fn eligible(&self, _choice: &Self::Choice) -> bool {
        true
    }

    async fn submit(&self, form: Form<Self::Choice>) -> Result<Self::Output>;

    /// Text appended to the transcript on success
    fn describe(&self, output: &Self::Output) -> String {
        pretty_json(output)
    }
}

pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unprintable result: {e}>"))
}

/// Input to a wizard: a key press or the completion of an earlier action
pub enum Message<C: Capability> {
    Key(KeyEvent),
    Loaded(Result<Vec<C::Choice>>),
    Submitted(Result<C::Output>),
}

/// Work requested by a wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<T> {
    Load,
    Submit(Form<T>),
    /// The flow is over and the frontend can shut down
    Close,
}

pub struct Wizard<C: Capability> {
    capability: Arc<C>,
    steps: Vec<Step>,
    state: WizardState<C::Choice, C::Output>,
    input: InputBuffer,
    picker: Vec<PickerItem>,
    picker_cursor: usize,
    spinner_frame: usize,
}

impl<C: Capability> Wizard<C> {
    pub fn new(capability: Arc<C>, steps: Vec<Step>, form: Form<C::Choice>) -> Self {
        Self {
            capability,
            steps,
            state: WizardState::new(form),
            input: InputBuffer::new(),
            picker: Vec::new(),
            picker_cursor: 0,
            spinner_frame: 0,
        }
    }

    pub fn capability(&self) -> Arc<C> {
        Arc::clone(&self.capability)
    }

    pub fn state(&self) -> &WizardState<C::Choice, C::Output> {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn transcript(&self) -> &Transcript {
        &self.state.transcript
    }

    /// The submit response, once the flow has succeeded
    pub fn output(&self) -> Option<&C::Output> {
        match &self.state.outcome {
            Some(Ok(output)) if self.state.status.is_success() => Some(output),
            _ => None,
        }
    }

    pub fn tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    /// Deliver one message, or none to kick the flow off, then climb as far as possible.
    pub fn advance(&mut self, message: Option<Message<C>>) -> Vec<Action<C::Choice>> {
        let mut actions = Vec::new();

        if self.state.status.is_terminal() {
            if message.is_some() {
                debug!("Flow already {:?}, ignoring message", self.state.status);
            }
            return actions;
        }

        if let Some(message) = message {
            self.deliver(message, &mut actions);
            if self.state.status.is_terminal() {
                return actions;
            }
        }

        self.climb(&mut actions);
        actions
    }

    fn current_step(&self) -> Option<Step> {
        match self.state.position {
            Position::At(index) => self.steps.get(index).copied(),
            _ => None,
        }
    }

    fn deliver(&mut self, message: Message<C>, actions: &mut Vec<Action<C::Choice>>) {
        let step = self.current_step();

        match (message, step) {
            (Message::Key(key), Some(Step::Input { field, .. })) => {
                self.handle_input_key(field, key, actions)
            }
            (Message::Key(key), Some(Step::Select { selection, .. })) => {
                self.handle_select_key(selection, key, actions)
            }
            (Message::Key(_), _) => {}
            (Message::Loaded(result), Some(Step::Load { subject, .. })) => {
                self.handle_loaded(subject, result, actions)
            }
            (Message::Submitted(result), Some(Step::Submit { .. }))
                if self.state.outcome.is_none() =>
            {
                self.state.outcome = Some(result);
            }
            (Message::Loaded(_), _) | (Message::Submitted(_), _) => {
                warn!(
                    "Ignoring completion that arrived at {:?}",
                    self.state.position
                );
            }
        }
    }

    fn handle_input_key(
        &mut self,
        field: Field,
        key: KeyEvent,
        actions: &mut Vec<Action<C::Choice>>,
    ) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.halt(Status::Cancelled, None, actions),
            KeyCode::Enter => {
                if !self.input.is_blank() {
                    self.state
                        .form
                        .set_field(field, self.input.content().to_string());
                }
            }
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Char('w') if ctrl => self.input.delete_word_back(),
            KeyCode::Char('a') if ctrl => self.input.move_start(),
            KeyCode::Char('e') if ctrl => self.input.move_end(),
            KeyCode::Char(c) if !ctrl => self.input.insert(c),
            KeyCode::Backspace => {
                self.input.delete_back();
            }
            KeyCode::Delete => {
                self.input.delete_forward();
            }
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_start(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }

    fn handle_select_key(
        &mut self,
        selection: Selection,
        key: KeyEvent,
        actions: &mut Vec<Action<C::Choice>>,
    ) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.halt(Status::Cancelled, None, actions),
            KeyCode::Up | KeyCode::Char('k') => {
                self.picker_cursor = self.picker_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.picker_cursor + 1 < self.picker.len() {
                    self.picker_cursor += 1;
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.picker_cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.picker_cursor = self.picker.len().saturating_sub(1);
            }
            KeyCode::Enter => self.commit_selection(selection),
            _ => {}
        }
    }

    fn commit_selection(&mut self, selection: Selection) {
        let cursor = self.picker_cursor;
        match selection {
            Selection::Dependency => {
                self.state.form.dependency = self
                    .state
                    .choices
                    .as_ref()
                    .and_then(|choices| choices.get(cursor))
                    .cloned();
            }
            Selection::LambdaType => {
                self.state.form.lambda_type = LambdaType::ALL.get(cursor).copied();
            }
        }
    }

    fn handle_loaded(
        &mut self,
        subject: &str,
        result: Result<Vec<C::Choice>>,
        actions: &mut Vec<Action<C::Choice>>,
    ) {
        match result {
            Err(e) => {
                warn!("Failed to load {}: {}", subject, e);
                self.halt(
                    Status::Failed,
                    Some(format!("Failed to load {subject}: {e}")),
                    actions,
                );
            }
            Ok(items) => {
                let eligible: Vec<_> = items
                    .into_iter()
                    .filter(|item| self.capability.eligible(item))
                    .collect();
                if eligible.is_empty() {
                    self.halt(
                        Status::Failed,
                        Some(format!("No suitable {subject} found")),
                        actions,
                    );
                } else {
                    debug!("Loaded {} {}", eligible.len(), subject);
                    self.state.choices = Some(eligible);
                }
            }
        }
    }

    /// End the flow early without moving past the current step
    fn halt(
        &mut self,
        status: Status,
        message: Option<String>,
        actions: &mut Vec<Action<C::Choice>>,
    ) {
        if let Some(message) = message {
            self.state.transcript.conclude(&message);
        }
        self.state.status = status;
        actions.push(Action::Close);
    }

    fn climb(&mut self, actions: &mut Vec<Action<C::Choice>>) {
        loop {
            match self.state.position {
                Position::Done => break,
                Position::Init => self.move_to(self.next_position(), actions),
                Position::At(index) => {
                    let step = self.steps[index];
                    if !self.is_satisfied(step) {
                        break;
                    }
                    self.complete(step);
                    self.move_to(self.next_position(), actions);
                }
            }
        }
    }

    fn next_position(&self) -> Position {
        let next = match self.state.position {
            Position::Init => 0,
            Position::At(index) => index + 1,
            Position::Done => return Position::Done,
        };
        if next < self.steps.len() {
            Position::At(next)
        } else {
            Position::Done
        }
    }

    fn move_to(&mut self, position: Position, actions: &mut Vec<Action<C::Choice>>) {
        debug_assert!(position > self.state.position);
        self.state.position = position;

        match position {
            Position::Init => {}
            Position::At(index) => {
                let step = self.steps[index];
                if !self.is_satisfied(step) {
                    self.enter(step, actions);
                }
            }
            Position::Done => {
                if !self.state.status.is_terminal() {
                    self.state.status = Status::Succeeded;
                }
                actions.push(Action::Close);
            }
        }
    }

    fn is_satisfied(&self, step: Step) -> bool {
        let form = &self.state.form;
        match step {
            Step::Input { field, .. } => form.field(field).is_some(),
            Step::Load { .. } => form.dependency.is_some() || self.state.choices.is_some(),
            Step::Select {
                selection: Selection::Dependency,
                ..
            } => form.dependency.is_some(),
            Step::Select {
                selection: Selection::LambdaType,
                ..
            } => form.lambda_type.is_some(),
            Step::Submit { .. } => self.state.outcome.is_some(),
        }
    }

    fn enter(&mut self, step: Step, actions: &mut Vec<Action<C::Choice>>) {
        debug!("Entering {} step", step.short_name());

        match step {
            Step::Input { .. } => self.input.clear(),
            Step::Load { .. } => actions.push(Action::Load),
            Step::Select { selection, .. } => {
                self.picker = match selection {
                    Selection::Dependency => self
                        .state
                        .choices
                        .iter()
                        .flatten()
                        .map(|choice| PickerItem {
                            title: choice.title(),
                            description: choice.description(),
                        })
                        .collect(),
                    Selection::LambdaType => LambdaType::ALL
                        .iter()
                        .map(|t| PickerItem {
                            title: t.title().to_string(),
                            description: t.description().to_string(),
                        })
                        .collect(),
                };
                self.picker_cursor = 0;
            }
            Step::Submit { .. } => actions.push(Action::Submit(self.state.form.clone())),
        }
    }

    /// Record a satisfied step in the transcript
    fn complete(&mut self, step: Step) {
        if let Step::Submit { .. } = step {
            self.conclude();
            return;
        }

        let form = &self.state.form;
        let line = match step {
            Step::Input { field, label, .. } => {
                Some(format!("{label}: {}", form.field(field).unwrap_or_default()))
            }
            Step::Select {
                selection: Selection::Dependency,
                label,
                ..
            } => form
                .dependency
                .as_ref()
                .map(|choice| format!("{label}: {}", choice.title())),
            Step::Select {
                selection: Selection::LambdaType,
                label,
                ..
            } => form.lambda_type.map(|t| format!("{label}: {t}")),
            Step::Load { .. } | Step::Submit { .. } => None,
        };

        if let Some(line) = line {
            self.state.transcript.record(line);
        }
    }

    fn conclude(&mut self) {
        let (verb, noun) = self.capability.subject();
        let (status, text) = match &self.state.outcome {
            Some(Ok(output)) => (Status::Succeeded, self.capability.describe(output)),
            Some(Err(e)) => (Status::Failed, format!("Failed to {verb} {noun}: {e}")),
            None => return,
        };
        self.state.status = status;
        self.state.transcript.conclude(&text);
    }

    /// Pure projection of the current state
    pub fn view(&self) -> View {
        let transcript = self.state.transcript.lines().to_vec();
        let active = match self.current_step() {
            _ if self.state.status.is_terminal() => Active::Idle,
            None => Active::Idle,
            Some(Step::Input {
                label, placeholder, ..
            }) => Active::Input {
                label: label.to_string(),
                placeholder: placeholder.to_string(),
                value: self.input.content().to_string(),
                cursor: self.input.cursor(),
            },
            Some(Step::Select { title, .. }) => Active::Select {
                title: title.to_string(),
                items: self.picker.clone(),
                cursor: self.picker_cursor,
            },
            Some(Step::Load { progress, .. }) | Some(Step::Submit { progress }) => {
                Active::Spinner {
                    frame: SPINNER_FRAMES[self.spinner_frame],
                    label: progress.to_string(),
                }
            }
        };

        View { transcript, active }
    }
}
