use super::steps::{Field, Position, Status};
use crate::api::LambdaType;
use crate::error::Result;

/// Values collected by a flow, either typed by the user or supplied up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form<T> {
    pub name: Option<String>,
    pub path: Option<String>,
    pub dependency: Option<T>,
    pub lambda_type: Option<LambdaType>,
}

impl<T> Default for Form<T> {
    fn default() -> Self {
        Self {
            name: None,
            path: None,
            dependency: None,
            lambda_type: None,
        }
    }
}

/// Blank strings count as "not supplied"
fn supplied(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<T> Form<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = supplied(name);
        self
    }

    pub fn with_path(mut self, path: Option<String>) -> Self {
        self.path = supplied(path);
        self
    }

    pub fn with_dependency(mut self, dependency: Option<T>) -> Self {
        self.dependency = dependency;
        self
    }

    pub fn with_lambda_type(mut self, lambda_type: Option<LambdaType>) -> Self {
        self.lambda_type = lambda_type;
        self
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Path => self.path.as_deref(),
        }
    }

    pub(crate) fn set_field(&mut self, field: Field, value: String) {
        let value = supplied(Some(value));
        match field {
            Field::Name => self.name = value,
            Field::Path => self.path = value,
        }
    }
}

/// Append-only log of completed steps shown above the active element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn record(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Final result block, separated from any step summaries by a blank line
    pub fn conclude(&mut self, text: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.extend(text.lines().map(str::to_string));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Everything a single flow owns
#[derive(Debug)]
pub struct WizardState<T, O> {
    pub position: Position,
    pub status: Status,
    pub transcript: Transcript,
    pub form: Form<T>,
    /// Eligible items from the load step, unset until the response arrives
    pub choices: Option<Vec<T>>,
    /// Submit response, unset until it arrives
    pub outcome: Option<Result<O>>,
}

impl<T, O> WizardState<T, O> {
    pub fn new(form: Form<T>) -> Self {
        Self {
            position: Position::Init,
            status: Status::Running,
            transcript: Transcript::default(),
            form,
            choices: None,
            outcome: None,
        }
    }
}
