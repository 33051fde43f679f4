/// Text fields a wizard can collect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Path,
}

/// What a selection step chooses from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Items delivered by the preceding load step
    Dependency,
    /// The fixed list of lambda types
    LambdaType,
}

/// One row of a wizard's step table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Satisfied by a typed or pre-supplied non-empty value
    Input {
        field: Field,
        /// Transcript label, e.g. "Name"
        label: &'static str,
        placeholder: &'static str,
    },
    /// Satisfied by a pre-supplied dependency or a non-empty list response
    Load {
        /// Plural noun used in messages, e.g. "runtimes"
        subject: &'static str,
        progress: &'static str,
    },
    /// Satisfied by a pre-supplied or picked item
    Select {
        selection: Selection,
        title: &'static str,
        label: &'static str,
    },
    /// Satisfied by the arrival of the submit response
    Submit { progress: &'static str },
}

impl Step {
    pub fn short_name(&self) -> &'static str {
        match self {
            Step::Input {
                field: Field::Name, ..
            } => "name",
            Step::Input {
                field: Field::Path, ..
            } => "path",
            Step::Load { .. } => "load",
            Step::Select {
                selection: Selection::Dependency,
                ..
            } => "select",
            Step::Select {
                selection: Selection::LambdaType,
                ..
            } => "type",
            Step::Submit { .. } => "submit",
        }
    }
}

/// Where a flow is. Ordering follows the ladder: `Init < At(0) < At(1) < … < Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Position {
    #[default]
    Init,
    At(usize),
    Done,
}

/// Overall result of a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Running,
    Succeeded,
    Failed,
    /// Abandoned by the user with Esc
    Cancelled,
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        *self != Status::Running
    }

    pub fn is_success(&self) -> bool {
        *self == Status::Succeeded
    }
}
