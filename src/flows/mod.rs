//! The concrete flows: a step table plus the capability that backs it.

mod endpoint;
mod lambda;
mod runtime;

pub use endpoint::{EndpointCreate, EndpointList};
pub use lambda::{LambdaCreate, LambdaDestroy, LambdaList, LambdaStart};
pub use runtime::{RuntimeCreate, RuntimeList};

use crate::error::{OpcliError, Result};
use crate::wizard::{Field, Step};

/// Form values are guaranteed by the table by the time submit runs
fn required<T>(value: Option<T>, what: &'static str) -> Result<T> {
    value.ok_or(OpcliError::Incomplete(what))
}

const fn name_input(placeholder: &'static str) -> Step {
    Step::Input {
        field: Field::Name,
        label: "Name",
        placeholder,
    }
}

const fn path_input(placeholder: &'static str) -> Step {
    Step::Input {
        field: Field::Path,
        label: "Path",
        placeholder,
    }
}
