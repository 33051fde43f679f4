use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::{name_input, path_input, required};
use crate::api::Runtime;
use crate::error::Result;
use crate::ops::Operations;
use crate::wizard::{Capability, Form, NoChoice, Selectable, Step, Wizard};

impl Selectable for Runtime {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        self.id.clone()
    }
}

pub struct RuntimeCreate {
    ops: Operations,
}

impl RuntimeCreate {
    pub const STEPS: [Step; 3] = [
        path_input("./Dockerfile"),
        name_input("python3"),
        Step::Submit {
            progress: "Creating runtime...",
        },
    ];

    pub fn wizard(ops: Operations, form: Form<NoChoice>) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops }), Self::STEPS.to_vec(), form)
    }
}

#[async_trait]
impl Capability for RuntimeCreate {
    type Choice = NoChoice;
    type Output = Runtime;

    fn subject(&self) -> (&'static str, &'static str) {
        ("create", "runtime")
    }

    async fn submit(&self, form: Form<NoChoice>) -> Result<Runtime> {
        let name = required(form.name, "runtime name")?;
        let path = required(form.path, "dockerfile path")?;
        self.ops.create_runtime(name, Path::new(&path)).await
    }
}

pub struct RuntimeList {
    ops: Operations,
}

impl RuntimeList {
    pub const STEPS: [Step; 1] = [Step::Submit {
        progress: "Query runtimes...",
    }];

    pub fn wizard(ops: Operations) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops }), Self::STEPS.to_vec(), Form::new())
    }
}

#[async_trait]
impl Capability for RuntimeList {
    type Choice = NoChoice;
    type Output = Vec<Runtime>;

    fn subject(&self) -> (&'static str, &'static str) {
        ("list", "runtimes")
    }

    async fn submit(&self, _form: Form<NoChoice>) -> Result<Vec<Runtime>> {
        self.ops.list_runtimes().await
    }
}
