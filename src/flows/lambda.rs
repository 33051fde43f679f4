use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use super::{name_input, path_input, required};
use crate::api::{Lambda, LambdaType, Runtime};
use crate::error::Result;
use crate::ops::{NewLambda, Operations};
use crate::wizard::{Capability, Form, NoChoice, Selectable, Selection, Step, Wizard};

impl Selectable for Lambda {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        self.lambda_type
            .map(|t| t.as_str().to_string())
            .unwrap_or_default()
    }
}

pub struct LambdaCreate {
    ops: Operations,
}

impl LambdaCreate {
    pub const STEPS: [Step; 6] = [
        path_input("./my-lambda"),
        name_input("my-lambda"),
        Step::Load {
            subject: "runtimes",
            progress: "Loading runtimes...",
        },
        Step::Select {
            selection: Selection::Dependency,
            title: "Runtimes",
            label: "Runtime",
        },
        Step::Select {
            selection: Selection::LambdaType,
            title: "Lambda type",
            label: "Lambda type",
        },
        Step::Submit {
            progress: "Creating lambda...",
        },
    ];

    pub fn wizard(ops: Operations, form: Form<Runtime>) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops }), Self::STEPS.to_vec(), form)
    }
}

#[async_trait]
impl Capability for LambdaCreate {
    type Choice = Runtime;
    type Output = Lambda;

    fn subject(&self) -> (&'static str, &'static str) {
        ("create", "lambda")
    }

    async fn load(&self) -> Result<Vec<Runtime>> {
        self.ops.list_runtimes().await
    }

    async fn submit(&self, form: Form<Runtime>) -> Result<Lambda> {
        let runtime = required(form.dependency, "runtime")?;
        self.ops
            .create_lambda(NewLambda {
                name: required(form.name, "lambda name")?,
                runtime: runtime.id,
                lambda_type: required(form.lambda_type, "lambda type")?,
                path: PathBuf::from(required(form.path, "source path")?),
            })
            .await
    }
}

pub struct LambdaList {
    ops: Operations,
}

impl LambdaList {
    pub const STEPS: [Step; 1] = [Step::Submit {
        progress: "Query lambdas...",
    }];

    pub fn wizard(ops: Operations) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops }), Self::STEPS.to_vec(), Form::new())
    }
}

#[async_trait]
impl Capability for LambdaList {
    type Choice = NoChoice;
    type Output = Vec<Lambda>;

    fn subject(&self) -> (&'static str, &'static str) {
        ("list", "lambdas")
    }

    async fn submit(&self, _form: Form<NoChoice>) -> Result<Vec<Lambda>> {
        self.ops.list_lambdas().await
    }
}

/// Starts a lambda and waits for the start task
pub struct LambdaStart {
    ops: Operations,
    id: String,
}

impl LambdaStart {
    pub const STEPS: [Step; 1] = [Step::Submit {
        progress: "Starting lambda...",
    }];

    pub fn wizard(ops: Operations, id: String) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops, id }), Self::STEPS.to_vec(), Form::new())
    }
}

#[async_trait]
impl Capability for LambdaStart {
    type Choice = NoChoice;
    type Output = Lambda;

    fn subject(&self) -> (&'static str, &'static str) {
        ("start", "lambda")
    }

    async fn submit(&self, _form: Form<NoChoice>) -> Result<Lambda> {
        self.ops.start_lambda(&self.id).await
    }
}

pub struct LambdaDestroy {
    ops: Operations,
    id: String,
}

impl LambdaDestroy {
    pub const STEPS: [Step; 1] = [Step::Submit {
        progress: "Destroying lambda...",
    }];

    pub fn wizard(ops: Operations, id: String) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops, id }), Self::STEPS.to_vec(), Form::new())
    }
}

#[async_trait]
impl Capability for LambdaDestroy {
    type Choice = NoChoice;
    type Output = ();

    fn subject(&self) -> (&'static str, &'static str) {
        ("destroy", "lambda")
    }

    async fn submit(&self, _form: Form<NoChoice>) -> Result<()> {
        self.ops.destroy_lambda(&self.id).await
    }

    fn describe(&self, _output: &()) -> String {
        "Lambda has been destroyed".to_string()
    }
}
