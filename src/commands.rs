//! Turns parsed arguments into a flow and runs it.
//!
//! Ids given on the command line are looked up before any UI is shown, so a
//! bad id fails fast with a plain message instead of inside a wizard.

use tracing::info;

use crate::api::{Lambda, Runtime};
use crate::app::{run_flow, FlowReport, Frontend};
use crate::cli::{EndpointCommand, LambdaArgs, LambdaCommand, Resource, RuntimeCommand};
use crate::error::{OpcliError, Result};
use crate::event::EventHandler;
use crate::flows::{
    EndpointCreate, EndpointList, LambdaCreate, LambdaDestroy, LambdaList, LambdaStart,
    RuntimeCreate, RuntimeList,
};
use crate::ops::Operations;
use crate::wizard::{Form, NoChoice};

/// A flow with every pre-supplied value resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    LambdaCreate(Form<Runtime>),
    LambdaList,
    LambdaStart(String),
    LambdaDestroy(String),
    LambdaDeploy(Form<Runtime>),
    EndpointCreate(Form<Lambda>),
    EndpointList,
    RuntimeCreate(Form<NoChoice>),
    RuntimeList,
}

fn lookup_error(resource: &'static str) -> impl FnOnce(OpcliError) -> OpcliError {
    move |source| OpcliError::Lookup {
        resource,
        source: Box::new(source),
    }
}

async fn lambda_form(ops: &Operations, args: LambdaArgs) -> Result<Form<Runtime>> {
    let runtime = match args.runtime.filter(|id| !id.trim().is_empty()) {
        Some(id) => Some(
            ops.get_runtime(id.trim())
                .await
                .map_err(lookup_error("runtime"))?,
        ),
        None => None,
    };

    Ok(Form::new()
        .with_path(args.path)
        .with_name(args.name)
        .with_dependency(runtime)
        .with_lambda_type(args.lambda_type.map(Into::into)))
}

pub async fn resolve(resource: Resource, ops: &Operations) -> Result<Plan> {
    let plan = match resource {
        Resource::Lambda(command) => match command {
            LambdaCommand::Create(args) => Plan::LambdaCreate(lambda_form(ops, args).await?),
            LambdaCommand::Deploy(args) => Plan::LambdaDeploy(lambda_form(ops, args).await?),
            LambdaCommand::List => Plan::LambdaList,
            LambdaCommand::Start { id } => Plan::LambdaStart(id),
            LambdaCommand::Destroy { id } => Plan::LambdaDestroy(id),
        },
        Resource::Endpoint(command) => match command {
            EndpointCommand::Create(args) => {
                let lambda = match args.lambda_id.filter(|id| !id.trim().is_empty()) {
                    Some(id) => Some(
                        ops.get_lambda(id.trim())
                            .await
                            .map_err(lookup_error("lambda"))?,
                    ),
                    None => None,
                };
                Plan::EndpointCreate(
                    Form::new()
                        .with_name(args.name)
                        .with_path(args.path)
                        .with_dependency(lambda),
                )
            }
            EndpointCommand::List => Plan::EndpointList,
        },
        Resource::Runtime(command) => match command {
            RuntimeCommand::Create { path, name } => {
                Plan::RuntimeCreate(Form::new().with_path(Some(path)).with_name(name))
            }
            RuntimeCommand::List => Plan::RuntimeList,
        },
    };

    Ok(plan)
}

pub async fn run<F: Frontend>(
    plan: Plan,
    ops: &Operations,
    events: &mut EventHandler,
    frontend: &mut F,
) -> Result<FlowReport> {
    let ops = ops.clone();
    match plan {
        Plan::LambdaCreate(form) => {
            run_flow(&mut LambdaCreate::wizard(ops, form), events, frontend).await
        }
        Plan::LambdaList => run_flow(&mut LambdaList::wizard(ops), events, frontend).await,
        Plan::LambdaStart(id) => {
            run_flow(&mut LambdaStart::wizard(ops, id), events, frontend).await
        }
        Plan::LambdaDestroy(id) => {
            run_flow(&mut LambdaDestroy::wizard(ops, id), events, frontend).await
        }
        Plan::LambdaDeploy(form) => deploy(ops, form, events, frontend).await,
        Plan::EndpointCreate(form) => {
            run_flow(&mut EndpointCreate::wizard(ops, form), events, frontend).await
        }
        Plan::EndpointList => run_flow(&mut EndpointList::wizard(ops), events, frontend).await,
        Plan::RuntimeCreate(form) => {
            run_flow(&mut RuntimeCreate::wizard(ops, form), events, frontend).await
        }
        Plan::RuntimeList => run_flow(&mut RuntimeList::wizard(ops), events, frontend).await,
    }
}

/// Create a lambda, then start it if creation succeeded. A failed start leaves the lambda in place.
async fn deploy<F: Frontend>(
    ops: Operations,
    form: Form<Runtime>,
    events: &mut EventHandler,
    frontend: &mut F,
) -> Result<FlowReport> {
    let mut create = LambdaCreate::wizard(ops.clone(), form);
    let created = run_flow(&mut create, events, frontend).await?;

    let id = match create.output() {
        Some(lambda) if created.is_success() => lambda.id.clone(),
        _ => return Ok(created),
    };

    info!("Deploying lambda {}", id);
    let mut start = LambdaStart::wizard(ops, id);
    let started = run_flow(&mut start, events, frontend).await?;
    Ok(created.then(started))
}
