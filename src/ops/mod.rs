//! Remote operations composed from single control plane calls.
//!
//! Uploads happen before create calls; start and destroy block on the task
//! they spawn so callers see the finished result, not just acceptance.

mod poll;

pub use poll::{await_completion, PollSettings};

use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::archive;
use crate::api::{
    CreateEndpoint, CreateLambda, CreateRuntime, Endpoint, Lambda, LambdaType, Runtime, TaskRef,
    TaskState, SharedControlPlane,
};
use crate::error::{OpcliError, Result};

/// Input for a new lambda, archive not yet uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLambda {
    pub name: String,
    pub runtime: String,
    pub lambda_type: LambdaType,
    pub path: PathBuf,
}

#[derive(Clone)]
pub struct Operations {
    api: SharedControlPlane,
    poll: PollSettings,
}

impl Operations {
    pub fn new(api: SharedControlPlane, poll: PollSettings) -> Self {
        Self { api, poll }
    }

    async fn upload(&self, path: &Path) -> Result<String> {
        let path = path.to_path_buf();
        let payload = tokio::task::spawn_blocking(move || archive::prepare(&path))
            .await
            .map_err(|e| OpcliError::Io(std::io::Error::other(e)))??;

        let upload = self.api.upload(payload.file_name, payload.bytes).await?;
        Ok(upload.id)
    }

    /// Poll a task to completion, turning FAILED into an error
    async fn finish(&self, task: TaskRef) -> Result<()> {
        let status = await_completion(self.api.as_ref(), &task.task, &self.poll).await?;
        if status.status == TaskState::Failed {
            return Err(OpcliError::TaskFailed {
                task: task.task,
                message: status.failure_message(),
            });
        }
        Ok(())
    }

    pub async fn create_lambda(&self, input: NewLambda) -> Result<Lambda> {
        let archive = self.upload(&input.path).await?;
        info!("Creating lambda {} from {:?}", input.name, input.path);

        self.api
            .create_lambda(CreateLambda {
                name: input.name,
                runtime: input.runtime,
                lambda_type: input.lambda_type,
                archive,
            })
            .await
    }

    pub async fn list_lambdas(&self) -> Result<Vec<Lambda>> {
        self.api.list_lambdas().await
    }

    pub async fn get_lambda(&self, id: &str) -> Result<Lambda> {
        self.api.get_lambda(id).await
    }

    /// Start a lambda and return its state once the start task has finished
    pub async fn start_lambda(&self, id: &str) -> Result<Lambda> {
        info!("Starting lambda {}", id);
        let task = self.api.start_lambda(id).await?;
        self.finish(task).await?;
        self.api.get_lambda(id).await
    }

    pub async fn destroy_lambda(&self, id: &str) -> Result<()> {
        info!("Destroying lambda {}", id);
        let task = self.api.destroy_lambda(id).await?;
        self.finish(task).await
    }

    pub async fn create_runtime(&self, name: String, path: &Path) -> Result<Runtime> {
        let dockerfile = self.upload(path).await?;
        info!("Creating runtime {} from {:?}", name, path);
        self.api
            .create_runtime(CreateRuntime { name, dockerfile })
            .await
    }

    pub async fn list_runtimes(&self) -> Result<Vec<Runtime>> {
        self.api.list_runtimes().await
    }

    pub async fn get_runtime(&self, id: &str) -> Result<Runtime> {
        self.api.get_runtime(id).await
    }

    pub async fn create_endpoint(&self, request: CreateEndpoint) -> Result<Endpoint> {
        info!("Creating endpoint {} at {}", request.name, request.path);
        self.api.create_endpoint(request).await
    }

    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        self.api.list_endpoints().await
    }
}
