//! Scripted in-memory control plane for tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{
    ControlPlane, CreateEndpoint, CreateLambda, CreateRuntime, Endpoint, Lambda, LambdaType,
    Runtime, TaskRef, TaskState, TaskStatus, UploadRef,
};
use crate::error::{OpcliError, Result};

#[derive(Default)]
pub struct MockControlPlane {
    lambdas: Mutex<Vec<Lambda>>,
    runtimes: Mutex<Vec<Runtime>>,
    endpoints: Mutex<Vec<Endpoint>>,
    created_lambda: Mutex<Option<std::result::Result<Lambda, String>>>,
    list_failure: Mutex<Option<String>>,
    task_script: Mutex<VecDeque<std::result::Result<TaskStatus, String>>>,
    calls: Mutex<Vec<String>>,
}

pub fn lambda(id: &str, name: &str, lambda_type: Option<LambdaType>) -> Lambda {
    Lambda {
        id: id.to_string(),
        name: name.to_string(),
        runtime: None,
        lambda_type,
        archive: None,
    }
}

pub fn runtime(id: &str, name: &str) -> Runtime {
    Runtime {
        id: id.to_string(),
        name: name.to_string(),
        dockerfile: None,
    }
}

pub fn task(state: TaskState, error: Option<&str>) -> TaskStatus {
    TaskStatus {
        id: "t1".to_string(),
        status: state,
        details: error.map(|message| {
            HashMap::from([(
                TaskStatus::ERROR_DETAIL.to_string(),
                serde_json::Value::String(message.to_string()),
            )])
        }),
    }
}

fn remote_error(message: String) -> OpcliError {
    OpcliError::Api {
        status: 500,
        message,
    }
}

impl MockControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lambdas(self, lambdas: Vec<Lambda>) -> Self {
        *self.lambdas.lock().unwrap() = lambdas;
        self
    }

    pub fn with_runtimes(self, runtimes: Vec<Runtime>) -> Self {
        *self.runtimes.lock().unwrap() = runtimes;
        self
    }

    /// Script the result of the next create_lambda call
    pub fn with_created_lambda(self, result: std::result::Result<Lambda, String>) -> Self {
        *self.created_lambda.lock().unwrap() = Some(result);
        self
    }

    /// Make every list call fail with this message
    pub fn with_list_failure(self, message: &str) -> Self {
        *self.list_failure.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Statuses returned by successive get_task calls. Once exhausted the task reports SUCCEEDED.
    pub fn with_task_script(self, script: Vec<std::result::Result<TaskStatus, String>>) -> Self {
        *self.task_script.lock().unwrap() = script.into();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_list(&self) -> Result<()> {
        match self.list_failure.lock().unwrap().clone() {
            Some(message) => Err(remote_error(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ControlPlane for MockControlPlane {
    async fn create_lambda(&self, request: CreateLambda) -> Result<Lambda> {
        self.record(format!(
            "create_lambda:{}:{}:{}:{}",
            request.name, request.runtime, request.lambda_type, request.archive
        ));
        match self.created_lambda.lock().unwrap().take() {
            Some(Ok(lambda)) => Ok(lambda),
            Some(Err(message)) => Err(remote_error(message)),
            None => Ok(lambda("generated", &request.name, Some(request.lambda_type))),
        }
    }

    async fn list_lambdas(&self) -> Result<Vec<Lambda>> {
        self.record("list_lambdas".to_string());
        self.check_list()?;
        Ok(self.lambdas.lock().unwrap().clone())
    }

    async fn get_lambda(&self, id: &str) -> Result<Lambda> {
        self.record(format!("get_lambda:{id}"));
        self.lambdas
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| OpcliError::Api {
                status: 404,
                message: format!("lambda {id} not found"),
            })
    }

    async fn start_lambda(&self, id: &str) -> Result<TaskRef> {
        self.record(format!("start_lambda:{id}"));
        Ok(TaskRef {
            task: format!("start-{id}"),
        })
    }

    async fn destroy_lambda(&self, id: &str) -> Result<TaskRef> {
        self.record(format!("destroy_lambda:{id}"));
        Ok(TaskRef {
            task: format!("destroy-{id}"),
        })
    }

    async fn create_runtime(&self, request: CreateRuntime) -> Result<Runtime> {
        self.record(format!("create_runtime:{}:{}", request.name, request.dockerfile));
        Ok(runtime("r-new", &request.name))
    }

    async fn list_runtimes(&self) -> Result<Vec<Runtime>> {
        self.record("list_runtimes".to_string());
        self.check_list()?;
        Ok(self.runtimes.lock().unwrap().clone())
    }

    async fn get_runtime(&self, id: &str) -> Result<Runtime> {
        self.record(format!("get_runtime:{id}"));
        self.runtimes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| OpcliError::Api {
                status: 404,
                message: format!("runtime {id} not found"),
            })
    }

    async fn create_endpoint(&self, request: CreateEndpoint) -> Result<Endpoint> {
        self.record(format!(
            "create_endpoint:{}:{}:{}",
            request.name, request.path, request.lambda
        ));
        let endpoint = Endpoint {
            id: "e1".to_string(),
            name: request.name,
            path: Some(request.path),
            lambda: Some(request.lambda),
        };
        self.endpoints.lock().unwrap().push(endpoint.clone());
        Ok(endpoint)
    }

    async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        self.record("list_endpoints".to_string());
        self.check_list()?;
        Ok(self.endpoints.lock().unwrap().clone())
    }

    async fn get_task(&self, id: &str) -> Result<TaskStatus> {
        self.record(format!("get_task:{id}"));
        match self.task_script.lock().unwrap().pop_front() {
            Some(Ok(status)) => Ok(status),
            Some(Err(message)) => Err(remote_error(message)),
            None => Ok(task(TaskState::Succeeded, None)),
        }
    }

    async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<UploadRef> {
        self.record(format!("upload:{}:{}", file_name, bytes.len()));
        Ok(UploadRef {
            id: "u1".to_string(),
        })
    }
}
