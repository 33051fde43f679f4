use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    ApiErrorBody, CreateEndpoint, CreateLambda, CreateRuntime, Endpoint, Lambda, Runtime,
    TaskRef, TaskStatus, UploadRef,
};
use crate::error::{OpcliError, Result};

/// Remote control plane surface consumed by the operations layer.
///
/// Wizards never see this trait directly; they go through the capability
/// objects in `flows`, which in turn call `ops::Operations`.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn create_lambda(&self, request: CreateLambda) -> Result<Lambda>;
    async fn list_lambdas(&self) -> Result<Vec<Lambda>>;
    async fn get_lambda(&self, id: &str) -> Result<Lambda>;
    async fn start_lambda(&self, id: &str) -> Result<TaskRef>;
    async fn destroy_lambda(&self, id: &str) -> Result<TaskRef>;

    async fn create_runtime(&self, request: CreateRuntime) -> Result<Runtime>;
    async fn list_runtimes(&self) -> Result<Vec<Runtime>>;
    async fn get_runtime(&self, id: &str) -> Result<Runtime>;

    async fn create_endpoint(&self, request: CreateEndpoint) -> Result<Endpoint>;
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>>;

    async fn get_task(&self, id: &str) -> Result<TaskStatus>;

    /// Upload an archive and return its reference
    async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<UploadRef>;
}

pub type SharedControlPlane = Arc<dyn ControlPlane>;

/// JSON-over-HTTP implementation of [`ControlPlane`]
pub struct HttpControlPlane {
    http: reqwest::Client,
    base_url: String,
}

impl HttpControlPlane {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Using control plane at {}", base_url);

        let http = reqwest::Client::builder()
            .user_agent(concat!("opcli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        let response = self.http.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!("POST {}", path);
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("POST {}", path);
        let response = self.http.post(self.url(path)).send().await?;
        decode(response).await
    }
}

/// Decode a 2xx body, or turn the error body into [`OpcliError::Api`]
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ApiErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
        debug!("Request failed with {}: {}", status, message);
        return Err(OpcliError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn create_lambda(&self, request: CreateLambda) -> Result<Lambda> {
        self.post("/lambda", &request).await
    }

    async fn list_lambdas(&self) -> Result<Vec<Lambda>> {
        self.get("/lambda").await
    }

    async fn get_lambda(&self, id: &str) -> Result<Lambda> {
        self.get(&format!("/lambda/{id}")).await
    }

    async fn start_lambda(&self, id: &str) -> Result<TaskRef> {
        self.post_empty(&format!("/lambda/{id}/start")).await
    }

    async fn destroy_lambda(&self, id: &str) -> Result<TaskRef> {
        self.post_empty(&format!("/lambda/{id}/destroy")).await
    }

    async fn create_runtime(&self, request: CreateRuntime) -> Result<Runtime> {
        self.post("/runtime", &request).await
    }

    async fn list_runtimes(&self) -> Result<Vec<Runtime>> {
        self.get("/runtime").await
    }

    async fn get_runtime(&self, id: &str) -> Result<Runtime> {
        self.get(&format!("/runtime/{id}")).await
    }

    async fn create_endpoint(&self, request: CreateEndpoint) -> Result<Endpoint> {
        self.post("/endpoint", &request).await
    }

    async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        self.get("/endpoint").await
    }

    async fn get_task(&self, id: &str) -> Result<TaskStatus> {
        self.get(&format!("/task/{id}")).await
    }

    async fn upload(&self, file_name: String, bytes: Vec<u8>) -> Result<UploadRef> {
        debug!("POST /upload ({} bytes as {})", bytes.len(), file_name);
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }
}
