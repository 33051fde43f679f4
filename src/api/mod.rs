//! Control plane resource types and the client boundary.
//!
//! Everything here is a snapshot of remote state. Wizards select among these
//! values or print them; they never mutate them.

pub mod archive;
mod client;
#[cfg(test)]
pub mod mock;

pub use client::{ControlPlane, HttpControlPlane, SharedControlPlane};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a lambda can be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LambdaType {
    /// Reachable from outside through an endpoint
    Endpoint,
    /// Only used for internal communication
    Internal,
}

impl LambdaType {
    pub const ALL: [LambdaType; 2] = [LambdaType::Endpoint, LambdaType::Internal];

    pub fn as_str(&self) -> &'static str {
        match self {
            LambdaType::Endpoint => "ENDPOINT",
            LambdaType::Internal => "INTERNAL",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LambdaType::Endpoint => "Endpoint",
            LambdaType::Internal => "Internal",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LambdaType::Endpoint => "Could be called outside",
            LambdaType::Internal => "Being used for internal communication only",
        }
    }
}

impl std::fmt::Display for LambdaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lambda {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda_type: Option<LambdaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLambda {
    pub name: String,
    pub runtime: String,
    pub lambda_type: LambdaType,
    pub archive: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRuntime {
    pub name: String,
    pub dockerfile: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEndpoint {
    pub name: String,
    pub path: String,
    pub lambda: String,
}

/// Reference to a server-side task returned by start/destroy calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    pub task: String,
}

/// Reference to an uploaded archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRef {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskState {
    Pending,
    Succeeded,
    Failed,
}

/// Local view of a remote task. Details are only populated on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub id: String,
    pub status: TaskState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl TaskStatus {
    /// Detail key the control plane uses for failure messages
    pub const ERROR_DETAIL: &'static str = "error";

    pub fn is_pending(&self) -> bool {
        self.status == TaskState::Pending
    }

    pub fn failure_message(&self) -> String {
        match self
            .details
            .as_ref()
            .and_then(|details| details.get(Self::ERROR_DETAIL))
        {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => "no error detail reported".to_string(),
        }
    }
}

/// Error body returned by the control plane on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lambda_omits_absent_attributes() {
        let lambda = Lambda {
            id: "l1".to_string(),
            name: "foo".to_string(),
            runtime: None,
            lambda_type: None,
            archive: None,
        };

        let json = serde_json::to_string(&lambda).unwrap();
        assert_eq!(json, r#"{"id":"l1","name":"foo"}"#);
    }

    #[test]
    fn lambda_type_uses_wire_names() {
        let lambda: Lambda =
            serde_json::from_str(r#"{"id":"l2","name":"bar","lambda_type":"INTERNAL"}"#).unwrap();
        assert_eq!(lambda.lambda_type, Some(LambdaType::Internal));
        assert_eq!(LambdaType::Endpoint.to_string(), "ENDPOINT");
    }

    #[test]
    fn failed_task_exposes_error_detail() {
        let task: TaskStatus = serde_json::from_str(
            r#"{"id":"t1","status":"FAILED","details":{"error":"boom","code":7}}"#,
        )
        .unwrap();

        assert!(!task.is_pending());
        assert_eq!(task.failure_message(), "boom");
    }

    #[test]
    fn failed_task_without_details_still_has_a_message() {
        let task: TaskStatus = serde_json::from_str(r#"{"status":"FAILED"}"#).unwrap();
        assert_eq!(task.failure_message(), "no error detail reported");
    }
}
