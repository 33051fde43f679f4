use std::time::Duration;
use tracing::debug;

use crate::api::{ControlPlane, TaskStatus};
use crate::config::PollConfig;
use crate::error::{OpcliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    /// None waits for as long as the task stays pending
    pub timeout: Option<Duration>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

impl From<&PollConfig> for PollSettings {
    fn from(config: &PollConfig) -> Self {
        Self {
            interval: config.interval(),
            timeout: config.timeout(),
        }
    }
}

/// Query a task until it leaves PENDING.
///
/// A FAILED task is a successful poll; callers decide what it means. Only a
/// failed status query, or the optional timeout, ends the poll with an error.
pub async fn await_completion(
    api: &dyn ControlPlane,
    task_id: &str,
    settings: &PollSettings,
) -> Result<TaskStatus> {
    let mut waited = Duration::ZERO;

    loop {
        let status = api.get_task(task_id).await?;
        if !status.is_pending() {
            debug!("Task {} finished as {:?} after {:?}", task_id, status.status, waited);
            return Ok(status);
        }

        if let Some(timeout) = settings.timeout {
            if waited + settings.interval > timeout {
                return Err(OpcliError::PollTimeout {
                    task: task_id.to_string(),
                    waited,
                });
            }
        }

        tokio::time::sleep(settings.interval).await;
        waited += settings.interval;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{task, MockControlPlane};
    use crate::api::TaskState;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn pending_twice_then_failed() {
        let api = MockControlPlane::new().with_task_script(vec![
            Ok(task(TaskState::Pending, None)),
            Ok(task(TaskState::Pending, None)),
            Ok(task(TaskState::Failed, Some("boom"))),
        ]);
        let start = Instant::now();

        let status = await_completion(&api, "t1", &PollSettings::default())
            .await
            .unwrap();

        assert_eq!(status.status, TaskState::Failed);
        assert_eq!(status.failure_message(), "boom");
        assert_eq!(api.count_calls("get_task:t1"), 3);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_success_does_not_wait() {
        let api = MockControlPlane::new()
            .with_task_script(vec![Ok(task(TaskState::Succeeded, None))]);
        let start = Instant::now();

        let status = await_completion(&api, "t1", &PollSettings::default())
            .await
            .unwrap();

        assert_eq!(status.status, TaskState::Succeeded);
        assert_eq!(api.count_calls("get_task"), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn query_failure_aborts_the_poll() {
        let api = MockControlPlane::new().with_task_script(vec![
            Ok(task(TaskState::Pending, None)),
            Err("connection reset".to_string()),
            Ok(task(TaskState::Succeeded, None)),
        ]);

        let err = await_completion(&api, "t1", &PollSettings::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("connection reset"));
        assert_eq!(api.count_calls("get_task"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_timeout_stops_a_stuck_task() {
        let api = MockControlPlane::new()
            .with_task_script((0..10).map(|_| Ok(task(TaskState::Pending, None))).collect());
        let settings = PollSettings {
            interval: Duration::from_secs(1),
            timeout: Some(Duration::from_secs(3)),
        };

        let err = await_completion(&api, "t1", &settings).await.unwrap_err();

        match err {
            OpcliError::PollTimeout { task, waited } => {
                assert_eq!(task, "t1");
                assert_eq!(waited, Duration::from_secs(3));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(api.count_calls("get_task"), 4);
    }
}
