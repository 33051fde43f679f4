use async_trait::async_trait;
use std::sync::Arc;

use super::{name_input, path_input, required};
use crate::api::{CreateEndpoint, Endpoint, Lambda, LambdaType};
use crate::error::Result;
use crate::ops::Operations;
use crate::wizard::{Capability, Form, NoChoice, Selection, Step, Wizard};

pub struct EndpointCreate {
    ops: Operations,
}

impl EndpointCreate {
    pub const STEPS: [Step; 5] = [
        name_input("my-endpoint"),
        Step::Load {
            subject: "lambdas",
            progress: "Loading lambdas...",
        },
        Step::Select {
            selection: Selection::Dependency,
            title: "Lambda endpoints",
            label: "Lambda endpoint",
        },
        path_input("/hello"),
        Step::Submit {
            progress: "Creating endpoint...",
        },
    ];

    pub fn wizard(ops: Operations, form: Form<Lambda>) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops }), Self::STEPS.to_vec(), form)
    }
}

#[async_trait]
impl Capability for EndpointCreate {
    type Choice = Lambda;
    type Output = Endpoint;

    fn subject(&self) -> (&'static str, &'static str) {
        ("create", "endpoint")
    }

    async fn load(&self) -> Result<Vec<Lambda>> {
        self.ops.list_lambdas().await
    }

    /// Only lambdas reachable from outside can back an endpoint
    fn eligible(&self, lambda: &Lambda) -> bool {
        lambda.lambda_type == Some(LambdaType::Endpoint)
    }

    async fn submit(&self, form: Form<Lambda>) -> Result<Endpoint> {
        let lambda = required(form.dependency, "lambda")?;
        self.ops
            .create_endpoint(CreateEndpoint {
                name: required(form.name, "endpoint name")?,
                path: required(form.path, "endpoint path")?,
                lambda: lambda.id,
            })
            .await
    }
}

pub struct EndpointList {
    ops: Operations,
}

impl EndpointList {
    pub const STEPS: [Step; 1] = [Step::Submit {
        progress: "Query endpoints...",
    }];

    pub fn wizard(ops: Operations) -> Wizard<Self> {
        Wizard::new(Arc::new(Self { ops }), Self::STEPS.to_vec(), Form::new())
    }
}

#[async_trait]
impl Capability for EndpointList {
    type Choice = NoChoice;
    type Output = Vec<Endpoint>;

    fn subject(&self) -> (&'static str, &'static str) {
        ("list", "endpoints")
    }

    async fn submit(&self, _form: Form<NoChoice>) -> Result<Vec<Endpoint>> {
        self.ops.list_endpoints().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{lambda, MockControlPlane};
    use crate::ops::PollSettings;
    use crate::wizard::{Action, Active, Message, Position, Status};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn ops(api: &Arc<MockControlPlane>) -> Operations {
        Operations::new(api.clone(), PollSettings::default())
    }

    fn key(code: KeyCode) -> Message<EndpointCreate> {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn only_endpoint_lambdas_are_offered() {
        let api = Arc::new(MockControlPlane::new().with_lambdas(vec![
            lambda("l1", "worker", Some(LambdaType::Internal)),
            lambda("l2", "hello", Some(LambdaType::Endpoint)),
            lambda("l3", "untyped", None),
        ]));
        let mut wizard =
            EndpointCreate::wizard(ops(&api), Form::new().with_name(Some("api".to_string())));

        assert_eq!(wizard.advance(None), vec![Action::Load]);
        let loaded = wizard.capability().load().await;
        wizard.advance(Some(Message::Loaded(loaded)));

        match wizard.view().active {
            Active::Select { items, .. } => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].title, "hello");
                assert_eq!(items[0].description, "ENDPOINT");
            }
            other => panic!("expected picker, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn interactive_create_collects_path_after_lambda() {
        let api = Arc::new(
            MockControlPlane::new()
                .with_lambdas(vec![lambda("l2", "hello", Some(LambdaType::Endpoint))]),
        );
        let mut wizard =
            EndpointCreate::wizard(ops(&api), Form::new().with_name(Some("api".to_string())));
        wizard.advance(None);
        let loaded = wizard.capability().load().await;
        wizard.advance(Some(Message::Loaded(loaded)));

        assert!(wizard.advance(Some(key(KeyCode::Enter))).is_empty());
        assert_eq!(wizard.position(), Position::At(3));

        for c in "/hi".chars() {
            wizard.advance(Some(key(KeyCode::Char(c))));
        }
        let actions = wizard.advance(Some(key(KeyCode::Enter)));
        let Some(Action::Submit(form)) = actions.into_iter().next() else {
            panic!("expected submit");
        };
        let created = wizard.capability().submit(form).await;
        wizard.advance(Some(Message::Submitted(created)));

        assert_eq!(wizard.status(), Status::Succeeded);
        assert_eq!(api.count_calls("create_endpoint:api:/hi:l2"), 1);
        assert!(wizard
            .transcript()
            .render()
            .starts_with("Name: api\nLambda endpoint: hello\nPath: /hi\n\n{"));
    }

    #[tokio::test]
    async fn no_endpoint_lambdas_ends_the_flow() {
        let api = Arc::new(
            MockControlPlane::new()
                .with_lambdas(vec![lambda("l1", "worker", Some(LambdaType::Internal))]),
        );
        let mut wizard =
            EndpointCreate::wizard(ops(&api), Form::new().with_name(Some("api".to_string())));
        wizard.advance(None);
        let loaded = wizard.capability().load().await;

        assert_eq!(
            wizard.advance(Some(Message::Loaded(loaded))),
            vec![Action::Close]
        );
        assert_eq!(wizard.status(), Status::Failed);
        assert!(wizard
            .transcript()
            .render()
            .ends_with("No suitable lambdas found"));
    }
}
