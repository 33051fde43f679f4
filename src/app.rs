//! Single-writer loop that owns a running flow.
//!
//! Terminal events and action completions are serialized here; everything
//! the wizard asks for runs on its own tokio task and reports back once.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::{OpcliError, Result};
use crate::event::{Event, EventHandler};
use crate::wizard::{Action, Capability, Message, Status, View, Wizard};

/// Anything that can show a [`View`]
pub trait Frontend {
    fn draw(&mut self, view: &View) -> Result<()>;
}

/// How a flow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReport {
    pub status: Status,
    /// Ctrl+C ended the flow before it finished
    pub interrupted: bool,
    pub transcript: String,
}

impl FlowReport {
    fn finished<C: Capability>(wizard: &Wizard<C>) -> Self {
        Self {
            status: wizard.status(),
            interrupted: false,
            transcript: wizard.transcript().render(),
        }
    }

    fn interrupted<C: Capability>(wizard: &Wizard<C>) -> Self {
        Self {
            interrupted: true,
            ..Self::finished(wizard)
        }
    }

    pub fn is_success(&self) -> bool {
        !self.interrupted && self.status.is_success()
    }

    pub fn exit_code(&self) -> u8 {
        if self.interrupted {
            130
        } else if self.status.is_success() {
            0
        } else {
            1
        }
    }

    /// Combine with the report of a flow that ran after this one
    pub fn then(self, next: FlowReport) -> FlowReport {
        let transcript = match (self.transcript.is_empty(), next.transcript.is_empty()) {
            (_, true) => self.transcript,
            (true, false) => next.transcript,
            (false, false) => format!("{}\n\n{}", self.transcript, next.transcript),
        };
        FlowReport {
            status: next.status,
            interrupted: next.interrupted,
            transcript,
        }
    }
}

enum Next<C: Capability> {
    Terminal(Option<Event>),
    Completed(Message<C>),
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Drive a wizard until it closes or the user interrupts it
pub async fn run_flow<C: Capability, F: Frontend>(
    wizard: &mut Wizard<C>,
    events: &mut EventHandler,
    frontend: &mut F,
) -> Result<FlowReport> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message<C>>();
    let (verb, noun) = wizard.capability().subject();
    info!("Starting {} {} flow", verb, noun);

    let mut closed = dispatch(wizard.capability(), wizard.advance(None), &tx);
    frontend.draw(&wizard.view())?;

    while !closed {
        let next = tokio::select! {
            event = events.next() => Next::Terminal(event),
            Some(message) = rx.recv() => Next::Completed(message),
        };

        let message = match next {
            Next::Terminal(None) => {
                return Err(OpcliError::Terminal("event stream closed".to_string()));
            }
            Next::Terminal(Some(Event::Key(key))) if is_interrupt(&key) => {
                info!("{} {} flow interrupted", verb, noun);
                debug!("Last frame:\n{}", wizard.view().to_text());
                return Ok(FlowReport::interrupted(wizard));
            }
            Next::Terminal(Some(Event::Key(key))) => Message::Key(key),
            Next::Terminal(Some(Event::Resize)) => {
                frontend.draw(&wizard.view())?;
                continue;
            }
            Next::Terminal(Some(Event::Tick)) => {
                wizard.tick();
                frontend.draw(&wizard.view())?;
                continue;
            }
            Next::Completed(message) => message,
        };

        closed = dispatch(wizard.capability(), wizard.advance(Some(message)), &tx);
        frontend.draw(&wizard.view())?;
    }

    info!("{} {} flow ended as {:?}", verb, noun, wizard.status());
    debug!("Last frame:\n{}", wizard.view().to_text());
    Ok(FlowReport::finished(wizard))
}

/// Spawn the work behind each action. Returns true once the flow asked to close.
fn dispatch<C: Capability>(
    capability: Arc<C>,
    actions: Vec<Action<C::Choice>>,
    tx: &mpsc::UnboundedSender<Message<C>>,
) -> bool {
    let mut closed = false;

    for action in actions {
        let work: BoxFuture<'static, Message<C>> = match action {
            Action::Close => {
                closed = true;
                continue;
            }
            Action::Load => {
                debug!("Dispatching load");
                let capability = Arc::clone(&capability);
                async move { Message::Loaded(capability.load().await) }.boxed()
            }
            Action::Submit(form) => {
                debug!("Dispatching submit");
                let capability = Arc::clone(&capability);
                async move { Message::Submitted(capability.submit(form).await) }.boxed()
            }
        };

        let tx = tx.clone();
        tokio::spawn(async move {
            // The flow may already be gone; its completion is then moot
            let _ = tx.send(work.await);
        });
    }

    closed
}
