use std::any::Any;
use std::io;
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error};
use futures_util::FutureExt;

use crate::{
    EngineEvent, EngineStopped, FailureKind, GenerateBody, LandingService, ReqwestLandingService,
    ServiceError, ServiceSettings,
};

const TASK_FAILURE_MESSAGE: &str = "request failed unexpectedly";

enum EngineCommand {
    Generate(GenerateBody),
    Retrieve { domain: String },
}

impl EngineCommand {
    /// The event reported when the task serving this command dies.
    fn failure_event(&self) -> impl FnOnce(ServiceError) -> EngineEvent {
        let domain = match self {
            EngineCommand::Generate(_) => None,
            EngineCommand::Retrieve { domain } => Some(domain.clone()),
        };
        move |err| match domain {
            None => EngineEvent::GenerationCompleted(Err(err)),
            Some(domain) => EngineEvent::PreviewCompleted {
                domain,
                result: Err(err),
            },
        }
    }
}

/// Runs service calls on a private tokio runtime and reports back over a channel.
///
/// Requests are never cancelled once accepted; each one produces exactly one
/// event, including when the service call panics.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> io::Result<Self> {
        let service = ReqwestLandingService::new(settings).map_err(io::Error::other)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn LandingService>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("landing-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(service.as_ref(), command, event_tx).await;
                    });
                }
                engine_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a generation. `Err` means no event will ever arrive for it.
    pub fn generate(&self, body: GenerateBody) -> Result<(), EngineStopped> {
        self.cmd_tx
            .send(EngineCommand::Generate(body))
            .map_err(|_| EngineStopped)
    }

    /// Queues a retrieval. `Err` means no event will ever arrive for it.
    pub fn retrieve(&self, domain: impl Into<String>) -> Result<(), EngineStopped> {
        self.cmd_tx
            .send(EngineCommand::Retrieve {
                domain: domain.into(),
            })
            .map_err(|_| EngineStopped)
    }

    pub fn try_recv(&self) -> Result<Option<EngineEvent>, EngineStopped> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(EngineStopped),
        }
    }

    /// Waits up to `timeout`. `Ok(None)` is a timeout; `Err` means the engine is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineStopped> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineStopped),
        }
    }
}

async fn handle_command(
    service: &dyn LandingService,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let on_failure = command.failure_event();
    let event = match AssertUnwindSafe(run_command(service, command))
        .catch_unwind()
        .await
    {
        Ok(event) => event,
        Err(payload) => {
            engine_error!("service task panicked: {}", panic_message(payload.as_ref()));
            on_failure(ServiceError::new(FailureKind::Internal, TASK_FAILURE_MESSAGE))
        }
    };
    let _ = event_tx.send(event);
}

async fn run_command(service: &dyn LandingService, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Generate(body) => {
            EngineEvent::GenerationCompleted(service.generate(&body).await)
        }
        EngineCommand::Retrieve { domain } => {
            let result = service.retrieve(&domain).await;
            EngineEvent::PreviewCompleted { domain, result }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
