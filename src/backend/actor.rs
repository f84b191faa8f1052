use super::messages::{ResolveCommand, ResolveEvent};
use crate::classifier::prepare;
use crate::pipeline::{expand_browse_url, is_browse_url, Resolver};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Accepts links over a channel and resolves each on its own task
///
/// At most `max_concurrent` resolutions hold a rendering context at once.
/// Events for one link never wait on another link.
pub struct ResolverActor {
    receiver: mpsc::Receiver<ResolveCommand>,
    sender: mpsc::Sender<ResolveEvent>,
    resolver: Arc<Resolver>,
    permits: Arc<Semaphore>,
}

impl ResolverActor {
    pub fn new(
        resolver: Arc<Resolver>,
        receiver: mpsc::Receiver<ResolveCommand>,
        sender: mpsc::Sender<ResolveEvent>,
    ) -> Self {
        let permits = Arc::new(Semaphore::new(resolver.settings().max_concurrent.max(1)));
        Self {
            receiver,
            sender,
            resolver,
            permits,
        }
    }

    pub async fn run(mut self) {
        info!("ResolverActor started");
        let mut jobs = JoinSet::new();

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                ResolveCommand::Resolve { text } => {
                    let job_id = Uuid::new_v4();
                    debug!("Job {} accepted: {:?}", job_id, text);
                    jobs.spawn(handle_link(
                        job_id,
                        text,
                        self.resolver.clone(),
                        self.permits.clone(),
                        self.sender.clone(),
                    ));
                }
                ResolveCommand::Shutdown => {
                    info!("Shutdown requested; waiting for {} in-flight links", jobs.len());
                    break;
                }
            }
        }

        while let Some(joined) = jobs.join_next().await {
            if let Err(e) = joined {
                error!("Resolution task ended abnormally: {}", e);
            }
        }
        info!("ResolverActor stopped");
    }
}

/// Start an actor on the current runtime
pub fn spawn_resolver(
    resolver: Arc<Resolver>,
    buffer: usize,
) -> (
    mpsc::Sender<ResolveCommand>,
    mpsc::Receiver<ResolveEvent>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(buffer);
    let (event_tx, event_rx) = mpsc::channel(buffer);
    let actor = ResolverActor::new(resolver, cmd_rx, event_tx);
    let handle = tokio::spawn(actor.run());
    (cmd_tx, event_rx, handle)
}

async fn handle_link(
    job_id: Uuid,
    text: String,
    resolver: Arc<Resolver>,
    permits: Arc<Semaphore>,
    sender: mpsc::Sender<ResolveEvent>,
) {
    let Ok(_permit) = permits.acquire_owned().await else {
        return;
    };

    let text = if is_browse_url(&text) {
        let timeout = resolver.settings().navigation_timeout();
        match expand_browse_url(resolver.browser().as_ref(), &text, timeout).await {
            Ok(expanded) => expanded,
            Err(e) => {
                send(
                    &sender,
                    ResolveEvent::Failed {
                        job_id,
                        url: text,
                        error: e.to_string(),
                        finished_at: Utc::now(),
                    },
                )
                .await;
                return;
            }
        }
    } else {
        text
    };

    let Some(link) = prepare(&text) else {
        send(
            &sender,
            ResolveEvent::Rejected {
                job_id,
                input: text,
                reason: "no valid link found".to_string(),
            },
        )
        .await;
        return;
    };

    let url = link.raw_url.clone();
    send(
        &sender,
        ResolveEvent::Started {
            job_id,
            url: url.clone(),
        },
    )
    .await;

    let event = match resolver.resolve_link(&link).await {
        Ok(Some(resolved)) => ResolveEvent::Resolved {
            job_id,
            url,
            link: resolved,
            finished_at: Utc::now(),
        },
        Ok(None) => ResolveEvent::NotFound {
            job_id,
            url,
            finished_at: Utc::now(),
        },
        Err(e) => ResolveEvent::Failed {
            job_id,
            url,
            error: e.to_string(),
            finished_at: Utc::now(),
        },
    };
    send(&sender, event).await;
}

async fn send(sender: &mpsc::Sender<ResolveEvent>, event: ResolveEvent) {
    if sender.send(event).await.is_err() {
        debug!("Event receiver dropped; result discarded");
    }
}
