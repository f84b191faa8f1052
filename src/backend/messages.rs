use crate::pipeline::ResolvedLink;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commands sent from the caller to the resolver
#[derive(Debug, Clone)]
pub enum ResolveCommand {
    /// Resolve whatever link is found in `text`
    Resolve { text: String },
    /// Stop accepting work; in-flight links still report
    Shutdown,
}

/// Per-link progress reported back as each resolution completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ResolveEvent {
    /// No usable link in the submitted text
    Rejected {
        job_id: Uuid,
        input: String,
        reason: String,
    },
    Started {
        job_id: Uuid,
        url: String,
    },
    Resolved {
        job_id: Uuid,
        url: String,
        link: ResolvedLink,
        finished_at: DateTime<Utc>,
    },
    /// Nothing could be extracted from the source page
    NotFound {
        job_id: Uuid,
        url: String,
        finished_at: DateTime<Utc>,
    },
    Failed {
        job_id: Uuid,
        url: String,
        error: String,
        finished_at: DateTime<Utc>,
    },
}

impl ResolveEvent {
    pub fn job_id(&self) -> Uuid {
        match self {
            ResolveEvent::Rejected { job_id, .. }
            | ResolveEvent::Started { job_id, .. }
            | ResolveEvent::Resolved { job_id, .. }
            | ResolveEvent::NotFound { job_id, .. }
            | ResolveEvent::Failed { job_id, .. } => *job_id,
        }
    }

    /// Whether this is the last event for its job
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResolveEvent::Started { .. })
    }
}
