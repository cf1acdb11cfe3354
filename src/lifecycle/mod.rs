//! Node lifecycle transitions (drain, leave)
//!
//! Each target runs its own fetch, mutate, write-back sequence; one
//! unreachable node never blocks the rest of the batch. The write-back
//! carries the fetched snapshot with a single field overridden and no
//! version check, so a concurrent update between fetch and write can be
//! overwritten by this one.

use tracing::{debug, warn};

use crate::client::NodeStore;
use crate::resources::{NodeUpdate, HEALTH_LEFT};

/// Per-batch record of which targets succeeded and which failed.
///
/// The two lists partition the requested targets and keep input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Comma-joined failed ids for aggregate error messages.
    pub fn failed_list(&self) -> String {
        self.failed.join(", ")
    }
}

/// Mark each target node as draining. Already-draining nodes update
/// cleanly; setting the flag twice is not an error.
pub async fn drain<S: NodeStore + ?Sized>(store: &S, targets: &[String]) -> BatchOutcome {
    run_batch(store, targets, |update| update.drain = true).await
}

/// Make each target node leave the cluster. Cordon and drain flags are
/// carried over unchanged.
pub async fn leave<S: NodeStore + ?Sized>(store: &S, targets: &[String]) -> BatchOutcome {
    run_batch(store, targets, |update| {
        update.health = Some(HEALTH_LEFT.to_string())
    })
    .await
}

async fn run_batch<S, F>(store: &S, targets: &[String], mutate: F) -> BatchOutcome
where
    S: NodeStore + ?Sized,
    F: Fn(&mut NodeUpdate),
{
    let mut outcome = BatchOutcome::default();

    for id in targets {
        let node = match store.node(id).await {
            Ok(node) => node,
            Err(err) => {
                warn!("fetch failed for node {}: {}", id, err);
                outcome.failed.push(id.clone());
                continue;
            }
        };

        let mut update = NodeUpdate::from_node(&node);
        mutate(&mut update);

        match store.update_node(&update).await {
            Ok(_) => {
                debug!("updated node {}", id);
                outcome.succeeded.push(id.clone());
            }
            Err(err) => {
                warn!("update failed for node {}: {}", id, err);
                outcome.failed.push(id.clone());
            }
        }
    }

    outcome
}
