//! Match service actor.
//!
//! Owns the reminder bookkeeping and calls into the pure [`Matcher`] on
//! demand. Callers talk to it through a cloneable [`MatchServiceHandle`];
//! every request carries its own reply channel.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::{summarize, Matcher};
use crate::error::{MatchError, Result};
use crate::models::{Item, Preferences, RankedItem, Stats};
use crate::services::reminders::{Reminder, ReminderPolicy, SentMarkers};

/// Pending requests allowed before senders wait
const COMMAND_BUFFER: usize = 64;

/// Outcome of one staleness sweep
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Reminders newly due, each reported once per update cycle
    pub due: Vec<Reminder>,
    /// Listings currently hidden from ranking
    pub hidden: Vec<String>,
}

/// Supplies the current listings to the poller
pub trait ListingSource: Send + 'static {
    fn listings(&self) -> Vec<Item>;
}

impl<F> ListingSource for F
where
    F: Fn() -> Vec<Item> + Send + 'static,
{
    fn listings(&self) -> Vec<Item> {
        self()
    }
}

enum Command {
    Rank {
        query: Option<Item>,
        candidates: Vec<Item>,
        preferences: Preferences,
        now: DateTime<Utc>,
        reply: oneshot::Sender<Vec<RankedItem>>,
    },
    Summarize {
        scored: Vec<RankedItem>,
        reply: oneshot::Sender<Stats>,
    },
    Sweep {
        listings: Vec<Item>,
        now: DateTime<Utc>,
        reply: oneshot::Sender<SweepReport>,
    },
    Shutdown,
}

struct MatchService {
    matcher: Matcher,
    policy: ReminderPolicy,
    markers: SentMarkers,
}

impl MatchService {
    /// Returns false once the service should stop
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Rank {
                query,
                candidates,
                preferences,
                now,
                reply,
            } => {
                let before = candidates.len();
                let visible: Vec<Item> = candidates
                    .into_iter()
                    .filter(|item| !self.policy.is_hidden(item, now))
                    .collect();

                if visible.len() < before {
                    tracing::debug!("Hid {} stale candidates", before - visible.len());
                }

                let ranked = self.matcher.rank(query.as_ref(), &visible, &preferences);
                let _ = reply.send(ranked);
            }
            Command::Summarize { scored, reply } => {
                let _ = reply.send(summarize(&scored));
            }
            Command::Sweep { listings, now, reply } => {
                let report = self.sweep(&listings, now);
                let _ = reply.send(report);
            }
            Command::Shutdown => return false,
        }

        true
    }

    fn sweep(&mut self, listings: &[Item], now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        for item in listings {
            let Some(updated_at) = item.updated_at else {
                continue;
            };

            if self.policy.is_hidden(item, now) {
                report.hidden.push(item.id.clone());
            }

            let sent = self.markers.sent_for(&item.id, updated_at);
            if let Some(day) = self.policy.due_reminder(item, now, &sent) {
                self.markers.mark(&item.id, updated_at, day);
                report.due.push(Reminder {
                    listing_id: item.id.clone(),
                    days_since_update: day,
                });
            }
        }

        let present: HashSet<&str> = listings.iter().map(|item| item.id.as_str()).collect();
        self.markers.retain_ids(&present);

        tracing::debug!(
            "Sweep over {} listings: {} reminders due, {} hidden",
            listings.len(),
            report.due.len(),
            report.hidden.len()
        );

        report
    }
}

/// Cloneable client for a running match service
#[derive(Debug, Clone)]
pub struct MatchServiceHandle {
    tx: mpsc::Sender<Command>,
}

impl MatchServiceHandle {
    /// Rank candidates, leaving out listings hidden as stale right now
    pub async fn rank(
        &self,
        query: Option<Item>,
        candidates: Vec<Item>,
        preferences: Preferences,
    ) -> Result<Vec<RankedItem>> {
        self.rank_at(query, candidates, preferences, Utc::now()).await
    }

    /// Rank candidates, judging staleness as of `now`
    pub async fn rank_at(
        &self,
        query: Option<Item>,
        candidates: Vec<Item>,
        preferences: Preferences,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedItem>> {
        self.request(|reply| Command::Rank {
            query,
            candidates,
            preferences,
            now,
            reply,
        })
        .await
    }

    pub async fn summarize(&self, scored: Vec<RankedItem>) -> Result<Stats> {
        self.request(|reply| Command::Summarize { scored, reply }).await
    }

    /// Check listings for due reminders and hidden status as of `now`
    pub async fn sweep(&self, listings: Vec<Item>, now: DateTime<Utc>) -> Result<SweepReport> {
        self.request(|reply| Command::Sweep { listings, now, reply }).await
    }

    /// Ask the service to stop after the requests already queued
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| MatchError::ServiceUnavailable("service already stopped".to_string()))
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();

        self.tx
            .send(build(reply))
            .await
            .map_err(|_| MatchError::ServiceUnavailable("service stopped".to_string()))?;

        response
            .await
            .map_err(|_| MatchError::ServiceUnavailable("service dropped the request".to_string()))
    }
}

/// Start the match service on the current tokio runtime
///
/// The service stops on [`MatchServiceHandle::shutdown`] or once every
/// handle has been dropped.
pub fn spawn(matcher: Matcher, policy: ReminderPolicy) -> (JoinHandle<()>, MatchServiceHandle) {
    let (tx, mut rx) = mpsc::channel(COMMAND_BUFFER);

    let mut service = MatchService {
        matcher,
        policy,
        markers: SentMarkers::new(),
    };

    let task = tokio::spawn(async move {
        tracing::info!("Match service started");
        while let Some(command) = rx.recv().await {
            if !service.handle(command) {
                break;
            }
        }
        tracing::info!("Match service stopped");
    });

    (task, MatchServiceHandle { tx })
}

/// Periodically sweep listings and forward due reminders to `outbox`
///
/// The first sweep runs immediately. Stops when the outbox is closed or the
/// service is gone. Delivering the reminders is up to whoever reads `outbox`.
pub fn spawn_poller<S: ListingSource>(
    handle: MatchServiceHandle,
    source: S,
    period: Duration,
    outbox: mpsc::Sender<Reminder>,
) -> JoinHandle<()> {
    let period = period.max(Duration::from_millis(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);

        loop {
            ticker.tick().await;

            let report = match handle.sweep(source.listings(), Utc::now()).await {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!("Stopping reminder poller: {}", e);
                    return;
                }
            };

            for reminder in report.due {
                if outbox.send(reminder).await.is_err() {
                    tracing::info!("Reminder outbox closed, stopping poller");
                    return;
                }
            }
        }
    })
}
