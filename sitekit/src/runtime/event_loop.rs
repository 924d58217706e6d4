//! Async host for a [`Page`].

use std::sync::Arc;
use std::time::Instant;

use contact_api::{ApiError, ContactResponse, ContactTransport};
use log::{debug, error, trace};
use sitedom::Event;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval, sleep_until};

use super::Page;
use crate::effect::Effect;

type Completion = (String, Result<ContactResponse, ApiError>);

/// Drives a page from a channel of events until the channel closes and
/// every submission in flight has been applied.
pub struct EventLoop {
    page: Page,
    transport: Arc<dyn ContactTransport>,
    effects: Option<mpsc::UnboundedSender<Effect>>,
}

impl EventLoop {
    pub fn new(page: Page, transport: Arc<dyn ContactTransport>) -> Self {
        Self {
            page,
            transport,
            effects: None,
        }
    }

    /// Forward scroll requests to the host.
    pub fn with_effects(mut self, effects: mpsc::UnboundedSender<Effect>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Run until `events` is closed and nothing is in flight. Returns the
    /// page in its final state.
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) -> Page {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
        let mut in_flight = 0usize;
        let mut closed = false;

        let mut frames = interval(self.page.config().frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            in_flight += self.spawn_submissions(&done_tx);
            self.forward_effects();

            if closed && in_flight == 0 {
                debug!("event loop: input closed, nothing in flight");
                break;
            }

            let next_deadline = self.page.next_deadline();
            let animating = self.page.has_animations();

            tokio::select! {
                // Branch 1: host event
                event = events.recv(), if !closed => match event {
                    Some(event) => {
                        trace!("event loop: {event:?}");
                        self.page.dispatch_at(event, now());
                    }
                    None => closed = true,
                },

                // Branch 2: a submission finished
                Some((form_id, result)) = done_rx.recv() => {
                    in_flight -= 1;
                    self.page.complete_submission_at(&form_id, result, now());
                }

                // Branch 3: flash expiry
                _ = sleep_until_optional(next_deadline) => {
                    let removed = self.page.tick(now());
                    debug!("event loop: {removed} flash message(s) expired");
                }

                // Branch 4: animation frame (only while something animates)
                _ = frames.tick(), if animating => {
                    self.page.frame();
                }
            }
        }

        self.page
    }

    fn spawn_submissions(&mut self, done: &mpsc::UnboundedSender<Completion>) -> usize {
        let pending = self.page.take_submissions();
        let count = pending.len();
        for submission in pending {
            let transport = self.transport.clone();
            let done = done.clone();
            let form_id = submission.form_id;
            let request = submission.request;
            tokio::spawn(async move {
                // Every submission reports back, even if the transport panics.
                let send = tokio::spawn(async move { transport.submit(&request).await });
                let result = match send.await {
                    Ok(result) => result,
                    Err(e) => {
                        error!("event loop: submission task failed: {e}");
                        Err(ApiError::Interrupted(e.to_string()))
                    }
                };
                let _ = done.send((form_id, result));
            });
        }
        count
    }

    fn forward_effects(&mut self) {
        let effects = self.page.take_effects();
        if let Some(tx) = &self.effects {
            for effect in effects {
                if tx.send(effect).is_err() {
                    debug!("event loop: effect receiver dropped");
                    break;
                }
            }
        }
    }
}

/// Current time on tokio's clock, so paused test time applies.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Sleep until a deadline, or wait forever if None.
async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}
