use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::error::MessagingError;
use crate::messaging::message::Message;

const INBOX_CAPACITY: usize = 16;
const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// A message plus the slot its answer goes into.
#[derive(Debug)]
pub struct Envelope {
    pub message: Message,
    reply: oneshot::Sender<Message>,
}

impl Envelope {
    pub(crate) fn into_parts(self) -> (Message, oneshot::Sender<Message>) {
        (self.message, self.reply)
    }

    /// Answer the sender. A sender that stopped waiting is ignored.
    pub fn reply(self, message: Message) {
        let _ = self.reply.send(message);
    }
}

/// Receiving end owned by a context's event loop.
pub type Inbox = mpsc::Receiver<Envelope>;

/// Sending end used by other contexts. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ContextHandle {
    tx: mpsc::Sender<Envelope>,
    reply_timeout: Duration,
}

/// Create a request/response channel into one context.
pub fn context_channel() -> (ContextHandle, Inbox) {
    let (tx, rx) = mpsc::channel(INBOX_CAPACITY);
    (
        ContextHandle {
            tx,
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        },
        rx,
    )
}

impl ContextHandle {
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }

    /// Whether the receiving context has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Send one message and wait for its reply.
    pub async fn request(&self, message: Message) -> Result<Message, MessagingError> {
        let kind = message.kind();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                message,
                reply: reply_tx,
            })
            .await
            .map_err(|_| MessagingError::NotReady)?;

        match tokio::time::timeout(self.reply_timeout, reply_rx).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(_)) => Err(MessagingError::NoResponse(kind.to_string())),
            Err(_) => Err(MessagingError::Timeout(self.reply_timeout.as_millis() as u64)),
        }
    }
}

// ============================================================================
// Bounded retry
// ============================================================================

/// Retry schedule for deliveries to a context that may not be ready yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            initial_delay: Duration::from_millis(150),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            attempts: 1,
            ..Self::default()
        }
    }
}

/// Run `op` until it succeeds, fails permanently, or attempts run out.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, MessagingError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MessagingError>>,
{
    let attempts = policy.attempts.max(1);
    let mut delay = policy.initial_delay;

    for attempt in 1..=attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < attempts => {
                debug!(attempt, error = %e, delay_ms = delay.as_millis() as u64, "delivery failed, retrying");
                tokio::time::sleep(delay).await;
                delay *= policy.multiplier.max(1);
            }
            Err(e) => return Err(e),
        }
    }

    Err(MessagingError::NotReady)
}
