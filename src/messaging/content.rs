use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::fill::detector::count_fields;
use crate::fill::orchestrator::fill_page_with;
use crate::messaging::channel::{ContextHandle, Inbox, context_channel};
use crate::messaging::message::Message;
use crate::page::host::PageHost;
use crate::trace::logger::TraceLogger;

/// The page-side context: owns one page and answers fill and count requests.
///
/// Requests are served one at a time, so fill passes on the page never
/// overlap.
pub struct ContentScript<P> {
    page: P,
    rng: StdRng,
    tracer: TraceLogger,
}

impl<P: PageHost> ContentScript<P> {
    pub fn new(page: P) -> Self {
        Self {
            page,
            rng: StdRng::from_entropy(),
            tracer: TraceLogger::disabled(),
        }
    }

    /// Content script with a fixed random seed, for reproducible fills.
    pub fn with_seed(page: P, seed: u64) -> Self {
        Self {
            page,
            rng: StdRng::seed_from_u64(seed),
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Answer one message. Messages this context does not handle get no reply.
    pub fn handle(&mut self, message: Message) -> Option<Message> {
        debug!(kind = message.kind(), "content script received message");
        match message {
            Message::RequestFill(policy) => {
                let summary = fill_page_with(&mut self.page, &policy, &mut self.rng, &self.tracer);
                Some(Message::FillComplete(summary))
            }
            Message::QueryFieldCount => Some(Message::count_response(count_fields(&self.page))),
            Message::CountResponse(_) | Message::FillComplete(_) => None,
        }
    }

    /// Serve the inbox until every handle is dropped, then hand the page back.
    pub async fn serve(mut self, mut inbox: Inbox) -> P {
        info!("content script listening");
        while let Some(envelope) = inbox.recv().await {
            let (message, reply_tx) = envelope.into_parts();
            match self.handle(message) {
                Some(reply) => {
                    let _ = reply_tx.send(reply);
                }
                None => drop(reply_tx),
            }
        }
        debug!("content script inbox closed");
        self.page
    }
}

impl<P: PageHost + Send + 'static> ContentScript<P> {
    /// Start serving on the tokio runtime.
    pub fn spawn(self) -> (ContextHandle, JoinHandle<P>) {
        let (handle, inbox) = context_channel();
        let task = tokio::spawn(self.serve(inbox));
        (handle, task)
    }
}
