use std::collections::HashMap;

use tracing::{info, warn};

use crate::error::MessagingError;
use crate::fill::field_model::FillSummary;
use crate::messaging::channel::{ContextHandle, RetryPolicy, with_retry};
use crate::messaging::message::Message;
use crate::settings::policy::FillPolicy;
use crate::settings::store::{KeyValueStore, Settings};

pub type TabId = u32;

/// Context-menu entry that triggers a fill.
pub const CONTEXT_MENU_ID: &str = "fill-form";
pub const CONTEXT_MENU_TITLE: &str = "Fill Form";

/// Background context: tracks content contexts per tab and forwards fill
/// requests to them.
pub struct Coordinator<S> {
    tabs: HashMap<TabId, ContextHandle>,
    active_tab: Option<TabId>,
    settings: Settings<S>,
    retry: RetryPolicy,
}

impl<S: KeyValueStore> Coordinator<S> {
    pub fn new(settings: Settings<S>) -> Self {
        Self {
            tabs: HashMap::new(),
            active_tab: None,
            settings,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn settings(&self) -> &Settings<S> {
        &self.settings
    }

    /// Record the content context injected into `tab`.
    pub fn register_tab(&mut self, tab: TabId, handle: ContextHandle) {
        info!(tab, "content context registered");
        self.tabs.insert(tab, handle);
    }

    pub fn unregister_tab(&mut self, tab: TabId) -> Option<ContextHandle> {
        if self.active_tab == Some(tab) {
            self.active_tab = None;
        }
        self.tabs.remove(&tab)
    }

    pub fn set_active_tab(&mut self, tab: TabId) {
        self.active_tab = Some(tab);
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.active_tab
    }

    /// Forward a fill request to the active tab.
    pub async fn forward_fill(&self, policy: FillPolicy) -> Result<FillSummary, MessagingError> {
        let tab = self.active_tab.ok_or(MessagingError::NoActiveTab)?;
        self.request_fill(tab, policy).await
    }

    /// Handle a context-menu click: fill `tab` with the stored policy.
    ///
    /// Clicks on other menu entries are ignored and return `Ok(None)`.
    pub async fn on_context_menu(
        &self,
        menu_id: &str,
        tab: TabId,
    ) -> Result<Option<FillSummary>, MessagingError> {
        if menu_id != CONTEXT_MENU_ID {
            return Ok(None);
        }
        let policy = self.settings.policy();
        self.request_fill(tab, policy).await.map(Some)
    }

    async fn request_fill(&self, tab: TabId, policy: FillPolicy) -> Result<FillSummary, MessagingError> {
        let reply = with_retry(&self.retry, move || {
            self.send_to_tab(tab, Message::request_fill(policy.clone()))
        })
        .await;

        match reply {
            Ok(Message::FillComplete(summary)) => Ok(summary),
            Ok(other) => Err(MessagingError::UnexpectedReply {
                expected: "fill-complete",
                got: other.kind().to_string(),
            }),
            Err(e) => {
                warn!(tab, error = %e, "fill request could not be delivered");
                Err(e)
            }
        }
    }

    async fn send_to_tab(&self, tab: TabId, message: Message) -> Result<Message, MessagingError> {
        let handle = self.tabs.get(&tab).ok_or(MessagingError::UnknownTab(tab))?;
        handle.request(message).await
    }
}
