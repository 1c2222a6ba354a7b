use tracing::{info, warn};

use crate::error::{MessagingError, StoreError};
use crate::fill::field_model::FillSummary;
use crate::fill::locale::is_supported;
use crate::messaging::channel::{ContextHandle, RetryPolicy, with_retry};
use crate::messaging::message::Message;
use crate::settings::policy::FillPolicy;
use crate::settings::store::{KeyValueStore, Settings};

/// Result of a fill requested from the popup.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStatus {
    Completed(FillSummary),
    Failed(String),
}

/// Popup-side client: talks to the active tab's content context and edits
/// the stored fill policy.
pub struct PopupClient<S> {
    tab: Option<ContextHandle>,
    settings: Settings<S>,
    retry: RetryPolicy,
}

impl<S: KeyValueStore> PopupClient<S> {
    pub fn new(settings: Settings<S>, tab: Option<ContextHandle>) -> Self {
        Self {
            tab,
            settings,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn policy(&self) -> FillPolicy {
        self.settings.policy()
    }

    /// Number of fillable fields on the active tab; 0 when the page does not
    /// answer.
    pub async fn refresh_field_count(&self) -> usize {
        match self.query_count().await {
            Ok(count) => {
                info!(count, "form fields detected");
                count
            }
            Err(e) => {
                warn!(error = %e, "content script not responding");
                0
            }
        }
    }

    /// Ask the active tab to fill itself with the stored policy.
    pub async fn fill(&self) -> FillStatus {
        let policy = self.settings.policy();
        match self.request(Message::request_fill(policy)).await {
            Ok(Message::FillComplete(summary)) => FillStatus::Completed(summary),
            Ok(other) => FillStatus::Failed(
                MessagingError::UnexpectedReply {
                    expected: "fill-complete",
                    got: other.kind().to_string(),
                }
                .to_string(),
            ),
            Err(e) => {
                warn!(error = %e, "error filling form");
                FillStatus::Failed(e.to_string())
            }
        }
    }

    pub fn toggle_validation(&mut self) -> Result<FillPolicy, StoreError> {
        self.settings
            .update_policy(|p| p.respect_validation = !p.respect_validation)
    }

    pub fn toggle_optional_fields(&mut self) -> Result<FillPolicy, StoreError> {
        self.settings
            .update_policy(|p| p.include_optional_fields = !p.include_optional_fields)
    }

    pub fn set_locale(&mut self, locale: &str) -> Result<FillPolicy, StoreError> {
        if !is_supported(locale) {
            warn!(locale, "storing unsupported locale, fills will fall back to the default");
        }
        self.settings.update_policy(|p| p.locale = locale.to_string())
    }

    async fn query_count(&self) -> Result<usize, MessagingError> {
        match self.request(Message::QueryFieldCount).await? {
            Message::CountResponse(count) => Ok(count.count),
            other => Err(MessagingError::UnexpectedReply {
                expected: "count-response",
                got: other.kind().to_string(),
            }),
        }
    }

    async fn request(&self, message: Message) -> Result<Message, MessagingError> {
        let tab = self.tab.as_ref().ok_or(MessagingError::NoActiveTab)?;
        with_retry(&self.retry, move || tab.request(message.clone())).await
    }
}
