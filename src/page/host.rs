use std::time::Duration;

use crate::error::HostError;
use crate::page::page_model::{ControlAttributes, ControlRef, DomEvent, SelectOption};

// ============================================================================
// PageHost trait: the only surface through which the core touches a page
// ============================================================================

/// A live document the fill engine can read and write.
///
/// Implementations wrap a real DOM binding or an in-memory model. Every
/// method addresses controls through `ControlRef` handles obtained from
/// `form_controls()` or `radio_group()` on the same page.
pub trait PageHost {
    /// Every `input`, `select`, and `textarea` element, in document order.
    fn form_controls(&self) -> Vec<ControlRef>;

    fn describe(&self, control: ControlRef) -> Result<ControlAttributes, HostError>;

    /// Options of a `select` control, in document order.
    fn options(&self, control: ControlRef) -> Result<Vec<SelectOption>, HostError>;

    /// All radio inputs on the page sharing `name`, in document order.
    fn radio_group(&self, name: &str) -> Vec<ControlRef>;

    fn set_value(&mut self, control: ControlRef, value: &str) -> Result<(), HostError>;

    fn set_checked(&mut self, control: ControlRef, checked: bool) -> Result<(), HostError>;

    /// Fire a bubbling DOM event on the control.
    fn dispatch(&mut self, control: ControlRef, event: DomEvent) -> Result<(), HostError>;

    /// Briefly highlight a filled control; the host reverts it after `duration`.
    fn highlight(&mut self, _control: ControlRef, _duration: Duration) {}

    /// Show a user-visible warning.
    fn alert(&mut self, _message: &str) {}
}
