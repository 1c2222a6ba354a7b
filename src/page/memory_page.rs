use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::HostError;
use crate::page::host::PageHost;
use crate::page::page_model::{
    ControlAttributes, ControlRef, ControlTag, DomEvent, PageElement, PageSnapshot, SelectOption,
};

/// In-memory page backed by a `PageSnapshot`.
///
/// Writes update the snapshot in place, dispatched events are appended to
/// each element's event log, and alerts are collected, so the snapshot can be
/// serialized back out to inspect what a fill pass did. Elements marked
/// `readonly` reject writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    snapshot: PageSnapshot,
}

impl MemoryPage {
    pub fn new(elements: Vec<PageElement>) -> Self {
        Self {
            snapshot: PageSnapshot {
                elements,
                ..PageSnapshot::default()
            },
        }
    }

    pub fn from_snapshot(snapshot: PageSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::from_snapshot)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json(&content)?)
    }

    pub fn snapshot(&self) -> &PageSnapshot {
        &self.snapshot
    }

    pub fn into_snapshot(self) -> PageSnapshot {
        self.snapshot
    }

    pub fn element(&self, control: ControlRef) -> Option<&PageElement> {
        self.snapshot.elements.get(control.0)
    }

    /// First element with the given name attribute.
    pub fn by_name(&self, name: &str) -> Option<&PageElement> {
        self.snapshot.elements.iter().find(|el| el.name == name)
    }

    pub fn alerts(&self) -> &[String] {
        &self.snapshot.alerts
    }

    /// Append an element, simulating a DOM mutation.
    pub fn push(&mut self, element: PageElement) -> ControlRef {
        self.snapshot.elements.push(element);
        ControlRef(self.snapshot.elements.len() - 1)
    }

    /// Remove an element, simulating a DOM mutation. Later handles shift.
    pub fn remove(&mut self, control: ControlRef) -> Option<PageElement> {
        (control.0 < self.snapshot.elements.len()).then(|| self.snapshot.elements.remove(control.0))
    }

    fn form_element(&self, control: ControlRef) -> Result<&PageElement, HostError> {
        self.snapshot
            .elements
            .get(control.0)
            .filter(|el| el.control_tag().is_some())
            .ok_or(HostError::StaleControl(control))
    }

    fn writable(&mut self, control: ControlRef) -> Result<&mut PageElement, HostError> {
        let el = self
            .snapshot
            .elements
            .get_mut(control.0)
            .filter(|el| el.control_tag().is_some())
            .ok_or(HostError::StaleControl(control))?;
        if el.readonly {
            return Err(HostError::ReadOnly(control));
        }
        Ok(el)
    }
}

impl PageHost for MemoryPage {
    fn form_controls(&self) -> Vec<ControlRef> {
        self.snapshot
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.control_tag().is_some())
            .map(|(i, _)| ControlRef(i))
            .collect()
    }

    fn describe(&self, control: ControlRef) -> Result<ControlAttributes, HostError> {
        self.form_element(control).map(PageElement::attributes)
    }

    fn options(&self, control: ControlRef) -> Result<Vec<SelectOption>, HostError> {
        let el = self.form_element(control)?;
        if el.control_tag() != Some(ControlTag::Select) {
            return Err(HostError::Unsupported {
                control,
                operation: "options",
            });
        }
        Ok(el.options.clone())
    }

    fn radio_group(&self, name: &str) -> Vec<ControlRef> {
        self.snapshot
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.is_radio() && el.name == name)
            .map(|(i, _)| ControlRef(i))
            .collect()
    }

    fn set_value(&mut self, control: ControlRef, value: &str) -> Result<(), HostError> {
        let el = self.writable(control)?;
        el.value = value.to_string();
        Ok(())
    }

    fn set_checked(&mut self, control: ControlRef, checked: bool) -> Result<(), HostError> {
        let el = self.writable(control)?;
        let checkable = el.control_tag() == Some(ControlTag::Input)
            && matches!(
                el.input_type.as_deref().map(str::to_ascii_lowercase).as_deref(),
                Some("checkbox") | Some("radio")
            );
        if !checkable {
            return Err(HostError::Unsupported {
                control,
                operation: "checked",
            });
        }
        el.checked = checked;
        Ok(())
    }

    fn dispatch(&mut self, control: ControlRef, event: DomEvent) -> Result<(), HostError> {
        let el = self
            .snapshot
            .elements
            .get_mut(control.0)
            .ok_or(HostError::StaleControl(control))?;
        el.events.push(event);
        Ok(())
    }

    fn highlight(&mut self, control: ControlRef, duration: Duration) {
        if let Some(el) = self.snapshot.elements.get_mut(control.0) {
            el.highlight_ms = Some(duration.as_millis() as u64);
        }
    }

    fn alert(&mut self, message: &str) {
        debug!(message, "page alert");
        self.snapshot.alerts.push(message.to_string());
    }
}
