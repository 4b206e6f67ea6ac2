//! Confirmation Gate
//!
//! A blocking yes/no prompt. The gate holds one pending action; accepting hands
//! the action back to the caller to run, cancelling drops it.

/// Text of a confirmation prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".into(),
            cancel_label: "Cancel".into(),
        }
    }

    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

/// Holds at most one prompt and the action bound to it
#[derive(Clone, Debug)]
pub struct ConfirmGate<A> {
    pending: Option<(ConfirmRequest, A)>,
}

impl<A> Default for ConfirmGate<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmGate<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the prompt. A prompt already open is replaced.
    pub fn open(&mut self, request: ConfirmRequest, action: A) {
        self.pending = Some((request, action));
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn request(&self) -> Option<&ConfirmRequest> {
        self.pending.as_ref().map(|(request, _)| request)
    }

    /// Close the prompt and return the bound action for the caller to run
    pub fn accept(&mut self) -> Option<A> {
        self.pending.take().map(|(_, action)| action)
    }

    /// Close the prompt without running anything
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_returns_bound_action() {
        let mut gate = ConfirmGate::new();
        gate.open(ConfirmRequest::new("Delete", "Sure?"), 42);
        assert!(gate.is_open());
        assert_eq!(gate.accept(), Some(42));
        assert!(!gate.is_open());
        assert_eq!(gate.accept(), None);
    }

    #[test]
    fn test_cancel_drops_action() {
        let mut gate = ConfirmGate::new();
        gate.open(ConfirmRequest::new("Delete", "Sure?"), "payload");
        gate.cancel();
        assert!(gate.request().is_none());
        assert_eq!(gate.accept(), None);
    }

    #[test]
    fn test_default_labels() {
        let request = ConfirmRequest::new("t", "m");
        assert_eq!(request.confirm_label, "Confirm");
        assert_eq!(request.cancel_label, "Cancel");
    }
}
