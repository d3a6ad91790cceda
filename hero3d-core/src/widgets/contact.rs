/// Placeholder contact form: acknowledges locally, sends nothing
use std::time::Duration;

pub const ACKNOWLEDGED_LABEL: &str = "送信しました！";
pub const RESTORE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButtonState {
    pub label: String,
    pub disabled: bool,
}

/// What a submit does now and what it does after `restore_after`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub acknowledged: SubmitButtonState,
    pub restore_after: Duration,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    original_label: String,
    pending: bool,
}

impl ContactForm {
    pub fn new(original_label: impl Into<String>) -> Self {
        Self {
            original_label: original_label.into(),
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Handle a submit. `None` while an acknowledgement is already showing;
    /// the form fields are reset either way.
    pub fn submit(&mut self) -> Option<ContactSubmission> {
        if self.pending {
            return None;
        }
        self.pending = true;
        Some(ContactSubmission {
            acknowledged: SubmitButtonState {
                label: ACKNOWLEDGED_LABEL.to_string(),
                disabled: true,
            },
            restore_after: RESTORE_DELAY,
        })
    }

    /// The restore timer fired
    pub fn restore(&mut self) -> SubmitButtonState {
        self.pending = false;
        SubmitButtonState {
            label: self.original_label.clone(),
            disabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_acknowledges_then_restores_after_three_seconds() {
        let mut form = ContactForm::new("送信する");
        let submission = form.submit().unwrap();
        assert_eq!(submission.acknowledged.label, ACKNOWLEDGED_LABEL);
        assert!(submission.acknowledged.disabled);
        assert_eq!(submission.restore_after.as_millis(), 3000);

        let restored = form.restore();
        assert_eq!(restored.label, "送信する");
        assert!(!restored.disabled);
        assert!(!form.is_pending());
    }

    #[test]
    fn second_submit_while_pending_only_resets() {
        let mut form = ContactForm::new("Send");
        assert!(form.submit().is_some());
        assert!(form.submit().is_none());
        form.restore();
        assert!(form.submit().is_some());
    }
}
