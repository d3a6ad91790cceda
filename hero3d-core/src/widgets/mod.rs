/// DOM-independent state machines for the page widgets.
///
/// Each machine returns the attribute values or effects the page should
/// apply; the web crate owns the actual elements.
pub mod contact;
pub mod modal;
pub mod nav;

pub use contact::{ContactForm, ContactSubmission, SubmitButtonState};
pub use modal::{card_click_opens, ModalController, ModalEffect, BODY_OPEN_CLASS};
pub use nav::{NavAttributes, NavToggle};
