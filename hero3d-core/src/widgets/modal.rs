/// Modal dialogs with a single active modal

/// Viewports at or below this width open a card's modal on any click
pub const NARROW_MODAL_MAX_WIDTH: f64 = 720.0;

/// Body class present while a modal is open
pub const BODY_OPEN_CLASS: &str = "modal-open";

/// DOM change requested by the controller, in application order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEffect {
    /// Set `aria-hidden` on the modal
    SetHidden { modal: usize, hidden: bool },
    /// Add or remove [`BODY_OPEN_CLASS`] on `<body>`
    LockBody(bool),
    /// Point the modal's iframe at its deferred source
    LoadFrame { modal: usize, src: String },
    /// Focus the modal's close control
    FocusClose { modal: usize },
}

#[derive(Debug, Clone)]
struct ModalEntry {
    id: String,
    open: bool,
    deferred_src: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    modals: Vec<ModalEntry>,
    active: Option<usize>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a modal by element id, with its iframe's `data-src` if any.
    /// Returns the modal's index.
    pub fn register(&mut self, id: impl Into<String>, deferred_src: Option<String>) -> usize {
        self.modals.push(ModalEntry {
            id: id.into(),
            open: false,
            deferred_src,
        });
        self.modals.len() - 1
    }

    /// Index of the modal with `id`; an empty id names no modal
    pub fn find(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        self.modals.iter().position(|modal| modal.id == id)
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_open(&self, modal: usize) -> bool {
        self.modals.get(modal).is_some_and(|entry| entry.open)
    }

    pub fn open_count(&self) -> usize {
        self.modals.iter().filter(|entry| entry.open).count()
    }

    /// Open `modal`, closing the active one first
    pub fn open(&mut self, modal: usize) -> Vec<ModalEffect> {
        if modal >= self.modals.len() {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if let Some(active) = self.active {
            effects.extend(self.close(active));
        }

        let entry = &mut self.modals[modal];
        entry.open = true;
        effects.push(ModalEffect::SetHidden {
            modal,
            hidden: false,
        });
        effects.push(ModalEffect::LockBody(true));
        if let Some(src) = entry.deferred_src.take() {
            effects.push(ModalEffect::LoadFrame { modal, src });
        }
        effects.push(ModalEffect::FocusClose { modal });

        self.active = Some(modal);
        effects
    }

    /// Close `modal`; the active reference is always cleared
    pub fn close(&mut self, modal: usize) -> Vec<ModalEffect> {
        let Some(entry) = self.modals.get_mut(modal) else {
            return Vec::new();
        };
        entry.open = false;
        self.active = None;
        vec![
            ModalEffect::SetHidden {
                modal,
                hidden: true,
            },
            ModalEffect::LockBody(false),
        ]
    }

    /// Escape closes the active modal, other keys do nothing
    pub fn key_pressed(&mut self, key: &str) -> Vec<ModalEffect> {
        match (key, self.active) {
            ("Escape", Some(active)) => self.close(active),
            _ => Vec::new(),
        }
    }
}

/// Whether a click on a work card should open its modal
pub fn card_click_opens(hit_open_control: bool, viewport_width: f64) -> bool {
    hit_open_control || viewport_width <= NARROW_MODAL_MAX_WIDTH
}
