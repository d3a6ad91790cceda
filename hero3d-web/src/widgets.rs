/// DOM bindings for the page widgets around the hero.
///
/// Every widget is optional: missing markup disables it and the rest of
/// the page carries on.
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use hero3d_core::widgets::{
    card_click_opens, ContactForm, ModalController, ModalEffect, NavAttributes, NavToggle,
    BODY_OPEN_CLASS,
};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlIFrameElement,
    KeyboardEvent, Window,
};

use crate::dom;

/// Wire up every widget present in the document
pub fn install(window: &Window, document: &Document) -> Vec<EventListener> {
    let mut listeners = Vec::new();
    listeners.extend(install_nav(window, document));
    listeners.extend(install_modals(window, document));
    listeners.extend(install_contact_form(document));
    set_footer_year(document);
    listeners
}

fn apply_nav(attrs: NavAttributes, toggle: &Element, nav: &Element) {
    let _ = nav.set_attribute("data-visible", attrs.data_visible);
    let _ = toggle.set_attribute("aria-expanded", attrs.aria_expanded);
    let _ = toggle
        .class_list()
        .toggle_with_force("is-open", attrs.is_open_class);
}

fn install_nav(window: &Window, document: &Document) -> Vec<EventListener> {
    let (Some(toggle), Some(nav)) = (
        dom::optional::<Element>(document, ".nav-toggle"),
        dom::optional::<Element>(document, "#site-nav"),
    ) else {
        return Vec::new();
    };

    let state = Rc::new(RefCell::new(NavToggle::from_attribute(
        nav.get_attribute("data-visible").as_deref(),
    )));

    let mut listeners = Vec::new();
    {
        let state = Rc::clone(&state);
        let (button, nav) = (toggle.clone(), nav.clone());
        listeners.push(EventListener::new(&toggle, "click", move |_event| {
            let attrs = state.borrow_mut().toggle();
            apply_nav(attrs, &button, &nav);
        }));
    }

    for link in dom::query_all_in(&nav, "a") {
        let state = Rc::clone(&state);
        let (window, button, nav) = (window.clone(), toggle.clone(), nav.clone());
        listeners.push(EventListener::new(&link, "click", move |_event| {
            let closed = state
                .borrow_mut()
                .link_selected(dom::viewport_width(&window));
            if let Some(attrs) = closed {
                apply_nav(attrs, &button, &nav);
            }
        }));
    }
    listeners
}

/// Modal controller plus the elements its indices refer to
struct Modals {
    controller: ModalController,
    elements: Vec<Element>,
    body: Option<HtmlElement>,
}

impl Modals {
    fn register(&mut self, modal: Element) -> usize {
        let deferred_src = modal
            .query_selector("iframe")
            .ok()
            .flatten()
            .and_then(|iframe| iframe.get_attribute("data-src"));
        let index = self.controller.register(modal.id(), deferred_src);
        self.elements.push(modal);
        index
    }

    /// Index of the modal with `id`, registering it on first sight
    fn resolve(&mut self, document: &Document, id: &str) -> Option<usize> {
        if let Some(index) = self.controller.find(id) {
            return Some(index);
        }
        let modal = document.get_element_by_id(id)?;
        Some(self.register(modal))
    }

    fn apply(&self, effects: Vec<ModalEffect>) {
        for effect in effects {
            match effect {
                ModalEffect::SetHidden { modal, hidden } => {
                    if let Some(element) = self.elements.get(modal) {
                        let value = if hidden { "true" } else { "false" };
                        let _ = element.set_attribute("aria-hidden", value);
                    }
                }
                ModalEffect::LockBody(locked) => {
                    if let Some(body) = &self.body {
                        let _ = body.class_list().toggle_with_force(BODY_OPEN_CLASS, locked);
                    }
                }
                ModalEffect::LoadFrame { modal, src } => {
                    let iframe = self
                        .elements
                        .get(modal)
                        .and_then(|element| element.query_selector("iframe").ok().flatten())
                        .and_then(|iframe| iframe.dyn_into::<HtmlIFrameElement>().ok());
                    if let Some(iframe) = iframe {
                        iframe.set_src(&src);
                        let _ = iframe.remove_attribute("data-src");
                    }
                }
                ModalEffect::FocusClose { modal } => {
                    let close = self
                        .elements
                        .get(modal)
                        .and_then(|element| element.query_selector(".modal-close").ok().flatten())
                        .and_then(|close| close.dyn_into::<HtmlElement>().ok());
                    if let Some(close) = close {
                        let _ = close.focus();
                    }
                }
            }
        }
    }
}

fn install_modals(window: &Window, document: &Document) -> Vec<EventListener> {
    let modals = Rc::new(RefCell::new(Modals {
        controller: ModalController::new(),
        elements: Vec::new(),
        body: document.body(),
    }));
    let mut listeners = Vec::new();

    for modal in dom::query_all(document, ".modal") {
        let index = modals.borrow_mut().register(modal.clone());
        let modals = Rc::clone(&modals);
        listeners.push(EventListener::new(&modal, "click", move |event| {
            let closes = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .is_some_and(|target| target.has_attribute("data-close"));
            if closes {
                let mut modals = modals.borrow_mut();
                let effects = modals.controller.close(index);
                modals.apply(effects);
            }
        }));
    }

    for card in dom::query_all(document, ".work-card[data-target]") {
        let Some(target_id) = card
            .get_attribute("data-target")
            .filter(|id| !id.is_empty())
        else {
            continue;
        };
        let modals = Rc::clone(&modals);
        let (window, document) = (window.clone(), document.clone());
        listeners.push(EventListener::new(&card, "click", move |event| {
            let mut modals = modals.borrow_mut();
            let Some(index) = modals.resolve(&document, &target_id) else {
                return;
            };
            let hit_control = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.closest(".open-modal").ok().flatten())
                .is_some();
            if card_click_opens(hit_control, dom::viewport_width(&window)) {
                let effects = modals.controller.open(index);
                modals.apply(effects);
            }
        }));
    }

    {
        let modals = Rc::clone(&modals);
        listeners.push(EventListener::new(window, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut modals = modals.borrow_mut();
            let effects = modals.controller.key_pressed(&event.key());
            modals.apply(effects);
        }));
    }

    log::debug!("{} modals registered", modals.borrow().elements.len());
    listeners
}

fn install_contact_form(document: &Document) -> Option<EventListener> {
    let form = dom::optional::<HtmlFormElement>(document, ".contact-form")?;
    let button = form
        .query_selector("button[type=\"submit\"]")
        .ok()
        .flatten()
        .and_then(|button| button.dyn_into::<HtmlButtonElement>().ok());
    let state = Rc::new(RefCell::new(ContactForm::new(
        button
            .as_ref()
            .and_then(|button| button.text_content())
            .unwrap_or_default(),
    )));

    let target = form.clone();
    Some(EventListener::new_with_options(
        &target,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            if let Some(button) = &button {
                let submission = state.borrow_mut().submit();
                if let Some(submission) = submission {
                    button.set_text_content(Some(&submission.acknowledged.label));
                    button.set_disabled(submission.acknowledged.disabled);

                    let (button, state) = (button.clone(), Rc::clone(&state));
                    let delay = submission.restore_after.as_millis() as u32;
                    Timeout::new(delay, move || {
                        let restored = state.borrow_mut().restore();
                        button.set_text_content(Some(&restored.label));
                        button.set_disabled(restored.disabled);
                    })
                    .forget();
                }
            }
            form.reset();
        },
    ))
}

fn set_footer_year(document: &Document) {
    if let Some(year) = document.get_element_by_id("year") {
        let now = js_sys::Date::new_0();
        year.set_text_content(Some(&now.get_full_year().to_string()));
    }
}
