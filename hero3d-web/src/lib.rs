/// hero3d Web - WebGL2 hero visualization and page widgets
///
/// Boots on module load: resolves the hero section and its canvas, starts
/// the animation loop from `requestAnimationFrame` and wires the nav,
/// modal, contact-form and footer widgets.
use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod dom;
pub mod error;
pub mod gl;
pub mod input;
pub mod page;
pub mod shaders;
pub mod widgets;

pub use error::{WebError, WebResult};
pub use gl::GlRenderer;
pub use page::HeroPage;

thread_local! {
    static PAGE: RefCell<Option<HeroPage>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let page = HeroPage::mount().map_err(|err| {
        log::error!("hero startup failed: {err}");
        err
    })?;
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

/// Cancel the animation loop and remove every listener
#[wasm_bindgen(js_name = stopHero)]
pub fn stop_hero() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if page.is_none() {
        log::debug!("stopHero called with no running page");
    }
}
