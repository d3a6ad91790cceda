/// The hero page: stage, shared input, listeners and the animation frame
use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use hero3d_core::{Clock, FrameLoop, HeroConfig, HeroRuntime, InputState, LoopControl};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use web_sys::{HtmlCanvasElement, HtmlElement, Performance, Window};

use crate::dom;
use crate::error::{WebError, WebResult};
use crate::gl::GlRenderer;
use crate::input;
use crate::widgets;

/// Attribute on the hero section holding JSON config overrides
pub const CONFIG_ATTRIBUTE: &str = "data-hero-config";

/// Seconds since the page's loop started, from `performance.now()`
pub struct PerformanceClock {
    performance: Performance,
    start_ms: f64,
}

impl PerformanceClock {
    pub fn new(window: &Window) -> WebResult<Self> {
        let performance = window
            .performance()
            .ok_or_else(|| WebError::Js("performance API unavailable".to_string()))?;
        let start_ms = performance.now();
        Ok(Self {
            performance,
            start_ms,
        })
    }
}

impl Clock for PerformanceClock {
    fn elapsed(&self) -> f32 {
        ((self.performance.now() - self.start_ms) / 1000.0) as f32
    }
}

/// Runtime, renderer and frame loop, borrowed together each frame
pub struct Stage {
    pub runtime: HeroRuntime,
    pub renderer: GlRenderer,
    pub frame_loop: FrameLoop<PerformanceClock>,
}

type FrameSlot = Rc<RefCell<Option<AnimationFrame>>>;

/// Everything the running page owns. Dropping it removes the listeners
/// and cancels the pending animation frame.
pub struct HeroPage {
    stage: Rc<RefCell<Stage>>,
    frame: FrameSlot,
    _listeners: Vec<EventListener>,
}

impl HeroPage {
    pub fn mount() -> WebResult<Self> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        let hero: HtmlElement = dom::require(&document, ".hero", "HTMLElement")?;
        let canvas: HtmlCanvasElement =
            dom::require(&document, "#hero-canvas", "HTMLCanvasElement")?;

        let config = read_config(&hero);
        let reduced_query = input::reduced_motion_query(&window);
        let reduced = reduced_query
            .as_ref()
            .is_some_and(|query| query.matches());
        let input = Rc::new(RefCell::new(InputState::new(&config, reduced)));

        let pixel_ratio = dom::pixel_ratio(&window, config.max_pixel_ratio);
        let mut renderer = GlRenderer::new(canvas.clone(), pixel_ratio)?;

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (width, height) = dom::content_size(&hero);
        let mut runtime = HeroRuntime::new(&config, &mut rng, width.max(1), height.max(1));
        runtime.resize(width, height, &mut renderer);

        log::info!(
            "hero mounted: {width}x{height} @{pixel_ratio}x, {} stars, reduced motion {}",
            config.star_count,
            reduced
        );

        let stage = Rc::new(RefCell::new(Stage {
            runtime,
            renderer,
            frame_loop: FrameLoop::new(PerformanceClock::new(&window)?),
        }));

        let mut listeners = vec![
            track_resize(&window, &hero, &stage),
            input::track_pointer(&document, &hero, &input),
        ];
        listeners.extend(input::track_drag(&canvas, &input));
        if let Some(query) = &reduced_query {
            listeners.push(input::track_reduced_motion(query, &input));
        }
        listeners.extend(widgets::install(&window, &document));

        let frame: FrameSlot = Rc::new(RefCell::new(None));
        schedule(&stage, &input, &frame);

        Ok(Self {
            stage,
            frame,
            _listeners: listeners,
        })
    }

    /// Stop the animation loop; listeners stay until the page is dropped
    pub fn stop(&self) {
        self.stage.borrow().frame_loop.cancel();
        self.frame.borrow_mut().take();
        log::info!("hero loop cancelled");
    }
}

impl Drop for HeroPage {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_config(hero: &HtmlElement) -> HeroConfig {
    parse_config(hero.get_attribute(CONFIG_ATTRIBUTE).as_deref())
}

/// Overrides from the config attribute, defaults when absent or invalid
fn parse_config(json: Option<&str>) -> HeroConfig {
    let Some(json) = json else {
        return HeroConfig::default();
    };
    match HeroConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring {CONFIG_ATTRIBUTE}: {err}");
            HeroConfig::default()
        }
    }
}

fn track_resize(window: &Window, hero: &HtmlElement, stage: &Rc<RefCell<Stage>>) -> EventListener {
    let hero = hero.clone();
    let stage = Rc::clone(stage);
    EventListener::new(window, "resize", move |_event| {
        let (width, height) = dom::content_size(&hero);
        let mut stage = stage.borrow_mut();
        let Stage {
            runtime, renderer, ..
        } = &mut *stage;
        if !runtime.resize(width, height, renderer) {
            log::debug!("skipping resize to {width}x{height}");
        }
    })
}

/// Request the next animation frame; the callback ticks once and
/// reschedules while the loop keeps running
fn schedule(stage: &Rc<RefCell<Stage>>, input: &Rc<RefCell<InputState>>, frame: &FrameSlot) {
    let (next_stage, next_input, slot) = (Rc::clone(stage), Rc::clone(input), Rc::clone(frame));
    let handle = request_animation_frame(move |_timestamp| {
        slot.borrow_mut().take();

        let control = {
            let mut stage = next_stage.borrow_mut();
            let Stage {
                runtime,
                renderer,
                frame_loop,
            } = &mut *stage;
            frame_loop.tick(runtime, &mut next_input.borrow_mut(), renderer)
        };

        match control {
            Ok(LoopControl::Continue) => schedule(&next_stage, &next_input, &slot),
            Ok(LoopControl::Stop) => log::info!("hero loop stopped"),
            Err(err) => log::error!("hero render failed, loop stopped: {err}"),
        }
    });
    *frame.borrow_mut() = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_attribute_overrides_defaults() {
        assert_eq!(parse_config(None), HeroConfig::default());
        let config = parse_config(Some(r#"{"starCount": 400, "maxPixelRatio": 1.5}"#));
        assert_eq!(config.star_count, 400);
        assert_eq!(config.max_pixel_ratio, 1.5);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        assert_eq!(parse_config(Some("{not json")), HeroConfig::default());
        assert_eq!(parse_config(Some(r#"{"easing": 0}"#)), HeroConfig::default());
    }
}
