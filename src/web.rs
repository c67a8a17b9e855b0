// web.rs - Browser bindings: canvas surface, frame loop, DOM listeners
//
// HeroCanvas is the only type exported to JS. It owns the animation-frame
// handle and every listener it installs; detach drops all of them before
// clearing the canvas, so nothing fires into a torn-down host.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent};

use crate::color::{Hsl, Rgb};
use crate::config::HeroConfig;
use crate::effects::HeroKind;
use crate::error::{HeroError, Result};
use crate::geom::{Path, Point, Rect, Size};
use crate::host::{EffectHost, Mount, MountId};
use crate::surface::Surface;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second module instance on the page finds the logger already set.
    let _ = console_log::init_with_level(log::Level::Info);
}

// ============================================================================
// Canvas surface
// ============================================================================

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| HeroError::Surface("getContext(\"2d\") threw".into()))?
            .ok_or_else(|| HeroError::Surface("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HeroError::Surface("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the parent element's layout size.
    pub fn fit_to_parent(&self) {
        let Some(parent) = self.canvas.parent_element() else {
            return;
        };
        let (w, h) = (parent.client_width().max(0) as u32, parent.client_height().max(0) as u32);
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
    }

    fn set_fill(&self, color: Rgb) {
        self.ctx.set_fill_style_str(&color.css());
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let s = self.size();
        self.ctx.clear_rect(0.0, 0.0, s.width, s.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.set_fill(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn fill_path(&mut self, path: &Path, color: Rgb) {
        if path.is_empty() {
            return;
        }
        let start = path.segments[0].point;
        self.ctx.begin_path();
        self.ctx.move_to(start.x, start.y);
        for i in 0..path.len() {
            let [_, c1, c2, p] = path.curve(i);
            self.ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
        }
        self.ctx.close_path();
        self.set_fill(color);
        self.ctx.fill();
    }
}

// ============================================================================
// JS export
// ============================================================================

type SharedHost = Rc<RefCell<EffectHost<CanvasSurface>>>;

#[wasm_bindgen]
pub struct HeroCanvas {
    canvas: HtmlCanvasElement,
    host: SharedHost,
    mount: Option<MountId>,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl HeroCanvas {
    /// Mount `effect` on `canvas` using the theme color as three numbers
    /// (hue in degrees, saturation and lightness in percent). `config` is an
    /// optional JSON object overriding the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        effect: &str,
        hue: f64,
        saturation: f64,
        lightness: f64,
        config: Option<String>,
    ) -> std::result::Result<HeroCanvas, JsValue> {
        let kind: HeroKind = effect.parse().map_err(to_js)?;
        let mut config = match config.as_deref() {
            Some(json) => HeroConfig::from_json(json).map_err(to_js)?,
            None => HeroConfig::default(),
        };
        if config.seed.is_none() {
            config.seed = Some(js_sys::Date::now() as u64 as u32);
        }

        let surface = CanvasSurface::new(canvas.clone()).map_err(to_js)?;
        surface.fit_to_parent();
        let mut host = EffectHost::new(surface);
        let mount = Mount::new(kind, Hsl::new(hue, saturation, lightness)).with_config(config);
        let id = host.attach(mount).map_err(to_js)?;

        Ok(HeroCanvas {
            canvas,
            host: Rc::new(RefCell::new(host)),
            mount: Some(id),
            frame: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        })
    }

    /// Start the frame loop and input listeners. Calling it twice is a no-op.
    pub fn start(&mut self) {
        if self.mount.is_none() || !self.listeners.is_empty() {
            return;
        }
        schedule(self.host.clone(), self.frame.clone());

        let host = self.host.clone();
        self.listeners.push(EventListener::new(&self.canvas, "pointermove", move |event: &Event| {
            if let Some(at) = local_point(event) {
                host.borrow_mut().pointer_move(at);
            }
        }));

        let host = self.host.clone();
        self.listeners.push(EventListener::new(&self.canvas, "pointerdown", move |event: &Event| {
            if let Some(at) = local_point(event) {
                host.borrow_mut().pointer_down(at);
            }
        }));

        match web_sys::window() {
            Some(window) => {
                let host = self.host.clone();
                self.listeners.push(EventListener::new(&window, "resize", move |_| {
                    let mut host = host.borrow_mut();
                    host.surface().fit_to_parent();
                    host.resize();
                }));
            }
            None => warn!("web: no window, resize events will not reach the effect"),
        }
        debug!("web: started with {} listeners", self.listeners.len());
    }

    /// Stop the loop, remove the listeners and clear the canvas.
    pub fn detach(&mut self) -> std::result::Result<(), JsValue> {
        self.frame.borrow_mut().take();
        self.listeners.clear();
        match self.mount.take() {
            Some(id) => self.host.borrow_mut().detach(id).map_err(to_js),
            None => Ok(()),
        }
    }

    /// Name of the running effect, or undefined once detached.
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> Option<String> {
        self.host.borrow().active_name().map(str::to_string)
    }
}

impl Drop for HeroCanvas {
    fn drop(&mut self) {
        if let Err(err) = self.detach() {
            warn!("web: detach on drop failed: {err:?}");
        }
    }
}

fn schedule(host: SharedHost, slot: Rc<RefCell<Option<AnimationFrame>>>) {
    let next = slot.clone();
    let handle = request_animation_frame(move |_| {
        next.borrow_mut().take();
        host.borrow_mut().frame();
        schedule(host, next);
    });
    *slot.borrow_mut() = Some(handle);
}

fn local_point(event: &Event) -> Option<Point> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(event.offset_x() as f64, event.offset_y() as f64))
}

fn to_js(err: HeroError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
