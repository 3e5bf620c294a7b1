use std::cell::RefCell;
use std::rc::Rc;

use afterglow_core::{Canvas, Vec2, Viewport};
use afterglow_platform::{
    is_mobile_user_agent, EventSink, FrameHandle, FrameScheduler, FrameStep, InputEvent,
    InputSource, OverlaySurface, PlatformError, PointerKind, Result, TrailHost,
};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, Window};

use crate::canvas::Canvas2d;

const HOVER_NONE_QUERY: &str = "(hover: none)";
const OVERLAY_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
    ("z-index", "9999"),
];

fn describe(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |value: std::result::Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    Viewport::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Fixed, full-window `<canvas>` that ignores pointer input.
pub struct CanvasSurface {
    element: HtmlCanvasElement,
    context: Canvas2d,
}

impl OverlaySurface for CanvasSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.element.width(), self.element.height())
    }

    fn resize(&mut self, viewport: Viewport) -> Result<()> {
        self.element.set_width(viewport.width);
        self.element.set_height(viewport.height);
        Ok(())
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        &mut self.context
    }

    fn detach(&mut self) -> Result<()> {
        let viewport = self.viewport();
        self.context.clear(viewport);
        self.element.remove();
        debug!("trail canvas removed");
        Ok(())
    }
}

/// `mousemove` and `resize` listeners on the window.
pub struct DomInput {
    window: Window,
    on_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl DomInput {
    fn new(window: Window) -> Self {
        Self {
            window,
            on_move: None,
            on_resize: None,
        }
    }
}

impl InputSource for DomInput {
    fn start(&mut self, sink: EventSink) -> Result<()> {
        self.stop()?;

        let move_sink = Rc::clone(&sink);
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let at = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            move_sink(InputEvent::PointerMoved(at));
        }) as Box<dyn FnMut(MouseEvent)>);

        let window = self.window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            sink(InputEvent::Resized(window_viewport(&window)));
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
            .map_err(|e| PlatformError::Input(describe(e)))?;
        self.window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|e| PlatformError::Input(describe(e)))?;

        self.on_move = Some(on_move);
        self.on_resize = Some(on_resize);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(on_move) = self.on_move.take() {
            self.window
                .remove_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
                .map_err(|e| PlatformError::Input(describe(e)))?;
        }
        if let Some(on_resize) = self.on_resize.take() {
            self.window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
                .map_err(|e| PlatformError::Input(describe(e)))?;
        }
        Ok(())
    }
}

/// `requestAnimationFrame` loop.
pub struct AnimationFrames {
    window: Window,
}

impl FrameScheduler for AnimationFrames {
    fn schedule(&mut self, mut step: FrameStep) -> Result<FrameHandle> {
        let handle = FrameHandle::new();
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let next = Rc::clone(&callback);
        let window = self.window.clone();
        let stopped = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if stopped.is_stopped() {
                release_later(&window, next.borrow_mut().take());
                debug!("animation frame loop stopped");
                return;
            }
            step();
            if let Some(cb) = next.borrow().as_ref() {
                if let Err(err) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    warn!("requestAnimationFrame failed: {}", describe(err));
                }
            }
        }) as Box<dyn FnMut()>));

        let first = callback.borrow();
        let Some(cb) = first.as_ref() else {
            return Err(PlatformError::Scheduler("frame callback missing".into()));
        };
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| PlatformError::Scheduler(describe(e)))?;
        Ok(handle)
    }
}

/// Breaks the loop's self-reference. The closure is running, so it is moved
/// into a timeout and dropped there.
fn release_later(window: &Window, callback: Option<Closure<dyn FnMut()>>) {
    let Some(callback) = callback else {
        return;
    };
    let release = Closure::once_into_js(move || drop(callback));
    if let Err(err) = window.set_timeout_with_callback(release.unchecked_ref()) {
        warn!("could not release frame callback: {}", describe(err));
    }
}

pub struct WebHost {
    window: Window,
    document: Document,
    input: DomInput,
    frames: AnimationFrames,
}

impl WebHost {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            input: DomInput::new(window.clone()),
            frames: AnimationFrames {
                window: window.clone(),
            },
            window,
            document,
        }
    }

    fn hover_unavailable(&self) -> bool {
        self.window
            .match_media(HOVER_NONE_QUERY)
            .ok()
            .flatten()
            .map(|query| query.matches())
            .unwrap_or(false)
    }
}

impl TrailHost for WebHost {
    type Surface = CanvasSurface;
    type Input = DomInput;
    type Scheduler = AnimationFrames;

    fn pointer_kind(&self) -> PointerKind {
        let agent = self.window.navigator().user_agent().unwrap_or_default();
        PointerKind::detect(is_mobile_user_agent(&agent), self.hover_unavailable())
    }

    fn seed(&self) -> u64 {
        let high = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let low = (js_sys::Math::random() * u32::MAX as f64) as u64;
        (high << 32) | low
    }

    fn create_surface(&mut self) -> Result<CanvasSurface> {
        let body = self
            .document
            .body()
            .ok_or_else(|| PlatformError::Surface("document has no <body>".into()))?;
        let element = self
            .document
            .create_element("canvas")
            .map_err(|e| PlatformError::Surface(describe(e)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| PlatformError::Surface("created element is not a canvas".into()))?;

        // Resolve the context before touching the page so a failure leaves
        // nothing behind.
        let context = element
            .get_context("2d")
            .map_err(|e| PlatformError::Surface(describe(e)))?
            .ok_or_else(|| PlatformError::Surface("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::Surface("unexpected context type".into()))?;

        let style = element.style();
        for (property, value) in OVERLAY_STYLE {
            style
                .set_property(property, value)
                .map_err(|e| PlatformError::Surface(describe(e)))?;
        }
        let viewport = window_viewport(&self.window);
        element.set_width(viewport.width);
        element.set_height(viewport.height);
        body.append_child(&element)
            .map_err(|e| PlatformError::Surface(describe(e)))?;

        Ok(CanvasSurface {
            element,
            context: Canvas2d::new(context),
        })
    }

    fn input(&mut self) -> &mut DomInput {
        &mut self.input
    }

    fn scheduler(&mut self) -> &mut AnimationFrames {
        &mut self.frames
    }
}
