use crate::core::Field;
use crate::dom;
use crate::render::Compositor;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub field: Field,
    pub compositor: Compositor,
    pub canvas: web::HtmlCanvasElement,
}

impl FrameContext {
    pub fn frame(&mut self, timestamp_ms: f64) {
        if !self.field.advance(timestamp_ms) {
            return;
        }
        self.field.draw(self.compositor.surface());
        self.compositor.present();
    }

    pub fn resize(&mut self) {
        let size = dom::container_size(&self.canvas);
        dom::sync_canvas_size(&self.canvas, size);
        self.compositor.resize(size);
        self.field.handle_resize(size);
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Running `requestAnimationFrame` loop. Cancelling clears the pending frame
/// and drops the callback.
pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    tick: Tick,
}

impl FrameLoop {
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

fn request(tick: &Tick, handle: &Rc<Cell<Option<i32>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Tick = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(None));
    let tick_cb = tick.clone();
    let handle_cb = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_ms: f64| {
        handle_cb.set(None);
        if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
            ctx.frame(timestamp_ms);
        }
        request(&tick_cb, &handle_cb);
    }) as Box<dyn FnMut(f64)>));
    request(&tick, &handle);
    FrameLoop { handle, tick }
}
