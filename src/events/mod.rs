pub mod pointer;
pub mod touch;

use crate::constants::EV_RESIZE;
use crate::core::Field;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Listener {
    target: web::EventTarget,
    name: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

/// Every listener registered for one mount, so they can all be removed again.
#[derive(Default)]
pub struct ListenerSet {
    entries: Vec<Listener>,
}

impl ListenerSet {
    pub fn add(
        &mut self,
        target: &web::EventTarget,
        name: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())
        {
            log::warn!("[events] could not listen for {}: {:?}", name, e);
            return;
        }
        self.entries.push(Listener {
            target: target.clone(),
            name,
            callback,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn remove_all(&mut self) {
        for l in self.entries.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.name, l.callback.as_ref().unchecked_ref());
        }
    }
}

/// Run `op` against the field unless a frame currently holds it.
#[inline]
pub fn with_field<T>(
    ctx: &Rc<RefCell<FrameContext>>,
    op: impl FnOnce(&mut Field) -> T,
) -> Option<T> {
    ctx.try_borrow_mut().ok().map(|mut c| op(&mut c.field))
}

pub fn wire_all(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<FrameContext>>,
) -> ListenerSet {
    let mut set = ListenerSet::default();
    pointer::wire_mouse(&mut set, canvas, ctx);
    touch::wire_touch(&mut set, canvas, ctx);

    let ctx_resize = ctx.clone();
    set.add(window.unchecked_ref(), EV_RESIZE, move |_ev| {
        if let Ok(mut c) = ctx_resize.try_borrow_mut() {
            c.resize();
        }
    });
    set
}
