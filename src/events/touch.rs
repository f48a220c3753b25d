use super::{with_field, ListenerSet};
use crate::constants::{EV_TOUCH_END, EV_TOUCH_MOVE, EV_TOUCH_START};
use crate::dom;
use crate::frame::FrameContext;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

// Canvas-local position of the first active touch.
fn first_touch(ev: &web::Event, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let t = ev.dyn_ref::<web::TouchEvent>()?.touches().get(0)?;
    Some(dom::client_to_canvas(canvas, t.client_x(), t.client_y()))
}

pub fn wire_touch(
    set: &mut ListenerSet,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<FrameContext>>,
) {
    let target: &web::EventTarget = canvas.unchecked_ref();

    let (c, cv) = (ctx.clone(), canvas.clone());
    set.add(target, EV_TOUCH_START, move |ev| {
        ev.prevent_default();
        if let Some(at) = first_touch(&ev, &cv) {
            with_field(&c, |f| f.touch_start(at));
        }
    });

    let (c, cv) = (ctx.clone(), canvas.clone());
    set.add(target, EV_TOUCH_MOVE, move |ev| {
        ev.prevent_default();
        if let Some(at) = first_touch(&ev, &cv) {
            with_field(&c, |f| f.touch_move(at));
        }
    });

    let c = ctx.clone();
    set.add(target, EV_TOUCH_END, move |_ev| {
        with_field(&c, |f| f.touch_end());
    });
}
