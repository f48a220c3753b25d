use super::{with_field, ListenerSet};
use crate::constants::{EV_CLICK, EV_MOUSE_ENTER, EV_MOUSE_LEAVE, EV_MOUSE_MOVE};
use crate::dom;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_mouse(
    set: &mut ListenerSet,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<FrameContext>>,
) {
    let target: &web::EventTarget = canvas.unchecked_ref();

    let (c, cv) = (ctx.clone(), canvas.clone());
    set.add(target, EV_MOUSE_MOVE, move |ev| {
        if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
            let at = dom::client_to_canvas(&cv, m.client_x(), m.client_y());
            with_field(&c, |f| f.pointer_move(at));
        }
    });

    let c = ctx.clone();
    set.add(target, EV_MOUSE_ENTER, move |_ev| {
        with_field(&c, |f| f.pointer_enter());
    });

    let c = ctx.clone();
    set.add(target, EV_MOUSE_LEAVE, move |_ev| {
        with_field(&c, |f| f.pointer_leave());
    });

    let (c, cv) = (ctx.clone(), canvas.clone());
    set.add(target, EV_CLICK, move |ev| {
        if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
            let at = dom::client_to_canvas(&cv, m.client_x(), m.client_y());
            with_field(&c, |f| f.click(at));
            log::debug!("[mouse] burst at ({:.0},{:.0})", at.x, at.y);
        }
    });
}
