use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Slot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A self-rescheduling `setTimeout` chain that can be cancelled.
///
/// The pending timeout id and the callback are both owned here, so
/// [`TimeoutChain::cancel`] leaves nothing behind that could fire later.
pub struct TimeoutChain {
    handle: Rc<Cell<Option<i32>>>,
    slot: Slot,
}

impl TimeoutChain {
    /// Run `step` now, then every `delay_ms` until it returns false.
    pub fn start(delay_ms: u32, mut step: impl FnMut() -> bool + 'static) -> Self {
        let handle = Rc::new(Cell::new(None));
        let slot: Slot = Rc::new(RefCell::new(None));
        let more = step();

        let handle_cb = handle.clone();
        let slot_cb = slot.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_cb.set(None);
            if step() {
                schedule(&slot_cb, &handle_cb, delay_ms);
            }
        }) as Box<dyn FnMut()>));

        if more {
            schedule(&slot, &handle, delay_ms);
        }
        Self { handle, slot }
    }

    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                w.clear_timeout_with_handle(id);
            }
        }
        // Dropping the closure breaks its Rc cycle with `slot`.
        self.slot.borrow_mut().take();
    }
}

fn schedule(slot: &Slot, handle: &Rc<Cell<Option<i32>>>, delay_ms: u32) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = slot.borrow().as_ref() {
        match w.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            delay_ms as i32,
        ) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::warn!("[schedule] setTimeout failed: {:?}", e),
        }
    }
}
