//! Glowing particle/beam/orb animation for a site header.
//!
//! `core` is the platform-independent simulation and builds everywhere; the
//! remaining modules bind it to a browser canvas and only build for wasm32.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod schedule;

#[cfg(target_arch = "wasm32")]
pub use web_entry::HeaderGlow;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::core::{Field, FieldConfig, Palette, Theme};
    use crate::dom;
    use crate::events::{self, with_field, ListenerSet};
    use crate::frame::{self, FrameContext, FrameLoop};
    use crate::render::Compositor;
    use crate::schedule::TimeoutChain;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys as web;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        console_log::init_with_level(level).ok();
        log::info!("header-glow loaded");
        Ok(())
    }

    struct Mounted {
        ctx: Rc<RefCell<FrameContext>>,
        listeners: ListenerSet,
        particle_chain: TimeoutChain,
        orb_chain: TimeoutChain,
        frame_loop: FrameLoop,
    }

    impl Mounted {
        fn teardown(&mut self) {
            self.frame_loop.cancel();
            self.particle_chain.cancel();
            self.orb_chain.cancel();
            self.listeners.remove_all();
        }
    }

    impl Drop for Mounted {
        fn drop(&mut self) {
            self.teardown();
            log::info!(
                "[mount] torn down ({} refs left)",
                Rc::strong_count(&self.ctx) - 1
            );
        }
    }

    fn try_mount(canvas: web::HtmlCanvasElement, dark: Option<bool>) -> anyhow::Result<Mounted> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window.document().ok_or_else(|| anyhow!("no document"))?;

        let is_dark = dark.unwrap_or_else(|| dom::is_dark_theme(&document));
        let theme = Theme::from_dark_flag(is_dark);

        let size = dom::container_size(&canvas);
        dom::sync_canvas_size(&canvas, size);
        let compositor = Compositor::new(&document, &canvas, size)?;

        let config = FieldConfig::default();
        let (batch_delay, orb_delay) = (config.particle_batch_delay_ms, config.orb_spawn_delay_ms);
        let mut field = Field::new(config, Palette::for_theme(theme), size, rand::random());
        field.begin_init();

        let ctx = Rc::new(RefCell::new(FrameContext {
            field,
            compositor,
            canvas: canvas.clone(),
        }));

        let listeners = events::wire_all(&window, &canvas, &ctx);
        if listeners.is_empty() {
            log::warn!("[mount] no input listeners registered; animation only");
        }

        // Staggered arrival: a busy field just retries on the next timeout.
        let c = ctx.clone();
        let particle_chain = TimeoutChain::start(batch_delay, move || {
            with_field(&c, |f| f.spawn_particle_batch()).unwrap_or(true)
        });
        let c = ctx.clone();
        let orb_chain = TimeoutChain::start(orb_delay, move || {
            with_field(&c, |f| f.spawn_orb()).unwrap_or(true)
        });

        let frame_loop = frame::start_loop(ctx.clone());
        log::info!(
            "[mount] {}x{} theme={:?} listeners={}",
            size.x,
            size.y,
            theme,
            listeners.len()
        );
        Ok(Mounted {
            ctx,
            listeners,
            particle_chain,
            orb_chain,
            frame_loop,
        })
    }

    /// Handle returned to the host page. Dropping it (or calling `unmount`)
    /// stops the animation and removes every listener.
    #[wasm_bindgen]
    pub struct HeaderGlow {
        mounted: Option<Mounted>,
    }

    impl HeaderGlow {
        fn from_result(result: anyhow::Result<Mounted>) -> Self {
            match result {
                Ok(m) => Self { mounted: Some(m) },
                Err(e) => {
                    // Degrade to an empty container.
                    log::warn!("[mount] animation disabled: {:#}", e);
                    Self { mounted: None }
                }
            }
        }
    }

    #[wasm_bindgen]
    impl HeaderGlow {
        /// Mount on `canvas`, reading the theme from `<html data-theme>`.
        #[wasm_bindgen(constructor)]
        pub fn mount(canvas: web::HtmlCanvasElement) -> HeaderGlow {
            Self::from_result(try_mount(canvas, None))
        }

        /// Mount with an explicit dark/light flag from the host.
        #[wasm_bindgen(js_name = mountWithTheme)]
        pub fn mount_with_theme(canvas: web::HtmlCanvasElement, dark: bool) -> HeaderGlow {
            Self::from_result(try_mount(canvas, Some(dark)))
        }

        #[wasm_bindgen(js_name = mountById)]
        pub fn mount_by_id(id: &str) -> HeaderGlow {
            let canvas = dom::window_document()
                .and_then(|d| d.get_element_by_id(id))
                .ok_or_else(|| anyhow!("missing #{}", id))
                .and_then(|el| {
                    el.dyn_into::<web::HtmlCanvasElement>()
                        .map_err(|_| anyhow!("#{} is not a canvas", id))
                });
            Self::from_result(canvas.and_then(|c| try_mount(c, None)))
        }

        #[wasm_bindgen(getter, js_name = isRunning)]
        pub fn is_running(&self) -> bool {
            self.mounted.is_some()
        }

        pub fn unmount(&mut self) {
            self.mounted.take();
        }
    }
}
