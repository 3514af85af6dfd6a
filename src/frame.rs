use crate::core::{admit_frame, CameraRig, FramePacer};
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one tick of the render loop needs. Listeners write the target
/// cells; `frame` reads them, advances the rig, and draws.
pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Rc<RefCell<Option<render::GpuState>>>,
    pub rig: CameraRig,
    pub pacer: FramePacer,
    pub hidden: Rc<Cell<bool>>,
    pub target_scroll: Rc<Cell<f32>>,
    pub target_pointer: Rc<Cell<(f32, f32)>>,
    pub max_scroll: Rc<Cell<f32>>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1_000.0;
        if !admit_frame(self.hidden.get(), &mut self.pacer, now_ms) {
            return;
        }

        self.rig.set_scroll_target(self.target_scroll.get());
        let (px, py) = self.target_pointer.get();
        self.rig.set_pointer_target(px, py);
        let pose = self.rig.step((now_ms / 1_000.0) as f32, self.max_scroll.get());

        if let Some(gpu) = self.gpu.borrow_mut().as_mut() {
            // Attribute reads only; backing size itself is maintained by the
            // debounced resize path.
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = gpu.render(&pose) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

/// Handle to the running requestAnimationFrame loop; cancelling drops the
/// tick closure so no further frame can fire.
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(window) = web::window() {
                _ = window.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();

    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        // Reschedule before any work so a skipped frame cannot stall the loop.
        if let Some(window) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_clone.set(Some(id));
                }
            }
        }
        ctx.borrow_mut().frame();
    }) as Box<dyn FnMut()>));

    if let Some(window) = web::window() {
        if let Ok(id) = window
            .request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
        {
            raf_id.set(Some(id));
        }
    }

    LoopHandle { raf_id, tick }
}
