#![cfg(target_arch = "wasm32")]
use crate::core::{
    pixel_ratio_cap_for_width, CameraRig, DeviceTier, FramePacer, GalaxyParams, ParticleField,
    StarField, StarShellParams, TierThresholds,
};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("galaxy-backdrop loaded");
    Ok(())
}

/// A mounted backdrop. Dropping (or calling `unmount`) cancels the frame
/// loop, removes every DOM listener, and releases all GPU resources, so
/// repeated mount/unmount cycles across route navigation leak nothing.
#[wasm_bindgen]
pub struct Backdrop {
    disposed: Rc<Cell<bool>>,
    gpu: Rc<RefCell<Option<render::GpuState>>>,
    loop_handle: Option<frame::LoopHandle>,
    bindings: Vec<events::EventBinding>,
    resize_debounce: Option<Rc<events::Debouncer>>,
}

/// Mount the backdrop onto `#backdrop-canvas`. Purely visual; the host page
/// keeps the canvas behind its content and pointer-events off. A missing
/// canvas aborts quietly with an inert handle so the host page is never taken
/// down.
#[wasm_bindgen]
pub fn mount() -> Backdrop {
    match init() {
        Ok(backdrop) => backdrop,
        Err(e) => {
            log::warn!("[mount] aborted: {:?}", e);
            Backdrop::inert()
        }
    }
}

#[wasm_bindgen]
impl Backdrop {
    pub fn unmount(mut self) {
        self.dispose();
    }
}

impl Backdrop {
    fn inert() -> Self {
        Self {
            disposed: Rc::new(Cell::new(true)),
            gpu: Rc::new(RefCell::new(None)),
            loop_handle: None,
            bindings: Vec::new(),
            resize_debounce: None,
        }
    }

    fn dispose(&mut self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(handle) = self.loop_handle.take() {
            handle.cancel();
        }
        self.bindings.clear(); // removes every DOM listener
        self.resize_debounce.take(); // clears any pending timer
        self.gpu.borrow_mut().take(); // frees buffers, pipelines, surface
        log::info!("[unmount] backdrop disposed");
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn init() -> anyhow::Result<Backdrop> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let canvas = dom::backdrop_canvas(&document, constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;

    let thresholds = TierThresholds::default();
    let (vw, vh) = dom::viewport_size(&window);
    let tier = DeviceTier::classify(vw, dom::logical_cores(&window), &thresholds);
    log::info!("[mount] tier={:?} viewport={}x{}", tier, vw, vh);

    dom::sync_canvas_backing_size(&canvas, tier.pixel_ratio_cap());

    // Fresh entropy per mount: remounting grows a new galaxy
    let mut rng = StdRng::from_entropy();
    let galaxy_params = GalaxyParams {
        count: tier.particle_count(),
        ..GalaxyParams::default()
    };
    let galaxy = ParticleField::generate(&galaxy_params, &mut rng);
    let star_params = StarShellParams {
        count: tier.star_count(),
        ..StarShellParams::default()
    };
    let stars = StarField::generate(&star_params, &mut rng);

    // Scalar targets: written by listeners, read once per rendered frame
    let target_scroll = Rc::new(Cell::new(dom::scroll_y(&window)));
    let target_pointer = Rc::new(Cell::new((0.0f32, 0.0f32)));
    let viewport = Rc::new(Cell::new((vw, vh)));
    let max_scroll = Rc::new(Cell::new(dom::max_scroll(&window, &document)));
    let hidden = Rc::new(Cell::new(document.hidden()));

    let mut bindings = Vec::new();
    bindings.push(events::wire_scroll(&window, target_scroll.clone()));
    bindings.push(events::wire_pointer(
        &window,
        viewport.clone(),
        target_pointer.clone(),
    ));
    bindings.push(events::wire_visibility(&document, hidden.clone()));

    // Debounced resize: the only place layout-derived caches are refreshed
    // after mount.
    let debouncer = {
        let window_r = window.clone();
        let document_r = document.clone();
        let canvas_r = canvas.clone();
        let viewport_r = viewport.clone();
        let max_scroll_r = max_scroll.clone();
        Rc::new(events::Debouncer::new(
            window.clone(),
            constants::RESIZE_DEBOUNCE_MS,
            move || {
                let size = dom::viewport_size(&window_r);
                viewport_r.set(size);
                max_scroll_r.set(dom::max_scroll(&window_r, &document_r));
                dom::sync_canvas_backing_size(
                    &canvas_r,
                    pixel_ratio_cap_for_width(size.0, &thresholds),
                );
            },
        ))
    };
    bindings.push(events::wire_resize(&window, debouncer.clone()));

    let gpu: Rc<RefCell<Option<render::GpuState>>> = Rc::new(RefCell::new(None));
    let disposed = Rc::new(Cell::new(false));
    {
        let gpu_slot = gpu.clone();
        let disposed_flag = disposed.clone();
        let canvas_gpu = canvas.clone();
        let galaxy_point_size = tier.particle_size();
        spawn_local(async move {
            match render::GpuState::new(
                &canvas_gpu,
                &galaxy,
                &stars,
                galaxy_point_size,
                constants::STAR_POINT_SIZE,
            )
            .await
            {
                Ok(state) => {
                    // Unmounted while the adapter request was in flight
                    if disposed_flag.get() {
                        return;
                    }
                    *gpu_slot.borrow_mut() = Some(state);
                }
                Err(e) => log::error!("WebGPU init error: {:?}", e),
            }
        });
    }

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        canvas,
        gpu: gpu.clone(),
        rig: CameraRig::new(tier.input_blend(), target_scroll.get()),
        pacer: FramePacer::new(tier.frame_min_ms()),
        hidden,
        target_scroll,
        target_pointer,
        max_scroll,
        started: Instant::now(),
    }));
    let loop_handle = frame::start_loop(ctx);

    Ok(Backdrop {
        disposed,
        gpu,
        loop_handle: Some(loop_handle),
        bindings,
        resize_debounce: Some(debouncer),
    })
}
