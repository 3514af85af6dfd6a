use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A DOM listener registration that unhooks itself on drop.
///
/// The backdrop mounts behind client-side route navigation, so listeners must
/// not outlive the component; holding the closure here (instead of
/// `Closure::forget`) ties its lifetime to the binding.
pub struct EventBinding {
    target: web::EventTarget,
    event: &'static str,
    function: js_sys::Function,
    _closure: Box<dyn Any>,
}

impl EventBinding {
    /// Register a typed event handler; `passive` marks the listener as never
    /// calling `preventDefault` so scrolling is not blocked on it.
    pub fn listen<E>(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(E) + 'static,
    ) -> Self
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
        let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        add_listener(target, event, &function, passive);
        Self {
            target: target.clone(),
            event,
            function,
            _closure: Box::new(closure),
        }
    }

    /// Register a handler that ignores the event payload.
    pub fn listen_unit(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        mut handler: impl FnMut() + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        add_listener(target, event, &function, passive);
        Self {
            target: target.clone(),
            event,
            function,
            _closure: Box::new(closure),
        }
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, &self.function);
    }
}

fn add_listener(target: &web::EventTarget, event: &str, function: &js_sys::Function, passive: bool) {
    if passive {
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            event, function, &opts,
        );
    } else {
        _ = target.add_event_listener_with_callback(event, function);
    }
}

/// Trailing-edge debouncer over the window timer. Re-scheduling clears the
/// pending timeout, so a burst of calls runs the action exactly once.
pub struct Debouncer {
    window: web::Window,
    delay_ms: i32,
    pending: Rc<Cell<Option<i32>>>,
    timeout: Closure<dyn FnMut()>,
}

impl Debouncer {
    pub fn new(window: web::Window, delay_ms: i32, mut action: impl FnMut() + 'static) -> Self {
        let pending = Rc::new(Cell::new(None));
        let pending_cb = pending.clone();
        let timeout = Closure::wrap(Box::new(move || {
            pending_cb.set(None);
            action();
        }) as Box<dyn FnMut()>);
        Self {
            window,
            delay_ms,
            pending,
            timeout,
        }
    }

    pub fn schedule(&self) {
        if let Some(id) = self.pending.take() {
            self.window.clear_timeout_with_handle(id);
        }
        if let Ok(id) = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.timeout.as_ref().unchecked_ref(),
            self.delay_ms,
        ) {
            self.pending.set(Some(id));
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

// ---------------- Listener wiring ----------------
//
// Handlers only write plain scalar target cells; the frame tick is the sole
// reader. All run on the one UI thread.

pub fn wire_scroll(window: &web::Window, target_scroll: Rc<Cell<f32>>) -> EventBinding {
    let w = window.clone();
    EventBinding::listen_unit(window, "scroll", true, move || {
        target_scroll.set(crate::dom::scroll_y(&w));
    })
}

pub fn wire_pointer(
    window: &web::Window,
    viewport: Rc<Cell<(f32, f32)>>,
    target_pointer: Rc<Cell<(f32, f32)>>,
) -> EventBinding {
    EventBinding::listen::<web::PointerEvent>(window, "pointermove", true, move |ev| {
        let (vw, vh) = viewport.get();
        if vw > 0.0 && vh > 0.0 {
            target_pointer.set((
                ev.client_x() as f32 / vw - 0.5,
                ev.client_y() as f32 / vh - 0.5,
            ));
        }
    })
}

pub fn wire_visibility(document: &web::Document, hidden: Rc<Cell<bool>>) -> EventBinding {
    let doc = document.clone();
    EventBinding::listen_unit(document, "visibilitychange", false, move || {
        hidden.set(doc.hidden());
    })
}

pub fn wire_resize(window: &web::Window, debouncer: Rc<Debouncer>) -> EventBinding {
    EventBinding::listen_unit(window, "resize", false, move || {
        debouncer.schedule();
    })
}
