use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::error::{GalleryError, Result};

/// Whether the handler may call `preventDefault`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passive {
    Yes,
    No,
}

/// Attach `handler` to `target` for the lifetime of the page. Events that
/// are not an `E` are ignored.
pub fn listen<E, F>(target: &EventTarget, name: &'static str, passive: Passive, mut handler: F) -> Result<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: Event| match event.dyn_into::<E>() {
        Ok(event) => handler(event),
        Err(_) => log::debug!("ignoring unexpected {name} event"),
    }) as Box<dyn FnMut(Event)>);

    let options = AddEventListenerOptions::new();
    options.set_passive(passive == Passive::Yes);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            name,
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            &options,
        )
        .map_err(GalleryError::from)?;
    closure.forget();
    Ok(())
}
