#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! WebGL image gallery: every `<img>` on the page is mirrored by a textured
//! plane that tracks its layout, and the plane under the pointer bulges and
//! colour-shifts around it.
//!
//! Scene bookkeeping (layout mapping, camera, picking, tweens, smooth scroll)
//! is plain Rust and tested on the host; only the browser glue is wasm32.

pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod gallery;
pub mod layout;
pub mod mesh;
pub mod picking;
pub mod scroll;
pub mod tween;

pub use config::GalleryConfig;
pub use error::GalleryError;
pub use gallery::Gallery;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    mod dom;
    mod events;
    mod render;
    mod texture;

    /// Id of the canvas the gallery draws into.
    const CANVAS_ID: &str = "canvas";
    /// Attribute on the canvas holding optional JSON config.
    const CONFIG_ATTRIBUTE: &str = "data-gallery";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or(crate::GalleryError::NoWindow)?;
        let document = window.document().ok_or(crate::GalleryError::NoDocument)?;
        let Some(element) = document.get_element_by_id(CANVAS_ID) else {
            // console_log is not up yet; a page without the canvas is not an error
            web_sys::console::warn_1(&format!("#{CANVAS_ID} not found, gallery disabled").into());
            return Ok(());
        };

        let json = element.get_attribute(CONFIG_ATTRIBUTE).unwrap_or_default();
        let config = crate::GalleryConfig::from_json(&json)?;
        console_log::init_with_level(config.log_level()).ok();

        let canvas = element
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| crate::GalleryError::NotACanvas(CANVAS_ID.into()))?;

        app::start(window, document, canvas, config)?;
        Ok(())
    }
}
