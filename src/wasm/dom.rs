use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, Window};

use crate::error::Result;
use crate::layout::{ClientRect, Viewport};

pub fn viewport(window: &Window) -> Result<Viewport> {
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(w as f32, h as f32))
}

pub fn client_rect(element: &Element) -> ClientRect {
    let r = element.get_bounding_client_rect();
    ClientRect {
        left: r.left() as f32,
        top: r.top() as f32,
        width: r.width() as f32,
        height: r.height() as f32,
    }
}

/// Images matching `selector`, in document order. Matches that are not
/// `<img>` elements are skipped.
pub fn gallery_images(document: &Document, selector: &str) -> Result<Vec<HtmlImageElement>> {
    let nodes = document.query_selector_all(selector)?;
    let mut images = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        match nodes.get(i).map(|n| n.dyn_into::<HtmlImageElement>()) {
            Some(Ok(img)) => images.push(img),
            _ => log::debug!("skipping non-image match {i} for {selector:?}"),
        }
    }
    Ok(images)
}

pub fn scroll_y(window: &Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// How far the document can scroll vertically.
pub fn scroll_limit(document: &Document, viewport: Viewport) -> f32 {
    let height = document
        .document_element()
        .map(|root| root.scroll_height())
        .unwrap_or(0);
    (height as f32 - viewport.height).max(0.0)
}

pub fn device_pixel_ratio(window: &Window, cap: f64) -> f64 {
    window.device_pixel_ratio().min(cap)
}

pub fn image_source(img: &HtmlImageElement) -> Option<String> {
    let src = img.current_src();
    let src = if src.is_empty() { img.src() } else { src };
    (!src.is_empty()).then_some(src)
}
