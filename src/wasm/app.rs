use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, MouseEvent, WebGlTexture, WheelEvent, Window};

use crate::clock::frame_delta;
use crate::config::GalleryConfig;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::scroll::{is_vertical_wheel, normalize_wheel, SmoothScroll};

use super::dom;
use super::events::{listen, Passive};
use super::render::Renderer;
use super::texture;

struct App {
    window: Window,
    document: Document,
    images: Vec<HtmlImageElement>,
    textures: Vec<WebGlTexture>,
    gallery: Gallery,
    renderer: Renderer,
    scroll: Option<SmoothScroll>,
    max_pixel_ratio: f64,
    last_frame: Option<f64>,
}

impl App {
    fn sync_layout(&mut self) {
        self.gallery
            .sync_layout(self.images.iter().map(|img| dom::client_rect(img)));
    }

    fn frame(&mut self, now_ms: f64) -> Result<()> {
        let dt = frame_delta(self.last_frame, now_ms);
        self.last_frame = Some(now_ms);

        if let Some(scroll) = self.scroll.as_mut() {
            // images finishing loading can grow the page
            scroll.set_limit(dom::scroll_limit(&self.document, self.gallery.viewport()));
            if let Some(y) = scroll.tick(dt as f32) {
                self.window.scroll_to_with_x_and_y(self.window.scroll_x()?, y as f64);
            }
        }

        self.gallery
            .update(self.images.iter().map(|img| dom::client_rect(img)), dt as f32);
        self.renderer.render(&self.gallery, &self.textures);
        Ok(())
    }

    fn resize(&mut self) -> Result<()> {
        let viewport = dom::viewport(&self.window)?;
        self.gallery.resize(viewport);
        self.renderer
            .resize(viewport, dom::device_pixel_ratio(&self.window, self.max_pixel_ratio))?;
        if let Some(scroll) = self.scroll.as_mut() {
            scroll.set_limit(dom::scroll_limit(&self.document, viewport));
        }
        self.sync_layout();
        log::debug!("resized to {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    fn pointer_moved(&mut self, event: &MouseEvent) {
        let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
        if let Some(hit) = self.gallery.pointer_moved(client) {
            log::trace!("hover plane {} at uv {:?}", hit.index, hit.uv);
        }
    }

    fn wheel(&mut self, event: &WheelEvent) {
        // ctrl+wheel is pinch zoom; leave it to the browser
        if event.ctrl_key() {
            return;
        }
        if !is_vertical_wheel(event.delta_x() as f32, event.delta_y() as f32) {
            return;
        }
        let Some(scroll) = self.scroll.as_mut() else {
            return;
        };
        event.prevent_default();
        let height = self.gallery.viewport().height;
        scroll.on_wheel(normalize_wheel(event.delta_y() as f32, event.delta_mode(), height));
    }

    fn native_scroll(&mut self) {
        if let Some(scroll) = self.scroll.as_mut() {
            scroll.on_native_scroll(dom::scroll_y(&self.window));
        }
    }
}

/// Run `f` against the app unless something up the stack already holds it.
fn with_app(app: &Rc<RefCell<App>>, what: &str, f: impl FnOnce(&mut App) -> Result<()>) {
    match app.try_borrow_mut() {
        Ok(mut app) => {
            if let Err(e) = f(&mut app) {
                log::error!("{what}: {e}");
            }
        }
        Err(_) => log::debug!("{what} skipped, app busy"),
    }
}

pub fn start(window: Window, document: Document, canvas: HtmlCanvasElement, config: GalleryConfig) -> Result<()> {
    let viewport = dom::viewport(&window)?;
    let images = dom::gallery_images(&document, &config.image_selector)?;

    let renderer = Renderer::new(canvas, &config)?;
    renderer.resize(viewport, dom::device_pixel_ratio(&window, config.max_pixel_ratio))?;

    let textures = images
        .iter()
        .map(|img| texture::load(renderer.gl(), img, config.cross_origin.as_deref()))
        .collect::<Result<Vec<_>>>()?;

    let gallery = Gallery::new(&config, viewport, images.iter().map(|img| dom::client_rect(img)));
    let scroll = config.scroll.enabled.then(|| {
        SmoothScroll::new(
            &config.scroll,
            dom::scroll_y(&window),
            dom::scroll_limit(&document, viewport),
        )
    });

    log::info!(
        "gallery: {} images matching {:?}, viewport {}x{}, smooth scroll {}",
        images.len(),
        config.image_selector,
        viewport.width,
        viewport.height,
        if scroll.is_some() { "on" } else { "off" },
    );

    let app = Rc::new(RefCell::new(App {
        window: window.clone(),
        document,
        images,
        textures,
        gallery,
        renderer,
        scroll,
        max_pixel_ratio: config.max_pixel_ratio,
        last_frame: None,
    }));

    {
        let app = app.clone();
        listen(&window, "mousemove", Passive::Yes, move |e: MouseEvent| {
            with_app(&app, "mousemove", |app| {
                app.pointer_moved(&e);
                Ok(())
            })
        })?;
    }
    {
        let app = app.clone();
        listen(&window, "resize", Passive::Yes, move |_: web_sys::Event| {
            with_app(&app, "resize", App::resize)
        })?;
    }
    if config.scroll.enabled {
        {
            let app = app.clone();
            listen(&window, "wheel", Passive::No, move |e: WheelEvent| {
                with_app(&app, "wheel", |app| {
                    app.wheel(&e);
                    Ok(())
                })
            })?;
        }
        let app = app.clone();
        listen(&window, "scroll", Passive::Yes, move |_: web_sys::Event| {
            with_app(&app, "scroll", |app| {
                app.native_scroll();
                Ok(())
            })
        })?;
    }

    run_frames(window, app)
}

fn run_frames(window: Window, app: Rc<RefCell<App>>) -> Result<()> {
    // `f` holds the animation-frame closure so that it can schedule itself
    // again. Storing it inside an `Option` allows us to create the `Closure`
    // first and then obtain a reference to it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        with_app(&app, "frame", |app| app.frame(now));

        if let Some(next) = f.borrow().as_ref() {
            if let Err(e) = win.request_animation_frame(next.as_ref().unchecked_ref::<js_sys::Function>()) {
                log::error!("requestAnimationFrame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref::<js_sys::Function>())?;
    }
    Ok(())
}
