use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlImageElement, WebGl2RenderingContext as GL, WebGlTexture};

use crate::error::{GalleryError, Result};

use super::dom;

/// A texture for one gallery image. It shows as a transparent pixel until the
/// image has been fetched, then the pixels are swapped in place.
pub fn load(gl: &GL, image: &HtmlImageElement, cross_origin: Option<&str>) -> Result<WebGlTexture> {
    let texture = gl.create_texture().ok_or(GalleryError::Resource("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        1,
        1,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(&[0u8; 4][..]),
    )?;
    set_sampling(gl);

    let Some(src) = dom::image_source(image) else {
        log::warn!("gallery image has no source; leaving it blank");
        return Ok(texture);
    };

    let loader = HtmlImageElement::new()?;
    loader.set_cross_origin(cross_origin);

    let onload = {
        let gl = gl.clone();
        let texture = texture.clone();
        let loader = loader.clone();
        let src = src.clone();
        Closure::wrap(Box::new(move || match upload(&gl, &texture, &loader) {
            Ok(()) => log::debug!("texture loaded: {src}"),
            Err(e) => log::warn!("texture upload failed for {src}: {e}"),
        }) as Box<dyn FnMut()>)
    };
    let onerror = {
        let src = src.clone();
        Closure::wrap(Box::new(move || {
            log::warn!("failed to load {src}");
        }) as Box<dyn FnMut()>)
    };
    loader.set_onload(Some(onload.as_ref().unchecked_ref()));
    loader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    loader.set_src(&src);
    Ok(texture)
}

fn upload(gl: &GL, texture: &WebGlTexture, image: &HtmlImageElement) -> Result<()> {
    gl.bind_texture(GL::TEXTURE_2D, Some(texture));
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
    gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        image,
    )?;
    gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
    set_sampling(gl);
    Ok(())
}

fn set_sampling(gl: &GL) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}
