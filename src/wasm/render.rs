use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlContextAttributes, WebGlProgram, WebGlShader,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::config::GalleryConfig;
use crate::error::{GalleryError, Result};
use crate::gallery::Gallery;
use crate::layout::Viewport;
use crate::mesh::{plane_grid, VERTEX_STRIDE};

const VERTEX_SHADER: &str = include_str!("shaders/plane.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/plane.frag");

const FLOAT_BYTES: i32 = std::mem::size_of::<f32>() as i32;

struct Uniforms {
    projection: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    texture: Option<WebGlUniformLocation>,
    mouse: Option<WebGlUniformLocation>,
    hover: Option<WebGlUniformLocation>,
    strength: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            projection: at("uProjection"),
            view: at("uView"),
            model: at("uModel"),
            texture: at("uTexture"),
            mouse: at("uMouse"),
            hover: at("uHover"),
            strength: at("uStrength"),
        }
    }
}

/// Draws every gallery plane with the distortion shader into a transparent
/// canvas laid over the page.
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    uniforms: Uniforms,
    vao: WebGlVertexArrayObject,
    index_count: i32,
    distortion: f32,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, config: &GalleryConfig) -> Result<Self> {
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &context_options())?
            .ok_or(GalleryError::WebGl2Unsupported)?
            .dyn_into()
            .map_err(|_| GalleryError::WebGl2Unsupported)?;

        let vs = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vs, &fs)?;
        // the linked program keeps its own copy
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));

        let grid = plane_grid(config.plane_segments);
        let vao = gl.create_vertex_array().ok_or(GalleryError::Resource("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));

        let vbo = gl.create_buffer().ok_or(GalleryError::Resource("vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vbo));
        gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, bytemuck::cast_slice(&grid.vertices), GL::STATIC_DRAW);

        let stride = VERTEX_STRIDE as i32 * FLOAT_BYTES;
        let position = attribute(&gl, &program, "aPosition")?;
        gl.enable_vertex_attrib_array(position);
        gl.vertex_attrib_pointer_with_i32(position, 3, GL::FLOAT, false, stride, 0);
        let uv = attribute(&gl, &program, "aUv")?;
        gl.enable_vertex_attrib_array(uv);
        gl.vertex_attrib_pointer_with_i32(uv, 2, GL::FLOAT, false, stride, 3 * FLOAT_BYTES);

        let ibo = gl.create_buffer().ok_or(GalleryError::Resource("index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&ibo));
        gl.buffer_data_with_u8_array(
            GL::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&grid.indices),
            GL::STATIC_DRAW,
        );
        gl.bind_vertex_array(None);

        gl.enable(GL::BLEND);
        gl.blend_func(GL::ONE, GL::ONE_MINUS_SRC_ALPHA);

        log::info!(
            "renderer ready: {} vertices, {} segments",
            grid.vertex_count(),
            config.plane_segments
        );

        let uniforms = Uniforms::locate(&gl, &program);
        Ok(Self {
            gl,
            canvas,
            program,
            uniforms,
            vao,
            index_count: grid.indices.len() as i32,
            distortion: config.distortion,
        })
    }

    pub fn gl(&self) -> &GL {
        &self.gl
    }

    /// Size the backing store to `viewport * pixel_ratio` while the element
    /// keeps covering the viewport in CSS pixels.
    pub fn resize(&self, viewport: Viewport, pixel_ratio: f64) -> Result<()> {
        let width = (viewport.width as f64 * pixel_ratio).round() as u32;
        let height = (viewport.height as f64 * pixel_ratio).round() as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", viewport.width))?;
        style.set_property("height", &format!("{}px", viewport.height))?;
        self.gl.viewport(0, 0, width as i32, height as i32);
        log::debug!("canvas {width}x{height} at ratio {pixel_ratio}");
        Ok(())
    }

    pub fn render(&self, gallery: &Gallery, textures: &[WebGlTexture]) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        let camera = gallery.camera();
        let u = &self.uniforms;
        gl.uniform_matrix4fv_with_f32_array(u.projection.as_ref(), false, &camera.projection().to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(u.view.as_ref(), false, &camera.view().to_cols_array());
        gl.uniform1i(u.texture.as_ref(), 0);
        gl.uniform1f(u.strength.as_ref(), self.distortion);
        gl.active_texture(GL::TEXTURE0);

        for (plane, texture) in gallery.planes().iter().zip(textures) {
            if !plane.layout.is_visible() {
                continue;
            }
            let mouse = plane.mouse();
            gl.uniform_matrix4fv_with_f32_array(u.model.as_ref(), false, &plane.layout.model_matrix().to_cols_array());
            gl.uniform2f(u.mouse.as_ref(), mouse.x, mouse.y);
            gl.uniform1f(u.hover.as_ref(), plane.hover());
            gl.bind_texture(GL::TEXTURE_2D, Some(texture));
            gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_SHORT, 0);
        }

        gl.bind_vertex_array(None);
    }
}

/// Transparent canvas whose colour is already multiplied by alpha, matching
/// the `ONE, ONE_MINUS_SRC_ALPHA` blend and the shader's output.
pub(crate) fn context_options() -> WebGlContextAttributes {
    let options = WebGlContextAttributes::new();
    options.set_alpha(true);
    options.set_premultiplied_alpha(true);
    options.set_antialias(true);
    options
}

fn attribute(gl: &GL, program: &WebGlProgram, name: &'static str) -> Result<u32> {
    let location = gl.get_attrib_location(program, name);
    u32::try_from(location).map_err(|_| GalleryError::MissingAttribute(name))
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(GalleryError::Resource("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(GalleryError::ShaderCompile(info))
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl.create_program().ok_or(GalleryError::Resource("program"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(GalleryError::ProgramLink(info))
    }
}
