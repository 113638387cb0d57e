//! The offscreen geometry renderer.
//!
//! [`GeometryRenderer`] owns one mesh, one shader program and one framebuffer. Each
//! frame the caller sets the transforms, brackets [`GeometryRenderer::render`] with
//! [`GeometryRenderer::begin_render_to_texture`] and
//! [`GeometryRenderer::end_render_to_texture`], and then samples
//! [`GeometryRenderer::render_texture`].
//!
//! Every GPU object is wrapped in an owning type, so a failed initialization releases
//! whatever was already created and dropping the renderer releases everything.

use std::sync::Arc;

use glam::{Mat4, Vec4};
use glow::HasContext;
use orbview_core::{
    DrawCall, Lighting, RenderState, RendererConfig, geometry::Vertex as MeshVertex,
};

use crate::{
    abs::{
        BufferUsage, Framebuffer, Mesh, Shader, ShaderProgram, ShaderStage, TextureHandle, Vertex,
        primitive_mode,
    },
    render::RendererError,
};

/// Color the offscreen target is cleared to.
pub const CLEAR_COLOR: Vec4 = Vec4::new(0.1, 0.1, 0.1, 1.0);

impl Vertex for MeshVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = MeshVertex::STRIDE as i32;
            for attrib in MeshVertex::ATTRIBUTES {
                gl.enable_vertex_attrib_array(attrib.location);
                gl.vertex_attrib_pointer_f32(
                    attrib.location,
                    attrib.components,
                    glow::FLOAT,
                    false,
                    stride,
                    attrib.offset as i32,
                );
            }
        }
    }
}

/// Renders a single mesh into an offscreen color/depth target.
pub struct GeometryRenderer {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    mesh: Mesh,
    framebuffer: Framebuffer,
    draw_call: DrawCall,
    state: RenderState,
    lighting: Lighting,
    warned_viewport: bool,
}

impl GeometryRenderer {
    /// Compiles the shaders, uploads the mesh and allocates the render target.
    ///
    /// Shader compile and link failures are logged with the driver's message and
    /// returned. An incomplete framebuffer is only logged.
    pub fn new(gl: &Arc<glow::Context>, config: &RendererConfig) -> Result<Self, RendererError> {
        let program = link_program(gl, &config.vertex_shader, &config.fragment_shader)
            .inspect_err(|e| log::error!("{e}"))?;

        let mesh = Mesh::new(
            gl,
            &config.mesh.vertices,
            &config.mesh.indices,
            primitive_mode(config.topology),
            BufferUsage::Static,
        )
        .map_err(RendererError::Allocation)
        .inspect_err(|e| log::error!("{e}"))?;

        let framebuffer = Framebuffer::new(gl, config.initial_width, config.initial_height)
            .map_err(RendererError::Allocation)
            .inspect_err(|e| log::error!("{e}"))?;

        let draw_call = DrawCall::for_mesh(&config.mesh, config.topology);
        log::debug!(
            "Geometry renderer ready: {} vertices, {} elements ({}), {}x{} target",
            config.mesh.vertices.len(),
            draw_call.count,
            if draw_call.indexed { "indexed" } else { "arrays" },
            config.initial_width,
            config.initial_height
        );

        Ok(Self {
            gl: Arc::clone(gl),
            program,
            mesh,
            framebuffer,
            draw_call,
            state: RenderState::default(),
            lighting: config.lighting,
            warned_viewport: false,
        })
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.state.projection = projection;
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.state.view = view;
    }

    pub fn set_transform(&mut self, model: Mat4) {
        self.state.model = model;
    }

    pub fn set_lighting(&mut self, lighting: Lighting) {
        self.lighting = lighting;
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Binds the offscreen target, sets the viewport and clears it.
    ///
    /// The attachments keep their initial size: a larger viewport is clipped, a
    /// smaller one leaves part of the target unused.
    pub fn begin_render_to_texture(&mut self, width: i32, height: i32) {
        let (target_w, target_h) = self.framebuffer.size();
        if !self.warned_viewport && (width > target_w as i32 || height > target_h as i32) {
            log::warn!(
                "Viewport {width}x{height} exceeds the {target_w}x{target_h} render target and will be clipped"
            );
            self.warned_viewport = true;
        }

        self.framebuffer.bind();
        unsafe {
            self.gl.viewport(0, 0, width, height);
            self.gl.enable(glow::DEPTH_TEST);
            self.gl
                .clear_color(CLEAR_COLOR.x, CLEAR_COLOR.y, CLEAR_COLOR.z, CLEAR_COLOR.w);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
    }

    /// Rebinds the default framebuffer.
    pub fn end_render_to_texture(&mut self) {
        Framebuffer::unbind(&self.gl);
        unsafe {
            self.gl.disable(glow::DEPTH_TEST);
        }
    }

    /// Runs `draw` with the offscreen target bound.
    pub fn render_to_texture(&mut self, width: i32, height: i32, draw: impl FnOnce(&Self)) {
        self.begin_render_to_texture(width, height);
        draw(self);
        self.end_render_to_texture();
    }

    /// Uploads transforms and lighting, then issues the draw call.
    pub fn render(&self) {
        self.program.use_program();

        self.program.set_uniform("uProjection", self.state.projection);
        self.program.set_uniform("uView", self.state.view);
        self.program.set_uniform("uModel", self.state.model);

        self.program
            .set_uniform("lightDir", self.lighting.normalized_direction());
        self.program.set_uniform("lightColor", self.lighting.color);
        self.program
            .set_uniform("objectColor", self.lighting.object_color);
        self.program
            .set_uniform("viewPos", self.lighting.view_position);

        self.mesh.draw();
    }

    pub fn shader_program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn program_id(&self) -> glow::Program {
        self.program.id()
    }

    /// The color attachment, for sampling or display.
    pub fn render_texture(&self) -> TextureHandle {
        self.framebuffer.texture().handle()
    }

    /// Allocated size of the render target.
    pub fn target_size(&self) -> (u32, u32) {
        let texture = self.render_texture();
        (texture.width(), texture.height())
    }

    /// Whether the driver accepted the render target as complete.
    pub fn target_complete(&self) -> bool {
        self.framebuffer.is_complete()
    }

    pub fn draw_call(&self) -> DrawCall {
        self.draw_call
    }

    /// Releases every GPU object now instead of at the end of the scope.
    pub fn destroy(self) {
        log::debug!("Releasing geometry renderer resources");
        drop(self);
    }
}

fn link_program(
    gl: &Arc<glow::Context>,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<ShaderProgram, RendererError> {
    let vert = Shader::new(gl, ShaderStage::Vertex, vertex_source).map_err(|log| {
        RendererError::ShaderCompile {
            stage: ShaderStage::Vertex,
            log,
        }
    })?;
    let frag = Shader::new(gl, ShaderStage::Fragment, fragment_source).map_err(|log| {
        RendererError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log,
        }
    })?;
    ShaderProgram::new(gl, &[&vert, &frag]).map_err(RendererError::ProgramLink)
}

#[cfg(test)]
mod tests {
    use orbview_core::{Topology, geometry::generate_sphere};

    use super::*;
    use crate::{
        abs::Texture,
        render::{SPHERE_FRAGMENT_SHADER, SPHERE_VERTEX_SHADER},
    };

    struct Headless {
        _sdl: sdl2::Sdl,
        _window: sdl2::video::Window,
        _context: sdl2::video::GLContext,
        gl: Arc<glow::Context>,
    }

    fn headless() -> Headless {
        let sdl = sdl2::init().unwrap();
        let video = sdl.video().unwrap();
        let attr = video.gl_attr();
        attr.set_context_profile(sdl2::video::GLProfile::Core);
        attr.set_context_version(3, 3);
        let window = video
            .window("orbview-test", 64, 64)
            .opengl()
            .hidden()
            .build()
            .unwrap();
        let context = window.gl_create_context().unwrap();
        window.gl_make_current(&context).unwrap();
        let gl = unsafe {
            glow::Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _)
        };
        Headless {
            _sdl: sdl,
            _window: window,
            _context: context,
            gl: Arc::new(gl),
        }
    }

    fn read_pixel(gl: &glow::Context, x: i32, y: i32) -> [u8; 4] {
        let mut pixel = [0u8; 4];
        unsafe {
            gl.read_pixels(
                x,
                y,
                1,
                1,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(Some(&mut pixel)),
            );
        }
        pixel
    }

    fn config(vertex: &str, fragment: &str) -> RendererConfig {
        RendererConfig::new(generate_sphere(1.0, 16, 8), vertex, fragment, 128, 96)
    }

    #[test]
    #[ignore = "needs a display and an OpenGL 3.3 driver"]
    fn test_offscreen_pipeline() {
        let ctx = headless();
        let gl = &ctx.gl;

        let mut renderer =
            GeometryRenderer::new(gl, &config(SPHERE_VERTEX_SHADER, SPHERE_FRAGMENT_SHADER))
                .unwrap();
        assert_eq!(renderer.target_size(), (128, 96));
        assert!(renderer.target_complete());
        assert_eq!(renderer.draw_call().count, 6 * 16 * 7);
        assert!(renderer.shader_program().has_uniform("uProjection"));
        assert_eq!(renderer.render_texture().height(), 96);

        renderer.set_view(Mat4::look_at_rh(
            glam::Vec3::new(0.0, 0.0, 3.0),
            glam::Vec3::ZERO,
            glam::Vec3::Y,
        ));
        renderer.set_projection(Mat4::perspective_rh_gl(1.0, 128.0 / 96.0, 0.1, 100.0));
        let diffuse = Texture::fallback(gl).unwrap();
        diffuse.bind(0);
        renderer.render_to_texture(128, 96, |r| r.render());
        unsafe {
            assert_eq!(gl.get_error(), glow::NO_ERROR);
        }

        // The attachment holds the clear color around the sphere and the sphere itself
        // in the middle
        renderer.framebuffer.bind();
        let corner = read_pixel(gl, 0, 0);
        let center = read_pixel(gl, 64, 48);
        Framebuffer::unbind(gl);
        for channel in &corner[..3] {
            assert!((25..=26).contains(channel), "corner {corner:?}");
        }
        assert_ne!(&center[..3], &corner[..3], "center {center:?}");
        assert!(center[0] > 26, "center {center:?}");
        renderer.destroy();

        // Non-indexed draw over the vertex list
        let mut points = config(SPHERE_VERTEX_SHADER, SPHERE_FRAGMENT_SHADER);
        points.mesh.indices.clear();
        let points = points.with_topology(Topology::Points);
        let renderer = GeometryRenderer::new(gl, &points).unwrap();
        assert!(!renderer.draw_call().indexed);
        assert_eq!(renderer.draw_call().count, 17 * 9);

        let broken_vertex = GeometryRenderer::new(
            gl,
            &config("#version 330 core\nvoid main() { oops }", SPHERE_FRAGMENT_SHADER),
        );
        assert!(matches!(
            broken_vertex,
            Err(RendererError::ShaderCompile {
                stage: ShaderStage::Vertex,
                ..
            })
        ));

        let broken_fragment = GeometryRenderer::new(
            gl,
            &config(SPHERE_VERTEX_SHADER, "#version 330 core\nvoid main() {"),
        );
        assert!(matches!(
            broken_fragment,
            Err(RendererError::ShaderCompile {
                stage: ShaderStage::Fragment,
                ..
            })
        ));

        let unlinked = GeometryRenderer::new(
            gl,
            &config(
                SPHERE_VERTEX_SHADER,
                "#version 330 core\nin vec3 Missing;\nout vec4 c;\nvoid main() { c = vec4(Missing, 1.0); }",
            ),
        );
        assert!(matches!(unlinked, Err(RendererError::ProgramLink(_))));
    }
}
