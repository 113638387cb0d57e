use std::process::ExitCode;

use glam::{Mat4, Vec2};
use glow::HasContext;
use orbview_core::{ConfigError, RendererConfig, Settings, geometry::generate_sphere};
use sdl2::keyboard::Keycode;

use orbview_client::{
    abs::*,
    logging,
    other::InputState,
    render::{
        GeometryRenderer, RendererError, SPHERE_FRAGMENT_SHADER, SPHERE_VERTEX_SHADER,
        ui::{
            panel::{self, PanelLayout, target_uv},
            uirenderer::UIRenderer,
        },
    },
    settings,
};

/// Sampler uniform the diffuse texture is bound through.
const DIFFUSE_SAMPLER: &str = "diffuseTexture";
const SCREEN_CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("{0}")]
    Platform(String),
}

fn main() -> ExitCode {
    let settings_path = settings::settings_path();
    let (settings, note) = settings::load_or_default(settings_path.as_deref());

    if let Err(e) = logging::setup_logger(settings.log_level()) {
        eprintln!("Failed to set up logging: {e}");
    }
    if let Some((level, message)) = note {
        log::log!(level, "{message}");
    }

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<(), StartupError> {
    settings.validate()?;

    let mut app = App::new(&settings.window).map_err(StartupError::Platform)?;

    let sphere = &settings.sphere;
    let mesh = generate_sphere(sphere.radius, sphere.sectors, sphere.stacks);
    let config = RendererConfig::new(
        mesh,
        SPHERE_VERTEX_SHADER,
        SPHERE_FRAGMENT_SHADER,
        settings.target.width,
        settings.target.height,
    )
    .with_topology(settings.topology)
    .with_lighting(settings.lighting);
    config.validate()?;

    let mut renderer = GeometryRenderer::new(&app.gl, &config)?;
    renderer.set_transform(Mat4::IDENTITY);
    renderer.set_view(settings.camera.view());

    let diffuse =
        Texture::load_or_fallback(&app.gl, &settings.texture).map_err(StartupError::Platform)?;
    let program = renderer.shader_program();
    if program.has_uniform(DIFFUSE_SAMPLER) {
        program.use_program();
        program.set_uniform(DIFFUSE_SAMPLER, 0);
    } else {
        log::warn!("Uniform '{DIFFUSE_SAMPLER}' not found in shader");
    }

    let (width, height) = app.window.size();
    let mut ui = UIRenderer::new(&app.gl, Vec2::new(width as f32, height as f32))?;
    let mut input = InputState::default();

    unsafe {
        app.gl.enable(glow::BLEND);
        app.gl
            .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }

    loop {
        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            input.handle_event(&event);
        }
        if input.quit || input.keyboard.pressed.contains(&Keycode::Escape) {
            break;
        }
        if let Some(size) = input.resized {
            log::debug!("Window resized to {}x{}", size.x, size.y);
        }

        let (width, height) = app.window.size();
        let window_size = Vec2::new(width as f32, height as f32);
        // Layout and projection both follow the size SDL reports this frame
        ui.resize(window_size);
        let (drawable_width, drawable_height) = app.drawable_size();
        let pixel_scale = if width > 0 {
            drawable_width as f32 / width as f32
        } else {
            1.0
        };
        let layout = PanelLayout::compute(window_size);
        let viewport = layout.viewport(pixel_scale);

        renderer.set_projection(settings.camera.projection(layout.aspect()));
        diffuse.bind(0);
        renderer.render_to_texture(viewport.0, viewport.1, |r| r.render());

        unsafe {
            app.gl
                .viewport(0, 0, drawable_width as i32, drawable_height as i32);
            app.gl.clear_color(
                SCREEN_CLEAR[0],
                SCREEN_CLEAR[1],
                SCREEN_CLEAR[2],
                SCREEN_CLEAR[3],
            );
            app.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let exit = panel::draw(
            &mut ui,
            &layout,
            renderer.render_texture(),
            target_uv(viewport, renderer.target_size()),
            input.mouse.position,
            input.clicked(),
        );
        app.window.gl_swap_window();

        if exit {
            log::info!("Exit requested");
            break;
        }
    }

    renderer.destroy();
    Ok(())
}
