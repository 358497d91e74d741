use super::error::{BackendError, Result};
use super::glutils::print_opengl_info;
use gl;
use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested core profile version (major, minor).
    pub gl_version: (u8, u8),
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            vsync: true,
        }
    }
}

/// Viewport rectangle, origin at the bottom-left corner of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Viewport {
    pub fn from_drawable(w: i32, h: i32) -> Viewport {
        Viewport {
            x: 0,
            y: 0,
            w: w.max(0),
            h: h.max(0),
        }
    }

    pub fn apply(&self) {
        unsafe { gl::Viewport(self.x, self.y, self.w, self.h) };
    }
}

/// Window, GL context and event queue. The SDL handles are only held to
/// keep the context alive.
pub struct System {
    vsync: bool,
    _sdl_context: sdl2::Sdl,
    _video_subsystem: sdl2::VideoSubsystem,
    window: sdl2::video::Window,
    _gl_ctx: sdl2::video::GLContext,
    event_pump: sdl2::EventPump,
}

impl System {
    pub fn new(config: &WindowConfig) -> Result<System> {
        let sdl_context = sdl2::init().map_err(BackendError::SdlInit)?;
        let video_subsystem = sdl_context.video().map_err(BackendError::SdlInit)?;

        let (major, minor) = config.gl_version;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(major, minor);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| BackendError::WindowBuild(e.to_string()))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(BackendError::ContextCreate)?;
        window
            .gl_make_current(&gl_ctx)
            .map_err(BackendError::ContextCreate)?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);
        Self::verify_loader()?;

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (major, minor));

        let interval = if config.vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("could not set swap interval (vsync: {}): {}", config.vsync, e);
        }

        let event_pump = sdl_context.event_pump().map_err(BackendError::SdlInit)?;

        print_opengl_info();

        let (dw, dh) = window.drawable_size();
        Viewport::from_drawable(dw as i32, dh as i32).apply();
        log::info!(
            "window '{}' created: {}x{} (drawable {}x{}), GL {}.{} core",
            config.title,
            config.width,
            config.height,
            dw,
            dh,
            major,
            minor
        );

        Ok(System {
            vsync: config.vsync,
            _sdl_context: sdl_context,
            _video_subsystem: video_subsystem,
            window,
            _gl_ctx: gl_ctx,
            event_pump,
        })
    }

    fn verify_loader() -> Result<()> {
        if !gl::Viewport::is_loaded() {
            return Err(BackendError::FunctionLoader("glViewport"));
        }
        if !gl::Clear::is_loaded() {
            return Err(BackendError::FunctionLoader("glClear"));
        }
        if !gl::CreateShader::is_loaded() {
            return Err(BackendError::FunctionLoader("glCreateShader"));
        }
        Ok(())
    }

    /// Drains pending events. Returns `false` once the window should close.
    pub fn process_io_events(&mut self) -> bool {
        let mut keep_running = true;
        let mut resized = false;

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => keep_running = false,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => {
                    log::debug!("window resized to {}x{}", w, h);
                    resized = true;
                }
                _ => {}
            }
        }

        if resized {
            let (dw, dh) = self.window.drawable_size();
            Viewport::from_drawable(dw as i32, dh as i32).apply();
        }
        if !keep_running {
            log::info!("close requested");
        }
        keep_running
    }

    pub fn draw_to_screen(&mut self) {
        self.window.gl_swap_window();
        if !self.vsync {
            ::std::thread::sleep(::std::time::Duration::new(0, 1_000_000_000u32 / 60));
        }
    }

    pub fn clear_screen(&mut self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_gl33_800x600() {
        let c = WindowConfig::default();
        assert_eq!((c.width, c.height), (800, 600));
        assert_eq!(c.gl_version, (3, 3));
        assert!(c.vsync);
    }

    #[test]
    fn viewport_covers_drawable() {
        let v = Viewport::from_drawable(1024, 768);
        assert_eq!(v, Viewport { x: 0, y: 0, w: 1024, h: 768 });
    }

    #[test]
    fn viewport_clamps_negative_sizes() {
        let v = Viewport::from_drawable(-5, 0);
        assert_eq!((v.w, v.h), (0, 0));
    }
}
