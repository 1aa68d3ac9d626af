//! Winit graphical backend for gridplate.
//!
//! Rasterizes each frame's [`Scene`](gridplate_core::Scene) into a fixed-size
//! canvas and presents it in a native window using:
//! - [`winit`] for window creation and input events
//! - [`softbuffer`] for CPU-based pixel presentation
//! - [`fontdue`] for text rasterization
//! - [`image`] for decoding sprite atlases
//!
//! # Usage
//!
//! ```rust,no_run
//! use gridplate_winit::{Texture, WinitConfig, WinitDriver};
//! use gridplate_core::{AppRunner, EventLoopDriver, TextureId};
//!
//! let atlas = Texture::load("resources/tile.png").unwrap();
//! let config = WinitConfig {
//!     textures: vec![(TextureId(0), atlas)],
//!     ..Default::default()
//! };
//! let driver = WinitDriver::new(config);
//! // let runner = AppRunner::new(Box::new(my_model));
//! // driver.run(runner).unwrap();
//! ```

mod input;
mod renderer;
mod texture;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use gridplate_core::{
    app::{AppRunner, EventLoopDriver},
    geom::Vec2,
    messages::Msg,
    scene::TextureId,
};

use renderer::SceneRenderer;

pub use renderer::RendererError;
pub use texture::{Texture, TextureError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the winit driver.
pub struct WinitConfig {
    /// Window title.
    pub title: String,
    /// Canvas and initial window width, in logical pixels.
    pub width: u32,
    /// Canvas and initial window height, in logical pixels.
    pub height: u32,
    /// Embedded font bytes (TTF/OTF). If `None`, uses the built-in font.
    pub font_data: Option<Vec<u8>>,
    /// Textures addressable by draw commands. Held until the driver returns.
    pub textures: Vec<(TextureId, Texture)>,
}

impl Default for WinitConfig {
    fn default() -> Self {
        Self {
            title: "gridplate".into(),
            width: 600,
            height: 600,
            font_data: None,
            textures: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitDriver
// ---------------------------------------------------------------------------

/// Winit-based graphical driver for gridplate.
///
/// Implements [`EventLoopDriver`]: it owns the main-thread event loop and
/// ticks an [`AppRunner`] once per redraw.
pub struct WinitDriver {
    config: WinitConfig,
}

impl WinitDriver {
    pub fn new(config: WinitConfig) -> Self {
        Self { config }
    }
}

impl EventLoopDriver for WinitDriver {
    fn run(self, runner: AppRunner) -> Result<(), Box<dyn std::error::Error>> {
        let WinitConfig {
            title,
            width,
            height,
            font_data,
            textures,
        } = self.config;

        let renderer = SceneRenderer::new(
            font_data.as_deref(),
            width as usize,
            height as usize,
            textures,
        )?;

        let event_loop = EventLoop::new()?;
        let mut app = WinitApp {
            title,
            runner,
            renderer,
            state: None,
            last_frame: None,
            cursor: Vec2::ZERO,
            error: None,
        };
        event_loop.run_app(&mut app)?;
        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// WinitApp — ApplicationHandler
// ---------------------------------------------------------------------------

struct WinitApp {
    title: String,
    runner: AppRunner,
    renderer: SceneRenderer,
    state: Option<WinitState>,
    /// Start of the most recent frame.
    last_frame: Option<Instant>,
    /// Last cursor position in logical pixels.
    cursor: Vec2,
    /// First fatal error raised inside the event loop.
    error: Option<Box<dyn std::error::Error>>,
}

struct WinitState {
    window: Arc<Window>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    pixel_width: u32,
    pixel_height: u32,
    /// Time between display ticks of the window's monitor.
    frame_interval: Duration,
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

/// Refresh rate assumed when the monitor does not report one.
const FALLBACK_REFRESH_MHZ: u32 = 60_000;

/// Duration of one display tick for a refresh rate in millihertz.
fn frame_interval(refresh_mhz: Option<u32>) -> Duration {
    let mhz = refresh_mhz.filter(|&m| m > 0).unwrap_or(FALLBACK_REFRESH_MHZ);
    Duration::from_nanos(1_000_000_000_000 / u64::from(mhz))
}

/// When the next frame is due. The first frame is due immediately.
fn next_frame_at(last_frame: Option<Instant>, interval: Duration, now: Instant) -> Instant {
    last_frame.map_or(now, |t| t + interval)
}

impl WinitApp {
    fn create_state(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> Result<WinitState, Box<dyn std::error::Error>> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(
                self.renderer.width() as u32,
                self.renderer.height() as u32,
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let context = softbuffer::Context::new(window.clone())?;
        let mut surface = softbuffer::Surface::new(&context, window.clone())?;

        let PhysicalSize { width, height } = window.inner_size();
        surface.resize(non_zero(width), non_zero(height))?;

        let refresh = window.current_monitor().and_then(|m| m.refresh_rate_millihertz());
        let frame_interval = frame_interval(refresh);
        log::info!(
            "window created: {}x{} physical, scale factor {}, frame interval {:?}",
            width,
            height,
            window.scale_factor(),
            frame_interval
        );

        Ok(WinitState {
            window,
            surface,
            pixel_width: width,
            pixel_height: height,
            frame_interval,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Box<dyn std::error::Error>) {
        log::error!("{err}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    /// One display tick: update and draw the model, rasterize, present.
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        self.last_frame = Some(now);
        match self.runner.tick(now) {
            Some(scene) => self.renderer.render(scene),
            None => {
                event_loop.exit();
                return;
            }
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };
        let (width, height) = (state.pixel_width, state.pixel_height);
        if width == 0 || height == 0 {
            return;
        }

        let window = &state.window;
        let presented = state.surface.buffer_mut().and_then(|mut buf| {
            self.renderer.blit_to_buffer(&mut buf, width as usize, height as usize);
            window.pre_present_notify();
            buf.present()
        });
        if let Err(e) = presented {
            log::warn!("present failed: {e}");
        }
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return; // already initialized
        }
        match self.create_state(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.runner.handle_msg(Msg::Quit);
                event_loop.exit();
            }

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(state) = self.state.as_mut() {
                    state.pixel_width = width;
                    state.pixel_height = height;
                    if let Err(e) = state.surface.resize(non_zero(width), non_zero(height)) {
                        log::warn!("surface resize failed: {e}");
                    }
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(msg) = input::translate_keyboard(&event) {
                    self.runner.handle_msg(msg);
                }
            }

            WindowEvent::MouseInput {
                state: btn_state,
                button,
                ..
            } => {
                if let Some(msg) = input::translate_mouse_button(btn_state, button, self.cursor) {
                    self.runner.handle_msg(msg);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let scale = self
                    .state
                    .as_ref()
                    .map(|s| s.window.scale_factor())
                    .unwrap_or(1.0);
                self.cursor = input::to_logical(position, scale);
                self.runner.handle_msg(input::translate_cursor_moved(self.cursor));
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.runner.should_quit() {
            event_loop.exit();
            return;
        }
        let Some(state) = self.state.as_ref() else {
            return;
        };
        // One redraw per display tick; sleep until the next one is due.
        let now = Instant::now();
        let next = next_frame_at(self.last_frame, state.frame_interval, now);
        if next <= now {
            state.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(next));
    }
}
