// File: crates/chart-window/src/lib.rs
// Summary: Blocking figure window that renders chart-core to a window via RGBA blit (CPU) using winit + softbuffer.

use std::num::NonZeroU32;

use anyhow::{anyhow, Result};
use chart_core::types::{POINTS_PER_INCH, SCREEN_DPI};
use chart_core::{Chart, RenderOptions, Theme, ViewState};
use log::{debug, warn};
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

/// Initial window size in logical pixels (8 x 6 in at screen resolution).
pub const WINDOW_SIZE: (f64, f64) = (800.0, 600.0);

/// Opens one window per [`Viewer::show`] call and blocks until it is closed.
///
/// The event loop is created once and reused, so a viewer can show any
/// number of figures one after another.
///
/// Keys: `Esc`/`Q` close, `R` resets the view. Mouse wheel zooms around the
/// cursor and dragging with the left button pans.
pub struct Viewer {
    event_loop: EventLoop<()>,
    theme: Theme,
}

impl Viewer {
    pub fn new() -> Self {
        Self { event_loop: EventLoop::new(), theme: Theme::default() }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Show `chart` in a window titled `title`; returns once the window is closed.
    pub fn show(&mut self, chart: &Chart, title: &str) -> Result<()> {
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1))
            .build(&self.event_loop)
            .map_err(|e| anyhow!("build window: {e}"))?;
        let context = unsafe { softbuffer::Context::new(&window) }
            .map_err(|e| anyhow!("softbuffer context: {e}"))?;
        let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
            .map_err(|e| anyhow!("softbuffer surface: {e}"))?;

        let theme = self.theme;
        let mut chart = chart.clone();
        let home = ViewState::from_chart(&chart);
        let mut view = home;
        let kinds = (chart.x_axis.kind, chart.y_axis.kind);
        let mut cursor: Option<(f32, f32)> = None;
        let mut drag_from: Option<(f32, f32)> = None;
        let mut failure: Option<anyhow::Error> = None;
        debug!("showing '{title}'");

        self.event_loop.run_return(|event, _, cf| {
            *cf = ControlFlow::Wait;
            match event {
                Event::RedrawRequested(id) if id == window.id() => {
                    view.apply_to_chart(&mut chart);
                    let opts = frame_options(&window, theme);
                    if let Err(e) = present(&mut surface, &chart, &opts) {
                        failure = Some(e);
                        *cf = ControlFlow::Exit;
                    }
                }
                Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                    WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                    WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => window.request_redraw(),
                    WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                        match input.virtual_keycode {
                            Some(VirtualKeyCode::Escape) | Some(VirtualKeyCode::Q) => *cf = ControlFlow::Exit,
                            Some(VirtualKeyCode::R) => {
                                view = home;
                                window.request_redraw();
                            }
                            _ => {}
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let p = (position.x as f32, position.y as f32);
                        if let Some(from) = drag_from {
                            view.apply_to_chart(&mut chart);
                            let plot = chart.layout(&frame_options(&window, theme)).plot;
                            view.pan_by_pixels(p.0 - from.0, p.1 - from.1, &plot, kinds);
                            drag_from = Some(p);
                            window.request_redraw();
                        }
                        cursor = Some(p);
                    }
                    WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                        drag_from = if state == ElementState::Pressed { cursor } else { None };
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        if let Some((cx, cy)) = cursor {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => y * 0.1,
                                MouseScrollDelta::PixelDelta(p) => p.y as f32 / 240.0,
                            };
                            view.apply_to_chart(&mut chart);
                            let plot = chart.layout(&frame_options(&window, theme)).plot;
                            view.zoom_at_pixel(scroll, cx, cy, &plot, kinds);
                            window.request_redraw();
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render options matching the window's current physical size.
fn frame_options(window: &Window, theme: Theme) -> RenderOptions {
    let size = window.inner_size();
    let mut opts = RenderOptions::default();
    opts.width = size.width.max(1) as i32;
    opts.height = size.height.max(1) as i32;
    opts.scale = SCREEN_DPI / POINTS_PER_INCH * window.scale_factor() as f32;
    opts.theme = theme;
    opts
}

fn present(surface: &mut softbuffer::Surface, chart: &Chart, opts: &RenderOptions) -> Result<()> {
    let (w, h) = (opts.width as u32, opts.height as u32);
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
        return Ok(());
    };
    surface.resize(nw, nh).map_err(|e| anyhow!("resize surface: {e}"))?;

    // Render to RGBA and pack as 0RGB u32 for softbuffer
    let (rgba, _, _, _) = chart.render_to_rgba8(opts)?;
    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("frame buffer: {e}"))?;
    if frame.len() != rgba.len() / 4 {
        warn!("frame buffer holds {} pixels, rendered {}", frame.len(), rgba.len() / 4);
    }
    for (dst, px) in frame.iter_mut().zip(rgba.chunks_exact(4)) {
        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        *dst = (r << 16) | (g << 8) | b;
    }
    frame.present().map_err(|e| anyhow!("present: {e}"))?;
    Ok(())
}
