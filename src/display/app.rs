//! winit application driving one projection run.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Window, WindowId, WindowLevel};

use super::surface::ProjectorSurface;
use crate::config::FringeConfig;
use crate::error::{FringeError, Result};
use crate::export::SequenceExporter;
use crate::fringe::{build_sequence, Shape};
use crate::session::{ControllerState, Interval, SequenceController};

/// Application state for a single run.
pub struct FringeApp {
    config: FringeConfig,
    interval: Interval,
    surface: Option<ProjectorSurface>,
    controller: Option<SequenceController>,
    error: Option<FringeError>,
}

impl FringeApp {
    pub fn new(config: FringeConfig, interval: Interval) -> Self {
        Self {
            config,
            interval,
            surface: None,
            controller: None,
            error: None,
        }
    }

    /// Error that ended the run, if any.
    pub fn take_error(&mut self) -> Option<FringeError> {
        self.error.take()
    }

    pub fn state(&self) -> Option<&ControllerState> {
        self.controller.as_ref().map(SequenceController::state)
    }

    fn select_monitor(&self, event_loop: &ActiveEventLoop) -> Option<MonitorHandle> {
        if let Some(index) = self.config.monitor_index {
            match event_loop.available_monitors().nth(index) {
                Some(monitor) => return Some(monitor),
                None => log::warn!("Monitor {} not found, using primary monitor", index),
            }
        }
        event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
    }

    fn resolve_shape(&self, monitor: Option<&MonitorHandle>) -> Result<Shape> {
        if let Some(shape) = self.config.shape_override()? {
            log::info!("Using configured pattern resolution: {} pixels", shape);
            return Ok(shape);
        }
        let monitor = monitor.ok_or_else(|| {
            FringeError::InvalidConfiguration("no monitor detected".to_string())
        })?;
        let size = monitor.size();
        log::info!(
            "Detected screen resolution: {} x {} pixels",
            size.width,
            size.height
        );
        Shape::new(size.height, size.width)
    }

    /// Generate the sequence, open the output window and start the controller.
    fn launch(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let monitor = self.select_monitor(event_loop);
        let shape = self.resolve_shape(monitor.as_ref())?;
        let sequence = build_sequence(shape)?;

        if let Some(dir) = &self.config.export_dir {
            if let Err(e) = SequenceExporter::export(&sequence, dir) {
                log::error!("Failed to export fringe patterns: {}", e);
            }
        }

        let window_attrs = Window::default_attributes()
            .with_title("Fringe Patterns")
            .with_decorations(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_fullscreen(Some(Fullscreen::Borderless(monitor)));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| FringeError::Display(format!("failed to create window: {}", e)))?,
        );
        window.set_cursor_visible(false);

        let mut surface = match ProjectorSurface::new(window.clone())
            .and_then(|surface| surface.check_shape(shape).map(|_| surface))
        {
            Ok(surface) => surface,
            Err(e) => {
                window.set_visible(false);
                return Err(e);
            }
        };

        let mut controller = SequenceController::new(sequence);
        let started = controller.start(self.interval, Instant::now(), &mut surface);
        self.surface = Some(surface);
        self.controller = Some(controller);
        started
    }

    fn cancel(&mut self) {
        if let (Some(controller), Some(surface)) = (&mut self.controller, &mut self.surface) {
            controller.cancel(surface);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, event_loop: &ActiveEventLoop) {
        if key.state != ElementState::Pressed {
            return;
        }
        if let PhysicalKey::Code(KeyCode::Escape | KeyCode::KeyQ) = key.physical_key {
            log::info!("Cancel requested");
            self.cancel();
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for FringeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.controller.is_some() || self.error.is_some() {
            return;
        }
        if let Err(e) = self.launch(event_loop) {
            log::error!("Failed to start fringe projection: {}", e);
            self.error = Some(e);
            event_loop.exit();
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
                self.cancel();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event, event_loop);
            }
            WindowEvent::Resized(size) => {
                if let Some(surface) = &mut self.surface {
                    surface.resize(size);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(surface) = &mut self.surface {
                    if let Err(e) = surface.redraw() {
                        log::warn!("Redraw failed: {}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(controller), Some(surface)) = (&mut self.controller, &mut self.surface) else {
            return;
        };

        if let Err(e) = controller.poll(Instant::now(), surface) {
            self.error = Some(e);
        }

        match controller.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.exit(),
        }
    }
}
