//! Full-screen projector surface.

use crate::error::{FringeError, Result};
use crate::fringe::{FringeImage, Shape};
use crate::render::{check_texture_size, FringeRenderer, RenderPipeline};
use crate::session::Presenter;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Window plus GPU state that presents fringe images.
pub struct ProjectorSurface {
    window: Option<Arc<Window>>,
    render: RenderPipeline,
    renderer: FringeRenderer,
}

impl ProjectorSurface {
    pub fn new(window: Arc<Window>) -> Result<Self> {
        let render = RenderPipeline::for_window(window.clone())?;
        let renderer = FringeRenderer::new(render.device(), render.format());
        log::info!(
            "Projector surface {}x{} ({:?})",
            render.config().width,
            render.config().height,
            render.format()
        );

        Ok(Self {
            window: Some(window),
            render,
            renderer,
        })
    }

    /// Check that patterns of `shape` can be uploaded on this device.
    pub fn check_shape(&self, shape: Shape) -> Result<()> {
        let max_dimension = self.render.device().limits().max_texture_dimension_2d;
        check_texture_size(shape, max_dimension)
            .map_err(|e| FringeError::Display(e.to_string()))
    }

    pub fn is_released(&self) -> bool {
        self.window.is_none()
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if !self.is_released() {
            self.render.resize(size.width, size.height);
        }
    }

    /// Draw the last uploaded image again, e.g. after an expose event.
    pub fn redraw(&mut self) -> Result<()> {
        if self.is_released() || !self.renderer.has_image() {
            return Ok(());
        }
        self.draw()
    }

    fn acquire(&mut self) -> Result<wgpu::SurfaceTexture> {
        match self.render.surface().get_current_texture() {
            Ok(output) => Ok(output),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.render.resize(size.width, size.height);
                }
                self.render
                    .surface()
                    .get_current_texture()
                    .map_err(|e| FringeError::PresentationFailure(format!("surface error: {:?}", e)))
            }
            Err(e) => Err(FringeError::PresentationFailure(format!(
                "surface error: {:?}",
                e
            ))),
        }
    }

    fn draw(&mut self) -> Result<()> {
        let output = self.acquire()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .render
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Fringe Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Fringe Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.render(&mut pass);
        }

        self.render.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl Presenter for ProjectorSurface {
    fn present(&mut self, image: &FringeImage) -> Result<()> {
        if self.is_released() {
            return Err(FringeError::PresentationFailure(
                "surface already released".to_string(),
            ));
        }
        self.renderer
            .upload(self.render.device(), self.render.queue(), image)?;
        self.draw()
    }

    fn release(&mut self) {
        if let Some(window) = self.window.take() {
            window.set_fullscreen(None);
            window.set_visible(false);
            log::info!("Projector surface released");
        }
    }
}
