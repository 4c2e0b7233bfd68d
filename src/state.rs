use crate::render::{
    cell_data, create_cell_buffer, create_grid_bind_group, create_grid_bind_group_layout,
    create_grid_pipeline, GridParams, CANVAS_MARGIN,
};
use anyhow::Context;
use color_life::{Controller, Event};
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalPosition, window::Window};
use std::sync::Arc;

// GUI Imports
use egui_winit::State as EguiWinitState;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui::Context as EguiContext;

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    pub window: Arc<Window>,

    // --- Grid rendering ---
    pub grid_pipeline: wgpu::RenderPipeline,
    pub grid_bind_group_layout: wgpu::BindGroupLayout,
    pub grid_bind_group: wgpu::BindGroup,
    pub grid_param_buffer: wgpu::Buffer,
    pub cell_buffer: wgpu::Buffer,
    pub uploaded_matrix_size: usize,
    pub uploaded_revision: Option<u64>,
    // --- End Grid ---

    pub controller: Controller,
    pub is_left_mouse_pressed: bool,
    pub cursor_pos: Option<PhysicalPosition<f64>>,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub size_text: String,
    pub paint_rgb: [f32; 3],
}

impl State {
    pub async fn new(window: Arc<Window>, mut controller: Controller) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .context("Failed to find an appropriate adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("Failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // egui and the cell colors are both in gamma space, so skip sRGB targets when possible.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no texture formats")?;
        let present_mode = surface_caps
            .present_modes
            .first()
            .copied()
            .unwrap_or(wgpu::PresentMode::Fifo);
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let density = window.scale_factor() as f32;
        controller.handle(Event::DensityChanged(density));

        // Create Grid Resources
        let snapshot = controller.snapshot();
        let matrix_size = snapshot.matrix_size;
        let grid_param_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Parameters"),
            contents: bytemuck::bytes_of(&GridParams::new(
                matrix_size,
                controller.coordinate_map().canvas_px() as f32,
                CANVAS_MARGIN * density,
            )),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let cell_buffer = create_cell_buffer(&device, matrix_size);
        let grid_bind_group_layout = create_grid_bind_group_layout(&device);
        let grid_bind_group =
            create_grid_bind_group(&device, &grid_bind_group_layout, &grid_param_buffer, &cell_buffer);
        let grid_pipeline = create_grid_pipeline(&device, &grid_bind_group_layout, config.format);

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("egui initialized.");

        log::info!("wgpu initialized successfully ({:?}).", config.format);

        let size_text = matrix_size.to_string();
        let paint_rgb = snapshot.selected_color.to_array();

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            grid_pipeline,
            grid_bind_group_layout,
            grid_bind_group,
            grid_param_buffer,
            cell_buffer,
            uploaded_matrix_size: matrix_size,
            uploaded_revision: None,
            controller,
            is_left_mouse_pressed: false,
            cursor_pos: None,
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            size_text,
            paint_rgb,
        })
    }

    /// Physical pixel offset of the canvas from the window's top-left corner.
    pub fn canvas_origin_px(&self) -> f32 {
        CANVAS_MARGIN * self.controller.density()
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    /// Uploads cell colors when the grid changed since the last frame, recreating the
    /// storage buffer when the matrix size changed.
    fn sync_grid(&mut self) {
        let snapshot = self.controller.snapshot();

        if snapshot.matrix_size != self.uploaded_matrix_size {
            self.cell_buffer = create_cell_buffer(&self.device, snapshot.matrix_size);
            self.grid_bind_group = create_grid_bind_group(
                &self.device,
                &self.grid_bind_group_layout,
                &self.grid_param_buffer,
                &self.cell_buffer,
            );
            self.uploaded_matrix_size = snapshot.matrix_size;
            self.uploaded_revision = None;
        }

        if self.uploaded_revision != Some(snapshot.revision) {
            self.queue
                .write_buffer(&self.cell_buffer, 0, bytemuck::cast_slice(&cell_data(snapshot.grid)));
            self.uploaded_revision = Some(snapshot.revision);
        }

        let params = GridParams::new(
            snapshot.matrix_size,
            self.controller.coordinate_map().canvas_px() as f32,
            self.canvas_origin_px(),
        );
        self.queue.write_buffer(&self.grid_param_buffer, 0, bytemuck::bytes_of(&params));
    }

    /// Draws the grid. Returns the surface texture for egui to draw on.
    pub fn update_and_render(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.sync_grid();

        // --- Get Surface Texture (early exit on error) ---
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size);
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        // --- Render Pass ---
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut render_encoder = self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Grid Encoder") });
        {
            let mut render_pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Render Pass"),
                color_attachments: &[
                    Some(wgpu::RenderPassColorAttachment {
                        view: &output_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })
                ],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.grid_pipeline);
            render_pass.set_bind_group(0, &self.grid_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle
        }
        self.queue.submit(Some(render_encoder.finish()));
        // output_frame.present(); // DON'T present here, egui will do it later

        Ok(output_frame)
    }

    /// Composites a finished egui frame over `output_frame` and presents it.
    pub fn paint_egui(&mut self, output_frame: wgpu::SurfaceTexture, full_output: egui::FullOutput) {
        let pixels_per_point = self.window.scale_factor() as f32;
        let paint_jobs = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point,
        };
        let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Upload egui data to GPU
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui Encoder"),
        });
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let user_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        self.egui_winit_state.handle_platform_output(&self.window, full_output.platform_output);

        // Render egui
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view, // Render egui ON TOP of the grid
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        // Free texture delta
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));
        output_frame.present();
    }
}
