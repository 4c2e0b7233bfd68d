use bytemuck::{Pod, Zeroable};
use color_life::Grid;
use std::num::NonZeroU64;

/// Gap between the window edge and the canvas, in logical units.
pub const CANVAS_MARGIN: f32 = 16.0;
/// Width reserved for the control panel, in logical units.
pub const PANEL_WIDTH: f32 = 240.0;

const BACKGROUND: [f32; 4] = [0.12, 0.12, 0.12, 1.0];
const LINE_COLOR: [f32; 4] = [0.83, 0.83, 0.83, 1.0];

// Uniforms specific to rendering
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct GridParams {
    pub matrix_size: u32,
    pub canvas_px: f32,
    pub origin: [f32; 2],
    pub background: [f32; 4],
    pub line_color: [f32; 4], // 48 bytes total, matches the WGSL struct
}

impl GridParams {
    pub fn new(matrix_size: usize, canvas_px: f32, origin_px: f32) -> Self {
        Self {
            matrix_size: matrix_size as u32,
            canvas_px,
            origin: [origin_px, origin_px],
            background: BACKGROUND,
            line_color: LINE_COLOR,
        }
    }
}

/// Flattens the grid into the `array<vec4<f32>>` layout the shader reads.
pub fn cell_data(grid: &Grid) -> Vec<[f32; 4]> {
    grid.cells().iter().map(|c| c.to_rgba()).collect()
}

pub fn cell_buffer_size(matrix_size: usize) -> u64 {
    (matrix_size * matrix_size * std::mem::size_of::<[f32; 4]>()) as u64
}

pub fn create_grid_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Grid Bind Group Layout"),
        entries: &[
            // GridParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<GridParams>() as u64),
                },
                count: None,
            },
            // Cell Colors Buffer (Binding 1)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

pub fn create_grid_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    param_buffer: &wgpu::Buffer,
    cell_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Grid Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: param_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: cell_buffer.as_entire_binding() },
        ],
    })
}

pub fn create_cell_buffer(device: &wgpu::Device, matrix_size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Cell Color Buffer"),
        size: cell_buffer_size(matrix_size),
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub fn create_grid_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Grid Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/grid.wgsl").into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Grid Pipeline Layout"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Grid Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(format.into())],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}
