// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use wgpu::util::DeviceExt;

use super::vertex::Vertex;
use crate::engine_lib::strokes::StrokeFrame;

// Worst case: ~40 cogs x ~260 segments each, 4 vertices / 6 indices per
// segment quad, with headroom.
const RENDERER_MAX_VERTICES: usize = 96_000;
const RENDERER_MAX_INDICES: usize = 144_000;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ScreenDimensionsUniform {
    width: f32,
    height: f32,
    _padding1: f32,
    _padding2: f32,
}

/// Corners of the quad stroking one line segment, or `None` for degenerate
/// segments (adjacent duplicate points in a polyline).
fn segment_quad(p0: DVec2, p1: DVec2, width: f32) -> Option<[[f32; 2]; 4]> {
    let direction = p1 - p0;
    let length = direction.length();
    if length < 1e-6 {
        return None;
    }
    let normal = DVec2::new(-direction.y, direction.x) / length * (width as f64 / 2.0);
    let corner = |p: DVec2| [p.x as f32, p.y as f32];
    Some([
        corner(p0 + normal),
        corner(p0 - normal),
        corner(p1 - normal),
        corner(p1 + normal),
    ])
}

/// GPU backend for the stroke frames the core emits: an alpha-blended
/// screen-space triangle pipeline where every stroke segment becomes a quad.
pub struct StrokeRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,

    frame_vertices: Vec<Vertex>,
    frame_indices: Vec<u32>,

    screen_uniform_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
}

impl StrokeRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        initial_screen_width: f32,
        initial_screen_height: f32,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Stroke Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let screen_uniform_data = ScreenDimensionsUniform {
            width: initial_screen_width,
            height: initial_screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        let screen_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Screen Dimensions Uniform Buffer"),
            contents: bytemuck::bytes_of(&screen_uniform_data),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("screen_dimensions_bind_group_layout"),
            });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_uniform_buffer.as_entire_binding(),
            }],
            label: Some("screen_dimensions_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Stroke Pipeline Layout"),
                bind_group_layouts: &[&screen_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Stroke Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Stroke Vertex Buffer"),
            size: (RENDERER_MAX_VERTICES * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Stroke Index Buffer"),
            size: (RENDERER_MAX_INDICES * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            frame_vertices: Vec::with_capacity(RENDERER_MAX_VERTICES),
            frame_indices: Vec::with_capacity(RENDERER_MAX_INDICES),
            screen_uniform_buffer,
            screen_bind_group,
        }
    }

    fn add_segment_to_frame(&mut self, p0: DVec2, p1: DVec2, width: f32, color: [f32; 4]) {
        let Some(corners) = segment_quad(p0, p1, width) else {
            return;
        };
        let start_vertex_index = self.frame_vertices.len() as u32;
        for corner in corners {
            self.frame_vertices.push(Vertex::new(corner, color));
        }
        for offset in [0, 1, 2, 0, 2, 3] {
            self.frame_indices.push(start_vertex_index + offset);
        }
    }

    pub fn render_frame(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        frame: &StrokeFrame,
        screen_width: f32,
        screen_height: f32,
    ) {
        let screen_uniform_data = ScreenDimensionsUniform {
            width: screen_width,
            height: screen_height,
            _padding1: 0.0,
            _padding2: 0.0,
        };
        queue.write_buffer(
            &self.screen_uniform_buffer,
            0,
            bytemuck::bytes_of(&screen_uniform_data),
        );

        self.frame_vertices.clear();
        self.frame_indices.clear();

        for stroke in &frame.strokes {
            for pair in stroke.points.windows(2) {
                self.add_segment_to_frame(pair[0], pair[1], stroke.width, stroke.color);
            }
        }

        if !self.frame_vertices.is_empty() {
            if self.frame_vertices.len() > RENDERER_MAX_VERTICES
                || self.frame_indices.len() > RENDERER_MAX_INDICES
            {
                log::warn!(
                    "frame data exceeds pre-allocated buffers ({} vertices), truncating",
                    self.frame_vertices.len()
                );
                self.frame_vertices.truncate(RENDERER_MAX_VERTICES);
                self.frame_indices.truncate(RENDERER_MAX_INDICES - RENDERER_MAX_INDICES % 6);
            }
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.frame_vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.frame_indices));
        }

        let [r, g, b, a] = frame.background;
        let clear_color = wgpu::Color { r, g, b, a };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Stroke Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !self.frame_vertices.is_empty() && !self.frame_indices.is_empty() {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.screen_bind_group, &[]);

                let vertex_slice_size =
                    (self.frame_vertices.len() * std::mem::size_of::<Vertex>()) as u64;
                let index_slice_size =
                    (self.frame_indices.len() * std::mem::size_of::<u32>()) as u64;

                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_slice_size));
                render_pass.set_index_buffer(
                    self.index_buffer.slice(..index_slice_size),
                    wgpu::IndexFormat::Uint32,
                );
                render_pass.draw_indexed(0..self.frame_indices.len() as u32, 0, 0..1);
            }
        }
    }
}
