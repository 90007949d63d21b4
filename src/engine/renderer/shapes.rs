// Solid circle and rectangle rendering

use super::camera::CameraUniform;
use super::vertex::Vertex;
use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

/// Segments used to approximate a circle
const CIRCLE_SEGMENTS: u32 = 32;

/// Something to draw this frame, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: Vec4,
    },
    Rect {
        /// Top-left corner
        origin: Vec2,
        size: Vec2,
        color: Vec4,
    },
}

/// CPU-side triangle list for a frame's shapes
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Tessellate one shape and append it
    pub fn push(&mut self, shape: &Shape) {
        match *shape {
            Shape::Circle {
                center,
                radius,
                color,
            } => self.push_circle(center, radius, color),
            Shape::Rect {
                origin,
                size,
                color,
            } => self.push_rect(origin, size, color),
        }
    }

    /// Triangle fan around the center
    fn push_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        let start_idx = self.vertices.len() as u32;
        self.vertices.push(Vertex::new(center, color));

        for i in 0..CIRCLE_SEGMENTS {
            let angle = (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
            let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
            self.vertices.push(Vertex::new(center + offset, color));

            let next = (i + 1) % CIRCLE_SEGMENTS;
            self.indices.push(start_idx);
            self.indices.push(start_idx + 1 + i);
            self.indices.push(start_idx + 1 + next);
        }
    }

    fn push_rect(&mut self, origin: Vec2, size: Vec2, color: Vec4) {
        let start_idx = self.vertices.len() as u32;

        let corners = [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ];
        for corner in corners {
            self.vertices.push(Vertex::new(corner, color));
        }

        for offset in [0, 1, 2, 0, 2, 3] {
            self.indices.push(start_idx + offset);
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// GPU pipeline drawing a `ShapeBatch`
pub struct ShapeRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    batch: ShapeBatch,
}

impl ShapeRenderer {
    /// Create a new shape renderer
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        camera: CameraUniform,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform Buffer"),
            contents: bytemuck::cast_slice(&[camera]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shape Bind Group Layout"),
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
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shape Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
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

        // Create initial buffers (will be resized as needed)
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Vertex Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shape Index Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            bind_group,
            batch: ShapeBatch::new(),
        }
    }

    /// Upload a new view-projection matrix
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera]));
    }

    /// Tessellate this frame's shapes and upload them
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, shapes: &[Shape]) {
        self.batch.clear();
        for shape in shapes {
            self.batch.push(shape);
        }

        if self.batch.is_empty() {
            return;
        }

        let vertices: &[u8] = bytemuck::cast_slice(self.batch.vertices());
        let indices: &[u8] = bytemuck::cast_slice(self.batch.indices());

        // Resize buffers if needed
        if vertices.len() as u64 > self.vertex_buffer.size() {
            self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Vertex Buffer"),
                contents: vertices,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.vertex_buffer, 0, vertices);
        }

        if indices.len() as u64 > self.index_buffer.size() {
            self.index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Shape Index Buffer"),
                contents: indices,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            });
        } else {
            queue.write_buffer(&self.index_buffer, 0, indices);
        }
    }

    /// Draw whatever the last `prepare` uploaded
    pub fn render<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.batch.is_empty() {
            return;
        }

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.batch.indices().len() as u32, 0, 0..1);
    }
}
