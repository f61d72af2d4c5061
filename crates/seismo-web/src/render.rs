mod helpers;
mod post;
mod targets;

use crate::constants::CLEAR_RGB;
use post::{PostBindGroups, PostResources, PostUniforms};
use seismo_core::{LineVertex, SceneUniforms, SpriteInstance, BLOOM_STRENGTH, BLOOM_THRESHOLD, QUAD_CORNERS};
use targets::{RenderTargets, HDR_FORMAT};
use web_sys as web;
use wgpu::util::DeviceExt;

const INITIAL_INSTANCE_CAPACITY: usize = 4096;
const EXPOSURE: f32 = 1.2;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    // Scene layer: billboards and ground lines into the HDR target
    sprite_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    line_vb: Option<wgpu::Buffer>,
    line_count: u32,

    // Bloom chain
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} {:?}", width, height, format);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(seismo_core::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let sprite_pipeline = helpers::make_scene_pipeline(
            &device,
            "sprite_pipeline",
            &scene_pl,
            &scene_shader,
            "vs_sprite",
            "fs_sprite",
            &[helpers::quad_layout(), helpers::sprite_layout()],
            wgpu::PrimitiveTopology::TriangleList,
            HDR_FORMAT,
        );
        let line_pipeline = helpers::make_scene_pipeline(
            &device,
            "line_pipeline",
            &scene_pl,
            &scene_shader,
            "vs_line",
            "fs_line",
            &[helpers::line_layout()],
            wgpu::PrimitiveTopology::LineList,
            HDR_FORMAT,
        );
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_vb = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(&device, format);
        let post_groups = post.bind_groups(&device, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            line_pipeline,
            scene_uniform_buffer,
            scene_bind_group,
            quad_vb,
            instance_vb,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            line_vb: None,
            line_count: 0,
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0],
                g: CLEAR_RGB[1],
                b: CLEAR_RGB[2],
                a: 1.0,
            },
        })
    }

    /// Upload the static ground geometry. Called once after the scene is built.
    pub fn set_lines(&mut self, lines: &[LineVertex]) {
        self.line_count = lines.len() as u32;
        self.line_vb = (!lines.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("ground_vb"),
                    contents: bytemuck::cast_slice(lines),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets = RenderTargets::new(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
            log::info!("[gpu] resized to {}x{}", width, height);
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn ensure_instance_capacity(&mut self, needed: usize) {
        if needed > self.instance_capacity {
            let cap = needed.next_power_of_two();
            self.instance_vb = create_instance_buffer(&self.device, cap);
            self.instance_capacity = cap;
        }
    }

    pub fn render(
        &mut self,
        uniforms: &SceneUniforms,
        sprites: &[SpriteInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        self.ensure_instance_capacity(sprites.len());
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        if !sprites.is_empty() {
            self.queue
                .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(sprites));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: ground lines then sprites into HDR
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            if let Some(vb) = &self.line_vb {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, vb.slice(..));
                rpass.draw(0..self.line_count, 0..1);
            }
            if !sprites.is_empty() {
                rpass.set_pipeline(&self.sprite_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
                rpass.draw(0..(QUAD_CORNERS.len() / 2) as u32, 0..sprites.len() as u32);
            }
        }

        let (bw, bh) = targets::bloom_size(self.width, self.height);
        let base = PostUniforms {
            resolution: [bw as f32, bh as f32],
            blur_dir: [0.0, 0.0],
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            exposure: EXPOSURE,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.post.uniform_base, 0, bytemuck::bytes_of(&base));
        self.queue.write_buffer(
            &self.post.uniform_blur_h,
            0,
            bytemuck::bytes_of(&PostUniforms {
                blur_dir: [1.0, 0.0],
                ..base
            }),
        );
        self.queue.write_buffer(
            &self.post.uniform_blur_v,
            0,
            bytemuck::bytes_of(&PostUniforms {
                blur_dir: [0.0, 1.0],
                ..base
            }),
        );

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.from_hdr,
            None,
        );
        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_a,
            None,
        );
        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.from_bloom_b,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.from_hdr,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("sprite_instances"),
        size: (capacity.max(1) * std::mem::size_of::<SpriteInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
