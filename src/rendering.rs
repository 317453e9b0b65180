//! Presentation of the software canvas through wgpu.
//!
//! The fluid field is painted on the CPU; each frame the canvas is uploaded
//! into a texture and drawn with a single fullscreen triangle.

use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

use crate::canvas::Canvas;
use crate::error::FluidError;
use crate::surface::{EventHub, RenderSurface, SurfaceEvent};

/// Canvas texture plus the bind group that samples it
struct CanvasTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

/// Rendering system managing wgpu device, pipeline and the canvas texture
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    canvas_texture: Option<CanvasTexture>,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: Arc<Window>) -> Result<Self, FluidError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance.create_surface(window)?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(FluidError::NoAdapter)?;

        info!("GPU adapter: {}", adapter.get_info().name);

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Present Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("present.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Present Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Present Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group_layout,
            sampler,
            canvas_texture: None,
        })
    }

    /// Reconfigure the swapchain for a new window size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload canvas pixels, recreating the texture when the size changed
    pub fn upload(&mut self, canvas: &Canvas) {
        let (width, height) = canvas.size();
        if width == 0 || height == 0 {
            return;
        }

        if self.canvas_texture.as_ref().map(|t| t.size) != Some((width, height)) {
            debug!("Creating canvas texture {}x{}", width, height);
            self.canvas_texture = Some(self.create_canvas_texture(width, height));
        }
        let Some(target) = &self.canvas_texture else {
            return;
        };

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            canvas.as_bytes(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn create_canvas_texture(&self, width: u32, height: u32) -> CanvasTexture {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Canvas Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        CanvasTexture {
            texture,
            bind_group,
            size: (width, height),
        }
    }

    /// Draw the uploaded canvas and present
    pub fn render(&self) -> Result<(), wgpu::SurfaceError> {
        let Some(target) = &self.canvas_texture else {
            return Ok(());
        };

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
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

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &target.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Window-backed render surface
pub struct WindowSurface {
    window: Arc<Window>,
    render_system: RenderSystem,
    canvas: Canvas,
    events: EventHub,
    size: (u32, u32),
    max_pixel_ratio: f64,
}

impl WindowSurface {
    pub async fn new(window: Arc<Window>, max_pixel_ratio: f64) -> Result<Self, FluidError> {
        let size = window.inner_size();
        let render_system = RenderSystem::new(Arc::clone(&window)).await?;
        Ok(Self {
            window,
            render_system,
            canvas: Canvas::new(size.width, size.height),
            events: EventHub::new(),
            size: (size.width, size.height),
            max_pixel_ratio,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Window size changed: reconfigure and notify subscribers
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        debug!("Window resized to {}x{}", size.width, size.height);
        self.size = (size.width, size.height);
        self.render_system.resize(size.width, size.height);
        self.events.dispatch(&SurfaceEvent::Resized {
            width: size.width,
            height: size.height,
        });
    }

    /// Pointer moved (physical pixels): dispatch the normalized position
    pub fn pointer_moved(&self, position: PhysicalPosition<f64>) {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return;
        }
        self.events.dispatch(&SurfaceEvent::PointerMoved {
            x: position.x / width as f64,
            y: position.y / height as f64,
        });
    }

    /// Mutable canvas for overlays painted after the background
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// Upload the canvas and present it; lost frames are skipped
    pub fn present(&mut self) {
        self.render_system.upload(&self.canvas);
        match self.render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost or outdated, reconfiguring");
                self.render_system.reconfigure();
            }
            Err(e) => error!("Render error: {:?}", e),
        }
    }
}

impl RenderSurface for WindowSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn pixel_ratio(&self) -> f64 {
        self.window.scale_factor().min(self.max_pixel_ratio)
    }

    fn events(&self) -> &EventHub {
        &self.events
    }

    fn context(&mut self) -> Option<&mut Canvas> {
        Some(&mut self.canvas)
    }
}
