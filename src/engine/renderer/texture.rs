// GPU textures for loaded images

use crate::engine::assets::{AssetId, ImageHandle};
use anyhow::Result;
use log::debug;
use std::collections::HashMap;

/// A loaded texture, bound for the sprite pipeline
pub struct Texture {
    // owned so the GPU memory lives as long as the bind group
    _texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Upload an RGBA image and bind it for the sprite pipeline
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        img: &image::RgbaImage,
        label: &str,
    ) -> Result<Self> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            anyhow::bail!("Image {} has no pixels", label);
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            img.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            _texture: texture,
            bind_group,
            width,
            height,
        })
    }
}

/// Uploaded textures, keyed by the asset they came from
#[derive(Default)]
pub struct TextureManager {
    textures: HashMap<AssetId, Texture>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload an image once; later calls with the same asset are no-ops
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &ImageHandle,
    ) -> Result<()> {
        if self.textures.contains_key(&image.id()) {
            return Ok(());
        }
        let texture = Texture::from_rgba(device, queue, layout, image.get(), image.path())?;
        debug!(
            "Uploaded texture {} ({}x{})",
            image.path(),
            texture.width,
            texture.height
        );
        self.textures.insert(image.id(), texture);
        Ok(())
    }

    pub fn get(&self, id: AssetId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
