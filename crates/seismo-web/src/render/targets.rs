use super::helpers;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen color targets: the full-resolution HDR scene and two
/// half-resolution bloom ping-pong buffers.
pub(crate) struct RenderTargets {
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
    // Textures are kept alive alongside their views
    _hdr_tex: wgpu::Texture,
    _bloom_a: wgpu::Texture,
    _bloom_b: wgpu::Texture,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = helpers::create_color_texture(device, "hdr_tex", width, height, HDR_FORMAT);
        let (bw, bh) = bloom_size(width, height);
        let (bloom_a, bloom_a_view) = helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT);
        let (bloom_b, bloom_b_view) = helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT);
        Self {
            hdr_view,
            bloom_a_view,
            bloom_b_view,
            _hdr_tex: hdr_tex,
            _bloom_a: bloom_a,
            _bloom_b: bloom_b,
        }
    }
}

#[inline]
pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    ((width.max(1) / 2).max(1), (height.max(1) / 2).max(1))
}
