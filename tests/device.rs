extern crate bytemuck;
extern crate chalk;
extern crate env_logger;

use bytemuck::{Pod, Zeroable};

use chalk::prelude::*;
use chalk::utils::Journal;
use chalk::video::backends::headless::{Call, HeadlessVisitor};
use chalk::video::backends::BufferTarget;

const VS: &str = "#version 410\nvoid main() { gl_Position = vec4(0.0); }";
const FS: &str = "#version 410\nout vec4 color;\nvoid main() { color = vec4(1.0); }";

fn headless() -> (GraphicsDevice, Journal<Call>) {
    let _ = env_logger::try_init();
    let visitor = HeadlessVisitor::default();
    let journal = visitor.journal();
    (GraphicsDevice::new(Box::new(visitor)), journal)
}

fn headless_with(capabilities: Capabilities) -> (GraphicsDevice, Journal<Call>) {
    let _ = env_logger::try_init();
    let visitor = HeadlessVisitor::new(capabilities);
    let journal = visitor.journal();
    (GraphicsDevice::new(Box::new(visitor)), journal)
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
}

impl Vertex {
    fn new(x: f32, y: f32, z: f32) -> Self {
        Vertex { position: [x, y, z] }
    }
}

fn position() -> VertexDescription {
    VertexDescription::default().with(VertexElementUsage::Position, VertexElementType::Vector3)
}

#[test]
fn make_current() {
    let (mut device, journal) = headless();

    {
        let _video = device.make_current().unwrap();
        assert_eq!(journal.calls(), vec![Call::MakeCurrent]);
    }

    assert_eq!(journal.calls(), vec![Call::MakeCurrent, Call::DetachCurrent]);
}

#[test]
fn texture_mip_chain() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();

    let texture = video
        .create_texture2d(256, 256, 0, TextureFormat::RGBA8UIntNorm)
        .unwrap();
    assert_eq!(video.texture(texture).unwrap().mip_levels, 9);
    assert_eq!(journal.count(|v| *v == Call::CreateTexture(1, 9)), 1);

    let texture = video
        .create_texture2d(256, 64, 3, TextureFormat::RGBA8UIntNorm)
        .unwrap();
    assert_eq!(video.texture(texture).unwrap().mip_levels, 3);

    let err = video
        .create_texture2d(4, 4, 4, TextureFormat::RGBA8UIntNorm)
        .unwrap_err();
    match err {
        VideoError::OutOfRange("mip_levels", _) => {}
        _ => panic!("unexpected {:?}", err),
    }
}

#[test]
fn texture_validation() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    journal.clear();

    match video.create_texture2d(0, 16, 1, TextureFormat::RGBA8UIntNorm) {
        Err(VideoError::InvalidArgument("width", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.create_texture2d(16, 0, 1, TextureFormat::RGBA8UIntNorm) {
        Err(VideoError::InvalidArgument("height", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.create_texture2d(16, 16, 1, TextureFormat::Unknown) {
        Err(VideoError::InvalidArgument("format", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.create_texture2d(32768, 16, 1, TextureFormat::RGBA8UIntNorm) {
        Err(VideoError::NotSupported(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    let data = [0u8; 15];
    match video.create_texture2d_with_data(2, 2, 1, TextureFormat::RGBA8UIntNorm, &data) {
        Err(VideoError::InvalidArgument("data", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());
}

#[test]
fn texture_update() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();

    let texture = video
        .create_texture2d(4, 4, 0, TextureFormat::RGBA8UIntNorm)
        .unwrap();
    journal.clear();

    video.update_texture(texture, 1, &[0u8; 16]).unwrap();
    assert_eq!(journal.calls(), vec![Call::UpdateTexture(1, 1, 16)]);

    match video.update_texture(texture, 3, &[0u8; 4]) {
        Err(VideoError::OutOfRange("level", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.update_texture(texture, 0, &[0u8; 16]) {
        Err(VideoError::InvalidArgument("data", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    let compressed = video.create_texture2d(4, 4, 1, TextureFormat::DXT1).unwrap();
    match video.update_texture(compressed, 0, &[0u8; 8]) {
        Err(VideoError::NotSupported(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.generate_mips(compressed) {
        Err(VideoError::NotSupported(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    journal.clear();
    video.generate_mips(texture).unwrap();
    assert_eq!(journal.calls(), vec![Call::GenerateMips(1)]);
}

#[test]
fn sampler_validation() {
    let mut caps = Capabilities::default();
    caps.supports_anisotropic_filtering = false;
    caps.max_anisotropy = 0;

    let (mut device, journal) = headless_with(caps);
    let mut video = device.make_current().unwrap();
    journal.clear();

    let mut info = SamplerInfo::default();
    info.min_filter = TextureFilter::Anisotropic;
    info.max_anisotropy = 4;
    match video.create_sampler(info) {
        Err(VideoError::NotSupported(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    let mut info = SamplerInfo::default();
    info.min_lod = 2.0;
    info.max_lod = 1.0;
    match video.create_sampler(info) {
        Err(VideoError::InvalidArgument("info", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());

    let sampler = video.create_sampler(SamplerInfo::default()).unwrap();
    assert_eq!(video.sampler(sampler).unwrap().info, SamplerInfo::default());
}

#[test]
fn sampler_anisotropy() {
    let (mut device, _) = headless();
    let mut video = device.make_current().unwrap();

    let mut info = SamplerInfo::default();
    info.mag_filter = TextureFilter::Anisotropic;
    info.max_anisotropy = 0;
    match video.create_sampler(info) {
        Err(VideoError::InvalidArgument("info", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    info.max_anisotropy = 32;
    match video.create_sampler(info) {
        Err(VideoError::NotSupported(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    info.max_anisotropy = 16;
    assert!(video.create_sampler(info).is_ok());
}

#[test]
fn buffers() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    journal.clear();

    let vertices = [
        Vertex::new(0.0, 0.0, 0.0),
        Vertex::new(1.0, 0.0, 0.0),
        Vertex::new(0.0, 1.0, 0.0),
    ];
    let vb = video
        .create_vertex_buffer_with_data(position(), &vertices, BufferUsage::Static)
        .unwrap();
    assert_eq!(video.vertex_buffer(vb).unwrap().vertex_count, 3);
    assert_eq!(
        journal.calls(),
        vec![Call::CreateBuffer(BufferTarget::Vertex, 1, 36)]
    );

    match video.create_vertex_buffer_with_data(position(), &[0.0f32; 4], BufferUsage::Static) {
        Err(VideoError::InvalidArgument("data", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.create_vertex_buffer(VertexDescription::default(), 3, BufferUsage::Static) {
        Err(VideoError::InvalidArgument("description", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.create_vertex_buffer(position(), 0, BufferUsage::Static) {
        Err(VideoError::InvalidArgument("vertex_count", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    let ib = video
        .create_index_buffer_with_data(IndexFormat::U16, &[0u16, 1, 2], BufferUsage::Dynamic)
        .unwrap();
    assert_eq!(video.index_buffer(ib).unwrap().index_count, 3);

    match video.create_index_buffer_with_data(IndexFormat::U32, &[0u16, 1, 2], BufferUsage::Static) {
        Err(VideoError::InvalidArgument("data", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    journal.clear();
    video.update_index_buffer(ib, &[2u16, 1, 0]).unwrap();
    assert_eq!(
        journal.calls(),
        vec![Call::UpdateBuffer(BufferTarget::Index, 2, 6)]
    );

    match video.update_vertex_buffer(vb, &vertices[..1]) {
        Err(VideoError::InvalidArgument("data", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    journal.clear();
    video.update_vertex_buffer(vb, &vertices[..]).unwrap();
    assert_eq!(
        journal.calls(),
        vec![Call::UpdateBuffer(BufferTarget::Vertex, 1, 36)]
    );
}

#[test]
fn constant_buffer_size() {
    let (mut device, _) = headless();
    let mut video = device.make_current().unwrap();

    let buffer = video.create_constant_buffer(BufferUsage::Dynamic).unwrap();
    assert_eq!(video.constant_buffer(buffer).unwrap().size, None);

    video.update_constant_buffer(buffer, &[1.0f32; 4]).unwrap();
    assert_eq!(video.constant_buffer(buffer).unwrap().size, Some(16));

    match video.update_constant_buffer(buffer, &[1.0f32; 2]) {
        Err(VideoError::InvalidArgument("data", _)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn shader_validation() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    journal.clear();

    match video.create_shader(ShaderParams::default(), "  ", FS) {
        Err(VideoError::InvalidArgument("vs", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.create_shader(ShaderParams::default(), VS, "") {
        Err(VideoError::InvalidArgument("fs", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    let params = ShaderParams::new(&["Globals"], &["Globals"]);
    match video.create_shader(params, VS, FS) {
        Err(VideoError::InvalidArgument("params", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());

    let params = ShaderParams::new(&["Globals"], &["Albedo"]);
    let shader = video.create_shader(params.clone(), VS, FS).unwrap();
    assert_eq!(video.shader(shader).unwrap().params, params);
}

#[test]
fn native_failure_rolls_back() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();

    journal.raise("GL_OUT_OF_MEMORY");
    match video.create_texture2d(16, 16, 1, TextureFormat::RGBA8UIntNorm) {
        Err(VideoError::Native(ref msg)) if msg == "GL_OUT_OF_MEMORY" => {}
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(journal.count(|v| *v == Call::DeleteTexture(1)), 1);
    assert!(video.is_empty());
}

#[test]
fn disposed_handles() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();

    let texture = video
        .create_texture2d(4, 4, 1, TextureFormat::RGBA8UIntNorm)
        .unwrap();
    video.delete_texture(texture).unwrap();
    assert!(video.is_disposed(texture));

    journal.clear();
    video.delete_texture(texture).unwrap();
    assert!(journal.is_empty());

    match video.texture(texture) {
        Err(VideoError::Disposed("handle", "texture")) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.update_texture(texture, 0, &[0u8; 64]) {
        Err(VideoError::Disposed("texture", "texture")) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());
}

#[test]
fn device_mismatch() {
    let (mut first, _) = headless();
    let (mut second, journal) = headless();

    let state = {
        let mut video = first.make_current().unwrap();
        video
            .create_rasterizer_state(RasterizerStateInfo::default())
            .unwrap()
    };

    let mut video = second.make_current().unwrap();
    journal.clear();

    assert!(video.is_disposed(state));
    match video.set_rasterizer_state(Some(state)) {
        Err(VideoError::DeviceMismatch("state")) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.delete_rasterizer_state(state) {
        Err(VideoError::DeviceMismatch("state")) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());
}

#[test]
fn drop_disposes_everything() {
    let (mut device, journal) = headless();

    {
        let mut video = device.make_current().unwrap();
        video
            .create_texture2d(4, 4, 1, TextureFormat::RGBA8UIntNorm)
            .unwrap();
        video.create_sampler(SamplerInfo::default()).unwrap();
        video
            .create_vertex_buffer(position(), 3, BufferUsage::Static)
            .unwrap();
        video
            .create_index_buffer(IndexFormat::U16, 3, BufferUsage::Static)
            .unwrap();
        video.create_constant_buffer(BufferUsage::Dynamic).unwrap();
        video
            .create_shader(ShaderParams::default(), VS, FS)
            .unwrap();
        video
            .create_blend_state(BlendStateInfo::alpha_blend())
            .unwrap();
    }

    assert_eq!(device.len(), 7);
    journal.clear();
    drop(device);

    assert_eq!(journal.count(Call::is_delete), 6);
    assert_eq!(journal.count(|v| *v == Call::DeleteTexture(1)), 1);
    assert_eq!(journal.count(|v| *v == Call::DeleteSampler(2)), 1);
    assert_eq!(journal.count(|v| *v == Call::DeleteShader(6)), 1);
}

#[test]
fn drop_empty_device_is_silent() {
    let (device, journal) = headless();
    drop(device);
    assert!(journal.is_empty());
}
