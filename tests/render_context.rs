extern crate chalk;
extern crate env_logger;
extern crate rand;

use rand::Rng;

use chalk::prelude::*;
use chalk::utils::Journal;
use chalk::video::backends::headless::{Call, HeadlessVisitor};

const VS: &str = "#version 410\nvoid main() { gl_Position = vec4(0.0); }";
const FS: &str = "#version 410\nout vec4 color;\nvoid main() { color = vec4(1.0); }";

struct Scene {
    shader: ShaderHandle,
    vb: VertexBufferHandle,
    ib: IndexBufferHandle,
    texture: Texture2DHandle,
    buffer: ConstantBufferHandle,
}

fn headless() -> (GraphicsDevice, Journal<Call>) {
    let _ = env_logger::try_init();
    let visitor = HeadlessVisitor::default();
    let journal = visitor.journal();
    (GraphicsDevice::new(Box::new(visitor)), journal)
}

fn scene(video: &mut ContextGuard) -> Scene {
    let params = ShaderParams::new(&["Globals"], &["Albedo", "Normal"]);
    let shader = video.create_shader(params, VS, FS).unwrap();

    let description = VertexDescription::default()
        .with(VertexElementUsage::Position, VertexElementType::Vector2)
        .with(VertexElementUsage::Color, VertexElementType::Color);
    let vb = video
        .create_vertex_buffer(description, 3, BufferUsage::Static)
        .unwrap();
    let ib = video
        .create_index_buffer_with_data(IndexFormat::U16, &[0u16, 1, 2], BufferUsage::Static)
        .unwrap();
    let texture = video
        .create_texture2d(2, 2, 1, TextureFormat::RGBA8UIntNorm)
        .unwrap();
    let buffer = video.create_constant_buffer(BufferUsage::Dynamic).unwrap();

    Scene {
        shader,
        vb,
        ib,
        texture,
        buffer,
    }
}

// Native name of the texture of `scene`, allocated after the shader and the
// two buffers.
const TEXTURE: u32 = 4;

#[test]
fn draw_binds_once() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();

    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| *v == Call::UseProgram(1)), 1);
    assert_eq!(journal.count(|v| matches!(v, Call::BindVertexBuffer(2, _))), 1);
    assert_eq!(journal.count(Call::is_fixed_function), 16);
    assert_eq!(journal.count(|v| *v == Call::Draw(PrimitiveType::TriangleList, 0, 3)), 1);

    journal.clear();
    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.draw().unwrap();
    assert_eq!(
        journal.calls(),
        vec![Call::Draw(PrimitiveType::TriangleList, 0, 3)]
    );
}

#[test]
fn vertex_attributes() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    journal.clear();
    video.draw().unwrap();

    let attributes = journal
        .calls()
        .into_iter()
        .filter_map(|v| match v {
            Call::BindVertexBuffer(_, attributes) => Some(attributes),
            _ => None,
        })
        .next()
        .unwrap();

    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].index, 0);
    assert_eq!(attributes[0].offset, 0);
    assert_eq!(attributes[0].stride, 12);
    assert_eq!(attributes[1].index, 1);
    assert_eq!(attributes[1].offset, 8);
    assert_eq!(attributes[1].ty, VertexElementType::Color);
}

#[test]
fn draw_requirements() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);
    journal.clear();

    video.set_shader(s.shader).unwrap();
    match video.draw() {
        Err(VideoError::InvalidOperation(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    video.set_vertex_buffer(s.vb).unwrap();
    match video.draw_indexed() {
        Err(VideoError::InvalidOperation(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());

    video.set_index_buffer(s.ib).unwrap();
    video.draw_indexed().unwrap();
    assert_eq!(journal.count(|v| *v == Call::BindIndexBuffer(3)), 1);
    assert_eq!(
        journal.count(|v| *v == Call::DrawIndexed(PrimitiveType::TriangleList, 3, IndexFormat::U16)),
        1
    );
}

#[test]
fn draw_without_shader() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);
    journal.clear();

    video.set_vertex_buffer(s.vb).unwrap();
    match video.draw() {
        Err(VideoError::InvalidOperation(ref msg)) if msg == "No shader set!" => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());
}

#[test]
fn primitive_type() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.set_primitive_type(PrimitiveType::LineStrip);
    assert_eq!(video.render_state().primitive, PrimitiveType::LineStrip);

    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| *v == Call::Draw(PrimitiveType::LineStrip, 0, 3)), 1);
}

#[test]
fn state_diffing() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.draw().unwrap();

    let mut info = RasterizerStateInfo::default();
    info.cull_mode = CullMode::Front;
    let rasterizer = video.create_rasterizer_state(info).unwrap();
    video.set_rasterizer_state(Some(rasterizer)).unwrap();

    journal.clear();
    video.draw().unwrap();
    assert_eq!(
        journal.calls(),
        vec![
            Call::CullMode(CullMode::Front),
            Call::Draw(PrimitiveType::TriangleList, 0, 3),
        ]
    );

    // A state equal to the applied one issues nothing.
    let same = video.create_rasterizer_state(info).unwrap();
    video.set_rasterizer_state(Some(same)).unwrap();
    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(Call::is_fixed_function), 0);

    // Back to the default description.
    video.set_rasterizer_state(None).unwrap();
    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| *v == Call::CullMode(CullMode::Back)), 1);
    assert_eq!(journal.count(Call::is_fixed_function), 1);
}

#[test]
fn set_state() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    let blend = video
        .create_blend_state(BlendStateInfo::alpha_blend())
        .unwrap();

    let mut state = RenderStateInfo::default();
    state.shader = Some(s.shader);
    state.blend = Some(blend);
    video.set_state(state).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    assert_eq!(video.render_state(), state);

    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| *v == Call::Blend(true)), 1);

    journal.clear();
    video.set_state(state).unwrap();
    video.draw().unwrap();
    assert_eq!(journal.len(), 1);
}

#[test]
fn reset_state() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.draw().unwrap();

    video.reset_state();
    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| *v == Call::UseProgram(1)), 1);
    assert_eq!(journal.count(Call::is_fixed_function), 16);
}

#[test]
fn depth_stencil_idempotent() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();

    let comparisons = [
        Comparison::Never,
        Comparison::Less,
        Comparison::LessOrEqual,
        Comparison::Greater,
        Comparison::GreaterOrEqual,
        Comparison::Equal,
        Comparison::NotEqual,
        Comparison::Always,
    ];

    let operations = [
        StencilOperation::Keep,
        StencilOperation::Zero,
        StencilOperation::Replace,
        StencilOperation::Increment,
        StencilOperation::IncrementWrap,
        StencilOperation::Decrement,
        StencilOperation::DecrementWrap,
        StencilOperation::Invert,
    ];

    let mut rng = rand::thread_rng();
    let face = |rng: &mut rand::rngs::ThreadRng| DepthStencilFaceInfo {
        comparison: comparisons[rng.gen_range(0..comparisons.len())],
        fail: operations[rng.gen_range(0..operations.len())],
        depth_fail: operations[rng.gen_range(0..operations.len())],
        pass: operations[rng.gen_range(0..operations.len())],
    };

    for _ in 0..64 {
        let info = DepthStencilStateInfo {
            depth_enabled: rng.gen(),
            depth_write: rng.gen(),
            depth_comparison: comparisons[rng.gen_range(0..comparisons.len())],
            stencil_enabled: rng.gen(),
            stencil_read_mask: rng.gen(),
            stencil_write_mask: rng.gen(),
            front_face: face(&mut rng),
            back_face: face(&mut rng),
        };

        let reference = rng.gen_range(0..4);
        let state = video.create_depth_stencil_state(info).unwrap();
        video.set_depth_stencil_state(Some(state), reference).unwrap();
        video.draw().unwrap();

        // Pushing the very same state again must not issue anything.
        let copy = video.create_depth_stencil_state(info).unwrap();
        video.set_depth_stencil_state(Some(copy), reference).unwrap();
        journal.clear();
        video.draw().unwrap();
        assert_eq!(journal.count(Call::is_depth_stencil), 0);

        video.delete_depth_stencil_state(state).unwrap();
        video.delete_depth_stencil_state(copy).unwrap();
    }
}

#[test]
fn stencil_reference() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.draw().unwrap();

    video.set_depth_stencil_state(None, 7).unwrap();
    journal.clear();
    video.draw().unwrap();

    let default = DepthStencilStateInfo::default();
    assert_eq!(
        journal.calls(),
        vec![
            Call::StencilFunc(StencilFace::Front, Comparison::Always, 7, default.stencil_read_mask),
            Call::StencilFunc(StencilFace::Back, Comparison::Always, 7, default.stencil_read_mask),
            Call::Draw(PrimitiveType::TriangleList, 0, 3),
        ]
    );
}

#[test]
fn clear_values_are_cached() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    journal.clear();

    let color = Color::cornflower_blue();
    video.clear_color(color).unwrap();
    video.clear_color(color).unwrap();

    assert_eq!(
        journal.calls(),
        vec![
            Call::ClearColor(color),
            Call::ClearDepth(1.0),
            Call::Clear(ClearOptions::COLOR | ClearOptions::DEPTH),
            Call::Clear(ClearOptions::COLOR | ClearOptions::DEPTH),
        ]
    );

    journal.clear();
    video.clear(ClearOptions::empty(), color, 1.0, 0).unwrap();
    assert!(journal.is_empty());

    match video.clear(ClearOptions::DEPTH, color, 1.5, 0) {
        Err(VideoError::OutOfRange("depth", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());
}

#[test]
fn clear_color_ignores_depth_value() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    journal.clear();

    let color = Color::black();
    video.clear(ClearOptions::COLOR, color, 5.0, 0).unwrap();
    video.clear(ClearOptions::STENCIL, color, -1.0, 3).unwrap();

    let calls = journal.calls();
    assert!(calls.contains(&Call::Clear(ClearOptions::COLOR)));
    assert!(calls.contains(&Call::Clear(ClearOptions::STENCIL)));
    assert!(!calls.iter().any(|v| match *v {
        Call::ClearDepth(_) => true,
        _ => false,
    }));

    match video.clear(ClearOptions::COLOR | ClearOptions::DEPTH, color, 5.0, 0) {
        Err(VideoError::OutOfRange("depth", _)) => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn clear_ignores_write_masks() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    let mut info = BlendStateInfo::default();
    info.write_mask = ColorWriteMask::RED;
    let blend = video.create_blend_state(info).unwrap();

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.set_blend_state(Some(blend)).unwrap();
    video.draw().unwrap();

    journal.clear();
    video.clear_color(Color::black()).unwrap();
    assert_eq!(
        journal.calls(),
        vec![
            Call::ClearColor(Color::black()),
            Call::ColorWrite(ColorWriteMask::all()),
            Call::ClearDepth(1.0),
            Call::Clear(ClearOptions::COLOR | ClearOptions::DEPTH),
        ]
    );

    // The mask of the blend state comes back with the next draw.
    journal.clear();
    video.draw().unwrap();
    assert_eq!(
        journal.calls(),
        vec![
            Call::ColorWrite(ColorWriteMask::RED),
            Call::Draw(PrimitiveType::TriangleList, 0, 3),
        ]
    );
}

#[test]
fn textures_and_samplers() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);
    let texture = TEXTURE;

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.set_texture(s.shader, "Albedo", s.texture).unwrap();
    video.set_texture(s.shader, "Normal", s.texture).unwrap();

    match video.set_texture(s.shader, "Specular", s.texture) {
        Err(VideoError::InvalidArgument("name", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| *v == Call::BindTexture(0, texture)), 1);
    assert_eq!(journal.count(|v| *v == Call::BindTexture(1, texture)), 1);

    // Uploads go through unit 0, which has to be bound again afterwards.
    video.update_texture(s.texture, 0, &[0u8; 16]).unwrap();
    journal.clear();
    video.draw().unwrap();
    assert_eq!(
        journal.calls(),
        vec![
            Call::BindTexture(0, texture),
            Call::Draw(PrimitiveType::TriangleList, 0, 3),
        ]
    );

    let sampler = video.create_sampler(SamplerInfo::default()).unwrap();
    video.set_sampler(s.shader, "Normal", sampler).unwrap();
    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| matches!(v, Call::BindSampler(1, _))), 1);
}

#[test]
fn creation_keeps_bindings() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.set_texture(s.shader, "Normal", s.texture).unwrap();
    video.draw().unwrap();

    video
        .create_texture2d(8, 8, 1, TextureFormat::RGBA8UIntNorm)
        .unwrap();
    video
        .create_vertex_buffer(
            VertexDescription::default().with(VertexElementUsage::Position, VertexElementType::Float),
            4,
            BufferUsage::Dynamic,
        )
        .unwrap();

    journal.clear();
    video.draw().unwrap();
    assert_eq!(
        journal.calls(),
        vec![Call::Draw(PrimitiveType::TriangleList, 0, 3)]
    );
}

#[test]
fn constant_buffers() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    match video.set_constant_buffer(s.shader, "Globals", s.buffer) {
        Err(VideoError::InvalidOperation(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    video
        .update_constant_buffer(s.buffer, &[0.0f32; 16])
        .unwrap();

    match video.set_constant_buffer(s.shader, "Locals", s.buffer) {
        Err(VideoError::InvalidArgument("name", _)) => {}
        other => panic!("unexpected {:?}", other),
    }

    video
        .set_constant_buffer(s.shader, "Globals", s.buffer)
        .unwrap();
    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();

    journal.clear();
    video.draw().unwrap();
    assert_eq!(journal.count(|v| *v == Call::BindUniformBuffer(0, 5)), 1);
}

#[test]
fn deleting_bound_objects() {
    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);

    video.set_shader(s.shader).unwrap();
    video.set_vertex_buffer(s.vb).unwrap();
    video.set_texture(s.shader, "Albedo", s.texture).unwrap();
    video.draw().unwrap();

    video.delete_texture(s.texture).unwrap();
    journal.clear();
    video.draw().unwrap();
    assert_eq!(
        journal.calls(),
        vec![Call::Draw(PrimitiveType::TriangleList, 0, 3)]
    );

    video.delete_vertex_buffer(s.vb).unwrap();
    journal.clear();
    match video.draw() {
        Err(VideoError::InvalidOperation(_)) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());

    match video.set_vertex_buffer(s.vb) {
        Err(VideoError::Disposed("vb", "vertex buffer")) => {}
        other => panic!("unexpected {:?}", other),
    }

    let vb = video
        .create_vertex_buffer(
            VertexDescription::default().with(VertexElementUsage::Position, VertexElementType::Vector2),
            3,
            BufferUsage::Static,
        )
        .unwrap();
    video.set_vertex_buffer(vb).unwrap();
    video.delete_shader(s.shader).unwrap();
    match video.draw() {
        Err(VideoError::InvalidOperation(ref msg)) if msg == "No shader set!" => {}
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn rejected_handles_issue_nothing() {
    let (mut remote, _) = headless();
    let foreign = {
        let mut video = remote.make_current().unwrap();
        scene(&mut video)
    };

    let (mut device, journal) = headless();
    let mut video = device.make_current().unwrap();
    let s = scene(&mut video);
    journal.clear();

    match video.set_shader(foreign.shader) {
        Err(VideoError::DeviceMismatch("shader")) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.set_texture(s.shader, "Albedo", foreign.texture) {
        Err(VideoError::DeviceMismatch("texture")) => {}
        other => panic!("unexpected {:?}", other),
    }

    match video.update_vertex_buffer(foreign.vb, &[0u8; 36]) {
        Err(VideoError::DeviceMismatch("vb")) => {}
        other => panic!("unexpected {:?}", other),
    }

    let blend = video
        .create_blend_state(BlendStateInfo::default())
        .unwrap();
    video.delete_blend_state(blend).unwrap();
    match video.set_blend_state(Some(blend)) {
        Err(VideoError::Disposed("state", "blend state")) => {}
        other => panic!("unexpected {:?}", other),
    }

    assert!(journal.is_empty());
}
