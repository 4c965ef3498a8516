use std::ffi::CString;
use std::ptr;

use gl;
use gl::types::*;

use super::super::super::assets::prelude::*;
use super::super::super::errors::{Error, Result};
use super::super::super::resources::Texture2D;
use super::super::{BufferTarget, Capabilities, NativeHandle, Visitor};
use super::capabilities::GLCapabilities;
use super::types;
use super::GLContext;
use crate::math::Color;

/// `GL_TEXTURE_MAX_ANISOTROPY_EXT`
const TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FE;

/// The OpenGL 4 backend.
///
/// Vertex attributes are specified on a single vertex array object which stays
/// bound for the whole life of the context. Uploads go through
/// `GL_COPY_WRITE_BUFFER` and texture unit 0, so creating or updating an object
/// never disturbs the vertex and index buffer bindings.
pub struct GLVisitor {
    context: Box<dyn GLContext>,
    capabilities: GLCapabilities,
    vao: GLuint,
    enabled_attributes: u32,
}

impl GLVisitor {
    /// Loads the functions of `context` and checks it is able to run this
    /// backend.
    pub unsafe fn new(context: Box<dyn GLContext>) -> Result<Self> {
        context.make_current()?;
        gl::load_with(|symbol| context.get_proc_address(symbol));

        let capabilities = GLCapabilities::parse()?;
        info!("GLVisitor {:#?}", capabilities);
        capabilities.validate()?;

        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);
        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        check()?;

        Ok(GLVisitor {
            context,
            capabilities,
            vao,
            enabled_attributes: 0,
        })
    }

    #[inline]
    pub fn gl_capabilities(&self) -> &GLCapabilities {
        &self.capabilities
    }

    unsafe fn upload_texture(&mut self, texture: &Texture2D, level: u32, data: &[u8]) {
        let (internal, format, ty): (GLenum, GLenum, GLenum) = texture.format.into();
        let (width, height) = texture.level_dimensions(level);

        if texture.format.is_compressed() {
            gl::CompressedTexSubImage2D(
                gl::TEXTURE_2D,
                level as GLint,
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                internal,
                data.len() as GLsizei,
                data.as_ptr() as *const _,
            );
        } else {
            gl::TexSubImage2D(
                gl::TEXTURE_2D,
                level as GLint,
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                format,
                ty,
                data.as_ptr() as *const _,
            );
        }
    }

    unsafe fn compile(shader: GLenum, src: &str) -> Result<GLuint> {
        let c_str = CString::new(src.as_bytes())
            .map_err(|_| Error::ShaderCreationFailure("Source contains a nul byte.".into()))?;

        let shader = gl::CreateShader(shader);
        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let log = info_log(len, |len, buf| {
                gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf)
            });

            gl::DeleteShader(shader);
            Err(Error::ShaderCreationFailure(format!("{}\n{}", log, src)))
        } else {
            Ok(shader)
        }
    }

    unsafe fn link(vs: GLuint, fs: GLuint) -> Result<GLuint> {
        let program = gl::CreateProgram();
        gl::AttachShader(program, vs);
        gl::AttachShader(program, fs);
        gl::LinkProgram(program);

        gl::DetachShader(program, vs);
        gl::DetachShader(program, fs);
        gl::DeleteShader(vs);
        gl::DeleteShader(fs);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let log = info_log(len, |len, buf| {
                gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf)
            });

            gl::DeleteProgram(program);
            Err(Error::ShaderCreationFailure(log))
        } else {
            Ok(program)
        }
    }

    unsafe fn bind_params(program: GLuint, params: &ShaderParams) -> Result<()> {
        for (binding, name) in params.uniform_blocks.iter().enumerate() {
            let c_name = c_name(name)?;
            let index = gl::GetUniformBlockIndex(program, c_name.as_ptr());
            if index == gl::INVALID_INDEX {
                return Err(Error::ShaderCreationFailure(format!(
                    "Uniform block `{}` is undefined.",
                    name
                )));
            }

            gl::UniformBlockBinding(program, index, binding as GLuint);
        }

        for (unit, name) in params.textures.iter().enumerate() {
            let c_name = c_name(name)?;
            let location = gl::GetUniformLocation(program, c_name.as_ptr());
            if location == -1 {
                return Err(Error::ShaderCreationFailure(format!(
                    "Sampler `{}` is undefined.",
                    name
                )));
            }

            gl::ProgramUniform1i(program, location, unit as GLint);
        }

        Ok(())
    }
}

impl Visitor for GLVisitor {
    #[inline]
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities.neutral
    }

    unsafe fn make_current(&mut self) -> Result<()> {
        self.context.make_current()
    }

    unsafe fn detach_current(&mut self) -> Result<()> {
        self.context.detach()
    }

    unsafe fn check(&mut self) -> Result<()> {
        check()
    }

    unsafe fn create_texture(
        &mut self,
        texture: &Texture2D,
        data: Option<&[u8]>,
    ) -> Result<NativeHandle> {
        let (internal, _, _): (GLenum, GLenum, GLenum) = texture.format.into();

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        if id == 0 {
            return Err(Error::Native("[GL] Failed to generate texture object.".into()));
        }

        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D, id);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_BASE_LEVEL, 0);
        gl::TexParameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_MAX_LEVEL,
            texture.mip_levels as GLint - 1,
        );

        gl::TexStorage2D(
            gl::TEXTURE_2D,
            texture.mip_levels as GLsizei,
            internal,
            texture.width as GLsizei,
            texture.height as GLsizei,
        );

        if let Some(data) = data {
            self.upload_texture(texture, 0, data);
        }

        Ok(id)
    }

    unsafe fn update_texture(
        &mut self,
        id: NativeHandle,
        texture: &Texture2D,
        level: u32,
        data: &[u8],
    ) {
        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D, id);
        self.upload_texture(texture, level, data);
    }

    unsafe fn generate_mips(&mut self, id: NativeHandle) {
        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D, id);
        gl::GenerateMipmap(gl::TEXTURE_2D);
    }

    unsafe fn delete_texture(&mut self, id: NativeHandle) {
        gl::DeleteTextures(1, &id);
    }

    unsafe fn create_sampler(&mut self, info: &SamplerInfo) -> Result<NativeHandle> {
        let mut id = 0;
        gl::GenSamplers(1, &mut id);
        if id == 0 {
            return Err(Error::Native("[GL] Failed to generate sampler object.".into()));
        }

        let min = types::min_filter(info.min_filter, info.mip_filter);
        let mag = types::mag_filter(info.mag_filter);
        gl::SamplerParameteri(id, gl::TEXTURE_MIN_FILTER, min as GLint);
        gl::SamplerParameteri(id, gl::TEXTURE_MAG_FILTER, mag as GLint);

        let wrap = |mode: AddressMode| GLenum::from(mode) as GLint;
        gl::SamplerParameteri(id, gl::TEXTURE_WRAP_S, wrap(info.address_u));
        gl::SamplerParameteri(id, gl::TEXTURE_WRAP_T, wrap(info.address_v));
        gl::SamplerParameteri(id, gl::TEXTURE_WRAP_R, wrap(info.address_w));

        gl::SamplerParameterf(id, gl::TEXTURE_MIN_LOD, info.min_lod);
        gl::SamplerParameterf(id, gl::TEXTURE_MAX_LOD, info.max_lod);
        gl::SamplerParameterf(id, gl::TEXTURE_LOD_BIAS, info.mip_lod_bias);

        let border = info.border_color.rgba();
        gl::SamplerParameterfv(id, gl::TEXTURE_BORDER_COLOR, border.as_ptr());

        if self.capabilities.neutral.supports_anisotropic_filtering {
            let anisotropy = if info.is_anisotropic() {
                info.max_anisotropy as f32
            } else {
                1.0
            };

            gl::SamplerParameterf(id, TEXTURE_MAX_ANISOTROPY, anisotropy);
        }

        match info.sampler_type {
            SamplerType::Normal => {
                gl::SamplerParameteri(id, gl::TEXTURE_COMPARE_MODE, gl::NONE as GLint);
            }
            SamplerType::Comparison => {
                let func = GLenum::from(info.comparison) as GLint;
                let mode = gl::COMPARE_REF_TO_TEXTURE as GLint;
                gl::SamplerParameteri(id, gl::TEXTURE_COMPARE_MODE, mode);
                gl::SamplerParameteri(id, gl::TEXTURE_COMPARE_FUNC, func);
            }
        }

        Ok(id)
    }

    unsafe fn delete_sampler(&mut self, id: NativeHandle) {
        gl::DeleteSamplers(1, &id);
    }

    unsafe fn create_buffer(
        &mut self,
        _: BufferTarget,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<NativeHandle> {
        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        if id == 0 {
            return Err(Error::Native("[GL] Failed to generate buffer object.".into()));
        }

        let ptr = data.map(|v| v.as_ptr() as *const _).unwrap_or(ptr::null());
        gl::BindBuffer(gl::COPY_WRITE_BUFFER, id);
        gl::BufferData(
            gl::COPY_WRITE_BUFFER,
            size as GLsizeiptr,
            ptr,
            usage.into(),
        );

        Ok(id)
    }

    unsafe fn update_buffer(
        &mut self,
        _: BufferTarget,
        id: NativeHandle,
        usage: BufferUsage,
        data: &[u8],
    ) {
        gl::BindBuffer(gl::COPY_WRITE_BUFFER, id);

        let mut size = 0;
        gl::GetBufferParameteriv(gl::COPY_WRITE_BUFFER, gl::BUFFER_SIZE, &mut size);

        if size as usize == data.len() {
            gl::BufferSubData(
                gl::COPY_WRITE_BUFFER,
                0,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const _,
            );
        } else {
            gl::BufferData(
                gl::COPY_WRITE_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const _,
                usage.into(),
            );
        }
    }

    unsafe fn delete_buffer(&mut self, id: NativeHandle) {
        gl::DeleteBuffers(1, &id);
    }

    unsafe fn create_shader(
        &mut self,
        params: &ShaderParams,
        vs: &str,
        fs: &str,
    ) -> Result<NativeHandle> {
        let vs = Self::compile(gl::VERTEX_SHADER, vs)?;
        let fs = match Self::compile(gl::FRAGMENT_SHADER, fs) {
            Ok(fs) => fs,
            Err(err) => {
                gl::DeleteShader(vs);
                return Err(err);
            }
        };

        let program = Self::link(vs, fs)?;
        if let Err(err) = Self::bind_params(program, params) {
            gl::DeleteProgram(program);
            return Err(err);
        }

        Ok(program)
    }

    unsafe fn delete_shader(&mut self, id: NativeHandle) {
        gl::DeleteProgram(id);
    }

    unsafe fn use_program(&mut self, id: NativeHandle) {
        gl::UseProgram(id);
    }

    unsafe fn bind_vertex_buffer(&mut self, id: NativeHandle, attributes: &[VertexAttribute]) {
        gl::BindVertexArray(self.vao);
        gl::BindBuffer(gl::ARRAY_BUFFER, id);

        let mut enabled = 0;
        for v in attributes {
            let (ty, normalized): (GLenum, GLboolean) = v.ty.into();
            gl::EnableVertexAttribArray(v.index);
            gl::VertexAttribPointer(
                v.index,
                v.components as GLint,
                ty,
                normalized,
                v.stride as GLsizei,
                v.offset as usize as *const _,
            );

            enabled |= 1 << v.index;
        }

        let stale = self.enabled_attributes & !enabled;
        for i in 0..32 {
            if stale & (1 << i) != 0 {
                gl::DisableVertexAttribArray(i);
            }
        }

        self.enabled_attributes = enabled;
    }

    unsafe fn bind_index_buffer(&mut self, id: NativeHandle) {
        gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
    }

    unsafe fn bind_uniform_buffer(&mut self, binding: u32, id: NativeHandle) {
        gl::BindBufferBase(gl::UNIFORM_BUFFER, binding, id);
    }

    unsafe fn bind_texture(&mut self, unit: u32, id: NativeHandle) {
        gl::ActiveTexture(gl::TEXTURE0 + unit);
        gl::BindTexture(gl::TEXTURE_2D, id);
    }

    unsafe fn bind_sampler(&mut self, unit: u32, id: NativeHandle) {
        gl::BindSampler(unit, id);
    }

    unsafe fn set_depth_test(&mut self, enabled: bool) {
        toggle(gl::DEPTH_TEST, enabled);
    }

    unsafe fn set_depth_write(&mut self, enabled: bool) {
        gl::DepthMask(boolean(enabled));
    }

    unsafe fn set_depth_func(&mut self, comparison: Comparison) {
        gl::DepthFunc(comparison.into());
    }

    unsafe fn set_stencil_test(&mut self, enabled: bool) {
        toggle(gl::STENCIL_TEST, enabled);
    }

    unsafe fn set_stencil_write_mask(&mut self, mask: u8) {
        gl::StencilMask(GLuint::from(mask));
    }

    unsafe fn set_stencil_func(
        &mut self,
        face: StencilFace,
        comparison: Comparison,
        reference: i32,
        mask: u8,
    ) {
        gl::StencilFuncSeparate(
            face.into(),
            comparison.into(),
            reference,
            GLuint::from(mask),
        );
    }

    unsafe fn set_stencil_op(
        &mut self,
        face: StencilFace,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    ) {
        gl::StencilOpSeparate(face.into(), fail.into(), depth_fail.into(), pass.into());
    }

    unsafe fn set_cull_mode(&mut self, mode: CullMode) {
        match mode {
            CullMode::Nothing => gl::Disable(gl::CULL_FACE),
            CullMode::Front => {
                gl::Enable(gl::CULL_FACE);
                gl::CullFace(gl::FRONT);
            }
            CullMode::Back => {
                gl::Enable(gl::CULL_FACE);
                gl::CullFace(gl::BACK);
            }
        }
    }

    unsafe fn set_front_face(&mut self, face: FrontFace) {
        gl::FrontFace(face.into());
    }

    unsafe fn set_fill_mode(&mut self, mode: FillMode) {
        gl::PolygonMode(gl::FRONT_AND_BACK, mode.into());
    }

    unsafe fn set_blend(&mut self, enabled: bool) {
        toggle(gl::BLEND, enabled);
    }

    unsafe fn set_blend_func(&mut self, src: Blend, dst: Blend, src_alpha: Blend, dst_alpha: Blend) {
        gl::BlendFuncSeparate(src.into(), dst.into(), src_alpha.into(), dst_alpha.into());
    }

    unsafe fn set_blend_equation(&mut self, color: BlendOperation, alpha: BlendOperation) {
        gl::BlendEquationSeparate(color.into(), alpha.into());
    }

    unsafe fn set_color_write(&mut self, mask: ColorWriteMask) {
        gl::ColorMask(
            boolean(mask.contains(ColorWriteMask::RED)),
            boolean(mask.contains(ColorWriteMask::GREEN)),
            boolean(mask.contains(ColorWriteMask::BLUE)),
            boolean(mask.contains(ColorWriteMask::ALPHA)),
        );
    }

    unsafe fn set_clear_color(&mut self, color: Color) {
        gl::ClearColor(color.r, color.g, color.b, color.a);
    }

    unsafe fn set_clear_depth(&mut self, depth: f32) {
        gl::ClearDepth(f64::from(depth));
    }

    unsafe fn set_clear_stencil(&mut self, stencil: i32) {
        gl::ClearStencil(stencil);
    }

    unsafe fn clear(&mut self, options: ClearOptions) {
        let mut bits = 0;
        if options.contains(ClearOptions::COLOR) {
            bits |= gl::COLOR_BUFFER_BIT;
        }

        if options.contains(ClearOptions::DEPTH) {
            bits |= gl::DEPTH_BUFFER_BIT;
        }

        if options.contains(ClearOptions::STENCIL) {
            bits |= gl::STENCIL_BUFFER_BIT;
        }

        gl::Clear(bits);
    }

    unsafe fn draw(&mut self, primitive: PrimitiveType, first: u32, count: u32) {
        gl::DrawArrays(primitive.into(), first as GLint, count as GLsizei);
    }

    unsafe fn draw_indexed(&mut self, primitive: PrimitiveType, count: u32, format: IndexFormat) {
        gl::DrawElements(
            primitive.into(),
            count as GLsizei,
            format.into(),
            ptr::null(),
        );
    }
}

#[inline]
fn boolean(v: bool) -> GLboolean {
    if v {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

unsafe fn toggle(capability: GLenum, enabled: bool) {
    if enabled {
        gl::Enable(capability);
    } else {
        gl::Disable(capability);
    }
}

fn c_name(name: &str) -> Result<CString> {
    CString::new(name.as_bytes()).map_err(|_| {
        Error::ShaderCreationFailure(format!("Name `{}` contains a nul byte.", name))
    })
}

unsafe fn info_log<F>(len: GLint, read: F) -> String
where
    F: FnOnce(GLsizei, *mut GLchar),
{
    if len <= 1 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    read(len, buf.as_mut_ptr() as *mut GLchar);
    // Skips the trailing null character.
    buf.truncate(len as usize - 1);
    String::from_utf8_lossy(&buf).into_owned()
}

unsafe fn check() -> Result<()> {
    let msg = match gl::GetError() {
        gl::NO_ERROR => return Ok(()),
        gl::INVALID_ENUM => "[GL] An unacceptable value is specified for an enumerated argument.",
        gl::INVALID_VALUE => "[GL] A numeric argument is out of range.",
        gl::INVALID_OPERATION => "[GL] The specified operation is not allowed in the current state.",
        gl::INVALID_FRAMEBUFFER_OPERATION => {
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        }
        gl::OUT_OF_MEMORY => "[GL] There is not enough memory left to execute the command.",
        _ => "[GL] Oops, Unknown OpenGL error.",
    };

    Err(Error::Native(msg.into()))
}
