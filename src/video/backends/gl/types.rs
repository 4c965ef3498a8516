use gl;
use gl::types::*;

use super::super::super::assets::prelude::*;
use super::super::BufferTarget;

impl From<BufferUsage> for GLenum {
    fn from(usage: BufferUsage) -> Self {
        match usage {
            BufferUsage::Static => gl::STATIC_DRAW,
            BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
            BufferUsage::Stream => gl::STREAM_DRAW,
        }
    }
}

impl From<BufferTarget> for GLenum {
    fn from(target: BufferTarget) -> Self {
        match target {
            BufferTarget::Vertex => gl::ARRAY_BUFFER,
            BufferTarget::Index => gl::ELEMENT_ARRAY_BUFFER,
            BufferTarget::Uniform => gl::UNIFORM_BUFFER,
        }
    }
}

impl From<IndexFormat> for GLenum {
    fn from(format: IndexFormat) -> Self {
        match format {
            IndexFormat::U16 => gl::UNSIGNED_SHORT,
            IndexFormat::U32 => gl::UNSIGNED_INT,
        }
    }
}

impl From<Comparison> for GLenum {
    fn from(cmp: Comparison) -> Self {
        match cmp {
            Comparison::Never => gl::NEVER,
            Comparison::Less => gl::LESS,
            Comparison::LessOrEqual => gl::LEQUAL,
            Comparison::Greater => gl::GREATER,
            Comparison::GreaterOrEqual => gl::GEQUAL,
            Comparison::Equal => gl::EQUAL,
            Comparison::NotEqual => gl::NOTEQUAL,
            Comparison::Always => gl::ALWAYS,
        }
    }
}

impl From<StencilOperation> for GLenum {
    fn from(op: StencilOperation) -> Self {
        match op {
            StencilOperation::Keep => gl::KEEP,
            StencilOperation::Zero => gl::ZERO,
            StencilOperation::Replace => gl::REPLACE,
            StencilOperation::Increment => gl::INCR,
            StencilOperation::IncrementWrap => gl::INCR_WRAP,
            StencilOperation::Decrement => gl::DECR,
            StencilOperation::DecrementWrap => gl::DECR_WRAP,
            StencilOperation::Invert => gl::INVERT,
        }
    }
}

impl From<StencilFace> for GLenum {
    fn from(face: StencilFace) -> Self {
        match face {
            StencilFace::Front => gl::FRONT,
            StencilFace::Back => gl::BACK,
        }
    }
}

impl From<FrontFace> for GLenum {
    fn from(face: FrontFace) -> Self {
        match face {
            FrontFace::Clockwise => gl::CW,
            FrontFace::CounterClockwise => gl::CCW,
        }
    }
}

impl From<FillMode> for GLenum {
    fn from(mode: FillMode) -> Self {
        match mode {
            FillMode::Solid => gl::FILL,
            FillMode::Wireframe => gl::LINE,
        }
    }
}

impl From<BlendOperation> for GLenum {
    fn from(op: BlendOperation) -> Self {
        match op {
            BlendOperation::Add => gl::FUNC_ADD,
            BlendOperation::Subtract => gl::FUNC_SUBTRACT,
            BlendOperation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
            BlendOperation::Min => gl::MIN,
            BlendOperation::Max => gl::MAX,
        }
    }
}

impl From<Blend> for GLenum {
    fn from(factor: Blend) -> Self {
        match factor {
            Blend::Zero => gl::ZERO,
            Blend::One => gl::ONE,
            Blend::SourceColor => gl::SRC_COLOR,
            Blend::InverseSourceColor => gl::ONE_MINUS_SRC_COLOR,
            Blend::DestinationColor => gl::DST_COLOR,
            Blend::InverseDestinationColor => gl::ONE_MINUS_DST_COLOR,
            Blend::SourceAlpha => gl::SRC_ALPHA,
            Blend::InverseSourceAlpha => gl::ONE_MINUS_SRC_ALPHA,
            Blend::DestinationAlpha => gl::DST_ALPHA,
            Blend::InverseDestinationAlpha => gl::ONE_MINUS_DST_ALPHA,
        }
    }
}

impl From<PrimitiveType> for GLenum {
    fn from(primitive: PrimitiveType) -> Self {
        match primitive {
            PrimitiveType::PointList => gl::POINTS,
            PrimitiveType::LineList => gl::LINES,
            PrimitiveType::LineStrip => gl::LINE_STRIP,
            PrimitiveType::TriangleList => gl::TRIANGLES,
            PrimitiveType::TriangleStrip => gl::TRIANGLE_STRIP,
        }
    }
}

impl From<AddressMode> for GLenum {
    fn from(mode: AddressMode) -> Self {
        match mode {
            AddressMode::Wrap => gl::REPEAT,
            AddressMode::Mirror => gl::MIRRORED_REPEAT,
            AddressMode::Clamp => gl::CLAMP_TO_EDGE,
            AddressMode::Border => gl::CLAMP_TO_BORDER,
        }
    }
}

impl From<VertexElementType> for (GLenum, GLboolean) {
    fn from(ty: VertexElementType) -> Self {
        match ty {
            VertexElementType::Color => (gl::UNSIGNED_BYTE, gl::TRUE),
            _ => (gl::FLOAT, gl::FALSE),
        }
    }
}

impl From<TextureFormat> for (GLenum, GLenum, GLenum) {
    /// Returns the (internal format, upload format, upload type) of a texture
    /// format.
    fn from(format: TextureFormat) -> Self {
        match format {
            TextureFormat::Unknown | TextureFormat::RGBA8UIntNorm => {
                (gl::RGBA8, gl::RGBA, gl::UNSIGNED_BYTE)
            }
            TextureFormat::RGBA16UIntNorm => (gl::RGBA16, gl::RGBA, gl::UNSIGNED_SHORT),
            TextureFormat::RGBA32Float => (gl::RGBA32F, gl::RGBA, gl::FLOAT),
            TextureFormat::RGB32Float => (gl::RGB32F, gl::RGB, gl::FLOAT),
            TextureFormat::BGRA8UIntNorm => (gl::RGBA8, gl::BGRA, gl::UNSIGNED_BYTE),
            TextureFormat::DXT1 => (0x83F1, gl::RGBA, gl::UNSIGNED_BYTE),
            TextureFormat::DXT3 => (0x83F2, gl::RGBA, gl::UNSIGNED_BYTE),
            TextureFormat::DXT5 => (0x83F3, gl::RGBA, gl::UNSIGNED_BYTE),
            TextureFormat::Depth16 => (gl::DEPTH_COMPONENT16, gl::DEPTH_COMPONENT, gl::UNSIGNED_SHORT),
            TextureFormat::Depth32 => (gl::DEPTH_COMPONENT32F, gl::DEPTH_COMPONENT, gl::FLOAT),
            TextureFormat::Depth24Stencil8 => {
                (gl::DEPTH24_STENCIL8, gl::DEPTH_STENCIL, gl::UNSIGNED_INT_24_8)
            }
        }
    }
}

/// Combines the minifying and mip filters into a `GL_TEXTURE_MIN_FILTER` value.
pub fn min_filter(min: TextureFilter, mip: TextureFilter) -> GLenum {
    let linear = |v| v != TextureFilter::Point;
    match (linear(min), linear(mip)) {
        (false, false) => gl::NEAREST_MIPMAP_NEAREST,
        (false, true) => gl::NEAREST_MIPMAP_LINEAR,
        (true, false) => gl::LINEAR_MIPMAP_NEAREST,
        (true, true) => gl::LINEAR_MIPMAP_LINEAR,
    }
}

pub fn mag_filter(mag: TextureFilter) -> GLenum {
    match mag {
        TextureFilter::Point => gl::NEAREST,
        _ => gl::LINEAR,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filters() {
        assert_eq!(
            min_filter(TextureFilter::Anisotropic, TextureFilter::Point),
            gl::LINEAR_MIPMAP_NEAREST
        );
        assert_eq!(mag_filter(TextureFilter::Point), gl::NEAREST);
    }

    #[test]
    fn formats() {
        let (internal, format, _): (GLenum, GLenum, GLenum) = TextureFormat::BGRA8UIntNorm.into();
        assert_eq!(internal, gl::RGBA8);
        assert_eq!(format, gl::BGRA);
    }
}
