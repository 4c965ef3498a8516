//! Descriptions of the objects and states a `GraphicsDevice` creates.

pub mod buffer;
pub mod shader;
pub mod state;
pub mod texture;

pub mod prelude {
    pub use super::buffer::{
        BufferUsage, IndexFormat, VertexAttribute, VertexDescription, VertexElement,
        VertexElementType, VertexElementUsage,
    };
    pub use super::shader::ShaderParams;
    pub use super::state::{
        Blend, BlendOperation, BlendStateInfo, ClearOptions, ColorWriteMask, CullMode,
        DepthStencilFaceInfo, DepthStencilStateInfo, FillMode, FrontFace, PrimitiveType,
        RasterizerStateInfo, RenderStateInfo, StencilFace, StencilOperation,
    };
    pub use super::texture::{
        mip_levels, AddressMode, Comparison, SamplerInfo, SamplerType, TextureFilter,
        TextureFormat,
    };
}
