//! Descriptors of the fixed-function render states.
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::texture::Comparison;
use crate::video::resources::{
    BlendStateHandle, DepthStencilStateHandle, RasterizerStateHandle, ShaderHandle,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum StencilOperation {
    Keep,
    Zero,
    Replace,
    Increment,
    IncrementWrap,
    Decrement,
    DecrementWrap,
    Invert,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum StencilFace {
    Front,
    Back,
}

/// Stencil test and operations of one face.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct DepthStencilFaceInfo {
    pub comparison: Comparison,
    /// Applied when the stencil test fails.
    pub fail: StencilOperation,
    /// Applied when the stencil test passes and the depth test fails.
    pub depth_fail: StencilOperation,
    /// Applied when both tests pass.
    pub pass: StencilOperation,
}

impl Default for DepthStencilFaceInfo {
    fn default() -> Self {
        DepthStencilFaceInfo {
            comparison: Comparison::Always,
            fail: StencilOperation::Keep,
            depth_fail: StencilOperation::Keep,
            pass: StencilOperation::Keep,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct DepthStencilStateInfo {
    pub depth_enabled: bool,
    pub depth_write: bool,
    pub depth_comparison: Comparison,
    pub stencil_enabled: bool,
    pub stencil_read_mask: u8,
    pub stencil_write_mask: u8,
    pub front_face: DepthStencilFaceInfo,
    pub back_face: DepthStencilFaceInfo,
}

impl Default for DepthStencilStateInfo {
    fn default() -> Self {
        DepthStencilStateInfo {
            depth_enabled: true,
            depth_write: true,
            depth_comparison: Comparison::Less,
            stencil_enabled: false,
            stencil_read_mask: 0xFF,
            stencil_write_mask: 0xFF,
            front_face: DepthStencilFaceInfo::default(),
            back_face: DepthStencilFaceInfo::default(),
        }
    }
}

impl DepthStencilStateInfo {
    #[inline]
    pub fn face(&self, face: StencilFace) -> &DepthStencilFaceInfo {
        match face {
            StencilFace::Front => &self.front_face,
            StencilFace::Back => &self.back_face,
        }
    }
}

/// Specify whether front- or back-facing polygons can be culled.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum CullMode {
    Nothing,
    Front,
    Back,
}

/// Define front- and back-facing polygons.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum FrontFace {
    Clockwise,
    CounterClockwise,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum FillMode {
    Solid,
    Wireframe,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct RasterizerStateInfo {
    pub cull_mode: CullMode,
    pub front_face: FrontFace,
    pub fill_mode: FillMode,
}

impl Default for RasterizerStateInfo {
    fn default() -> Self {
        RasterizerStateInfo {
            cull_mode: CullMode::Back,
            front_face: FrontFace::CounterClockwise,
            fill_mode: FillMode::Solid,
        }
    }
}

/// Specify how incoming RGBA values (source) and the RGBA in framebuffer
/// (destination) are combined.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum BlendOperation {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Blend factors.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Blend {
    Zero,
    One,
    SourceColor,
    InverseSourceColor,
    DestinationColor,
    InverseDestinationColor,
    SourceAlpha,
    InverseSourceAlpha,
    DestinationAlpha,
    InverseDestinationAlpha,
}

bitflags! {
    /// Enable or disable writing color components into the framebuffer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ColorWriteMask: u8 {
        const RED = 0x1;
        const GREEN = 0x2;
        const BLUE = 0x4;
        const ALPHA = 0x8;
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct BlendStateInfo {
    pub enabled: bool,
    pub color_source: Blend,
    pub color_destination: Blend,
    pub color_operation: BlendOperation,
    pub alpha_source: Blend,
    pub alpha_destination: Blend,
    pub alpha_operation: BlendOperation,
    pub write_mask: ColorWriteMask,
}

impl Default for BlendStateInfo {
    fn default() -> Self {
        BlendStateInfo {
            enabled: false,
            color_source: Blend::One,
            color_destination: Blend::Zero,
            color_operation: BlendOperation::Add,
            alpha_source: Blend::One,
            alpha_destination: Blend::Zero,
            alpha_operation: BlendOperation::Add,
            write_mask: ColorWriteMask::all(),
        }
    }
}

impl BlendStateInfo {
    /// Classic `src * a + dst * (1 - a)` alpha blending.
    pub fn alpha_blend() -> Self {
        BlendStateInfo {
            enabled: true,
            color_source: Blend::SourceAlpha,
            color_destination: Blend::InverseSourceAlpha,
            alpha_source: Blend::One,
            alpha_destination: Blend::InverseSourceAlpha,
            ..Default::default()
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

impl Default for PrimitiveType {
    fn default() -> Self {
        PrimitiveType::TriangleList
    }
}

/// Everything a draw call needs besides its buffers and shader resources.
/// States left as `None` fall back to their `Default` description.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct RenderStateInfo {
    pub shader: Option<ShaderHandle>,
    pub primitive: PrimitiveType,
    pub rasterizer: Option<RasterizerStateHandle>,
    pub blend: Option<BlendStateHandle>,
    pub depth_stencil: Option<DepthStencilStateHandle>,
}

bitflags! {
    /// Selects the buffers `clear` resets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearOptions: u8 {
        const COLOR = 0x1;
        const DEPTH = 0x2;
        const STENCIL = 0x4;
    }
}
