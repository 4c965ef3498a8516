//! Descriptors of vertex, index and constant buffers.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Hint abouts the intended update strategy of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum BufferUsage {
    /// The data is uploaded once and drawn many times.
    Static,
    /// The data is updated occasionally and drawn many times.
    Dynamic,
    /// The data is updated every frame.
    Stream,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    /// Returns the size in bytes of one index.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

/// The semantic meaning of a vertex element.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum VertexElementUsage {
    Position,
    Normal,
    Tangent,
    Color,
    TexCoord,
}

/// The storage type of a vertex element.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum VertexElementType {
    Float,
    Vector2,
    Vector3,
    Vector4,
    /// Four unsigned bytes normalized to [0, 1].
    Color,
}

impl VertexElementType {
    /// Returns the number of components of this type.
    #[inline]
    pub fn components(self) -> u32 {
        match self {
            VertexElementType::Float => 1,
            VertexElementType::Vector2 => 2,
            VertexElementType::Vector3 => 3,
            VertexElementType::Vector4 | VertexElementType::Color => 4,
        }
    }

    /// Returns the size in bytes of this type.
    #[inline]
    pub fn size(self) -> u32 {
        match self {
            VertexElementType::Color => 4,
            _ => self.components() * 4,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct VertexElement {
    pub usage: VertexElementUsage,
    pub ty: VertexElementType,
}

impl VertexElement {
    pub fn new(usage: VertexElementUsage, ty: VertexElementType) -> Self {
        VertexElement { usage, ty }
    }
}

/// Resolved location of one vertex element inside an interleaved vertex.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct VertexAttribute {
    /// Shader input location, which is the position of the element in its
    /// description.
    pub index: u32,
    pub components: u32,
    pub ty: VertexElementType,
    pub stride: u32,
    pub offset: u32,
}

/// The ordered list of elements making up one interleaved vertex.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct VertexDescription {
    elements: SmallVec<[VertexElement; 8]>,
}

impl VertexDescription {
    pub fn new(elements: &[VertexElement]) -> Self {
        VertexDescription {
            elements: elements.iter().cloned().collect(),
        }
    }

    /// Appends an element.
    pub fn with(mut self, usage: VertexElementUsage, ty: VertexElementType) -> Self {
        self.elements.push(VertexElement::new(usage, ty));
        self
    }

    #[inline]
    pub fn elements(&self) -> &[VertexElement] {
        &self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the size in bytes of one vertex.
    pub fn stride(&self) -> u32 {
        self.elements.iter().map(|v| v.ty.size()).sum()
    }

    /// Resolves the attribute pointers of every element, with offsets
    /// accumulated in declaration order.
    pub fn attributes(&self) -> SmallVec<[VertexAttribute; 8]> {
        let stride = self.stride();
        let mut offset = 0;

        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                let attribute = VertexAttribute {
                    index: i as u32,
                    components: element.ty.components(),
                    ty: element.ty,
                    stride,
                    offset,
                };

                offset += element.ty.size();
                attribute
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn attributes() {
        let description = VertexDescription::default()
            .with(VertexElementUsage::Position, VertexElementType::Vector3)
            .with(VertexElementUsage::Color, VertexElementType::Color)
            .with(VertexElementUsage::TexCoord, VertexElementType::Vector2);

        assert_eq!(description.stride(), 24);

        let attributes = description.attributes();
        assert_eq!(attributes.len(), 3);
        assert_eq!(attributes[1].index, 1);
        assert_eq!(attributes[1].offset, 12);
        assert_eq!(attributes[2].offset, 16);
        assert_eq!(attributes[2].components, 2);
        assert!(attributes.iter().all(|v| v.stride == 24));
    }
}
