//! Shader program description.
//!
//! A shader is created from a GLSL vertex and fragment source. Its uniform
//! blocks and texture samplers are bound to fixed slots at creation: the n-th
//! uniform block named in `ShaderParams` is bound to uniform buffer binding
//! point n, the n-th texture to texture unit n.
use serde::{Deserialize, Serialize};

use crate::video::backends::Capabilities;
use crate::video::errors::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderParams {
    pub uniform_blocks: Vec<String>,
    pub textures: Vec<String>,
}

impl ShaderParams {
    pub fn new<T1, T2>(uniform_blocks: &[T1], textures: &[T2]) -> Self
    where
        T1: AsRef<str>,
        T2: AsRef<str>,
    {
        ShaderParams {
            uniform_blocks: uniform_blocks.iter().map(|v| v.as_ref().to_owned()).collect(),
            textures: textures.iter().map(|v| v.as_ref().to_owned()).collect(),
        }
    }

    /// Returns the uniform buffer binding point of the block `name`.
    pub fn uniform_binding_point(&self, name: &str) -> Option<u32> {
        self.uniform_blocks
            .iter()
            .position(|v| v == name)
            .map(|v| v as u32)
    }

    /// Returns the texture unit of the sampler `name`.
    pub fn texture_unit(&self, name: &str) -> Option<u32> {
        self.textures.iter().position(|v| v == name).map(|v| v as u32)
    }

    pub fn validate(&self, capabilities: &Capabilities, vs: &str, fs: &str) -> Result<()> {
        if vs.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "vs",
                "Vertex shader is required to describe a proper render pipeline.".into(),
            ));
        }

        if fs.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "fs",
                "Fragment shader is required to describe a proper render pipeline.".into(),
            ));
        }

        if self.uniform_blocks.len() > capabilities.max_uniform_buffer_bindings as usize {
            return Err(Error::NotSupported(format!(
                "{} uniform blocks (max {}).",
                self.uniform_blocks.len(),
                capabilities.max_uniform_buffer_bindings
            )));
        }

        if self.textures.len() > capabilities.max_texture_units as usize {
            return Err(Error::NotSupported(format!(
                "{} texture units (max {}).",
                self.textures.len(),
                capabilities.max_texture_units
            )));
        }

        let names = self.uniform_blocks.iter().chain(self.textures.iter());
        for (i, name) in names.clone().enumerate() {
            if name.is_empty() || names.clone().skip(i + 1).any(|v| v == name) {
                return Err(Error::InvalidArgument(
                    "params",
                    format!("binding name `{}` is empty or declared twice.", name),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup() {
        let params = ShaderParams::new(&["Camera", "Object"], &["Albedo"]);
        assert_eq!(params.uniform_binding_point("Object"), Some(1));
        assert_eq!(params.uniform_binding_point("Albedo"), None);
        assert_eq!(params.texture_unit("Albedo"), Some(0));

        let caps = Capabilities::default();
        assert!(params.validate(&caps, "void main() {}", "void main() {}").is_ok());
        assert!(params.validate(&caps, " ", "void main() {}").is_err());

        let twice = ShaderParams::new(&["Camera"], &["Camera"]);
        assert!(twice.validate(&caps, "a", "b").is_err());
    }
}
