use std::cmp;
use std::ffi;

use gl;
use gl::types::*;

use super::super::Capabilities;
use crate::video::errors::{Error, Result};

/// `GL_MAX_TEXTURE_MAX_ANISOTROPY_EXT`
pub const MAX_TEXTURE_MAX_ANISOTROPY: GLenum = 0x84FF;

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    GL(u8, u8),
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let split = |v: &Version| match *v {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es1, major1, minor1) = split(self);
        let (es2, major2, minor2) = split(other);

        if es1 != es2 {
            None
        } else {
            Some((major1, minor1).cmp(&(major2, minor2)))
        }
    }
}

impl Version {
    /// Parses a `GL_VERSION` string, like `4.5.0 NVIDIA 390.77` or
    /// `OpenGL ES 3.2 Mesa 18.0.5`.
    pub fn parse(desc: &str) -> Result<Version> {
        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else if desc.starts_with("OpenGL ES-") {
            (true, &desc[13..])
        } else {
            (false, desc)
        };

        let malformed = || Error::Native(format!("[GL] Version string `{}` is malformed.", desc));
        let number = desc.split(' ').next().ok_or_else(malformed)?;

        let mut iter = number.split('.');
        let major = iter.next().and_then(|v| v.parse().ok()).ok_or_else(malformed)?;
        let minor = iter.next().and_then(|v| v.parse().ok()).ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

macro_rules! extensions {
    ($($string:expr => $field:ident,)+) => {
        /// The extensions this backend cares about.
        #[derive(Debug, Clone, Copy, Default)]
        pub struct Extensions {
            $(
                pub $field: bool,
            )+
        }

        impl Extensions {
            pub fn parse<'a, T>(strings: T) -> Extensions
            where
                T: IntoIterator<Item = &'a str>,
            {
                let mut extensions = Extensions::default();

                for extension in strings {
                    match extension {
                        $(
                            $string => extensions.$field = true,
                        )+
                        _ => ()
                    }
                }

                extensions
            }
        }
    }
}

extensions! {
    "GL_EXT_texture_filter_anisotropic" => gl_ext_texture_filter_anisotropic,
    "GL_ARB_texture_filter_anisotropic" => gl_arb_texture_filter_anisotropic,
    "GL_ARB_texture_storage" => gl_arb_texture_storage,
}

/// Everything the GL backend learns about its context at start-up.
#[derive(Debug, Clone)]
pub struct GLCapabilities {
    pub version: Version,
    pub vendor: String,
    pub renderer: String,
    pub extensions: Extensions,
    pub neutral: Capabilities,
}

impl GLCapabilities {
    /// Queries the current context.
    ///
    /// *Safety*: the functions of the current context must have been loaded.
    pub unsafe fn parse() -> Result<GLCapabilities> {
        let desc = parse_str(gl::VERSION)?;
        let version = Version::parse(&desc)?;

        let mut num_extensions = 0;
        gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_extensions);
        let strings = (0..num_extensions)
            .map(|i| {
                let ext = gl::GetStringi(gl::EXTENSIONS, i as GLuint);
                if ext.is_null() {
                    String::new()
                } else {
                    ffi::CStr::from_ptr(ext as *const _)
                        .to_string_lossy()
                        .into_owned()
                }
            })
            .collect::<Vec<_>>();

        let extensions = Extensions::parse(strings.iter().map(|v| v.as_str()));

        let anisotropic = version >= Version::GL(4, 6)
            || extensions.gl_ext_texture_filter_anisotropic
            || extensions.gl_arb_texture_filter_anisotropic;

        let max_anisotropy = if anisotropic {
            let mut v = 0.0;
            gl::GetFloatv(MAX_TEXTURE_MAX_ANISOTROPY, &mut v);
            v as u32
        } else {
            0
        };

        let mut max_lod_bias = 0.0;
        gl::GetFloatv(gl::MAX_TEXTURE_LOD_BIAS, &mut max_lod_bias);

        let neutral = Capabilities {
            version: desc.clone(),
            supports_anisotropic_filtering: anisotropic,
            max_anisotropy,
            max_texture_lod_bias: max_lod_bias,
            max_texture_size: get_integer(gl::MAX_TEXTURE_SIZE),
            max_texture_units: get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS),
            max_uniform_buffer_bindings: get_integer(gl::MAX_UNIFORM_BUFFER_BINDINGS),
            max_vertex_attributes: get_integer(gl::MAX_VERTEX_ATTRIBS),
        };

        Ok(GLCapabilities {
            version,
            vendor: parse_str(gl::VENDOR)?,
            renderer: parse_str(gl::RENDERER)?,
            extensions,
            neutral,
        })
    }

    /// Checks the context is able to run this backend.
    pub fn validate(&self) -> Result<()> {
        match self.version {
            Version::ES(_, _) => Err(Error::NotSupported("OpenGL ES contexts.".into())),
            v if v < Version::GL(4, 1) => Err(Error::NotSupported(format!(
                "OpenGL {:?}, at least 4.1 is required.",
                v
            ))),
            v if v < Version::GL(4, 2) && !self.extensions.gl_arb_texture_storage => {
                Err(Error::NotSupported("GL_ARB_texture_storage.".into()))
            }
            _ => Ok(()),
        }
    }
}

unsafe fn parse_str(id: GLenum) -> Result<String> {
    let s = gl::GetString(id);
    if s.is_null() {
        return Err(Error::Native(format!("[GL] String of {} is null.", id)));
    }

    Ok(ffi::CStr::from_ptr(s as *const _)
        .to_string_lossy()
        .into_owned())
}

unsafe fn get_integer(id: GLenum) -> u32 {
    let mut v = 0;
    gl::GetIntegerv(id, &mut v);
    v.max(0) as u32
}
