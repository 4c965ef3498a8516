//! The OpenGL 4 backend.
//!
//! Requires a 4.1 core context with `GL_ARB_texture_storage`, or a 4.2 one.

pub mod capabilities;
pub mod types;
pub mod visitor;

pub use self::visitor::GLVisitor;

use std::os::raw::c_void;

use super::super::errors::Result;

/// A native OpenGL context, like the one of a window.
pub trait GLContext {
    /// Makes the context current on the calling thread.
    unsafe fn make_current(&self) -> Result<()>;

    /// Releases the context from the calling thread. Contexts which can not be
    /// released stay current until another one is made current.
    unsafe fn detach(&self) -> Result<()> {
        Ok(())
    }

    /// Returns the address of an OpenGL function.
    fn get_proc_address(&self, symbol: &str) -> *const c_void;
}
