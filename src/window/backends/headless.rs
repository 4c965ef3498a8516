use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::*;
use crate::math::Vector2;
use crate::video::backends::headless::HeadlessVisitor;
use crate::video::backends::Capabilities;
use crate::video::GraphicsDevice;

use super::super::{Window, WindowEvent};

/// A window without any native surface behind it. Its device records native
/// calls instead of issuing them.
pub struct HeadlessWindow {
    dimensions: Vector2<u32>,
    capabilities: Option<Capabilities>,
    close: Arc<AtomicBool>,
}

impl HeadlessWindow {
    pub fn new(dimensions: Vector2<u32>) -> Self {
        HeadlessWindow {
            dimensions,
            capabilities: Some(Capabilities::default()),
            close: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the capabilities reported by the device of this window.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Returns a flag which, once raised, makes the window report `Closed`.
    pub fn close_flag(&self) -> Arc<AtomicBool> {
        self.close.clone()
    }
}

impl Window for HeadlessWindow {
    fn create_device(&mut self) -> Result<GraphicsDevice> {
        let capabilities = self
            .capabilities
            .take()
            .ok_or_else(|| format_err!("The device of this window has been created already."))?;

        let visitor = HeadlessVisitor::new(capabilities);
        Ok(GraphicsDevice::new(Box::new(visitor)))
    }

    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    #[inline]
    fn swap_buffers(&mut self) -> Result<()> {
        Ok(())
    }

    fn poll_events(&mut self, events: &mut Vec<WindowEvent>) {
        if self.close.swap(false, Ordering::AcqRel) {
            events.push(WindowEvent::Closed);
        }
    }
}
