use std::os::raw::c_void;
use std::rc::Rc;

use glutin;
use glutin::GlContext;

use crate::application::settings::{VideoParams, WindowParams};
use crate::errors::*;
use crate::math::Vector2;
use crate::video::backends::gl::{GLContext, GLVisitor};
use crate::video::errors::{Error as VideoError, Result as VideoResult};
use crate::video::GraphicsDevice;

use super::super::{Window, WindowEvent};

/// A native window with an OpenGL 4 core context.
pub struct GlutinWindow {
    window: Rc<glutin::GlWindow>,
    events_loop: glutin::EventsLoop,
    device_created: bool,
}

impl GlutinWindow {
    pub fn new(params: &WindowParams, video: &VideoParams) -> Result<Self> {
        let builder = glutin::WindowBuilder::new()
            .with_title(params.title.clone())
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size.x),
                f64::from(params.size.y),
            ));

        let context = glutin::ContextBuilder::new()
            .with_multisampling(params.multisample)
            .with_gl_profile(glutin::GlProfile::Core)
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (4, 1)))
            .with_gl_debug_flag(video.debug)
            .with_vsync(params.vsync);

        let events_loop = glutin::EventsLoop::new();
        let window = glutin::GlWindow::new(builder, context, &events_loop)
            .map_err(|err| format_err!("[Glutin] {}", err))?;

        info!(
            "Window `{}` created with {:?}.",
            params.title,
            window.get_pixel_format()
        );

        Ok(GlutinWindow {
            window: Rc::new(window),
            events_loop,
            device_created: false,
        })
    }
}

impl Window for GlutinWindow {
    fn create_device(&mut self) -> Result<GraphicsDevice> {
        if self.device_created {
            bail!("The device of this window has been created already.");
        }

        let context = GlutinContext {
            window: self.window.clone(),
        };

        let visitor = unsafe { GLVisitor::new(Box::new(context))? };
        self.device_created = true;
        Ok(GraphicsDevice::new(Box::new(visitor)))
    }

    fn dimensions(&self) -> Vector2<u32> {
        let dpr = self.window.get_hidpi_factor();
        match self.window.get_inner_size() {
            Some(size) => {
                let size = size.to_physical(dpr);
                Vector2::new(size.width as u32, size.height as u32)
            }
            None => Vector2::new(0, 0),
        }
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.window
            .swap_buffers()
            .map_err(|err| format_err!("[Glutin] {}", err))
    }

    fn poll_events(&mut self, events: &mut Vec<WindowEvent>) {
        let window = &self.window;
        self.events_loop.poll_events(|v| {
            if let glutin::Event::WindowEvent { event, .. } = v {
                match event {
                    glutin::WindowEvent::CloseRequested => events.push(WindowEvent::Closed),
                    glutin::WindowEvent::Focused(true) => events.push(WindowEvent::GainFocus),
                    glutin::WindowEvent::Focused(false) => events.push(WindowEvent::LostFocus),
                    glutin::WindowEvent::Resized(size) => {
                        let size = size.to_physical(window.get_hidpi_factor());
                        window.resize(size);

                        let size = Vector2::new(size.width as u32, size.height as u32);
                        events.push(WindowEvent::Resized(size));
                    }
                    _ => {}
                }
            }
        });
    }
}

struct GlutinContext {
    window: Rc<glutin::GlWindow>,
}

impl GLContext for GlutinContext {
    unsafe fn make_current(&self) -> VideoResult<()> {
        if self.window.is_current() {
            return Ok(());
        }

        self.window
            .make_current()
            .map_err(|err| VideoError::Native(format!("[Glutin] {}", err)))
    }

    fn get_proc_address(&self, symbol: &str) -> *const c_void {
        self.window.get_proc_address(symbol) as *const _
    }
}
