//! Components are the units of game logic driven by the engine loop.
//!
//! Additions and removals are buffered, and only take effect at the top of the
//! next tick. Removing a component before its addition took effect cancels it,
//! its `init` hook is never called.

use std::fmt;
use std::mem;

use crate::audio::AudioDevice;
use crate::errors::*;
use crate::math::Vector2;
use crate::utils::{Handle, HandlePool};
use crate::video::ContextGuard;

use super::time::GameTime;

/// Names a component added to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentHandle(Handle);

impl fmt::Display for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Component{}", self.0)
    }
}

pub trait GameComponent: Send {
    /// Called once, at the top of the tick following the addition.
    fn init(&mut self, _: &mut Context) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, _: &mut Context) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, _: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Called once, when the component is removed or the engine stops.
    fn unload(&mut self, _: &mut Context) -> Result<()> {
        Ok(())
    }
}

/// Everything a component hook has access to.
pub struct Context<'a, 'b> {
    pub video: &'a mut ContextGuard<'b>,
    pub audio: &'a mut AudioDevice,
    pub time: GameTime,
    /// The size in pixels of the window.
    pub dimensions: Vector2<u32>,
    pending: &'a mut Pending,
    shutdown: &'a mut bool,
}

impl<'a, 'b> Context<'a, 'b> {
    pub fn add_component<T>(&mut self, component: T) -> ComponentHandle
    where
        T: GameComponent + 'static,
    {
        self.pending.add(Box::new(component))
    }

    pub fn remove_component(&mut self, handle: ComponentHandle) -> bool {
        self.pending.remove(handle)
    }

    /// Stops the engine loop at the end of this tick.
    pub fn shutdown(&mut self) {
        *self.shutdown = true;
    }
}

#[derive(Default)]
pub(crate) struct Pending {
    handles: HandlePool,
    added: Vec<(ComponentHandle, Box<dyn GameComponent>)>,
    removed: Vec<ComponentHandle>,
}

impl Pending {
    fn add(&mut self, component: Box<dyn GameComponent>) -> ComponentHandle {
        let handle = ComponentHandle(self.handles.create());
        self.added.push((handle, component));
        handle
    }

    fn remove(&mut self, handle: ComponentHandle) -> bool {
        if !self.handles.is_alive(handle.0) {
            return false;
        }

        if let Some(i) = self.added.iter().position(|v| v.0 == handle) {
            self.added.remove(i);
            self.handles.free(handle.0);
            return true;
        }

        if self.removed.contains(&handle) {
            return false;
        }

        self.removed.push(handle);
        true
    }
}

/// The component lists of the engine.
#[derive(Default)]
pub struct Components {
    live: Vec<(ComponentHandle, Box<dyn GameComponent>)>,
    pending: Pending,
}

impl Components {
    pub fn new() -> Self {
        Components::default()
    }

    pub fn add<T>(&mut self, component: T) -> ComponentHandle
    where
        T: GameComponent + 'static,
    {
        self.pending.add(Box::new(component))
    }

    /// Schedules the removal of a component. Returns false if the component
    /// is unknown or its removal has been scheduled already.
    pub fn remove(&mut self, handle: ComponentHandle) -> bool {
        self.pending.remove(handle)
    }

    /// Returns the number of components whose `init` has been called.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Returns the number of additions and removals waiting for the next tick.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.added.len() + self.pending.removed.len()
    }

    /// Returns true if `handle` was added and has not been removed yet.
    #[inline]
    pub fn is_alive(&self, handle: ComponentHandle) -> bool {
        self.pending.handles.is_alive(handle.0)
    }

    /// Runs one tick. Returns true if a component asked to shut down.
    pub fn tick(
        &mut self,
        video: &mut ContextGuard,
        audio: &mut AudioDevice,
        time: GameTime,
        dimensions: Vector2<u32>,
    ) -> Result<bool> {
        let Components { live, pending } = self;
        let mut shutdown = false;

        macro_rules! ctx {
            () => {
                Context {
                    video: &mut *video,
                    audio: &mut *audio,
                    time,
                    dimensions,
                    pending: &mut *pending,
                    shutdown: &mut shutdown,
                }
            };
        }

        let added = mem::replace(&mut pending.added, Vec::new());
        for (handle, mut component) in added {
            component.init(&mut ctx!())?;
            live.push((handle, component));
        }

        let removed = mem::replace(&mut pending.removed, Vec::new());
        for handle in removed {
            pending.handles.free(handle.0);
            if let Some(i) = live.iter().position(|v| v.0 == handle) {
                let (_, mut component) = live.remove(i);
                component.unload(&mut ctx!())?;
            }
        }

        for (handle, component) in live.iter_mut() {
            if !pending.removed.contains(handle) {
                component.update(&mut ctx!())?;
            }
        }

        for (handle, component) in live.iter_mut() {
            if !pending.removed.contains(handle) {
                component.draw(&mut ctx!())?;
            }
        }

        Ok(shutdown)
    }

    /// Unloads every live component, in the reverse order of their additions.
    /// Components never initialized are dropped silently.
    pub fn unload_all(
        &mut self,
        video: &mut ContextGuard,
        audio: &mut AudioDevice,
        time: GameTime,
        dimensions: Vector2<u32>,
    ) {
        let Components { live, pending } = self;
        let mut shutdown = false;

        while let Some((handle, mut component)) = live.pop() {
            pending.handles.free(handle.0);

            let mut ctx = Context {
                video: &mut *video,
                audio: &mut *audio,
                time,
                dimensions,
                pending: &mut *pending,
                shutdown: &mut shutdown,
            };

            if let Err(err) = component.unload(&mut ctx) {
                error!("Failed to unload {}: {}", handle, err);
            }
        }

        pending.added.clear();
        pending.removed.clear();
    }
}
