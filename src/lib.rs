//! # What is This?
//!
//! Chalk is a small game framework. Its core is a device layer which wraps the
//! native objects of a graphics API (textures, samplers, buffers, shaders and
//! fixed-function states) behind handles, and translates backend-agnostic
//! draw calls into the minimal sequence of native calls by diffing render
//! states.
//!
//! Around it sit an audio effect layer (mixer channels and the effects bound to
//! them), a windowing seam and a component loop running on its own thread.
//!
//! ## Video
//!
//! Everything drawn goes through a `ContextGuard`, which proves the native
//! context is current on the calling thread. Render states are set lazily and
//! only pushed to the native context by the next draw, where they differ from
//! what was pushed before. Check the `video` module for details.
//!
//! ## Engine
//!
//! `Engine` owns the window, the graphics device and the audio device on a
//! dedicated loop thread, and calls the `init`, `update`, `draw` and `unload`
//! hooks of every `GameComponent` added to it. Check the `application` module
//! for details.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod errors;
pub mod utils;
pub mod application;
pub mod audio;
pub mod math;
pub mod video;
pub mod window;

pub mod prelude;
