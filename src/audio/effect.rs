use std::fmt;

use serde::{Deserialize, Serialize};

use super::backends::{EffectParam, NativeHandle};
use super::device::AudioDeviceId;
use super::errors::{Error, Result};
use crate::utils::Handle;

/// Names an effect created by an `AudioDevice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Effect {
    pub(crate) device: AudioDeviceId,
    pub(crate) handle: Handle,
}

impl Effect {
    #[inline]
    pub fn device(&self) -> AudioDeviceId {
        self.device
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Effect{}", self.handle)
    }
}

/// The parameters of a reverb effect, with the ranges of the EFX reverb.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverbParams {
    /// [0, 1]
    pub density: f32,
    /// [0, 1]
    pub diffusion: f32,
    /// [0, 1]
    pub gain: f32,
    /// Seconds, [0.1, 20]
    pub decay_time: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        ReverbParams {
            density: 1.0,
            diffusion: 1.0,
            gain: 0.32,
            decay_time: 1.49,
        }
    }
}

impl ReverbParams {
    pub fn validate(&self) -> Result<()> {
        check_range("density", self.density, 0.0, 1.0)?;
        check_range("diffusion", self.diffusion, 0.0, 1.0)?;
        check_range("gain", self.gain, 0.0, 1.0)?;
        check_range("decay_time", self.decay_time, 0.1, 20.0)
    }

    pub(crate) fn params(&self) -> [(EffectParam, f32); 4] {
        [
            (EffectParam::ReverbDensity, self.density),
            (EffectParam::ReverbDiffusion, self.diffusion),
            (EffectParam::ReverbGain, self.gain),
            (EffectParam::ReverbDecayTime, self.decay_time),
        ]
    }
}

fn check_range(arg: &'static str, v: f32, min: f32, max: f32) -> Result<()> {
    if v >= min && v <= max {
        Ok(())
    } else {
        Err(Error::InvalidArgument(
            arg,
            format!("{} is not in [{}, {}].", v, min, max),
        ))
    }
}

/// The arena entry of an effect. `native` is `None` when the device has no
/// effect extension.
#[derive(Debug)]
pub(crate) struct EffectObject {
    pub native: Option<NativeHandle>,
    pub params: ReverbParams,
}
