//! The backend of the audio layer. Only auxiliary effect slots and the effects
//! bound to them are exposed, sound playback is out of the scope of this crate.

pub mod headless;

use super::errors::Result;

/// The name the native API gives to an object.
pub type NativeHandle = u32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capabilities {
    /// Whether the effect extension (auxiliary effect slots) is available.
    pub supports_efx: bool,
    pub max_auxiliary_sends: u32,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            supports_efx: true,
            max_auxiliary_sends: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Reverb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectParam {
    ReverbDensity,
    ReverbDiffusion,
    ReverbGain,
    ReverbDecayTime,
}

pub trait Visitor {
    fn capabilities(&self) -> &Capabilities;

    /// Queries and resets the native error state.
    unsafe fn check(&mut self) -> Result<()>;

    unsafe fn create_effect_slot(&mut self) -> Result<NativeHandle>;

    unsafe fn delete_effect_slot(&mut self, id: NativeHandle);

    /// Sets whether the slot is fed by sources automatically.
    unsafe fn set_slot_auto_send(&mut self, id: NativeHandle, enabled: bool);

    unsafe fn bind_effect_to_slot(&mut self, slot: NativeHandle, effect: Option<NativeHandle>);

    unsafe fn set_slot_gain(&mut self, id: NativeHandle, gain: f32);

    unsafe fn slot_gain(&mut self, id: NativeHandle) -> f32;

    unsafe fn create_effect(&mut self, kind: EffectKind) -> Result<NativeHandle>;

    unsafe fn set_effect_param(&mut self, id: NativeHandle, param: EffectParam, value: f32);

    unsafe fn delete_effect(&mut self, id: NativeHandle);
}
