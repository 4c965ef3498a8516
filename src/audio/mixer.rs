use super::backends::NativeHandle;
use super::device::{AudioDevice, AudioDeviceId};
use super::effect::Effect;
use super::errors::{Error, Result};
use crate::utils::Handle;

/// The auxiliary effect slot behind a `MixerChannel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectSlot {
    /// The device has no effect extension.
    Disabled,
    Allocated(Handle),
}

/// A channel applying an effect to the signal sent to it.
///
/// On devices without the effect extension the channel is disabled, and its
/// gain and effect operations silently do nothing.
///
/// A channel owns its slot, and is consumed by `AudioDevice::delete_mixer_channel`.
#[derive(Debug, PartialEq)]
pub struct MixerChannel {
    device: AudioDeviceId,
    name: String,
    slot: EffectSlot,
    effect: Option<Effect>,
}

impl MixerChannel {
    pub(crate) fn new(device: AudioDeviceId, name: &str, slot: EffectSlot) -> Self {
        MixerChannel {
            device,
            name: name.to_owned(),
            slot,
            effect: None,
        }
    }

    #[inline]
    pub fn device(&self) -> AudioDeviceId {
        self.device
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn slot(&self) -> EffectSlot {
        self.slot
    }

    /// Returns the effect last bound to the channel. Deleting the effect does
    /// not unbind it, check `AudioDevice::is_disposed` before using it.
    #[inline]
    pub fn effect(&self) -> Option<Effect> {
        self.effect
    }

    /// Returns the gain of the effect output, or 0.0 if the channel is disabled.
    pub fn wet_gain(&self, device: &mut AudioDevice) -> Result<f32> {
        match self.native(device)? {
            Some(native) => unsafe {
                let gain = device.visitor.slot_gain(native);
                device.visitor.check()?;
                Ok(gain)
            },
            None => Ok(0.0),
        }
    }

    /// Sets the gain of the effect output in [0, 1].
    pub fn set_wet_gain(&mut self, device: &mut AudioDevice, gain: f32) -> Result<()> {
        let native = match self.native(device)? {
            Some(native) => native,
            None => return Ok(()),
        };

        if gain < 0.0 || gain > 1.0 {
            return Err(Error::InvalidArgument(
                "gain",
                format!("{} is not in [0, 1].", gain),
            ));
        }

        unsafe {
            device.visitor.set_slot_gain(native, gain);
            device.visitor.check()
        }
    }

    /// Binds `effect` to the channel, or unbinds the current one with `None`.
    pub fn set_effect(&mut self, device: &mut AudioDevice, effect: Option<Effect>) -> Result<()> {
        let slot = self.native(device)?;

        let effect_native = match effect {
            Some(v) => {
                device.validate(v, "effect")?;
                device.effects.get(v.handle).and_then(|e| e.native)
            }
            None => None,
        };

        self.effect = effect;

        if let Some(slot) = slot {
            unsafe {
                device.visitor.bind_effect_to_slot(slot, effect_native);
                device.visitor.check()?;
            }
        }

        Ok(())
    }

    fn native(&self, device: &AudioDevice) -> Result<Option<NativeHandle>> {
        if self.device != device.id {
            return Err(Error::InvalidArgumentType("device", "mixer channel"));
        }

        match self.slot {
            EffectSlot::Disabled => Ok(None),
            EffectSlot::Allocated(handle) => device
                .slots
                .get(handle)
                .cloned()
                .map(Some)
                .ok_or(Error::Disposed("channel", "mixer channel")),
        }
    }
}
