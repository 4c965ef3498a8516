use std::sync::atomic::{AtomicU32, Ordering};

use super::backends::{Capabilities, EffectKind, NativeHandle, Visitor};
use super::effect::{Effect, EffectObject, ReverbParams};
use super::errors::{Error, Result};
use super::mixer::{EffectSlot, MixerChannel};
use crate::utils::ObjectPool;

static NEXT_DEVICE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifies the `AudioDevice` a channel or an effect belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AudioDeviceId(u32);

/// The owner of the native audio context, its effect slots and effects.
///
/// Devices without the effect extension still hand out channels and effects,
/// they are just never backed by native objects.
pub struct AudioDevice {
    pub(crate) id: AudioDeviceId,
    pub(crate) visitor: Box<dyn Visitor>,
    capabilities: Capabilities,
    pub(crate) slots: ObjectPool<NativeHandle>,
    pub(crate) effects: ObjectPool<EffectObject>,
}

impl AudioDevice {
    pub fn new(visitor: Box<dyn Visitor>) -> Self {
        let id = AudioDeviceId(NEXT_DEVICE_ID.fetch_add(1, Ordering::Relaxed));
        let capabilities = *visitor.capabilities();
        info!("Audio device {:?} created with {:?}.", id, capabilities);

        AudioDevice {
            id,
            visitor,
            capabilities,
            slots: ObjectPool::new(),
            effects: ObjectPool::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> AudioDeviceId {
        self.id
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Creates a channel effects can be applied to. The channel allocates an
    /// auxiliary effect slot if the device supports them.
    pub fn create_mixer_channel(&mut self, name: &str) -> Result<MixerChannel> {
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument("name", "Name is blank.".into()));
        }

        let slot = if self.capabilities.supports_efx {
            unsafe {
                let native = self.visitor.create_effect_slot()?;
                if let Err(err) = self.visitor.check() {
                    self.visitor.delete_effect_slot(native);
                    return Err(err);
                }

                self.visitor.set_slot_auto_send(native, true);
                if let Err(err) = self.visitor.check() {
                    self.visitor.delete_effect_slot(native);
                    return Err(err);
                }

                EffectSlot::Allocated(self.slots.create(native))
            }
        } else {
            EffectSlot::Disabled
        };

        Ok(MixerChannel::new(self.id, name, slot))
    }

    /// Deletes the effect slot of `channel`.
    pub fn delete_mixer_channel(&mut self, channel: MixerChannel) -> Result<()> {
        if channel.device() != self.id {
            return Err(Error::InvalidArgumentType("channel", "mixer channel"));
        }

        if let EffectSlot::Allocated(handle) = channel.slot() {
            if let Some(native) = self.slots.free(handle) {
                unsafe {
                    self.visitor.delete_effect_slot(native);
                    self.visitor.check()?;
                }
            }
        }

        Ok(())
    }

    pub fn create_reverb(&mut self, params: ReverbParams) -> Result<Effect> {
        params.validate()?;

        let native = if self.capabilities.supports_efx {
            unsafe {
                let native = self.visitor.create_effect(EffectKind::Reverb)?;
                for &(param, value) in params.params().iter() {
                    self.visitor.set_effect_param(native, param, value);
                }

                if let Err(err) = self.visitor.check() {
                    self.visitor.delete_effect(native);
                    return Err(err);
                }

                Some(native)
            }
        } else {
            None
        };

        let handle = self.effects.create(EffectObject { native, params });
        Ok(Effect {
            device: self.id,
            handle,
        })
    }

    /// Returns the parameters `effect` was created with.
    pub fn reverb(&self, effect: Effect) -> Result<&ReverbParams> {
        self.validate(effect, "effect")?;
        self.effects
            .get(effect.handle)
            .map(|v| &v.params)
            .ok_or(Error::Disposed("effect", "effect"))
    }

    /// Deletes `effect`. Deleting it twice is a no-op.
    pub fn delete_effect(&mut self, effect: Effect) -> Result<()> {
        if effect.device != self.id {
            return Err(Error::InvalidArgumentType("effect", "effect"));
        }

        if let Some(EffectObject {
            native: Some(native),
            ..
        }) = self.effects.free(effect.handle)
        {
            unsafe {
                self.visitor.delete_effect(native);
                self.visitor.check()?;
            }
        }

        Ok(())
    }

    #[inline]
    pub fn is_disposed(&self, effect: Effect) -> bool {
        effect.device != self.id || !self.effects.is_alive(effect.handle)
    }

    /// Checks that `effect` was created by this device and is still alive.
    pub(crate) fn validate(&self, effect: Effect, arg: &'static str) -> Result<()> {
        if effect.device != self.id {
            return Err(Error::InvalidArgumentType(arg, "effect"));
        }

        if !self.effects.is_alive(effect.handle) {
            return Err(Error::Disposed(arg, "effect"));
        }

        Ok(())
    }

    /// Returns the number of alive slots and effects.
    pub fn len(&self) -> usize {
        self.slots.len() + self.effects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for AudioDevice {
    fn drop(&mut self) {
        if self.is_empty() {
            return;
        }

        warn!(
            "Audio device {:?} dropped with {} alive objects, disposing them.",
            self.id,
            self.len()
        );

        unsafe {
            for (_, native) in self.slots.drain() {
                self.visitor.delete_effect_slot(native);
            }

            for (_, v) in self.effects.drain() {
                if let Some(native) = v.native {
                    self.visitor.delete_effect(native);
                }
            }

            if let Err(err) = self.visitor.check() {
                warn!("Failed to dispose audio device {:?}: {}", self.id, err);
            }
        }
    }
}
