//! The audio effect layer.
//!
//! An `AudioDevice` hands out `MixerChannel`s, each wrapping an auxiliary
//! effect slot, and effects which can be bound to them:
//!
//! ```rust,ignore
//! let mut channel = audio.create_mixer_channel("ambient")?;
//! let reverb = audio.create_reverb(ReverbParams::default())?;
//!
//! channel.set_effect(&mut audio, Some(reverb))?;
//! channel.set_wet_gain(&mut audio, 0.5)?;
//! ```

pub mod backends;
pub mod errors;

mod device;
mod effect;
mod mixer;

pub use self::device::{AudioDevice, AudioDeviceId};
pub use self::effect::{Effect, ReverbParams};
pub use self::mixer::{EffectSlot, MixerChannel};

pub mod prelude {
    pub use super::errors::Error as AudioError;
    pub use super::{AudioDevice, Effect, EffectSlot, MixerChannel, ReverbParams};
}
