//! An audio backend without any native device behind it.

use std::collections::HashMap;

use super::super::errors::{Error, Result};
use super::{Capabilities, EffectKind, EffectParam, NativeHandle, Visitor};
use crate::utils::Journal;

/// A native call received by `HeadlessAudio`.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    CreateEffectSlot(NativeHandle),
    DeleteEffectSlot(NativeHandle),
    SlotAutoSend(NativeHandle, bool),
    BindEffect(NativeHandle, Option<NativeHandle>),
    SetSlotGain(NativeHandle, f32),
    SlotGain(NativeHandle),
    CreateEffect(EffectKind, NativeHandle),
    EffectParam(NativeHandle, EffectParam, f32),
    DeleteEffect(NativeHandle),
}

pub struct HeadlessAudio {
    capabilities: Capabilities,
    journal: Journal<AudioCall>,
    gains: HashMap<NativeHandle, f32>,
    next: NativeHandle,
}

impl HeadlessAudio {
    /// Creates a backend with or without the effect extension.
    pub fn new(efx: bool) -> Self {
        let capabilities = Capabilities {
            supports_efx: efx,
            max_auxiliary_sends: if efx { 4 } else { 0 },
        };

        HeadlessAudio {
            capabilities,
            journal: Journal::new(),
            gains: HashMap::new(),
            next: 1,
        }
    }

    pub fn journal(&self) -> Journal<AudioCall> {
        self.journal.clone()
    }

    fn allocate(&mut self) -> NativeHandle {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for HeadlessAudio {
    fn default() -> Self {
        HeadlessAudio::new(true)
    }
}

impl Visitor for HeadlessAudio {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    unsafe fn check(&mut self) -> Result<()> {
        match self.journal.take_error() {
            Some(err) => Err(Error::Native(err)),
            None => Ok(()),
        }
    }

    unsafe fn create_effect_slot(&mut self) -> Result<NativeHandle> {
        if !self.capabilities.supports_efx {
            return Err(Error::Native("[AL] Effect extension is not present.".into()));
        }

        let id = self.allocate();
        self.gains.insert(id, 1.0);
        self.journal.record(AudioCall::CreateEffectSlot(id));
        Ok(id)
    }

    unsafe fn delete_effect_slot(&mut self, id: NativeHandle) {
        self.gains.remove(&id);
        self.journal.record(AudioCall::DeleteEffectSlot(id));
    }

    unsafe fn set_slot_auto_send(&mut self, id: NativeHandle, enabled: bool) {
        self.journal.record(AudioCall::SlotAutoSend(id, enabled));
    }

    unsafe fn bind_effect_to_slot(&mut self, slot: NativeHandle, effect: Option<NativeHandle>) {
        self.journal.record(AudioCall::BindEffect(slot, effect));
    }

    unsafe fn set_slot_gain(&mut self, id: NativeHandle, gain: f32) {
        self.gains.insert(id, gain);
        self.journal.record(AudioCall::SetSlotGain(id, gain));
    }

    unsafe fn slot_gain(&mut self, id: NativeHandle) -> f32 {
        self.journal.record(AudioCall::SlotGain(id));
        self.gains.get(&id).cloned().unwrap_or(0.0)
    }

    unsafe fn create_effect(&mut self, kind: EffectKind) -> Result<NativeHandle> {
        if !self.capabilities.supports_efx {
            return Err(Error::Native("[AL] Effect extension is not present.".into()));
        }

        let id = self.allocate();
        self.journal.record(AudioCall::CreateEffect(kind, id));
        Ok(id)
    }

    unsafe fn set_effect_param(&mut self, id: NativeHandle, param: EffectParam, value: f32) {
        self.journal.record(AudioCall::EffectParam(id, param, value));
    }

    unsafe fn delete_effect(&mut self, id: NativeHandle) {
        self.journal.record(AudioCall::DeleteEffect(id));
    }
}
