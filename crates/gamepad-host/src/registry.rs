//! Fixed-capacity device and interface-instance registry.
//!
//! Storage is a `[DeviceSlot; D]` arena of `[InterfaceInstance; I]`, sized
//! at build time and never resized. Device address `n` lives in slot
//! `n - 1`; address 0 and addresses above `D` never resolve.
//!
//! Only instances below a device's instance count are visible to lookups,
//! so a stray completion that arrives after detach finds nothing.

use crate::{DriverError, DriverResult, GamepadVariant, InterfaceInstance};

pub struct DeviceSlot<V: GamepadVariant, const I: usize, const BUF: usize> {
    instances: [InterfaceInstance<V, BUF>; I],
    count: usize,
}

impl<V: GamepadVariant, const I: usize, const BUF: usize> DeviceSlot<V, I, BUF> {
    fn new() -> Self {
        Self {
            instances: core::array::from_fn(|_| InterfaceInstance::empty()),
            count: 0,
        }
    }

    pub fn instance_count(&self) -> usize {
        self.count
    }

    /// Allocated instances, in allocation order.
    pub fn instances(&self) -> &[InterfaceInstance<V, BUF>] {
        self.instances.get(..self.count).unwrap_or(&[])
    }

    fn instances_mut(&mut self) -> &mut [InterfaceInstance<V, BUF>] {
        self.instances.get_mut(..self.count).unwrap_or(&mut [])
    }

    fn clear(&mut self) {
        for instance in &mut self.instances {
            instance.reset();
        }
        self.count = 0;
    }
}

pub struct Registry<V: GamepadVariant, const D: usize, const I: usize, const BUF: usize> {
    devices: [DeviceSlot<V, I, BUF>; D],
}

impl<V: GamepadVariant, const D: usize, const I: usize, const BUF: usize> Default
    for Registry<V, D, I, BUF>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V: GamepadVariant, const D: usize, const I: usize, const BUF: usize> Registry<V, D, I, BUF> {
    pub fn new() -> Self {
        Self {
            devices: core::array::from_fn(|_| DeviceSlot::new()),
        }
    }

    fn slot_index(dev_addr: u8) -> Option<usize> {
        usize::from(dev_addr).checked_sub(1).filter(|slot| *slot < D)
    }

    pub fn device(&self, dev_addr: u8) -> Option<&DeviceSlot<V, I, BUF>> {
        self.devices.get(Self::slot_index(dev_addr)?)
    }

    fn device_mut(&mut self, dev_addr: u8) -> Option<&mut DeviceSlot<V, I, BUF>> {
        self.devices.get_mut(Self::slot_index(dev_addr)?)
    }

    pub fn instance(&self, dev_addr: u8, idx: u8) -> Option<&InterfaceInstance<V, BUF>> {
        self.device(dev_addr)?.instances().get(usize::from(idx))
    }

    pub(crate) fn instance_mut(
        &mut self,
        dev_addr: u8,
        idx: u8,
    ) -> Option<&mut InterfaceInstance<V, BUF>> {
        self.device_mut(dev_addr)?
            .instances_mut()
            .get_mut(usize::from(idx))
    }

    /// Index of the instance owning `ep_addr` as its IN or OUT endpoint.
    pub fn find_by_endpoint(&self, dev_addr: u8, ep_addr: u8) -> Option<u8> {
        let position = self
            .device(dev_addr)?
            .instances()
            .iter()
            .position(|instance| instance.owns_endpoint(ep_addr))?;
        u8::try_from(position).ok()
    }

    /// Index of the non-inert instance bound to `interface_number`.
    pub fn find_by_interface(&self, dev_addr: u8, interface_number: u8) -> Option<u8> {
        let position = self.device(dev_addr)?.instances().iter().position(|instance| {
            instance.interface_number == interface_number && !instance.is_inert()
        })?;
        u8::try_from(position).ok()
    }

    /// Claim the next free instance slot of a device, zeroed.
    ///
    /// # Errors
    ///
    /// [`DriverError::NotFound`] for an address outside `1..=D`,
    /// [`DriverError::CapacityExceeded`] when every slot is taken. Existing
    /// instances are never touched on failure.
    pub fn allocate(&mut self, dev_addr: u8) -> DriverResult<u8> {
        let device = self.device_mut(dev_addr).ok_or(DriverError::NotFound)?;
        let idx = device.count;
        let instance = device
            .instances
            .get_mut(idx)
            .ok_or(DriverError::CapacityExceeded { dev_addr })?;
        instance.reset();
        let handle =
            u8::try_from(idx).map_err(|_overflow| DriverError::CapacityExceeded { dev_addr })?;
        device.count = idx.saturating_add(1);
        Ok(handle)
    }

    /// Roll back the most recent [`Registry::allocate`] of a device.
    pub fn discard_last(&mut self, dev_addr: u8) {
        let Some(device) = self.device_mut(dev_addr) else {
            return;
        };
        let Some(last) = device.count.checked_sub(1) else {
            return;
        };
        if let Some(instance) = device.instances.get_mut(last) {
            instance.reset();
        }
        device.count = last;
    }

    /// Clear every instance of a device, returning how many were allocated.
    pub fn release(&mut self, dev_addr: u8) -> usize {
        let Some(device) = self.device_mut(dev_addr) else {
            return 0;
        };
        let released = device.count;
        device.clear();
        released
    }

    pub fn clear(&mut self) {
        for device in &mut self.devices {
            device.clear();
        }
    }

    /// Addresses that currently hold at least one instance.
    pub fn occupied_addresses(&self) -> impl Iterator<Item = u8> + '_ {
        self.devices
            .iter()
            .enumerate()
            .filter(|(_, device)| device.count > 0)
            .filter_map(|(slot, _)| u8::try_from(slot.saturating_add(1)).ok())
    }
}
