//! The generic class driver.

use crate::binder;
use crate::config::Capacity;
use crate::{
    DEFAULT_EP_BUFSIZE, DEFAULT_MAX_DEVICES, DEFAULT_MAX_INSTANCES, DeviceSlot, DriverConfig,
    DriverError, DriverResult, GamepadEvents, GamepadVariant, InterfaceInstance, Registry,
};
use tracing::{debug, info, warn};
use usbh_class_common::{ControlRequest, HostStack};

/// USB host class driver for one controller family.
///
/// `D` device slots of `I` interface instances each, every instance with
/// two `BUF`-byte endpoint buffers, all stored inline. Every entry point
/// takes the host stack by `&mut` for the duration of the call; the driver
/// never holds on to it.
pub struct GamepadHost<
    V,
    E,
    const D: usize = DEFAULT_MAX_DEVICES,
    const I: usize = DEFAULT_MAX_INSTANCES,
    const BUF: usize = DEFAULT_EP_BUFSIZE,
> where
    V: GamepadVariant,
    E: GamepadEvents<V, BUF>,
{
    pub(crate) registry: Registry<V, D, I, BUF>,
    pub(crate) events: E,
    pub(crate) config: DriverConfig,
}

impl<V, E, const D: usize, const I: usize, const BUF: usize> GamepadHost<V, E, D, I, BUF>
where
    V: GamepadVariant,
    E: GamepadEvents<V, BUF>,
{
    /// Create a driver with every slot empty.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::InvalidConfig`] when the build-time capacities
    /// cannot serve this controller, e.g. a buffer shorter than one report.
    pub fn new(events: E, config: DriverConfig) -> DriverResult<Self> {
        config.validate(&Self::capacity())?;
        debug!(
            "Created {} host driver devices={} instances={} bufsize={}",
            V::NAME,
            D,
            I,
            BUF
        );
        Ok(Self {
            registry: Registry::new(),
            events,
            config,
        })
    }

    pub fn capacity() -> Capacity {
        Capacity {
            max_devices: D,
            max_instances: I,
            buffer_size: BUF,
            report_len: V::REPORT_LEN,
        }
    }

    /// Forget every device and instance.
    pub fn init(&mut self) {
        self.registry.clear();
    }

    /// Offer an interface to the driver during enumeration.
    ///
    /// `descriptors` begins with the interface descriptor and extends to
    /// the end of the interface's descriptor block. Returns the new
    /// instance index.
    pub fn open<H: HostStack>(
        &mut self,
        host: &mut H,
        dev_addr: u8,
        descriptors: &[u8],
    ) -> DriverResult<u8> {
        binder::bind(&mut self.registry, host, &self.config, dev_addr, descriptors)
    }

    /// Activate a bound interface once the device is configured.
    ///
    /// Marks the instance connected, sends the variant's mount command if
    /// enabled, fires `mounted` and tells the stack configuration is done.
    pub fn set_config<H: HostStack>(
        &mut self,
        host: &mut H,
        dev_addr: u8,
        interface_number: u8,
    ) -> DriverResult<u8> {
        let idx = self
            .registry
            .find_by_interface(dev_addr, interface_number)
            .ok_or(DriverError::NotFound)?;
        let instance = self
            .registry
            .instance_mut(dev_addr, idx)
            .ok_or(DriverError::NotFound)?;
        instance.connected = true;

        if self.config.send_mount_command
            && let Some(request) = V::mount_request(instance.kind)?
            && let Err(err) = host.execute_control_transfer(dev_addr, &request)
        {
            // The interface still mounts; the application can retry.
            warn!(
                "{} mount command failed on dev={} itf={}: {}",
                V::NAME,
                dev_addr,
                interface_number,
                err
            );
        }

        info!(
            "{} mounted dev={} itf={} idx={} kind={:?}",
            V::NAME,
            dev_addr,
            interface_number,
            idx,
            instance.kind
        );
        self.events.mounted(dev_addr, idx, instance);
        host.signal_configuration_complete(dev_addr, interface_number);
        Ok(idx)
    }

    /// Detach a device: `unmounted` fires once per instance, then every
    /// instance is cleared. Returns how many instances were released.
    pub fn close(&mut self, dev_addr: u8) -> usize {
        let count = self
            .registry
            .device(dev_addr)
            .map_or(0, DeviceSlot::instance_count);
        for idx in 0..count {
            if let Ok(idx) = u8::try_from(idx) {
                self.events.unmounted(dev_addr, idx);
            }
        }
        let released = self.registry.release(dev_addr);
        if released > 0 {
            info!("{} unmounted dev={} instances={}", V::NAME, dev_addr, released);
        }
        released
    }

    /// Issue a control request to the device owning instance `idx`.
    pub fn send_control<H: HostStack>(
        &mut self,
        host: &mut H,
        dev_addr: u8,
        idx: u8,
        request: &ControlRequest,
    ) -> DriverResult<()> {
        if self.registry.instance(dev_addr, idx).is_none() {
            return Err(DriverError::NotFound);
        }
        if self.config.trace_reports {
            tracing::trace!(
                "{} control dev={} idx={} setup={:02X?} data={:02X?}",
                V::NAME,
                dev_addr,
                idx,
                request.setup().to_bytes(),
                request.data()
            );
        }
        host.execute_control_transfer(dev_addr, request)
            .map_err(DriverError::ControlFailed)
    }

    pub fn instance(&self, dev_addr: u8, idx: u8) -> Option<&InterfaceInstance<V, BUF>> {
        self.registry.instance(dev_addr, idx)
    }

    pub fn registry(&self) -> &Registry<V, D, I, BUF> {
        &self.registry
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }
}
