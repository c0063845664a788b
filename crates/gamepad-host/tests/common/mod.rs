//! Shared fixtures for the host driver integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset of the fixtures")]

use gamepad_host::{GamepadEvents, GamepadVariant, InterfaceInstance};
use usbh_class_common::{EndpointDescriptor, InterfaceDescriptor};

pub const INTERRUPT: u8 = 0x03;

/// Route driver logs to the test harness output.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
    if let Err(err) = installed {
        // Another test in this binary got there first.
        tracing::debug!("tracing subscriber already installed: {}", err);
    }
}

/// One callback as seen by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<S> {
    Mounted { dev_addr: u8, idx: u8 },
    Unmounted { dev_addr: u8, idx: u8 },
    Received { dev_addr: u8, idx: u8, state: S, fresh: bool, raw: Vec<u8> },
    Sent { dev_addr: u8, idx: u8, report: Vec<u8> },
}

/// Records every callback in order.
#[derive(Debug)]
pub struct Recorder<S> {
    pub events: Vec<Event<S>>,
}

impl<S> Default for Recorder<S> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<S: Clone> Recorder<S> {
    pub fn received(&self) -> Vec<(S, bool)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Received { state, fresh, .. } => Some((state.clone(), *fresh)),
                _ => None,
            })
            .collect()
    }

    pub fn count_unmounted(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::Unmounted { .. }))
            .count()
    }
}

impl<V, const BUF: usize> GamepadEvents<V, BUF> for Recorder<V::State>
where
    V: GamepadVariant,
{
    fn mounted(&mut self, dev_addr: u8, idx: u8, _instance: &InterfaceInstance<V, BUF>) {
        self.events.push(Event::Mounted { dev_addr, idx });
    }

    fn unmounted(&mut self, dev_addr: u8, idx: u8) {
        self.events.push(Event::Unmounted { dev_addr, idx });
    }

    fn report_received(&mut self, dev_addr: u8, idx: u8, instance: &InterfaceInstance<V, BUF>) {
        self.events.push(Event::Received {
            dev_addr,
            idx,
            state: *instance.state(),
            fresh: instance.has_new_data(),
            raw: instance.inbound_report().to_vec(),
        });
    }

    fn report_sent(&mut self, dev_addr: u8, idx: u8, report: &[u8]) {
        self.events.push(Event::Sent {
            dev_addr,
            idx,
            report: report.to_vec(),
        });
    }
}

/// Interface descriptor block: interface, optional class descriptor, then
/// one interrupt endpoint per entry of `endpoints` as `(address, size)`.
pub fn interface_block(
    interface_number: u8,
    class: u8,
    subclass: u8,
    class_descriptor: Option<&[u8]>,
    endpoints: &[(u8, u16)],
) -> Vec<u8> {
    let interface = InterfaceDescriptor {
        interface_number,
        num_endpoints: u8::try_from(endpoints.len()).unwrap_or(u8::MAX),
        interface_class: class,
        interface_subclass: subclass,
        ..InterfaceDescriptor::default()
    };
    let mut bytes = interface.to_bytes().to_vec();
    if let Some(extra) = class_descriptor {
        bytes.extend_from_slice(extra);
    }
    for &(address, size) in endpoints {
        bytes.extend_from_slice(&EndpointDescriptor::new(address, INTERRUPT, size, 4).to_bytes());
    }
    bytes
}

/// HID interface with a single interrupt IN endpoint.
pub fn hid_in_only(ep_in: u8, size: u16) -> Vec<u8> {
    let hid = [0x09, 0x21, 0x11, 0x01, 0x00, 0x01, 0x22, 0x40, 0x00];
    interface_block(0, 0x03, 0x00, Some(&hid), &[(ep_in, size)])
}

/// Steel Battalion XID interface with IN `0x82` and OUT `0x01`.
pub fn xid_in_out() -> Vec<u8> {
    interface_block(0, 0x58, 0x42, None, &[(0x82, 32), (0x01, 32)])
}

pub fn live_sbc_report() -> Vec<u8> {
    let mut report = vec![0u8; 26];
    if let Some(high) = report.get_mut(6) {
        *high = 0x80;
    }
    report
}
