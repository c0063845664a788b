//! USB host class drivers for specialty game controllers
//!
//! One generic engine, [`GamepadHost`], handles interface binding, the
//! fixed-capacity device registry and the endpoint transfer life cycle.
//! Controller families plug in through [`GamepadVariant`]:
//!
//! - [`vendor::DenshaVariant`]: Taito Densha de GO! rail controller
//! - [`vendor::Guncon2Variant`]: Namco GunCon 2 light-gun
//! - [`vendor::SbcVariant`]: Capcom Steel Battalion cockpit controller
//!
//! The driver is event-driven and never blocks. The external host stack
//! (behind [`usbh_class_common::HostStack`]) calls the entry points during
//! enumeration and transfer completion; the application receives
//! notifications through [`GamepadEvents`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

mod binder;
pub mod config;
pub mod driver;
pub mod error;
pub mod events;
pub mod instance;
pub mod registry;
pub mod transfer;
pub mod variant;
pub mod vendor;

pub use config::{
    Capacity, DEFAULT_EP_BUFSIZE, DEFAULT_MAX_DEVICES, DEFAULT_MAX_INSTANCES, DriverConfig,
    DriverConfigBuilder, IdentityMatch,
};
pub use driver::GamepadHost;
pub use error::{DriverError, DriverResult};
pub use events::GamepadEvents;
pub use instance::{InterfaceInstance, TransferState};
pub use registry::{DeviceSlot, Registry};
pub use variant::GamepadVariant;
pub use vendor::{
    ControllerFamily, DenshaHost, DenshaVariant, Guncon2Host, Guncon2Variant, SbcHost, SbcVariant,
    detect_family,
};
