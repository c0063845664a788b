//! Interface binding: identify, allocate, open endpoints.

use crate::{DriverConfig, DriverError, DriverResult, GamepadVariant, Registry};
use tracing::debug;
use usbh_class_common::{
    DESC_TYPE_INTERFACE, DescriptorIter, EndpointDirection, HostStack,
};

/// Bind the interface described at the head of `descriptors`.
///
/// `descriptors` starts with the interface descriptor and may be followed
/// by class-specific and endpoint descriptors. The walk is driven by each
/// descriptor's declared length, stops after `bNumEndpoints` endpoints, at
/// the next interface descriptor, or at the first zero-length or truncated
/// descriptor.
///
/// On any failure after allocation the instance slot is rolled back.
pub(crate) fn bind<V, H, const D: usize, const I: usize, const BUF: usize>(
    registry: &mut Registry<V, D, I, BUF>,
    host: &mut H,
    config: &DriverConfig,
    dev_addr: u8,
    descriptors: &[u8],
) -> DriverResult<u8>
where
    V: GamepadVariant,
    H: HostStack,
{
    if registry.device(dev_addr).is_none() {
        return Err(DriverError::NotFound);
    }

    let mut walker = DescriptorIter::new(descriptors);
    let interface = walker
        .next()
        .and_then(|desc| desc.as_interface())
        .ok_or(DriverError::InvalidDescriptor)?;

    let (vendor_id, product_id) = host
        .vendor_product_id(dev_addr)
        .ok_or(DriverError::NotFound)?;
    let kind = V::identify(vendor_id, product_id, &interface, config.identity_match).ok_or(
        DriverError::UnsupportedDevice {
            vendor_id,
            product_id,
        },
    )?;

    let idx = registry.allocate(dev_addr)?;
    if let Err(err) = open_endpoints(registry, host, dev_addr, idx, walker, interface.num_endpoints)
    {
        registry.discard_last(dev_addr);
        return Err(err);
    }

    let instance = registry
        .instance_mut(dev_addr, idx)
        .ok_or(DriverError::NotFound)?;
    instance.kind = kind;
    instance.interface_number = interface.interface_number;

    debug!(
        "Bound {} {:?} VID=0x{:04X} PID=0x{:04X} dev={} itf={} idx={} ep_in=0x{:02X}/{} ep_out=0x{:02X}/{}",
        V::NAME,
        kind,
        vendor_id,
        product_id,
        dev_addr,
        interface.interface_number,
        idx,
        instance.ep_in,
        instance.epin_size,
        instance.ep_out,
        instance.epout_size,
    );
    Ok(idx)
}

fn open_endpoints<V, H, const D: usize, const I: usize, const BUF: usize>(
    registry: &mut Registry<V, D, I, BUF>,
    host: &mut H,
    dev_addr: u8,
    idx: u8,
    walker: DescriptorIter<'_>,
    num_endpoints: u8,
) -> DriverResult<()>
where
    V: GamepadVariant,
    H: HostStack,
{
    let instance = registry
        .instance_mut(dev_addr, idx)
        .ok_or(DriverError::NotFound)?;

    let mut opened = 0u8;
    for desc in walker {
        if opened >= num_endpoints || desc.descriptor_type == DESC_TYPE_INTERFACE {
            break;
        }
        // HID and other class-specific descriptors are skipped.
        let Some(endpoint) = desc.as_endpoint() else {
            continue;
        };
        host.open_endpoint(dev_addr, &endpoint)
            .map_err(DriverError::EndpointOpenFailed)?;
        match endpoint.direction() {
            EndpointDirection::In => {
                instance.ep_in = endpoint.address;
                instance.epin_size = endpoint.packet_size();
            }
            EndpointDirection::Out => {
                instance.ep_out = endpoint.address;
                instance.epout_size = endpoint.packet_size();
            }
        }
        opened = opened.saturating_add(1);
    }

    if instance.is_inert() {
        return Err(DriverError::NoEndpoint);
    }
    Ok(())
}
