use std::net::Ipv4Addr;

use crate::interface::MacAddress;

primitive_enum_repr! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum ArpOperation {
        type Repr = u16;
        Request = 1,
        Response = 2,
    };
}

/// An address-resolution message.
///
/// `htype`/`ptype` identify the address spaces being mapped; this crate only
/// resolves IPv4 over Ethernet, anything else is dropped by the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArpPacket {
    pub htype: u16,
    pub ptype: u16,
    pub operation: ArpOperation,
    pub src_haddr: MacAddress,
    pub src_paddr: Ipv4Addr,
    pub dest_haddr: MacAddress,
    pub dest_paddr: Ipv4Addr,
}

impl ArpPacket {
    /// A broadcast request asking who holds `dest_paddr`.
    pub fn request(src_haddr: MacAddress, src_paddr: Ipv4Addr, dest_paddr: Ipv4Addr) -> Self {
        Self {
            htype: 1,
            ptype: 0x0800,
            operation: ArpOperation::Request,
            src_haddr,
            src_paddr,
            dest_haddr: MacAddress::NULL,
            dest_paddr,
        }
    }

    /// The direct response to `request`, naming our own mapping.
    pub fn response_to(request: &ArpPacket, haddr: MacAddress, paddr: Ipv4Addr) -> Self {
        Self {
            htype: 1,
            ptype: 0x0800,
            operation: ArpOperation::Response,
            src_haddr: haddr,
            src_paddr: paddr,
            dest_haddr: request.src_haddr,
            dest_paddr: request.src_paddr,
        }
    }

    pub fn is_ipv4_ethernet(&self) -> bool {
        self.htype == 1 && self.ptype == 0x0800
    }
}
