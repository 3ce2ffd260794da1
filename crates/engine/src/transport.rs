//! The seam between the engine's scheduling/state-machine logic and the raw
//! link-layer I/O. [`RawSocketTransport`] runs the interface binder
//! against a real `AF_PACKET` socket; anything implementing
//! [`Transport`] can stand in for it in tests.

use crate::addr::Address;
use crate::beacon::BEACON_LEN;
use crate::error::Error;

use std::io;
use std::mem;
use std::os::fd::RawFd;
use std::sync::Arc;

/// Interface parameters discovered during bring-up.
#[derive(Debug, Clone, Copy)]
pub struct InterfaceInfo {
    pub index: i32,
    pub addr: Address,
    pub mtu: i32,
}

/// Sends and receives beacon frames on a bound link-layer socket.
///
/// Implementations must be cheap to clone: the engine hands one clone to the
/// sender thread and one to the receiver thread while keeping a third for
/// itself.
pub trait Transport: Send + Sync + 'static {
    /// Best-effort send of one 14-octet beacon frame to the broadcast
    /// address. Failures are tolerated by callers.
    fn send(&self, frame: &[u8; BEACON_LEN]) -> io::Result<()>;

    /// Non-blocking receive of at most one frame. Returns `Ok(None)`
    /// when nothing is currently available.
    fn recv_nonblocking(&self) -> io::Result<Option<[u8; BEACON_LEN]>>;
}

impl<U: Transport + ?Sized> Transport for Arc<U> {
    fn send(&self, frame: &[u8; BEACON_LEN]) -> io::Result<()> {
        (**self).send(frame)
    }

    fn recv_nonblocking(&self) -> io::Result<Option<[u8; BEACON_LEN]>> {
        (**self).recv_nonblocking()
    }
}

/// The kernel ABI for `struct ifreq`, reproduced by hand because the name
/// union carries both a `sockaddr` (for `SIOCGIFHWADDR`) and a plain `int`
/// (for `SIOCGIFINDEX`/`SIOCGIFMTU`), and libc does not expose it uniformly
/// across targets.
#[repr(C)]
struct IfReq {
    name: [libc::c_char; libc::IFNAMSIZ],
    union: IfReqUnion,
}

#[repr(C)]
union IfReqUnion {
    addr: libc::sockaddr,
    ivalue: libc::c_int,
    _raw: [u8; 24],
}

fn new_ifreq(interface: &str) -> IfReq {
    let mut ifr: IfReq = unsafe { mem::zeroed() };

    // The interface-name field holds at most IFNAMSIZ - 1 visible
    // characters plus a NUL terminator.
    for (slot, byte) in ifr
        .name
        .iter_mut()
        .zip(interface.as_bytes().iter().take(libc::IFNAMSIZ - 1))
    {
        *slot = *byte as libc::c_char;
    }

    ifr
}

fn raw_os_error(errno: i32) -> io::Error {
    io::Error::from_raw_os_error(errno)
}

struct RawSocketInner {
    fd: RawFd,
}

impl Drop for RawSocketInner {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

/// Sends and receives beacon frames over a real `AF_PACKET` socket.
#[derive(Clone)]
pub struct RawSocketTransport {
    inner: Arc<RawSocketInner>,
    ifindex: i32,
}

impl RawSocketTransport {
    /// Runs the interface binder.
    ///
    /// Opens a raw device-level packet socket receiving every frame type,
    /// resolves the named interface's index / hardware address / MTU,
    /// enables promiscuous membership, and binds the socket to the
    /// interface for all protocols. Fails fast: the first failing step
    /// determines the returned [`Error`].
    pub fn bind(interface: &str) -> Result<(Self, InterfaceInfo), Error> {
        unsafe {
            // PF_PACKET/SOCK_RAW/ETH_P_ALL: device-level socket receiving
            // every frame type.
            let fd = libc::socket(
                libc::AF_PACKET,
                libc::SOCK_RAW,
                (libc::ETH_P_ALL as u16).to_be() as i32,
            );
            if fd < 0 {
                return Err(Error::OpenSock);
            }

            let mut ifr = new_ifreq(interface);

            if libc::ioctl(fd, libc::SIOCGIFINDEX, &mut ifr) < 0 {
                libc::close(fd);
                return Err(Error::GetIfIndex);
            }
            let ifindex = ifr.union.ivalue;

            if libc::ioctl(fd, libc::SIOCGIFHWADDR, &mut ifr) < 0 {
                libc::close(fd);
                return Err(Error::GetAddress);
            }
            let mut octets = [0u8; 6];
            let sa_data = ifr.union.addr.sa_data;
            for (slot, byte) in octets.iter_mut().zip(sa_data.iter()) {
                *slot = *byte as u8;
            }
            let addr = Address::from_octets(octets);

            if libc::ioctl(fd, libc::SIOCGIFMTU, &mut ifr) < 0 {
                libc::close(fd);
                return Err(Error::GetMtu);
            }
            let mtu = ifr.union.ivalue;

            let mut membership: libc::packet_mreq = mem::zeroed();
            membership.mr_ifindex = ifindex;
            membership.mr_type = libc::PACKET_MR_PROMISC as u16;

            let rc = libc::setsockopt(
                fd,
                libc::SOL_PACKET,
                libc::PACKET_ADD_MEMBERSHIP,
                &membership as *const _ as *const libc::c_void,
                mem::size_of::<libc::packet_mreq>() as libc::socklen_t,
            );
            if rc < 0 {
                libc::close(fd);
                return Err(Error::AddProm);
            }

            let mut sll: libc::sockaddr_ll = mem::zeroed();
            sll.sll_family = libc::AF_PACKET as u16;
            sll.sll_ifindex = ifindex;
            sll.sll_protocol = (libc::ETH_P_ALL as u16).to_be();

            let rc = libc::bind(
                fd,
                &sll as *const _ as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            );
            if rc < 0 {
                libc::close(fd);
                return Err(Error::BindSock);
            }

            Ok((
                Self {
                    inner: Arc::new(RawSocketInner { fd }),
                    ifindex,
                },
                InterfaceInfo { index: ifindex, addr, mtu },
            ))
        }
    }
}

impl Transport for RawSocketTransport {
    fn send(&self, frame: &[u8; BEACON_LEN]) -> io::Result<()> {
        unsafe {
            let mut to: libc::sockaddr_ll = mem::zeroed();
            to.sll_family = libc::AF_PACKET as u16;
            to.sll_pkttype = libc::PACKET_BROADCAST;
            to.sll_ifindex = self.ifindex;
            to.sll_halen = 6;
            to.sll_addr[..6].copy_from_slice(&[0xFF; 6]);

            let rc = libc::sendto(
                self.inner.fd,
                frame.as_ptr() as *const libc::c_void,
                frame.len(),
                0,
                &to as *const _ as *const libc::sockaddr,
                mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
            );

            if rc < 0 {
                Err(raw_os_error(*libc::__errno_location()))
            } else {
                Ok(())
            }
        }
    }

    fn recv_nonblocking(&self) -> io::Result<Option<[u8; BEACON_LEN]>> {
        let mut frame = [0u8; BEACON_LEN];

        unsafe {
            let rc = libc::recvfrom(
                self.inner.fd,
                frame.as_mut_ptr() as *mut libc::c_void,
                frame.len(),
                libc::MSG_DONTWAIT,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            );

            if rc < 0 {
                let errno = *libc::__errno_location();
                if errno == libc::EAGAIN || errno == libc::EWOULDBLOCK {
                    Ok(None)
                } else {
                    Err(raw_os_error(errno))
                }
            } else if (rc as usize) < BEACON_LEN {
                // Short frame, not a beacon; treat as "nothing usable".
                Ok(None)
            } else {
                Ok(Some(frame))
            }
        }
    }
}
