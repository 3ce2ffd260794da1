use std::fmt;

/// The closed error taxonomy surfaced on engine state.
///
/// Only the interface binder sets a code; once the engine is running,
/// per-packet I/O failures are tolerated silently and never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    None,
    OpenSock,
    GetIfIndex,
    GetAddress,
    GetMtu,
    AddProm,
    BindSock,
}

impl Error {
    /// The stable small-integer code for this error.
    pub fn code(self) -> i32 {
        match self {
            Error::None => 0,
            Error::OpenSock => 1,
            Error::GetIfIndex => 2,
            Error::GetAddress => 3,
            Error::GetMtu => 4,
            Error::AddProm => 5,
            Error::BindSock => 6,
        }
    }

    /// The human-readable string for this error, or `None` when there is no
    /// error to report.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Error::None => None,
            Error::OpenSock => Some("Could not open socket, Try running with sudo"),
            Error::GetIfIndex => Some("Failed to retrieve the interface index"),
            Error::GetAddress => Some("Failed to retrieve the hardware address"),
            Error::GetMtu => Some("Failed to retrieve the maximum transmission unit"),
            Error::AddProm => Some("Failed to add the promiscuous mode"),
            Error::BindSock => Some("Failed to bind the socket to the interface"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message().unwrap_or(""))
    }
}

impl std::error::Error for Error {}
