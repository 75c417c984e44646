//! Network reachability checks run before each fetch.

use crate::api::ApiError;
use log::*;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Answers whether the network is currently reachable.
///
pub trait ConnectivityProbe: Send + Sync {
    fn is_available(&self) -> bool;
}

/// Probe that opens a TCP connection to the API host and reports success.
///
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        TcpProbe {
            host: host.to_owned(),
            port,
            timeout,
        }
    }

    /// Return a probe targeting the host and port of the given endpoint URL.
    ///
    pub fn for_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, ApiError> {
        let invalid = |message: &str| ApiError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            message: message.to_owned(),
        };
        let url = reqwest::Url::parse(endpoint).map_err(|e| invalid(&e.to_string()))?;
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("missing port"))?;
        Ok(TcpProbe::new(host, port, timeout))
    }
}

impl ConnectivityProbe for TcpProbe {
    fn is_available(&self) -> bool {
        let addrs = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                warn!("Failed to resolve {}:{}: {}", self.host, self.port, e);
                return false;
            }
        };
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => return true,
                Err(e) => debug!("Connection to {} failed: {}", addr, e),
            }
        }
        false
    }
}

/// Probe with a fixed answer.
///
#[derive(Debug, Clone, Copy)]
pub struct StaticProbe(pub bool);

impl ConnectivityProbe for StaticProbe {
    fn is_available(&self) -> bool {
        self.0
    }
}
