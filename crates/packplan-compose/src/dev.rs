//! Development-mode adaptation.
//!
//! In development the configuration gains a hot-module-replacement
//! plugin and publishes assets from an address other machines on the
//! network can reach.

use std::net::Ipv4Addr;

use crate::draft::{ConfigurationDraft, PluginDirective};

/// Supplies the address the development server publishes assets from.
///
/// Injected into the adapter so composition stays deterministic under
/// test.
pub trait HostAddress {
    /// Best publishable IPv4 address, or `None` to fall back to the
    /// loopback hostname.
    fn resolve(&self) -> Option<Ipv4Addr>;
}

/// Scans every network interface and takes the first non-loopback
/// IPv4 address.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfAddrHost;

impl HostAddress for IfAddrHost {
    fn resolve(&self) -> Option<Ipv4Addr> {
        match get_if_addrs::get_if_addrs() {
            Ok(if_addrs) => {
                for if_addr in if_addrs {
                    if let get_if_addrs::IfAddr::V4(addr) = if_addr.addr {
                        if !addr.ip.is_loopback() {
                            return Some(addr.ip);
                        }
                    }
                }
                None
            }
            Err(err) => {
                tracing::warn!(%err, "failed to enumerate network interfaces");
                None
            }
        }
    }
}

/// Rewrites a composed draft for development serving.
pub struct DevServerAdapter<'a> {
    host: &'a dyn HostAddress,
    port: u16,
}

impl<'a> DevServerAdapter<'a> {
    pub fn new(host: &'a dyn HostAddress, port: u16) -> Self {
        Self { host, port }
    }

    /// Append the hot-update plugin and point the public asset base
    /// at the publishable address.
    pub fn apply(&self, draft: &mut ConfigurationDraft) {
        draft.plugins.push(PluginDirective::HotModuleReplacement);

        let address = self
            .host
            .resolve()
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "localhost".to_string());
        draft.output.public_path = format!("http://{}:{}/", address, self.port);

        tracing::debug!(public_path = %draft.output.public_path, "development public path");
    }
}
