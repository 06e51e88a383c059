use serde::{Deserialize, Serialize};

/// Metadata captured from an inbound network request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    remote_addr: String,
}

impl RequestMetadata {
    /// Creates request metadata from the peer address as reported by the transport.
    #[must_use]
    pub fn new(remote_addr: impl Into<String>) -> Self {
        Self {
            remote_addr: remote_addr.into(),
        }
    }

    /// Returns the raw peer address, usually `host:port`.
    #[must_use]
    pub fn remote_addr(&self) -> &str {
        self.remote_addr.as_str()
    }

    /// Returns the origin host with the port stripped.
    ///
    /// Addresses that are not in `host:port` form yield an empty string.
    #[must_use]
    pub fn origin_ip(&self) -> String {
        strip_port(self.remote_addr.trim())
    }
}

/// Call context handed to audit event construction.
///
/// Background jobs and internal callers use [`RequestContext::background`];
/// request handlers attach the inbound request metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    request: Option<RequestMetadata>,
}

impl RequestContext {
    /// Creates a context that carries no inbound request.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Creates a context for an inbound request.
    #[must_use]
    pub fn with_request(request: RequestMetadata) -> Self {
        Self {
            request: Some(request),
        }
    }

    /// Returns the inbound request metadata, if any.
    #[must_use]
    pub fn request(&self) -> Option<&RequestMetadata> {
        self.request.as_ref()
    }

    /// Returns the origin IP of the inbound request, or an empty string.
    #[must_use]
    pub fn ip_address(&self) -> String {
        self.request
            .as_ref()
            .map(RequestMetadata::origin_ip)
            .unwrap_or_default()
    }
}

/// Splits `host:port` and returns the host. IPv6 hosts must be bracketed and
/// are returned without brackets, zone included.
fn strip_port(remote_addr: &str) -> String {
    let host = match remote_addr.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once(']').and_then(|(host, rest)| {
            let port = rest.strip_prefix(':')?;
            (!host.contains('[') && !port.contains([':', '[', ']'])).then_some(host)
        }),
        None => remote_addr
            .rsplit_once(':')
            .filter(|(host, port)| !host.contains([':', '[', ']']) && !port.contains(['[', ']']))
            .map(|(host, _port)| host),
    };

    host.unwrap_or_default().to_owned()
}
