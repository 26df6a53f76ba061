use std::net::IpAddr;

use poem::Request;
use uuid::Uuid;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries what coordinators and services need to correlate log lines for one
/// operation: who asked, from where, and a per-request id.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API, CLI, or System)
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create an API context with a fresh request id and no client address
    pub fn new() -> Self {
        Self {
            ip_address: None,
            request_id: RequestId(Uuid::new_v4()),
            source: RequestSource::API,
            actor_id: "unknown".to_owned(),
        }
    }

    /// Create a RequestContext for CLI operations
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId(Uuid::new_v4()),
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId(Uuid::new_v4()),
            source: RequestSource::System,
            actor_id: format!("system:{}", operation_name),
        }
    }

    /// Create a RequestContext for an incoming HTTP request
    ///
    /// Should be called at the beginning of every endpoint.
    pub fn from_request(req: &Request) -> Self {
        let ip_address = Self::extract_ip_address(req);
        let actor_id = ip_address
            .map(|ip| format!("api:{}", ip))
            .unwrap_or_else(|| "api:unknown".to_owned());

        let ctx = Self {
            ip_address,
            request_id: RequestId(Uuid::new_v4()),
            source: RequestSource::API,
            actor_id,
        };

        tracing::trace!("Request context created: {:?}", ctx);
        ctx
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        // Check X-Forwarded-For header (proxy/load balancer)
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        // Check X-Real-IP header (nginx)
        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        // Fall back to remote address
        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Set the ip_address
    pub fn with_ip_address(mut self, ip_address: IpAddr) -> Self {
        self.ip_address = Some(ip_address);
        self
    }

    /// Set the actor_id
    pub fn with_actor_id(mut self, actor_id: impl Into<String>) -> Self {
        self.actor_id = actor_id.into();
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ip_from_x_forwarded_for() {
        let req = Request::builder()
            .header("X-Forwarded-For", "192.168.1.1, 10.0.0.1")
            .finish();

        let ctx = RequestContext::from_request(&req);
        assert_eq!(ctx.ip_address, Some("192.168.1.1".parse().unwrap()));
        assert_eq!(ctx.actor_id, "api:192.168.1.1");
    }

    #[test]
    fn test_extract_ip_from_x_real_ip() {
        let req = Request::builder()
            .header("X-Real-IP", "192.168.1.2")
            .finish();

        let ctx = RequestContext::from_request(&req);
        assert_eq!(ctx.ip_address, Some("192.168.1.2".parse().unwrap()));
    }

    #[test]
    fn test_no_headers_and_no_remote_addr() {
        // In test requests remote_addr is not a socket address
        let req = Request::builder().finish();

        let ctx = RequestContext::from_request(&req);
        assert_eq!(ctx.ip_address, None);
        assert_eq!(ctx.actor_id, "api:unknown");
        assert_eq!(ctx.source, RequestSource::API);
    }

    #[test]
    fn test_each_request_gets_a_fresh_id() {
        let a = RequestContext::new();
        let b = RequestContext::new();
        assert_ne!(a.request_id, b.request_id);
    }
}
