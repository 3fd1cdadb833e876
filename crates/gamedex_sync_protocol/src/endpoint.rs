//! Remote catalog service endpoints.

use gamedex_core::RemoteId;
use std::fmt;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// An operation against the remote catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// First-time persistence.
    Create,
    /// Update of a persisted entry.
    Update(RemoteId),
    /// Removal of a persisted entry.
    Delete(RemoteId),
}

impl Endpoint {
    /// Returns the HTTP method.
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Create => Method::Post,
            Endpoint::Update(_) => Method::Put,
            Endpoint::Delete(_) => Method::Delete,
        }
    }

    /// Returns the request path.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Create => "/Game/criar".to_string(),
            Endpoint::Update(id) => format!("/Game/atualizar/{id}"),
            Endpoint::Delete(id) => format!("/Game/deletar/{id}"),
        }
    }

    /// Returns the full URL under `base_url`.
    ///
    /// A trailing slash on the base is ignored.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Returns the remote ID the endpoint is addressed to.
    pub fn remote_id(&self) -> Option<RemoteId> {
        match self {
            Endpoint::Create => None,
            Endpoint::Update(id) | Endpoint::Delete(id) => Some(*id),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
