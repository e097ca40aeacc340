use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

use super::domain::UserId;

pub const VIEWER_ID_HEADER: &str = "x-viewer-id";
pub const VIEWER_ROLE_HEADER: &str = "x-viewer-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Recruiter,
    Candidate,
}

impl ViewerRole {
    /// Only the exact claim `recruiter` is a recruiter; anything else is a candidate.
    pub fn from_claim(claim: &str) -> Self {
        if claim == "recruiter" {
            Self::Recruiter
        } else {
            Self::Candidate
        }
    }
}

/// Signed-in user as described by the identity provider's claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<ViewerRole>,
}

impl Viewer {
    pub fn recruiter(id: &str) -> Self {
        Self {
            id: UserId::from(id),
            role: Some(ViewerRole::Recruiter),
        }
    }

    pub fn candidate(id: &str) -> Self {
        Self {
            id: UserId::from(id),
            role: Some(ViewerRole::Candidate),
        }
    }

    pub fn is_recruiter(&self) -> bool {
        self.role == Some(ViewerRole::Recruiter)
    }
}

/// Snapshot of the identity provider: `ready` flips once the session is known.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentitySession {
    pub ready: bool,
    pub viewer: Option<Viewer>,
}

impl IdentitySession {
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn signed_in(viewer: Viewer) -> Self {
        Self {
            ready: true,
            viewer: Some(viewer),
        }
    }
}

/// Source of the current viewer's identity. Claims decide what is rendered only;
/// authorization for mutations stays with the service layer.
pub trait IdentityProvider: Send + Sync {
    fn session(&self) -> IdentitySession;
}

impl IdentityProvider for IdentitySession {
    fn session(&self) -> IdentitySession {
        self.clone()
    }
}

/// Identity forwarded by the gateway in request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIdentity {
    viewer: Option<Viewer>,
}

impl HeaderIdentity {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let viewer = header(VIEWER_ID_HEADER).map(|id| Viewer {
            id: UserId::from(id),
            role: headers
                .get(VIEWER_ROLE_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(ViewerRole::from_claim),
        });

        Self { viewer }
    }

    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }
}

impl IdentityProvider for HeaderIdentity {
    fn session(&self) -> IdentitySession {
        IdentitySession {
            ready: self.viewer.is_some(),
            viewer: self.viewer.clone(),
        }
    }
}
