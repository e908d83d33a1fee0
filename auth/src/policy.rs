use uuid::Uuid;

use crate::token::Claims;

/// Outcome of a policy evaluation.
///
/// Distinguishes "not authenticated" (no valid claim set at all) from
/// "authenticated but not permitted", so callers can map to 401 vs 403.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyUnauthenticated,
    DenyForbidden,
}

/// Named access policies: pure predicates over a claim set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Requires the `is_admin` claim to be true.
    Admin,
    /// Requires any valid claim set (a token that parsed successfully).
    AuthenticatedUser,
    /// Requires the `user_id` claim to match the requested resource owner.
    ResourceOwner(Uuid),
}

impl Policy {
    /// Evaluate this policy against an optional claim set.
    ///
    /// `None` means no token was presented or it failed to parse; that
    /// always yields `DenyUnauthenticated` before any ownership or role
    /// check is attempted.
    pub fn evaluate(&self, claims: Option<&Claims>) -> Decision {
        let Some(claims) = claims else {
            return Decision::DenyUnauthenticated;
        };

        match self {
            Policy::AuthenticatedUser => Decision::Allow,
            Policy::Admin => {
                if claims.is_admin {
                    Decision::Allow
                } else {
                    Decision::DenyForbidden
                }
            }
            Policy::ResourceOwner(resource_id) => {
                // An authenticated caller without a user_id claim cannot
                // prove ownership.
                if claims.user_id == Some(*resource_id) {
                    Decision::Allow
                } else {
                    Decision::DenyForbidden
                }
            }
        }
    }
}
