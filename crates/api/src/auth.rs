// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Actor identity is a stub: callers name themselves and their role on each
//! request. Authorization is enforced here before any command is applied.

use breakshot_audit::Actor;
use breakshot_domain::ActorRole;
use tracing::error;

use crate::error::AuthError;

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: ActorRole,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: ActorRole) -> Self {
        Self { id, role }
    }

    /// The actor recorded on audit events.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::with_role(self.id.clone(), self.role)
    }
}

/// Stub authentication.
///
/// # Arguments
///
/// * `actor_id` - The identifier the caller claims
/// * `role` - The role name the caller claims
///
/// # Errors
///
/// Returns an error if the id is blank or the role is unknown.
pub fn authenticate_stub(actor_id: &str, role: &str) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }

    let role: ActorRole = role
        .parse::<ActorRole>()
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: e.to_string(),
        })?;

    Ok(AuthenticatedActor::new(actor_id.trim().to_string(), role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require(
        actor: &AuthenticatedActor,
        action: &str,
        allowed: &[ActorRole],
    ) -> Result<(), AuthError> {
        if allowed.contains(&actor.role) {
            return Ok(());
        }

        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: allowed
                .iter()
                .map(ActorRole::as_str)
                .collect::<Vec<&str>>()
                .join(" or "),
        })
    }

    /// Directors and admins may submit tournaments.
    ///
    /// # Errors
    ///
    /// Returns an error for any other role.
    pub fn authorize_submit_tournament(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require(
            actor,
            "submit_tournament",
            &[ActorRole::Director, ActorRole::Admin],
        )
    }

    /// Only admins review tournaments: approve, deny, delete, restore,
    /// archive by hand and change templates.
    ///
    /// # Errors
    ///
    /// Returns an error for any other role.
    pub fn authorize_review_tournament(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, action, &[ActorRole::Admin])
    }

    /// Admins and the scheduler may mark a tournament as running.
    ///
    /// # Errors
    ///
    /// Returns an error for any other role.
    pub fn authorize_activate_tournament(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require(
            actor,
            "activate_tournament",
            &[ActorRole::Admin, ActorRole::System],
        )
    }

    /// People (not the scheduler) may like tournaments and enter giveaways.
    ///
    /// # Errors
    ///
    /// Returns an error for the system role.
    pub fn authorize_participate(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(
            actor,
            action,
            &[ActorRole::Player, ActorRole::Director, ActorRole::Admin],
        )
    }

    /// Directors and admins may register venues.
    ///
    /// # Errors
    ///
    /// Returns an error for any other role.
    pub fn authorize_create_venue(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require(
            actor,
            "create_venue",
            &[ActorRole::Director, ActorRole::Admin],
        )
    }

    /// Only admins create and end giveaways.
    ///
    /// # Errors
    ///
    /// Returns an error for any other role.
    pub fn authorize_manage_giveaway(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, action, &[ActorRole::Admin])
    }

    /// Only admins and the scheduler may run maintenance.
    ///
    /// A refusal is logged at error level.
    ///
    /// # Errors
    ///
    /// Returns an error for any other role.
    pub fn authorize_maintenance(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        Self::require(actor, action, &[ActorRole::Admin, ActorRole::System]).inspect_err(|_| {
            error!(
                actor_id = %actor.id,
                role = %actor.role,
                action,
                "Unauthorized maintenance attempt refused"
            );
        })
    }
}
