// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state driven by `GET /api/auth/me` with a locally cached identity.
//!
//! The cache makes the client usable offline: a connection failure keeps a
//! previously confirmed identity (flagged with `connection_error`), while an
//! explicit 401 clears it. Only a confirmed backend response changes which
//! user the client believes it is.

use namecard_core::{ContactGateway, NamecardError, types::UserProfile};
use namecard_store::queries::identity;
use namecard_store::StateDb;
use tracing::{debug, warn};

/// The client's view of the authenticated session.
pub struct AuthSession {
    profile: Option<UserProfile>,
    connection_error: bool,
}

impl AuthSession {
    /// Restore the session from the locally cached identity, if any.
    pub async fn restore(db: &StateDb) -> Result<Self, NamecardError> {
        let profile = identity::load_identity(db).await?;
        Ok(Self {
            profile,
            connection_error: false,
        })
    }

    /// The current identity, cached or confirmed.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.profile.is_some()
    }

    /// True when the last check could not reach the backend and the cached
    /// identity is being trusted.
    pub fn connection_error(&self) -> bool {
        self.connection_error
    }

    /// The backend's OAuth entry point; the client only surfaces the URL.
    pub fn login_url(base_url: &str) -> String {
        format!("{}/auth/google/login", base_url.trim_end_matches('/'))
    }

    /// Verify the session against the backend and reconcile the cache.
    ///
    /// Returns whether the client should treat the user as signed in:
    /// - 2xx: replace the cached identity, signed in.
    /// - 401: clear the cached identity, signed out.
    /// - connection failure: keep the cached identity if one exists and
    ///   flag `connection_error` (offline-tolerant), else signed out.
    pub async fn check(
        &mut self,
        gateway: &dyn ContactGateway,
        db: &StateDb,
    ) -> Result<bool, NamecardError> {
        match gateway.current_user().await {
            Ok(user) => {
                identity::save_identity(db, &user).await?;
                debug!(user_id = %user.id, "session confirmed");
                self.profile = Some(user);
                self.connection_error = false;
                Ok(true)
            }
            Err(NamecardError::Unauthorized) => {
                identity::clear_identity(db).await?;
                debug!("backend reports signed out, cache cleared");
                self.profile = None;
                self.connection_error = false;
                Ok(false)
            }
            Err(e) => {
                self.connection_error = true;
                if self.profile.is_some() {
                    warn!(error = %e, "auth check unreachable, trusting cached identity");
                    Ok(true)
                } else {
                    warn!(error = %e, "auth check unreachable and no cached identity");
                    Ok(false)
                }
            }
        }
    }

    /// Best-effort server-side logout, then clear the local cache.
    ///
    /// The backend call failing does not keep the user signed in locally.
    pub async fn logout(
        &mut self,
        gateway: &dyn ContactGateway,
        db: &StateDb,
    ) -> Result<(), NamecardError> {
        if let Err(e) = gateway.logout().await {
            warn!(error = %e, "server-side logout failed, clearing local session anyway");
        }
        identity::clear_identity(db).await?;
        self.profile = None;
        self.connection_error = false;
        Ok(())
    }
}
