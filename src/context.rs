// ABOUTME: Per-request context carrying the acting user and a request id
// ABOUTME: Passed explicitly into service calls instead of ambient session state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use crate::errors::{AppError, AppResult};
use crate::models::UserId;
use uuid::Uuid;

/// Who is acting, and under which request id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    current_user: Option<UserId>,
    request_id: Uuid,
}

impl RequestContext {
    /// Context for an unauthenticated visitor
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            current_user: None,
            request_id: Uuid::new_v4(),
        }
    }

    /// Context for a signed-in user
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            current_user: Some(user_id),
            request_id: Uuid::new_v4(),
        }
    }

    /// Reuse an upstream request id
    #[must_use]
    pub const fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Acting user, if authenticated
    #[must_use]
    pub const fn current_user(&self) -> Option<UserId> {
        self.current_user
    }

    /// Request id for log correlation
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Whether a user is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Acting user, or `AuthRequired` tagged with this request id
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` for anonymous contexts
    pub fn require_user(&self) -> AppResult<UserId> {
        self.current_user
            .ok_or_else(|| AppError::auth_required().with_request_id(self.request_id))
    }
}
