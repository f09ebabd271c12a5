use anyhow::anyhow;
use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use autoshop_auth::{
    create_access_token, create_refresh_token, token_digest, verify_refresh_token,
};
use autoshop_core::{AppError, Role};
use autoshop_models::{
    AuthResponse, DomainEvent, LoginRequest, LogoutRequest, MessageResponse, NewUser,
    RefreshTokenRequest, RegisterRequest, TokenPair, User, UserId, UserRecord,
};

use crate::metrics::{
    track_login, track_refresh_token_reuse, track_token_issued, track_user_registered,
};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&dto.email);

        // Unknown, inactive and wrong-password all look the same to the caller.
        let user = match state.users.find_by_email(&email).await? {
            Some(user) if user.is_active && user.verify_password(&dto.password)? => user,
            _ => {
                track_login(false);
                return Err(AppError::unauthorized(INVALID_CREDENTIALS));
            }
        };

        state.users.update_last_login(user.id).await?;
        let mut user = user;
        user.last_login_at = Some(Utc::now());

        let tokens = Self::issue_tokens(state, &user).await?;

        track_login(true);
        info!(user_id = %user.id, role = %user.role, "User logged in");
        state
            .events
            .publish(DomainEvent::UserLoggedIn { user_id: user.id });

        Ok(AuthResponse {
            tokens,
            user: Self::profile(state, user),
        })
    }

    #[instrument(skip(state, dto), fields(email = %dto.email))]
    pub async fn register(
        state: &AppState,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&dto.email);
        let role = dto.role.unwrap_or_default();

        if role == Role::SuperAdmin {
            return Err(AppError::forbidden(
                "Super admin accounts can only be created from the CLI",
            ));
        }

        // Staff accounts are provisioned by the organization, not self-registered.
        if dto.organization_id.is_some() && role != Role::Client {
            return Err(AppError::forbidden(
                "Only client accounts can join an organization by registering",
            ));
        }

        if state.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(anyhow!(
                "User with this email already exists"
            )));
        }

        if let Some(organization_id) = dto.organization_id {
            let organization = state
                .organizations
                .find_by_id(organization_id)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow!("Organization not found")))?;

            if !organization.is_active {
                return Err(AppError::unauthorized("Organization is inactive"));
            }
        }

        if let Some(branch_id) = dto.branch_id {
            let Some(organization_id) = dto.organization_id else {
                return Err(AppError::bad_request(anyhow!(
                    "branch_id requires organization_id"
                )));
            };

            match state.organizations.find_branch(branch_id).await? {
                Some(branch) if branch.organization_id == organization_id => {}
                _ => return Err(AppError::not_found(anyhow!("Branch not found"))),
            }
        }

        let user = state
            .users
            .create(NewUser {
                email,
                password: dto.password,
                first_name: dto.first_name,
                last_name: dto.last_name,
                phone: dto.phone,
                role,
                organization_id: dto.organization_id,
                branch_id: dto.branch_id,
                permissions: state.permissions.permissions_for(role),
            })
            .await?;

        let tokens = Self::issue_tokens(state, &user).await?;

        track_user_registered(role.as_str());
        info!(user_id = %user.id, role = %role, "User registered");
        state.events.publish(DomainEvent::UserRegistered {
            user_id: user.id,
            organization_id: user.organization_id,
            role,
        });

        Ok(AuthResponse {
            tokens,
            user: Self::profile(state, user),
        })
    }

    /// Rotates a refresh token.
    ///
    /// A token that verifies but is no longer in the user's set has already
    /// been used: every session of that user is revoked.
    #[instrument(skip_all)]
    pub async fn refresh(
        state: &AppState,
        dto: RefreshTokenRequest,
    ) -> Result<TokenPair, AppError> {
        let claims = verify_refresh_token(&dto.refresh_token, &state.jwt_config)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map(UserId::from_uuid)
            .map_err(|_| AppError::unauthorized("Invalid or expired refresh token"))?;

        let user = match state.users.find_by_id(user_id).await? {
            Some(user) if user.is_active => user,
            _ => return Err(AppError::unauthorized("Invalid or expired refresh token")),
        };

        let refresh_token = create_refresh_token(user.id.into_inner(), &state.jwt_config)?;
        let rotated = state
            .users
            .rotate_refresh_token(
                user.id,
                &token_digest(&dto.refresh_token),
                &token_digest(&refresh_token),
            )
            .await?;

        if !rotated {
            state.users.clear_refresh_tokens(user.id).await?;

            track_refresh_token_reuse();
            warn!(user_id = %user.id, "Refresh token reuse detected, all sessions revoked");
            state.events.publish(DomainEvent::RefreshTokenReuseDetected {
                user_id: user.id,
                organization_id: user.organization_id,
            });

            return Err(AppError::unauthorized("Refresh token has been revoked"));
        }

        let access_token =
            create_access_token(&user.principal(&state.permissions), &state.jwt_config)?;
        track_token_issued("access");
        track_token_issued("refresh");

        Ok(TokenPair::bearer(
            access_token,
            refresh_token,
            state.jwt_config.access_token_expiry,
        ))
    }

    /// Revokes one refresh token. Unknown tokens are ignored.
    #[instrument(skip(state, dto))]
    pub async fn logout(
        state: &AppState,
        user_id: UserId,
        dto: LogoutRequest,
    ) -> Result<MessageResponse, AppError> {
        state
            .users
            .remove_refresh_token(user_id, &token_digest(&dto.refresh_token))
            .await?;

        state.events.publish(DomainEvent::UserLoggedOut {
            user_id,
            all_sessions: false,
        });

        Ok(MessageResponse::new("Logged out successfully"))
    }

    #[instrument(skip(state))]
    pub async fn logout_all(state: &AppState, user_id: UserId) -> Result<MessageResponse, AppError> {
        state.users.clear_refresh_tokens(user_id).await?;

        state.events.publish(DomainEvent::UserLoggedOut {
            user_id,
            all_sessions: true,
        });

        Ok(MessageResponse::new("Logged out from all sessions"))
    }

    #[instrument(skip(state))]
    pub async fn get_me(state: &AppState, user_id: UserId) -> Result<User, AppError> {
        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        Ok(Self::profile(state, user))
    }

    /// Signs both tokens and records the refresh token's digest.
    async fn issue_tokens(state: &AppState, user: &UserRecord) -> Result<TokenPair, AppError> {
        let access_token =
            create_access_token(&user.principal(&state.permissions), &state.jwt_config)?;
        let refresh_token = create_refresh_token(user.id.into_inner(), &state.jwt_config)?;

        state
            .users
            .add_refresh_token(user.id, &token_digest(&refresh_token))
            .await?;

        track_token_issued("access");
        track_token_issued("refresh");

        Ok(TokenPair::bearer(
            access_token,
            refresh_token,
            state.jwt_config.access_token_expiry,
        ))
    }

    /// Sanitized profile listing the permissions the user actually holds.
    fn profile(state: &AppState, record: UserRecord) -> User {
        let permissions = record.effective_permissions(&state.permissions);
        User {
            permissions,
            ..User::from(record)
        }
    }
}
