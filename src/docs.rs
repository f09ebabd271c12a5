use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use autoshop_core::{PaginationMeta, PaginationParams, Role};
use autoshop_models::{
    AuthResponse, Branch, Car, Client, CreateBranchDto, CreateCarDto, CreateClientDto,
    CreateOrganizationDto, LoginRequest, LogoutRequest, MessageResponse, Notification,
    NotificationKind, Organization, OrganizationWithBranches, PaginatedCarsResponse,
    PaginatedClientsResponse, RefreshTokenRequest, RegisterRequest, TokenPair, UpdateClientDto,
    UpdateOrganizationDto, User,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::notifications::model::PaginatedNotificationsResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::logout_all,
        crate::modules::auth::controller::get_me,
        crate::modules::organizations::controller::create_organization,
        crate::modules::organizations::controller::list_organizations,
        crate::modules::organizations::controller::get_current_organization,
        crate::modules::organizations::controller::update_organization,
        crate::modules::branches::controller::create_branch,
        crate::modules::branches::controller::list_branches,
        crate::modules::clients::controller::create_client,
        crate::modules::clients::controller::list_clients,
        crate::modules::clients::controller::get_client,
        crate::modules::clients::controller::update_client,
        crate::modules::clients::controller::delete_client,
        crate::modules::cars::controller::create_car,
        crate::modules::cars::controller::list_cars,
        crate::modules::cars::controller::get_car,
        crate::modules::cars::controller::delete_car,
        crate::modules::notifications::controller::list_notifications,
        crate::modules::notifications::controller::mark_notification_read,
    ),
    components(
        schemas(
            Role,
            User,
            LoginRequest,
            RegisterRequest,
            RefreshTokenRequest,
            LogoutRequest,
            TokenPair,
            AuthResponse,
            MessageResponse,
            ErrorResponse,
            Organization,
            OrganizationWithBranches,
            CreateOrganizationDto,
            UpdateOrganizationDto,
            Branch,
            CreateBranchDto,
            Client,
            CreateClientDto,
            UpdateClientDto,
            PaginatedClientsResponse,
            Car,
            CreateCarDto,
            PaginatedCarsResponse,
            Notification,
            NotificationKind,
            PaginatedNotificationsResponse,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and token lifecycle"),
        (name = "Organizations", description = "Tenant management"),
        (name = "Branches", description = "Shop locations within an organization"),
        (name = "Clients", description = "Shop customers"),
        (name = "Cars", description = "Customer vehicles"),
        (name = "Notifications", description = "In-app notifications")
    ),
    info(
        title = "Autoshop API",
        version = "0.1.0",
        description = "Multi-tenant car service shop backend: JWT authentication with refresh token rotation, role-based access control and organization/branch scoping.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_auth_routes_and_bearer_scheme() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/auth/refresh"));
        assert!(doc.paths.paths.contains_key("/api/clients/{id}"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
