#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use autoshop::{AppState, Storage, init_router};
use autoshop_auth::create_access_token;
use autoshop_config::{CorsConfig, JwtConfig, RateLimitConfig};
use autoshop_core::password::MIN_COST;
use autoshop_core::{PermissionTable, Role};
use autoshop_db::{MemoryStore, OrganizationRepository, UserRepository};
use autoshop_models::{
    Branch, CreateBranchDto, CreateOrganizationDto, NewUser, Organization, UserRecord,
};

pub const PASSWORD: &str = "password123";

/// A router over a fresh in-memory store, plus handles for seeding it.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub permissions: PermissionTable,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_rate_limit(RateLimitConfig::disabled())
    }

    pub fn with_rate_limit(rate_limit_config: RateLimitConfig) -> Self {
        let store = Arc::new(MemoryStore::with_hash_cost(MIN_COST));
        let permissions = PermissionTable::standard().unwrap();
        let state = AppState::new(
            Storage::memory(store.clone()),
            permissions.clone(),
            JwtConfig::default(),
            CorsConfig::parse("http://localhost:3000"),
            rate_limit_config,
        );

        Self {
            router: init_router(state.clone()),
            state,
            store,
            permissions,
        }
    }

    pub async fn organization(&self, name: &str) -> Organization {
        OrganizationRepository::create(
            self.store.as_ref(),
            CreateOrganizationDto {
                name: name.to_string(),
                email: None,
                phone: None,
                address: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn branch(&self, organization: &Organization, name: &str) -> Branch {
        self.store
            .create_branch(
                organization.id,
                CreateBranchDto {
                    name: name.to_string(),
                    address: None,
                    phone: None,
                    organization_id: None,
                },
            )
            .await
            .unwrap()
    }

    pub async fn user(
        &self,
        email: &str,
        role: Role,
        organization: Option<&Organization>,
        branch: Option<&Branch>,
    ) -> UserRecord {
        UserRepository::create(
            self.store.as_ref(),
            NewUser {
                email: email.to_string(),
                password: PASSWORD.to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                phone: None,
                role,
                organization_id: organization.map(|o| o.id),
                branch_id: branch.map(|b| b.id),
                permissions: self.permissions.permissions_for(role),
            },
        )
        .await
        .unwrap()
    }

    /// Access token for `user` signed with the app's own configuration.
    pub fn token(&self, user: &UserRecord) -> String {
        create_access_token(&user.principal(&self.permissions), &self.state.jwt_config).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request("GET", uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request("POST", uri, token, Some(body))).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(request("PATCH", uri, token, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(request("DELETE", uri, token, None)).await
    }

    pub async fn login(&self, email: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                serde_json::json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
