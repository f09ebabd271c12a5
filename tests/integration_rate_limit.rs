mod common;

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use serde_json::json;

use autoshop_config::RateLimitConfig;
use common::{TestApp, request};

fn strict_rate_limit_config() -> RateLimitConfig {
    RateLimitConfig {
        enabled: true,
        auth_per_second: 60,
        auth_burst_size: 2,
    }
}

fn login_from(peer: &str) -> Request<Body> {
    let mut req = request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@shop.test", "password": "password123" })),
    );
    let addr: SocketAddr = peer.parse().unwrap();
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

fn forwarded(mut req: Request<Body>, forwarded_for: &str) -> Request<Body> {
    req.headers_mut()
        .insert("x-forwarded-for", forwarded_for.parse().unwrap());
    req
}

#[tokio::test]
async fn test_auth_rate_limit_exceeded() {
    let app = TestApp::with_rate_limit(strict_rate_limit_config());

    for _ in 0..2 {
        let (status, _) = app.send(login_from("192.168.1.100:40000")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let (status, body) = app.send(login_from("192.168.1.100:40001")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests. Please try again later.");
}

#[tokio::test]
async fn test_forwarding_headers_do_not_reset_the_bucket() {
    let app = TestApp::with_rate_limit(strict_rate_limit_config());

    let mut limited = 0;
    for i in 0..50 {
        let req = forwarded(login_from("10.0.0.1:5000"), &format!("203.0.113.{i}"));
        let (status, _) = app.send(req).await;
        if status == StatusCode::TOO_MANY_REQUESTS {
            limited += 1;
        }
    }
    assert!(limited >= 45, "only {limited} of 50 requests were limited");
}

#[tokio::test]
async fn test_rate_limit_is_per_peer() {
    let app = TestApp::with_rate_limit(strict_rate_limit_config());

    for _ in 0..3 {
        app.send(login_from("10.0.0.1:5000")).await;
    }
    let (status, _) = app.send(login_from("10.0.0.1:5000")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (status, _) = app.send(login_from("10.0.0.2:5000")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticated_routes_are_not_rate_limited() {
    let app = TestApp::with_rate_limit(strict_rate_limit_config());

    for _ in 0..5 {
        let mut req = request("GET", "/api/auth/me", None, None);
        let addr: SocketAddr = "192.168.1.200:6000".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        let (status, _) = app.send(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_disabled_rate_limit_allows_bursts() {
    let app = TestApp::new();

    for _ in 0..20 {
        let (status, _) = app.send(login_from("192.168.1.100:40000")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
