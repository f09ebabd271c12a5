mod common;

use axum::http::StatusCode;
use serde_json::json;

use autoshop_core::Role;
use common::TestApp;

#[tokio::test]
async fn test_only_super_admin_manages_organizations() {
    let app = TestApp::new();
    let org = app.organization("Precision Auto").await;
    let admin = app.user("root@shop.test", Role::SuperAdmin, None, None).await;
    let owner = app.user("owner@shop.test", Role::Owner, Some(&org), None).await;

    let body = json!({ "name": "New Garage", "email": "hello@garage.test" });

    let (status, _) = app
        .post("/api/organizations", Some(&app.token(&owner)), body.clone())
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app
        .post("/api/organizations", Some(&app.token(&admin)), body)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "New Garage");
    assert_eq!(created["is_active"], true);

    let (status, list) = app.get("/api/organizations", Some(&app.token(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, _) = app.get("/api/organizations", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_organization_lists_branches() {
    let app = TestApp::new();
    let org = app.organization("Precision Auto").await;
    app.branch(&org, "Downtown").await;
    app.branch(&org, "Uptown").await;
    let accountant = app
        .user("books@shop.test", Role::Accountant, Some(&org), None)
        .await;
    let loner = app.user("loner@shop.test", Role::Client, None, None).await;

    let (status, body) = app
        .get("/api/organizations/current", Some(&app.token(&accountant)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organization"]["id"], org.id.to_string());
    assert_eq!(body["branches"].as_array().unwrap().len(), 2);

    let (status, _) = app
        .get("/api/organizations/current", Some(&app.token(&loner)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_updates_own_organization_only() {
    let app = TestApp::new();
    let org = app.organization("Precision Auto").await;
    let rival = app.organization("Rival Garage").await;
    let owner = app.user("owner@shop.test", Role::Owner, Some(&org), None).await;
    let admin_user = app.user("admin@shop.test", Role::Admin, Some(&org), None).await;
    let token = app.token(&owner);

    let (status, updated) = app
        .patch(
            &format!("/api/organizations/{}", org.id),
            Some(&token),
            json!({ "phone": "555-0199" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], "555-0199");
    assert_eq!(updated["name"], "Precision Auto");

    let (status, _) = app
        .patch(
            &format!("/api/organizations/{}", rival.id),
            Some(&token),
            json!({ "name": "Mine Now" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .patch(
            &format!("/api/organizations/{}", org.id),
            Some(&token),
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .patch(
            &format!("/api/organizations/{}", org.id),
            Some(&app.token(&admin_user)),
            json!({ "name": "Renamed" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_super_admin_deactivates_organization() {
    let app = TestApp::new();
    let org = app.organization("Precision Auto").await;
    let admin = app.user("root@shop.test", Role::SuperAdmin, None, None).await;

    let (status, updated) = app
        .patch(
            &format!("/api/organizations/{}", org.id),
            Some(&app.token(&admin)),
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);
}

#[tokio::test]
async fn test_branches_are_scoped_to_organization() {
    let app = TestApp::new();
    let org = app.organization("Precision Auto").await;
    let rival = app.organization("Rival Garage").await;
    app.branch(&rival, "Their Branch").await;
    let owner = app.user("owner@shop.test", Role::Owner, Some(&org), None).await;
    let token = app.token(&owner);

    // A foreign organization_id is ignored for non super admins.
    let (status, branch) = app
        .post(
            "/api/branches",
            Some(&token),
            json!({ "name": "Downtown", "organization_id": rival.id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(branch["organization_id"], org.id.to_string());

    let (status, list) = app.get("/api/branches", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Downtown".to_string()]);
}

#[tokio::test]
async fn test_super_admin_branches_need_organization() {
    let app = TestApp::new();
    let org = app.organization("Precision Auto").await;
    let admin = app.user("root@shop.test", Role::SuperAdmin, None, None).await;
    let token = app.token(&admin);

    let (status, _) = app
        .post("/api/branches", Some(&token), json!({ "name": "Downtown" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/branches",
            Some(&token),
            json!({ "name": "Downtown", "organization_id": uuid::Uuid::new_v4() }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post(
            "/api/branches",
            Some(&token),
            json!({ "name": "Downtown", "organization_id": org.id }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/branches?organization_id={}", org.id);
    let (_, list) = app.get(&uri, Some(&token)).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_mechanic_cannot_create_branches() {
    let app = TestApp::new();
    let org = app.organization("Precision Auto").await;
    let branch = app.branch(&org, "Downtown").await;
    let mechanic = app
        .user("mech@shop.test", Role::Mechanic, Some(&org), Some(&branch))
        .await;

    let (status, _) = app
        .post(
            "/api/branches",
            Some(&app.token(&mechanic)),
            json!({ "name": "Uptown" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
