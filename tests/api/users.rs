use restaurant_pos::domain::Role;
use serde_json::{json, Value};

use crate::helpers::TestApp;

#[actix_web::test]
async fn manager_creates_user_with_default_role(){
    let app = TestApp::spawn_app().await;
    app.create_user_and_login(Role::Manager).await;

    let response = app.post_json("/users", &json!({
        "username": "jose.rizal",
        "password": "noli-me-tangere",
        "name": "Jose Rizal",
        "email": "jose@example.ph",
        "phone_number": "+63 917 123 4567"
    })).await;
    assert_eq!(response.status().as_u16(), 201);

    let text = response.text().await.unwrap();
    assert!(!text.contains("argon2"));
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["username"], "jose.rizal");
    assert_eq!(body["role"], "waiter");
    assert_eq!(body["email"], "jose@example.ph");

    let response = app.post_login("jose.rizal", "noli-me-tangere").await;
    assert_eq!(response.status().as_u16(), 200);
}

#[actix_web::test]
async fn duplicate_username_is_a_conflict(){
    let app = TestApp::spawn_app().await;
    let manager = app.create_user_and_login(Role::Manager).await;

    let response = app.post_json("/users", &json!({
        "username": manager.username,
        "password": "another-password",
        "name": "Someone Else"
    })).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[actix_web::test]
async fn invalid_users_are_rejected(){
    let app = TestApp::spawn_app().await;
    app.create_user_and_login(Role::Manager).await;

    let cases = vec![
        (json!({"username": "ab", "password": "long-enough", "name": "A"}), "short username"),
        (json!({"username": "andres", "password": "short", "name": "A"}), "short password"),
        (json!({"username": "andres", "password": "long-enough", "name": "A", "email": "nope"}), "bad email"),
        (json!({"username": "andres", "password": "long-enough", "name": "A", "role": "owner"}), "unknown role"),
    ];

    for (body, description) in cases {
        let response = app.post_json("/users", &body).await;
        assert_eq!(response.status().as_u16(), 400, "accepted {}", description);
    }
}

#[actix_web::test]
async fn only_managers_administer_users(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/users").await;
    assert_eq!(response.status().as_u16(), 403);

    for role in [Role::Customer, Role::Waiter, Role::Cashier] {
        app.create_user_and_login(role).await;
        let response = app.get("/users").await;
        assert_eq!(response.status().as_u16(), 403, "role {} was allowed", role);
    }

    app.create_user_and_login(Role::Manager).await;
    let users: Vec<Value> = app.get("/users").await.json().await.unwrap();
    assert_eq!(users.len(), 4);
}

#[actix_web::test]
async fn manager_updates_user(){
    let app = TestApp::spawn_app().await;
    let waiter = app.create_user(Role::Waiter).await;
    app.create_user_and_login(Role::Manager).await;

    let response = app.patch_json(
        &format!("/users/{}", waiter.user_id),
        &json!({"role": "cashier", "password": "brand-new-password"})
    ).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["role"], "cashier");
    assert_eq!(body["name"], waiter.name.as_str());

    let response = app.post_login(&waiter.username, &waiter.password).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.post_login(&waiter.username, "brand-new-password").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["role"], "cashier");
}

#[actix_web::test]
async fn manager_cannot_delete_own_account(){
    let app = TestApp::spawn_app().await;
    let manager = app.create_user_and_login(Role::Manager).await;
    let waiter = app.create_user(Role::Waiter).await;

    let response = app.delete(&format!("/users/{}", manager.user_id)).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.delete(&format!("/users/{}", waiter.user_id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get(&format!("/users/{}", waiter.user_id)).await;
    assert_eq!(response.status().as_u16(), 404);
}
