use restaurant_pos::domain::{MenuCategory, Role};
use serde_json::{json, Value};

use crate::helpers::TestApp;

fn adobo() -> Value{
    json!({
        "name": "Chicken Adobo",
        "description": "Braised in soy and vinegar",
        "price": "100.00",
        "category": "main-courses"
    })
}

#[actix_web::test]
async fn anyone_can_browse_the_menu(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Sinigang", "180.00", MenuCategory::Soup).await;

    let response = app.get("/menu").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Vec<Value> = response.json().await.unwrap();
    assert_eq!(body.len(), 1);

    let response = app.get(&format!("/menu/{}", item.menu_item_id)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], item.menu_item_id.to_string());
    assert_eq!(body["price"], "180.00");
    assert_eq!(body["category"], "soup");
}

#[actix_web::test]
async fn pages_past_the_end_are_empty(){
    let app = TestApp::spawn_app().await;
    app.create_menu_item("Sinigang", "180.00", MenuCategory::Soup).await;

    let response = app.get("/menu?page=9223372036854775807&limit=500").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Vec<Value> = response.json().await.unwrap();
    assert!(body.is_empty());
}

#[actix_web::test]
async fn extractor_rejections_use_the_error_envelope(){
    let app = TestApp::spawn_app().await;
    app.create_user_and_login(Role::Manager).await;

    let response = app.api_client.post(app.url("/menu"))
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let response = app.get("/menu?category=appetizers").await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);

    let response = app.get("/menu/not-an-id").await;
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn missing_menu_item_is_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.get(&format!("/menu/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn manager_creates_menu_item(){
    let app = TestApp::spawn_app().await;
    app.create_user_and_login(Role::Manager).await;

    let response = app.post_json("/menu", &adobo()).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Chicken Adobo");
    assert_eq!(body["price"], "100.00");
    assert_eq!(body["category"], "main-courses");
    assert_eq!(body["available"], true);
}

#[actix_web::test]
async fn non_managers_cannot_create_menu_items(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/menu", &adobo()).await;
    assert_eq!(response.status().as_u16(), 403);

    for role in [Role::Customer, Role::Waiter, Role::Cashier] {
        app.create_user_and_login(role).await;
        let response = app.post_json("/menu", &adobo()).await;
        assert_eq!(response.status().as_u16(), 403, "role {} was allowed", role);
    }

    let menu: Vec<Value> = app.get("/menu").await.json().await.unwrap();
    assert!(menu.is_empty());
}

#[actix_web::test]
async fn invalid_menu_items_are_rejected(){
    let app = TestApp::spawn_app().await;
    app.create_user_and_login(Role::Manager).await;

    let cases = vec![
        (json!({"name": "Halo-halo", "price": "-1.00", "category": "dessert"}), "negative price"),
        (json!({"name": "", "price": "10.00", "category": "dessert"}), "empty name"),
        (json!({"name": "Halo-halo", "price": "10.00", "category": "snacks"}), "unknown category"),
        (json!({"name": "Halo-halo", "category": "dessert"}), "missing price"),
    ];

    for (body, description) in cases {
        let response = app.post_json("/menu", &body).await;
        assert_eq!(response.status().as_u16(), 400, "accepted {}", description);
    }
}

#[actix_web::test]
async fn menu_can_be_filtered(){
    let app = TestApp::spawn_app().await;
    app.create_menu_item("Lumpia", "60.00", MenuCategory::Entrees).await;
    app.create_menu_item("Pancit Canton", "150.00", MenuCategory::MainCourses).await;
    app.store_menu_item("Leche Flan", "90.00", MenuCategory::Dessert, false).await;

    let body: Vec<Value> = app.get("/menu?category=main-courses").await.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["name"], "Pancit Canton");

    let body: Vec<Value> = app.get("/menu?available=false").await.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["name"], "Leche Flan");

    // Matches the description ("House lumpia") case-insensitively
    let body: Vec<Value> = app.get("/menu?search=LUMP").await.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["category"], "entrées");

    let body: Vec<Value> = app.get("/menu?search=100%25").await.json().await.unwrap();
    assert!(body.is_empty());
}

#[actix_web::test]
async fn manager_updates_and_toggles_menu_items(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Kare-kare", "250.00", MenuCategory::MainCourses).await;
    app.create_user_and_login(Role::Manager).await;

    let response = app.patch_json(
        &format!("/menu/{}", item.menu_item_id),
        &json!({"price": "275.50"})
    ).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["price"], "275.50");
    assert_eq!(body["name"], "Kare-kare");

    let response = app.patch_json(
        &format!("/menu/{}/toggle_availability", item.menu_item_id),
        &json!({})
    ).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["available"], false);

    let response = app.patch_json(
        &format!("/menu/{}/toggle_availability", item.menu_item_id),
        &json!({})
    ).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["available"], true);
}

#[actix_web::test]
async fn menu_item_on_an_order_cannot_be_deleted(){
    let app = TestApp::spawn_app().await;
    let ordered = app.create_menu_item("Bulalo", "300.00", MenuCategory::Soup).await;
    let unused = app.create_menu_item("Buko Juice", "70.00", MenuCategory::Beverages).await;

    app.create_user_and_login(Role::Waiter).await;
    app.place_order(3, &[(ordered.menu_item_id, 1)]).await;

    app.create_user_and_login(Role::Manager).await;

    let response = app.delete(&format!("/menu/{}", ordered.menu_item_id)).await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app.delete(&format!("/menu/{}", unused.menu_item_id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get(&format!("/menu/{}", unused.menu_item_id)).await;
    assert_eq!(response.status().as_u16(), 404);
}
