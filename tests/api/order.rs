use restaurant_pos::domain::{MenuCategory, Role};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::TestApp;

fn assert_totals(order: &Value, subtotal: &str, vat: &str, service_fee: &str, total: &str){
    assert_eq!(order["subtotal"], subtotal);
    assert_eq!(order["vat"], vat);
    assert_eq!(order["service_fee"], service_fee);
    assert_eq!(order["total"], total);
}

#[actix_web::test]
async fn creating_an_order_computes_totals(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Lechon Kawali", "100.00", MenuCategory::MainCourses).await;
    let waiter = app.create_user_and_login(Role::Waiter).await;

    let order = app.place_order(5, &[(item.menu_item_id, 2)]).await;

    assert_totals(&order, "200.00", "24.00", "20.00", "244.00");
    assert_eq!(order["table_number"], 5);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["waiter"], waiter.user_id.to_string());
    assert_eq!(order["waiter_name"], waiter.name.as_str());
    assert_eq!(order["time_ago"], "just now");

    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["menu_item"], item.menu_item_id.to_string());
    assert_eq!(items[0]["menu_item_name"], "Lechon Kawali");
    assert_eq!(items[0]["menu_item_category"], "main-courses");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["price_at_time"], "100.00");
    assert_eq!(items[0]["subtotal"], "200.00");
}

#[actix_web::test]
async fn order_items_keep_their_insertion_order(){
    let app = TestApp::spawn_app().await;
    let soup = app.create_menu_item("Tinola", "120.00", MenuCategory::Soup).await;
    let rice = app.create_menu_item("Garlic Rice", "35.50", MenuCategory::Accompaniments).await;
    let drink = app.create_menu_item("Calamansi Juice", "45.25", MenuCategory::Beverages).await;
    app.create_user_and_login(Role::Waiter).await;

    let order = app.place_order(2, &[
        (drink.menu_item_id, 1),
        (soup.menu_item_id, 1),
        (rice.menu_item_id, 3)
    ]).await;

    let names: Vec<&str> = order["items"].as_array().unwrap()
        .iter()
        .map(|item| item["menu_item_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Calamansi Juice", "Tinola", "Garlic Rice"]);

    // 45.25 + 120.00 + 106.50 = 271.75, vat 32.61, fee 27.175 rounds up
    assert_totals(&order, "271.75", "32.61", "27.18", "331.54");
}

#[actix_web::test]
async fn unknown_menu_item_rolls_back_the_whole_order(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Sisig", "180.00", MenuCategory::MainCourses).await;
    app.create_user_and_login(Role::Waiter).await;

    let response = app.post_json("/orders", &json!({
        "table_number": 4,
        "items": [
            {"menu_item_id": item.menu_item_id, "quantity": 1},
            {"menu_item_id": Uuid::new_v4(), "quantity": 1}
        ]
    })).await;
    assert_eq!(response.status().as_u16(), 404);

    let orders: Vec<Value> = app.get("/orders").await.json().await.unwrap();
    assert!(orders.is_empty());
}

#[actix_web::test]
async fn invalid_orders_are_rejected(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Sisig", "180.00", MenuCategory::MainCourses).await;
    let sold_out = app.store_menu_item("Crispy Pata", "650.00", MenuCategory::MainCourses, false).await;
    app.create_user_and_login(Role::Waiter).await;

    let cases = vec![
        (json!({"table_number": 0, "items": [{"menu_item_id": item.menu_item_id, "quantity": 1}]}), "table zero"),
        (json!({"items": [{"menu_item_id": item.menu_item_id, "quantity": 1}]}), "missing table"),
        (json!({"table_number": 1, "items": []}), "no items"),
        (json!({"table_number": 1, "items": [{"menu_item_id": item.menu_item_id, "quantity": 0}]}), "zero quantity"),
        (json!({"table_number": 1, "items": [{"menu_item_id": sold_out.menu_item_id, "quantity": 1}]}), "unavailable item"),
    ];

    for (body, description) in cases {
        let response = app.post_json("/orders", &body).await;
        assert_eq!(response.status().as_u16(), 400, "accepted {}", description);
    }
}

#[actix_web::test]
async fn amounts_beyond_the_currency_column_are_rejected(){
    let app = TestApp::spawn_app().await;
    let banquet = app.create_menu_item("Grand Banquet", "99999999.99", MenuCategory::MainCourses).await;
    let feast = app.create_menu_item("Town Fiesta", "90000000.00", MenuCategory::MainCourses).await;
    app.create_user_and_login(Role::Waiter).await;

    // The line subtotal alone overflows
    let response = app.post_json("/orders", &json!({
        "table_number": 2,
        "items": [{"menu_item_id": banquet.menu_item_id, "quantity": 2}]
    })).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);

    // The line fits but vat and service fee push the total over
    let response = app.post_json("/orders", &json!({
        "table_number": 2,
        "items": [{"menu_item_id": feast.menu_item_id, "quantity": 1}]
    })).await;
    assert_eq!(response.status().as_u16(), 400);

    let orders: Vec<Value> = app.get("/orders").await.json().await.unwrap();
    assert!(orders.is_empty());
}

#[actix_web::test]
async fn orders_require_login(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/orders").await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app.post_json("/orders", &json!({"table_number": 1, "items": []})).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[actix_web::test]
async fn waiters_only_see_their_own_orders(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Bistek", "210.00", MenuCategory::MainCourses).await;

    app.create_user_and_login(Role::Waiter).await;
    let first = app.place_order(1, &[(item.menu_item_id, 1)]).await;

    app.create_user_and_login(Role::Waiter).await;
    let second = app.place_order(2, &[(item.menu_item_id, 1)]).await;

    let orders: Vec<Value> = app.get("/orders").await.json().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], second["id"]);

    let response = app.get(&format!("/orders/{}", first["id"].as_str().unwrap())).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.delete(&format!("/orders/{}", first["id"].as_str().unwrap())).await;
    assert_eq!(response.status().as_u16(), 404);

    for role in [Role::Manager, Role::Cashier] {
        app.create_user_and_login(role).await;
        let orders: Vec<Value> = app.get("/orders").await.json().await.unwrap();
        assert_eq!(orders.len(), 2);
        // Newest first
        assert_eq!(orders[0]["id"], second["id"]);
    }
}

#[actix_web::test]
async fn orders_can_be_filtered_by_status(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Pinakbet", "140.00", MenuCategory::MainCourses).await;
    app.create_user_and_login(Role::Waiter).await;

    let first = app.place_order(1, &[(item.menu_item_id, 1)]).await;
    app.place_order(2, &[(item.menu_item_id, 1)]).await;

    let response = app.patch_json(
        &format!("/orders/{}", first["id"].as_str().unwrap()),
        &json!({"status": "preparing", "notes": "no onions"})
    ).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "preparing");
    assert_eq!(body["notes"], "no onions");

    let orders: Vec<Value> = app.get("/orders?status=preparing").await.json().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], first["id"]);

    let orders: Vec<Value> = app.get("/orders?status=pending").await.json().await.unwrap();
    assert_eq!(orders.len(), 1);
}

#[actix_web::test]
async fn price_snapshot_survives_catalog_changes(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Tapsilog", "100.00", MenuCategory::MainCourses).await;
    app.create_user_and_login(Role::Waiter).await;
    let order = app.place_order(7, &[(item.menu_item_id, 2)]).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    app.create_user_and_login(Role::Manager).await;
    let response = app.patch_json(
        &format!("/menu/{}", item.menu_item_id),
        &json!({"price": "150.00"})
    ).await;
    assert_eq!(response.status().as_u16(), 200);

    let order: Value = app.get(&format!("/orders/{}", order_id)).await.json().await.unwrap();
    assert_eq!(order["items"][0]["price_at_time"], "100.00");
    assert_totals(&order, "200.00", "24.00", "20.00", "244.00");

    // New lines pick up the new price
    let response = app.post_json(
        &format!("/orders/{}/items", order_id),
        &json!({"menu_item_id": item.menu_item_id, "quantity": 1})
    ).await;
    assert_eq!(response.status().as_u16(), 201);
    let order: Value = response.json().await.unwrap();
    assert_eq!(order["items"][1]["price_at_time"], "150.00");
    assert_totals(&order, "350.00", "42.00", "35.00", "427.00");
}

#[actix_web::test]
async fn line_item_changes_recompute_totals(){
    let app = TestApp::spawn_app().await;
    let main = app.create_menu_item("Lechon Kawali", "100.00", MenuCategory::MainCourses).await;
    let dessert = app.create_menu_item("Turon", "50.00", MenuCategory::Dessert).await;
    app.create_user_and_login(Role::Waiter).await;

    let order = app.place_order(5, &[(main.menu_item_id, 2), (dessert.menu_item_id, 1)]).await;
    assert_totals(&order, "250.00", "30.00", "25.00", "305.00");
    let order_id = order["id"].as_str().unwrap().to_string();
    let dessert_line = order["items"][1]["id"].as_str().unwrap().to_string();
    let main_line = order["items"][0]["id"].as_str().unwrap().to_string();

    let response = app.delete(&format!("/orders/{}/items/{}", order_id, dessert_line)).await;
    assert_eq!(response.status().as_u16(), 200);
    let order: Value = response.json().await.unwrap();
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    assert_totals(&order, "200.00", "24.00", "20.00", "244.00");

    let response = app.patch_json(
        &format!("/orders/{}/items/{}", order_id, main_line),
        &json!({"quantity": 3, "special_instructions": "extra crispy"})
    ).await;
    assert_eq!(response.status().as_u16(), 200);
    let order: Value = response.json().await.unwrap();
    assert_eq!(order["items"][0]["quantity"], 3);
    assert_eq!(order["items"][0]["subtotal"], "300.00");
    assert_eq!(order["items"][0]["special_instructions"], "extra crispy");
    assert_totals(&order, "300.00", "36.00", "30.00", "366.00");

    let response = app.delete(&format!("/orders/{}/items/{}", order_id, main_line)).await;
    let order: Value = response.json().await.unwrap();
    assert!(order["items"].as_array().unwrap().is_empty());
    assert_totals(&order, "0.00", "0.00", "0.00", "0.00");

    let response = app.delete(&format!("/orders/{}/items/{}", order_id, main_line)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn terminal_orders_cannot_be_changed(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Halo-halo", "120.00", MenuCategory::Dessert).await;
    app.create_user_and_login(Role::Waiter).await;

    let order = app.place_order(9, &[(item.menu_item_id, 1)]).await;
    let order_id = order["id"].as_str().unwrap().to_string();
    let line_id = order["items"][0]["id"].as_str().unwrap().to_string();

    let response = app.patch_json(&format!("/orders/{}", order_id), &json!({"status": "cancelled"})).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_json(
        &format!("/orders/{}/items", order_id),
        &json!({"menu_item_id": item.menu_item_id, "quantity": 1})
    ).await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app.patch_json(&format!("/orders/{}/items/{}", order_id, line_id), &json!({"quantity": 2})).await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app.delete(&format!("/orders/{}/items/{}", order_id, line_id)).await;
    assert_eq!(response.status().as_u16(), 409);

    let response = app.patch_json(&format!("/orders/{}", order_id), &json!({"status": "pending"})).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[actix_web::test]
async fn deleting_an_order_removes_it(){
    let app = TestApp::spawn_app().await;
    let item = app.create_menu_item("Arroz Caldo", "95.00", MenuCategory::Soup).await;
    app.create_user_and_login(Role::Waiter).await;

    let order = app.place_order(6, &[(item.menu_item_id, 1)]).await;
    let path = format!("/orders/{}", order["id"].as_str().unwrap());

    let response = app.delete(&path).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.get(&path).await;
    assert_eq!(response.status().as_u16(), 404);
}
