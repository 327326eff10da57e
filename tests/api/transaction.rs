use chrono::{Duration, Utc};
use restaurant_pos::domain::{MenuCategory, Role};
use serde_json::{json, Value};

use crate::helpers::TestApp;

// A 244.00 order placed by a waiter, the client is then logged in as a cashier
async fn order_ready_for_payment(app: &TestApp) -> String{
    let item = app.create_menu_item("Lechon Kawali", "100.00", MenuCategory::MainCourses).await;
    app.create_user_and_login(Role::Waiter).await;
    let order = app.place_order(5, &[(item.menu_item_id, 2)]).await;

    app.create_user_and_login(Role::Cashier).await;
    order["id"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn cash_payment_gives_change_and_completes_the_order(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "cash",
        "amount_received": "300.00"
    })).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["order"], order_id.as_str());
    assert_eq!(body["payment_method"], "cash");
    assert_eq!(body["amount"], "244.00");
    assert_eq!(body["amount_received"], "300.00");
    assert_eq!(body["change_given"], "56.00");
    assert_eq!(body["table_number"], 5);
    assert_eq!(body["date"], Utc::now().format("%B %d, %Y").to_string());

    let order: Value = app.get(&format!("/orders/{}", order_id)).await.json().await.unwrap();
    assert_eq!(order["status"], "completed");
}

#[actix_web::test]
async fn an_order_can_only_be_paid_once(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;
    let payment = json!({
        "order_id": order_id,
        "payment_method": "cash",
        "amount_received": "244.00"
    });

    let response = app.post_json("/transactions", &payment).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["change_given"], "0.00");

    let response = app.post_json("/transactions", &payment).await;
    assert_eq!(response.status().as_u16(), 409);

    let transactions: Vec<Value> = app.get("/transactions").await.json().await.unwrap();
    assert_eq!(transactions.len(), 1);
}

#[actix_web::test]
async fn insufficient_cash_is_rejected(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "cash",
        "amount_received": "200.00"
    })).await;
    assert_eq!(response.status().as_u16(), 400);

    let order: Value = app.get(&format!("/orders/{}", order_id)).await.json().await.unwrap();
    assert_eq!(order["status"], "pending");

    let transactions: Vec<Value> = app.get("/transactions").await.json().await.unwrap();
    assert!(transactions.is_empty());
}

#[actix_web::test]
async fn cash_with_fractions_of_a_cent_is_rejected(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "cash",
        "amount_received": "243.995"
    })).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "amount received cannot have more than two decimal places");

    let order: Value = app.get(&format!("/orders/{}", order_id)).await.json().await.unwrap();
    assert_eq!(order["status"], "pending");
}

#[actix_web::test]
async fn card_payment_keeps_only_the_last_four_digits(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "credit_card",
        "card_number": "4111 1111 1111 4242",
        "cardholder_name": "Maria Clara"
    })).await;
    assert_eq!(response.status().as_u16(), 201);

    let text = response.text().await.unwrap();
    assert!(!text.contains("4111"));
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["payment_method"], "card");
    assert_eq!(body["card_last_four"], "4242");
    assert_eq!(body["cardholder_name"], "Maria Clara");
    assert!(body["change_given"].is_null());
}

#[actix_web::test]
async fn malformed_card_payment_is_rejected(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "card",
        "card_number": "4242",
        "cardholder_name": "Maria Clara"
    })).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn e_wallet_payment_stores_account_details(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "gcash",
        "account_identifier": "09171234567",
        "account_name": "Juan Dela Cruz"
    })).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["payment_method"], "gcash");
    assert_eq!(body["account_identifier"], "09171234567");
    assert_eq!(body["account_name"], "Juan Dela Cruz");
    assert_eq!(body["amount"], "244.00");
}

#[actix_web::test]
async fn unknown_payment_method_is_rejected(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "bitcoin",
        "amount_received": "300.00"
    })).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("bitcoin"));

    let order: Value = app.get(&format!("/orders/{}", order_id)).await.json().await.unwrap();
    assert_eq!(order["status"], "pending");
}

#[actix_web::test]
async fn paying_a_missing_order_is_not_found(){
    let app = TestApp::spawn_app().await;
    app.create_user_and_login(Role::Cashier).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": uuid::Uuid::new_v4(),
        "payment_method": "cash",
        "amount_received": "10.00"
    })).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn cancelled_orders_cannot_be_paid(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.patch_json(&format!("/orders/{}", order_id), &json!({"status": "cancelled"})).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "cash",
        "amount_received": "300.00"
    })).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[actix_web::test]
async fn transactions_can_be_filtered_by_date(){
    let app = TestApp::spawn_app().await;
    let order_id = order_ready_for_payment(&app).await;

    let response = app.post_json("/transactions", &json!({
        "order_id": order_id,
        "payment_method": "cash",
        "amount_received": "500"
    })).await;
    assert_eq!(response.status().as_u16(), 201);
    let paid: Value = response.json().await.unwrap();

    let today = Utc::now().date_naive();
    let last_week = today - Duration::days(7);
    let yesterday = today - Duration::days(1);

    let body: Vec<Value> = app.get(&format!("/transactions?from_date={}&to_date={}", last_week, today))
        .await.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["id"], paid["id"]);

    let body: Vec<Value> = app.get(&format!("/transactions?from_date={}&to_date={}", last_week, yesterday))
        .await.json().await.unwrap();
    assert!(body.is_empty());

    let response = app.get(&format!("/transactions?from_date={}&to_date={}", today, last_week)).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.get(&format!("/transactions/{}", paid["id"].as_str().unwrap())).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["change_given"], "256.00");
}

#[actix_web::test]
async fn payments_require_login(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/transactions").await;
    assert_eq!(response.status().as_u16(), 403);
}
