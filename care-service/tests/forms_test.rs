mod common;

use common::{spawn_router, TestApp};
use mongodb::bson::doc;
use serde_json::{json, Value};

fn payment_form() -> Value {
    json!({
        "First_Name": "Asha",
        "Last_Name": "Rao",
        "Date_of_Birth": "1990-04-12",
        "Phone_Number": "555-0100",
        "Email": "asha@example.com",
        "City": "Pune",
        "Zip": "411001"
    })
}

#[tokio::test]
async fn payment_details_are_stored() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/payment", &payment_form()).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Payment created successfully");
    assert_eq!(body["data"]["First_Name"], "Asha");
    assert_eq!(body["data"]["Zip"], "411001");

    let stored = app
        .db
        .payments()
        .find_one(doc! { "email": "asha@example.com" }, None)
        .await
        .unwrap()
        .expect("Payment not found in DB");
    assert_eq!(stored.last_name, "Rao");
    assert_eq!(stored.city.as_deref(), Some("Pune"));

    let body: Value = app.get("/payment").await.json().await.unwrap();
    assert_eq!(body["message"], "Payments fetched successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    app.cleanup().await;
}

#[tokio::test]
async fn payment_without_email_is_rejected() {
    let address = spawn_router(None).await;
    let mut form = payment_form();
    form.as_object_mut().unwrap().remove("Email");

    let response = reqwest::Client::new()
        .post(format!("{}/payment", address))
        .json(&form)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email is required");
}

#[tokio::test]
async fn reservations_round_trip_in_submission_order() {
    let app = TestApp::spawn().await;

    for name in ["Asha", "Ravi"] {
        let response = app
            .post_json(
                "/reservation",
                &json!({
                    "name": name,
                    "phone": "555-0100",
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "gender": "female",
                    "seat": "A1"
                }),
            )
            .await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Details added Successfully");
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
    }

    let body: Value = app.get("/reservation").await.json().await.unwrap();
    assert_eq!(body["message"], "Reservation Details fetched successfully");

    let reservations = body["data"].as_array().unwrap();
    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0]["name"], "Asha");
    assert_eq!(reservations[1]["name"], "Ravi");
    assert_eq!(reservations[1]["seat"], "A1");

    app.cleanup().await;
}

#[tokio::test]
async fn contact_message_reaches_the_admin_list() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/contact",
            &json!({
                "name": "Ravi",
                "email": "ravi@example.com",
                "message": "Do you accept walk-ins?"
            }),
        )
        .await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Your Message has been sent to the admin");
    assert!(body["data"]["phone"].is_null());

    let body: Value = app.get("/contact").await.json().await.unwrap();
    assert_eq!(body["message"], "Contact Requests fetched successfully");
    assert_eq!(body["data"][0]["message"], "Do you accept walk-ins?");

    app.cleanup().await;
}

#[tokio::test]
async fn contact_without_message_is_rejected() {
    let address = spawn_router(None).await;

    let response = reqwest::Client::new()
        .post(format!("{}/contact", address))
        .json(&json!({ "name": "Ravi", "email": "ravi@example.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Message is required");
}
