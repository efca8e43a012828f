//! Payment, reservation and contact forms: store what was submitted, list it back.

use super::required;
use crate::dtos::{
    ContactRequest, ContactResponse, PaymentRequest, PaymentResponse, ReservationRequest,
    ReservationResponse,
};
use crate::models::{ContactMessage, Payment, Reservation};
use crate::services::record_submission;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use axum::{extract::State, response::IntoResponse};
use mongodb::bson::doc;
use service_core::error::AppError;
use service_core::response::ApiResponse;

#[tracing::instrument(skip(state, request))]
pub async fn create_payment(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let details = request
        .into_new_payment()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Payment details are incomplete")))?;
    let payment = Payment::new(details);

    state
        .db
        .payments()
        .insert_one(&payment, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert payment {}: {}", payment.id, e);
            AppError::from(e)
        })?;

    record_submission("payments");
    tracing::info!(payment_id = %payment.id, "Payment details stored");

    Ok(ApiResponse::created(
        "Payment created successfully",
        PaymentResponse::from(payment),
    ))
}

pub async fn list_payments(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let payments = state
        .db
        .find_all(&state.db.payments(), doc! { "created_at": 1 })
        .await?;

    let payments: Vec<PaymentResponse> =
        payments.into_iter().map(PaymentResponse::from).collect();

    Ok(ApiResponse::ok("Payments fetched successfully", payments))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_reservation(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = Reservation::new(
        required(request.name, "Name is required")?,
        request.phone,
        required(request.email, "Email is required")?,
        request.gender,
        request.seat,
    );

    state
        .db
        .reservations()
        .insert_one(&reservation, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert reservation {}: {}", reservation.id, e);
            AppError::from(e)
        })?;

    record_submission("reservations");
    tracing::info!(reservation_id = %reservation.id, "Reservation stored");

    Ok(ApiResponse::ok(
        "Details added Successfully",
        ReservationResponse::from(reservation),
    ))
}

pub async fn list_reservations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state
        .db
        .find_all(&state.db.reservations(), doc! { "created_at": 1 })
        .await?;

    let reservations: Vec<ReservationResponse> = reservations
        .into_iter()
        .map(ReservationResponse::from)
        .collect();

    Ok(ApiResponse::ok(
        "Reservation Details fetched successfully",
        reservations,
    ))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_contact(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact = ContactMessage::new(
        required(request.name, "Name is required")?,
        required(request.email, "Email is required")?,
        request.phone,
        required(request.message, "Message is required")?,
    );

    state
        .db
        .contacts()
        .insert_one(&contact, None)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert contact message {}: {}", contact.id, e);
            AppError::from(e)
        })?;

    record_submission("contacts");
    tracing::info!(contact_id = %contact.id, "Contact message stored");

    Ok(ApiResponse::ok(
        "Your Message has been sent to the admin",
        ContactResponse::from(contact),
    ))
}

pub async fn list_contacts(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let contacts = state
        .db
        .find_all(&state.db.contacts(), doc! { "created_at": 1 })
        .await?;

    let contacts: Vec<ContactResponse> = contacts.into_iter().map(ContactResponse::from).collect();

    Ok(ApiResponse::ok(
        "Contact Requests fetched successfully",
        contacts,
    ))
}
