//! Requests and responses for the payment, reservation and contact forms.

use crate::models::payment::NewPayment;
use crate::models::{ContactMessage, Payment, Reservation};
use serde::{Deserialize, Serialize};
use super::{present, Normalize};
use validator::Validate;

// The payment form posts its inputs under their label-style names.
#[derive(Debug, Deserialize, Validate)]
pub struct PaymentRequest {
    #[serde(rename = "First_Name")]
    #[validate(required(message = "First name is required"))]
    pub first_name: Option<String>,
    #[serde(rename = "Last_Name")]
    #[validate(required(message = "Last name is required"))]
    pub last_name: Option<String>,
    #[serde(rename = "Date_of_Birth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Phone_Number")]
    pub phone_number: Option<String>,
    #[serde(rename = "Email")]
    #[validate(required(message = "Email is required"))]
    pub email: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Zip")]
    pub zip: Option<String>,
}

impl Normalize for PaymentRequest {
    fn normalized(self) -> Self {
        Self {
            first_name: present(self.first_name),
            last_name: present(self.last_name),
            date_of_birth: present(self.date_of_birth),
            phone_number: present(self.phone_number),
            email: present(self.email),
            city: present(self.city),
            zip: present(self.zip),
        }
    }
}

impl PaymentRequest {
    /// Converts a validated request; `None` if a required field is missing.
    pub fn into_new_payment(self) -> Option<NewPayment> {
        Some(NewPayment {
            first_name: self.first_name?,
            last_name: self.last_name?,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number,
            email: self.email?,
            city: self.city,
            zip: self.zip,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "First_Name")]
    pub first_name: String,
    #[serde(rename = "Last_Name")]
    pub last_name: String,
    #[serde(rename = "Date_of_Birth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Phone_Number")]
    pub phone_number: Option<String>,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Zip")]
    pub zip: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            first_name: payment.first_name,
            last_name: payment.last_name,
            date_of_birth: payment.date_of_birth,
            phone_number: payment.phone_number,
            email: payment.email,
            city: payment.city,
            zip: payment.zip,
            created_at: payment.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReservationRequest {
    #[validate(required(message = "Name is required"))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(required(message = "Email is required"))]
    pub email: Option<String>,
    pub gender: Option<String>,
    pub seat: Option<String>,
}

impl Normalize for ReservationRequest {
    fn normalized(self) -> Self {
        Self {
            name: present(self.name),
            phone: present(self.phone),
            email: present(self.email),
            gender: present(self.gender),
            seat: present(self.seat),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub seat: Option<String>,
    pub created_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            name: reservation.name,
            phone: reservation.phone,
            email: reservation.email,
            gender: reservation.gender,
            seat: reservation.seat,
            created_at: reservation.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(required(message = "Name is required"))]
    pub name: Option<String>,
    #[validate(required(message = "Email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(required(message = "Message is required"))]
    pub message: Option<String>,
}

impl Normalize for ContactRequest {
    fn normalized(self) -> Self {
        Self {
            name: present(self.name),
            email: present(self.email),
            phone: present(self.phone),
            message: present(self.message),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: String,
}

impl From<ContactMessage> for ContactResponse {
    fn from(contact: ContactMessage) -> Self {
        Self {
            id: contact.id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            created_at: contact.created_at.to_rfc3339(),
        }
    }
}
