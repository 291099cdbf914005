//! Structured products and the reservations users place on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredProduct {
    pub id: Id,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default, alias = "couponRate", alias = "coupon")]
    pub coupon_rate: Option<f64>,
    #[serde(default, alias = "maturityDate", alias = "maturity")]
    pub maturity_date: Option<String>,
    #[serde(default, alias = "minInvestment")]
    pub min_investment: Option<f64>,
    #[serde(default = "default_active", alias = "isActive")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Review state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!(
                "unknown reservation status '{other}' (expected pending, approved or rejected)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Id,
    pub product_id: Id,
    pub user_id: Id,
    pub montant: f64,
    pub status: ReservationStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "productTitle")]
    pub product_title: Option<String>,
    #[serde(default, alias = "userEmail")]
    pub user_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /structured-products/:id/reservations`.
#[derive(Debug, Clone, Serialize)]
pub struct NewReservation {
    pub montant: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
