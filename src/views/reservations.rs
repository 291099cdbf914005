//! Structured products and the reservation queue.
//!
//! Any signed-in user can list products and reserve one. Admins review the
//! queue and approve or reject each reservation; the queue is re-read after
//! every decision so the status counts follow the backend.

use async_trait::async_trait;
use tracing::info;

use super::ListSource;
use super::filter::param;
use crate::api::{ApiClient, Result};
use crate::models::{Id, NewReservation, Reservation, ReservationStatus, StructuredProduct};
use crate::validation::require_positive_amount;

#[derive(Debug, Clone, Default)]
pub struct ProductsFilter {
    /// Also list products that are closed to new reservations.
    pub include_inactive: bool,
}

pub struct ProductsSource;

#[async_trait]
impl ListSource for ProductsSource {
    type Item = StructuredProduct;
    type Filter = ProductsFilter;

    fn name(&self) -> &'static str {
        "products"
    }

    async fn fetch(
        &self,
        client: &ApiClient,
        filter: &ProductsFilter,
    ) -> Result<Vec<StructuredProduct>> {
        let mut products: Vec<StructuredProduct> =
            client.get_list("/structured-products", &[]).await?;
        if !filter.include_inactive {
            products.retain(|p| p.is_active);
        }
        Ok(products)
    }

    fn render_item(&self, p: &StructuredProduct) -> String {
        let mut line = format!("[{}] {}", p.id, p.title);
        if let Some(underlying) = &p.underlying {
            line.push_str(&format!(" on {underlying}"));
        }
        if let Some(rate) = p.coupon_rate {
            line.push_str(&format!(", coupon {rate}%"));
        }
        if let Some(maturity) = &p.maturity_date {
            line.push_str(&format!(", maturity {maturity}"));
        }
        if let Some(min) = p.min_investment {
            line.push_str(&format!(", min {min:.0} EUR"));
        }
        if !p.is_active {
            line.push_str(" (closed)");
        }
        line
    }

    fn empty_message(&self) -> &'static str {
        "No structured products available."
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReservationsFilter {
    pub status: Option<ReservationStatus>,
}

/// Admin reservation queue.
pub struct ReservationsSource;

#[async_trait]
impl ListSource for ReservationsSource {
    type Item = Reservation;
    type Filter = ReservationsFilter;

    fn name(&self) -> &'static str {
        "reservations"
    }

    async fn fetch(
        &self,
        client: &ApiClient,
        filter: &ReservationsFilter,
    ) -> Result<Vec<Reservation>> {
        client.require_admin()?;
        let query = [("status", param(filter.status.as_ref()))];
        let mut items: Vec<Reservation> = client
            .get_list("/structured-products/reservations", &query)
            .await?;
        if let Some(status) = filter.status {
            items.retain(|r| r.status == status);
        }
        Ok(items)
    }

    fn render_item(&self, r: &Reservation) -> String {
        let product = r
            .product_title
            .clone()
            .unwrap_or_else(|| format!("product {}", r.product_id));
        let user = r
            .user_email
            .clone()
            .unwrap_or_else(|| format!("user {}", r.user_id));
        format!(
            "[{}] {:<8} {} - {} - {:.2} EUR",
            r.id,
            r.status.as_str(),
            product,
            user,
            r.montant
        )
    }

    fn empty_message(&self) -> &'static str {
        "No reservations."
    }

    fn render(&self, items: &[Reservation]) -> String {
        let mut lines: Vec<String> = items.iter().map(|r| self.render_item(r)).collect();
        lines.push(String::new());
        lines.push(counts(items).to_string());
        lines.join("\n")
    }
}

/// Number of reservations in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl std::fmt::Display for ReservationCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pending, {} approved, {} rejected",
            self.pending, self.approved, self.rejected
        )
    }
}

pub fn counts(items: &[Reservation]) -> ReservationCounts {
    items
        .iter()
        .fold(ReservationCounts::default(), |mut acc, r| {
            match r.status {
                ReservationStatus::Pending => acc.pending += 1,
                ReservationStatus::Approved => acc.approved += 1,
                ReservationStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
}

/// `POST /structured-products/:id/reservations`.
///
/// # Errors
///
/// Fails without a request when the amount is not positive or no one is
/// signed in.
pub async fn reserve(
    client: &ApiClient,
    product_id: &Id,
    montant: f64,
    notes: Option<String>,
) -> Result<()> {
    let montant = require_positive_amount(montant)?;
    client.require_session()?;
    let body = NewReservation {
        montant,
        notes: notes.filter(|n| !n.trim().is_empty()),
    };
    let _: serde_json::Value = client
        .post(
            &format!("/structured-products/{product_id}/reservations"),
            &body,
        )
        .await?;
    info!(product = %product_id, montant, "Reservation placed");
    Ok(())
}

/// `PUT /structured-products/reservations/:id/approve`.
pub async fn approve(client: &ApiClient, id: &Id) -> Result<()> {
    decide(client, id, "approve").await
}

/// `PUT /structured-products/reservations/:id/reject`.
pub async fn reject(client: &ApiClient, id: &Id) -> Result<()> {
    decide(client, id, "reject").await
}

async fn decide(client: &ApiClient, id: &Id, action: &str) -> Result<()> {
    client.require_admin()?;
    let _: serde_json::Value = client
        .put_empty(&format!("/structured-products/reservations/{id}/{action}"))
        .await?;
    info!(id = %id, action, "Reservation reviewed");
    Ok(())
}
