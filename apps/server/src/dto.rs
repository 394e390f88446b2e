//! Request/response DTOs shared across route files, and their JSON mapping
//! helpers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use bookpos_core::{Buyer, SaleLine, UNKNOWN_BUYER};

/// A sale event as listed by the history and revenue endpoints, with the
/// buyer's name joined in.
#[derive(Debug, Clone, Serialize)]
pub struct SaleDto {
    pub sale_id: i64,
    pub buyer_name: String,
    pub product_name: String,
    pub quantity: i64,
    pub sale_date: Option<DateTime<Utc>>,
}

impl From<SaleLine> for SaleDto {
    fn from(line: SaleLine) -> Self {
        SaleDto {
            sale_id: line.sale_id,
            // Dangling buyer references render as a sentinel label.
            buyer_name: line.buyer_name.unwrap_or_else(|| UNKNOWN_BUYER.to_string()),
            product_name: line.product_name,
            quantity: line.quantity,
            sale_date: line.sale_date,
        }
    }
}

/// One entry of the buyer dropdown: buyers without an RFID, with the display
/// name split into first/last for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct BuyerOptionDto {
    pub buyer_id: i64,
    pub fname: String,
    pub lname: String,
}

impl From<Buyer> for BuyerOptionDto {
    fn from(buyer: Buyer) -> Self {
        let (fname, lname) = buyer.split_name();
        BuyerOptionDto {
            buyer_id: buyer.buyer_id,
            fname: fname.to_string(),
            lname: lname.to_string(),
        }
    }
}

pub fn sales_to_dto(sales: Vec<SaleLine>) -> Vec<SaleDto> {
    sales.into_iter().map(SaleDto::from).collect()
}
