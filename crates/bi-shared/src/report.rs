//! Read-only reporting rows, display-only on the client

use serde::{Deserialize, Serialize};

/// One account-base report row as the backend serializes it. No lifecycle on
/// the client beyond display and export.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountBaseRecord {
    pub account_number: String,
    pub customer_no: String,
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub sector_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub industry_name: String,
    #[serde(default)]
    pub currency: String,
    pub working_balance: f64,
    #[serde(default)]
    pub opening_date: String,
    #[serde(default)]
    pub branch_code: String,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub ultimate_ben: String,
    #[serde(default)]
    pub cust_type: String,
    #[serde(default)]
    pub report_date: String,
    #[serde(default)]
    pub report_time: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccountBaseStats {
    pub total_accounts: u64,
    pub total_balance: f64,
    pub average_balance: f64,
    #[serde(default)]
    pub by_branch: Vec<BranchBucket>,
    #[serde(default)]
    pub by_product: Vec<ProductBucket>,
    #[serde(default)]
    pub by_category: Vec<CategoryBucket>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BranchBucket {
    pub branch_name: String,
    pub count: u64,
    pub total_balance: f64,
    pub average_balance: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductBucket {
    pub product_name: String,
    pub count: u64,
    pub total_balance: f64,
    pub average_balance: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryBucket {
    pub category: String,
    pub count: u64,
    pub total_balance: f64,
    pub average_balance: f64,
}

/// Query parameters accepted by the account-base list and export endpoints.
/// Unset fields are omitted from the query string entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AccountBaseFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cust_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_date_to: Option<String>,
}
