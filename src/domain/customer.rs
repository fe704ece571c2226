//! Customer records as served by `/customers`.

use super::{display_date, Record};
use serde::{Deserialize, Serialize};

/// One row of the customer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address_id: i64,
    pub active: bool,
    pub create_date: String,
    pub last_update: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl Customer {
    /// `"First Last"`, regardless of whether the API sent `full_name`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.active {
            "Active"
        } else {
            "Inactive"
        }
    }

    #[must_use]
    pub fn member_since(&self) -> String {
        display_date(&self.create_date)
    }
}

impl Record for Customer {
    type Id = i64;

    fn id(&self) -> i64 {
        self.customer_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address_id: i64,
    pub address: String,
    #[serde(default)]
    pub address2: Option<String>,
    pub district: String,
    pub city_id: i64,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub last_update: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub city_id: i64,
    pub city: String,
    pub country_id: i64,
    pub last_update: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_id: i64,
    pub country: String,
    pub last_update: String,
}

/// A customer with the address chain resolved, from `/customers/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(flatten)]
    pub customer: Customer,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub city: Option<City>,
    #[serde(default)]
    pub country: Option<Country>,
}

impl Record for CustomerDetails {
    type Id = i64;

    fn id(&self) -> i64 {
        self.customer.customer_id
    }
}

impl CustomerDetails {
    /// District, city and country joined the way a mailing label reads.
    ///
    /// Returns `None` when the API sent no address.
    #[must_use]
    pub fn locality(&self) -> Option<String> {
        let address = self.address.as_ref()?;
        let mut line = address.district.clone();
        if let Some(city) = &self.city {
            line.push_str(", ");
            line.push_str(&city.city);
        }
        if let Some(country) = &self.country {
            line.push_str(", ");
            line.push_str(&country.country);
        }
        Some(line)
    }
}
