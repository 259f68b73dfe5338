//! Saloon record model and the request bodies that create or change it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{messages, AppError};

/// Status given to every newly registered saloon.
pub const DEFAULT_STATUS: &str = "Live";

/// A registered saloon account.
///
/// Setup data is flattened into the same JSON object once attached, so a
/// configured saloon serializes as a single flat record. Reading one back
/// goes through [`StoredSaloon`] so a malformed setup is an error instead of
/// being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredSaloon")]
pub struct Saloon {
    pub saloon_id: String,
    pub saloon_name: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    pub status: String,
    #[serde(flatten)]
    pub setup: Option<SaloonSetup>,
}

/// Location and opening-hours data attached after registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaloonSetup {
    #[serde(default)]
    pub facebook_link: String,
    pub geo_location: String,
    pub address: String,
    pub district: String,
    pub city: String,
    pub open_hours: Vec<Value>,
}

/// Wire keys owned by [`SaloonSetup`].
const SETUP_KEYS: [&str; 6] = [
    "facebookLink",
    "geoLocation",
    "address",
    "district",
    "city",
    "openHours",
];

/// Saloon as stored, with every non-base key collected for setup parsing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSaloon {
    saloon_id: String,
    saloon_name: String,
    email: String,
    contact: String,
    password: String,
    status: String,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl TryFrom<StoredSaloon> for Saloon {
    type Error = serde_json::Error;

    /// No setup keys means registered; any setup key means the whole setup must parse.
    fn try_from(stored: StoredSaloon) -> Result<Self, Self::Error> {
        let setup_fields: Map<String, Value> = stored
            .rest
            .into_iter()
            .filter(|(key, _)| SETUP_KEYS.contains(&key.as_str()))
            .collect();
        let setup = if setup_fields.is_empty() {
            None
        } else {
            Some(serde_json::from_value(Value::Object(setup_fields))?)
        };

        Ok(Saloon {
            saloon_id: stored.saloon_id,
            saloon_name: stored.saloon_name,
            email: stored.email,
            contact: stored.contact,
            password: stored.password,
            status: stored.status,
            setup,
        })
    }
}

/// Validated fields for a new saloon.
#[derive(Debug, Clone)]
pub struct NewSaloon {
    pub saloon_name: String,
    pub email: String,
    pub contact: String,
    pub password: String,
}

/// Validated replacement for the five base fields of a saloon.
#[derive(Debug, Clone)]
pub struct SaloonUpdate {
    pub saloon_name: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    pub status: String,
}

/// Request body for `POST /createSaloon`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaloonRequest {
    #[serde(default)]
    pub saloon_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CreateSaloonRequest {
    pub fn validate(self) -> Result<NewSaloon, AppError> {
        Ok(NewSaloon {
            saloon_name: required(self.saloon_name, "saloonName")?,
            email: required(self.email, "email")?,
            contact: required(self.contact, "contact")?,
            password: required(self.password, "password")?,
        })
    }
}

/// Request body for `PUT /editSaloon/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaloonRequest {
    #[serde(default)]
    pub saloon_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpdateSaloonRequest {
    pub fn validate(self) -> Result<SaloonUpdate, AppError> {
        Ok(SaloonUpdate {
            saloon_name: required(self.saloon_name, "saloonName")?,
            email: required(self.email, "email")?,
            contact: required(self.contact, "contact")?,
            password: required(self.password, "password")?,
            status: required(self.status, "status")?,
        })
    }
}

/// Request body for `POST /loginSaloon`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns the `(email, password)` pair.
    pub fn validate(self) -> Result<(String, String), AppError> {
        let login_field = |value: Option<String>, field: &'static str| {
            required(value, field).map_err(|_| AppError::Validation {
                message: messages::LOGIN_FIELDS_REQUIRED,
                field,
            })
        };
        Ok((
            login_field(self.email, "email")?,
            login_field(self.password, "password")?,
        ))
    }
}

/// Request body for `POST /createSaloonSetup`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaloonSetupRequest {
    #[serde(default)]
    pub saloon_id: Option<String>,
    #[serde(default)]
    pub facebook_link: Option<String>,
    #[serde(default)]
    pub geo_location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Kept untyped so a non-array value is reported as a validation error.
    #[serde(default)]
    pub open_hours: Option<Value>,
}

impl SaloonSetupRequest {
    /// Returns the target saloon id together with the setup to attach.
    pub fn validate(self) -> Result<(String, SaloonSetup), AppError> {
        let saloon_id = required(self.saloon_id, "saloonId")?;
        let geo_location = required(self.geo_location, "geoLocation")?;
        let address = required(self.address, "address")?;
        let district = required(self.district, "district")?;
        let city = required(self.city, "city")?;
        let open_hours = match self.open_hours {
            Some(Value::Array(entries)) => entries,
            _ => return Err(AppError::missing("openHours")),
        };

        Ok((
            saloon_id,
            SaloonSetup {
                facebook_link: self.facebook_link.unwrap_or_default(),
                geo_location,
                address,
                district,
                city,
                open_hours,
            },
        ))
    }
}

/// Missing and blank values are treated the same.
fn required(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::missing(field)),
    }
}
