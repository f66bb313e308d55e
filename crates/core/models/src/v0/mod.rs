mod comments;
mod likes;
mod messages;
mod notifications;
mod posts;
mod predictions;
mod reports;
mod statuses;
mod users;

pub use comments::*;
pub use likes::*;
pub use messages::*;
pub use notifications::*;
pub use posts::*;
pub use predictions::*;
pub use reports::*;
pub use statuses::*;
pub use users::*;

#[cfg(feature = "validator")]
use validator::ValidationError;

/// Success envelope wrapped around every successful response
// Derives written out (not via `auto_derived!`) because utoipa's ToSchema
// derive on generic structs breaks under macro_rules hygiene.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Always `true`
    pub success: bool,
    /// Optional human readable note
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
    /// Payload
    pub data: T,
}

auto_derived!(
    /// Page selection, `page` starts at 1
    #[derive(Default, Copy, Eq)]
    #[cfg_attr(feature = "utoipa", derive(utoipa::IntoParams))]
    #[cfg_attr(feature = "utoipa", into_params(parameter_in = Query))]
    pub struct OptionsPagination {
        /// Page number, starting at 1
        pub page: Option<i64>,
        /// Items per page
        pub limit: Option<i64>,
    }
);

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

#[cfg(feature = "validator")]
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

#[cfg(feature = "validator")]
pub(crate) fn validate_coordinates(value: &[f64]) -> Result<(), ValidationError> {
    match value {
        [lon, lat] if (-180.0..=180.0).contains(lon) && (-90.0..=90.0).contains(lat) => Ok(()),
        _ => Err(ValidationError::new("coordinates")),
    }
}

#[cfg(feature = "validator")]
pub(crate) fn validate_urls(value: &[String]) -> Result<(), ValidationError> {
    if value
        .iter()
        .all(|url| url.starts_with("https://") || url.starts_with("http://"))
    {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}
