//! Query parameter types.

use serde::Deserialize;
use validator::Validate;

use super::validation::validate_mobile_number;

/// `?mobileNumber=` query parameter used by create, fetch and delete endpoints.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MobileNumberParams {
    #[validate(custom(function = "validate_mobile_number"))]
    pub mobile_number: String,
}
