use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::Report, validation::require_non_blank};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitReportRequest {
    pub product_id: String,
    pub product_name: String,
    pub product_description: String,
}

impl SubmitReportRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_blank("product_id", &self.product_id)?;
        require_non_blank("product_name", &self.product_name)?;
        require_non_blank("product_description", &self.product_description)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportWithReporter {
    #[serde(flatten)]
    pub report: Report,
    pub reporter_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportList<T> {
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_is_required() {
        let ok = SubmitReportRequest {
            product_id: "anything-even-unknown".into(),
            product_name: "Fake watch".into(),
            product_description: "Logo misprinted".into(),
        };
        assert!(ok.validate().is_ok());

        let missing = SubmitReportRequest {
            product_description: " ".into(),
            ..ok
        };
        assert!(missing.validate().is_err());
    }
}
