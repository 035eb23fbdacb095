use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::collect_errors;
use crate::models::person::{PersonStatus, Sex};
use crate::utils::validation::{validate_not_empty, validate_not_future};

/// Ficha de persona para crear o reemplazar
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PersonRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[validate(length(max = 150))]
    pub birth_place: Option<String>,
    pub sex: Option<Sex>,
    #[validate(length(max = 100))]
    pub nationality: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub national_id: String,
    #[validate(length(max = 50))]
    pub passport_number: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(min = 6, max = 30))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub photo_id: Option<Uuid>,
    #[serde(default)]
    pub is_wanted: bool,
    #[serde(default)]
    pub status: PersonStatus,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

impl PersonRequest {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut extra = Vec::new();

        if let Err(e) = validate_not_empty(&self.national_id) {
            extra.push(("national_id", e));
        }
        if let Err(e) = validate_not_future(self.birth_date) {
            extra.push(("birth_date", e));
        }

        collect_errors(self.validate(), extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_person_defaults_and_validation() {
        let req: PersonRequest = serde_json::from_value(json!({
            "first_name": "Awa",
            "last_name": "Koné",
            "birth_date": "1990-05-04",
            "national_id": "CI0012345"
        }))
        .unwrap();
        assert!(!req.is_wanted);
        assert_eq!(req.status, PersonStatus::Active);
        assert!(req.check().is_ok());
    }

    #[test]
    fn test_blank_national_id_rejected() {
        let req: PersonRequest = serde_json::from_value(json!({
            "first_name": "Awa",
            "last_name": "Koné",
            "birth_date": "1990-05-04",
            "national_id": "   "
        }))
        .unwrap();
        assert!(req.check().unwrap_err().errors().contains_key("national_id"));
    }
}
