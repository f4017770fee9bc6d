use launchkit_utils::error::ValidationError;
use serde::{Deserialize, Serialize};

/// The user's product brief, the input to market analysis.
///
/// Every field deserializes to empty when absent so that a missing required
/// field is reported by [`UserBrief::validate`] rather than as a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserBrief {
    pub product_name: String,
    pub product_description: String,
    pub usp: String,
    pub brand_voice: String,
    pub target_location: String,
    pub competitors: String,
    pub launch_objective: String,
    pub customer_hypothesis: String,
}

impl UserBrief {
    /// Check that the fields required to start a run are not blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("productName", &self.product_name),
            ("productDescription", &self.product_description),
            ("usp", &self.usp),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ValidationError::MissingBriefField { field: *field }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use proptest::prelude::*;

    const REQUIRED: [&str; 3] = ["productName", "productDescription", "usp"];

    fn proptest_config(default_cases: u32) -> ProptestConfig {
        let cases = std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_cases);
        ProptestConfig::with_cases(cases)
    }

    #[test]
    fn test_sample_brief_is_valid() {
        assert!(fixtures::sample_brief().validate().is_ok());
    }

    #[test]
    fn test_first_blank_required_field_reported() {
        let mut brief = fixtures::sample_brief();
        brief.product_description = "  ".to_string();
        brief.usp.clear();
        assert_eq!(
            brief.validate(),
            Err(ValidationError::MissingBriefField {
                field: "productDescription"
            })
        );
    }

    #[test]
    fn test_optional_fields_may_be_blank_or_absent() {
        let brief: UserBrief = serde_json::from_str(
            r#"{"productName":"EcoBottle","productDescription":"Smart bottle","usp":"Ocean plastic"}"#,
        )
        .unwrap();
        assert!(brief.brand_voice.is_empty());
        assert!(brief.validate().is_ok());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(fixtures::sample_brief()).unwrap();
        assert!(json.get("productName").is_some());
        assert!(json.get("customerHypothesis").is_some());
        assert!(json.get("product_name").is_none());
    }

    #[test]
    fn test_missing_required_key_is_a_validation_error() {
        let brief: UserBrief =
            serde_json::from_str(r#"{"productDescription":"Smart bottle","usp":"Ocean plastic"}"#)
                .unwrap();
        assert_eq!(
            brief.validate(),
            Err(ValidationError::MissingBriefField {
                field: "productName"
            })
        );
    }

    proptest! {
        #![proptest_config(proptest_config(64))]

        /// Any mix of present, blank and absent required keys parses, and
        /// validation names the first one that is not filled in.
        #[test]
        fn prop_validate_reports_first_unfilled_field(
            states in proptest::array::uniform3(0u8..3),
            filler in "[A-Za-z][A-Za-z ]{0,12}",
        ) {
            let mut object = serde_json::Map::new();
            for (key, state) in REQUIRED.iter().zip(states) {
                match state {
                    0 => {}
                    1 => {
                        object.insert((*key).to_string(), serde_json::Value::from("   "));
                    }
                    _ => {
                        object.insert((*key).to_string(), serde_json::Value::from(filler.clone()));
                    }
                }
            }

            let brief: UserBrief = serde_json::from_value(serde_json::Value::Object(object)).unwrap();
            let expected = REQUIRED
                .iter()
                .zip(states)
                .find(|(_, state)| *state < 2)
                .map(|(field, _)| ValidationError::MissingBriefField { field: *field });
            match expected {
                Some(err) => prop_assert_eq!(brief.validate(), Err(err)),
                None => prop_assert!(brief.validate().is_ok()),
            }
        }
    }
}
