use crate::config::{AssessmentConfig, Section};

use super::fields;

pub const ID: &str = "as_card_01";

/// Cardiac Assessment: vitals, cardiovascular endurance and body composition.
pub fn config() -> AssessmentConfig {
    AssessmentConfig {
        name: "Cardiac Assessment".to_string(),
        template: "cardiac".to_string(),
        sections: vec![
            Section::new(
                "key_vitals",
                "Key Body Vitals",
                vec![
                    fields::overall_health_score(),
                    fields::heart_rate(),
                    fields::bp_systolic(),
                    fields::bp_diastolic(),
                ],
            ),
            Section::new(
                "cardiovascular_endurance",
                "Cardiovascular Endurance",
                vec![
                    fields::jog_duration("Jog Test Duration"),
                    fields::cardiac_output(),
                    fields::vo2_max(),
                ],
            ),
            Section::new(
                "body_composition",
                "Body Composition",
                vec![fields::bmi(), fields::body_fat()],
            ),
        ],
    }
}
