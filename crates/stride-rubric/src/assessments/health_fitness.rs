use crate::config::{AssessmentConfig, Section};

use super::fields;

pub const ID: &str = "as_hr_02";

/// Health & Fitness Assessment: vitals, heart health, stress, fitness,
/// posture and body composition.
pub fn config() -> AssessmentConfig {
    AssessmentConfig {
        name: "Health & Fitness Assessment".to_string(),
        template: "health-fitness".to_string(),
        sections: vec![
            Section::new(
                "key_vitals",
                "Key Body Vitals",
                vec![
                    fields::overall_health_score(),
                    fields::heart_rate(),
                    fields::bp_systolic(),
                    fields::bp_diastolic(),
                    fields::oxygen_saturation(),
                ],
            ),
            Section::new(
                "heart_health",
                "Heart Health",
                vec![
                    fields::wellness_score(),
                    fields::vo2_max(),
                    fields::cardiac_output(),
                ],
            ),
            Section::new(
                "stress_level",
                "Stress Level",
                vec![fields::stress_index(), fields::hrv_rmssd()],
            ),
            Section::new(
                "fitness_levels",
                "Fitness Levels",
                vec![
                    fields::jog_duration("Cardiovascular Endurance"),
                    fields::squat_reps(),
                ],
            ),
            Section::new(
                "posture",
                "Posture Analysis",
                vec![fields::posture_frontal(), fields::posture_side()],
            ),
            Section::new(
                "body_composition",
                "Body Composition",
                vec![fields::bmi(), fields::body_fat(), fields::muscle_mass()],
            ),
        ],
    }
}
