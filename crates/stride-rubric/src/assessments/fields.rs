//! Field specifications shared between assessment types.
//!
//! All tables use the four-level scale excellent / good / average / poor.
//! Several scales overlap on purpose (a heart rate of 55 is "good", not
//! "average"); the earlier band always wins.

use crate::classify::ClassificationTable;
use crate::config::FieldSpec;

pub const EXCELLENT: &str = "#22c55e";
pub const GOOD: &str = "#3b82f6";
pub const AVERAGE: &str = "#f59e0b";
pub const POOR: &str = "#ef4444";

/// Build a four-level table from `(min, max)` bounds, best first.
pub fn graded(
    excellent: (f64, f64),
    good: (f64, f64),
    average: (f64, f64),
    poor: (f64, f64),
) -> ClassificationTable {
    ClassificationTable::new()
        .with_band("excellent", excellent.0, excellent.1, EXCELLENT)
        .with_band("good", good.0, good.1, GOOD)
        .with_band("average", average.0, average.1, AVERAGE)
        .with_band("poor", poor.0, poor.1, POOR)
}

/// Percentage score scale shared by the overall and posture scores.
fn percent_score() -> ClassificationTable {
    graded((85.0, 100.0), (70.0, 84.0), (50.0, 69.0), (0.0, 49.0))
}

pub fn overall_health_score() -> FieldSpec {
    FieldSpec::new("Overall Health Score", "accuracy", "%", percent_score())
}

pub fn heart_rate() -> FieldSpec {
    FieldSpec::new(
        "Heart Rate",
        "vitalsMap.vitals.heart_rate",
        "bpm",
        graded((60.0, 80.0), (50.0, 100.0), (40.0, 120.0), (0.0, 200.0)),
    )
}

pub fn bp_systolic() -> FieldSpec {
    FieldSpec::new(
        "Blood Pressure Systolic",
        "vitalsMap.vitals.bp_sys",
        "mmHg",
        graded((90.0, 120.0), (80.0, 140.0), (70.0, 160.0), (0.0, 300.0)),
    )
}

pub fn bp_diastolic() -> FieldSpec {
    FieldSpec::new(
        "Blood Pressure Diastolic",
        "vitalsMap.vitals.bp_dia",
        "mmHg",
        graded((60.0, 80.0), (50.0, 90.0), (40.0, 100.0), (0.0, 200.0)),
    )
}

pub fn oxygen_saturation() -> FieldSpec {
    FieldSpec::new(
        "Oxygen Saturation",
        "vitalsMap.vitals.oxy_sat_prcnt",
        "%",
        graded((95.0, 100.0), (90.0, 94.0), (85.0, 89.0), (0.0, 84.0)),
    )
}

pub fn wellness_score() -> FieldSpec {
    FieldSpec::new(
        "Wellness Score",
        "vitalsMap.wellness_score",
        "points",
        graded((80.0, 100.0), (65.0, 79.0), (50.0, 64.0), (0.0, 49.0)),
    )
}

pub fn vo2_max() -> FieldSpec {
    FieldSpec::new(
        "VO2 Max",
        "vitalsMap.metadata.physiological_scores.vo2max",
        "ml/kg/min",
        graded((50.0, 100.0), (40.0, 49.0), (30.0, 39.0), (0.0, 29.0)),
    )
}

pub fn cardiac_output() -> FieldSpec {
    FieldSpec::new(
        "Cardiac Output",
        "vitalsMap.metadata.cardiovascular.cardiac_out",
        "L/min",
        graded((5.0, 8.0), (4.0, 6.0), (3.0, 5.0), (0.0, 4.0)),
    )
}

pub fn stress_index() -> FieldSpec {
    FieldSpec::new(
        "Stress Index",
        "vitalsMap.metadata.heart_scores.stress_index",
        "index",
        graded((0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 10.0)),
    )
}

pub fn hrv_rmssd() -> FieldSpec {
    FieldSpec::new(
        "HRV (RMSSD)",
        "vitalsMap.metadata.heart_scores.rmssd",
        "ms",
        graded((40.0, 100.0), (25.0, 39.0), (15.0, 24.0), (0.0, 14.0)),
    )
}

/// Timed jog (exercise 235), first set.
pub fn jog_duration(label: &str) -> FieldSpec {
    FieldSpec::new(
        label,
        "exercises[?(@.id==235)].setList[0].time",
        "seconds",
        graded((60.0, 120.0), (45.0, 79.0), (30.0, 59.0), (0.0, 44.0)),
    )
}

pub fn squat_reps() -> FieldSpec {
    FieldSpec::new(
        "Squat Performance",
        "exercises[?(@.id==259)].correctReps",
        "reps",
        graded((35.0, 50.0), (25.0, 34.0), (15.0, 24.0), (0.0, 14.0)),
    )
}

pub fn posture_frontal() -> FieldSpec {
    FieldSpec::new(
        "Frontal View Score",
        "exercises[?(@.id==73)].analysisScore",
        "%",
        percent_score(),
    )
}

pub fn posture_side() -> FieldSpec {
    FieldSpec::new(
        "Side View Score",
        "exercises[?(@.id==74)].analysisScore",
        "%",
        percent_score(),
    )
}

pub fn bmi() -> FieldSpec {
    FieldSpec::new(
        "BMI",
        "bodyCompositionData.BMI",
        "kg/m²",
        graded((18.5, 24.9), (25.0, 29.9), (30.0, 34.9), (35.0, 100.0)),
    )
}

pub fn body_fat() -> FieldSpec {
    FieldSpec::new(
        "Body Fat Percentage",
        "bodyCompositionData.BFC",
        "%",
        graded((10.0, 20.0), (20.0, 25.0), (25.0, 30.0), (30.0, 50.0)),
    )
}

pub fn muscle_mass() -> FieldSpec {
    FieldSpec::new(
        "Muscle Mass",
        "bodyCompositionData.LM",
        "kg",
        graded((70.0, 100.0), (60.0, 79.0), (50.0, 69.0), (0.0, 49.0)),
    )
}
