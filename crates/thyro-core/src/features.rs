//! Clinical field names shared by the forms, the scorer and the prediction API.
//!
//! [`ALL`] lists the first-visit features followed by the post-treatment ones,
//! which is the column order the prediction models were trained on.

/// Field names used across forms, stored patient data and prediction requests.
pub mod field {
    pub const PATIENT_NAME: &str = "patient_name";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";

    pub const AGE_ONSET: &str = "age_onset";
    pub const HEREDITY: &str = "heredity";
    pub const SMOKING_STATUS: &str = "smoking_status";
    pub const SEX: &str = "sex";
    pub const US1_THYROID_VOLUME: &str = "us1_thyroid_volume";
    pub const US1_NODULES: &str = "us1_nodules";
    pub const US1_NODULES_CM: &str = "us1_nodules_cm";
    pub const TSH_1: &str = "tsh_1";
    pub const FT4_1: &str = "ft4_1";
    pub const FT3_1: &str = "ft3_1";
    pub const FT3_TO_FT4_RATIO: &str = "ft3_to_ft4_ratio";
    pub const EXOPHTHALMOS: &str = "exophthalmos";
    pub const THYROTOXIC_CARDIOMYOPATHY: &str = "thyrotoxic_cardiomyopathy";

    pub const TREATMENT_TYPE: &str = "treatment_type";
    pub const TSH_3: &str = "tsh_3";
    pub const US3_THYROID_VOLUME: &str = "us3_thyroid_volume";
    pub const US3_NODULES: &str = "us3_nodules";
    pub const US3_NODULES_CM: &str = "us3_nodules_cm";

    pub const NOTES: &str = "notes";
}

use field::*;

/// All 18 features in model order.
pub const ALL: [&str; 18] = [
    AGE_ONSET,
    HEREDITY,
    SMOKING_STATUS,
    SEX,
    US1_THYROID_VOLUME,
    US1_NODULES,
    US1_NODULES_CM,
    TSH_1,
    FT4_1,
    FT3_1,
    FT3_TO_FT4_RATIO,
    EXOPHTHALMOS,
    THYROTOXIC_CARDIOMYOPATHY,
    TREATMENT_TYPE,
    TSH_3,
    US3_THYROID_VOLUME,
    US3_NODULES,
    US3_NODULES_CM,
];

/// Any of these being present means the patient has follow-up data.
pub const FOLLOW_UP_MARKERS: [&str; 3] = [TREATMENT_TYPE, TSH_3, US3_THYROID_VOLUME];

/// Human-readable name of a feature for result tables.
pub fn display_name(name: &str) -> &str {
    match name {
        AGE_ONSET => "Age at onset",
        HEREDITY => "Hereditary predisposition",
        SMOKING_STATUS => "Smoking",
        SEX => "Sex",
        US1_THYROID_VOLUME => "Thyroid volume (US1)",
        US1_NODULES => "Nodules (US1)",
        US1_NODULES_CM => "Nodule size (US1)",
        TSH_1 => "TSH level 1",
        FT4_1 => "FT4 level 1",
        FT3_1 => "FT3 level 1",
        FT3_TO_FT4_RATIO => "FT3/FT4 ratio",
        EXOPHTHALMOS => "Exophthalmos",
        THYROTOXIC_CARDIOMYOPATHY => "Thyrotoxic cardiomyopathy",
        TREATMENT_TYPE => "Treatment type",
        TSH_3 => "TSH level 3",
        US3_THYROID_VOLUME => "Thyroid volume (US3)",
        US3_NODULES => "Nodules (US3)",
        US3_NODULES_CM => "Nodule size (US3)",
        other => other,
    }
}
