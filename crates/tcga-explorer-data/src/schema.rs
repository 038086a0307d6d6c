//! Column names of the GDC clinical and family-history exports, and of the
//! fields derived from them.

// ── Clinical ──────────────────────────────────────────────────────────────────

pub const PROJECT_ID: &str = "project_id";
pub const CASE_ID: &str = "case_id";
pub const PRIMARY_DIAGNOSIS: &str = "primary_diagnosis";
pub const ETHNICITY: &str = "ethnicity";
pub const GENDER: &str = "gender";
pub const RACE: &str = "race";
pub const VITAL_STATUS: &str = "vital_status";
pub const STAGE: &str = "stage";
pub const YEAR_OF_DIAGNOSIS: &str = "year_of_diagnosis";
pub const AGE_AT_DIAGNOSIS: &str = "age_at_diagnosis";
pub const YEAR_OF_BIRTH: &str = "year_of_birth";
pub const YEAR_OF_DEATH: &str = "year_of_death";
pub const SITE_OF_RESECTION_OR_BIOPSY: &str = "site_of_resection_or_biopsy";
pub const TISSUE_OR_ORGAN_OF_ORIGIN: &str = "tissue_or_organ_of_origin";
pub const TUMOR_GRADE: &str = "tumor_grade";
pub const DAYS_TO_DEATH: &str = "days_to_death";

/// Clinical columns kept after cleaning, in output order. `stage` is derived.
pub const CLINICAL_COLUMNS: [&str; 16] = [
    PROJECT_ID,
    CASE_ID,
    PRIMARY_DIAGNOSIS,
    ETHNICITY,
    GENDER,
    RACE,
    VITAL_STATUS,
    STAGE,
    YEAR_OF_DIAGNOSIS,
    AGE_AT_DIAGNOSIS,
    YEAR_OF_BIRTH,
    YEAR_OF_DEATH,
    SITE_OF_RESECTION_OR_BIOPSY,
    TISSUE_OR_ORGAN_OF_ORIGIN,
    TUMOR_GRADE,
    DAYS_TO_DEATH,
];

/// Staging systems whose vocabularies are not merged into `stage`.
pub const EXCLUDED_STAGE_COLUMNS: [&str; 2] = ["ajcc_clinical_stage", "ann_arbor_clinical_stage"];

// ── Family history ────────────────────────────────────────────────────────────

pub const RELATIONSHIP_GENDER: &str = "relationship_gender";
pub const RELATIONSHIP_PRIMARY_DIAGNOSIS: &str = "relationship_primary_diagnosis";
pub const RELATIONSHIP_TYPE: &str = "relationship_type";
pub const RELATIVE_WITH_CANCER_HISTORY: &str = "relative_with_cancer_history";

pub const FAMILY_HISTORY_COLUMNS: [&str; 6] = [
    CASE_ID,
    PROJECT_ID,
    RELATIONSHIP_GENDER,
    RELATIONSHIP_PRIMARY_DIAGNOSIS,
    RELATIONSHIP_TYPE,
    RELATIVE_WITH_CANCER_HISTORY,
];

/// Prefix given to family-history columns whose name collides with a
/// clinical column (`project_id` → `family_project_id`).
pub const FAMILY_COLLISION_PREFIX: &str = "family_";

// ── Joined / derived ──────────────────────────────────────────────────────────

/// Columns typed as numbers after the join.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    YEAR_OF_DIAGNOSIS,
    AGE_AT_DIAGNOSIS,
    YEAR_OF_BIRTH,
    YEAR_OF_DEATH,
    DAYS_TO_DEATH,
];

pub const AGE_AT_DIAGNOSIS_YEAR: &str = "age_at_diagnosis_year";
pub const AGE_OF_DEATH: &str = "age_of_death";
pub const AGE_GROUP: &str = "age_group";

pub const CLINICAL_TABLE: &str = "clinical";
pub const FAMILY_HISTORY_TABLE: &str = "family_history";
