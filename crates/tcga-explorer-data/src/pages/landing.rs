//! Landing page: introduction plus dataset summary counts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tcga_explorer_common::Result;

use crate::cache::Dataset;
use crate::schema::CASE_ID;

use super::cancer_options;

pub const TITLE: &str = "Welcome to TCGA Explorer!";

pub const INTRO: &str = "The Cancer Genome Atlas (TCGA) is a public cancer database curated by the \
National Cancer Institute. It contains molecular data (genomic, epigenomic, transcriptomic and \
proteomic) for more than 20,000 primary cancer samples and matched normal tissue across 33 cancer \
types. That scale makes TCGA popular for cancer studies, and also hard to navigate. TCGA Explorer \
gives an overview of the clinical and family-history data spanning every sequenced sample, to help \
researchers survey which questions the data can answer and judge whether TCGA suits the questions \
they already have in mind.";

pub const DATA_PORTAL_URL: &str = "https://portal.gdc.cancer.gov/repository";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Distinct cases in the clinical export.
    pub cases: usize,
    pub clinical_rows: usize,
    pub family_history_rows: usize,
    pub joined_rows: usize,
    pub cancer_types: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingPage {
    pub title: String,
    pub intro: String,
    pub data_portal_url: String,
    pub summary: DatasetSummary,
}

pub fn build(dataset: &Dataset) -> Result<LandingPage> {
    let table = &dataset.table;
    let summary = DatasetSummary {
        cases: table.distinct(CASE_ID)?.len(),
        clinical_rows: dataset.clinical_rows,
        family_history_rows: dataset.family_history_rows,
        joined_rows: table.len(),
        cancer_types: cancer_options(table)?.len(),
        loaded_at: dataset.loaded_at,
    };
    Ok(LandingPage {
        title: TITLE.to_string(),
        intro: INTRO.to_string(),
        data_portal_url: DATA_PORTAL_URL.to_string(),
        summary,
    })
}
