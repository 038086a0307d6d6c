//! tcga-explorer-test-utils: TSV fixtures shaped like the GDC clinical and
//! family-history exports.
//!
//! Rows are given as `(column, value)` pairs; every column not named reads
//! as the export's `'--` sentinel.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;

pub const SENTINEL: &str = "'--";

/// Clinical export header: the analysed columns plus four staging systems.
pub const CLINICAL_HEADER: [&str; 19] = [
    "project_id",
    "case_id",
    "primary_diagnosis",
    "ethnicity",
    "gender",
    "race",
    "vital_status",
    "year_of_diagnosis",
    "age_at_diagnosis",
    "year_of_birth",
    "year_of_death",
    "site_of_resection_or_biopsy",
    "tissue_or_organ_of_origin",
    "tumor_grade",
    "days_to_death",
    "tumor_stage",
    "pathologic_stage",
    "ajcc_clinical_stage",
    "ann_arbor_clinical_stage",
];

/// Family-history export header, including a column the pipeline ignores.
pub const FAMILY_HISTORY_HEADER: [&str; 7] = [
    "case_id",
    "project_id",
    "relationship_age_at_diagnosis",
    "relationship_gender",
    "relationship_primary_diagnosis",
    "relationship_type",
    "relative_with_cancer_history",
];

/// Builds tab-separated content row by row.
#[derive(Debug, Clone)]
pub struct TsvBuilder {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TsvBuilder {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn clinical() -> Self {
        Self::new(&CLINICAL_HEADER)
    }

    pub fn family_history() -> Self {
        Self::new(&FAMILY_HISTORY_HEADER)
    }

    /// Add a row; unnamed columns get the sentinel.
    ///
    /// Panics on a column missing from the header.
    pub fn row(mut self, cells: &[(&str, &str)]) -> Self {
        for (column, _) in cells {
            assert!(
                self.header.iter().any(|h| h == column),
                "fixture column `{column}` is not in the header"
            );
        }
        let row = self
            .header
            .iter()
            .map(|h| {
                cells
                    .iter()
                    .find(|(c, _)| *c == h.as_str())
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_else(|| SENTINEL.to_string())
            })
            .collect();
        self.rows.push(row);
        self
    }

    pub fn build(&self) -> String {
        let mut out = self.header.join("\t");
        out.push('\n');
        for row in &self.rows {
            out.push_str(&row.join("\t"));
            out.push('\n');
        }
        out
    }
}

/// Six cases over four cancer types.
///
/// | case | tissue          | stage columns                        | age (days) |
/// |------|-----------------|--------------------------------------|------------|
/// | c1   | Lung, NOS       | tumor `Stage IIA`, ajcc `Stage IV`   | 21900      |
/// | c2   | Lung, NOS       | pathologic `Stage 1`                 | 18250      |
/// | c3   | Breast, NOS     | tumor + pathologic `Stage IIA`       | 16425      |
/// | c4   | Prostate gland  | tumor `Unknown`                      | 23725      |
/// | c5   | Bone marrow     | none                                 | 6935       |
/// | c6   | Lung, NOS       | tumor `III`                          | none       |
pub fn sample_clinical() -> String {
    TsvBuilder::clinical()
        .row(&[
            ("project_id", "TCGA-LUAD"),
            ("case_id", "c1"),
            ("primary_diagnosis", "Adenocarcinoma, NOS"),
            ("ethnicity", "not hispanic or latino"),
            ("gender", "male"),
            ("race", "white"),
            ("vital_status", "Dead"),
            ("year_of_diagnosis", "2010"),
            ("age_at_diagnosis", "21900"),
            ("year_of_birth", "1950"),
            ("year_of_death", "2012"),
            ("site_of_resection_or_biopsy", "Lung, NOS"),
            ("tissue_or_organ_of_origin", "Lung, NOS"),
            ("tumor_grade", "Not Reported"),
            ("days_to_death", "700"),
            ("tumor_stage", "Stage IIA"),
            ("ajcc_clinical_stage", "Stage IV"),
        ])
        .row(&[
            ("project_id", "TCGA-LUAD"),
            ("case_id", "c2"),
            ("primary_diagnosis", "Adenocarcinoma, NOS"),
            ("ethnicity", "hispanic or latino"),
            ("gender", "female"),
            ("race", "white"),
            ("vital_status", "Alive"),
            ("year_of_diagnosis", "2011"),
            ("age_at_diagnosis", "18250"),
            ("year_of_birth", "1961"),
            ("site_of_resection_or_biopsy", "Lung, NOS"),
            ("tissue_or_organ_of_origin", "Lung, NOS"),
            ("tumor_grade", "Not Reported"),
            ("pathologic_stage", "Stage 1"),
        ])
        .row(&[
            ("project_id", "TCGA-BRCA"),
            ("case_id", "c3"),
            ("primary_diagnosis", "Infiltrating duct carcinoma, NOS"),
            ("ethnicity", "not hispanic or latino"),
            ("gender", "female"),
            ("race", "black or african american"),
            ("vital_status", "Dead"),
            ("year_of_diagnosis", "2010"),
            ("age_at_diagnosis", "16425"),
            ("year_of_birth", "1965"),
            ("year_of_death", "2015"),
            ("site_of_resection_or_biopsy", "Breast, NOS"),
            ("tissue_or_organ_of_origin", "Breast, NOS"),
            ("tumor_grade", "Not Reported"),
            ("days_to_death", "1800"),
            ("tumor_stage", "Stage IIA"),
            ("pathologic_stage", "Stage IIA"),
        ])
        .row(&[
            ("project_id", "TCGA-PRAD"),
            ("case_id", "c4"),
            ("primary_diagnosis", "Adenocarcinoma, NOS"),
            ("ethnicity", "not reported"),
            ("gender", "male"),
            ("race", "asian"),
            ("vital_status", "Alive"),
            ("year_of_diagnosis", "2012"),
            ("age_at_diagnosis", "23725"),
            ("year_of_birth", "1947"),
            ("site_of_resection_or_biopsy", "Prostate gland"),
            ("tissue_or_organ_of_origin", "Prostate gland"),
            ("tumor_grade", "Not Reported"),
            ("tumor_stage", "Unknown"),
        ])
        .row(&[
            ("project_id", "TCGA-LAML"),
            ("case_id", "c5"),
            ("primary_diagnosis", "Acute myeloid leukemia, NOS"),
            ("ethnicity", "not hispanic or latino"),
            ("gender", "male"),
            ("race", "white"),
            ("vital_status", "Alive"),
            ("year_of_diagnosis", "2009"),
            ("age_at_diagnosis", "6935"),
            ("year_of_birth", "1990"),
            ("site_of_resection_or_biopsy", "Bone marrow"),
            ("tissue_or_organ_of_origin", "Bone marrow"),
        ])
        .row(&[
            ("project_id", "TCGA-LUSC"),
            ("case_id", "c6"),
            ("primary_diagnosis", "Squamous cell carcinoma, NOS"),
            ("ethnicity", "not hispanic or latino"),
            ("gender", "male"),
            ("race", "white"),
            ("vital_status", "Alive"),
            ("year_of_diagnosis", "2012"),
            ("site_of_resection_or_biopsy", "Lung, NOS"),
            ("tissue_or_organ_of_origin", "Lung, NOS"),
            ("tumor_stage", "III"),
        ])
        .build()
}

/// Four relatives: one for c1, two for c3, one for c4.
pub fn sample_family_history() -> String {
    TsvBuilder::family_history()
        .row(&[
            ("case_id", "c1"),
            ("project_id", "TCGA-LUAD"),
            ("relationship_gender", "female"),
            ("relationship_primary_diagnosis", "Breast, NOS"),
            ("relationship_type", "Mother"),
            ("relative_with_cancer_history", "yes"),
        ])
        .row(&[
            ("case_id", "c3"),
            ("project_id", "TCGA-BRCA"),
            ("relationship_gender", "female"),
            ("relationship_primary_diagnosis", "Ovary, NOS"),
            ("relationship_type", "Sister"),
            ("relative_with_cancer_history", "yes"),
        ])
        .row(&[
            ("case_id", "c3"),
            ("project_id", "TCGA-BRCA"),
            ("relationship_gender", "male"),
            ("relationship_type", "Father"),
            ("relative_with_cancer_history", "no"),
        ])
        .row(&[
            ("case_id", "c4"),
            ("project_id", "TCGA-PRAD"),
            ("relationship_gender", "male"),
            ("relationship_primary_diagnosis", "Prostate gland"),
            ("relationship_type", "Brother"),
            ("relative_with_cancer_history", "yes"),
        ])
        .build()
}

/// The two exports written into a temporary directory that lives as long
/// as this value.
pub struct FixtureDir {
    dir: TempDir,
    pub clinical: PathBuf,
    pub family_history: PathBuf,
}

impl FixtureDir {
    pub fn write(clinical: &str, family_history: &str) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir().context("Failed to create fixture directory")?;
        let clinical_path = dir.path().join("clinical.tsv");
        let family_path = dir.path().join("family_history.tsv");
        std::fs::write(&clinical_path, clinical)
            .with_context(|| format!("Failed to write {}", clinical_path.display()))?;
        std::fs::write(&family_path, family_history)
            .with_context(|| format!("Failed to write {}", family_path.display()))?;
        Ok(Self {
            dir,
            clinical: clinical_path,
            family_history: family_path,
        })
    }

    pub fn sample() -> anyhow::Result<Self> {
        Self::write(&sample_clinical(), &sample_family_history())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Replace the clinical export in place.
    pub fn rewrite_clinical(&self, content: &str) -> anyhow::Result<()> {
        std::fs::write(&self.clinical, content)
            .with_context(|| format!("Failed to write {}", self.clinical.display()))
    }
}
