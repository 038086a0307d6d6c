//! "Explore a specific cancer" page.

use serde::Serialize;
use tcga_explorer_common::Result;
use tracing::debug;

use crate::derive::{drop_unknown_age_groups, with_age_at_diagnosis_year, with_age_group, AgeGroup};
use crate::schema::{AGE_AT_DIAGNOSIS, AGE_GROUP, ETHNICITY, GENDER, STAGE, TISSUE_OR_ORGAN_OF_ORIGIN};
use crate::selection::{LinkedSelection, Selection};
use crate::table::{Table, Value};

use super::cancer_options;
use super::chart::{Aggregate, ChartSpec, Encoding, Mark, Section};

pub const GENDER_STAGE_PARAM: &str = "gender_stage";
pub const ETHNICITY_STAGE_PARAM: &str = "ethnicity_stage";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecificParams {
    /// Cancer type to drill into. `None` picks the first option.
    pub cancer: Option<String>,
    /// Stage picked on the stage-by-gender chart.
    pub gender_stage: Selection,
    /// Stage picked on the stage-by-ethnicity chart.
    pub ethnicity_stage: Selection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificPage {
    pub options: Vec<String>,
    /// `None` only when the dataset offers no cancer type at all.
    pub cancer: Option<String>,
    pub sections: Vec<Section>,
}

impl SpecificPage {
    pub fn chart(&self, id: &str) -> Option<&ChartSpec> {
        self.sections.iter().find_map(|s| s.chart(id))
    }
}

/// Stage, ethnicity, gender and age group of every complete case of one
/// cancer type, with unknown age groups removed.
pub fn stage_table(table: &Table, cancer: &str) -> Result<Table> {
    let subset = table
        .restrict_to(TISSUE_OR_ORGAN_OF_ORIGIN, &[Value::text(cancer)])?
        .project(&[STAGE, ETHNICITY, GENDER, AGE_AT_DIAGNOSIS])?;
    let derived = with_age_group(&with_age_at_diagnosis_year(&subset)).drop_missing();
    drop_unknown_age_groups(&derived)
}

fn age_group_axis() -> Encoding {
    Encoding::ordinal(AGE_GROUP, "Age group").order(AgeGroup::ordered().iter().map(|g| g.label()))
}

/// Stage-by-`breakdown` driver chart linked to an age-group-by-`breakdown`
/// dependent chart.
fn stage_pair(
    data: &Table,
    param: &str,
    breakdown: &str,
    breakdown_title: &str,
    selection: &Selection,
) -> Result<Vec<ChartSpec>> {
    let filtered = LinkedSelection::with_selection(STAGE, selection.clone()).apply(data)?;

    let stages = ChartSpec::new(
        &format!("stage_by_{breakdown}"),
        &format!("Cancer stage by {}", breakdown_title.to_lowercase()),
        Mark::Bar,
        Encoding::ordinal(STAGE, "Cancer stage"),
        Encoding::count("Count"),
        data.clone(),
    )
    .color(Encoding::nominal(breakdown, breakdown_title))
    .tooltip(vec![
        Encoding::ordinal(STAGE, "Cancer stage"),
        Encoding::nominal(breakdown, breakdown_title),
        Encoding::count("Count"),
    ])
    .driver(param, STAGE, selection);

    let ages = ChartSpec::new(
        &format!("age_group_by_{breakdown}"),
        &format!("Age group at diagnosis by {}", breakdown_title.to_lowercase()),
        Mark::Bar,
        age_group_axis(),
        Encoding::count("Count"),
        filtered,
    )
    .color(Encoding::nominal(breakdown, breakdown_title))
    .tooltip(vec![
        Encoding::ordinal(AGE_GROUP, "Age group"),
        Encoding::nominal(breakdown, breakdown_title),
        Encoding::nominal(breakdown, "Count").aggregate(Aggregate::Count),
    ])
    .dependent(param, STAGE, selection);

    Ok(vec![stages, ages])
}

pub fn build(table: &Table, params: &SpecificParams) -> Result<SpecificPage> {
    let options = cancer_options(table)?;
    let cancer = params.cancer.clone().or_else(|| options.first().cloned());
    debug!(cancer = ?cancer, "Building specific-cancer page");

    let data = match &cancer {
        Some(c) => stage_table(table, c)?,
        None => Table::new([STAGE, ETHNICITY, GENDER, AGE_AT_DIAGNOSIS]),
    };

    let sections = vec![
        Section::new(
            "Explore Cancer Stage Across Ethnicities and Gender",
            stage_pair(&data, GENDER_STAGE_PARAM, GENDER, "Gender", &params.gender_stage)?,
        ),
        Section::new(
            "Explore Age of Diagnosis Across Ethnicities and Gender",
            stage_pair(&data, ETHNICITY_STAGE_PARAM, ETHNICITY, "Ethnicity", &params.ethnicity_stage)?,
        ),
    ];

    Ok(SpecificPage {
        options,
        cancer,
        sections,
    })
}
