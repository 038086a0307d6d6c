//! "Overview of all cancers" page.
//!
//! Four sections. The first three follow the cancer-type multi-select; the
//! family-history section always covers every cancer type.

use serde::Serialize;
use tcga_explorer_common::Result;
use tracing::debug;

use crate::derive::{with_age_at_diagnosis_year, with_age_of_death};
use crate::schema::{
    AGE_AT_DIAGNOSIS, AGE_AT_DIAGNOSIS_YEAR, AGE_OF_DEATH, CASE_ID, ETHNICITY, GENDER,
    PRIMARY_DIAGNOSIS, RELATIONSHIP_GENDER, RELATIONSHIP_PRIMARY_DIAGNOSIS, RELATIONSHIP_TYPE,
    RELATIVE_WITH_CANCER_HISTORY, TISSUE_OR_ORGAN_OF_ORIGIN, YEAR_OF_BIRTH, YEAR_OF_DEATH,
    YEAR_OF_DIAGNOSIS,
};
use crate::selection::{LinkedSelection, Selection};
use crate::table::{Table, Value};

use super::cancer_options;
use super::chart::{Aggregate, ChartSpec, Encoding, Mark, Section};

pub const AGE_TREND_PARAM: &str = "age_trend";
pub const FAMILY_PARAM: &str = "family";

const SITE_TITLE: &str = "Site of cancer origin";
const YEAR_TITLE: &str = "Year of diagnosis";
const AGE_TITLE: &str = "Age at diagnosis";

/// Widget and chart-selection inputs of the overview page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewParams {
    /// Selected cancer types. `None` means the configured defaults.
    pub cancers: Option<Vec<String>>,
    /// Tissue picked on the mean-age line chart.
    pub age_trend: Selection,
    /// Tissue picked on the family-history bar chart.
    pub family: Selection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewPage {
    /// Every cancer type the multi-select offers.
    pub options: Vec<String>,
    /// The cancer types the first three sections are restricted to.
    pub cancers: Vec<String>,
    pub sections: Vec<Section>,
}

impl OverviewPage {
    pub fn chart(&self, id: &str) -> Option<&ChartSpec> {
        self.sections.iter().find_map(|s| s.chart(id))
    }
}

/// Defaults present in the data, in the configured order.
pub fn default_selection(options: &[String], defaults: &[String]) -> Vec<String> {
    defaults
        .iter()
        .filter(|d| options.contains(*d))
        .cloned()
        .collect()
}

fn selected_cancers(table: &Table, cancers: &[String]) -> Result<Table> {
    let values: Vec<Value> = cancers.iter().map(|c| Value::text(c.as_str())).collect();
    table.restrict_to(TISSUE_OR_ORGAN_OF_ORIGIN, &values)
}

/// Rows behind the diagnoses-per-year and diagnoses-per-cancer charts.
pub fn diagnoses_table(table: &Table, cancers: &[String]) -> Result<Table> {
    Ok(selected_cancers(table, cancers)?
        .project(&[
            YEAR_OF_DIAGNOSIS,
            PRIMARY_DIAGNOSIS,
            CASE_ID,
            TISSUE_OR_ORGAN_OF_ORIGIN,
            GENDER,
        ])?
        .drop_missing())
}

/// Rows behind the age-at-diagnosis trend charts.
pub fn age_trend_table(table: &Table, cancers: &[String]) -> Result<Table> {
    let subset = selected_cancers(table, cancers)?.project(&[
        YEAR_OF_DIAGNOSIS,
        AGE_AT_DIAGNOSIS,
        TISSUE_OR_ORGAN_OF_ORIGIN,
        GENDER,
    ])?;
    Ok(with_age_at_diagnosis_year(&subset).drop_missing())
}

/// Rows behind the age-of-death versus age-at-diagnosis charts.
pub fn death_age_table(table: &Table, cancers: &[String]) -> Result<Table> {
    let subset = selected_cancers(table, cancers)?.project(&[
        YEAR_OF_DIAGNOSIS,
        AGE_AT_DIAGNOSIS,
        TISSUE_OR_ORGAN_OF_ORIGIN,
        YEAR_OF_DEATH,
        YEAR_OF_BIRTH,
    ])?;
    Ok(with_age_at_diagnosis_year(&with_age_of_death(&subset)).drop_missing())
}

/// Rows behind the family-history charts, over every cancer type. A missing
/// history flag counts as "no relative with cancer".
pub fn family_history_table(table: &Table) -> Result<Table> {
    Ok(table
        .project(&[
            TISSUE_OR_ORGAN_OF_ORIGIN,
            GENDER,
            ETHNICITY,
            RELATIVE_WITH_CANCER_HISTORY,
            RELATIONSHIP_TYPE,
            RELATIONSHIP_PRIMARY_DIAGNOSIS,
            RELATIONSHIP_GENDER,
        ])?
        .fill_absent(RELATIVE_WITH_CANCER_HISTORY, Value::Number(0.0))?
        .drop_missing())
}

fn diagnoses_section(data: Table) -> Section {
    let per_year = ChartSpec::new(
        "diagnoses_per_year",
        "Number of diagnoses per year",
        Mark::Line,
        Encoding::ordinal(YEAR_OF_DIAGNOSIS, YEAR_TITLE),
        Encoding::count("Count of records"),
        data.clone(),
    )
    .color(Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE))
    .tooltip(vec![
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, "Tissue or organ of origin"),
        Encoding::ordinal(YEAR_OF_DIAGNOSIS, YEAR_TITLE),
        Encoding::ordinal(YEAR_OF_DIAGNOSIS, "Count").aggregate(Aggregate::Count),
    ]);

    let per_cancer = ChartSpec::new(
        "diagnoses_per_cancer",
        "Number of diagnoses per cancer type",
        Mark::Bar,
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE).sort_descending(),
        Encoding::count("Count of records"),
        data,
    )
    .color(Encoding::nominal(GENDER, "Gender"))
    .tooltip(vec![
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE),
        Encoding::nominal(GENDER, "Gender"),
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, "Count of records").aggregate(Aggregate::Count),
    ]);

    Section::new(
        "Explore Trends in the Number of Diagnosis Across Years",
        vec![per_year, per_cancer],
    )
}

fn age_trend_section(data: Table, selection: &Selection) -> Result<Section> {
    let link = LinkedSelection::with_selection(TISSUE_OR_ORGAN_OF_ORIGIN, selection.clone());
    let filtered = link.apply(&data)?;

    let mean_age = ChartSpec::new(
        "mean_age_per_year",
        "Mean age at diagnosis per year",
        Mark::Line,
        Encoding::ordinal(YEAR_OF_DIAGNOSIS, YEAR_TITLE),
        Encoding::quantitative(AGE_AT_DIAGNOSIS_YEAR, AGE_TITLE).aggregate(Aggregate::Mean),
        data,
    )
    .color(Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE))
    .tooltip(vec![
        Encoding::ordinal(YEAR_OF_DIAGNOSIS, YEAR_TITLE),
        Encoding::quantitative(AGE_AT_DIAGNOSIS_YEAR, AGE_TITLE).aggregate(Aggregate::Mean),
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE),
    ])
    .driver(AGE_TREND_PARAM, TISSUE_OR_ORGAN_OF_ORIGIN, selection);

    let distribution = ChartSpec::new(
        "age_distribution_per_year",
        "Age at diagnosis per year",
        Mark::Boxplot,
        Encoding::ordinal(YEAR_OF_DIAGNOSIS, YEAR_TITLE),
        Encoding::quantitative(AGE_AT_DIAGNOSIS_YEAR, AGE_TITLE),
        filtered,
    )
    .dependent(AGE_TREND_PARAM, TISSUE_OR_ORGAN_OF_ORIGIN, selection);

    Ok(Section::new(
        "Explore Trends in Age of Cancer Diagnosis Throughout the Years",
        vec![mean_age, distribution],
    ))
}

fn death_age_section(data: Table) -> Section {
    let scatter = ChartSpec::new(
        "death_vs_diagnosis_age",
        "Mean age of death against mean age at diagnosis",
        Mark::Circle,
        Encoding::quantitative(AGE_AT_DIAGNOSIS_YEAR, AGE_TITLE).aggregate(Aggregate::Mean),
        Encoding::quantitative(AGE_OF_DEATH, "Age of death").aggregate(Aggregate::Mean),
        data.clone(),
    )
    .color(Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE))
    .tooltip(vec![
        Encoding::quantitative(AGE_OF_DEATH, "Mean age of death").aggregate(Aggregate::Mean),
        Encoding::quantitative(AGE_AT_DIAGNOSIS_YEAR, "Mean age at diagnosis").aggregate(Aggregate::Mean),
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE),
    ]);

    let diagnosis_box = ChartSpec::new(
        "diagnosis_age_distribution",
        "Age at diagnosis per cancer type",
        Mark::Boxplot,
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE),
        Encoding::quantitative(AGE_AT_DIAGNOSIS_YEAR, AGE_TITLE),
        data.clone(),
    )
    .color(Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE));

    let death_box = ChartSpec::new(
        "death_age_distribution",
        "Age of death per cancer type",
        Mark::Boxplot,
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE),
        Encoding::quantitative(AGE_OF_DEATH, "Age of death"),
        data,
    )
    .color(Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE));

    Section::new(
        "Explore Associations in Age of Diagnosis with Age of Death",
        vec![scatter, diagnosis_box, death_box],
    )
}

fn family_section(data: Table, selection: &Selection) -> Result<Section> {
    let link = LinkedSelection::with_selection(TISSUE_OR_ORGAN_OF_ORIGIN, selection.clone());
    let filtered = link.apply(&data)?;

    let relatives = ChartSpec::new(
        "relatives_with_cancer_history",
        "Relatives with a cancer history per cancer type",
        Mark::Bar,
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE),
        Encoding::quantitative(RELATIVE_WITH_CANCER_HISTORY, "Number of relatives with cancer history")
            .aggregate(Aggregate::Sum)
            .log_scale(),
        data,
    )
    .color(Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE))
    .tooltip(vec![
        Encoding::quantitative(RELATIVE_WITH_CANCER_HISTORY, "Number of relatives with cancer history")
            .aggregate(Aggregate::Sum),
        Encoding::nominal(TISSUE_OR_ORGAN_OF_ORIGIN, SITE_TITLE),
    ])
    .driver(FAMILY_PARAM, TISSUE_OR_ORGAN_OF_ORIGIN, selection);

    let relationships = ChartSpec::new(
        "relationship_diagnoses",
        "Diagnoses of relatives by relationship type",
        Mark::Bar,
        Encoding::nominal(RELATIONSHIP_PRIMARY_DIAGNOSIS, "Primary diagnosis of the relative").sort_descending(),
        Encoding::count("Count of records").log_scale(),
        filtered,
    )
    .color(Encoding::nominal(RELATIONSHIP_TYPE, "Relationship type"))
    .tooltip(vec![
        Encoding::nominal(RELATIONSHIP_PRIMARY_DIAGNOSIS, "Primary diagnosis of the relative"),
        Encoding::nominal(RELATIONSHIP_TYPE, "Relationship type"),
        Encoding::nominal(RELATIONSHIP_TYPE, "Count of records").aggregate(Aggregate::Count),
    ])
    .dependent(FAMILY_PARAM, TISSUE_OR_ORGAN_OF_ORIGIN, selection);

    Ok(Section::new("Explore Trends in Family History", vec![relatives, relationships]))
}

/// Build the overview page. `default_cancers` applies when the request
/// carries no cancer selection.
pub fn build(table: &Table, params: &OverviewParams, default_cancers: &[String]) -> Result<OverviewPage> {
    let options = cancer_options(table)?;
    let cancers = match &params.cancers {
        Some(cancers) => cancers.clone(),
        None => default_selection(&options, default_cancers),
    };
    debug!(n_cancers = cancers.len(), "Building overview page");

    let sections = vec![
        diagnoses_section(diagnoses_table(table, &cancers)?),
        age_trend_section(age_trend_table(table, &cancers)?, &params.age_trend)?,
        death_age_section(death_age_table(table, &cancers)?),
        family_section(family_history_table(table)?, &params.family)?,
    ];

    Ok(OverviewPage {
        options,
        cancers,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn joined() -> Table {
        Table::from_rows(
            [
                TISSUE_OR_ORGAN_OF_ORIGIN,
                GENDER,
                ETHNICITY,
                RELATIVE_WITH_CANCER_HISTORY,
                RELATIONSHIP_TYPE,
                RELATIONSHIP_PRIMARY_DIAGNOSIS,
                RELATIONSHIP_GENDER,
            ],
            vec![
                vec![
                    "Lung, NOS".into(),
                    "male".into(),
                    "not hispanic or latino".into(),
                    Value::Number(1.0),
                    "Mother".into(),
                    "Breast, NOS".into(),
                    "female".into(),
                ],
                vec![
                    "Prostate gland".into(),
                    "male".into(),
                    "not hispanic or latino".into(),
                    Value::Absent,
                    "Father".into(),
                    "Prostate gland".into(),
                    "male".into(),
                ],
                vec![
                    "Prostate gland".into(),
                    "male".into(),
                    "hispanic or latino".into(),
                    Value::Number(0.0),
                    Value::Absent,
                    Value::Absent,
                    Value::Absent,
                ],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_default_selection_keeps_available_defaults_in_order() {
        let options = vec!["Prostate gland".to_string(), "Lung, NOS".to_string(), "Bone marrow".to_string()];
        let defaults = vec![
            "Bone marrow".to_string(),
            "Breast, NOS".to_string(),
            "Prostate gland".to_string(),
        ];
        assert_eq!(
            default_selection(&options, &defaults),
            vec!["Bone marrow".to_string(), "Prostate gland".to_string()]
        );
    }

    #[test]
    fn test_family_history_counts_missing_flag_as_zero() {
        let t = family_history_table(&joined()).unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.value(1, RELATIVE_WITH_CANCER_HISTORY), Some(&Value::Number(0.0)));
    }

    #[test]
    fn test_family_selection_filters_dependent_chart_only() {
        let params = OverviewParams {
            cancers: Some(Vec::new()),
            family: Selection::Selected(Value::text("Lung, NOS")),
            ..Default::default()
        };
        let mut table = joined();
        for column in [YEAR_OF_DIAGNOSIS, PRIMARY_DIAGNOSIS, CASE_ID, AGE_AT_DIAGNOSIS, YEAR_OF_DEATH, YEAR_OF_BIRTH] {
            table = table.with_column(column, |_| Value::Absent);
        }
        let page = build(&table, &params, &[]).unwrap();
        assert!(page.cancers.is_empty());
        assert!(page.chart("diagnoses_per_year").unwrap().data.is_empty());

        let driver = page.chart("relatives_with_cancer_history").unwrap();
        let dependent = page.chart("relationship_diagnoses").unwrap();
        assert_eq!(driver.data.len(), 2);
        assert_eq!(dependent.data.len(), 1);
        assert_eq!(dependent.data.value(0, RELATIONSHIP_TYPE), Some(&Value::text("Mother")));
    }
}
