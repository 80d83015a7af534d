use crate::analyzer::forecast::{extrapolate, DEFAULT_WINDOW};
use crate::analyzer::series::{arg_max, arg_min, first_difference};
use crate::model::{AnalysisError, BirthsResult, Result, YearExtreme, YearForecast, YearPercentage};
use crate::table::Table;
use crate::utils::round_to;
use std::collections::BTreeMap;
use tracing::{debug, info};

const YEAR: &str = "year";
const OUT_OF_WEDLOCK: &str = "children_born_out_of_wedlock";
const TOTAL_BIRTHS: &str = "total_births";

/// Out-of-wedlock birth share: yearly percentages, extreme changes and a forecast.
pub struct BirthsAnalyzer {
    window: usize,
}

impl BirthsAnalyzer {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    pub fn analyze(&self, children: &Table, totals: &Table, forecast_years: usize) -> Result<BirthsResult> {
        let joined = join_on_year(children, totals)?;
        debug!(
            "Joined {} of {} children rows with {} totals rows",
            joined.len(),
            children.len(),
            totals.len()
        );

        let mut years = Vec::with_capacity(joined.len());
        let mut percentages = Vec::with_capacity(joined.len());
        for (year, (out_of_wedlock, total)) in &joined {
            if *total <= 0.0 {
                return Err(AnalysisError::data(
                    &totals.name,
                    format!("non-positive {} {} for year {}", TOTAL_BIRTHS, total, year),
                ));
            }
            years.push(*year);
            percentages.push(out_of_wedlock / total * 100.0);
        }

        let changes = first_difference(&percentages);
        let max = arg_max(&changes, "births change")?;
        let min = arg_min(&changes, "births change")?;
        info!(
            "Births: max change {:.2} in {}, min change {:.2} in {}",
            max.value, years[max.index], min.value, years[min.index]
        );

        let forecast = self.forecast(&percentages, years[years.len() - 1], forecast_years)?;

        let data = years
            .iter()
            .zip(&percentages)
            .map(|(&year, &percentage_out_of_wedlock)| YearPercentage {
                year,
                percentage_out_of_wedlock,
            })
            .collect();

        Ok(BirthsResult {
            data,
            max_change: YearExtreme {
                value: round_to(max.value, 2),
                year: years[max.index],
            },
            min_change: YearExtreme {
                value: round_to(min.value, 2),
                year: years[min.index],
            },
            forecast,
        })
    }

    /// Forecast labelled with the years following `last_year`. No steps means no forecast,
    /// whatever the series length.
    fn forecast(&self, percentages: &[f64], last_year: i64, steps: usize) -> Result<Vec<YearForecast>> {
        if steps == 0 {
            return Ok(Vec::new());
        }
        let predicted = extrapolate(percentages, self.window, steps)
            .map_err(|e| AnalysisError::data("births forecast", e.to_string()))?;

        predicted
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let year = i64::try_from(i + 1)
                    .ok()
                    .and_then(|offset| last_year.checked_add(offset))
                    .ok_or_else(|| AnalysisError::data("births forecast", "year out of range"))?;
                Ok(YearForecast {
                    year,
                    predicted_percentage: round_to(value, 2),
                })
            })
            .collect()
    }
}

/// Inner join on `year`; years present in only one table are dropped.
fn join_on_year(children: &Table, totals: &Table) -> Result<BTreeMap<i64, (f64, f64)>> {
    let children_by_year = index_by_year(children, OUT_OF_WEDLOCK)?;
    let totals_by_year = index_by_year(totals, TOTAL_BIRTHS)?;

    let joined: BTreeMap<i64, (f64, f64)> = children_by_year
        .into_iter()
        .filter_map(|(year, count)| totals_by_year.get(&year).map(|&total| (year, (count, total))))
        .collect();

    if joined.is_empty() {
        return Err(AnalysisError::data(
            format!("{} + {}", children.name, totals.name),
            "no common years between tables",
        ));
    }
    Ok(joined)
}

fn index_by_year(table: &Table, column: &str) -> Result<BTreeMap<i64, f64>> {
    let years = table.column_i64(YEAR)?;
    let values = table.column_f64(column)?;

    let mut map = BTreeMap::new();
    for (year, value) in years.into_iter().zip(values) {
        if map.insert(year, value).is_some() {
            return Err(AnalysisError::data(&table.name, format!("duplicate year {}", year)));
        }
    }
    Ok(map)
}
