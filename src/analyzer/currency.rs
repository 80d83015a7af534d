use crate::analyzer::forecast::{extrapolate, DEFAULT_WINDOW};
use crate::analyzer::series::{arg_max, arg_min, first_difference};
use crate::model::{
    AnalysisError, CurrencyExtremes, CurrencyForecast, CurrencyResult, DailyRate, DateExtreme,
    DateForecast, Result,
};
use crate::table::Table;
use crate::utils::{format_date, round_to};
use chrono::{Days, NaiveDate};
use tracing::{debug, info};

const DATE: &str = "date";
const USD: &str = "usd";
const EUR: &str = "eur";

/// Daily USD/EUR rates: biggest one-day moves and a per-currency forecast.
///
/// Rows are taken in the order given; the table is expected to be chronological
/// and is never re-sorted.
pub struct CurrencyAnalyzer {
    window: usize,
}

impl CurrencyAnalyzer {
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }

    pub fn analyze(&self, rates: &Table, forecast_days: usize) -> Result<CurrencyResult> {
        if rates.is_empty() {
            return Err(AnalysisError::data(&rates.name, "no rows"));
        }
        let dates = rates.column_dates(DATE)?;
        let usd = rates.column_f64(USD)?;
        let eur = rates.column_f64(EUR)?;
        debug!("Loaded {} daily rates from {}", dates.len(), rates.name);

        let usd_extremes = extremes(USD, &usd, &dates)?;
        let eur_extremes = extremes(EUR, &eur, &dates)?;

        // Forecast dates continue from the latest date in the table.
        let last_date = dates
            .iter()
            .max()
            .copied()
            .ok_or_else(|| AnalysisError::data(&rates.name, "no dates"))?;
        let forecast = CurrencyForecast {
            usd: self.forecast(USD, &usd, last_date, forecast_days)?,
            eur: self.forecast(EUR, &eur, last_date, forecast_days)?,
        };

        let daily_rates = dates
            .iter()
            .zip(usd.iter().zip(&eur))
            .map(|(&date, (&usd, &eur))| DailyRate {
                date: format_date(date),
                usd,
                eur,
            })
            .collect();

        Ok(CurrencyResult {
            daily_rates,
            usd: usd_extremes,
            eur: eur_extremes,
            forecast,
        })
    }

    fn forecast(
        &self,
        currency: &str,
        rates: &[f64],
        last_date: NaiveDate,
        days: usize,
    ) -> Result<Vec<DateForecast>> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let predicted = extrapolate(rates, self.window, days)
            .map_err(|e| AnalysisError::data(format!("{} forecast", currency), e.to_string()))?;

        predicted
            .into_iter()
            .enumerate()
            .map(|(i, rate)| {
                let date = last_date
                    .checked_add_days(Days::new(i as u64 + 1))
                    .ok_or_else(|| AnalysisError::data(format!("{} forecast", currency), "date out of range"))?;
                Ok(DateForecast {
                    date: format_date(date),
                    predicted_rate: round_to(rate, 4),
                })
            })
            .collect()
    }
}

/// `max_gain` comes from the most negative day-over-day change and `max_loss` from the
/// most positive one; both are reported as magnitudes.
fn extremes(currency: &str, rates: &[f64], dates: &[NaiveDate]) -> Result<CurrencyExtremes> {
    let changes = first_difference(rates);
    let gain = arg_min(&changes, currency)?;
    let loss = arg_max(&changes, currency)?;
    info!(
        "{}: max gain {:.4} on {}, max loss {:.4} on {}",
        currency.to_uppercase(),
        gain.value,
        dates[gain.index],
        loss.value,
        dates[loss.index]
    );

    Ok(CurrencyExtremes {
        max_gain: DateExtreme {
            value: round_to(gain.value.abs(), 2),
            date: format_date(dates[gain.index]),
        },
        max_loss: DateExtreme {
            value: round_to(loss.value.abs(), 2),
            date: format_date(dates[loss.index]),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rates(rows: &[(&str, f64, f64)]) -> Table {
        let rows: Vec<_> = rows
            .iter()
            .map(|(d, u, e)| json!({ "date": d, "usd": u, "eur": e }))
            .collect();
        Table::from_json("rates", &json!(rows).to_string()).unwrap()
    }

    #[test]
    fn test_gain_is_biggest_drop_and_loss_is_biggest_rise() {
        let table = rates(&[
            ("2024-01-01", 90.0, 100.0),
            ("2024-01-02", 88.0, 101.0),
            ("2024-01-03", 93.0, 99.5),
        ]);
        let result = CurrencyAnalyzer::new().analyze(&table, 0).unwrap();

        assert_eq!(result.usd.max_gain, DateExtreme { value: 2.0, date: "2024-01-02".into() });
        assert_eq!(result.usd.max_loss, DateExtreme { value: 5.0, date: "2024-01-03".into() });
        assert_eq!(result.eur.max_gain, DateExtreme { value: 1.5, date: "2024-01-03".into() });
        assert_eq!(result.eur.max_loss, DateExtreme { value: 1.0, date: "2024-01-02".into() });
    }

    #[test]
    fn test_forecast_continues_after_last_date() {
        let table = rates(&[
            ("2024-02-27", 90.0, 98.0),
            ("2024-02-28", 91.0, 99.0),
            ("2024-02-29", 92.0, 100.0),
        ]);
        let result = CurrencyAnalyzer::new().analyze(&table, 3).unwrap();

        let dates: Vec<&str> = result.forecast.usd.iter().map(|f| f.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-02", "2024-03-03"]);
        assert_eq!(result.forecast.usd[0].predicted_rate, 91.0);
        // mean(91, 92, 91) = 91.3333
        assert_eq!(result.forecast.usd[1].predicted_rate, 91.3333);
        assert_eq!(result.forecast.eur[0].predicted_rate, 99.0);
        assert_eq!(result.forecast.eur.len(), 3);
    }

    #[test]
    fn test_daily_rates_keep_input_order() {
        let table = rates(&[
            ("2024-01-03T00:00:00", 1.0, 2.0),
            ("2024-01-01", 3.0, 4.0),
            ("2024-01-02", 5.0, 6.0),
        ]);
        let result = CurrencyAnalyzer::new().analyze(&table, 1).unwrap();
        let dates: Vec<&str> = result.daily_rates.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-01", "2024-01-02"]);
        // Diffs follow the given order: [-, +2, +2]
        assert_eq!(result.usd.max_loss.date, "2024-01-01");
        assert_eq!(result.forecast.usd[0].date, "2024-01-04");
    }

    #[test]
    fn test_missing_column_and_bad_date() {
        let table = Table::from_json("rates", r#"[{"date": "2024-01-01", "usd": 1.0}]"#).unwrap();
        let err = CurrencyAnalyzer::new().analyze(&table, 1).unwrap_err();
        assert!(err.to_string().contains("'eur'"));

        let table = rates(&[("01.01.2024", 1.0, 2.0)]);
        let err = CurrencyAnalyzer::new().analyze(&table, 1).unwrap_err();
        assert!(matches!(err, AnalysisError::Data { .. }));
    }

    #[test]
    fn test_short_series_fails_forecast() {
        let table = rates(&[("2024-01-01", 1.0, 2.0), ("2024-01-02", 1.5, 2.5)]);
        let err = CurrencyAnalyzer::new().analyze(&table, 1).unwrap_err();
        assert!(err.to_string().contains("usd forecast"));
    }

    #[test]
    fn test_two_rows_without_forecast() {
        let table = rates(&[
            ("2024-01-01", 90.0, 100.0),
            ("2024-01-02", 88.0, 103.0),
        ]);
        let result = CurrencyAnalyzer::new().analyze(&table, 0).unwrap();

        assert_eq!(result.daily_rates.len(), 2);
        assert_eq!(result.usd.max_gain, DateExtreme { value: 2.0, date: "2024-01-02".into() });
        assert_eq!(result.usd.max_loss, DateExtreme { value: 2.0, date: "2024-01-02".into() });
        assert_eq!(result.eur.max_loss, DateExtreme { value: 3.0, date: "2024-01-02".into() });
        assert!(result.forecast.usd.is_empty());
        assert!(result.forecast.eur.is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = Table::from_json("rates", "[]").unwrap();
        assert!(CurrencyAnalyzer::new().analyze(&table, 1).is_err());
    }
}
