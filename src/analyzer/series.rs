use crate::model::{AnalysisError, Result};

/// Position and value of an extremum in a derived column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extreme {
    pub index: usize,
    pub value: f64,
}

/// First difference in the given order. The first entry has no predecessor and is `None`.
pub fn first_difference(values: &[f64]) -> Vec<Option<f64>> {
    let mut diffs = Vec::with_capacity(values.len());
    if !values.is_empty() {
        diffs.push(None);
    }
    diffs.extend(values.windows(2).map(|w| Some(w[1] - w[0])));
    diffs
}

/// Largest defined value; earliest index wins ties.
pub fn arg_max(values: &[Option<f64>], label: &str) -> Result<Extreme> {
    select(values, label, |candidate, best| candidate > best)
}

/// Smallest defined value; earliest index wins ties.
pub fn arg_min(values: &[Option<f64>], label: &str) -> Result<Extreme> {
    select(values, label, |candidate, best| candidate < best)
}

fn select(
    values: &[Option<f64>],
    label: &str,
    better: impl Fn(f64, f64) -> bool,
) -> Result<Extreme> {
    let mut best: Option<Extreme> = None;
    for (index, value) in values.iter().enumerate() {
        let Some(value) = *value else { continue };
        if value.is_nan() {
            continue;
        }
        match best {
            Some(b) if !better(value, b.value) => {}
            _ => best = Some(Extreme { index, value }),
        }
    }
    best.ok_or_else(|| {
        AnalysisError::data(label, "need at least two rows to compute a change")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(
            first_difference(&[10.0, 15.0, 12.0]),
            vec![None, Some(5.0), Some(-3.0)]
        );
        assert_eq!(first_difference(&[1.0]), vec![None]);
        assert!(first_difference(&[]).is_empty());
    }

    #[test]
    fn test_extremes_skip_undefined_first_entry() {
        let diffs = first_difference(&[10.0, 15.0]);
        let max = arg_max(&diffs, "pct").unwrap();
        let min = arg_min(&diffs, "pct").unwrap();
        assert_eq!(max, Extreme { index: 1, value: 5.0 });
        assert_eq!(min, Extreme { index: 1, value: 5.0 });
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let diffs = vec![None, Some(3.0), Some(-1.0), Some(3.0), Some(-1.0)];
        assert_eq!(arg_max(&diffs, "x").unwrap().index, 1);
        assert_eq!(arg_min(&diffs, "x").unwrap().index, 2);
    }

    #[test]
    fn test_all_undefined_is_data_error() {
        let err = arg_max(&[None], "usd").unwrap_err();
        assert!(matches!(err, AnalysisError::Data { .. }));
        assert!(arg_min(&[], "usd").is_err());
    }
}
