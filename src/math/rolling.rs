//! Trailing-window moving averages over series with gaps.

/// Window length of the "fortnightly" moving average, in rows.
pub const MA_WINDOW: usize = 14;

/// Trailing mean over up to `window` rows ending at each row.
///
/// Missing cells do not count towards the mean. A row yields a value as soon
/// as at least one cell in its window is present, so the first rows average
/// over however many observations exist so far. A window with no values
/// yields `None`.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    let mut count = 0usize;

    for i in 0..values.len() {
        if let Some(v) = values[i] {
            sum += v;
            count += 1;
        }
        if i >= window {
            if let Some(old) = values[i - window] {
                sum -= old;
                count -= 1;
            }
        }
        out.push(if count > 0 { Some(sum / count as f64) } else { None });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_row_equals_raw_value() {
        let values: Vec<Option<f64>> = (0..20).map(|i| Some(10.0 + i as f64)).collect();
        let ma = rolling_mean(&values, MA_WINDOW);
        assert_eq!(ma[0], Some(10.0));
    }

    #[test]
    fn full_window_is_mean_of_last_fourteen_rows() {
        let values: Vec<Option<f64>> = (0..30).map(|i| Some(((i * 7) % 11) as f64 + 0.5)).collect();
        let ma = rolling_mean(&values, MA_WINDOW);
        for i in 13..values.len() {
            let expected = values[i - 13..=i].iter().map(|v| v.unwrap()).sum::<f64>() / 14.0;
            assert!(close(ma[i].unwrap(), expected), "row {i}");
        }
    }

    #[test]
    fn warm_up_rows_average_what_is_available() {
        let values = vec![Some(2.0), Some(4.0), Some(9.0)];
        let ma = rolling_mean(&values, MA_WINDOW);
        assert_eq!(ma, vec![Some(2.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn gaps_are_skipped_not_zeroed() {
        let values = vec![None, Some(4.0), None, Some(8.0)];
        let ma = rolling_mean(&values, 2);
        assert_eq!(ma, vec![None, Some(4.0), Some(4.0), Some(8.0)]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rolling_mean(&[], MA_WINDOW).is_empty());
    }
}
