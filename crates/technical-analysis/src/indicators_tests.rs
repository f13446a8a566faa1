#[cfg(test)]
mod tests {
    use super::super::indicators::*;
    use analysis_core::Bar;
    use approx::assert_relative_eq;
    use chrono::Utc;

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    // Helper function to create sample bars
    fn sample_bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                Bar {
                    timestamp: Utc::now() - chrono::Duration::days((n - i) as i64),
                    open: base,
                    high: base + 2.0,
                    low: base - 1.0,
                    close: base + 1.0,
                    volume: 1_000_000.0,
                }
            })
            .collect()
    }

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        // Aligned to the input; first two slots are undefined
        assert_eq!(result.len(), 5);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_relative_eq!(result[2], 2.0, epsilon = 1e-9); // (1+2+3)/3
        assert_relative_eq!(result[3], 3.0, epsilon = 1e-9); // (2+3+4)/3
        assert_relative_eq!(result[4], 4.0, epsilon = 1e-9); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let data = vec![1.0, 2.0];
        let result = sma(&data, 5);

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_sma_real_prices() {
        let prices = sample_prices();
        let result = sma(&prices, 5);

        let expected_first = (44.34 + 44.09 + 44.15 + 43.61 + 44.33) / 5.0;
        assert!((result[4] - expected_first).abs() < 0.01);
        assert_eq!(result.len(), prices.len());
    }

    #[test]
    fn test_ema_seeded_at_first_value() {
        let data = vec![10.0, 11.0, 12.0, 13.0];
        let result = ema(&data, 3);

        assert_eq!(result.len(), 4);
        assert_relative_eq!(result[0], 10.0, epsilon = 1e-9);
        // multiplier = 2/(3+1) = 0.5
        assert_relative_eq!(result[1], 10.5, epsilon = 1e-9);
        assert_relative_eq!(result[2], 11.25, epsilon = 1e-9);
    }

    #[test]
    fn test_ema_tracks_uptrend() {
        let prices = sample_prices();
        let fast = ema(&prices, 5);
        let slow = ema(&prices, 12);

        // Prices rose overall, so the fast EMA should sit above the slow one
        assert!(fast[prices.len() - 1] > slow[prices.len() - 1] - 1.0);
    }

    #[test]
    fn test_rsi_bounds_and_alignment() {
        let prices = sample_prices();
        let result = rsi(&prices, 14);

        assert_eq!(result.len(), prices.len());
        assert!(result[12].is_nan());
        for value in result.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_rsi_all_gains_is_max() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&prices, 14);

        // No losses at all: RS diverges and RSI pins at 100
        assert_relative_eq!(result[prices.len() - 1], 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stoch_rsi_bounds() {
        let prices: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let result = stoch_rsi(&prices, 14);

        assert_eq!(result.len(), prices.len());
        for value in result.iter().filter(|v| !v.is_nan()) {
            assert!((-1e-9..=100.0 + 1e-9).contains(value));
        }
    }

    #[test]
    fn test_macd_histogram_is_difference() {
        let prices = sample_prices();
        let result = macd(&prices, 12, 26, 9);

        assert_eq!(result.macd.len(), prices.len());
        for i in 0..prices.len() {
            assert_relative_eq!(
                result.histogram[i],
                result.macd[i] - result.signal[i],
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_bollinger_band_ordering() {
        let prices: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 3.0)
            .collect();
        let bb = bollinger_bands(&prices, 20, 2.0);

        assert!(bb.upper[10].is_nan());
        for i in 19..prices.len() {
            assert!(bb.upper[i] > bb.middle[i]);
            assert!(bb.middle[i] > bb.lower[i]);
            assert!(bb.width[i] > 0.0);
        }
    }

    #[test]
    fn test_bollinger_position_centered_for_middle_close() {
        // A close exactly at the middle band sits at position 0.5
        let mut prices = vec![100.0, 102.0, 98.0, 101.0, 99.0];
        prices.extend(vec![100.0, 102.0, 98.0, 101.0, 99.0].repeat(4));
        let bb = bollinger_bands(&prices, 5, 2.0);
        let last = prices.len() - 1;
        assert!(bb.position[last] > 0.0 && bb.position[last] < 1.0);
    }

    #[test]
    fn test_atr_positive_after_window() {
        let bars = sample_bars(30);
        let result = atr(&bars, 14);

        assert_eq!(result.len(), 30);
        assert!(result[12].is_nan());
        assert!(result[29] > 0.0);
    }

    #[test]
    fn test_adx_strong_in_steady_trend() {
        let bars = sample_bars(60);
        let result = adx(&bars, 14);

        let last = bars.len() - 1;
        // A monotone uptrend drives DI+ above DI- and pushes ADX high
        assert!(result.di_plus[last] > result.di_minus[last]);
        assert!(result.adx[last] > 25.0);
    }

    #[test]
    fn test_obv_accumulates_in_uptrend() {
        let bars = sample_bars(10);
        let result = obv(&bars);

        assert!(result[0].is_nan());
        // Every close is higher than the last, so OBV adds volume each session
        assert_relative_eq!(result[9], 9_000_000.0, epsilon = 1e-3);
    }

    #[test]
    fn test_mfi_bounds() {
        let prices: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 4.0)
            .collect();
        let bars: Vec<Bar> = prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: Utc::now() - chrono::Duration::days((prices.len() - i) as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 500_000.0 + (i as f64) * 10_000.0,
            })
            .collect();
        let result = mfi(&bars, 14);

        for value in result.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(value));
        }
    }

    #[test]
    fn test_roc_basic() {
        let data = vec![100.0, 101.0, 102.0, 103.0, 104.0, 110.0];
        let result = roc(&data, 5);

        assert!(result[4].is_nan());
        assert_relative_eq!(result[5], 10.0, epsilon = 1e-9); // 100 -> 110
    }

    #[test]
    fn test_williams_r_bounds() {
        let bars = sample_bars(30);
        let result = williams_r(&bars, 14);

        for value in result.iter().filter(|v| !v.is_nan()) {
            assert!((-100.0 - 1e-9..=1e-9).contains(value));
        }
        // Closes near the top of the trailing range in a steady uptrend
        assert!(result[29] > -30.0);
    }

    #[test]
    fn test_cci_positive_above_average() {
        let bars = sample_bars(40);
        let result = cci(&bars, 20);

        assert!(result[10].is_nan());
        // Typical price keeps rising above its trailing mean
        assert!(result[39] > 0.0);
    }

    #[test]
    fn test_indicator_set_alignment() {
        let bars = sample_bars(250);
        let set = IndicatorSet::compute(&bars);

        assert_eq!(set.len(), 250);
        assert_eq!(set.sma_200.len(), 250);
        assert!(set.sma_200[198].is_nan());
        assert!(!set.sma_200[199].is_nan());
        assert!(!IndicatorSet::latest(&set.rsi).is_nan());
        assert!(IndicatorSet::latest(&set.volume_ratio) > 0.0);
    }

    #[test]
    fn test_indicator_set_empty_series() {
        let set = IndicatorSet::compute(&[]);

        assert!(set.is_empty());
        assert!(IndicatorSet::latest(&set.close).is_nan());
    }
}
