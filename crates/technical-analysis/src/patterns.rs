use analysis_core::{Bar, ChartPattern, PatternKind, Significance};

/// Tolerance for matching the two extrema of a double top/bottom
const EXTREMA_TOLERANCE: f64 = 0.03;

/// Minimum session separation between the two extrema
const MIN_EXTREMA_GAP: usize = 5;

/// Scan recent highs/lows for simple chart patterns.
///
/// Requires at least 50 sessions; shorter series report no patterns.
pub fn detect_patterns(bars: &[Bar]) -> Vec<ChartPattern> {
    if bars.len() < 50 {
        return Vec::new();
    }

    let mut patterns = Vec::new();

    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let recent_lows = &lows[lows.len() - 30..];
    let recent_highs = &highs[highs.len() - 30..];

    if detect_double_bottom(recent_lows) {
        patterns.push(ChartPattern {
            name: "Double Bottom".to_string(),
            kind: PatternKind::BullishReversal,
            significance: Significance::High,
            description: "Potential bullish reversal pattern forming".to_string(),
        });
    }

    if detect_double_top(recent_highs) {
        patterns.push(ChartPattern {
            name: "Double Top".to_string(),
            kind: PatternKind::BearishReversal,
            significance: Significance::High,
            description: "Potential bearish reversal pattern forming".to_string(),
        });
    }

    let trend_highs = &highs[highs.len() - 20..];
    let trend_lows = &lows[lows.len() - 20..];

    if is_uptrend(trend_highs, trend_lows) {
        patterns.push(ChartPattern {
            name: "Uptrend".to_string(),
            kind: PatternKind::BullishContinuation,
            significance: Significance::Medium,
            description: "Higher highs and higher lows indicate uptrend".to_string(),
        });
    }

    if is_downtrend(trend_highs, trend_lows) {
        patterns.push(ChartPattern {
            name: "Downtrend".to_string(),
            kind: PatternKind::BearishContinuation,
            significance: Significance::Medium,
            description: "Lower highs and lower lows indicate downtrend".to_string(),
        });
    }

    patterns
}

/// Local minima with strict 2-session confirmation on both sides
fn local_minima(lows: &[f64]) -> Vec<usize> {
    let mut minima = Vec::new();
    for i in 2..lows.len().saturating_sub(2) {
        if lows[i] < lows[i - 1]
            && lows[i] < lows[i - 2]
            && lows[i] < lows[i + 1]
            && lows[i] < lows[i + 2]
        {
            minima.push(i);
        }
    }
    minima
}

fn local_maxima(highs: &[f64]) -> Vec<usize> {
    let mut maxima = Vec::new();
    for i in 2..highs.len().saturating_sub(2) {
        if highs[i] > highs[i - 1]
            && highs[i] > highs[i - 2]
            && highs[i] > highs[i + 1]
            && highs[i] > highs[i + 2]
        {
            maxima.push(i);
        }
    }
    maxima
}

fn detect_double_bottom(lows: &[f64]) -> bool {
    if lows.len() < 10 {
        return false;
    }
    let minima = local_minima(lows);
    for (i, &a) in minima.iter().enumerate() {
        for &b in &minima[i + 1..] {
            if b.abs_diff(a) >= MIN_EXTREMA_GAP {
                let low1 = lows[a];
                let low2 = lows[b];
                if (low1 - low2).abs() / low1 <= EXTREMA_TOLERANCE {
                    return true;
                }
            }
        }
    }
    false
}

fn detect_double_top(highs: &[f64]) -> bool {
    if highs.len() < 10 {
        return false;
    }
    let maxima = local_maxima(highs);
    for (i, &a) in maxima.iter().enumerate() {
        for &b in &maxima[i + 1..] {
            if b.abs_diff(a) >= MIN_EXTREMA_GAP {
                let high1 = highs[a];
                let high2 = highs[b];
                if (high1 - high2).abs() / high1 <= EXTREMA_TOLERANCE {
                    return true;
                }
            }
        }
    }
    false
}

fn half_means(values: &[f64]) -> (f64, f64) {
    let mid = values.len() / 2;
    let first = values[..mid].iter().sum::<f64>() / mid as f64;
    let second = values[mid..].iter().sum::<f64>() / (values.len() - mid) as f64;
    (first, second)
}

fn is_uptrend(highs: &[f64], lows: &[f64]) -> bool {
    if highs.len() < 10 {
        return false;
    }
    let (first_high, second_high) = half_means(highs);
    let (first_low, second_low) = half_means(lows);
    second_high > first_high && second_low > first_low
}

fn is_downtrend(highs: &[f64], lows: &[f64]) -> bool {
    if highs.len() < 10 {
        return false;
    }
    let (first_high, second_high) = half_means(highs);
    let (first_low, second_low) = half_means(lows);
    second_high < first_high && second_low < first_low
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bars(highs: &[f64], lows: &[f64]) -> Vec<Bar> {
        highs
            .iter()
            .zip(lows)
            .enumerate()
            .map(|(i, (&high, &low))| Bar {
                timestamp: Utc::now() - chrono::Duration::days((highs.len() - i) as i64),
                open: (high + low) / 2.0,
                high,
                low,
                close: (high + low) / 2.0,
                volume: 1_000_000.0,
            })
            .collect()
    }

    #[test]
    fn short_series_has_no_patterns() {
        let highs = vec![101.0; 30];
        let lows = vec![99.0; 30];
        assert!(detect_patterns(&bars(&highs, &lows)).is_empty());
    }

    #[test]
    fn detects_double_bottom() {
        // Flat run with two matching troughs ~10 sessions apart
        let mut lows = vec![100.0; 60];
        lows[38] = 90.0;
        lows[48] = 90.5;
        let highs: Vec<f64> = lows.iter().map(|l| l + 4.0).collect();
        let patterns = detect_patterns(&bars(&highs, &lows));
        assert!(patterns.iter().any(|p| p.name == "Double Bottom"));
        let db = patterns.iter().find(|p| p.name == "Double Bottom").unwrap();
        assert_eq!(db.kind, PatternKind::BullishReversal);
        assert_eq!(db.significance, Significance::High);
    }

    #[test]
    fn detects_double_top() {
        let mut highs = vec![100.0; 60];
        highs[40] = 112.0;
        highs[50] = 111.5;
        let lows: Vec<f64> = highs.iter().map(|h| h - 4.0).collect();
        let patterns = detect_patterns(&bars(&highs, &lows));
        assert!(patterns.iter().any(|p| p.name == "Double Top"));
    }

    #[test]
    fn rejects_extrema_closer_than_five_sessions() {
        let mut lows = vec![100.0; 60];
        lows[50] = 90.0;
        lows[53] = 90.2;
        let highs: Vec<f64> = lows.iter().map(|l| l + 4.0).collect();
        let patterns = detect_patterns(&bars(&highs, &lows));
        assert!(!patterns.iter().any(|p| p.name == "Double Bottom"));
    }

    #[test]
    fn detects_uptrend_and_downtrend() {
        let up: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let up_lows: Vec<f64> = up.iter().map(|h| h - 2.0).collect();
        let patterns = detect_patterns(&bars(&up, &up_lows));
        assert!(patterns.iter().any(|p| p.name == "Uptrend"));
        assert!(!patterns.iter().any(|p| p.name == "Downtrend"));

        let down: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let down_lows: Vec<f64> = down.iter().map(|h| h - 2.0).collect();
        let patterns = detect_patterns(&bars(&down, &down_lows));
        assert!(patterns.iter().any(|p| p.name == "Downtrend"));
    }
}
