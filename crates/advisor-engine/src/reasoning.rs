use analysis_core::{ChartPattern, ComponentScore, Recommendation, UnusualActivity};

/// Build the human-readable explanation attached to a recommendation.
///
/// Clauses are collected in a fixed priority order and the first four are
/// joined into one sentence-per-clause string. A fully neutral analysis
/// falls back to a generic sentence naming the recommendation.
pub fn synthesize_reasoning(
    technical: &ComponentScore,
    fundamental: &ComponentScore,
    sentiment: &ComponentScore,
    patterns: &[ChartPattern],
    unusual_activity: &[UnusualActivity],
    recommendation: Recommendation,
) -> String {
    let mut reasons: Vec<String> = Vec::new();

    if technical.score >= 65.0 {
        reasons.push("Technical indicators are bullish".to_string());
    } else if technical.score <= 35.0 {
        reasons.push("Technical indicators are bearish".to_string());
    }

    reasons.extend(
        technical
            .signals
            .iter()
            .filter(|s| {
                let text = s.text.to_lowercase();
                text.contains("bullish") || text.contains("bearish")
            })
            .take(2)
            .map(|s| s.text.clone()),
    );

    if fundamental.score >= 65.0 {
        reasons.push("Fundamentals are strong".to_string());
    } else if fundamental.score <= 35.0 {
        reasons.push("Fundamentals show weakness".to_string());
    }

    // One growth or margin highlight from the leading fundamental signals
    if let Some(signal) = fundamental.signals.iter().take(2).find(|s| {
        let text = s.text.to_lowercase();
        text.contains("growth") || text.contains("margin")
    }) {
        reasons.push(signal.text.clone());
    }

    if sentiment.score >= 60.0 {
        reasons.push("Market sentiment is positive".to_string());
    } else if sentiment.score <= 40.0 {
        reasons.push("Market sentiment is negative".to_string());
    }

    if let Some(pattern) = patterns.first() {
        reasons.push(format!("{} pattern detected", pattern.name));
    }

    if let Some(activity) = unusual_activity.first() {
        reasons.push(activity.description.clone());
    }

    if reasons.is_empty() {
        return format!(
            "Analysis suggests {} based on neutral indicators across technical, \
             fundamental, and sentiment analysis.",
            recommendation.label()
        );
    }

    reasons.truncate(4);
    format!("{}.", reasons.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::{PatternKind, Signal, SignalCategory, Significance};

    fn component(score: f64, signals: Vec<Signal>) -> ComponentScore {
        ComponentScore {
            score,
            components: Default::default(),
            signals,
        }
    }

    fn neutral() -> ComponentScore {
        ComponentScore::neutral()
    }

    #[test]
    fn neutral_analysis_uses_the_fallback_sentence() {
        let reasoning = synthesize_reasoning(
            &neutral(),
            &neutral(),
            &neutral(),
            &[],
            &[],
            Recommendation::Hold,
        );
        assert_eq!(
            reasoning,
            "Analysis suggests hold based on neutral indicators across technical, \
             fundamental, and sentiment analysis."
        );
    }

    #[test]
    fn fallback_names_the_recommendation() {
        let reasoning = synthesize_reasoning(
            &neutral(),
            &neutral(),
            &neutral(),
            &[],
            &[],
            Recommendation::StrongBuy,
        );
        assert!(reasoning.contains("suggests strong buy"));
    }

    #[test]
    fn clauses_follow_priority_order_and_cap_at_four() {
        let technical = component(
            70.0,
            vec![
                Signal::new(SignalCategory::Trend, "Price above SMA20 (bullish)".to_string()),
                Signal::new(SignalCategory::Momentum, "RSI neutral (52.0)".to_string()),
                Signal::new(
                    SignalCategory::Trend,
                    "Golden cross active (SMA50 > SMA200)".to_string(),
                ),
                Signal::new(SignalCategory::Trend, "Price above SMA50 (bullish)".to_string()),
            ],
        );
        let fundamental = component(
            70.0,
            vec![Signal::new(
                SignalCategory::Growth,
                "Strong earnings growth (30.0%)".to_string(),
            )],
        );
        let sentiment = component(65.0, vec![]);
        let pattern = ChartPattern {
            name: "Uptrend".to_string(),
            kind: PatternKind::BullishContinuation,
            significance: Significance::Medium,
            description: "Higher highs and higher lows indicate uptrend".to_string(),
        };

        let reasoning = synthesize_reasoning(
            &technical,
            &fundamental,
            &sentiment,
            &[pattern],
            &[],
            Recommendation::Buy,
        );

        assert_eq!(
            reasoning,
            "Technical indicators are bullish. Price above SMA20 (bullish). \
             Price above SMA50 (bullish). Fundamentals are strong."
        );
    }

    #[test]
    fn growth_signal_is_only_taken_from_the_leading_two() {
        let fundamental = component(
            50.0,
            vec![
                Signal::new(SignalCategory::Valuation, "Moderate P/E (20.0) - fair valuation".to_string()),
                Signal::new(SignalCategory::Valuation, "High P/B (12.00) - premium valuation".to_string()),
                Signal::new(SignalCategory::Growth, "Strong revenue growth (25.0%)".to_string()),
            ],
        );
        let reasoning = synthesize_reasoning(
            &neutral(),
            &fundamental,
            &neutral(),
            &[],
            &[],
            Recommendation::Hold,
        );
        // The growth signal sits third, outside the scanned window
        assert!(!reasoning.contains("revenue growth"));
    }

    #[test]
    fn unusual_activity_description_is_included() {
        let activity = UnusualActivity {
            kind: analysis_core::ActivityKind::PriceGap,
            description: "Gap up 4.2% at open".to_string(),
            significance: Significance::Medium,
        };
        let reasoning = synthesize_reasoning(
            &neutral(),
            &neutral(),
            &neutral(),
            &[],
            &[activity],
            Recommendation::Hold,
        );
        assert_eq!(reasoning, "Gap up 4.2% at open.");
    }
}
