use std::collections::BTreeSet;

// Keyword lexicon for headline scoring. Multi-word entries are kept for
// completeness but single-token matching never reaches them.
const POSITIVE_WORDS: &[&str] = &[
    "beat", "beats", "exceeded", "exceeds", "upgrade", "upgraded", "upgrades",
    "buy", "bullish", "outperform", "strong", "growth", "profit", "profitable",
    "surge", "surges", "surged", "soar", "soars", "soared", "rally", "rallies",
    "gain", "gains", "gained", "rise", "rises", "rising", "rose", "positive",
    "optimistic", "record", "best", "breakthrough", "success", "successful",
    "expand", "expansion", "innovative", "innovation", "partnership", "deal",
    "acquisition", "dividend", "buyback", "repurchase", "beat expectations",
    "above estimates", "raised guidance", "increased guidance", "momentum",
];

const NEGATIVE_WORDS: &[&str] = &[
    "miss", "missed", "misses", "downgrade", "downgraded", "downgrades",
    "sell", "bearish", "underperform", "weak", "weakness", "loss", "losses",
    "decline", "declines", "declined", "drop", "drops", "dropped", "fall",
    "falls", "fell", "falling", "plunge", "plunges", "plunged", "crash",
    "negative", "pessimistic", "worst", "failure", "failed", "fails",
    "layoff", "layoffs", "restructuring", "bankruptcy", "default", "debt",
    "lawsuit", "investigation", "fraud", "scandal", "recall", "warning",
    "below estimates", "missed expectations", "lowered guidance", "cut",
    "concern", "concerns", "worried", "worry", "risk", "risks", "risky",
];

const VERY_POSITIVE_WORDS: &[&str] = &[
    "blockbuster", "blowout", "record-breaking", "all-time high",
    "massive growth", "extraordinary", "exceptional", "remarkable",
];

const VERY_NEGATIVE_WORDS: &[&str] = &[
    "bankrupt", "bankruptcy", "fraud", "criminal", "indicted",
    "collapse", "collapsed", "crisis", "disaster", "catastrophic",
];

fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn count_matches(words: &BTreeSet<String>, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|w| words.contains(**w)).count()
}

/// Score a headline 0-100 by keyword counting, 50 is neutral.
///
/// Each distinct positive or negative word shifts the score by 8 points,
/// strongly loaded words by 15.
pub fn text_sentiment(text: &str) -> f64 {
    let words = tokenize(text);

    let positive = count_matches(&words, POSITIVE_WORDS) as f64;
    let negative = count_matches(&words, NEGATIVE_WORDS) as f64;
    let very_positive = count_matches(&words, VERY_POSITIVE_WORDS) as f64;
    let very_negative = count_matches(&words, VERY_NEGATIVE_WORDS) as f64;

    let score = 50.0 + positive * 8.0 - negative * 8.0 + very_positive * 15.0 - very_negative * 15.0;
    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_headline_scores_fifty() {
        assert_eq!(text_sentiment("Company announces quarterly report date"), 50.0);
    }

    #[test]
    fn positive_words_raise_the_score() {
        // "beats" and "strong" are each worth +8
        assert_eq!(text_sentiment("Acme beats estimates on strong demand"), 66.0);
    }

    #[test]
    fn negative_words_lower_the_score() {
        assert_eq!(text_sentiment("Acme shares drop after earnings miss"), 34.0);
    }

    #[test]
    fn strongly_loaded_words_weigh_more() {
        // "bankruptcy" counts in both the negative and very-negative sets
        assert_eq!(text_sentiment("Acme files for bankruptcy"), 27.0);
        assert_eq!(text_sentiment("Blockbuster quarter for Acme"), 65.0);
    }

    #[test]
    fn repeated_words_count_once() {
        assert_eq!(
            text_sentiment("gain gain gain"),
            text_sentiment("quarterly gain")
        );
    }

    #[test]
    fn score_is_clamped() {
        let doom = "bankrupt fraud criminal collapse crisis disaster catastrophic \
                    lawsuit scandal plunge crash warning";
        assert_eq!(text_sentiment(doom), 0.0);
    }
}
