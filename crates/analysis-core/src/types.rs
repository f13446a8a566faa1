use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OHLCV bar data for one trading session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Point-in-time quote and fundamentals for one security.
///
/// Every metric is optional: a missing field skips its scoring rule rather
/// than failing the analysis. `debt_to_equity` is expressed in percent
/// (e.g. 85.0), margins and growth rates as fractions (e.g. 0.15).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSnapshot {
    pub ticker: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub current_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub open: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub profit_margin: Option<f64>,
    pub operating_margin: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    pub total_cash: Option<f64>,
    pub total_debt: Option<f64>,
    /// Mean analyst rating, 1 (strong buy) to 5 (strong sell)
    pub recommendation_mean: Option<f64>,
    pub target_price: Option<f64>,
    #[serde(rename = "52_week_high")]
    pub week_52_high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub week_52_low: Option<f64>,
    pub avg_volume: Option<f64>,
    pub avg_volume_10d: Option<f64>,
    pub beta: Option<f64>,
    pub sector: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// News headline for sentiment scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
}

/// Sub-dimension a signal was generated by, kept for reasoning synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    Trend,
    Momentum,
    Volatility,
    Volume,
    PriceAction,
    Valuation,
    Growth,
    Profitability,
    FinancialHealth,
    AnalystSentiment,
    News,
    Price,
}

/// One triggered scoring rule with its human-readable explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub category: SignalCategory,
    pub text: String,
}

impl Signal {
    pub fn new(category: SignalCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Score for one analytical dimension (technical, fundamental, sentiment)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentScore {
    /// Weighted score in [0, 100]
    pub score: f64,
    /// Per-sub-dimension scores before weighting
    pub components: BTreeMap<String, f64>,
    /// Triggered rules, in evaluation order
    pub signals: Vec<Signal>,
}

impl ComponentScore {
    /// Neutral result used when a dimension has insufficient input data
    pub fn neutral() -> Self {
        Self {
            score: 50.0,
            components: BTreeMap::new(),
            signals: Vec::new(),
        }
    }
}

/// Categorical news sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    VeryNegative,
}

impl SentimentLabel {
    /// Label thresholds on the 0-100 news sentiment score
    pub fn from_score(score: f64) -> Self {
        if score >= 65.0 {
            SentimentLabel::VeryPositive
        } else if score >= 55.0 {
            SentimentLabel::Positive
        } else if score > 45.0 {
            SentimentLabel::Neutral
        } else if score >= 35.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::VeryNegative
        }
    }
}

/// A headline with its lexical sentiment score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredHeadline {
    pub title: String,
    pub sentiment_score: f64,
    #[serde(default)]
    pub publisher: Option<String>,
}

/// News sentiment breakdown for a batch of headlines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSentiment {
    pub score: f64,
    pub sentiment: SentimentLabel,
    pub news_count: usize,
    pub positive_count: usize,
    pub negative_count: usize,
    /// Top headlines retained for display
    pub headlines: Vec<ScoredHeadline>,
}

impl NewsSentiment {
    /// Neutral result for an empty news list
    pub fn empty() -> Self {
        Self {
            score: 50.0,
            sentiment: SentimentLabel::Neutral,
            news_count: 0,
            positive_count: 0,
            negative_count: 0,
            headlines: Vec::new(),
        }
    }
}

/// Chart pattern classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    BullishReversal,
    BearishReversal,
    BullishContinuation,
    BearishContinuation,
}

/// Detected chart pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPattern {
    pub name: String,
    pub kind: PatternKind,
    pub significance: Significance,
    pub description: String,
}

/// Event significance tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Low,
    Medium,
    High,
}

/// Kind of flagged anomalous market condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    #[serde(rename = "volume_spike")]
    VolumeSpike,
    #[serde(rename = "price_gap")]
    PriceGap,
    #[serde(rename = "52_week_high")]
    Week52High,
    #[serde(rename = "52_week_low")]
    Week52Low,
}

/// Flagged anomalous condition (volume spike, gap, 52-week extreme)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusualActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub significance: Significance,
}

/// Coarse risk tier of a security's volatility profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskCategory {
    /// Flat adjustment applied to the risk-adjusted score
    pub fn score_adjustment(&self) -> f64 {
        match self {
            RiskCategory::Conservative => 10.0,
            RiskCategory::Moderate => 0.0,
            RiskCategory::Aggressive => -10.0,
        }
    }

    /// Maximum fraction of portfolio value for a single position
    pub fn max_position_pct(&self) -> f64 {
        match self {
            RiskCategory::Conservative => 0.25,
            RiskCategory::Moderate => 0.15,
            RiskCategory::Aggressive => 0.10,
        }
    }

    /// Stop-loss distance below the entry price for new buys
    pub fn stop_loss_pct(&self) -> f64 {
        match self {
            RiskCategory::Conservative => 0.08,
            RiskCategory::Moderate => 0.12,
            RiskCategory::Aggressive => 0.18,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Conservative => "conservative",
            RiskCategory::Moderate => "moderate",
            RiskCategory::Aggressive => "aggressive",
        }
    }
}

/// Graded recommendation derived from the combined score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Recommendation {
    /// Map a combined score to a recommendation.
    ///
    /// The buy thresholds are checked before the sell thresholds, matching
    /// the documented evaluation order. The ranges are disjoint for the
    /// stock thresholds, but the order must not be rearranged.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Recommendation::StrongBuy
        } else if score >= 65.0 {
            Recommendation::Buy
        } else if score <= 25.0 {
            Recommendation::StrongSell
        } else if score <= 40.0 {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Recommendation::StrongBuy | Recommendation::Buy)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Recommendation::StrongSell | Recommendation::Sell)
    }

    /// Human-readable label ("strong buy", "hold", ...)
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "strong buy",
            Recommendation::Buy => "buy",
            Recommendation::Hold => "hold",
            Recommendation::Sell => "sell",
            Recommendation::StrongSell => "strong sell",
        }
    }
}

/// Component weights applied by the combination engine.
///
/// Each regime's weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub technical: f64,
    pub fundamental: f64,
    pub sentiment: f64,
    pub risk_adjusted: f64,
}

impl WeightSet {
    /// Default weights for normal market conditions
    pub fn normal() -> Self {
        Self {
            technical: 0.40,
            fundamental: 0.35,
            sentiment: 0.15,
            risk_adjusted: 0.10,
        }
    }

    /// High-volatility regime: technical signals weighted more
    pub fn high_volatility() -> Self {
        Self {
            technical: 0.50,
            fundamental: 0.25,
            sentiment: 0.15,
            risk_adjusted: 0.10,
        }
    }

    /// Low-volatility regime: fundamentals weighted more
    pub fn low_volatility() -> Self {
        Self {
            technical: 0.30,
            fundamental: 0.45,
            sentiment: 0.15,
            risk_adjusted: 0.10,
        }
    }

    /// Pick the regime for a volatility index (VIX-like) reading
    pub fn for_volatility_index(index: f64) -> Self {
        if index > 30.0 {
            Self::high_volatility()
        } else if index < 15.0 {
            Self::low_volatility()
        } else {
            Self::normal()
        }
    }

    pub fn sum(&self) -> f64 {
        self.technical + self.fundamental + self.sentiment + self.risk_adjusted
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        Self::normal()
    }
}

/// Complete analysis of one security
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub ticker: String,
    pub exchange: String,
    pub name: String,
    pub currency: String,
    pub current_price: f64,
    pub analyzed_at: DateTime<Utc>,
    pub combined_score: f64,
    pub recommendation: Recommendation,
    pub reasoning: String,
    pub technical: ComponentScore,
    pub fundamental: ComponentScore,
    pub sentiment: ComponentScore,
    pub news: NewsSentiment,
    pub patterns: Vec<ChartPattern>,
    pub unusual_activity: Vec<UnusualActivity>,
    pub risk_category: RiskCategory,
    pub risk_adjusted_score: f64,
}

/// Concrete position-sizing decision derived from an analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeAction {
    pub action: Recommendation,
    /// Whole shares: positive = buy, negative = sell, 0 = hold
    pub shares: i64,
    /// Absolute value of the trade (or current position for holds)
    pub value: f64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_position_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TradeAction {
    /// A no-trade action with an explanatory reason
    pub fn hold(price: f64, value: f64, reason: impl Into<String>) -> Self {
        Self {
            action: Recommendation::Hold,
            shares: 0,
            value,
            price,
            stop_loss: None,
            stop_loss_pct: None,
            max_position_value: None,
            reason: Some(reason.into()),
        }
    }
}

/// Clamp a score to the valid [0, 100] range
pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 100.0)
}

/// Round a score to one decimal place for reporting
pub fn round1(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
