use analysis_core::{
    clamp_score, round1, ActivityKind, AnalysisError, Bar, ComponentScore, NewsItem,
    Recommendation, RiskCategory, StockAnalysis, StockSnapshot, TradeAction, UnusualActivity,
    WeightSet,
};
use chrono::Utc;
use fundamental_analysis::{classify_risk, fundamental_score};
use sentiment_analysis::{detect_unusual_activity, sentiment_score};
use technical_analysis::{detect_patterns, technical_score, IndicatorSet};

use crate::reasoning::synthesize_reasoning;

/// Combines the technical, fundamental and sentiment dimensions into a
/// single recommendation.
///
/// The engine itself is pure over its inputs; the only state is the active
/// weight set, mutated explicitly via [`AdvisorEngine::set_volatility_regime`].
/// Callers sharing one instance across threads must serialize weight changes.
pub struct AdvisorEngine {
    weights: WeightSet,
}

impl AdvisorEngine {
    pub fn new() -> Self {
        Self {
            weights: WeightSet::normal(),
        }
    }

    pub fn weights(&self) -> &WeightSet {
        &self.weights
    }

    /// Switch the weight regime from a volatility index reading.
    ///
    /// Above 30 leans on technicals, below 15 on fundamentals; anything in
    /// between restores the defaults.
    pub fn set_volatility_regime(&mut self, index: f64) {
        self.weights = WeightSet::for_volatility_index(index);
        tracing::debug!(index, weights = ?self.weights, "weight regime updated");
    }

    /// Run the full analysis over already-fetched inputs.
    ///
    /// Missing bars or news degrade their dimensions to neutral; a snapshot
    /// without a current price fails the whole call.
    pub fn analyze(
        &self,
        snapshot: &StockSnapshot,
        bars: Option<&[Bar]>,
        news: Option<&[NewsItem]>,
    ) -> Result<StockAnalysis, AnalysisError> {
        let current_price = match snapshot.current_price {
            Some(price) => price,
            None => {
                tracing::warn!(ticker = %snapshot.ticker, "snapshot has no current price");
                return Err(AnalysisError::NoPriceData {
                    ticker: snapshot.ticker.clone(),
                    exchange: snapshot.exchange.clone(),
                });
            }
        };

        let (technical, patterns) = match bars {
            Some(bars) if !bars.is_empty() => {
                let indicators = IndicatorSet::compute(bars);
                (technical_score(&indicators), detect_patterns(bars))
            }
            _ => (ComponentScore::neutral(), Vec::new()),
        };

        let fundamental = fundamental_score(snapshot);
        let (sentiment, news_analysis) = sentiment_score(news.unwrap_or_default(), snapshot);
        let unusual_activity = detect_unusual_activity(snapshot);
        let risk_category = classify_risk(snapshot);

        let risk_adjusted_score = risk_adjusted(
            technical.score,
            fundamental.score,
            sentiment.score,
            risk_category,
            &unusual_activity,
        );

        let combined_score = round1(
            technical.score * self.weights.technical
                + fundamental.score * self.weights.fundamental
                + sentiment.score * self.weights.sentiment
                + risk_adjusted_score * self.weights.risk_adjusted,
        );

        let recommendation = Recommendation::from_score(combined_score);
        let reasoning = synthesize_reasoning(
            &technical,
            &fundamental,
            &sentiment,
            &patterns,
            &unusual_activity,
            recommendation,
        );

        tracing::info!(
            ticker = %snapshot.ticker,
            combined_score,
            recommendation = recommendation.label(),
            "analysis complete"
        );

        Ok(StockAnalysis {
            ticker: snapshot.ticker.clone(),
            exchange: snapshot.exchange.clone(),
            name: if snapshot.name.is_empty() {
                snapshot.ticker.clone()
            } else {
                snapshot.name.clone()
            },
            currency: snapshot.currency.clone(),
            current_price,
            analyzed_at: Utc::now(),
            combined_score,
            recommendation,
            reasoning,
            technical,
            fundamental,
            sentiment,
            news: news_analysis,
            patterns,
            unusual_activity,
            risk_category,
            risk_adjusted_score,
        })
    }

    /// Turn an analysis into a concrete whole-share trade proposal.
    ///
    /// All monetary inputs must already share one currency; the engine does
    /// no conversion.
    pub fn size_action(
        &self,
        analysis: &StockAnalysis,
        portfolio_value: f64,
        cash_available: f64,
        current_shares: i64,
    ) -> TradeAction {
        let price = analysis.current_price;
        if price <= 0.0 {
            return TradeAction::hold(price, 0.0, "Invalid price data");
        }

        let max_position_pct = analysis.risk_category.max_position_pct();
        let max_position_value = portfolio_value * max_position_pct;
        let current_position_value = current_shares as f64 * price;

        if analysis.recommendation.is_buy() {
            // A position with less than one share of headroom under the cap
            // cannot be added to; that is a cap limit, not a cash limit
            let headroom = max_position_value - current_position_value;
            if headroom < price {
                return TradeAction::hold(
                    price,
                    current_position_value,
                    format!(
                        "Already at maximum position size ({:.0}% of portfolio)",
                        max_position_pct * 100.0
                    ),
                );
            }

            let available_to_invest = cash_available.min(headroom);
            if available_to_invest < price {
                return TradeAction::hold(
                    price,
                    current_position_value,
                    "Insufficient cash for minimum position",
                );
            }

            let shares_to_buy = (available_to_invest / price).floor() as i64;
            let stop_loss_pct = analysis.risk_category.stop_loss_pct();
            let stop_loss = (price * (1.0 - stop_loss_pct) * 100.0).round() / 100.0;

            return TradeAction {
                action: analysis.recommendation,
                shares: shares_to_buy,
                value: shares_to_buy as f64 * price,
                price,
                stop_loss: Some(stop_loss),
                stop_loss_pct: Some(stop_loss_pct * 100.0),
                max_position_value: Some(max_position_value),
                reason: None,
            };
        }

        if analysis.recommendation.is_sell() {
            if current_shares <= 0 {
                return TradeAction::hold(price, 0.0, "No position to sell");
            }

            let shares_to_sell = if analysis.recommendation == Recommendation::StrongSell {
                current_shares
            } else {
                current_shares / 2
            };

            return TradeAction {
                action: analysis.recommendation,
                shares: -shares_to_sell,
                value: shares_to_sell as f64 * price,
                price,
                stop_loss: None,
                stop_loss_pct: None,
                max_position_value: None,
                reason: None,
            };
        }

        TradeAction {
            action: Recommendation::Hold,
            shares: 0,
            value: current_position_value,
            price,
            stop_loss: None,
            stop_loss_pct: None,
            max_position_value: None,
            reason: None,
        }
    }
}

impl Default for AdvisorEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean of the component scores shifted by risk tier and unusual activity
fn risk_adjusted(
    technical: f64,
    fundamental: f64,
    sentiment: f64,
    risk_category: RiskCategory,
    unusual_activity: &[UnusualActivity],
) -> f64 {
    let base = (technical + fundamental + sentiment) / 3.0;
    let mut score = base + risk_category.score_adjustment();

    for activity in unusual_activity {
        match activity.kind {
            // High volume can confirm a move
            ActivityKind::VolumeSpike => score += 5.0,
            // Momentum near the highs, but also extension risk
            ActivityKind::Week52High => score -= 5.0,
            // Opportunity or value trap, net neutral
            ActivityKind::Week52Low => {}
            ActivityKind::PriceGap => {}
        }
    }

    clamp_score(score)
}
