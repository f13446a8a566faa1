use analysis_core::{clamp_score, round1, ComponentScore, Signal, SignalCategory};

use crate::indicators::IndicatorSet;

/// Minimum number of sessions for a meaningful technical score
pub const MIN_SESSIONS: usize = 50;

struct SubScore {
    name: &'static str,
    score: f64,
    weight: f64,
}

/// Score the latest session of an indicator set on a 0-100 scale.
///
/// Five weighted sub-dimensions, each starting from a neutral 50 and
/// adjusted by an ordered list of rules; sub-scores are clamped to [0, 100]
/// before weighting. Indicators that are still NaN (window not yet filled)
/// skip their rules. Fewer than 50 sessions yields the neutral result.
pub fn technical_score(ind: &IndicatorSet) -> ComponentScore {
    if ind.len() < MIN_SESSIONS {
        tracing::debug!(
            sessions = ind.len(),
            "insufficient history for technical scoring, returning neutral"
        );
        return ComponentScore::neutral();
    }

    let mut sub_scores: Vec<SubScore> = Vec::with_capacity(5);
    let mut signals: Vec<Signal> = Vec::new();

    let close = IndicatorSet::latest(&ind.close);

    // 1. Trend (25%)
    let mut trend = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Trend, text);
        let sma_20 = IndicatorSet::latest(&ind.sma_20);
        let sma_50 = IndicatorSet::latest(&ind.sma_50);
        let sma_200 = IndicatorSet::latest(&ind.sma_200);

        if !sma_20.is_nan() {
            if close > sma_20 {
                trend += 5.0;
                signals.push(sig("Price above SMA20 (bullish)".into()));
            } else {
                trend -= 5.0;
                signals.push(sig("Price below SMA20 (bearish)".into()));
            }
        }
        if !sma_50.is_nan() {
            if close > sma_50 {
                trend += 5.0;
                signals.push(sig("Price above SMA50 (bullish)".into()));
            } else {
                trend -= 5.0;
                signals.push(sig("Price below SMA50 (bearish)".into()));
            }
        }
        if !sma_200.is_nan() {
            if close > sma_200 {
                trend += 10.0;
                signals.push(sig("Price above SMA200 (long-term bullish)".into()));
            } else {
                trend -= 10.0;
                signals.push(sig("Price below SMA200 (long-term bearish)".into()));
            }
        }
        if !sma_50.is_nan() && !sma_200.is_nan() {
            if sma_50 > sma_200 {
                trend += 10.0;
                signals.push(sig("Golden cross active (SMA50 > SMA200)".into()));
            } else {
                trend -= 10.0;
                signals.push(sig("Death cross active (SMA50 < SMA200)".into()));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "trend",
        score: clamp_score(trend),
        weight: 0.25,
    });

    // 2. Momentum (25%)
    let mut momentum = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Momentum, text);
        let rsi = IndicatorSet::latest(&ind.rsi);
        if !rsi.is_nan() {
            if rsi < 30.0 {
                momentum += 15.0;
                signals.push(sig(format!("RSI oversold ({rsi:.1}) - potential bounce")));
            } else if rsi > 70.0 {
                momentum -= 15.0;
                signals.push(sig(format!("RSI overbought ({rsi:.1}) - potential pullback")));
            } else if (40.0..=60.0).contains(&rsi) {
                momentum += 5.0;
                signals.push(sig(format!("RSI neutral ({rsi:.1})")));
            }
        }

        let macd = IndicatorSet::latest(&ind.macd);
        let macd_signal = IndicatorSet::latest(&ind.macd_signal);
        if !macd.is_nan() && !macd_signal.is_nan() {
            if macd > macd_signal {
                momentum += 10.0;
                signals.push(sig("MACD bullish crossover".into()));
            } else {
                momentum -= 10.0;
                signals.push(sig("MACD bearish crossover".into()));
            }

            let hist = &ind.macd_histogram;
            let hist_now = IndicatorSet::latest(hist);
            if !hist_now.is_nan() {
                let hist_prev = if hist.len() > 1 {
                    hist[hist.len() - 2]
                } else {
                    hist_now
                };
                if hist_now > hist_prev {
                    momentum += 5.0;
                    signals.push(sig("MACD histogram increasing".into()));
                }
            }
        }

        let stoch = IndicatorSet::latest(&ind.stoch_rsi);
        if !stoch.is_nan() {
            if stoch < 20.0 {
                momentum += 10.0;
                signals.push(sig(format!("Stochastic RSI oversold ({stoch:.1})")));
            } else if stoch > 80.0 {
                momentum -= 10.0;
                signals.push(sig(format!("Stochastic RSI overbought ({stoch:.1})")));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "momentum",
        score: clamp_score(momentum),
        weight: 0.25,
    });

    // 3. Volatility (20%)
    let mut volatility = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Volatility, text);
        let bb_pos = IndicatorSet::latest(&ind.bb_position);
        if !bb_pos.is_nan() {
            if bb_pos < 0.2 {
                volatility += 15.0;
                signals.push(sig("Price near lower Bollinger Band (potential support)".into()));
            } else if bb_pos > 0.8 {
                volatility -= 10.0;
                signals.push(sig("Price near upper Bollinger Band (potential resistance)".into()));
            }

            // Squeeze: current width well below the trailing-20 average width
            let bb_width = IndicatorSet::latest(&ind.bb_width);
            if !bb_width.is_nan() {
                let tail = &ind.bb_width[ind.bb_width.len().saturating_sub(20)..];
                let defined: Vec<f64> = tail.iter().copied().filter(|w| !w.is_nan()).collect();
                if !defined.is_empty() {
                    let recent_width = defined.iter().sum::<f64>() / defined.len() as f64;
                    if bb_width < recent_width * 0.7 {
                        volatility += 10.0;
                        signals.push(sig("Bollinger squeeze detected - breakout likely".into()));
                    }
                }
            }
        }

        let adx = IndicatorSet::latest(&ind.adx);
        if !adx.is_nan() {
            if adx > 25.0 {
                signals.push(sig(format!("Strong trend (ADX: {adx:.1})")));
                let di_plus = IndicatorSet::latest(&ind.di_plus);
                let di_minus = IndicatorSet::latest(&ind.di_minus);
                if !di_plus.is_nan() && !di_minus.is_nan() {
                    if di_plus > di_minus {
                        volatility += 10.0;
                        signals.push(sig("Bullish trend confirmed (DI+ > DI-)".into()));
                    } else {
                        volatility -= 10.0;
                        signals.push(sig("Bearish trend confirmed (DI- > DI+)".into()));
                    }
                }
            } else {
                signals.push(sig(format!("Weak trend (ADX: {adx:.1})")));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "volatility",
        score: clamp_score(volatility),
        weight: 0.20,
    });

    // 4. Volume (15%)
    let mut volume = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Volume, text);
        let vol_ratio = IndicatorSet::latest(&ind.volume_ratio);
        if !vol_ratio.is_nan() {
            if vol_ratio > 1.5 {
                volume += 15.0;
                signals.push(sig(format!("High volume ({vol_ratio:.1}x average) - confirms move")));
            } else if vol_ratio < 0.5 {
                volume -= 10.0;
                signals.push(sig(format!("Low volume ({vol_ratio:.1}x average) - weak conviction")));
            }
        }

        let mfi = IndicatorSet::latest(&ind.mfi);
        if !mfi.is_nan() {
            if mfi < 20.0 {
                volume += 10.0;
                signals.push(sig(format!("MFI oversold ({mfi:.1}) - buying pressure likely")));
            } else if mfi > 80.0 {
                volume -= 10.0;
                signals.push(sig(format!("MFI overbought ({mfi:.1}) - selling pressure likely")));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "volume",
        score: clamp_score(volume),
        weight: 0.15,
    });

    // 5. Price action (15%)
    let mut price_action = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::PriceAction, text);
        let roc5 = IndicatorSet::latest(&ind.roc_5);
        if !roc5.is_nan() {
            if roc5 > 5.0 {
                price_action += 10.0;
                signals.push(sig(format!("Strong 5-day momentum (+{roc5:.1}%)")));
            } else if roc5 < -5.0 {
                price_action -= 10.0;
                signals.push(sig(format!("Weak 5-day momentum ({roc5:.1}%)")));
            }
        }

        let williams = IndicatorSet::latest(&ind.williams_r);
        if !williams.is_nan() {
            if williams < -80.0 {
                price_action += 10.0;
                signals.push(sig(format!("Williams %R oversold ({williams:.1})")));
            } else if williams > -20.0 {
                price_action -= 10.0;
                signals.push(sig(format!("Williams %R overbought ({williams:.1})")));
            }
        }

        let cci = IndicatorSet::latest(&ind.cci);
        if !cci.is_nan() {
            if cci < -100.0 {
                price_action += 10.0;
                signals.push(sig(format!("CCI oversold ({cci:.1})")));
            } else if cci > 100.0 {
                price_action -= 10.0;
                signals.push(sig(format!("CCI overbought ({cci:.1})")));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "price_action",
        score: clamp_score(price_action),
        weight: 0.15,
    });

    let final_score: f64 = sub_scores.iter().map(|s| s.score * s.weight).sum();

    ComponentScore {
        score: round1(final_score),
        components: sub_scores
            .iter()
            .map(|s| (s.name.to_string(), s.score))
            .collect(),
        signals,
    }
}
