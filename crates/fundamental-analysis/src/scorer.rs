use analysis_core::{clamp_score, round1, ComponentScore, Signal, SignalCategory, StockSnapshot};

struct SubScore {
    name: &'static str,
    score: f64,
    weight: f64,
}

/// Score a snapshot's financial metrics on a 0-100 scale.
///
/// Five weighted sub-dimensions, each starting from a neutral 50 and
/// adjusted by an ordered rule list; missing metrics simply skip their
/// rules. Sub-scores are clamped to [0, 100] before weighting.
pub fn fundamental_score(snapshot: &StockSnapshot) -> ComponentScore {
    let mut sub_scores: Vec<SubScore> = Vec::with_capacity(5);
    let mut signals: Vec<Signal> = Vec::new();

    // 1. Valuation (30%)
    let mut valuation = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Valuation, text);

        if let Some(pe) = snapshot.pe_ratio {
            if pe < 0.0 {
                valuation -= 15.0;
                signals.push(sig(format!("Negative P/E ({pe:.1}) - company unprofitable")));
            } else if pe < 15.0 {
                valuation += 15.0;
                signals.push(sig(format!("Low P/E ({pe:.1}) - potentially undervalued")));
            } else if pe < 25.0 {
                valuation += 5.0;
                signals.push(sig(format!("Moderate P/E ({pe:.1}) - fair valuation")));
            } else if pe < 40.0 {
                valuation -= 5.0;
                signals.push(sig(format!("High P/E ({pe:.1}) - growth expectations priced in")));
            } else {
                valuation -= 15.0;
                signals.push(sig(format!("Very high P/E ({pe:.1}) - potentially overvalued")));
            }
        }

        if let (Some(pe), Some(fpe)) = (snapshot.pe_ratio, snapshot.forward_pe) {
            if pe > 0.0 && fpe > 0.0 {
                if fpe < pe * 0.85 {
                    valuation += 10.0;
                    signals.push(sig(
                        "Forward P/E significantly lower - strong earnings growth expected".into(),
                    ));
                } else if fpe > pe * 1.15 {
                    valuation -= 10.0;
                    signals.push(sig("Forward P/E higher - earnings decline expected".into()));
                }
            }
        }

        if let Some(peg) = snapshot.peg_ratio {
            if peg > 0.0 {
                if peg < 1.0 {
                    valuation += 10.0;
                    signals.push(sig(format!(
                        "PEG ratio below 1 ({peg:.2}) - undervalued relative to growth"
                    )));
                } else if peg > 2.0 {
                    valuation -= 10.0;
                    signals.push(sig(format!(
                        "PEG ratio above 2 ({peg:.2}) - expensive relative to growth"
                    )));
                }
            }
        }

        if let Some(pb) = snapshot.price_to_book {
            if pb < 1.0 {
                valuation += 10.0;
                signals.push(sig(format!("P/B below 1 ({pb:.2}) - trading below book value")));
            } else if pb > 10.0 {
                valuation -= 5.0;
                signals.push(sig(format!("High P/B ({pb:.2}) - premium valuation")));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "valuation",
        score: clamp_score(valuation),
        weight: 0.30,
    });

    // 2. Growth (25%)
    let mut growth = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Growth, text);

        if let Some(eg) = snapshot.earnings_growth {
            let eg_pct = eg * 100.0;
            if eg_pct > 25.0 {
                growth += 20.0;
                signals.push(sig(format!("Strong earnings growth ({eg_pct:.1}%)")));
            } else if eg_pct > 10.0 {
                growth += 10.0;
                signals.push(sig(format!("Solid earnings growth ({eg_pct:.1}%)")));
            } else if eg_pct > 0.0 {
                growth += 5.0;
                signals.push(sig(format!("Positive earnings growth ({eg_pct:.1}%)")));
            } else if eg_pct > -10.0 {
                growth -= 5.0;
                signals.push(sig(format!("Slight earnings decline ({eg_pct:.1}%)")));
            } else {
                growth -= 15.0;
                signals.push(sig(format!("Significant earnings decline ({eg_pct:.1}%)")));
            }
        }

        if let Some(rg) = snapshot.revenue_growth {
            let rg_pct = rg * 100.0;
            if rg_pct > 20.0 {
                growth += 15.0;
                signals.push(sig(format!("Strong revenue growth ({rg_pct:.1}%)")));
            } else if rg_pct > 10.0 {
                growth += 10.0;
                signals.push(sig(format!("Solid revenue growth ({rg_pct:.1}%)")));
            } else if rg_pct > 0.0 {
                growth += 5.0;
                signals.push(sig(format!("Positive revenue growth ({rg_pct:.1}%)")));
            } else {
                growth -= 10.0;
                signals.push(sig(format!("Revenue decline ({rg_pct:.1}%)")));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "growth",
        score: clamp_score(growth),
        weight: 0.25,
    });

    // 3. Profitability (20%)
    let mut profitability = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Profitability, text);

        if let Some(pm) = snapshot.profit_margin {
            let pm_pct = pm * 100.0;
            if pm_pct > 20.0 {
                profitability += 15.0;
                signals.push(sig(format!("High profit margin ({pm_pct:.1}%)")));
            } else if pm_pct > 10.0 {
                profitability += 10.0;
                signals.push(sig(format!("Solid profit margin ({pm_pct:.1}%)")));
            } else if pm_pct > 0.0 {
                profitability += 5.0;
                signals.push(sig(format!("Positive profit margin ({pm_pct:.1}%)")));
            } else {
                profitability -= 15.0;
                signals.push(sig(format!("Negative profit margin ({pm_pct:.1}%)")));
            }
        }

        if let Some(om) = snapshot.operating_margin {
            let om_pct = om * 100.0;
            if om_pct > 25.0 {
                profitability += 10.0;
                signals.push(sig(format!("Excellent operating margin ({om_pct:.1}%)")));
            } else if om_pct > 15.0 {
                profitability += 5.0;
                signals.push(sig(format!("Good operating margin ({om_pct:.1}%)")));
            } else if om_pct < 0.0 {
                profitability -= 10.0;
                signals.push(sig(format!("Negative operating margin ({om_pct:.1}%)")));
            }
        }

        if let Some(fcf) = snapshot.free_cash_flow {
            if fcf > 0.0 {
                profitability += 10.0;
                signals.push(sig("Positive free cash flow".into()));
            } else {
                profitability -= 10.0;
                signals.push(sig("Negative free cash flow".into()));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "profitability",
        score: clamp_score(profitability),
        weight: 0.20,
    });

    // 4. Financial health (15%)
    let mut health = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::FinancialHealth, text);

        // Debt-to-equity arrives as a percentage
        if let Some(de) = snapshot.debt_to_equity {
            if de < 30.0 {
                health += 15.0;
                signals.push(sig(format!(
                    "Low debt-to-equity ({de:.1}%) - strong balance sheet"
                )));
            } else if de < 100.0 {
                health += 5.0;
                signals.push(sig(format!("Moderate debt-to-equity ({de:.1}%)")));
            } else if de < 200.0 {
                health -= 5.0;
                signals.push(sig(format!("High debt-to-equity ({de:.1}%)")));
            } else {
                health -= 15.0;
                signals.push(sig(format!("Very high debt ({de:.1}%) - leverage risk")));
            }
        }

        if let Some(cr) = snapshot.current_ratio {
            if cr > 2.0 {
                health += 10.0;
                signals.push(sig(format!("Strong current ratio ({cr:.2}) - good liquidity")));
            } else if cr > 1.0 {
                health += 5.0;
                signals.push(sig(format!("Adequate current ratio ({cr:.2})")));
            } else {
                health -= 15.0;
                signals.push(sig(format!("Low current ratio ({cr:.2}) - liquidity concern")));
            }
        }

        if let (Some(cash), Some(debt)) = (snapshot.total_cash, snapshot.total_debt) {
            if debt > 0.0 {
                let cash_debt_ratio = cash / debt;
                if cash_debt_ratio > 1.0 {
                    health += 10.0;
                    signals.push(sig("Cash exceeds total debt - strong position".into()));
                } else if cash_debt_ratio > 0.5 {
                    health += 5.0;
                    signals.push(sig("Adequate cash relative to debt".into()));
                }
            }
        }
    }
    sub_scores.push(SubScore {
        name: "financial_health",
        score: clamp_score(health),
        weight: 0.15,
    });

    // 5. Analyst sentiment (10%)
    let mut analyst = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::AnalystSentiment, text);

        // Consensus on the 1-5 scale, 1 = strong buy
        if let Some(rec) = snapshot.recommendation_mean {
            if rec < 2.0 {
                analyst += 25.0;
                signals.push(sig(format!("Strong analyst buy rating ({rec:.2})")));
            } else if rec < 2.5 {
                analyst += 15.0;
                signals.push(sig(format!("Analyst buy rating ({rec:.2})")));
            } else if rec < 3.5 {
                signals.push(sig(format!("Analyst hold rating ({rec:.2})")));
            } else if rec < 4.5 {
                analyst -= 15.0;
                signals.push(sig(format!("Analyst sell rating ({rec:.2})")));
            } else {
                analyst -= 25.0;
                signals.push(sig(format!("Strong analyst sell rating ({rec:.2})")));
            }
        }

        if let (Some(target), Some(price)) = (snapshot.target_price, snapshot.current_price) {
            if price > 0.0 {
                let upside = (target - price) / price * 100.0;
                if upside > 30.0 {
                    analyst += 15.0;
                    signals.push(sig(format!("Significant upside to target ({upside:.1}%)")));
                } else if upside > 10.0 {
                    analyst += 10.0;
                    signals.push(sig(format!("Positive upside to target ({upside:.1}%)")));
                } else if upside > -10.0 {
                    signals.push(sig(format!("Near analyst target ({upside:.1}%)")));
                } else {
                    analyst -= 15.0;
                    signals.push(sig(format!("Trading above target ({upside:.1}%)")));
                }
            }
        }
    }
    sub_scores.push(SubScore {
        name: "analyst_sentiment",
        score: clamp_score(analyst),
        weight: 0.10,
    });

    let final_score: f64 = sub_scores.iter().map(|s| s.score * s.weight).sum();
    tracing::debug!(
        ticker = %snapshot.ticker,
        score = final_score,
        signal_count = signals.len(),
        "fundamental score computed"
    );

    ComponentScore {
        score: round1(final_score),
        components: sub_scores
            .iter()
            .map(|s| (s.name.to_string(), s.score))
            .collect(),
        signals,
    }
}
