use analysis_core::{RiskCategory, StockSnapshot};

const AGGRESSIVE_SECTORS: [&str; 4] = [
    "technology",
    "biotechnology",
    "cryptocurrency",
    "cannabis",
];

const CONSERVATIVE_SECTORS: [&str; 3] = ["utilities", "consumer defensive", "healthcare"];

/// Classify a stock's risk tier from exchange, size, beta and sector.
///
/// Rules are ordered; the first match wins, and a stock with none of the
/// relevant fields defaults to moderate.
pub fn classify_risk(snapshot: &StockSnapshot) -> RiskCategory {
    let exchange = snapshot.exchange.to_lowercase();
    let sector = snapshot.sector.as_deref().unwrap_or_default().to_lowercase();

    // Junior exchanges carry junior-exchange risk regardless of size
    if exchange.contains("venture") || exchange.contains("-v") {
        return RiskCategory::Aggressive;
    }

    if let Some(cap) = snapshot.market_cap {
        if cap < 300_000_000.0 {
            return RiskCategory::Aggressive;
        } else if cap < 2_000_000_000.0 {
            return RiskCategory::Moderate;
        }
    }

    if let Some(beta) = snapshot.beta {
        if beta > 1.5 {
            return RiskCategory::Aggressive;
        } else if beta > 1.1 {
            return RiskCategory::Moderate;
        }
    }

    for s in AGGRESSIVE_SECTORS {
        if sector.contains(s) {
            // Mega-cap names in volatile sectors are only moderate
            return match snapshot.market_cap {
                Some(cap) if cap < 10_000_000_000.0 => RiskCategory::Aggressive,
                Some(_) => RiskCategory::Moderate,
                None => RiskCategory::Moderate,
            };
        }
    }

    for s in CONSERVATIVE_SECTORS {
        if sector.contains(s) {
            return RiskCategory::Conservative;
        }
    }

    RiskCategory::Moderate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StockSnapshot {
        StockSnapshot {
            market_cap: Some(50_000_000_000.0),
            beta: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn venture_exchange_is_always_aggressive() {
        let snap = StockSnapshot {
            exchange: "TSX Venture".to_string(),
            ..snapshot()
        };
        assert_eq!(classify_risk(&snap), RiskCategory::Aggressive);
    }

    #[test]
    fn market_cap_tiers() {
        let micro = StockSnapshot {
            market_cap: Some(150_000_000.0),
            ..Default::default()
        };
        assert_eq!(classify_risk(&micro), RiskCategory::Aggressive);

        let small = StockSnapshot {
            market_cap: Some(1_500_000_000.0),
            ..Default::default()
        };
        assert_eq!(classify_risk(&small), RiskCategory::Moderate);
    }

    #[test]
    fn beta_tiers() {
        let high_beta = StockSnapshot {
            beta: Some(1.8),
            ..snapshot()
        };
        assert_eq!(classify_risk(&high_beta), RiskCategory::Aggressive);

        let elevated_beta = StockSnapshot {
            beta: Some(1.3),
            ..snapshot()
        };
        assert_eq!(classify_risk(&elevated_beta), RiskCategory::Moderate);
    }

    #[test]
    fn cap_tier_beats_beta() {
        // A micro cap with a low beta is still aggressive
        let snap = StockSnapshot {
            market_cap: Some(100_000_000.0),
            beta: Some(0.5),
            ..Default::default()
        };
        assert_eq!(classify_risk(&snap), RiskCategory::Aggressive);
    }

    #[test]
    fn sector_rules() {
        let small_tech = StockSnapshot {
            market_cap: Some(5_000_000_000.0),
            beta: Some(1.0),
            sector: Some("Technology".to_string()),
            ..Default::default()
        };
        assert_eq!(classify_risk(&small_tech), RiskCategory::Aggressive);

        let mega_tech = StockSnapshot {
            sector: Some("Technology".to_string()),
            ..snapshot()
        };
        assert_eq!(classify_risk(&mega_tech), RiskCategory::Moderate);

        let utility = StockSnapshot {
            sector: Some("Utilities".to_string()),
            ..snapshot()
        };
        assert_eq!(classify_risk(&utility), RiskCategory::Conservative);
    }

    #[test]
    fn empty_snapshot_defaults_to_moderate() {
        assert_eq!(classify_risk(&StockSnapshot::default()), RiskCategory::Moderate);
    }
}
