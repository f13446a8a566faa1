use analysis_core::{ActivityKind, Significance, StockSnapshot, UnusualActivity};

/// Flag activity that often precedes outsized moves.
///
/// Checks run independently; a stock can trigger several at once and a
/// snapshot missing the relevant fields triggers none.
pub fn detect_unusual_activity(snapshot: &StockSnapshot) -> Vec<UnusualActivity> {
    let mut unusual = Vec::new();

    if let (Some(avg), Some(avg_10d)) = (snapshot.avg_volume, snapshot.avg_volume_10d) {
        if avg > 0.0 && avg_10d > avg * 2.0 {
            unusual.push(UnusualActivity {
                kind: ActivityKind::VolumeSpike,
                description: format!("Volume {:.1}x above average", avg_10d / avg),
                significance: Significance::High,
            });
        }
    }

    if let (Some(open), Some(prev)) = (snapshot.open, snapshot.previous_close) {
        if prev > 0.0 {
            let gap_pct = (open - prev) / prev * 100.0;
            if gap_pct.abs() > 3.0 {
                let direction = if gap_pct > 0.0 { "up" } else { "down" };
                unusual.push(UnusualActivity {
                    kind: ActivityKind::PriceGap,
                    description: format!("Gap {direction} {:.1}% at open", gap_pct.abs()),
                    significance: if gap_pct.abs() > 5.0 {
                        Significance::High
                    } else {
                        Significance::Medium
                    },
                });
            }
        }
    }

    if let (Some(current), Some(high)) = (snapshot.current_price, snapshot.week_52_high) {
        if current >= high * 0.98 {
            unusual.push(UnusualActivity {
                kind: ActivityKind::Week52High,
                description: "Trading at or near 52-week high".to_string(),
                significance: Significance::Medium,
            });
        }
    }

    if let (Some(current), Some(low)) = (snapshot.current_price, snapshot.week_52_low) {
        if current <= low * 1.02 {
            unusual.push(UnusualActivity {
                kind: ActivityKind::Week52Low,
                description: "Trading at or near 52-week low".to_string(),
                significance: Significance::Medium,
            });
        }
    }

    unusual
}
