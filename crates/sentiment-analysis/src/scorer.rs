use analysis_core::{
    clamp_score, round1, ComponentScore, NewsItem, NewsSentiment, ScoredHeadline, SentimentLabel,
    Signal, SignalCategory, StockSnapshot,
};

use crate::lexicon::text_sentiment;

struct SubScore {
    name: &'static str,
    score: f64,
    weight: f64,
}

/// Aggregate headline sentiment over a news feed.
///
/// An empty feed reports a neutral 50 with no headlines rather than an
/// error; absence of news is not a signal either way.
pub fn news_sentiment(news: &[NewsItem]) -> NewsSentiment {
    if news.is_empty() {
        return NewsSentiment::empty();
    }

    let mut scored: Vec<ScoredHeadline> = news
        .iter()
        .map(|item| ScoredHeadline {
            sentiment_score: text_sentiment(&item.title),
            title: item.title.clone(),
            publisher: item.publisher.clone(),
        })
        .collect();

    let avg = scored.iter().map(|h| h.sentiment_score).sum::<f64>() / scored.len() as f64;
    let positive_count = scored.iter().filter(|h| h.sentiment_score > 55.0).count();
    let negative_count = scored.iter().filter(|h| h.sentiment_score < 45.0).count();

    scored.truncate(5);

    NewsSentiment {
        score: round1(avg),
        sentiment: SentimentLabel::from_score(avg),
        news_count: news.len(),
        positive_count,
        negative_count,
        headlines: scored,
    }
}

/// Score market sentiment from news, recent price action and volume.
///
/// Returns the weighted component score together with the underlying
/// news breakdown so callers can surface headlines.
pub fn sentiment_score(news: &[NewsItem], snapshot: &StockSnapshot) -> (ComponentScore, NewsSentiment) {
    let mut sub_scores: Vec<SubScore> = Vec::with_capacity(3);
    let mut signals: Vec<Signal> = Vec::new();

    // 1. News (60%)
    let news_analysis = news_sentiment(news);
    {
        let text = match news_analysis.sentiment {
            SentimentLabel::VeryPositive => "Very positive news sentiment",
            SentimentLabel::Positive => "Positive news sentiment",
            SentimentLabel::Neutral => "Neutral news sentiment",
            SentimentLabel::Negative => "Negative news sentiment",
            SentimentLabel::VeryNegative => "Very negative news sentiment",
        };
        signals.push(Signal::new(SignalCategory::News, text.to_string()));

        if news_analysis.news_count < 3 {
            signals.push(Signal::new(
                SignalCategory::News,
                "Limited news coverage".to_string(),
            ));
        }
    }
    sub_scores.push(SubScore {
        name: "news",
        score: news_analysis.score,
        weight: 0.60,
    });

    // 2. Price action (25%)
    let mut price = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Price, text);

        if let (Some(current), Some(prev)) = (snapshot.current_price, snapshot.previous_close) {
            if prev > 0.0 {
                let daily_change_pct = (current - prev) / prev * 100.0;
                if daily_change_pct > 5.0 {
                    price += 25.0;
                    signals.push(sig(format!("Strong daily gain (+{daily_change_pct:.1}%)")));
                } else if daily_change_pct > 2.0 {
                    price += 15.0;
                    signals.push(sig(format!("Positive daily movement (+{daily_change_pct:.1}%)")));
                } else if daily_change_pct < -5.0 {
                    price -= 25.0;
                    signals.push(sig(format!("Strong daily decline ({daily_change_pct:.1}%)")));
                } else if daily_change_pct < -2.0 {
                    price -= 15.0;
                    signals.push(sig(format!("Negative daily movement ({daily_change_pct:.1}%)")));
                }
            }
        }

        if let (Some(current), Some(high), Some(low)) = (
            snapshot.current_price,
            snapshot.week_52_high,
            snapshot.week_52_low,
        ) {
            let range_position = if high > low {
                (current - low) / (high - low)
            } else {
                0.5
            };
            if range_position > 0.9 {
                price += 10.0;
                signals.push(sig("Trading near 52-week high".to_string()));
            } else if range_position < 0.2 {
                // Depressed names can be value entries, so this also adds
                price += 10.0;
                signals.push(sig("Trading near 52-week low - potential value".to_string()));
            }
        }
    }
    sub_scores.push(SubScore {
        name: "price_action",
        score: clamp_score(price),
        weight: 0.25,
    });

    // 3. Volume (15%)
    let mut volume = 50.0;
    {
        let sig = |text: String| Signal::new(SignalCategory::Volume, text);

        if let (Some(avg), Some(avg_10d)) = (snapshot.avg_volume, snapshot.avg_volume_10d) {
            if avg > 0.0 {
                let volume_change = (avg_10d - avg) / avg * 100.0;
                if volume_change > 50.0 {
                    volume += 20.0;
                    signals.push(sig(format!("Unusual volume increase (+{volume_change:.0}%)")));
                } else if volume_change > 20.0 {
                    volume += 10.0;
                    signals.push(sig(format!("Elevated volume (+{volume_change:.0}%)")));
                } else if volume_change < -30.0 {
                    volume -= 10.0;
                    signals.push(sig("Declining volume - reduced interest".to_string()));
                }
            }
        }
    }
    sub_scores.push(SubScore {
        name: "volume",
        score: clamp_score(volume),
        weight: 0.15,
    });

    let final_score: f64 = sub_scores.iter().map(|s| s.score * s.weight).sum();
    tracing::debug!(
        ticker = %snapshot.ticker,
        news_count = news_analysis.news_count,
        score = final_score,
        "sentiment score computed"
    );

    let component = ComponentScore {
        score: round1(final_score),
        components: sub_scores
            .iter()
            .map(|s| (s.name.to_string(), s.score))
            .collect(),
        signals,
    };

    (component, news_analysis)
}
