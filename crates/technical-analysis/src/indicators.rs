use analysis_core::Bar;

/// Apply `f` over trailing windows of `period`, NaN-padding until the window
/// fills. A window containing NaN stays NaN.
fn rolling<F>(data: &[f64], period: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut result = vec![f64::NAN; data.len()];
    if period == 0 || data.len() < period {
        return result;
    }
    for i in period - 1..data.len() {
        let window = &data[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = f(window);
    }
    result
}

fn window_mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Simple Moving Average, aligned to the input (NaN until the window fills)
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    rolling(data, period, window_mean)
}

/// Exponential Moving Average over `span`, seeded at the first value
pub fn ema(data: &[f64], span: usize) -> Vec<f64> {
    if data.is_empty() || span == 0 {
        return vec![f64::NAN; data.len()];
    }
    let multiplier = 2.0 / (span as f64 + 1.0);
    let mut result = Vec::with_capacity(data.len());
    result.push(data[0]);
    for i in 1..data.len() {
        let prev = result[i - 1];
        result.push((data[i] - prev) * multiplier + prev);
    }
    result
}

/// Relative Strength Index from rolling average gain vs average loss
pub fn rsi(close: &[f64], period: usize) -> Vec<f64> {
    let mut gains = vec![0.0; close.len()];
    let mut losses = vec![0.0; close.len()];
    for i in 1..close.len() {
        let change = close[i] - close[i - 1];
        if change > 0.0 {
            gains[i] = change;
        } else {
            losses[i] = -change;
        }
    }

    let avg_gain = rolling(&gains, period, window_mean);
    let avg_loss = rolling(&losses, period, window_mean);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            let rs = g / l;
            100.0 - (100.0 / (1.0 + rs))
        })
        .collect()
}

/// Stochastic RSI: the RSI's position within its own trailing range, 0-100
pub fn stoch_rsi(close: &[f64], period: usize) -> Vec<f64> {
    let rsi_values = rsi(close, period);
    let min = rolling(&rsi_values, period, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    });
    let max = rolling(&rsi_values, period, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    });

    rsi_values
        .iter()
        .enumerate()
        .map(|(i, &r)| (r - min[i]) / (max[i] - min[i]) * 100.0)
        .collect()
}

/// MACD line, signal line and histogram
pub struct MacdResult {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(close: &[f64], fast_span: usize, slow_span: usize, signal_span: usize) -> MacdResult {
    let ema_fast = ema(close, fast_span);
    let ema_slow = ema(close, slow_span);

    let macd: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(&f, &s)| f - s)
        .collect();
    let signal = ema(&macd, signal_span);
    let histogram: Vec<f64> = macd.iter().zip(&signal).map(|(&m, &s)| m - s).collect();

    MacdResult {
        macd,
        signal,
        histogram,
    }
}

/// Bollinger Bands with normalized width and band position
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    /// (upper - lower) / middle
    pub width: Vec<f64>,
    /// Close's position within the band, 0 at the lower band, 1 at the upper
    pub position: Vec<f64>,
}

pub fn bollinger_bands(close: &[f64], period: usize, num_std: f64) -> BollingerBands {
    let middle = sma(close, period);
    // Sample standard deviation over the trailing window
    let std = rolling(close, period, |w| {
        let mean = window_mean(w);
        let variance = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (w.len() - 1) as f64;
        variance.sqrt()
    });

    let n = close.len();
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    let mut width = vec![f64::NAN; n];
    let mut position = vec![f64::NAN; n];

    for i in 0..n {
        upper[i] = middle[i] + std[i] * num_std;
        lower[i] = middle[i] - std[i] * num_std;
        width[i] = (upper[i] - lower[i]) / middle[i];
        position[i] = (close[i] - lower[i]) / (upper[i] - lower[i]);
    }

    BollingerBands {
        upper,
        middle,
        lower,
        width,
        position,
    }
}

fn true_range(bars: &[Bar]) -> Vec<f64> {
    let mut tr = Vec::with_capacity(bars.len());
    for (i, bar) in bars.iter().enumerate() {
        let high_low = bar.high - bar.low;
        if i == 0 {
            tr.push(high_low);
        } else {
            let prev_close = bars[i - 1].close;
            let high_close = (bar.high - prev_close).abs();
            let low_close = (bar.low - prev_close).abs();
            tr.push(high_low.max(high_close).max(low_close));
        }
    }
    tr
}

/// Average True Range: trailing mean of the true range
pub fn atr(bars: &[Bar], period: usize) -> Vec<f64> {
    rolling(&true_range(bars), period, window_mean)
}

/// ADX with the directional indicators it derives from
pub struct AdxResult {
    pub adx: Vec<f64>,
    pub di_plus: Vec<f64>,
    pub di_minus: Vec<f64>,
}

pub fn adx(bars: &[Bar], period: usize) -> AdxResult {
    let n = bars.len();
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    for i in 1..n {
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;
        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    let atr_values = atr(bars, period);
    let plus_dm_avg = rolling(&plus_dm, period, window_mean);
    let minus_dm_avg = rolling(&minus_dm, period, window_mean);

    let mut di_plus = vec![f64::NAN; n];
    let mut di_minus = vec![f64::NAN; n];
    let mut dx = vec![f64::NAN; n];
    for i in 0..n {
        di_plus[i] = 100.0 * plus_dm_avg[i] / atr_values[i];
        di_minus[i] = 100.0 * minus_dm_avg[i] / atr_values[i];
        dx[i] = 100.0 * (di_plus[i] - di_minus[i]).abs() / (di_plus[i] + di_minus[i]);
    }
    let adx = rolling(&dx, period, window_mean);

    AdxResult {
        adx,
        di_plus,
        di_minus,
    }
}

/// On-Balance Volume: cumulative volume signed by the close-to-close change
pub fn obv(bars: &[Bar]) -> Vec<f64> {
    let mut result = vec![f64::NAN; bars.len()];
    let mut total = 0.0;
    for i in 1..bars.len() {
        let change = bars[i].close - bars[i - 1].close;
        if change > 0.0 {
            total += bars[i].volume;
        } else if change < 0.0 {
            total -= bars[i].volume;
        }
        result[i] = total;
    }
    result
}

/// Money Flow Index from typical-price-weighted volume flow
pub fn mfi(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let typical: Vec<f64> = bars.iter().map(|b| (b.high + b.low + b.close) / 3.0).collect();

    let mut positive = vec![0.0; n];
    let mut negative = vec![0.0; n];
    for i in 1..n {
        let raw_flow = typical[i] * bars[i].volume;
        if typical[i] > typical[i - 1] {
            positive[i] = raw_flow;
        } else if typical[i] < typical[i - 1] {
            negative[i] = raw_flow;
        }
    }

    let positive_sum = rolling(&positive, period, |w| w.iter().sum());
    let negative_sum = rolling(&negative, period, |w| w.iter().sum());

    positive_sum
        .iter()
        .zip(&negative_sum)
        .map(|(&p, &neg)| {
            let ratio = p / neg;
            100.0 - (100.0 / (1.0 + ratio))
        })
        .collect()
}

/// Rate of change over `period` sessions, in percent
pub fn roc(close: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; close.len()];
    for i in period..close.len() {
        result[i] = (close[i] - close[i - period]) / close[i - period] * 100.0;
    }
    result
}

/// Williams %R: close's position in the trailing high/low range, -100 to 0
pub fn williams_r(bars: &[Bar], period: usize) -> Vec<f64> {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
    let highest = rolling(&highs, period, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    });
    let lowest = rolling(&lows, period, |w| {
        w.iter().copied().fold(f64::INFINITY, f64::min)
    });

    bars.iter()
        .enumerate()
        .map(|(i, b)| -100.0 * (highest[i] - b.close) / (highest[i] - lowest[i]))
        .collect()
}

/// Commodity Channel Index with the standard 0.015 mean-deviation divisor
pub fn cci(bars: &[Bar], period: usize) -> Vec<f64> {
    let typical: Vec<f64> = bars.iter().map(|b| (b.high + b.low + b.close) / 3.0).collect();
    let sma_tp = sma(&typical, period);
    let mad = rolling(&typical, period, |w| {
        let mean = window_mean(w);
        w.iter().map(|x| (x - mean).abs()).sum::<f64>() / w.len() as f64
    });

    typical
        .iter()
        .enumerate()
        .map(|(i, &tp)| (tp - sma_tp[i]) / (0.015 * mad[i]))
        .collect()
}

/// The full indicator set over an OHLCV series.
///
/// Every series is aligned 1:1 with the input bars; positions before a
/// window fills hold NaN and must be treated as "insufficient data" by
/// consumers, never defaulted to zero.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub close: Vec<f64>,
    pub sma_5: Vec<f64>,
    pub sma_10: Vec<f64>,
    pub sma_20: Vec<f64>,
    pub sma_50: Vec<f64>,
    pub sma_200: Vec<f64>,
    pub ema_9: Vec<f64>,
    pub ema_12: Vec<f64>,
    pub ema_26: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub rsi: Vec<f64>,
    pub stoch_rsi: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_middle: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub bb_width: Vec<f64>,
    pub bb_position: Vec<f64>,
    pub atr: Vec<f64>,
    pub adx: Vec<f64>,
    pub di_plus: Vec<f64>,
    pub di_minus: Vec<f64>,
    pub volume_sma: Vec<f64>,
    pub volume_ratio: Vec<f64>,
    pub obv: Vec<f64>,
    pub mfi: Vec<f64>,
    pub roc_5: Vec<f64>,
    pub roc_10: Vec<f64>,
    pub roc_20: Vec<f64>,
    pub williams_r: Vec<f64>,
    pub cci: Vec<f64>,
}

impl IndicatorSet {
    pub fn compute(bars: &[Bar]) -> Self {
        let close: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volume: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        let macd_result = macd(&close, 12, 26, 9);
        let bb = bollinger_bands(&close, 20, 2.0);
        let adx_result = adx(bars, 14);

        let volume_sma = sma(&volume, 20);
        let volume_ratio: Vec<f64> = volume
            .iter()
            .zip(&volume_sma)
            .map(|(&v, &avg)| v / avg)
            .collect();

        Self {
            sma_5: sma(&close, 5),
            sma_10: sma(&close, 10),
            sma_20: sma(&close, 20),
            sma_50: sma(&close, 50),
            sma_200: sma(&close, 200),
            ema_9: ema(&close, 9),
            ema_12: ema(&close, 12),
            ema_26: ema(&close, 26),
            macd: macd_result.macd,
            macd_signal: macd_result.signal,
            macd_histogram: macd_result.histogram,
            rsi: rsi(&close, 14),
            stoch_rsi: stoch_rsi(&close, 14),
            bb_upper: bb.upper,
            bb_middle: bb.middle,
            bb_lower: bb.lower,
            bb_width: bb.width,
            bb_position: bb.position,
            atr: atr(bars, 14),
            adx: adx_result.adx,
            di_plus: adx_result.di_plus,
            di_minus: adx_result.di_minus,
            volume_sma,
            volume_ratio,
            obv: obv(bars),
            mfi: mfi(bars, 14),
            roc_5: roc(&close, 5),
            roc_10: roc(&close, 10),
            roc_20: roc(&close, 20),
            williams_r: williams_r(bars, 14),
            cci: cci(bars, 20),
            close,
        }
    }

    /// Number of sessions in the underlying series
    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Latest value of a series, NaN if the series is empty
    pub fn latest(series: &[f64]) -> f64 {
        series.last().copied().unwrap_or(f64::NAN)
    }
}
