use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The snapshot carries no usable current price; fatal for analysis.
    #[error("No price data for {ticker} ({exchange})")]
    NoPriceData { ticker: String, exchange: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
