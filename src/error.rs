use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no completed runs in the data")]
    NoFinishers,

    #[error("failed to parse {field} for any finisher")]
    NoParseableTimes { field: &'static str },

    #[error("invalid bucket size: {0} (must be finite and > 0)")]
    InvalidBucketSize(f64),

    #[error("invalid results url `{0}`: expected https://wyniki.datasport.pl/results<number>/...")]
    InvalidSourceUrl(String),
}
