use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("index {index} is out of range for {len} addressable items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("chart has no data sets")]
    NoData,

    #[error("operation requires bar chart data")]
    NotBarData,
}
