use thiserror::Error;

#[derive(Error, Debug)]
pub enum RocksError {
    #[error("Cannot aggregate an empty set of observations")]
    EmptyInput,

    #[error("Sum of weights is zero, cannot compute a weighted average")]
    DivisionByZero,

    #[error("Invalid uncertainty at index {index}: {value}")]
    InvalidUncertainty { index: usize, value: f64 },

    #[error("Length mismatch: {values} values for {uncertainties} uncertainties")]
    LengthMismatch { values: usize, uncertainties: usize },

    #[error("No observation method belongs to a ranked tier")]
    NoRankedMethod,

    #[error("Unknown taxonomic scheme: {0}")]
    UnknownScheme(String),

    #[error("Unknown taxonomic waverange: {0}")]
    UnknownWaverange(String),

    #[error("Unknown taxonomic method: {0}")]
    UnknownMethod(String),

    #[error("Unknown physical property: {0}")]
    UnknownProperty(String),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON decoding error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV snapshot error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid remote response: {0}")]
    InvalidRemoteResponse(String),

    #[error("UTF-8 Path error: {0}")]
    Utf8PathError(String),

    #[error("Cannot find the user cache directory")]
    CacheDirNotFound,

    #[error("Unable to build the worker pool: {0}")]
    ThreadPoolError(String),
}

impl From<rayon::ThreadPoolBuildError> for RocksError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        RocksError::ThreadPoolError(err.to_string())
    }
}

impl PartialEq for RocksError {
    fn eq(&self, other: &Self) -> bool {
        use RocksError::*;
        match (self, other) {
            (EmptyInput, EmptyInput) => true,
            (DivisionByZero, DivisionByZero) => true,
            (NoRankedMethod, NoRankedMethod) => true,
            (CacheDirNotFound, CacheDirNotFound) => true,

            (
                InvalidUncertainty { index: a, value: x },
                InvalidUncertainty { index: b, value: y },
            ) => a == b && (x == y || (x.is_nan() && y.is_nan())),
            (
                LengthMismatch {
                    values: a,
                    uncertainties: x,
                },
                LengthMismatch {
                    values: b,
                    uncertainties: y,
                },
            ) => a == b && x == y,

            (UnknownScheme(a), UnknownScheme(b)) => a == b,
            (UnknownWaverange(a), UnknownWaverange(b)) => a == b,
            (UnknownMethod(a), UnknownMethod(b)) => a == b,
            (UnknownProperty(a), UnknownProperty(b)) => a == b,
            (InvalidRemoteResponse(a), InvalidRemoteResponse(b)) => a == b,
            (Utf8PathError(a), Utf8PathError(b)) => a == b,
            (ThreadPoolError(a), ThreadPoolError(b)) => a == b,

            // foreign errors are not comparable: same variant is enough
            (UreqHttpError(_), UreqHttpError(_)) => true,
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
