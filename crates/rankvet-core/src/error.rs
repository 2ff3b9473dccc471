use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("bootstrap requires at least one resampling round")]
    NoBootstrapRounds,

    #[error("cannot bootstrap an empty query batch")]
    EmptyBatch,
}
