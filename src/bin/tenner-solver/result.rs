use thiserror::Error;

use tenner_solver::models::tenner::TennerBoardError;

pub(crate) type TennerResult<T> = Result<T, TennerError>;

#[derive(Error, Debug)]
pub(crate) enum TennerError {
    #[error("IO error, more details: {0}")]
    Io(#[from] std::io::Error),
    #[error("The board file is invalid, more details: {0}")]
    InvalidBoard(#[from] TennerBoardError),
}
