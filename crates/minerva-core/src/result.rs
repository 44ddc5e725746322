use crate::error::MinervaError;

pub type MinervaResult<T> = Result<T, MinervaError>;
