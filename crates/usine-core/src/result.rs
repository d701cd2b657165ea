use crate::error::UsineError;

pub type UsineResult<T> = Result<T, UsineError>;
