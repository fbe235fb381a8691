use crate::err::decode_error::RelayError;

pub mod decode_error;

pub type CResult<T> = Result<T, RelayError>;
