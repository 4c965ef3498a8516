#[derive(Debug, Clone, PartialEq, Fail)]
pub enum Error {
    #[fail(display = "Argument `{}` is invalid: {}", _0, _1)]
    InvalidArgument(&'static str, String),
    #[fail(display = "Argument `{}` is out of range: {}", _0, _1)]
    OutOfRange(&'static str, String),
    #[fail(display = "Argument `{}` refers to a disposed {}.", _0, _1)]
    Disposed(&'static str, &'static str),
    #[fail(display = "Argument `{}` was created by another graphics device.", _0)]
    DeviceMismatch(&'static str),
    #[fail(display = "Invalid operation: {}", _0)]
    InvalidOperation(String),
    #[fail(display = "Not supported by this device: {}", _0)]
    NotSupported(String),
    #[fail(display = "{}", _0)]
    Native(String),
    #[fail(display = "Failed to create shader, errors: \n{}.", _0)]
    ShaderCreationFailure(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
