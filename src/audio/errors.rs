#[derive(Debug, Clone, PartialEq, Fail)]
pub enum Error {
    #[fail(display = "Argument `{}` is invalid: {}", _0, _1)]
    InvalidArgument(&'static str, String),
    #[fail(display = "Argument `{}` is not a {} of this audio device.", _0, _1)]
    InvalidArgumentType(&'static str, &'static str),
    #[fail(display = "Argument `{}` refers to a disposed {}.", _0, _1)]
    Disposed(&'static str, &'static str),
    #[fail(display = "{}", _0)]
    Native(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
