use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Fail)]
pub enum Error {
    #[fail(display = "The engine is not running.")]
    NotRunning,
    #[fail(display = "The engine has been stopped already.")]
    AlreadyStopped,
    #[fail(display = "The engine loop did not exit within {:?}.", _0)]
    ShutdownTimeout(Duration),
    #[fail(display = "Failed to initialize the engine: {}", _0)]
    InitializationFailure(String),
    #[fail(display = "Component failure: {}", _0)]
    ComponentFailure(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
