use crate::window::WindowHandle;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to initialize the platform: {}", _0)]
    Init(String),
    #[fail(display = "Too many windows, at most {} could be alive.", _0)]
    Capacity(usize),
    #[fail(display = "Failed to create GPU resource: {}", _0)]
    Resource(String),
    #[fail(display = "Failed to compile shader, errors: \n{}", _0)]
    Compile(String),
    #[fail(display = "Failed to link program, errors: \n{}", _0)]
    Link(String),
    #[fail(display = "Unsupported image format: {}.", _0)]
    UnsupportedFormat(String),
    #[fail(display = "Failed to make context current: {}", _0)]
    ContextSwitch(String),
    #[fail(display = "Sketch callback failed: {}", _0)]
    Callback(::failure::Error),
    #[fail(display = "Image: {}", _0)]
    Image(String),
    #[fail(display = "Configuration: {}", _0)]
    Config(String),
    #[fail(display = "{} is invalid.", _0)]
    WindowNotExists(WindowHandle),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl Error {
    /// Wraps an error that came out of a sketch callback. Errors raised by
    /// this crate inside the callback are handed back untouched.
    pub(crate) fn from_sketch(err: ::failure::Error) -> Error {
        match err.downcast::<Error>() {
            Ok(err) => err,
            Err(err) => Error::Callback(err),
        }
    }
}

impl From<glutin::CreationError> for Error {
    fn from(err: glutin::CreationError) -> Error {
        Error::Resource(format!("Glutin: {}", err))
    }
}

impl From<glutin::ContextError> for Error {
    fn from(err: glutin::ContextError) -> Error {
        Error::ContextSwitch(format!("Glutin: {}", err))
    }
}

impl From<::image::ImageError> for Error {
    fn from(err: ::image::ImageError) -> Error {
        Error::Image(format!("{}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Config(format!("{}", err))
    }
}

impl From<::std::io::Error> for Error {
    fn from(err: ::std::io::Error) -> Error {
        Error::Config(format!("{}", err))
    }
}
