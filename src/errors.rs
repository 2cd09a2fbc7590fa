use std::path::PathBuf;

use failure::Fail;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{}", _0)]
    IO(::std::io::Error),
    #[fail(display = "Error opening file {:?}: {}", path, err)]
    Open { path: PathBuf, err: ::std::io::Error },
    #[fail(display = "Error creating file {:?}: {}", path, err)]
    Create { path: PathBuf, err: ::std::io::Error },
    #[fail(display = "Malformed number {:?} at position {}.", token, position)]
    Malformed { position: usize, token: String },
    #[fail(display = "Failed to spawn scheduler threads: {}", _0)]
    Scheduler(::std::io::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<::std::io::Error> for Error {
    fn from(err: ::std::io::Error) -> Self {
        Error::IO(err)
    }
}
