use std::path::{Path, PathBuf};

use thiserror::Error;

/// A precondition that must hold before anything is copied.
#[derive(Debug, Error, PartialEq)]
pub enum CheckFailure {
    #[error("UFO directory not provided")]
    MissingUfo,

    #[error("UFO {} does not exist", .0.display())]
    UfoNotFound(PathBuf),

    #[error("Form Factor {} does not exist", .0.display())]
    FormFactorNotFound(PathBuf),

    #[error("Fortran directory already exists in UFO")]
    DestinationExists(PathBuf),
}

impl CheckFailure {
    /// The path the failed check looked at, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            CheckFailure::MissingUfo => None,
            CheckFailure::UfoNotFound(path)
            | CheckFailure::FormFactorNotFound(path)
            | CheckFailure::DestinationExists(path) => Some(path),
        }
    }

    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("cannot copy tree '{}': not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("{} does not match {} after copying", .copy.display(), .original.display())]
    Verification { original: PathBuf, copy: PathBuf },
}

impl CopyError {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> CopyError {
        let path = path.into();
        move |source| CopyError::Io { path, source }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Check(#[from] CheckFailure),

    #[error(transparent)]
    Copy(#[from] CopyError),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Check(failure) => failure.exit_code(),
            Error::Copy(_) => 1,
        }
    }
}
