use thiserror::Error;

use crate::forms::FieldErrors;
use crate::upload::UploadError;

/// Everything a remote call or form submission can fail with. None of these
/// are fatal; the UI shows the message and the user retries manually.
#[derive(Error, Debug)]
pub enum Error {
    #[error("সার্ভারের সাথে সংযোগ করা যায়নি: {0}")]
    Transport(String),

    #[error("ফর্মে ত্রুটি রয়েছে")]
    Validation(FieldErrors),

    #[error("{0}")]
    Upload(#[from] UploadError),

    #[error("পাসওয়ার্ড সঠিক নয়")]
    Auth,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<attohttpc::Error> for Error {
    fn from(err: attohttpc::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(format!("অপ্রত্যাশিত উত্তর: {err}"))
    }
}
