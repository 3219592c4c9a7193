use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing page element: {0}")]
    MissingElement(String),

    #[error("Invalid page manifest: {0}")]
    InvalidManifest(String),

    #[error("Submission failed: {0}")]
    Submission(#[from] crate::form::SubmitError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::SubmitError;

    #[test]
    fn test_submit_error_converts() {
        fn acknowledge() -> Result<()> {
            Err::<(), _>(SubmitError::Timeout)?;
            Ok(())
        }
        let err = acknowledge().unwrap_err();
        assert!(matches!(err, Error::Submission(SubmitError::Timeout)));
        assert_eq!(
            err.to_string(),
            "Submission failed: the server did not answer in time"
        );
    }
}
