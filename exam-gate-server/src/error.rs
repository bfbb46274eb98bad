use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExamGateServerError {
    // Infrastructure errors
    #[error("Could not read file {1}. Error: {0}.")]
    FileIo(std::io::Error, PathBuf),

    // Policy errors
    #[error("This quiz requires the exam client with the correct configuration. (Mismatch detected)")]
    QuizRequiresExamClient,
    #[error("Quizzes are currently disabled by the exam client policy for course '{course}'.")]
    QuizzesDisabled { course: String },

    // Wrapped errors
    #[error(transparent)]
    ExamGate(#[from] exam_gate::ExamGateError),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl ExamGateServerError {
    /// Text that is safe to show to the end user for this error.
    pub fn public_message(&self) -> String {
        match self {
            // Errors that are safe to return to the user
            ExamGateServerError::QuizRequiresExamClient
            | ExamGateServerError::QuizzesDisabled { .. } => self.to_string(),

            // Errors that the user should not see
            ExamGateServerError::FileIo(..)
            | ExamGateServerError::ExamGate(_)
            | ExamGateServerError::Toml(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_errors_are_public() {
        let error = ExamGateServerError::QuizzesDisabled {
            course: "Organic Chemistry".to_string(),
        };
        assert_eq!(
            error.public_message(),
            "Quizzes are currently disabled by the exam client policy for course 'Organic Chemistry'."
        );
    }

    #[test]
    fn internal_errors_are_sanitized() {
        let error = ExamGateServerError::ExamGate(exam_gate::ExamGateError::InvalidUserId);
        assert_eq!(error.public_message(), "Internal server error");

        let error = ExamGateServerError::FileIo(
            std::io::Error::from(std::io::ErrorKind::NotFound),
            PathBuf::from("/secret/path"),
        );
        assert!(!error.public_message().contains("secret"));
    }
}
