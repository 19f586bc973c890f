//! Error handling for the seqsketch CLI

use thiserror::Error;
use std::path::PathBuf;

/// Main error type for seqsketch CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Sketch error: {method} - {message}")]
    Sketch { method: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<S: Into<String>, M: Into<String>>(file: S, message: M) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn sketch<S: Into<String>, M: Into<String>>(method: S, message: M) -> Self {
        Self::Sketch {
            method: method.into(),
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into() }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Input must be FASTA or FASTQ, optionally gzip-compressed\n\
                 • Ensure the file is not truncated",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your seqsketch.toml configuration file\n\
                 • Use 'seqsketch config' to print a sample configuration",
            );
        }

        CliError::Validation { .. } | CliError::Sketch { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • k must be at least 1, and at most 32 for 'kmers' and 'decode'\n\
                 • s must lie between 1 and k\n\
                 • Records shorter than k + w - 1 are skipped\n\
                 • Nucleotide records may only hold IUPAC codes, no gaps or '*'",
            );
        }
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = CliError::sketch("syncmer", "invalid s-mer size 6 for k = 5");
        assert_eq!(err.to_string(), "Sketch error: syncmer - invalid s-mer size 6 for k = 5");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("test.fa"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));

        let err = CliError::sketch("minimizer", "gappy: illegal base '-' at position 4");
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.starts_with("Sketch error: minimizer - gappy:"));
        assert!(formatted.contains("no gaps or '*'"));
    }
}
