use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationInvalidArgument,

    FsRootNotFound,
    FsNotADirectory,
    FsListFailed,
    FsRenameCollision,
    FsRenameFailed,

    IoReadFailed,
    IoWriteFailed,
    IoInvalidUtf8,

    InternalIoError,
    InternalJsonError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",

            ErrorCode::FsRootNotFound => "fs.root_not_found",
            ErrorCode::FsNotADirectory => "fs.not_a_directory",
            ErrorCode::FsListFailed => "fs.list_failed",
            ErrorCode::FsRenameCollision => "fs.rename_collision",
            ErrorCode::FsRenameFailed => "fs.rename_failed",

            ErrorCode::IoReadFailed => "io.read_failed",
            ErrorCode::IoWriteFailed => "io.write_failed",
            ErrorCode::IoInvalidUtf8 => "io.invalid_utf8",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootPathDetails {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathIoDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameDetails {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            "Invalid argument",
            details,
        )
    }

    pub fn root_not_found(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(RootPathDetails { path: path.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::FsRootNotFound, "Root directory not found", details)
            .with_hint("Pass an existing directory as the PATH argument")
    }

    pub fn not_a_directory(path: impl Into<String>) -> Self {
        let details = serde_json::to_value(RootPathDetails { path: path.into() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(
            ErrorCode::FsNotADirectory,
            "Root path is not a directory",
            details,
        )
    }

    pub fn list_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::path_io(ErrorCode::FsListFailed, "Failed to list directory", path, error)
    }

    pub fn rename_collision(from: impl Into<String>, to: impl Into<String>) -> Self {
        let to = to.into();
        let details = serde_json::to_value(RenameDetails {
            from: from.into(),
            to: to.clone(),
            error: None,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::FsRenameCollision,
            format!("Rename target '{}' already exists", to),
            details,
        )
        .with_hint("Remove or move the existing entry, then re-run the migration")
    }

    pub fn rename_failed(
        from: impl Into<String>,
        to: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(RenameDetails {
            from: from.into(),
            to: to.into(),
            error: Some(error.into()),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::FsRenameFailed, "Rename failed", details)
    }

    pub fn read_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::path_io(ErrorCode::IoReadFailed, "Failed to read file", path, error)
    }

    pub fn write_failed(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::path_io(ErrorCode::IoWriteFailed, "Failed to write file", path, error)
    }

    pub fn invalid_utf8(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::path_io(
            ErrorCode::IoInvalidUtf8,
            "File content is not valid UTF-8",
            path,
            error,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": error.into(),
            "context": context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": error.into(),
            "context": context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    fn path_io(
        code: ErrorCode,
        message: &str,
        path: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let details = serde_json::to_value(PathIoDetails {
            path: path.into(),
            error: error.into(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(code, message, details)
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
