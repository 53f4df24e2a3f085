use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meridian_domain::errors::TableError;

/// Error surfaced by a route handler as a plain-text response.
#[derive(Debug)]
pub enum AppError {
    Table(TableError),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table(err) => write!(f, "{err}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Table(TableError::NotFound(_)) | Self::Table(TableError::NoData(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Table(TableError::InvalidColumn(_)) => StatusCode::BAD_REQUEST,
            Self::Table(TableError::Unreadable(_))
            | Self::Table(TableError::MissingColumn(_))
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> String {
        match self {
            Self::Table(TableError::NotFound(_)) => {
                "File not found. Please check the file path.".to_string()
            }
            Self::Table(TableError::Unreadable(msg)) => format!("Error reading the file: {msg}"),
            Self::Table(TableError::MissingColumn(name)) => {
                format!("Error reading the file: missing required column '{name}'")
            }
            Self::Table(err @ TableError::NoData(_)) => err.to_string(),
            Self::Table(TableError::InvalidColumn(name)) => format!(
                "Unknown column '{name}'. Expected one of: open, high, low, close, volume."
            ),
            Self::Internal(msg) => format!("Internal error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        (status, self.body()).into_response()
    }
}

impl From<TableError> for AppError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;
    use axum::http::StatusCode;
    use meridian_domain::errors::TableError;

    #[test]
    fn maps_table_errors_to_statuses() {
        let cases = [
            (TableError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (TableError::NoData("x".into()), StatusCode::NOT_FOUND),
            (TableError::Unreadable("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (TableError::MissingColumn("Date".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (TableError::InvalidColumn("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn not_found_body_asks_to_check_path() {
        let err = AppError::from(TableError::NotFound("/data/x.txt".into()));
        assert_eq!(err.body(), "File not found. Please check the file path.");
    }
}
