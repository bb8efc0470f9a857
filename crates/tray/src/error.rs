/// Errors raised while bringing up the native tray.
#[derive(Debug, thiserror::Error)]
pub enum TrayError {
    #[error("tray icon error: {0}")]
    Icon(String),

    #[error("failed to build tray: {0}")]
    Build(String),

    #[error("tray backend initialization failed: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_message() {
        let err = TrayError::Backend("Failed to initialize GTK".into());
        assert_eq!(
            err.to_string(),
            "tray backend initialization failed: Failed to initialize GTK"
        );
    }
}
