//! Conversion of listener method results.

use crate::error::BoxError;

/// Trait for converting a listener method's return value into a dispatch
/// outcome.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<T, E>` → delegates to `T` or propagates the error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a listener method",
    label = "missing `IntoDispatchOutcome` implementation",
    note = "Listener methods must return `()` or `Result<(), E>`."
)]
pub trait IntoDispatchOutcome {
    /// Convert the return value into `Ok(())` or an error.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoDispatchOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<T, E> IntoDispatchOutcome for Result<T, E>
where
    T: IntoDispatchOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IntoDispatchOutcome;

    #[test]
    fn test_unit_is_success() {
        assert!(().into_outcome().is_ok());
    }

    #[test]
    fn test_result_propagates_error() {
        let ok: Result<(), std::io::Error> = Ok(());
        assert!(ok.into_outcome().is_ok());

        let err: Result<(), String> = Err("rejected".to_string());
        let err = err.into_outcome().unwrap_err();
        assert_eq!(err.to_string(), "rejected");
    }
}
