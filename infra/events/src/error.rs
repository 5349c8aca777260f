use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    /// Published event type does not match any handler registered on the channel.
    /// The mismatched handlers are skipped, never invoked with the wrong type.
    #[error("Type mismatch{}: {message}", format_context(context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// One or more handlers panicked while the event was being dispatched.
    /// Delivery to the remaining handlers of the same publish still happened.
    #[error("Handler panic{}: {message}", format_context(context))]
    HandlerPanic { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Adds `.context(...)` to results carrying an [`EventBusError`].
pub trait EventBusErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, EventBusError>;
}

impl<T> EventBusErrorExt<T> for Result<T, EventBusError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                EventBusError::TypeMismatch { context: c, .. }
                | EventBusError::HandlerPanic { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
