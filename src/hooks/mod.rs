//! Client-side integration hooks
//!
//! Dashboard-facing wrappers around the functions. Each hook tracks whether a
//! call is in flight and the last failure message, and raises a toast when a
//! call fails. `is_loading` is only an indicator: it does not stop a second
//! call from being issued while the first is still running.

pub mod invoker;
pub mod mock;
pub mod notify;
pub mod text;
pub mod video;

pub use invoker::HttpFunctionInvoker;
pub use mock::MockFunctionInvoker;
pub use notify::{Notifier, RecordingNotifier, Toast, ToastVariant, TracingNotifier};
pub use text::TextGenerationHook;
pub use video::VideoHook;

use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The platform's function-invocation client.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    async fn invoke(&self, name: &str, body: Value) -> Result<Value>;
}

#[derive(Debug, Default)]
struct HookState {
    is_loading: bool,
    error: Option<String>,
}

/// State and collaborators shared by every hook.
pub(crate) struct HookCore {
    state: Mutex<HookState>,
    invoker: Arc<dyn FunctionInvoker>,
    notifier: Arc<dyn Notifier>,
}

/// Clears the loading flag when dropped, whichever way the action exits.
pub(crate) struct LoadingGuard<'a> {
    core: &'a HookCore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.core.lock().is_loading = false;
    }
}

impl HookCore {
    pub(crate) fn new(invoker: Arc<dyn FunctionInvoker>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Mutex::new(HookState::default()),
            invoker,
            notifier,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HookState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.lock().is_loading
    }

    pub(crate) fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Marks a call as started and clears the previous error.
    pub(crate) fn begin(&self) -> LoadingGuard<'_> {
        let mut state = self.lock();
        state.is_loading = true;
        state.error = None;
        LoadingGuard { core: self }
    }

    /// Invokes `name`, treating an `error` member in the returned data as a
    /// failure just like a failed invocation.
    pub(crate) async fn call(&self, name: &str, body: Value) -> Result<Value> {
        let data = self.invoker.invoke(name, body).await?;

        match data.get("error") {
            None | Some(Value::Null) => Ok(data),
            Some(Value::String(message)) => Err(Error::Invocation(message.clone())),
            Some(other) => Err(Error::Invocation(other.to_string())),
        }
    }

    /// Records the failure and raises a destructive toast.
    pub(crate) fn fail(&self, err: &Error, title: &str, fallback: &str) {
        let message = match err {
            Error::Invocation(message) => message.clone(),
            other => other.to_string(),
        };
        let message = if message.is_empty() {
            fallback.to_string()
        } else {
            message
        };

        tracing::error!("{}: {}", title, message);
        self.lock().error = Some(message.clone());
        self.notifier.notify(Toast::failure(title, &message));
    }

    pub(crate) fn notify(&self, toast: Toast) {
        self.notifier.notify(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(invoker: MockFunctionInvoker, notifier: RecordingNotifier) -> HookCore {
        HookCore::new(Arc::new(invoker), Arc::new(notifier))
    }

    #[test]
    fn test_loading_guard_resets_flag() {
        let core = core(MockFunctionInvoker::new(), RecordingNotifier::new());
        {
            let _loading = core.begin();
            assert!(core.is_loading());
        }
        assert!(!core.is_loading());
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let notifier = RecordingNotifier::new();
        let core = core(MockFunctionInvoker::new(), notifier.clone());

        core.fail(&Error::Invocation("boom".to_string()), "Error", "fallback");
        assert_eq!(core.error().as_deref(), Some("boom"));
        assert_eq!(notifier.toasts().len(), 1);

        let _loading = core.begin();
        assert_eq!(core.error(), None);
    }

    #[test]
    fn test_fail_uses_fallback_for_empty_message() {
        let notifier = RecordingNotifier::new();
        let core = core(MockFunctionInvoker::new(), notifier.clone());

        core.fail(&Error::Invocation(String::new()), "Error", "Something went wrong");
        assert_eq!(core.error().as_deref(), Some("Something went wrong"));
        assert_eq!(notifier.toasts()[0].variant, ToastVariant::Destructive);
    }

    #[tokio::test]
    async fn test_call_rejects_error_member() {
        let invoker = MockFunctionInvoker::new()
            .with_response(serde_json::json!({ "error": "upstream exploded" }));
        let core = core(invoker, RecordingNotifier::new());

        let err = core.call("text-generation", Value::Null).await.unwrap_err();
        assert!(matches!(err, Error::Invocation(m) if m == "upstream exploded"));
    }

    #[tokio::test]
    async fn test_call_accepts_null_error_member() {
        let invoker = MockFunctionInvoker::new()
            .with_response(serde_json::json!({ "error": null, "avatars": [] }));
        let core = core(invoker, RecordingNotifier::new());

        assert!(core.call("avatar-catalog", Value::Null).await.is_ok());
    }
}
