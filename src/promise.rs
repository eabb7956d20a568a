use crate::constants::{DEFAULT_ERROR_TEXT, DEFAULT_LOADING_TEXT, DEFAULT_SUCCESS_TEXT};
use crate::controller::Toaster;
use std::fmt;
use std::future::IntoFuture;
use toaster_util::{ToastId, ToastOptions};

/// Toast text that is either fixed or derived from the settled value
pub enum PromiseText<A> {
    Static(String),
    With(Box<dyn Fn(&A) -> String + Send + Sync>),
}

impl<A> PromiseText<A> {
    pub fn resolve(&self, value: &A) -> String {
        match self {
            PromiseText::Static(text) => text.clone(),
            PromiseText::With(f) => f(value),
        }
    }
}

impl<A> fmt::Debug for PromiseText<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromiseText::Static(text) => f.debug_tuple("Static").field(text).finish(),
            PromiseText::With(_) => f.write_str("With(..)"),
        }
    }
}

impl<A> From<&str> for PromiseText<A> {
    fn from(text: &str) -> Self {
        PromiseText::Static(text.to_string())
    }
}

impl<A> From<String> for PromiseText<A> {
    fn from(text: String) -> Self {
        PromiseText::Static(text)
    }
}

/// Texts for the three toasts of [`Toaster::bind_promise`]
///
/// `options` is applied to every one of them; the loading toast still forces
/// its own kind, loading state and zero duration.
#[derive(Debug)]
pub struct PromiseMessages<T, E> {
    pub loading: String,
    pub success: PromiseText<T>,
    pub error: PromiseText<E>,
    pub options: ToastOptions,
}

impl<T, E> Default for PromiseMessages<T, E> {
    fn default() -> Self {
        Self {
            loading: DEFAULT_LOADING_TEXT.to_string(),
            success: PromiseText::from(DEFAULT_SUCCESS_TEXT),
            error: PromiseText::from(DEFAULT_ERROR_TEXT),
            options: ToastOptions::default(),
        }
    }
}

impl<T, E> PromiseMessages<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(mut self, text: impl Into<String>) -> Self {
        self.loading = text.into();
        self
    }

    pub fn success(mut self, text: impl Into<PromiseText<T>>) -> Self {
        self.success = text.into();
        self
    }

    pub fn success_with(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.success = PromiseText::With(Box::new(f));
        self
    }

    pub fn error(mut self, text: impl Into<PromiseText<E>>) -> Self {
        self.error = text.into();
        self
    }

    pub fn error_with(mut self, f: impl Fn(&E) -> String + Send + Sync + 'static) -> Self {
        self.error = PromiseText::With(Box::new(f));
        self
    }

    pub fn options(mut self, options: ToastOptions) -> Self {
        self.options = options;
        self
    }
}

/// Removes the loading toast when dropped, including when the bound future is cancelled
struct LoadingToast<'a> {
    toaster: &'a Toaster,
    id: ToastId,
}

impl Drop for LoadingToast<'_> {
    fn drop(&mut self) {
        self.toaster.remove(self.id);
    }
}

impl Toaster {
    /// Show a loading toast while `work` runs, then swap it for a success or error toast
    ///
    /// The loading toast is removed before the outcome toast is created. A failure
    /// of `work` is returned unchanged after the error toast has been queued.
    /// Other requests on this toaster keep being processed while `work` is pending.
    /// To bind a function that produces the work, pass its future: `bind_promise(f(), ..)`.
    ///
    /// If the returned future is dropped before `work` settles, the loading toast
    /// is removed and no outcome toast is shown.
    pub async fn bind_promise<T, E, F>(&self, work: F, messages: PromiseMessages<T, E>) -> Result<T, E>
    where
        F: IntoFuture<Output = Result<T, E>>,
    {
        let PromiseMessages {
            loading,
            success,
            error,
            options,
        } = messages;

        let guard = LoadingToast {
            toaster: self,
            id: self.loading(loading, options.clone()),
        };
        let outcome = work.await;
        drop(guard);

        match outcome {
            Ok(value) => {
                self.success(success.resolve(&value), options);
                Ok(value)
            }
            Err(err) => {
                self.error(error.resolve(&err), options);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_texts() {
        let messages: PromiseMessages<(), ()> = PromiseMessages::default();

        assert_eq!(messages.loading, "Loading...");
        assert_eq!(messages.success.resolve(&()), "Success!");
        assert_eq!(messages.error.resolve(&()), "Something went wrong!");
    }

    #[test]
    fn test_text_from_value() {
        let messages: PromiseMessages<u32, String> = PromiseMessages::new()
            .success_with(|n: &u32| format!("Saved {n} files"))
            .error_with(|e: &String| format!("Failed: {e}"));

        assert_eq!(messages.success.resolve(&3), "Saved 3 files");
        assert_eq!(messages.error.resolve(&"disk full".to_string()), "Failed: disk full");
    }

    #[test]
    fn test_static_text_ignores_value() {
        let text: PromiseText<u32> = "Saved!".into();
        assert_eq!(text.resolve(&1), "Saved!");
        assert_eq!(format!("{:?}", text), "Static(\"Saved!\")");
    }
}
