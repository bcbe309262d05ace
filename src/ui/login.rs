//! Login screen model.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::auth::{sanitize_mobile_input, Authenticator, Credentials};
use crate::error::{SmjError, ValidationError};
use crate::ui::{Navigator, Notifier, Route, Toast};

pub const VALIDATION_ERROR_TITLE: &str = "Validation Error";
pub const LOGIN_SUCCESS_TITLE: &str = "Login Successful";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Welcome to SMJ!";
pub const LOGIN_FAILED_TITLE: &str = "Login Failed";
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid mobile number or password";
pub const CONNECTION_ERROR_TITLE: &str = "Connection Error";
pub const CONNECTION_ERROR_MESSAGE: &str = "Unable to connect to server. Please try again.";

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A login was already in flight.
    Busy,
    /// Input failed validation; nothing was sent.
    Invalid(ValidationError),
    /// Credentials accepted; navigated to the dashboard.
    Accepted,
    /// The service answered but did not accept the credentials.
    Rejected,
    /// The service could not be reached or answered garbage.
    ConnectionFailed,
}

/// Snapshot of the form for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub mobile_number: String,
    /// Masked password, one `•` per character.
    pub password_mask: String,
    pub is_loading: bool,
    pub inputs_enabled: bool,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
}

#[derive(Debug, Default)]
struct LoginForm {
    mobile_number: String,
    password: String,
    is_loading: bool,
}

/// Login form state plus the submit flow.
///
/// Input setters and `submit` take `&self`, so a host can render
/// [`LoginScreen::view`] while a submit is pending.
pub struct LoginScreen<A, N, T> {
    auth: Arc<A>,
    navigator: Arc<N>,
    notifier: Arc<T>,
    form: Mutex<LoginForm>,
}

impl<A, N, T> LoginScreen<A, N, T>
where
    A: Authenticator,
    N: Navigator,
    T: Notifier,
{
    pub fn new(auth: Arc<A>, navigator: Arc<N>, notifier: Arc<T>) -> Self {
        Self {
            auth,
            navigator,
            notifier,
            form: Mutex::new(LoginForm::default()),
        }
    }

    fn form(&self) -> MutexGuard<'_, LoginForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Keeps digits only, at most ten. Ignored while loading.
    pub fn set_mobile_number(&self, input: &str) {
        let mut form = self.form();
        if !form.is_loading {
            form.mobile_number = sanitize_mobile_input(input);
        }
    }

    /// Ignored while loading.
    pub fn set_password(&self, input: &str) {
        let mut form = self.form();
        if !form.is_loading {
            form.password = input.to_string();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.form().is_loading
    }

    pub fn view(&self) -> LoginView {
        let form = self.form();
        LoginView {
            mobile_number: form.mobile_number.clone(),
            password_mask: "•".repeat(form.password.chars().count()),
            is_loading: form.is_loading,
            inputs_enabled: !form.is_loading,
            submit_enabled: !form.is_loading,
            submit_label: if form.is_loading {
                "Signing In..."
            } else {
                "Sign In"
            },
        }
    }

    /// Validate, then log in. Every outcome is also reported as a toast.
    pub async fn submit(&self) -> LoginOutcome {
        let credentials = {
            let mut form = self.form();
            if form.is_loading {
                return LoginOutcome::Busy;
            }
            let credentials = Credentials::new(form.mobile_number.clone(), form.password.clone());
            if let Err(e) = credentials.validate() {
                drop(form);
                self.notifier
                    .notify(Toast::destructive(VALIDATION_ERROR_TITLE, e.to_string()));
                return LoginOutcome::Invalid(e);
            }
            form.is_loading = true;
            credentials
        };

        let _loading = LoadingGuard { form: &self.form };

        match self.auth.login(&credentials).await {
            Ok(()) => {
                self.notifier
                    .notify(Toast::info(LOGIN_SUCCESS_TITLE, LOGIN_SUCCESS_MESSAGE));
                self.navigator.navigate(Route::Dashboard);
                LoginOutcome::Accepted
            }
            Err(SmjError::Application(e)) => {
                let message = e.message().unwrap_or(LOGIN_FAILED_MESSAGE);
                self.notifier
                    .notify(Toast::destructive(LOGIN_FAILED_TITLE, message));
                LoginOutcome::Rejected
            }
            Err(SmjError::Validation(e)) => {
                self.notifier
                    .notify(Toast::destructive(VALIDATION_ERROR_TITLE, e.to_string()));
                LoginOutcome::Invalid(e)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login request failed");
                self.notifier.notify(Toast::destructive(
                    CONNECTION_ERROR_TITLE,
                    CONNECTION_ERROR_MESSAGE,
                ));
                LoginOutcome::ConnectionFailed
            }
        }
    }
}

/// Clears the loading flag however `submit` exits.
struct LoadingGuard<'a> {
    form: &'a Mutex<LoginForm>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.form
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_loading = false;
    }
}
