//! Terminal prompts for interactive login.

use dialoguer::Input;
use secrecy::SecretString;

use zonebind_core::{CoreError, CredentialPrompt};

/// Reads the email with `dialoguer` and the password with `rpassword`.
pub struct TerminalPrompt;

/// Map a dialoguer / interactive I/O failure into CoreError.
fn prompt_err(e: impl std::fmt::Display) -> CoreError {
    CoreError::Prompt {
        message: format!("prompt failed: {e}"),
    }
}

impl CredentialPrompt for TerminalPrompt {
    fn credentials(&mut self) -> Result<(String, SecretString), CoreError> {
        let email: String = Input::new()
            .with_prompt("email")
            .interact_text()
            .map_err(prompt_err)?;

        let password = rpassword::prompt_password("password: ").map_err(prompt_err)?;
        Ok((email.trim().to_owned(), SecretString::from(password)))
    }

    fn login_failed(&mut self, error: &CoreError) {
        eprintln!("Login failed ({error}). Please try again.");
    }
}
