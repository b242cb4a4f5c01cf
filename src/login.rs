//! Login form stub
//!
//! No validation and no credential store: submitting the form greets the
//! typed username and resets the fields. The wasm frontend owns the DOM
//! wiring; only the greeting lives here.

/// The alert text shown on submit
pub fn welcome_message(username: &str) -> String {
    format!("¡Bienvenido, {username}! Inicio de sesión exitoso.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_message_embeds_username() {
        let msg = welcome_message("ada");
        assert!(msg.contains("ada"));
        assert!(msg.starts_with("¡Bienvenido"));
    }

    #[test]
    fn test_welcome_message_any_input_accepted() {
        // An empty or odd username still "logs in" - there is no validation
        assert!(welcome_message("").contains("¡Bienvenido"));
        assert!(welcome_message("<x>").contains("<x>"));
    }
}
