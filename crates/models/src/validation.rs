use crate::errors::ModelError;

/// Names of clients and services must contain a non-whitespace character.
pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        assert!(validate_name("Backup").is_ok());
        assert!(matches!(validate_name(""), Err(ModelError::Validation(_))));
        assert!(matches!(validate_name(" \t\n"), Err(ModelError::Validation(_))));
    }
}
