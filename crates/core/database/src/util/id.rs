use lostfound_result::Result;
use ulid::Ulid;

/// Generate a new document id
pub fn new_id() -> String {
    Ulid::new().to_string()
}

/// Reject anything that is not a well-formed id before it reaches a store
pub fn validate_id(field: &str, id: &str) -> Result<()> {
    if id.len() == 26 && Ulid::from_string(id).is_ok() {
        Ok(())
    } else {
        Err(validation_error!(InvalidId, field, "not a valid id"))
    }
}

#[cfg(test)]
mod tests {
    use lostfound_result::ErrorType;

    use super::*;

    #[test]
    fn generated_ids_are_valid() {
        assert!(validate_id("id", &new_id()).is_ok());
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for id in ["not-an-id", "", "01ARZ3NDEKTSV4RRFFQ69G5FA", "0".repeat(27).as_str()] {
            let err = validate_id("id", id).unwrap_err();
            assert!(matches!(err.error_type, ErrorType::InvalidId { .. }));
        }
    }
}
