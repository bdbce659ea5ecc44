use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlurError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BlurError::allocation(3, 4)
            .to_string()
            .contains("allocation error:")
    );
    assert!(BlurError::config("x").to_string().contains("config error:"));
}

#[test]
fn allocation_message_names_dimensions() {
    let err = BlurError::allocation(83, 166);
    assert!(err.to_string().contains("83x166"));
    assert!(err.is_allocation());
    assert!(!BlurError::validation("x").is_allocation());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlurError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
