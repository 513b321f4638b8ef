use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AtelierError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(AtelierError::config("x").to_string().contains("config error:"));
    assert!(
        AtelierError::singleton("x")
            .to_string()
            .contains("singleton error:")
    );
    assert!(AtelierError::render("x").to_string().contains("render error:"));
    assert!(
        AtelierError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AtelierError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err = AtelierError::from(err);
    assert!(matches!(err, AtelierError::Serde(_)));
}
