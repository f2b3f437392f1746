
use crate::utils::panic_message;

#[test]
fn test_panic_message_variants() {
    let caught = std::panic::catch_unwind(|| panic!("static message")).unwrap_err();
    assert_eq!(panic_message(&*caught), "static message");

    let caught = std::panic::catch_unwind(|| panic!("formatted {}", 42)).unwrap_err();
    assert_eq!(panic_message(&*caught), "formatted 42");

    let caught = std::panic::catch_unwind(|| std::panic::panic_any(7_u8)).unwrap_err();
    assert_eq!(panic_message(&*caught), "unknown panic payload");
}
