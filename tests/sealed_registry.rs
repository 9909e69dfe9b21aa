//! Sealing is process-wide and permanent, so these tests run in their own
//! binary and in a single test function.

use errorex::{Misuse, REGISTRY_SEALED, is, register_error_code, registry, try_register_error_code};

#[derive(Debug, serde::Serialize)]
struct Detail {
    value: u32,
}

#[test]
fn test_registry_lifecycle() {
    assert!(!registry::is_sealed());
    let before = register_error_code::<Detail>("sealed.before", "Registered while open");

    registry::seal();
    registry::seal();
    assert!(registry::is_sealed());

    // Registration is rejected, with and without panicking.
    assert_eq!(
        try_register_error_code::<Detail>("sealed.after", "Too late").unwrap_err(),
        Misuse::RegistrySealed {
            code: "sealed.after".to_string()
        }
    );
    let panic = std::panic::catch_unwind(|| {
        register_error_code::<Detail>("sealed.after", "Too late");
    })
    .unwrap_err();
    assert_eq!(
        panic.downcast_ref::<String>().map(String::as_str),
        Some(r#"{"code": "errorex.004", "detail": {"code":"sealed.after"}}"#)
    );
    assert!(!registry::is_registered("sealed.after"));

    // Duplicates of existing codes are reported as sealed too, since the
    // phase is checked first.
    assert!(matches!(
        try_register_error_code::<Detail>("sealed.before", "Again"),
        Err(Misuse::RegistrySealed { .. })
    ));

    // Everything registered before sealing keeps working from any thread.
    let handles: Vec<_> = (0..4)
        .map(|value| {
            let before = before.clone();
            std::thread::spawn(move || before.new(Detail { value }))
        })
        .collect();
    for handle in handles {
        let ex = handle.join().unwrap();
        assert!(is(Some(&ex), "sealed.before"));
    }
    assert!(registry::is_registered(REGISTRY_SEALED));
    assert!(
        registry::entries()
            .iter()
            .any(|entry| entry.code() == "sealed.before")
    );
}
