//! Integration tests for registering codes and creating errors through the
//! public API.

use errorex::{
    CODE_ALREADY_REGISTERED_CODE, CodeDetail, DETAIL_TYPE_MISMATCH_CODE, DetailTypeMismatchDetail,
    ErrorCode, Ex, Misuse, UNKNOWN_ERROR, is, register_error_code, registry, try_is, try_new,
    try_register_error_code,
};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
struct FieldDetail {
    field: String,
    value: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
struct MessageDetail {
    #[serde(rename = "Message")]
    message: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
struct LabelDetail {
    #[serde(rename = "Label")]
    label: String,
}

fn json(s: &str) -> serde_json::Value {
    serde_json::from_str(s).expect("canonical string should be valid JSON")
}

#[test]
fn test_field_detail_scenario() {
    let code = register_error_code::<FieldDetail>("E001", "Invalid field");
    let detail = FieldDetail {
        field: "name".to_string(),
        value: "John".to_string(),
    };

    let ex = errorex::new("E001", detail.clone());
    assert_eq!(ex.code(), "E001");
    assert_eq!(ex.detail::<FieldDetail>(), Some(&detail));
    assert_eq!(
        json(&ex.to_string()),
        serde_json::json!({"code": "E001", "detail": {"field": "name", "value": "John"}})
    );

    // The typed handle produces the same error.
    assert_eq!(code.new(detail).to_string(), ex.to_string());
}

#[test]
fn test_single_field_canonical_string() {
    register_error_code::<MessageDetail>("test.format", "test description");
    let ex = errorex::new(
        "test.format",
        MessageDetail {
            message: "test detail".to_string(),
        },
    );
    assert_eq!(
        json(&ex.to_string()),
        json(r#"{"code": "test.format", "detail": {"Message":"test detail"}}"#)
    );
}

#[test]
fn test_duplicate_registration_panics_with_reserved_error() {
    register_error_code::<MessageDetail>("test.duplicate", "first");

    let expected = CODE_ALREADY_REGISTERED_CODE
        .new(CodeDetail {
            code: "test.duplicate".to_string(),
        })
        .to_string();

    let panic = std::panic::catch_unwind(|| {
        register_error_code::<MessageDetail>("test.duplicate", "second");
    })
    .unwrap_err();
    assert_eq!(panic.downcast_ref::<String>(), Some(&expected));
}

#[test]
#[should_panic(expected = r#"{"code": "errorex.002", "detail": {"code":"errorex.002"}}"#)]
fn test_reserved_code_cannot_be_registered_again() {
    register_error_code::<CodeDetail>(errorex::CODE_ALREADY_REGISTERED, "test description");
}

#[test]
fn test_detail_type_mismatch_reports_both_types() {
    register_error_code::<MessageDetail>("test.mismatch", "test description");

    let misuse = try_new(
        "test.mismatch",
        LabelDetail {
            label: "test detail".to_string(),
        },
    )
    .unwrap_err();

    let expected = DETAIL_TYPE_MISMATCH_CODE.new(DetailTypeMismatchDetail {
        expected_type: std::any::type_name::<MessageDetail>().to_string(),
        actual_type: std::any::type_name::<LabelDetail>().to_string(),
    });
    assert_eq!(misuse.to_string(), expected.to_string());
    assert_eq!(misuse.to_ex().code(), errorex::DETAIL_TYPE_MISMATCH);
}

#[test]
fn test_unregistered_code_is_rejected_everywhere() {
    let code = "test.unregistered";
    let expected = Misuse::NotRegistered {
        code: code.to_string(),
    };

    assert_eq!(try_new(code, ()).unwrap_err(), expected);
    assert_eq!(try_is(None, code).unwrap_err(), expected);
    assert!(!registry::is_registered(code));
    assert!(std::panic::catch_unwind(|| is(None, code)).is_err());
    assert!(std::panic::catch_unwind(|| errorex::new(code, ())).is_err());
}

#[test]
fn test_is_properties() {
    register_error_code::<MessageDetail>("test.is", "test description");
    register_error_code::<MessageDetail>("test.is.other", "test description");
    let ex = errorex::new(
        "test.is",
        MessageDetail {
            message: "test detail".to_string(),
        },
    );

    assert!(is(Some(&ex), ex.code()));
    assert!(!is(Some(&ex), "test.is.other"));
    assert!(!is(None, "test.is"));
    assert!(!is(Some(&std::fmt::Error), "test.is"));
    assert!(!is(Some(&std::io::Error::other("test.is")), UNKNOWN_ERROR));
}

#[test]
fn test_typed_handle_for_dynamic_code() {
    let code = format!("test.dynamic.{}", 7);
    let handle: ErrorCode<u32> = register_error_code(code.clone(), format!("Dynamic {code}"));

    let ex: Ex = handle.new(3);
    assert_eq!(ex.code(), code);
    assert_eq!(ex.detail::<u32>(), Some(&3));
    assert_eq!(
        registry::describe(&code).as_deref(),
        Some("Dynamic test.dynamic.7")
    );
}

#[test]
fn test_try_register_reports_duplicates() {
    try_register_error_code::<()>("test.try_register", "first").unwrap();
    assert_eq!(
        try_register_error_code::<()>("test.try_register", "second").unwrap_err(),
        Misuse::AlreadyRegistered {
            code: "test.try_register".to_string()
        }
    );
}

#[test]
fn test_errors_cross_threads() {
    let code = register_error_code::<FieldDetail>("test.threads", "Threads");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let code = code.clone();
            std::thread::spawn(move || {
                code.new(FieldDetail {
                    field: "worker".to_string(),
                    value: i.to_string(),
                })
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let ex = handle.join().unwrap();
        assert!(is(Some(&ex), "test.threads"));
        assert_eq!(ex.detail::<FieldDetail>().unwrap().value, i.to_string());
    }
}
