use super::*;

#[test]
fn employee_decodes_from_service_payload() {
    let employee: Employee = serde_json::from_str(
        r#"{"id":1,"name":"Taro","department":"Eng","email":"t@x.com"}"#,
    )
    .expect("decode");

    assert_eq!(employee, Employee::new(1, "Taro", "Eng", "t@x.com"));
}

#[test]
fn employee_ignores_unknown_fields() {
    let employee: Employee = serde_json::from_str(
        r#"{"id":2,"name":"Hanako","department":"Sales","email":"h@x.com","title":"lead"}"#,
    )
    .expect("decode");

    assert_eq!(employee.id, EmployeeId(2));
    assert_eq!(employee.department, "Sales");
}

#[test]
fn employee_rejects_missing_email() {
    let err = serde_json::from_str::<Employee>(r#"{"id":3,"name":"Jiro","department":"HR"}"#)
        .expect_err("email is required");
    assert!(err.to_string().contains("email"), "unexpected error: {err}");
}

#[test]
fn employee_id_serializes_as_plain_integer() {
    let encoded = serde_json::to_value(Employee::new(7, "a", "b", "c")).expect("encode");
    assert_eq!(encoded["id"], serde_json::json!(7));
}
