use super::*;

#[test]
fn staff_payload_carries_all_fields_and_the_desk_marker() {
    let payload = staff_appointment_payload(" Avery Cole ", "Biscuit", "2024-06-01T10:00")
        .expect("payload");
    assert_eq!(payload.get("client").and_then(Value::as_str), Some("Avery Cole"));
    assert_eq!(payload.get("pet").and_then(Value::as_str), Some("Biscuit"));
    assert_eq!(payload.get("slot").and_then(Value::as_str), Some("2024-06-01T10:00"));
    assert_eq!(payload.get("booked_by").and_then(Value::as_str), Some("staff"));
}

#[test]
fn staff_payload_requires_every_field() {
    assert_eq!(
        staff_appointment_payload("", "Biscuit", "2024-06-01T10:00"),
        Err("Client, pet, and time slot are all required.")
    );
    assert_eq!(
        staff_appointment_payload("Avery", "", "2024-06-01T10:00"),
        Err("Client, pet, and time slot are all required.")
    );
    assert_eq!(
        staff_appointment_payload("Avery", "Biscuit", "   "),
        Err("Client, pet, and time slot are all required.")
    );
}
