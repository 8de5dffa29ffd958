use lead_capture::{Lead, UserData};

#[test]
fn form_fields_are_cleaned_up() {
    let mut user = UserData::default();
    user.absorb_form(&Lead::new(
        "  Maria  da Silva ",
        "(11) 98765-4321",
        "  Maria@Example.COM ",
    ));

    assert_eq!(user.em.as_deref(), Some("maria@example.com"));
    assert_eq!(user.ph.as_deref(), Some("11987654321"));
    assert_eq!(user.first_name.as_deref(), Some("Maria"));
    assert_eq!(user.ln.as_deref(), Some("da Silva"));
}

#[test]
fn single_name_has_no_last_name() {
    let mut user = UserData::default();
    user.absorb_form(&Lead::new("Joana", "", ""));
    assert_eq!(user.first_name.as_deref(), Some("Joana"));
    assert_eq!(user.ln, None);
}

#[test]
fn blank_fields_keep_previous_values() {
    let mut user = UserData {
        em: Some("old@example.com".into()),
        ph: Some("21987654321".into()),
        ..UserData::default()
    };
    user.absorb_form(&Lead::new("", " ", ""));
    assert_eq!(user.em.as_deref(), Some("old@example.com"));
    assert_eq!(user.ph.as_deref(), Some("21987654321"));
    assert_eq!(user.first_name, None);
}

#[test]
fn generated_external_ids_are_unique() {
    let a = UserData::with_external_id();
    let b = UserData::with_external_id();
    assert!(a.external_id.is_some());
    assert_ne!(a.external_id, b.external_id);
}
