use super::*;

#[test]
fn default_z_table() {
    let k = ElementKind::Asset;
    assert_eq!(Role::Background.default_z(k), 0);
    assert_eq!(Role::Primary.default_z(k), 1);
    assert_eq!(Role::BRoll.default_z(k), 2);
    assert_eq!(Role::Costume.default_z(ElementKind::Wardrobe), 2);
    assert_eq!(Role::Transition.default_z(k), 3);
    assert_eq!(Role::Overlay.default_z(k), 4);
    assert_eq!(Role::Effect.default_z(k), 5);
}

#[test]
fn unknown_role_default_depends_on_kind() {
    let r = Role::parse("lower-third");
    assert_eq!(r, Role::Other("lower-third".to_owned()));
    assert_eq!(r.default_z(ElementKind::Scene), 1);
    assert_eq!(r.default_z(ElementKind::Asset), 1);
    assert_eq!(r.default_z(ElementKind::Wardrobe), 2);
}

#[test]
fn roles_roundtrip_through_json_strings() {
    let roles = vec![Role::BRoll, Role::Other("mystery".to_owned()), Role::Background];
    let s = serde_json::to_string(&roles).unwrap();
    assert_eq!(s, r#"["b-roll","mystery","background"]"#);
    let back: Vec<Role> = serde_json::from_str(&s).unwrap();
    assert_eq!(back, roles);
}

#[test]
fn only_background_and_primary_fill_canvas() {
    assert!(Role::Background.fills_canvas());
    assert!(Role::Primary.fills_canvas());
    assert!(!Role::Overlay.fills_canvas());
    assert!(!Role::Other("primary-ish".to_owned()).fills_canvas());
}

#[test]
fn kind_prefixes_parse_back() {
    for k in [ElementKind::Scene, ElementKind::Asset, ElementKind::Wardrobe] {
        assert_eq!(ElementKind::from_prefix(k.prefix()), Some(k));
        assert!(!k.suggested_roles().is_empty());
    }
    assert_eq!(ElementKind::from_prefix("script"), None);
}
