use mind_core::{BbKey, Blackboard, BlackboardError};

const HEALTH: BbKey<u32> = BbKey::new("health");
const NAME: BbKey<String> = BbKey::new("name");

#[test]
fn blackboard_set_get_remove_roundtrip() {
    let mut bb = Blackboard::new();
    assert!(!bb.contains("health"));

    bb.store(HEALTH, 123);
    bb.store(NAME, "scout".to_string());

    assert_eq!(bb.fetch(HEALTH).copied(), Ok(123));
    assert_eq!(bb.fetch(NAME).map(|s| s.as_str()), Ok("scout"));
    assert_eq!(bb.len(), 2);
    assert_eq!(bb.keys().collect::<Vec<_>>(), vec!["health", "name"]);

    assert_eq!(bb.remove::<u32>("health"), Ok(123));
    assert!(!bb.contains("health"));
}

#[test]
fn missing_key_is_recoverable() {
    let bb = Blackboard::new();
    assert_eq!(
        bb.get::<bool>("threat"),
        Err(BlackboardError::KeyNotFound {
            key: "threat".into()
        })
    );
    assert!(!bb.get_or("threat", false));
}

#[test]
fn type_mismatch_is_recoverable() {
    let mut bb = Blackboard::new();
    bb.set("ammo", 1u32);

    let err = bb.get::<i32>("ammo").unwrap_err();
    assert_eq!(
        err,
        BlackboardError::TypeMismatch {
            key: "ammo".into(),
            expected: "i32",
            found: "u32",
        }
    );
    assert_eq!(err.key(), "ammo");
    assert!(err.to_string().contains("holds `u32`"));

    assert!(bb.get_mut::<i32>("ammo").is_err());
    assert_eq!(bb.get_or::<i32>("ammo", -1), -1);
}

#[test]
fn remove_with_wrong_type_keeps_entry() {
    let mut bb = Blackboard::new();
    bb.set("target", 7u64);

    assert!(matches!(
        bb.remove::<String>("target"),
        Err(BlackboardError::TypeMismatch { .. })
    ));
    assert_eq!(bb.get::<u64>("target"), Ok(&7));
}

#[test]
fn set_overwrites_value_of_another_type() {
    let mut bb = Blackboard::new();
    bb.set("mood", 0.5f32);
    bb.set("mood", "angry");

    assert!(bb.get::<f32>("mood").is_err());
    assert_eq!(bb.get::<&str>("mood"), Ok(&"angry"));
}

#[test]
fn get_mut_updates_in_place() {
    let mut bb = Blackboard::new();
    bb.store(HEALTH, 10);

    *bb.fetch_mut(HEALTH).unwrap() -= 3;
    assert_eq!(bb.fetch(HEALTH), Ok(&7));

    bb.clear();
    assert!(bb.is_empty());
}
