use std::sync::Arc;

use proptest::prelude::*;
use serde_json::{json, Map, Value as JsonValue};
use svcreg_schema::{Field, FieldType, SchemaType, ValidatorConfig};

fn profile_schema() -> Arc<SchemaType> {
    let location = SchemaType::builder("Location")
        .field(Field::new("lat", FieldType::NUMBER))
        .field(Field::new("lon", FieldType::NUMBER))
        .field(Field::new("label", FieldType::STRING).with_default("home"))
        .build()
        .unwrap();

    SchemaType::builder("Profile")
        .field(Field::new("id", FieldType::STRING))
        .field(Field::new("age", FieldType::INTEGER))
        .field(Field::new("active", FieldType::BOOLEAN).with_default(true))
        .field(Field::optional("email", FieldType::STRING))
        .field(Field::new("scores", FieldType::list(FieldType::INTEGER)))
        .field(Field::optional("location", FieldType::schema(location)))
        .build()
        .unwrap()
}

fn location_payload() -> impl Strategy<Value = JsonValue> {
    (
        -90.0f64..90.0,
        -180.0f64..180.0,
        proptest::option::of("[a-z]{0,8}"),
    )
        .prop_map(|(lat, lon, label)| {
            let mut map = Map::new();
            map.insert("lat".into(), json!(lat));
            map.insert("lon".into(), json!(lon));
            if let Some(label) = label {
                map.insert("label".into(), json!(label));
            }
            JsonValue::Object(map)
        })
}

fn profile_payload() -> impl Strategy<Value = JsonValue> {
    (
        "[a-zA-Z0-9]{1,12}",
        any::<i64>(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(proptest::option::of("[a-z]{1,6}@[a-z]{1,6}\\.io")),
        proptest::collection::vec(any::<i32>(), 0..6),
        proptest::option::of(proptest::option::of(location_payload())),
    )
        .prop_map(|(id, age, active, email, scores, location)| {
            let mut map = Map::new();
            map.insert("id".into(), json!(id));
            map.insert("age".into(), json!(age));
            if let Some(active) = active {
                map.insert("active".into(), json!(active));
            }
            if let Some(email) = email {
                map.insert("email".into(), json!(email));
            }
            map.insert("scores".into(), json!(scores));
            if let Some(location) = location {
                map.insert("location".into(), location.unwrap_or(JsonValue::Null));
            }
            JsonValue::Object(map)
        })
}

fn configs() -> [ValidatorConfig; 4] {
    [
        ValidatorConfig::default(),
        ValidatorConfig::strict(),
        ValidatorConfig::compact(),
        ValidatorConfig {
            strict_mode: true,
            compact_encoding: true,
        },
    ]
}

proptest! {
    #[test]
    fn validate_serialize_validate_is_identity(payload in profile_payload()) {
        let schema = profile_schema();
        for config in configs() {
            let validator = schema.validator(config);
            let instance = validator.validate(&payload).unwrap();
            let raw = validator.serialize(&instance).unwrap();
            prop_assert_eq!(validator.validate(&raw).unwrap(), instance);
        }
    }
}
