//! Serde compatibility tests for the JsonSchema derive macro.
//!
//! These tests verify that serde attributes are picked up and that
//! jsonschema attributes win when both are present.

#![cfg(feature = "serde-compat")]

use jsonschema_reflect::{reflect, FieldInfo, Reflect, TypeKind};
use jsonschema_reflect_macros::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

fn fields<T: Reflect>() -> Vec<FieldInfo> {
    match T::type_info().kind {
        TypeKind::Struct(fields) => fields,
        other => panic!("Expected struct kind, got {:?}", other),
    }
}

fn json_names<T: Reflect>() -> Vec<Option<&'static str>> {
    fields::<T>().iter().map(|f| f.tags.json).collect()
}

// =============================================================================
// Renaming
// =============================================================================

#[test]
fn test_serde_rename_all_camel_case() {
    #[derive(Serialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct User {
        pub first_name: String,
        pub last_name: String,
    }

    assert_eq!(
        json_names::<User>(),
        vec![Some("firstName"), Some("lastName")]
    );
}

#[test]
fn test_serde_rename_all_screaming_snake_case() {
    #[derive(JsonSchema)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    struct Config {
        pub api_key: String,
    }

    assert_eq!(json_names::<Config>(), vec![Some("API_KEY")]);
}

#[test]
fn test_jsonschema_rename_all_overrides_serde() {
    #[derive(JsonSchema)]
    #[serde(rename_all = "camelCase")]
    #[jsonschema(rename_all = "kebab-case")]
    struct Config {
        pub base_url: String,
    }

    assert_eq!(json_names::<Config>(), vec![Some("base-url")]);
}

#[test]
fn test_serde_field_rename() {
    #[derive(Serialize, Deserialize, JsonSchema)]
    #[serde(rename_all = "camelCase")]
    struct User {
        #[serde(rename = "mail")]
        pub email_address: String,
        #[serde(rename = "id")]
        #[jsonschema(json = "user_id")]
        pub user_id: u64,
    }

    assert_eq!(json_names::<User>(), vec![Some("mail"), Some("user_id")]);
}

#[test]
fn test_serde_container_rename() {
    #[derive(Serialize, JsonSchema)]
    #[serde(rename = "Account")]
    struct User {
        pub id: u64,
    }

    assert_eq!(User::type_info().name, "Account");

    #[derive(JsonSchema)]
    #[serde(rename = "Ignored")]
    #[jsonschema(rename = "Member")]
    struct Person {
        pub id: u64,
    }

    assert_eq!(Person::type_info().name, "Member");
}

// =============================================================================
// Skipping, Defaults, Flattening
// =============================================================================

#[test]
fn test_serde_skip_drops_fields() {
    #[derive(Serialize, JsonSchema)]
    struct Job {
        pub name: String,
        #[serde(skip)]
        pub handle: std::sync::mpsc::Sender<u8>,
        #[serde(skip_serializing)]
        pub token: String,
        #[serde(skip_deserializing)]
        pub computed: u64,
    }

    let idents: Vec<_> = fields::<Job>().iter().map(|f| f.ident).collect();
    assert_eq!(idents, vec!["name"]);
}

#[test]
fn test_serde_default_is_omit_capable() {
    #[derive(Serialize, Deserialize, JsonSchema)]
    struct Settings {
        pub theme: String,
        #[serde(default)]
        pub font_size: u32,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        pub plugins: Vec<String>,
    }

    let omit: Vec<_> = fields::<Settings>().iter().map(|f| f.tags.omit_empty).collect();
    assert_eq!(omit, vec![false, true, true]);

    let document = reflect::<Settings>().unwrap().to_json();
    assert_eq!(
        document["definitions"]["Settings"]["required"],
        json!(["theme"])
    );
}

#[test]
fn test_serde_container_default() {
    #[derive(Default, Deserialize, JsonSchema)]
    #[serde(default)]
    struct Limits {
        pub max: u32,
        pub min: u32,
    }

    assert!(fields::<Limits>().iter().all(|f| f.tags.omit_empty));

    let document = reflect::<Limits>().unwrap().to_json();
    assert!(document["definitions"]["Limits"].get("required").is_none());
}

#[test]
fn test_serde_flatten_embeds() {
    #[derive(Serialize, JsonSchema)]
    struct Meta {
        pub created: String,
    }

    #[derive(Serialize, JsonSchema)]
    struct Post {
        pub title: String,
        #[serde(flatten)]
        pub meta: Meta,
    }

    let fields = fields::<Post>();
    assert!(fields[1].embedded);

    let document = reflect::<Post>().unwrap().to_json();
    assert_eq!(
        document["definitions"]["Post"]["properties"],
        json!({
            "title": {"type": "string"},
            "created": {"type": "string"}
        })
    );
}
