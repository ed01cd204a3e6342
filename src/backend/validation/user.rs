//! User request schemas
//!
//! Field order (and therefore which violation is reported first):
//!
//! * signup: `username`, `name.first`, `name.last`, `password`, `email`,
//!   `preferences`
//! * login: `email`, `password`
//! * update: the signup fields minus `password`, all optional

use serde_json::Value;

use crate::backend::store::UserChanges;
use crate::backend::validation::{
    email, object, optional, preferences, required, text, TextRule, ValidationError,
};
use crate::shared::{FullName, Preference};

const USERNAME: TextRule = TextRule::bounded(
    (1, "username cannot be empty"),
    (30, "username cannot be more than 30 characters long"),
);
const FIRST_NAME: TextRule = TextRule::bounded(
    (1, "first-name cannot be empty"),
    (50, "first-name cannot have more than 50 characters."),
);
const LAST_NAME: TextRule = TextRule::bounded(
    (1, "last-name cannot be empty"),
    (50, "last-name cannot have more than 50 characters."),
);
const PASSWORD: TextRule = TextRule {
    min: Some((6, "Password must be 6 or more characters long")),
    max: None,
};
const MIN_PREFERENCES: (usize, &str) = (3, "Atleast 3 preferences must be selected");

/// Validated `POST /user/signup` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupInput {
    pub username: String,
    pub name: FullName,
    pub password: String,
    pub email: String,
    pub preferences: Vec<Preference>,
}

/// Validated `POST /user/login` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

fn username(value: &Value) -> Result<String, ValidationError> {
    Ok(text(value, &["username"], USERNAME)?.to_lowercase())
}

pub fn signup(body: &Value) -> Result<SignupInput, ValidationError> {
    let fields = object(body, &[])?;

    let username = username(required(fields, &["username"])?)?;

    let name = object(required(fields, &["name"])?, &["name"])?;
    let first = text(required(name, &["name", "first"])?, &["name", "first"], FIRST_NAME)?;
    let last = text(required(name, &["name", "last"])?, &["name", "last"], LAST_NAME)?;

    let password = text(required(fields, &["password"])?, &["password"], PASSWORD)?;
    let email = email(required(fields, &["email"])?, &["email"])?;
    let preferences = preferences(
        required(fields, &["preferences"])?,
        &["preferences"],
        Some(MIN_PREFERENCES),
    )?;

    Ok(SignupInput {
        username,
        name: FullName { first, last },
        password,
        email,
        preferences,
    })
}

pub fn login(body: &Value) -> Result<LoginInput, ValidationError> {
    let fields = object(body, &[])?;
    let email = email(required(fields, &["email"])?, &["email"])?;
    let password = text(required(fields, &["password"])?, &["password"], PASSWORD)?;
    Ok(LoginInput { email, password })
}

/// Validate `PUT /user/update`; keys outside the schema are ignored
pub fn update(body: &Value) -> Result<UserChanges, ValidationError> {
    let fields = object(body, &[])?;
    let mut changes = UserChanges::default();

    if let Some(value) = optional(fields, "username") {
        changes.username = Some(username(value)?);
    }
    if let Some(value) = optional(fields, "name") {
        let name = object(value, &["name"])?;
        if let Some(first) = optional(name, "first") {
            changes.first_name = Some(text(first, &["name", "first"], FIRST_NAME)?);
        }
        if let Some(last) = optional(name, "last") {
            changes.last_name = Some(text(last, &["name", "last"], LAST_NAME)?);
        }
    }
    if let Some(value) = optional(fields, "email") {
        changes.email = Some(email(value, &["email"])?);
    }
    if let Some(value) = optional(fields, "preferences") {
        changes.preferences = Some(preferences(value, &["preferences"], Some(MIN_PREFERENCES))?);
    }
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_signup() -> Value {
        json!({
            "username": "Ada",
            "name": { "first": "Ada", "last": "L" },
            "password": "secret1",
            "email": "ada@x.com",
            "preferences": ["tech", "music", "art"]
        })
    }

    #[test]
    fn test_signup_normalizes() {
        let mut body = valid_signup();
        body["username"] = json!("  AdaL  ");
        body["email"] = json!("ADA@X.COM");
        let input = signup(&body).unwrap();
        assert_eq!(input.username, "adal");
        assert_eq!(input.email, "ada@x.com");
        assert_eq!(
            input.name,
            FullName {
                first: "Ada".into(),
                last: "L".into()
            }
        );
        assert_eq!(
            input.preferences,
            vec![Preference::Tech, Preference::Music, Preference::Art]
        );
    }

    #[test]
    fn test_signup_reports_nested_path_reversed() {
        let mut body = valid_signup();
        body["name"]["first"] = json!("");
        let err = signup(&body).unwrap_err();
        assert_eq!(err.path, "first.name");
        assert_eq!(err.message, "first-name cannot be empty");
    }

    #[test]
    fn test_signup_first_violation_wins() {
        let body = json!({
            "username": "",
            "name": { "first": "", "last": "" },
            "password": "x",
            "email": "bad",
            "preferences": []
        });
        let err = signup(&body).unwrap_err();
        assert_eq!(err.path, "username");
        assert_eq!(err.message, "username cannot be empty");
    }

    #[test]
    fn test_signup_missing_fields() {
        let mut body = valid_signup();
        body.as_object_mut().unwrap().remove("password");
        let err = signup(&body).unwrap_err();
        assert_eq!(err.path, "password");
        assert_eq!(err.message, "Required");

        let err = signup(&json!({ "username": "ada" })).unwrap_err();
        assert_eq!(err.path, "name");
    }

    #[test]
    fn test_signup_requires_three_preferences() {
        let mut body = valid_signup();
        body["preferences"] = json!(["tech", "music"]);
        let err = signup(&body).unwrap_err();
        assert_eq!(err.path, "preferences");
        assert_eq!(err.message, "Atleast 3 preferences must be selected");
    }

    #[test]
    fn test_signup_username_too_long() {
        let mut body = valid_signup();
        body["username"] = json!("a".repeat(31));
        let err = signup(&body).unwrap_err();
        assert_eq!(err.message, "username cannot be more than 30 characters long");
    }

    #[test]
    fn test_signup_is_deterministic() {
        let body = json!({ "username": 7 });
        assert_eq!(signup(&body), signup(&body));
    }

    #[test]
    fn test_signup_body_must_be_object() {
        let err = signup(&json!(["nope"])).unwrap_err();
        assert_eq!(err.path, "");
        assert_eq!(err.message, "Expected object, received array");
    }

    #[test]
    fn test_login() {
        let input = login(&json!({ "email": "Ada@x.com", "password": "secret1" })).unwrap();
        assert_eq!(input.email, "ada@x.com");

        let err = login(&json!({ "email": "ada@x.com", "password": "short" })).unwrap_err();
        assert_eq!(err.path, "password");
        assert_eq!(err.message, "Password must be 6 or more characters long");
    }

    #[test]
    fn test_update_is_partial() {
        let changes = update(&json!({ "name": { "last": " Lovelace " } })).unwrap();
        assert_eq!(changes.last_name.as_deref(), Some("Lovelace"));
        assert!(changes.first_name.is_none());
        assert!(changes.username.is_none());
        assert!(changes.preferences.is_none());
    }

    #[test]
    fn test_update_ignores_password() {
        let changes = update(&json!({ "password": "newsecret" })).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_update_validates_present_fields() {
        let err = update(&json!({ "preferences": ["tech"] })).unwrap_err();
        assert_eq!(err.path, "preferences");

        let err = update(&json!({ "name": { "first": 3 } })).unwrap_err();
        assert_eq!(err.path, "first.name");
        assert_eq!(err.message, "Expected string, received number");
    }
}
