//! Form binding: pure functions mapping raw submitted fields onto validated
//! drafts. Required-field checks only, mirroring what the entity forms
//! enforce; there is no cross-field or business-rule validation.

use serde::Deserialize;

use crate::db::models::{CustomUser, NewCategory, NewPage, NewUser};
use crate::error::OpalError;
use crate::password;

pub const BLANK_MESSAGE: &str = "must not be blank";

/// Per-field validation messages, in submission order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, &'static str)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push((field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| *m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.errors.iter().copied()
    }
}

/// Raw submitted fields. Missing keys deserialize to empty strings so a
/// partially filled form binds instead of rejecting at the transport layer.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Raw select value; empty string means "no category".
    #[serde(default)]
    pub category_id: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn require(value: &str, field: &'static str, errors: &mut FieldErrors) {
    if value.trim().is_empty() {
        errors.push(field, BLANK_MESSAGE);
    }
}

pub fn bind_category(input: &CategoryInput) -> Result<NewCategory, OpalError> {
    let mut errors = FieldErrors::default();
    require(&input.name, "name", &mut errors);
    if !errors.is_empty() {
        return Err(OpalError::Validation(errors));
    }
    Ok(NewCategory {
        name: input.name.trim().to_string(),
    })
}

pub fn bind_page(input: &PageInput) -> Result<NewPage, OpalError> {
    let mut errors = FieldErrors::default();
    require(&input.title, "title", &mut errors);
    require(&input.content, "content", &mut errors);

    let category_id = match input.category_id.trim() {
        "" => None,
        raw => match raw.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push("category_id", "invalid category");
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(OpalError::Validation(errors));
    }
    Ok(NewPage {
        title: input.title.trim().to_string(),
        content: input.content.clone(),
        category_id,
    })
}

/// Bind a user form. The plaintext password never leaves this function: it
/// is hashed into the draft here. On edit an empty password keeps the stored
/// hash; on create it is a validation error.
pub fn bind_user(input: &UserInput, existing: Option<&CustomUser>) -> Result<NewUser, OpalError> {
    let mut errors = FieldErrors::default();
    require(&input.username, "username", &mut errors);

    let password_hash = if !input.password.is_empty() {
        Some(password::hash_password(&input.password)?)
    } else {
        existing.map(|u| u.password_hash.clone())
    };
    if password_hash.is_none() {
        errors.push("password", BLANK_MESSAGE);
    }

    match (password_hash, errors.is_empty()) {
        (Some(password_hash), true) => Ok(NewUser {
            username: input.username.trim().to_string(),
            password_hash,
        }),
        _ => Err(OpalError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation(err: OpalError) -> FieldErrors {
        match err {
            OpalError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn category_requires_a_name() {
        let err = bind_category(&CategoryInput {
            name: "  ".to_string(),
        })
        .unwrap_err();
        assert_eq!(validation(err).message("name"), Some(BLANK_MESSAGE));

        let draft = bind_category(&CategoryInput {
            name: " Test ".to_string(),
        })
        .unwrap();
        assert_eq!(draft.name, "Test");
    }

    #[test]
    fn page_requires_title_and_content() {
        let err = bind_page(&PageInput::default()).unwrap_err();
        let errors = validation(err);
        assert_eq!(errors.message("title"), Some(BLANK_MESSAGE));
        assert_eq!(errors.message("content"), Some(BLANK_MESSAGE));
    }

    #[test]
    fn page_category_is_optional_but_must_parse() {
        let draft = bind_page(&PageInput {
            title: "Hello".to_string(),
            content: "World".to_string(),
            category_id: "".to_string(),
        })
        .unwrap();
        assert_eq!(draft.category_id, None);

        let err = bind_page(&PageInput {
            title: "Hello".to_string(),
            content: "World".to_string(),
            category_id: "abc".to_string(),
        })
        .unwrap_err();
        assert_eq!(
            validation(err).message("category_id"),
            Some("invalid category")
        );
    }

    #[test]
    fn user_password_required_only_on_create() {
        let input = UserInput {
            username: "user@test.com".to_string(),
            password: String::new(),
        };
        let err = bind_user(&input, None).unwrap_err();
        assert_eq!(validation(err).message("password"), Some(BLANK_MESSAGE));

        let existing = CustomUser {
            id: 7,
            username: "user@test.com".to_string(),
            password_hash: "$argon2id$v=19$keep-me".to_string(),
        };
        let draft = bind_user(&input, Some(&existing)).unwrap();
        assert_eq!(draft.password_hash, existing.password_hash);
    }

    #[test]
    fn user_password_is_hashed_never_stored_raw() {
        let input = UserInput {
            username: "user@test.com".to_string(),
            password: "123".to_string(),
        };
        let draft = bind_user(&input, None).unwrap();
        assert_ne!(draft.password_hash, "123");
        assert!(draft.password_hash.starts_with("$argon2"));
    }
}
