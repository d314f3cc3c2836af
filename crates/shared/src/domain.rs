use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

id_newtype!(CategoryId);

/// A category as reported by the remote collection.
///
/// Fields other than `id`, `name` and `image` are kept in `extra` so they
/// round-trip untouched through an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            extra: Map::new(),
        }
    }

    pub fn fields(&self) -> CategoryFields {
        CategoryFields {
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

/// The two user-editable fields of a category; also the create payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFields {
    pub name: String,
    pub image: String,
}

impl CategoryFields {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Image => &self.image,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        match field {
            DraftField::Name => self.name = value.into(),
            DraftField::Image => self.image = value.into(),
        }
    }

    /// First required field that is still blank, if any.
    pub fn first_missing(&self) -> Option<DraftField> {
        DraftField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Image,
}

impl DraftField {
    pub const ALL: [DraftField; 2] = [DraftField::Name, DraftField::Image];

    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Image => "image",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Image => "Image URL",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown category field '{0}' (expected 'name' or 'image')")]
pub struct UnknownDraftField(pub String);

impl FromStr for DraftField {
    type Err = UnknownDraftField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(DraftField::Name),
            "image" => Ok(DraftField::Image),
            other => Err(UnknownDraftField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keeps_unknown_server_fields() {
        let raw = r#"{"id":4,"name":"Shoes","image":"http://x/4.png","slug":"shoes","creationAt":"2024-01-01T00:00:00.000Z"}"#;
        let category: Category = serde_json::from_str(raw).expect("decode");
        assert_eq!(category.id, CategoryId(4));
        assert_eq!(category.extra.get("slug"), Some(&Value::from("shoes")));

        let encoded = serde_json::to_value(&category).expect("encode");
        assert_eq!(encoded["slug"], "shoes");
        assert_eq!(encoded["creationAt"], "2024-01-01T00:00:00.000Z");
        assert_eq!(encoded["id"], 4);
    }

    #[test]
    fn draft_field_parses_case_insensitively() {
        assert_eq!("Name".parse::<DraftField>().expect("name"), DraftField::Name);
        assert_eq!(" image ".parse::<DraftField>().expect("image"), DraftField::Image);
        assert!("price".parse::<DraftField>().is_err());
    }

    #[test]
    fn first_missing_reports_blank_fields_in_form_order() {
        assert_eq!(CategoryFields::default().first_missing(), Some(DraftField::Name));
        assert_eq!(
            CategoryFields::new("Shoes", "").first_missing(),
            Some(DraftField::Image)
        );
        assert_eq!(CategoryFields::new("Shoes", "http://x/2.png").first_missing(), None);
    }
}
