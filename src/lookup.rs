//! Reference-data lookups: resolving a label to an Extrabat identifier.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::response::ResponseBody;

/// Field matched against when the caller does not name one.
pub const DEFAULT_FIELD: &str = "label";

/// A reference-data listing exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Civility,
    PhoneType,
    AddressType,
    Status,
    Group,
    Question,
    Origin,
    Users,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Civility,
        Category::PhoneType,
        Category::AddressType,
        Category::Status,
        Category::Group,
        Category::Question,
        Category::Origin,
        Category::Users,
    ];

    /// Path relative to the API base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            Category::Civility => "v1/parametres/civilites",
            Category::PhoneType => "v1/parametres/type-telephone",
            Category::AddressType => "v1/parametres/type-adresse",
            Category::Status => "v1/parametres/client-statuts",
            Category::Group => "v1/parametres/regroupements",
            Category::Question => "v1/parametres/questions-complementaires",
            Category::Origin => "v1/parametres/origines-contact",
            Category::Users => "v1/utilisateurs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Civility => "civility",
            Category::PhoneType => "phone-type",
            Category::AddressType => "address-type",
            Category::Status => "status",
            Category::Group => "group",
            Category::Question => "question",
            Category::Origin => "origin",
            Category::Users => "users",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "origine" is the French spelling some callers still use.
        if s == "origine" {
            return Ok(Category::Origin);
        }
        Category::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown parameter name: {s}")))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a successful lookup resolves to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LookupId {
    /// The `id` of the matching record, never `null`.
    Id(Value),
    /// A question record and one of its options. Either id is `null` when
    /// the API omitted it.
    #[serde(rename_all = "camelCase")]
    QuestionOption { question_id: Value, value_id: Value },
}

/// Scans `body` in order for the first record whose `field` equals `value`.
///
/// With `option`, the matching record's `options` are searched for an entry
/// whose `optionVal` equals it; a record without such an option does not end
/// the scan. Anything that is not a JSON array finds nothing.
pub fn find_id(
    body: &ResponseBody,
    value: &str,
    field: &str,
    option: Option<&str>,
) -> Option<LookupId> {
    let records = body.as_json()?.as_array()?;

    for record in records {
        if record.get(field).and_then(Value::as_str) != Some(value) {
            continue;
        }

        let Some(option) = option else {
            return record
                .get("id")
                .filter(|id| !id.is_null())
                .cloned()
                .map(LookupId::Id);
        };

        let options = record.get("options").and_then(Value::as_array);
        let matched = options
            .into_iter()
            .flatten()
            .find(|o| o.get("optionVal").and_then(Value::as_str) == Some(option));

        if let Some(matched) = matched {
            return Some(LookupId::QuestionOption {
                question_id: record.get("id").cloned().unwrap_or(Value::Null),
                value_id: matched.get("id").cloned().unwrap_or(Value::Null),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> ResponseBody {
        ResponseBody::Json(value)
    }

    #[test]
    fn test_every_category_round_trips_its_name() {
        for category in Category::ALL {
            assert_eq!(category.name().parse::<Category>().unwrap(), category);
        }
        assert_eq!("origine".parse::<Category>().unwrap(), Category::Origin);
    }

    #[test]
    fn test_unknown_category_is_invalid_argument() {
        let err = "unknown-category".parse::<Category>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!("Civility".parse::<Category>().is_err());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(Category::Civility.endpoint(), "v1/parametres/civilites");
        assert_eq!(Category::Question.endpoint(), "v1/parametres/questions-complementaires");
        assert_eq!(Category::Users.endpoint(), "v1/utilisateurs");
    }

    #[test]
    fn test_finds_first_matching_label() {
        let civilities = body(json!([
            {"id": "1", "label": "Monsieur"},
            {"id": "2", "label": "Madame"},
            {"id": "3", "label": "Madame"}
        ]));
        assert_eq!(find_id(&civilities, "Monsieur", "label", None), Some(LookupId::Id(json!("1"))));
        assert_eq!(find_id(&civilities, "Madame", "label", None), Some(LookupId::Id(json!("2"))));
        assert_eq!(find_id(&civilities, "Docteur", "label", None), None);
    }

    #[test]
    fn test_custom_field_and_numeric_ids() {
        let users = body(json!([
            {"id": 10, "libelle": "Alice", "email": "alice@example.com"},
            {"id": 11, "libelle": "Bob", "email": "bob@example.com"}
        ]));
        assert_eq!(
            find_id(&users, "bob@example.com", "email", None),
            Some(LookupId::Id(json!(11)))
        );
    }

    #[test]
    fn test_match_without_id_is_not_found() {
        let statuses = body(json!([{"label": "Actif"}]));
        assert_eq!(find_id(&statuses, "Actif", "label", None), None);

        let statuses = body(json!([{"id": null, "label": "Actif"}]));
        assert_eq!(find_id(&statuses, "Actif", "label", None), None);
    }

    #[test]
    fn test_non_string_field_never_matches() {
        let records = body(json!([{"id": "1", "label": 5}]));
        assert_eq!(find_id(&records, "5", "label", None), None);
    }

    #[test]
    fn test_question_option_pair() {
        let questions = body(json!([
            {"id": "q1", "label": "Q1", "options": [
                {"id": "o0", "optionVal": "OptB"},
                {"id": "o1", "optionVal": "OptA"}
            ]}
        ]));
        let found = find_id(&questions, "Q1", "label", Some("OptA")).unwrap();
        assert_eq!(
            found,
            LookupId::QuestionOption { question_id: json!("q1"), value_id: json!("o1") }
        );
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            json!({"questionId": "q1", "valueId": "o1"})
        );
    }

    #[test]
    fn test_option_miss_keeps_scanning() {
        let questions = body(json!([
            {"id": "q1", "label": "Q1", "options": [{"id": "o1", "optionVal": "OptB"}]},
            {"id": "q1-bis", "label": "Q1"},
            {"id": "q2", "label": "Q1", "options": [{"id": "o9", "optionVal": "OptA"}]}
        ]));
        assert_eq!(
            find_id(&questions, "Q1", "label", Some("OptA")),
            Some(LookupId::QuestionOption { question_id: json!("q2"), value_id: json!("o9") })
        );
        assert_eq!(find_id(&questions, "Q1", "label", Some("OptZ")), None);
    }

    #[test]
    fn test_non_array_bodies_find_nothing() {
        assert_eq!(find_id(&body(json!({"id": "1", "label": "x"})), "x", "label", None), None);
        assert_eq!(find_id(&ResponseBody::Raw("oops".to_string()), "x", "label", None), None);
    }
}
