use serde::{Deserialize, Serialize};

/// A post document as returned by the platform's document query.
///
/// The schema is owned by the platform's data contract; this client only
/// reads the fields it renders and tolerates anything else being absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    /// Document identifier (base58).
    pub id: String,
    /// Identity that owns the document (base58).
    pub owner_id: String,
    /// Creation time in milliseconds since the epoch.
    #[serde(default)]
    pub created_at: Option<u64>,
    /// Schema-defined property bag.
    #[serde(default)]
    pub properties: PostProperties,
}

/// Properties of a post under the "posts" collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostProperties {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub starred: bool,
}

/// The only payload this client ever writes: a new post's message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostPayload {
    pub message: String,
}

/// Extract up to three `#word` hashtags from a message, for display chips.
/// Word characters are ASCII alphanumerics and underscore.
pub fn extract_hashtags(text: &str) -> Vec<&str> {
    let mut tags = Vec::new();
    for (idx, _) in text.match_indices('#') {
        let rest = &text[idx + 1..];
        let end = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end > 0 {
            tags.push(&text[idx..idx + 1 + end]);
            if tags.len() == 3 {
                break;
            }
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashtags_extracted_in_order() {
        assert_eq!(
            extract_hashtags("hello #DashEvolution and #Platform"),
            vec!["#DashEvolution", "#Platform"]
        );
    }

    #[test]
    fn hashtags_capped_at_three() {
        assert_eq!(
            extract_hashtags("#a #b #c #d #e"),
            vec!["#a", "#b", "#c"]
        );
    }

    #[test]
    fn bare_hash_is_not_a_tag() {
        assert_eq!(extract_hashtags("# nope ## also"), Vec::<&str>::new());
        assert_eq!(extract_hashtags("##tag"), vec!["#tag"]);
    }

    #[test]
    fn no_hashtags() {
        assert!(extract_hashtags("plain message").is_empty());
        assert!(extract_hashtags("").is_empty());
    }

    #[test]
    fn document_parses_with_missing_optionals() {
        let doc: PostDocument = serde_json::from_str(
            r#"{"id":"abc","ownerId":"def","properties":{"message":"hi"}}"#,
        )
        .unwrap();
        assert_eq!(doc.owner_id, "def");
        assert_eq!(doc.created_at, None);
        assert_eq!(doc.properties.message, "hi");
        assert!(!doc.properties.starred);
    }
}
