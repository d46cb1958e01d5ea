//! Incremental synchronization pages.
//!
//! A delta query returns a page of changes plus a continuation: either a
//! token for the next page of the current round, or a terminal marker
//! meaning the caller is fully synchronized (optionally carrying the token
//! that resumes tracking later). The engine does not order tokens across
//! calls; a caller that needs strict page ordering serializes its own delta
//! requests.

use serde::de::DeserializeOwned;

use crate::clients::Payload;
use crate::queryable::errors::ClientError;

/// Where a delta round stands after one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeltaContinuation {
    /// More pages remain in this round; pass the token to the next call.
    NextPage(String),
    /// The caller is fully synchronized. The token, when present, resumes
    /// change tracking from this point in a later round.
    Synchronized(Option<String>),
}

impl DeltaContinuation {
    /// Returns `true` once the caller is fully synchronized.
    #[must_use]
    pub const fn is_synchronized(&self) -> bool {
        matches!(self, Self::Synchronized(_))
    }

    /// Returns the continuation token, if one was issued.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::NextPage(token) => Some(token),
            Self::Synchronized(token) => token.as_deref(),
        }
    }
}

/// One page of changes from a delta query.
#[derive(Clone, Debug)]
pub struct DeltaPage<T> {
    /// The changed items in this page.
    pub changes: Vec<T>,
    /// How to continue the synchronization.
    pub continuation: DeltaContinuation,
}

impl<T: DeserializeOwned> DeltaPage<T> {
    /// Builds a page from a delta response payload.
    ///
    /// Changes come from the `value` array (absent means an empty page).
    /// The continuation comes from `@odata.nextLink` (more pages) or
    /// `@odata.deltaLink` (synchronized), whose embedded token is extracted
    /// from the link's query string.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the `value` array cannot be deserialized or
    /// a continuation link carries no recognizable token.
    pub fn from_payload(payload: &Payload) -> Result<Self, ClientError> {
        let changes = match payload.body.get("value") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Vec::new(),
        };

        let next_link = payload.body.get("@odata.nextLink").and_then(|v| v.as_str());
        let delta_link = payload.body.get("@odata.deltaLink").and_then(|v| v.as_str());

        let continuation = if let Some(link) = next_link {
            DeltaContinuation::NextPage(continuation_token(link).ok_or_else(|| {
                decode_error("@odata.nextLink carries no continuation token")
            })?)
        } else if let Some(link) = delta_link {
            DeltaContinuation::Synchronized(continuation_token(link))
        } else {
            DeltaContinuation::Synchronized(None)
        };

        Ok(Self {
            changes,
            continuation,
        })
    }
}

/// Extracts the continuation token from a delta link's query string.
///
/// Accepts the `token` parameter this client sends, plus the
/// `$deltatoken`/`$skiptoken` forms Graph emits in its links.
fn continuation_token(link: &str) -> Option<String> {
    let (_, query) = link.split_once('?')?;

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if matches!(key, "token" | "$deltatoken" | "$skiptoken") && !value.is_empty() {
            return urlencoding::decode(value).ok().map(|decoded| decoded.into_owned());
        }
    }

    None
}

fn decode_error(message: &str) -> ClientError {
    ClientError::from(<serde_json::Error as serde::de::Error>::custom(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, Clone, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    fn payload(body: serde_json::Value) -> Payload {
        Payload::new(200, HashMap::new(), body)
    }

    #[test]
    fn test_page_with_next_link_extracts_token() {
        let page: DeltaPage<Item> = DeltaPage::from_payload(&payload(json!({
            "value": [{"id": "a"}, {"id": "b"}],
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/me/todo/lists/delta?token=p2"
        })))
        .unwrap();

        assert_eq!(page.changes.len(), 2);
        assert_eq!(page.continuation, DeltaContinuation::NextPage("p2".to_string()));
        assert!(!page.continuation.is_synchronized());
        assert_eq!(page.continuation.token(), Some("p2"));
    }

    #[test]
    fn test_page_with_delta_link_is_synchronized() {
        let page: DeltaPage<Item> = DeltaPage::from_payload(&payload(json!({
            "value": [],
            "@odata.deltaLink": "https://graph.microsoft.com/v1.0/me/todo/lists/delta?$deltatoken=resume1"
        })))
        .unwrap();

        assert!(page.changes.is_empty());
        assert!(page.continuation.is_synchronized());
        assert_eq!(page.continuation.token(), Some("resume1"));
    }

    #[test]
    fn test_page_without_links_is_terminal_without_token() {
        let page: DeltaPage<Item> =
            DeltaPage::from_payload(&payload(json!({"value": [{"id": "a"}]}))).unwrap();
        assert_eq!(page.continuation, DeltaContinuation::Synchronized(None));
        assert_eq!(page.continuation.token(), None);
    }

    #[test]
    fn test_missing_value_array_means_empty_page() {
        let page: DeltaPage<Item> = DeltaPage::from_payload(&payload(json!({}))).unwrap();
        assert!(page.changes.is_empty());
    }

    #[test]
    fn test_skiptoken_form_is_accepted() {
        assert_eq!(
            continuation_token("https://host/path?$skiptoken=abc"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_token_values_are_percent_decoded() {
        assert_eq!(
            continuation_token("https://host/path?token=a%2Bb"),
            Some("a+b".to_string())
        );
    }

    #[test]
    fn test_link_without_token_yields_none() {
        assert_eq!(continuation_token("https://host/path?other=x"), None);
        assert_eq!(continuation_token("https://host/path"), None);
    }

    #[test]
    fn test_next_link_without_token_is_an_error() {
        let result: Result<DeltaPage<Item>, _> = DeltaPage::from_payload(&payload(json!({
            "value": [],
            "@odata.nextLink": "https://host/path"
        })));
        assert!(result.is_err());
    }
}
