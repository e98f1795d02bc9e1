//! Contact list parsing and live filtering.
//!
//! Contacts come back transiently from `Contact_GetContactList`; they are
//! filtered in memory against a free-text query and never persisted.

use serde::{Deserialize, Deserializer};

use crate::client::ApiResponse;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(rename = "FirstName", deserialize_with = "null_to_empty")]
    pub first_name: String,
    #[serde(rename = "LastName", deserialize_with = "null_to_empty")]
    pub last_name: String,
    #[serde(rename = "CompanyName", deserialize_with = "null_to_empty")]
    pub company: String,
    #[serde(rename = "Fax", deserialize_with = "null_to_empty")]
    pub fax: String,
}

impl Contact {
    /// Everything the filter matches against, lowercased.
    fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.first_name, self.last_name, self.company, self.fax
        )
        .to_lowercase()
    }

    fn trimmed(mut self) -> Self {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.company,
            &mut self.fax,
        ] {
            *field = field.trim().to_string();
        }
        self
    }
}

/// Parse contacts out of the list response. Entries that are not objects
/// are skipped; missing or null fields become empty strings.
pub fn from_response(response: &ApiResponse) -> Vec<Contact> {
    response
        .result()
        .and_then(|r| r.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter_map(|v| serde_json::from_value::<Contact>(v.clone()).ok())
                .map(Contact::trimmed)
                .collect()
        })
        .unwrap_or_default()
}

/// Filter contacts by a live text query.
///
/// Contacts without a fax number are always dropped (nothing to send to).
/// An empty query matches everything; otherwise the lowercased query must be
/// a substring of the contact's combined name/company/fax text.
pub fn filter<'a>(contacts: &'a [Contact], query: &str) -> Vec<&'a Contact> {
    let q = query.trim().to_lowercase();
    contacts
        .iter()
        .filter(|c| !c.fax.is_empty())
        .filter(|c| q.is_empty() || c.haystack().contains(&q))
        .collect()
}

fn null_to_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}
