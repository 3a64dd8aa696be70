// ============================================================================
// Contact Core - Contact Entity
// File: crates/contact-core/src/domain/contact.rs
// Description: Contact entry owned by a user, and the search query over them
// ============================================================================

use super::user::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i32,
    pub owner_user_id: UserId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub owner_user_id: UserId,
    pub name: String,
}

impl NewContact {
    pub fn into_contact(self, id: i32) -> Contact {
        Contact {
            id,
            owner_user_id: self.owner_user_id,
            name: self.name,
        }
    }
}

/// Search over one owner's contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactQuery {
    /// Every contact of the owner.
    All,
    /// Case-insensitive substring match; holds the lowercased needle.
    Containing(String),
}

impl ContactQuery {
    /// Blank input selects every contact.
    pub fn parse(search: &str) -> Self {
        let trimmed = search.trim();
        if trimmed.is_empty() {
            ContactQuery::All
        } else {
            ContactQuery::Containing(trimmed.to_lowercase())
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            ContactQuery::All => true,
            ContactQuery::Containing(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }

    /// SQL `LIKE` pattern using `!` as the escape character, so `%` and `_`
    /// in the needle match literally.
    pub fn like_pattern(&self) -> String {
        match self {
            ContactQuery::All => "%".to_string(),
            ContactQuery::Containing(needle) => {
                let mut pattern = String::with_capacity(needle.len() + 2);
                pattern.push('%');
                for c in needle.chars() {
                    if matches!(c, '!' | '%' | '_') {
                        pattern.push('!');
                    }
                    pattern.push(c);
                }
                pattern.push('%');
                pattern
            }
        }
    }
}
