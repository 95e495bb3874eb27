use std::iter::Enumerate;
use std::slice::Iter;

use super::contact::Contact;

/// How a search query is compared against contacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchPolicy {
    pub case_sensitive: bool,
    /// Also match the query against the phone number.
    pub match_phone: bool,
}

impl MatchPolicy {
    /// Lowercases the query once so `matches` does not repeat it per contact.
    pub fn normalize(&self, query: &str) -> String {
        let query = query.trim();
        if self.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        }
    }

    /// `needle` must already be normalized.
    pub fn matches(&self, contact: &Contact, needle: &str) -> bool {
        let hit = |field: &str| {
            if self.case_sensitive {
                field.contains(needle)
            } else {
                field.to_lowercase().contains(needle)
            }
        };

        hit(&contact.name) || (self.match_phone && hit(&contact.phone))
    }

    pub fn same_name(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a.trim() == b.trim()
        } else {
            a.trim().to_lowercase() == b.trim().to_lowercase()
        }
    }
}

/// Lazy iterator over the contacts matching a query, in insertion order.
pub struct Matches<'a> {
    inner: Enumerate<Iter<'a, Contact>>,
    needle: String,
    policy: MatchPolicy,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(contacts: &'a [Contact], query: &str, policy: MatchPolicy) -> Self {
        Matches {
            inner: contacts.iter().enumerate(),
            needle: policy.normalize(query),
            policy,
        }
    }

    /// Pairs every hit with its 1-based position in the book.
    pub fn with_positions(self) -> impl Iterator<Item = (usize, &'a Contact)> {
        let Matches {
            inner,
            needle,
            policy,
        } = self;
        inner
            .filter(move |(_, c)| policy.matches(c, &needle))
            .map(|(idx, c)| (idx + 1, c))
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        for (_, contact) in self.inner.by_ref() {
            if self.policy.matches(contact, &self.needle) {
                return Some(contact);
            }
        }
        None
    }
}
