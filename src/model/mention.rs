use crate::model::Message;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coarse mention categories of the `allowed_mentions.parse` array.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MentionParse {
    Everyone,
    Users,
    Roles,
}

/// A single mentionable entity reference, partitioned by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mentionable {
    User(String),
    Role(String),
}

/// Accumulates the allow/deny mention policy for an outgoing message.
///
/// `parse` left unset means "use the system default" (all categories);
/// an explicit empty set suppresses every category. Explicit id lists
/// take precedence over the matching category when the policy is
/// serialized, mirroring the Discord API rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedMentions {
    parse: Option<BTreeSet<MentionParse>>,
    users: Vec<String>,
    roles: Vec<String>,
    replied_user: Option<bool>,
}

/// The serialized `allowed_mentions` wire object.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AllowedMentionsDirective {
    pub parse: Vec<MentionParse>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_user: Option<bool>,
}

impl AllowedMentions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mention_replied_user(&mut self, mention: bool) -> &mut Self {
        self.replied_user = Some(mention);
        self
    }

    /// Replaces the coarse category set; `None` resets to the system default.
    pub fn allowed_mentions<I>(&mut self, allowed: Option<I>) -> &mut Self
    where
        I: IntoIterator<Item = MentionParse>,
    {
        self.parse = allowed.map(|categories| categories.into_iter().collect());
        self
    }

    pub fn mention<I>(&mut self, mentions: I) -> &mut Self
    where
        I: IntoIterator<Item = Mentionable>,
    {
        for mention in mentions {
            match mention {
                Mentionable::User(id) => push_unique(&mut self.users, id),
                Mentionable::Role(id) => push_unique(&mut self.roles, id),
            }
        }
        self
    }

    pub fn mention_users<I, S>(&mut self, user_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in user_ids {
            push_unique(&mut self.users, id.into());
        }
        self
    }

    pub fn mention_roles<I, S>(&mut self, role_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in role_ids {
            push_unique(&mut self.roles, id.into());
        }
        self
    }

    /// Reproduces the effective policy of an existing message: the explicit
    /// user/role allow-lists come straight from the message's mention arrays
    /// and the `everyone` category is granted only when the message actually
    /// mentioned everyone. The previous policy is discarded wholesale.
    pub fn apply_message(&mut self, message: &Message) -> &mut Self {
        let mut parse = BTreeSet::new();
        if message.mention_everyone {
            parse.insert(MentionParse::Everyone);
        }
        self.parse = Some(parse);
        self.users.clear();
        self.roles.clear();
        for user in message.mentions.iter() {
            push_unique(&mut self.users, user.id.clone());
        }
        for role_id in message.mention_roles.iter() {
            push_unique(&mut self.roles, role_id.clone());
        }
        self
    }

    /// Produces the wire object. A category with a non-empty explicit id
    /// list is removed from `parse` so the explicit list wins.
    pub fn directive(&self) -> AllowedMentionsDirective {
        let mut parse = self.parse.clone().unwrap_or_else(|| {
            [
                MentionParse::Everyone,
                MentionParse::Users,
                MentionParse::Roles,
            ]
            .into_iter()
            .collect()
        });
        if !self.users.is_empty() {
            parse.remove(&MentionParse::Users);
        }
        if !self.roles.is_empty() {
            parse.remove(&MentionParse::Roles);
        }

        AllowedMentionsDirective {
            parse: parse.into_iter().collect(),
            users: self.users.clone(),
            roles: self.roles.clone(),
            replied_user: self.replied_user,
        }
    }
}

fn push_unique(ids: &mut Vec<String>, id: String) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
