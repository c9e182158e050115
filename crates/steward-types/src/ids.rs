//! Newtype identifiers for chat-platform entities.
//!
//! Platform snowflakes are opaque decimal strings. Wrapping them in
//! newtypes keeps guild/user/channel/role ids from being mixed up at
//! call sites; serde treats them as transparent strings.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// A guild (server) identifier.
    GuildId
);
string_id!(
    /// A user identifier.
    UserId
);
string_id!(
    /// A channel identifier.
    ChannelId
);
string_id!(
    /// A role identifier.
    RoleId
);
string_id!(
    /// A message identifier.
    MessageId
);

impl ChannelId {
    /// Render the platform mention markup for this channel.
    pub fn mention(&self) -> String {
        format!("<#{}>", self.0)
    }
}

impl RoleId {
    /// Render the platform mention markup for this role.
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.0)
    }
}

impl UserId {
    /// Render the platform mention markup for this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}
