// ABOUTME: Strongly typed row identifiers for domain entities
// ABOUTME: Prevents mixing product, recipe, and user ids at compile time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Food Forum contributors

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Raw row id for binding into queries
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Identifier of a [`Product`](super::Product)
    ProductId
);
row_id!(
    /// Identifier of a [`Recipe`](super::Recipe)
    RecipeId
);
row_id!(
    /// Identifier of a [`FoodForumUser`](super::FoodForumUser)
    UserId
);
