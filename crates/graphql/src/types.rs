//! GraphQL type definitions.

use async_graphql::{EmptySubscription, Schema};

use crate::schema::{MutationRoot, QueryRoot};

/// The gateway's GraphQL schema type.
pub type FolioSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;
