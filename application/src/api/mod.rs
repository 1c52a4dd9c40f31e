//! GraphQL API definitions.

mod contact;
pub mod geo;
pub mod listing;
mod mutation;
pub mod preferences;
mod query;
pub mod scalar;
pub mod session;
mod subscription;

pub use self::{
    contact::Contact,
    geo::Place,
    listing::Listing,
    mutation::Mutation,
    preferences::Preferences,
    query::Query,
    session::Role,
    subscription::Subscription,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;
