//! Agency [`Contact`] definitions.

use juniper::GraphQLObject;

use crate::config;

/// Contact block of the agency.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Contact {
    /// Phone number.
    pub phone: Option<String>,

    /// Email address.
    pub email: Option<String>,

    /// Postal address.
    pub address: Option<String>,
}

impl From<&config::Contact> for Contact {
    fn from(c: &config::Contact) -> Self {
        Self {
            phone: c.phone.clone(),
            email: c.email.clone(),
            address: c.address.clone(),
        }
    }
}
