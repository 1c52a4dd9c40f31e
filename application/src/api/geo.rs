//! Administrative division lookup definitions.

use juniper::GraphQLObject;
use service::infra::geo;

/// Named administrative division: a province, a district or a neighborhood.
#[derive(Clone, Debug, GraphQLObject)]
pub struct Place {
    /// Upstream ID of this `Place`.
    pub id: i32,

    /// Name of this `Place`.
    pub name: String,
}

impl From<&geo::Place> for Place {
    fn from(place: &geo::Place) -> Self {
        Self {
            id: i32::try_from(place.id).unwrap_or(i32::MAX),
            name: place.name.clone(),
        }
    }
}
