//! [`Attribute`] table of a [`Listing`].

use crate::domain::Listing;

/// Named attribute of a [`Listing`] detail view.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    /// Name of this [`Attribute`].
    pub name: &'static str,

    /// Human-readable value of this [`Attribute`].
    pub value: String,
}

impl Attribute {
    fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Builds the ordered [`Attribute`] table of the provided [`Listing`],
/// branched by its property kind.
///
/// Missing values are skipped.
#[must_use]
pub fn attributes(listing: &Listing) -> Vec<Attribute> {
    let mut rows = vec![
        Attribute::new("Listing number", listing.id.to_string()),
        Attribute::new("Type", listing.kind.label()),
    ];

    let loc = &listing.location;
    let region = match (&loc.district, &loc.province) {
        (Some(d), Some(p)) => Some(format!("{d}/{p}")),
        (Some(d), None) => Some(d.to_string()),
        (None, Some(p)) => Some(p.to_string()),
        (None, None) => None,
    };
    let neighborhood = loc.neighborhood.as_ref().map(ToString::to_string);
    let location = [neighborhood, region]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    if !location.is_empty() {
        rows.push(Attribute::new("Location", location.join(", ")));
    }

    if let Some(area) = listing.area {
        rows.push(Attribute::new("Area", format!("{area} m²")));
    }

    if listing.kind.is_residential() {
        let res = &listing.residence;
        if let Some(rooms) = &res.rooms {
            rows.push(Attribute::new("Rooms", rooms.to_string()));
        }
        if let Some(age) = &res.building_age {
            rows.push(Attribute::new("Building age", age.to_string()));
        }
        match (&res.floor, res.num_floors) {
            (Some(floor), Some(total)) => {
                let floor = format!("{floor} / {total}");
                rows.push(Attribute::new("Floor", floor));
            }
            (Some(floor), None) => {
                rows.push(Attribute::new("Floor", floor.to_string()));
            }
            (None, Some(total)) => {
                let total = total.to_string();
                rows.push(Attribute::new("Floors in building", total));
            }
            (None, None) => {}
        }
        if let Some(heating) = &res.heating {
            rows.push(Attribute::new("Heating", heating.to_string()));
        }
        if let Some(n) = res.num_bathrooms {
            rows.push(Attribute::new("Bathrooms", n.to_string()));
        }
        if let Some(fee) = res.maintenance_fee {
            let fee = if i64::from(fee) == 0 {
                "none".to_owned()
            } else {
                fee.to_string()
            };
            rows.push(Attribute::new("Maintenance fee", fee));
        }
        let amenities = res.amenities;
        for (name, present) in [
            ("Balcony", amenities.balcony),
            ("Elevator", amenities.elevator),
            ("Furnished", amenities.furnished),
        ] {
            if present {
                rows.push(Attribute::new(name, "yes"));
            }
        }
    }

    if listing.kind.is_land() {
        if let Some(block) = listing.land.block {
            rows.push(Attribute::new("Block", block.to_string()));
        }
        if let Some(parcel) = listing.land.parcel {
            rows.push(Attribute::new("Parcel", parcel.to_string()));
        }
    }

    rows
}

#[cfg(test)]
mod spec {
    use super::attributes;
    use crate::{
        domain::listing::{
            Area, BlockNum, District, FloorLabel, Kind, Neighborhood, Price,
            Province, RoomLayout,
        },
        read::listing::fixture,
    };

    fn rows(l: &crate::domain::Listing) -> Vec<(&'static str, String)> {
        attributes(l).into_iter().map(|a| (a.name, a.value)).collect()
    }

    #[test]
    fn residential_rows() {
        let mut l = fixture::listing(7, Kind::SaleApartment, 2_500_000);
        l.area = Area::new(120);
        l.location.province = Province::new("İzmir");
        l.location.district = District::new("Karşıyaka");
        l.location.neighborhood = Neighborhood::new("Bostanlı");
        l.residence.rooms = RoomLayout::new("3+1");
        l.residence.floor = FloorLabel::new("2");
        l.residence.num_floors = Some(5);
        l.residence.maintenance_fee = Price::new(0);
        l.residence.amenities.elevator = true;
        l.land.block = Some(BlockNum::from(101));

        assert_eq!(
            rows(&l),
            [
                ("Listing number", "7".to_owned()),
                ("Type", "Apartment for sale".to_owned()),
                ("Location", "Bostanlı, Karşıyaka/İzmir".to_owned()),
                ("Area", "120 m²".to_owned()),
                ("Rooms", "3+1".to_owned()),
                ("Floor", "2 / 5".to_owned()),
                ("Maintenance fee", "none".to_owned()),
                ("Elevator", "yes".to_owned()),
            ],
        );
    }

    #[test]
    fn land_rows() {
        let mut l = fixture::listing(3, Kind::Field, 90_000);
        l.location.province = Province::new("Manisa");
        l.land.block = Some(BlockNum::from(12));
        l.residence.rooms = RoomLayout::new("1+1");

        assert_eq!(
            rows(&l),
            [
                ("Listing number", "3".to_owned()),
                ("Type", "Field".to_owned()),
                ("Location", "Manisa".to_owned()),
                ("Block", "12".to_owned()),
            ],
        );
    }
}
