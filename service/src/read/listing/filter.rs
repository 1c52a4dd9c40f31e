//! [`Filter`] of a [`Listing`] list.

use common::Date;
use serde::{Deserialize, Serialize};

use crate::domain::{
    listing::{
        Area, BlockNum, BuildingAge, ExternalNum, FloorLabel, Kind, ParcelNum,
        Price, Private, RoomLayout,
    },
    Listing,
};

/// Criteria a [`Listing`] must meet to be listed.
///
/// Every absent criterion is no constraint, so [`Filter::default()`] matches
/// any [`Listing`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filter {
    /// [`Category`] the [`Listing`] belongs to.
    pub category: Option<Category>,

    /// Text to search in the title and the description.
    pub text: Option<String>,

    /// Exact listing number.
    pub number: Option<String>,

    /// Inclusive [`Price`] range.
    pub price: Bounds<Price>,

    /// Inclusive [`Area`] range.
    pub area: Bounds<Area>,

    /// Part of the province name.
    pub province: Option<String>,

    /// Part of the district name.
    pub district: Option<String>,

    /// Part of the neighborhood name.
    pub neighborhood: Option<String>,

    /// Exact [`BlockNum`], considered for the [`Category::Land`] only.
    pub block: Option<BlockNum>,

    /// Exact [`ParcelNum`], considered for the [`Category::Land`] only.
    pub parcel: Option<ParcelNum>,

    /// Accepted [`BuildingAge`]s, considered for the
    /// [`Category::Residential`] only.
    pub building_ages: Vec<BuildingAge>,

    /// Accepted [`RoomLayout`]s, considered for the
    /// [`Category::Residential`] only.
    pub rooms: Vec<RoomLayout>,

    /// Accepted [`FloorLabel`]s, considered for the
    /// [`Category::Residential`] only.
    pub floors: Vec<FloorLabel>,

    /// Required balcony presence, considered for the
    /// [`Category::Residential`] only.
    pub balcony: Option<bool>,

    /// Required elevator presence, considered for the
    /// [`Category::Residential`] only.
    pub elevator: Option<bool>,

    /// Required furnishing, considered for the [`Category::Residential`]
    /// only.
    pub furnished: Option<bool>,

    /// [`AdminCriteria`] over the [`Private`] data.
    pub admin: AdminCriteria,
}

impl Filter {
    /// Drops the [`AdminCriteria`] of this [`Filter`].
    #[must_use]
    pub fn without_admin(self) -> Self {
        Self {
            admin: AdminCriteria::default(),
            ..self
        }
    }

    /// Checks whether the provided [`Listing`] meets this [`Filter`].
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.category.map_or(true, |c| c.contains(listing.kind))
            && self.matches_text(listing)
            && self.matches_number(listing)
            && self.price.contains(Some(listing.price))
            && self.area.contains(listing.area)
            && self.matches_location(listing)
            && self.matches_land(listing)
            && self.matches_residence(listing)
            && self.admin.matches(listing.private.as_ref())
    }

    fn matches_text(&self, listing: &Listing) -> bool {
        let Some(text) = needle(self.text.as_deref()) else {
            return true;
        };
        let haystack = format!(
            "{} {}",
            listing.title,
            listing.description.as_ref().map_or("", AsRef::as_ref),
        );
        fold(&haystack).contains(&text)
    }

    fn matches_number(&self, listing: &Listing) -> bool {
        self.number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or(true, |n| listing.id.to_string() == n)
    }

    fn matches_location(&self, listing: &Listing) -> bool {
        let loc = &listing.location;
        contains(self.province.as_deref(), loc.province.as_ref())
            && contains(self.district.as_deref(), loc.district.as_ref())
            && contains(self.neighborhood.as_deref(), loc.neighborhood.as_ref())
    }

    fn matches_land(&self, listing: &Listing) -> bool {
        if !matches!(self.category, Some(Category::Land(_))) {
            return true;
        }
        let land = &listing.land;
        self.block.map_or(true, |b| land.block == Some(b))
            && self.parcel.map_or(true, |p| land.parcel == Some(p))
    }

    fn matches_residence(&self, listing: &Listing) -> bool {
        if !matches!(self.category, Some(Category::Residential(_))) {
            return true;
        }
        let res = &listing.residence;
        let amenities = res.amenities;
        one_of(&self.building_ages, res.building_age.as_ref())
            && one_of(&self.rooms, res.rooms.as_ref())
            && one_of(&self.floors, res.floor.as_ref())
            && self.balcony.map_or(true, |b| amenities.balcony == b)
            && self.elevator.map_or(true, |b| amenities.elevator == b)
            && self.furnished.map_or(true, |b| amenities.furnished == b)
    }
}

/// Category of a [`Listing`] property.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "sub")]
pub enum Category {
    /// Any land or, if specified, the [`LandKind`] only.
    Land(Option<LandKind>),

    /// Any residential property or, if specified, the [`Deal`] only.
    Residential(Option<Deal>),
}

impl Category {
    /// Checks whether the provided [`Kind`] belongs to this [`Category`].
    ///
    /// [`Kind::LandPlot`] belongs to the unqualified [`Category::Land`]
    /// only.
    #[must_use]
    pub const fn contains(self, kind: Kind) -> bool {
        match self {
            Self::Land(None) => kind.is_land(),
            Self::Land(Some(LandKind::Field)) => matches!(kind, Kind::Field),
            Self::Land(Some(LandKind::Vineyard)) => {
                matches!(kind, Kind::VineyardPlot)
            }
            Self::Land(Some(LandKind::Share)) => {
                matches!(kind, Kind::LandShare)
            }
            Self::Residential(None) => kind.is_residential(),
            Self::Residential(Some(Deal::Sale)) => {
                matches!(kind, Kind::SaleApartment)
            }
            Self::Residential(Some(Deal::Rental)) => {
                matches!(kind, Kind::RentalApartment)
            }
        }
    }
}

/// Subcategory of a [`Category::Land`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LandKind {
    /// [`Kind::Field`].
    Field,

    /// [`Kind::VineyardPlot`].
    Vineyard,

    /// [`Kind::LandShare`].
    Share,
}

/// Subcategory of a [`Category::Residential`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Deal {
    /// [`Kind::SaleApartment`].
    Sale,

    /// [`Kind::RentalApartment`].
    Rental,
}

/// Inclusive range with optional bounds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Bounds<T> {
    /// Lower bound.
    pub min: Option<T>,

    /// Upper bound.
    pub max: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: Ord> Bounds<T> {
    /// Indicates whether no bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Checks whether the provided `value` lies within these [`Bounds`].
    ///
    /// A missing `value` lies within unbounded [`Bounds`] only.
    #[must_use]
    pub fn contains(&self, value: Option<T>) -> bool {
        let Some(value) = value else {
            return self.is_unbounded();
        };
        self.min.as_ref().map_or(true, |min| &value >= min)
            && self.max.as_ref().map_or(true, |max| &value <= max)
    }
}

/// Visibility of a [`Listing`] to guests.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    /// [`Listing`] is hidden from guests.
    Hidden,

    /// [`Listing`] is visible to guests.
    Visible,
}

/// Criteria over the [`Private`] data of a [`Listing`].
///
/// A [`Listing`] without [`Private`] data never meets a non-empty
/// [`AdminCriteria`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminCriteria {
    /// Part of the owner name.
    pub owner_name: Option<String>,

    /// Part of the owner phone.
    pub owner_phone: Option<String>,

    /// Exact [`ExternalNum`].
    pub external_num: Option<ExternalNum>,

    /// Exact external listing [`Date`].
    pub external_date: Option<Date>,

    /// Part of the admin note.
    pub note: Option<String>,

    /// Required [`Visibility`].
    pub visibility: Option<Visibility>,
}

impl AdminCriteria {
    /// Indicates whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        needle(self.owner_name.as_deref()).is_none()
            && needle(self.owner_phone.as_deref()).is_none()
            && self.external_num.is_none()
            && self.external_date.is_none()
            && needle(self.note.as_deref()).is_none()
            && self.visibility.is_none()
    }

    fn matches(&self, private: Option<&Private>) -> bool {
        if self.is_empty() {
            return true;
        }
        let Some(p) = private else {
            return false;
        };
        contains(self.owner_name.as_deref(), p.owner_name.as_ref())
            && contains(self.owner_phone.as_deref(), p.owner_phone.as_ref())
            && contains(self.note.as_deref(), p.note.as_ref())
            && self
                .external_num
                .map_or(true, |n| p.external_num == Some(n))
            && self
                .external_date
                .map_or(true, |d| p.external_date == Some(d))
            && self.visibility.map_or(true, |v| match v {
                Visibility::Hidden => p.hidden,
                Visibility::Visible => !p.hidden,
            })
    }
}

/// Folds the provided string for a case-insensitive comparison, treating
/// Turkish dotted and dotless letters and diacritics as their plain Latin
/// counterparts.
#[must_use]
pub fn fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'İ' | 'I' | 'ı' | 'i' | 'î' | 'Î' => out.push('i'),
            'Ş' | 'ş' => out.push('s'),
            'Ğ' | 'ğ' => out.push('g'),
            'Ü' | 'ü' | 'û' | 'Û' => out.push('u'),
            'Ö' | 'ö' => out.push('o'),
            'Ç' | 'ç' => out.push('c'),
            'Â' | 'â' => out.push('a'),
            // Combining dot above, left by a decomposed `İ`.
            '\u{307}' => {}
            c => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Folds the provided search criterion, if it's not blank.
fn needle(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(fold)
}

/// Checks whether the `value` contains the `criterion` after [`fold`]ing.
///
/// A blank `criterion` is no constraint, while a missing `value` never
/// contains a set one.
fn contains<V: AsRef<str>>(criterion: Option<&str>, value: Option<&V>) -> bool {
    let Some(criterion) = needle(criterion) else {
        return true;
    };
    value.is_some_and(|v| fold(v.as_ref()).contains(&criterion))
}

/// Checks whether the `value` is one of the `accepted` ones.
///
/// An empty set of `accepted` values is no constraint.
fn one_of<T: PartialEq>(accepted: &[T], value: Option<&T>) -> bool {
    accepted.is_empty() || value.is_some_and(|v| accepted.contains(v))
}

#[cfg(test)]
mod spec {
    use super::{fold, AdminCriteria, Bounds, Category, Deal, LandKind};
    use crate::domain::listing::{Kind, Price};

    #[test]
    fn folds_turkish_letters() {
        assert_eq!(fold("İSTANBUL"), "istanbul");
        assert_eq!(fold("Kadıköy"), "kadikoy");
        assert_eq!(fold("ŞİŞLİ Çağlayan"), "sisli caglayan");
        assert_eq!(fold("Üsküdar Göztepe"), "uskudar goztepe");
        assert_eq!(fold("i\u{307}zmir"), "izmir");
    }

    #[test]
    fn land_plot_is_unqualified_land_only() {
        assert!(Category::Land(None).contains(Kind::LandPlot));
        assert!(Category::Land(None).contains(Kind::LandShare));
        assert!(!Category::Land(None).contains(Kind::SaleApartment));
        for sub in [LandKind::Field, LandKind::Vineyard, LandKind::Share] {
            assert!(!Category::Land(Some(sub)).contains(Kind::LandPlot));
        }
        assert!(Category::Land(Some(LandKind::Vineyard))
            .contains(Kind::VineyardPlot));
        assert!(Category::Residential(Some(Deal::Rental))
            .contains(Kind::RentalApartment));
        assert!(!Category::Residential(Some(Deal::Rental))
            .contains(Kind::SaleApartment));
    }

    #[test]
    fn bounds_are_inclusive() {
        let price = |v| Price::new(v).expect("valid price");
        let bounds = Bounds {
            min: Some(price(100)),
            max: Some(price(200)),
        };

        assert!(bounds.contains(Some(price(100))));
        assert!(bounds.contains(Some(price(200))));
        assert!(!bounds.contains(Some(price(99))));
        assert!(!bounds.contains(Some(price(201))));
        assert!(!bounds.contains(None));
        assert!(Bounds::<Price>::default().contains(None));
    }

    #[test]
    fn blank_admin_criteria_are_empty() {
        let criteria = AdminCriteria {
            owner_name: Some("  ".into()),
            note: Some(String::new()),
            ..AdminCriteria::default()
        };

        assert!(criteria.is_empty());
    }
}
