//! Definitions of [`Listing`] lists.

use common::{pagination, Date};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject};
use service::read::listing::{
    self as read,
    filter::{self, AdminCriteria, Bounds, Deal, LandKind},
    SortKey,
};

use crate::Context;

use super::{
    Area, BlockNum, BuildingAge, ExternalNum, FloorLabel, Listing, ParcelNum,
    Price, RoomLayout,
};

/// Category of a `Listing` property to filter by.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingCategory")]
pub enum Category {
    /// Any land.
    Land,

    /// Agricultural fields only.
    Field,

    /// Vineyard plots only.
    Vineyard,

    /// Land shares only.
    LandShare,

    /// Any apartment.
    Residential,

    /// Apartments for sale only.
    Sale,

    /// Apartments for rent only.
    Rental,
}

impl From<Category> for filter::Category {
    fn from(c: Category) -> Self {
        match c {
            Category::Land => Self::Land(None),
            Category::Field => Self::Land(Some(LandKind::Field)),
            Category::Vineyard => Self::Land(Some(LandKind::Vineyard)),
            Category::LandShare => Self::Land(Some(LandKind::Share)),
            Category::Residential => Self::Residential(None),
            Category::Sale => Self::Residential(Some(Deal::Sale)),
            Category::Rental => Self::Residential(Some(Deal::Rental)),
        }
    }
}

/// Visibility of a `Listing` to guests.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingVisibility")]
pub enum Visibility {
    /// Hidden from guests.
    Hidden,

    /// Visible to guests.
    Visible,
}

impl From<Visibility> for filter::Visibility {
    fn from(v: Visibility) -> Self {
        match v {
            Visibility::Hidden => Self::Hidden,
            Visibility::Visible => Self::Visible,
        }
    }
}

/// Criteria `Listing`s must meet to be listed.
///
/// Omitted criteria impose no constraint. Land criteria are considered
/// within the land categories only, and residential ones within the
/// residential categories only. Admin criteria are ignored for guests.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "ListingFilter")]
pub struct Filter {
    /// Category of the property.
    pub category: Option<Category>,

    /// Text to search in the title and the description.
    pub text: Option<String>,

    /// Exact listing number.
    pub number: Option<String>,

    /// Lowest price, inclusive.
    pub min_price: Option<Price>,

    /// Highest price, inclusive.
    pub max_price: Option<Price>,

    /// Smallest area, inclusive.
    pub min_area: Option<Area>,

    /// Largest area, inclusive.
    pub max_area: Option<Area>,

    /// Part of the province name.
    pub province: Option<String>,

    /// Part of the district name.
    pub district: Option<String>,

    /// Part of the neighborhood name.
    pub neighborhood: Option<String>,

    /// Exact cadastral block number.
    pub block_num: Option<BlockNum>,

    /// Exact cadastral parcel number.
    pub parcel_num: Option<ParcelNum>,

    /// Accepted building age brackets.
    pub building_ages: Option<Vec<BuildingAge>>,

    /// Accepted room layouts.
    pub rooms: Option<Vec<RoomLayout>>,

    /// Accepted floors.
    pub floors: Option<Vec<FloorLabel>>,

    /// Required balcony presence.
    pub balcony: Option<bool>,

    /// Required elevator presence.
    pub elevator: Option<bool>,

    /// Required furnishing.
    pub furnished: Option<bool>,

    /// Part of the owner name. Admin only.
    pub owner_name: Option<String>,

    /// Part of the owner phone. Admin only.
    pub owner_phone: Option<String>,

    /// Exact external listing number. Admin only.
    pub external_num: Option<ExternalNum>,

    /// Exact external listing `Date`. Admin only.
    pub external_date: Option<Date>,

    /// Part of the admin note. Admin only.
    pub note: Option<String>,

    /// Required visibility. Admin only.
    pub visibility: Option<Visibility>,
}

impl From<Filter> for read::Filter {
    fn from(f: Filter) -> Self {
        Self {
            category: f.category.map(Into::into),
            text: f.text,
            number: f.number,
            price: Bounds {
                min: f.min_price.map(|p| p.0),
                max: f.max_price.map(|p| p.0),
            },
            area: Bounds {
                min: f.min_area.map(|a| a.0),
                max: f.max_area.map(|a| a.0),
            },
            province: f.province,
            district: f.district,
            neighborhood: f.neighborhood,
            block: f.block_num.map(|b| b.0),
            parcel: f.parcel_num.map(|p| p.0),
            building_ages: f
                .building_ages
                .into_iter()
                .flatten()
                .map(|a| a.0)
                .collect(),
            rooms: f.rooms.into_iter().flatten().map(|r| r.0).collect(),
            floors: f.floors.into_iter().flatten().map(|l| l.0).collect(),
            balcony: f.balcony,
            elevator: f.elevator,
            furnished: f.furnished,
            admin: AdminCriteria {
                owner_name: f.owner_name,
                owner_phone: f.owner_phone,
                external_num: f.external_num.map(|n| n.0),
                external_date: f.external_date,
                note: f.note,
                visibility: f.visibility.map(Into::into),
            },
        }
    }
}

/// Order of a `Listing` list.
///
/// Ties are broken by the listing number, the greatest first.
#[derive(Clone, Copy, Debug, Default, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingSort")]
pub enum Sort {
    /// Newest first.
    #[default]
    DateDesc,

    /// Oldest first.
    DateAsc,

    /// Cheapest first.
    PriceAsc,

    /// Most expensive first.
    PriceDesc,

    /// Smallest first.
    AreaAsc,

    /// Largest first.
    AreaDesc,

    /// Cheapest square meter first.
    PricePerAreaAsc,

    /// Most expensive square meter first.
    PricePerAreaDesc,
}

impl From<Sort> for SortKey {
    fn from(s: Sort) -> Self {
        match s {
            Sort::DateDesc => Self::DateDesc,
            Sort::DateAsc => Self::DateAsc,
            Sort::PriceAsc => Self::PriceAsc,
            Sort::PriceDesc => Self::PriceDesc,
            Sort::AreaAsc => Self::AreaAsc,
            Sort::AreaDesc => Self::AreaDesc,
            Sort::PricePerAreaAsc => Self::PricePerAreaAsc,
            Sort::PricePerAreaDesc => Self::PricePerAreaDesc,
        }
    }
}

/// Page of a `Listing` list.
#[derive(Clone, Debug)]
pub struct Page(read::Page);

impl From<read::Page> for Page {
    fn from(page: read::Page) -> Self {
        Self(page)
    }
}

/// Page of a `Listing` list.
#[graphql_object(name = "ListingPage", context = Context)]
impl Page {
    /// `Listing`s of this page.
    #[must_use]
    pub fn items(&self) -> Vec<Listing> {
        self.0.items.iter().cloned().map(Into::into).collect()
    }

    /// One-based number of this page.
    #[must_use]
    pub fn number(&self) -> i32 {
        count(self.0.number.get())
    }

    /// Maximum number of `Listing`s on a page.
    #[must_use]
    pub fn size(&self) -> i32 {
        count(self.0.size.get())
    }

    /// Total number of pages.
    #[must_use]
    pub fn page_count(&self) -> i32 {
        count(self.0.page_count())
    }

    /// Total number of `Listing`s meeting the filter.
    #[must_use]
    pub fn total_count(&self) -> i32 {
        count(self.0.total_count)
    }

    /// Indicator whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.0.has_next()
    }
}

/// Saturates the provided count into a GraphQL `Int`.
fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Parses a one-based page number provided by a client.
///
/// Missing page is the first one.
#[must_use]
pub fn page_number(page: Option<i32>) -> Option<pagination::Number> {
    match page {
        None => Some(pagination::Number::FIRST),
        Some(n) => {
            usize::try_from(n).ok().and_then(pagination::Number::new)
        }
    }
}

#[cfg(test)]
mod spec {
    use common::pagination;
    use service::read::listing::{
        self as read,
        filter::{self, Deal, LandKind},
    };

    use super::{page_number, Category, Filter};

    #[test]
    fn maps_categories() {
        assert_eq!(
            filter::Category::from(Category::Vineyard),
            filter::Category::Land(Some(LandKind::Vineyard)),
        );
        assert_eq!(
            filter::Category::from(Category::Rental),
            filter::Category::Residential(Some(Deal::Rental)),
        );
        assert_eq!(
            filter::Category::from(Category::Land),
            filter::Category::Land(None),
        );
    }

    #[test]
    fn empty_filter_is_default() {
        assert_eq!(read::Filter::from(Filter::default()), read::Filter::default());
    }

    #[test]
    fn validates_page_numbers() {
        assert_eq!(page_number(None), Some(pagination::Number::FIRST));
        assert_eq!(page_number(Some(3)), pagination::Number::new(3));
        assert_eq!(page_number(Some(0)), None);
        assert_eq!(page_number(Some(-2)), None);
    }
}
