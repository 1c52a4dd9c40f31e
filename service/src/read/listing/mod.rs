//! [`Listing`] list definitions.
//!
//! Listing sets are small enough to be fetched wholesale, so a list is
//! produced in memory: the fetched [`Listing`]s are filtered, sorted and cut
//! into a [`Page`].

pub mod attributes;
pub mod filter;
pub mod sort;

use common::pagination;

use crate::domain::Listing;

pub use self::{attributes::attributes, filter::Filter, sort::SortKey};

/// [`Page`] of [`Listing`]s.
pub type Page = pagination::Page<Listing>;

/// Arguments for selecting a [`Page`].
pub type Arguments = pagination::Arguments;

/// Selects the [`Page`] of the provided `listings` meeting the [`Filter`],
/// ordered by the [`SortKey`].
///
/// The total count of the [`Page`] is the number of all the [`Listing`]s
/// meeting the [`Filter`].
#[must_use]
pub fn select(
    listings: Vec<Listing>,
    filter: &Filter,
    sort: SortKey,
    args: Arguments,
) -> Page {
    let mut matched = listings
        .into_iter()
        .filter(|l| filter.matches(l))
        .collect::<Vec<_>>();
    matched.sort_by(|a, b| sort.compare(a, b));
    Page::cut(args, matched)
}

#[cfg(test)]
pub(crate) mod fixture {
    //! [`Listing`] fixtures.

    use std::time::Duration;

    use common::DateTime;

    use crate::domain::{
        listing::{
            Id, Kind, Land, Location, Photos, Price, Private, Residence, Title,
        },
        Listing,
    };

    /// Creates a plain [`Listing`], created later the greater its `id` is.
    pub(crate) fn listing(id: i64, kind: Kind, price: i64) -> Listing {
        let secs = u64::try_from(id).expect("positive `id`");
        Listing {
            id: Id::from(id),
            kind,
            title: Title::new(format!("Listing {id}")).expect("valid title"),
            description: None,
            price: Price::new(price).expect("valid price"),
            area: None,
            location: Location::default(),
            land: Land::default(),
            residence: Residence::default(),
            photos: Photos::default(),
            private: Some(Private::default()),
            created_at: (DateTime::UNIX_EPOCH + Duration::from_secs(secs))
                .coerce(),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{pagination, Date};
    use rust_decimal::Decimal;

    use super::{
        filter::{AdminCriteria, Bounds, Category, Deal, Visibility},
        fixture::listing,
        select, Arguments, Filter, SortKey,
    };
    use crate::domain::{
        listing::{
            Area, BlockNum, Description, ExternalNum, Kind, OwnerName, Price,
            Province, RoomLayout,
        },
        Listing,
    };

    fn args(number: usize, size: usize) -> Arguments {
        Arguments {
            number: pagination::Number::new(number).expect("non-zero"),
            size: pagination::Size::new(size).expect("non-zero"),
        }
    }

    fn all() -> Arguments {
        args(1, 1000)
    }

    fn ids(listings: &[Listing]) -> Vec<i64> {
        listings.iter().map(|l| l.id.into()).collect()
    }

    /// Diverse set of listings for property checks.
    fn catalog() -> Vec<Listing> {
        let kinds = Kind::ALL;
        (1..=30)
            .map(|i| {
                let kind = kinds[usize::try_from(i).expect("positive") % 6];
                let mut l = listing(i, kind, (i * 37 % 11 + 1) * 50_000);
                let m2 = i32::try_from(i * 13 % 7).expect("small") * 40;
                l.area = Area::new(m2);
                if i % 4 == 0 {
                    l.location.province = Province::new("İstanbul");
                }
                if i % 5 == 0 {
                    l.residence.rooms = RoomLayout::new("2+1");
                    l.residence.amenities.balcony = true;
                }
                if i % 3 == 0 {
                    l.land.block = Some(BlockNum::from(7));
                }
                l
            })
            .collect()
    }

    fn filters() -> Vec<Filter> {
        vec![
            Filter::default(),
            Filter {
                category: Some(Category::Land(None)),
                block: Some(BlockNum::from(7)),
                ..Filter::default()
            },
            Filter {
                category: Some(Category::Residential(Some(Deal::Sale))),
                rooms: vec![RoomLayout::new("2+1").expect("valid")],
                balcony: Some(true),
                ..Filter::default()
            },
            Filter {
                province: Some("istanbul".into()),
                price: Bounds {
                    min: Price::new(100_000),
                    max: Price::new(400_000),
                },
                ..Filter::default()
            },
            Filter {
                area: Bounds {
                    min: Area::new(1),
                    max: None,
                },
                text: Some("LISTING 1".into()),
                ..Filter::default()
            },
        ]
    }

    #[test]
    fn filtering_never_adds_listings() {
        let catalog = catalog();
        let all_ids = ids(&catalog);

        for filter in filters() {
            for sort in [SortKey::DateDesc, SortKey::PricePerAreaAsc] {
                let page = select(catalog.clone(), &filter, sort, all());

                assert!(page.items.len() <= catalog.len());
                assert!(ids(&page.items).iter().all(|id| all_ids.contains(id)));
            }
        }
    }

    #[test]
    fn default_filter_keeps_everything_in_order() {
        let catalog = catalog();

        let page =
            select(catalog.clone(), &Filter::default(), SortKey::default(), all());

        let mut expected = ids(&catalog);
        expected.reverse();
        assert_eq!(ids(&page.items), expected);
        assert_eq!(page.total_count, catalog.len());
    }

    #[test]
    fn price_per_area_descends() {
        let page = select(
            catalog(),
            &Filter::default(),
            SortKey::PricePerAreaDesc,
            all(),
        );

        let ppa = |l: &Listing| {
            l.area.filter(|a| !a.is_zero()).map(|a| {
                Decimal::from(i64::from(l.price)) / Decimal::from(i32::from(a))
            })
        };
        for pair in page.items.windows(2) {
            if let (Some(a), Some(b)) = (ppa(&pair[0]), ppa(&pair[1])) {
                assert!(a >= b, "{a} < {b}");
            }
        }
    }

    #[test]
    fn undefined_area_sorts_last() {
        for sort in [
            SortKey::AreaAsc,
            SortKey::AreaDesc,
            SortKey::PricePerAreaAsc,
            SortKey::PricePerAreaDesc,
        ] {
            let page = select(catalog(), &Filter::default(), sort, all());

            let defined = page
                .items
                .iter()
                .map(|l| l.area.is_some_and(|a| !a.is_zero()))
                .collect::<Vec<_>>();
            let first_undefined =
                defined.iter().position(|d| !d).expect("has undefined");
            assert!(
                defined[first_undefined..].iter().all(|d| !d),
                "{sort}: defined area after undefined one",
            );
        }
    }

    #[test]
    fn pages_concatenate_to_sorted_list() {
        let catalog = catalog();
        let whole = select(
            catalog.clone(),
            &Filter::default(),
            SortKey::PriceAsc,
            all(),
        );

        let mut joined = vec![];
        let pages = select(
            catalog.clone(),
            &Filter::default(),
            SortKey::PriceAsc,
            args(1, 7),
        )
        .page_count();
        for n in 1..=pages {
            let page = select(
                catalog.clone(),
                &Filter::default(),
                SortKey::PriceAsc,
                args(n, 7),
            );
            if n == pages {
                assert_eq!(page.items.len(), catalog.len() % 7);
            }
            joined.extend(ids(&page.items));
        }

        assert_eq!(joined, ids(&whole.items));
    }

    #[test]
    fn ties_break_by_newest_number() {
        let listings = vec![
            listing(1, Kind::Field, 10),
            listing(3, Kind::Field, 10),
            listing(2, Kind::Field, 10),
        ];

        let page =
            select(listings, &Filter::default(), SortKey::PriceAsc, all());

        assert_eq!(ids(&page.items), [3, 2, 1]);
    }

    #[test]
    fn twelve_land_plots_of_twenty() {
        let mut listings = (1..=12)
            .map(|i| listing(i, Kind::LandPlot, i * 100_000))
            .collect::<Vec<_>>();
        listings.extend((13..=20).map(|i| {
            let kind = if i % 2 == 0 {
                Kind::SaleApartment
            } else {
                Kind::RentalApartment
            };
            listing(i, kind, i * 1_000_000)
        }));
        let filter = Filter {
            category: Some(Category::Land(None)),
            ..Filter::default()
        };

        let first =
            select(listings.clone(), &filter, SortKey::PriceDesc, args(1, 12));
        let prices = first
            .items
            .iter()
            .map(|l| i64::from(l.price))
            .collect::<Vec<_>>();
        assert_eq!(
            prices,
            (1..=12).rev().map(|i| i * 100_000).collect::<Vec<_>>(),
        );
        assert!(prices.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(first.total_count, 12);

        let second = select(listings, &filter, SortKey::PriceDesc, args(2, 12));
        assert!(second.items.is_empty());
    }

    #[test]
    fn searches_folded_text_and_number() {
        let mut a = listing(41, Kind::LandPlot, 1);
        a.description = Description::new("Deniz manzaralı, İSKELE yakını");
        let b = listing(42, Kind::LandPlot, 1);

        let by_text = Filter {
            text: Some("iskele".into()),
            ..Filter::default()
        };
        let page =
            select(vec![a.clone(), b.clone()], &by_text, SortKey::default(), all());
        assert_eq!(ids(&page.items), [41]);

        let by_number = Filter {
            number: Some(" 42 ".into()),
            ..Filter::default()
        };
        let page = select(vec![a, b], &by_number, SortKey::default(), all());
        assert_eq!(ids(&page.items), [42]);
    }

    #[test]
    fn land_criteria_ignored_without_land_category() {
        let mut a = listing(1, Kind::LandPlot, 1);
        a.land.block = Some(BlockNum::from(5));
        let b = listing(2, Kind::SaleApartment, 1);

        let filter = Filter {
            block: Some(BlockNum::from(5)),
            ..Filter::default()
        };
        let page =
            select(vec![a.clone(), b.clone()], &filter, SortKey::default(), all());
        assert_eq!(page.total_count, 2);

        let filter = Filter {
            category: Some(Category::Land(None)),
            ..filter
        };
        let page = select(vec![a, b], &filter, SortKey::default(), all());
        assert_eq!(ids(&page.items), [1]);
    }

    #[test]
    fn admin_criteria_need_private_data() {
        let mut owned = listing(1, Kind::Field, 1);
        if let Some(p) = owned.private.as_mut() {
            p.owner_name = OwnerName::new("Ayşe Yılmaz");
            p.external_num = Some(ExternalNum::from(998_877));
            p.external_date = Date::from_iso("2024-05-01").ok();
        }
        let mut public = listing(2, Kind::Field, 1);
        public.private = None;
        let mut hidden = listing(3, Kind::Field, 1);
        if let Some(p) = hidden.private.as_mut() {
            p.hidden = true;
        }
        let listings = vec![owned, public, hidden];

        let filter = Filter {
            admin: AdminCriteria {
                owner_name: Some("ayse".into()),
                external_num: Some(ExternalNum::from(998_877)),
                external_date: Date::from_iso("2024-05-01").ok(),
                ..AdminCriteria::default()
            },
            ..Filter::default()
        };
        let page =
            select(listings.clone(), &filter, SortKey::default(), all());
        assert_eq!(ids(&page.items), [1]);

        let filter = Filter {
            admin: AdminCriteria {
                visibility: Some(Visibility::Visible),
                ..AdminCriteria::default()
            },
            ..Filter::default()
        };
        let page =
            select(listings.clone(), &filter, SortKey::default(), all());
        assert_eq!(ids(&page.items), [1]);

        let page = select(
            listings,
            &filter.without_admin(),
            SortKey::default(),
            all(),
        );
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn missing_area_excluded_only_when_bounded() {
        let mut sized = listing(1, Kind::Field, 1);
        sized.area = Area::new(500);
        let unsized_ = listing(2, Kind::Field, 1);

        let page = select(
            vec![sized.clone(), unsized_.clone()],
            &Filter::default(),
            SortKey::default(),
            all(),
        );
        assert_eq!(page.total_count, 2);

        let filter = Filter {
            area: Bounds {
                min: None,
                max: Area::new(1000),
            },
            ..Filter::default()
        };
        let page =
            select(vec![sized, unsized_], &filter, SortKey::default(), all());
        assert_eq!(ids(&page.items), [1]);
    }
}
