use crate::models::{non_empty, FilterCriteria, Listing};

impl FilterCriteria {
    /// Whether a single listing satisfies every specified constraint
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(city) = non_empty(&self.city) {
            if !listing.city.contains(city) {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }

        if let Some(property_type) = self.property_type {
            if listing.property_type != property_type {
                return false;
            }
        }

        // Textual on purpose: "5+" is compared as-is, not as ">= 5"
        if let Some(rooms) = non_empty(&self.rooms) {
            if listing.rooms.to_string() != rooms {
                return false;
            }
        }

        true
    }
}

/// Narrow `listings` to those matching `criteria`, keeping their order
pub fn filter_listings(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| criteria.matches(listing))
        .cloned()
        .collect()
}

/// Up to `limit` other listings to suggest next to listing `id`, in
/// collection order
pub fn similar_listings(listings: &[Listing], id: u64, limit: usize) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| listing.id != id)
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, PropertyType};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn listing(id: u64, city: &str, price: u64, area: f64) -> Listing {
        Listing {
            id,
            title: format!("Listing {id}"),
            address: format!("{city}, street {id}"),
            city: city.to_string(),
            district: "Center".to_string(),
            price,
            area,
            rooms: 2,
            year_built: Some(1398),
            property_type: PropertyType::Apartment,
            condition: Condition::Normal,
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        }
    }

    fn ids(listings: &[Listing]) -> Vec<u64> {
        listings.iter().map(|l| l.id).collect()
    }

    #[test]
    fn test_city_filter_keeps_only_matching_city() {
        let listings = vec![
            listing(1, "Tehran", 8_500_000_000, 85.0),
            listing(2, "Mashhad", 6_000_000_000, 100.0),
        ];
        let criteria = FilterCriteria::new().with_city("Tehran");

        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec![1]);
    }

    #[test]
    fn test_city_filter_is_case_sensitive_substring() {
        let listings = vec![
            listing(1, "North Tehran", 1, 1.0),
            listing(2, "tehran", 1, 1.0),
            listing(3, "Tehran", 1, 1.0),
        ];
        let criteria = FilterCriteria::new().with_city("Tehran");

        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec![1, 3]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let listings = vec![
            listing(1, "A", 1_000_000_000, 50.0),
            listing(2, "A", 5_000_000_000, 50.0),
            listing(3, "A", 9_000_000_000, 50.0),
        ];
        let criteria = FilterCriteria::new()
            .with_min_price(2_000_000_000)
            .with_max_price(8_000_000_000);
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec![2]);

        let exact = FilterCriteria::new()
            .with_min_price(1_000_000_000)
            .with_max_price(5_000_000_000);
        assert_eq!(ids(&filter_listings(&listings, &exact)), vec![1, 2]);
    }

    #[test]
    fn test_zero_max_price_is_a_real_bound() {
        let listings = vec![listing(1, "A", 0, 50.0), listing(2, "A", 1, 50.0)];

        let zero = FilterCriteria::new().with_max_price(0);
        assert_eq!(ids(&filter_listings(&listings, &zero)), vec![1]);
        assert_eq!(filter_listings(&listings, &FilterCriteria::new()).len(), 2);
    }

    #[test]
    fn test_property_type_exact_match() {
        let mut villa = listing(2, "A", 1, 1.0);
        villa.property_type = PropertyType::Villa;
        let listings = vec![listing(1, "A", 1, 1.0), villa];

        let criteria = FilterCriteria::new().with_property_type(PropertyType::Villa);
        assert_eq!(ids(&filter_listings(&listings, &criteria)), vec![2]);
    }

    #[test]
    fn test_rooms_compared_as_text() {
        let mut five = listing(1, "A", 1, 1.0);
        five.rooms = 5;
        let mut six = listing(2, "A", 1, 1.0);
        six.rooms = 6;
        let listings = vec![five, six];

        let exact = FilterCriteria::new().with_rooms("5");
        assert_eq!(ids(&filter_listings(&listings, &exact)), vec![1]);

        // "5+" is a literal token, so neither 5 nor 6 rooms match
        let sentinel = FilterCriteria::new().with_rooms(FilterCriteria::FIVE_OR_MORE_ROOMS);
        assert!(filter_listings(&listings, &sentinel).is_empty());
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let listings = vec![
            listing(1, "Tehran", 3, 1.0),
            listing(2, "Shiraz", 2, 1.0),
            listing(3, "Tabriz", 1, 1.0),
        ];
        assert_eq!(filter_listings(&listings, &FilterCriteria::default()), listings);
        assert_eq!(
            filter_listings(&listings, &FilterCriteria::new().with_city("").with_rooms("")),
            listings
        );
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let criteria = FilterCriteria::new().with_city("Tehran");
        assert!(filter_listings(&[], &criteria).is_empty());
    }

    #[test]
    fn test_similar_listings_skip_current_and_cap() {
        let listings: Vec<Listing> = (1..=5).map(|id| listing(id, "Tehran", 1, 1.0)).collect();

        assert_eq!(ids(&similar_listings(&listings, 2, 3)), vec![1, 3, 4]);
        assert_eq!(ids(&similar_listings(&listings, 9, 2)), vec![1, 2]);
        assert!(similar_listings(&listings[..1], 1, 3).is_empty());
        assert!(similar_listings(&listings, 1, 0).is_empty());
    }

    const CITIES: [&str; 4] = ["Tehran", "Mashhad", "Isfahan", "Shiraz"];

    fn arb_listing() -> impl Strategy<Value = Listing> {
        (
            any::<u64>(),
            0..CITIES.len(),
            0u64..30_000_000_000,
            1u32..8,
            0..PropertyType::ALL.len(),
        )
            .prop_map(|(id, city, price, rooms, kind)| {
                let mut l = listing(id, CITIES[city], price, 80.0);
                l.rooms = rooms;
                l.property_type = PropertyType::ALL[kind];
                l
            })
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            proptest::option::of(prop::sample::select(vec!["Tehran", "sh", "Is", ""])),
            proptest::option::of(0u64..30_000_000_000),
            proptest::option::of(0u64..30_000_000_000),
            proptest::option::of(0..PropertyType::ALL.len()),
            proptest::option::of(prop::sample::select(vec!["1", "2", "3", "5+"])),
        )
            .prop_map(|(city, min, max, kind, rooms)| FilterCriteria {
                city: city.map(str::to_string),
                min_price: min,
                max_price: max,
                property_type: kind.map(|k| PropertyType::ALL[k]),
                rooms: rooms.map(str::to_string),
            })
    }

    /// Criteria constraining exactly one dimension
    fn arb_single_constraint() -> impl Strategy<Value = FilterCriteria> {
        prop_oneof![
            prop::sample::select(vec!["Tehran", "sh", "Is"])
                .prop_map(|city| FilterCriteria::new().with_city(city)),
            (0u64..30_000_000_000).prop_map(|price| FilterCriteria::new().with_min_price(price)),
            (0u64..30_000_000_000).prop_map(|price| FilterCriteria::new().with_max_price(price)),
            (0..PropertyType::ALL.len())
                .prop_map(|k| FilterCriteria::new().with_property_type(PropertyType::ALL[k])),
            prop::sample::select(vec!["1", "2", "3", "5+"])
                .prop_map(|rooms| FilterCriteria::new().with_rooms(rooms)),
        ]
    }

    /// `criteria` with every dimension that `extra` sets cleared
    fn without(criteria: &FilterCriteria, extra: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            city: criteria.city.clone().filter(|_| extra.city.is_none()),
            min_price: criteria.min_price.filter(|_| extra.min_price.is_none()),
            max_price: criteria.max_price.filter(|_| extra.max_price.is_none()),
            property_type: criteria.property_type.filter(|_| extra.property_type.is_none()),
            rooms: criteria.rooms.clone().filter(|_| extra.rooms.is_none()),
        }
    }

    /// `base` with the dimensions set in `extra` added on top
    fn combined(base: &FilterCriteria, extra: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            city: extra.city.clone().or_else(|| base.city.clone()),
            min_price: extra.min_price.or(base.min_price),
            max_price: extra.max_price.or(base.max_price),
            property_type: extra.property_type.or(base.property_type),
            rooms: extra.rooms.clone().or_else(|| base.rooms.clone()),
        }
    }

    /// True when `sub` appears in `full` in the same relative order
    fn is_subsequence(sub: &[Listing], full: &[Listing]) -> bool {
        let mut rest = full.iter();
        sub.iter().all(|item| rest.any(|candidate| candidate == item))
    }

    proptest! {
        #[test]
        fn prop_result_is_ordered_subsequence(
            listings in proptest::collection::vec(arb_listing(), 0..40),
            criteria in arb_criteria(),
        ) {
            let filtered = filter_listings(&listings, &criteria);
            prop_assert!(is_subsequence(&filtered, &listings));
            prop_assert!(filtered.iter().all(|l| criteria.matches(l)));
        }

        #[test]
        fn prop_adding_constraint_never_grows_result(
            listings in proptest::collection::vec(arb_listing(), 0..40),
            criteria in arb_criteria(),
            extra in arb_single_constraint(),
        ) {
            let loose = without(&criteria, &extra);
            let strict = combined(&loose, &extra);

            let loose_hits = filter_listings(&listings, &loose);
            let strict_hits = filter_listings(&listings, &strict);
            prop_assert!(strict_hits.len() <= loose_hits.len());
            prop_assert!(is_subsequence(&strict_hits, &loose_hits));
        }

        #[test]
        fn prop_filter_is_idempotent(
            listings in proptest::collection::vec(arb_listing(), 0..40),
            criteria in arb_criteria(),
        ) {
            let once = filter_listings(&listings, &criteria);
            let twice = filter_listings(&once, &criteria);
            prop_assert_eq!(once, twice);
        }
    }
}
