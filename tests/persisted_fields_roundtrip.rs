//! Property: persisted fields survive save and reload unchanged, while
//! enrichment always reflects the lookups.

#![allow(clippy::unwrap_used)]

mod common;

use common::{expected_city, expected_price, harness};
use proptest::prelude::*;
use vehicles_api::domain::entities::Vehicle;
use vehicles_api::domain::value_objects::{Condition, Coordinates, Details, Manufacturer};

fn details_strategy() -> impl Strategy<Value = Details> {
    (
        1u32..10_000,
        "[A-Za-z][A-Za-z ]{0,15}",
        "[A-Za-z0-9][A-Za-z0-9 -]{0,15}",
        proptest::option::of(0u32..500_000),
        proptest::option::of(1950i32..2030),
    )
        .prop_map(|(code, make, model, mileage, year)| {
            let mut details = Details::new(Manufacturer::new(code, make), model);
            details.mileage = mileage;
            details.model_year = year;
            details
        })
}

fn coordinates_strategy() -> impl Strategy<Value = Coordinates> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinates::new(lat, lon).unwrap())
}

fn condition_strategy() -> impl Strategy<Value = Condition> {
    prop_oneof![Just(Condition::New), Just(Condition::Used)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn saved_vehicle_reloads_with_same_persisted_fields(
        condition in condition_strategy(),
        details in details_strategy(),
        coordinates in coordinates_strategy(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let h = harness();
            let saved = h
                .service
                .save(Vehicle::new(condition, details.clone(), coordinates))
                .await
                .unwrap();
            let id = saved.id().unwrap();

            let found = h.service.find_by_id(id).await.unwrap();
            prop_assert_eq!(found.condition(), condition);
            prop_assert_eq!(found.details(), &details);
            prop_assert_eq!(found.coordinates(), coordinates);
            let expected = expected_price(id);
            prop_assert_eq!(found.price(), Some(expected.as_str()));
            let city = found.location().address().map(|a| a.city().to_string());
            prop_assert_eq!(city, Some(expected_city(coordinates)));
            Ok(())
        })?;
    }
}
