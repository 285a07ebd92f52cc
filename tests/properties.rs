//! Property tests for the gravity calculator.

use proptest::prelude::*;

use brew_gravity::core::calculator::GravityCalculator;
use brew_gravity::core::report::{self, BatchReport, OutputFormat};
use brew_gravity::domain::model::{BatchInput, GrainAddition};
use brew_gravity::ReferenceCatalog;

fn grain_name() -> impl Strategy<Value = String> {
    let names: Vec<String> = ReferenceCatalog::builtin()
        .unwrap()
        .grains()
        .iter()
        .map(|g| g.name.clone())
        .collect();
    proptest::sample::select(names)
}

fn addition() -> impl Strategy<Value = GrainAddition> {
    (grain_name(), 0.0f64..50.0, 0.0f64..16.0)
        .prop_map(|(grain, pounds, ounces)| GrainAddition::new(grain, pounds, ounces))
}

fn batch() -> impl Strategy<Value = BatchInput> {
    (
        0.25f64..100.0,
        proptest::collection::vec(addition(), 0..8),
        0.990f64..1.020,
    )
        .prop_map(|(water_gallons, additions, final_fermented_gravity)| BatchInput {
            water_gallons,
            additions,
            final_fermented_gravity,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: typical extraction never beats maximum extraction.
    #[test]
    fn property_typical_never_exceeds_max(input in batch()) {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let result = GravityCalculator::new(&catalog).calculate(&input).unwrap();

        prop_assert!(result.typical_specific_gravity <= result.max_specific_gravity);
        prop_assert!(result.typical_fermented_abv <= result.max_fermented_abv);
        prop_assert!(result.typical_specific_gravity >= 1.0);
    }

    /// PROPERTY: the same batch always renders to the same bytes.
    #[test]
    fn property_rendering_is_idempotent(input in batch()) {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let calculator = GravityCalculator::new(&catalog);

        let first = BatchReport::from_result(&calculator.calculate(&input).unwrap());
        let second = BatchReport::from_result(&calculator.calculate(&input).unwrap());

        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Csv] {
            prop_assert_eq!(
                report::render(&[first.clone()], format).unwrap(),
                report::render(&[second.clone()], format).unwrap()
            );
        }
    }

    /// PROPERTY: whole ounces folded into pounds give identical results.
    #[test]
    fn property_ounces_equal_sixteenths_of_a_pound(
        grain in grain_name(),
        pounds in 0u32..40,
        ounces in 0u32..16,
        water_gallons in 0.5f64..20.0,
    ) {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let calculator = GravityCalculator::new(&catalog);

        let split = calculator.calculate(&BatchInput {
            water_gallons,
            additions: vec![GrainAddition::new(grain.clone(), f64::from(pounds), f64::from(ounces))],
            final_fermented_gravity: 1.0,
        }).unwrap();
        let folded = calculator.calculate(&BatchInput {
            water_gallons,
            additions: vec![GrainAddition::new(grain, f64::from(pounds) + f64::from(ounces) / 16.0, 0.0)],
            final_fermented_gravity: 1.0,
        }).unwrap();

        prop_assert_eq!(split.max_specific_gravity, folded.max_specific_gravity);
        prop_assert_eq!(split.typical_specific_gravity, folded.typical_specific_gravity);
    }

    /// PROPERTY: no grains means plain water at any volume.
    #[test]
    fn property_empty_batch_is_water(
        water_gallons in 0.01f64..1000.0,
        final_fermented_gravity in 0.990f64..1.020,
    ) {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let result = GravityCalculator::new(&catalog).calculate(&BatchInput {
            water_gallons,
            additions: vec![],
            final_fermented_gravity,
        }).unwrap();

        prop_assert_eq!(result.max_specific_gravity, 1.0);
        prop_assert_eq!(result.typical_specific_gravity, 1.0);
        prop_assert_eq!(result.max_fermented_abv, (1.0 - final_fermented_gravity) * 131.25);
    }
}
