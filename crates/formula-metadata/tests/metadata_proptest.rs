use formula_metadata::properties::{
    DATE_FORMATTER, DECIMAL_SEPARATOR, DEFAULT_YEAR, FUNCTIONS, HIDE_ZERO_VALUES, LOCALE,
    PRECISION, ROUNDING_MODE, SPREADSHEET_ID, TWO_DIGIT_YEAR,
};
use formula_metadata::{
    AliasSet, LocaleTag, PropertyKey, RoundingMode, Selector, SpreadsheetId, SpreadsheetMetadata,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Update {
    Precision(u32),
    Rounding(RoundingMode),
    HideZero(bool),
    TwoDigitYear(u32),
    DefaultYear(u32),
    Decimal(char),
    Id(u64),
    Color(u32, u32),
    DateFormatter(&'static str),
    Functions(&'static str),
    Locale(&'static str),
    Remove(usize),
}

impl Update {
    /// Document-only properties cannot go into a defaults metadata.
    fn is_shareable(&self) -> bool {
        !matches!(self, Update::Id(_))
    }
}

fn update() -> impl Strategy<Value = Update> {
    prop_oneof![
        (0u32..40).prop_map(Update::Precision),
        proptest::sample::select(RoundingMode::ALL.to_vec()).prop_map(Update::Rounding),
        any::<bool>().prop_map(Update::HideZero),
        (0u32..=99).prop_map(Update::TwoDigitYear),
        (1u32..=9999).prop_map(Update::DefaultYear),
        proptest::sample::select(vec!['.', ',', '\'', ' ']).prop_map(Update::Decimal),
        any::<u64>().prop_map(Update::Id),
        (1u32..64, any::<u32>()).prop_map(|(n, argb)| Update::Color(n, argb)),
        proptest::sample::select(vec![
            "date-format-pattern dd/mm/yyyy",
            "date-format-pattern yyyy-mm-dd",
            "date-format-pattern d mmmm yyyy",
        ])
        .prop_map(Update::DateFormatter),
        proptest::sample::select(vec!["sum", "sum, total sum", "average avg, count"])
            .prop_map(Update::Functions),
        proptest::sample::select(vec!["en-US", "de-CH", "fr_FR", "es-MX"]).prop_map(Update::Locale),
        (0usize..8).prop_map(Update::Remove),
    ]
}

fn build(updates: &[Update]) -> SpreadsheetMetadata {
    updates
        .iter()
        .fold(SpreadsheetMetadata::EMPTY, |metadata, update| apply(&metadata, update))
}

fn apply(metadata: &SpreadsheetMetadata, update: &Update) -> SpreadsheetMetadata {
    let result = match update {
        Update::Precision(v) => metadata.set(&PRECISION, *v),
        Update::Rounding(v) => metadata.set(&ROUNDING_MODE, *v),
        Update::HideZero(v) => metadata.set(&HIDE_ZERO_VALUES, *v),
        Update::TwoDigitYear(v) => metadata.set(&TWO_DIGIT_YEAR, *v),
        Update::DefaultYear(v) => metadata.set(&DEFAULT_YEAR, *v),
        Update::Decimal(v) => metadata.set(&DECIMAL_SEPARATOR, *v),
        Update::Id(v) => metadata.set(&SPREADSHEET_ID, SpreadsheetId(*v)),
        Update::Color(n, argb) => metadata.set(
            &PropertyKey::numbered_color(*n),
            formula_metadata::Color::new_argb(*argb),
        ),
        Update::DateFormatter(text) => {
            metadata.set(&DATE_FORMATTER, Selector::parse(text).expect("valid selector"))
        }
        Update::Functions(text) => {
            metadata.set(&FUNCTIONS, AliasSet::parse(text).expect("valid alias set"))
        }
        Update::Locale(text) => {
            metadata.set(&LOCALE, LocaleTag::parse(text).expect("valid locale"))
        }
        Update::Remove(idx) => {
            let name = metadata.entries().nth(*idx).map(|(name, _)| name.clone());
            return match name {
                Some(name) => metadata.remove_value(&name),
                None => metadata.clone(),
            };
        }
    };
    result.expect("generated values are valid")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn entries_stay_sorted_and_round_trip(updates in proptest::collection::vec(update(), 0..24)) {
        let mut metadata = SpreadsheetMetadata::EMPTY;
        for update in &updates {
            metadata = apply(&metadata, update);
        }

        let keys: Vec<(u8, String)> = metadata
            .entries()
            .map(|(name, _)| {
                let (rank, text) = name.sort_key();
                (rank, text.to_string())
            })
            .collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]), "unsorted: {keys:?}");
        if let Some((first, _)) = metadata.entries().next() {
            if metadata.get(&SPREADSHEET_ID).is_some() {
                prop_assert_eq!(first.name(), "spreadsheet-id");
            }
        }

        prop_assert_eq!(metadata.len() == 0, metadata.is_empty());
        let json = metadata.to_json();
        prop_assert_eq!(SpreadsheetMetadata::from_json(&json).unwrap(), metadata.clone());
    }

    #[test]
    fn bags_with_defaults_round_trip(
        shared in proptest::collection::vec(update(), 1..16),
        local in proptest::collection::vec(update(), 0..16),
    ) {
        let shared: Vec<Update> = shared.into_iter().filter(Update::is_shareable).collect();
        let defaults = build(&shared);
        let metadata = build(&local).set_defaults(&defaults).unwrap();
        // Lookups fall through to the defaults for anything not set locally.
        prop_assert_eq!(
            metadata.get_or_default(&PRECISION),
            metadata.get(&PRECISION).or_else(|| defaults.get(&PRECISION))
        );

        let json = metadata.to_json();
        prop_assert_eq!(json.to_string(), serde_json::to_string(&metadata).unwrap());
        let back = SpreadsheetMetadata::from_json(&json).unwrap();
        prop_assert_eq!(back.defaults().cloned(), metadata.defaults().cloned());
        prop_assert_eq!(back, metadata);
    }

    #[test]
    fn set_is_idempotent(
        updates in proptest::collection::vec(update(), 0..12),
        last in update(),
    ) {
        let mut metadata = SpreadsheetMetadata::EMPTY;
        for update in &updates {
            metadata = apply(&metadata, update);
        }
        let once = apply(&metadata, &last);
        if !matches!(last, Update::Remove(_)) {
            prop_assert_eq!(apply(&once, &last), once);
        }
    }

    #[test]
    fn insertion_order_does_not_matter(
        precision in 0u32..40,
        year in 0u32..=99,
        hide in any::<bool>(),
    ) {
        let a = SpreadsheetMetadata::EMPTY
            .set(&PRECISION, precision).unwrap()
            .set(&TWO_DIGIT_YEAR, year).unwrap()
            .set(&HIDE_ZERO_VALUES, hide).unwrap();
        let b = SpreadsheetMetadata::EMPTY
            .set(&HIDE_ZERO_VALUES, hide).unwrap()
            .set(&TWO_DIGIT_YEAR, year).unwrap()
            .set(&PRECISION, precision).unwrap();
        prop_assert_eq!(a, b);
    }
}
