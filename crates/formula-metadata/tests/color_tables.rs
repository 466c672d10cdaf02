use formula_metadata::{
    Color, ColorName, MetadataVisitor, PropertyKey, SpreadsheetMetadata, NUMBERED_COLOR_CACHE_SIZE,
};
use pretty_assertions::assert_eq;

fn name(text: &str) -> ColorName {
    ColorName::new(text).unwrap()
}

#[test]
fn default_palette_resolves_by_number_and_name() {
    let doc = SpreadsheetMetadata::EMPTY
        .set_defaults(&SpreadsheetMetadata::non_locale_defaults())
        .unwrap();
    let table = doc.color_table();
    assert_eq!(table.color_for_number(3), Some(Color::rgb(0xFF, 0, 0)));
    assert_eq!(table.color_for_name(&name("Blue")), Some(Color::rgb(0, 0, 0xFF)));
    assert_eq!(table.color_name_for_number(1), Some(&name("Black")));
    assert_eq!(table.color_for_number(99), None);
}

#[test]
fn local_colors_override_defaults() {
    let orange = Color::rgb(0xFF, 0xA5, 0x00);
    let doc = SpreadsheetMetadata::EMPTY
        .set_defaults(&SpreadsheetMetadata::non_locale_defaults())
        .unwrap()
        .set(&PropertyKey::numbered_color(3), orange)
        .unwrap()
        .set(&PropertyKey::named_color(&name("Orange")), 3)
        .unwrap();

    let table = doc.color_table();
    assert_eq!(table.color_for_number(3), Some(orange));
    // The default name for slot 3 now resolves to the local color.
    assert_eq!(table.color_for_name(&name("Red")), Some(orange));
    assert_eq!(table.color_for_name(&name("Orange")), Some(orange));
    assert_eq!(table.color_name_for_number(3), Some(&name("Orange")));
}

#[test]
fn local_name_reassignment_wins() {
    let doc = SpreadsheetMetadata::EMPTY
        .set_defaults(&SpreadsheetMetadata::non_locale_defaults())
        .unwrap()
        .set(&PropertyKey::named_color(&name("Red")), 5)
        .unwrap();
    assert_eq!(
        doc.color_table().color_for_name(&name("Red")),
        Some(Color::rgb(0, 0, 0xFF))
    );
}

#[test]
fn color_table_is_memoized_per_instance() {
    let doc = SpreadsheetMetadata::non_locale_defaults();
    let first = doc.color_table();
    let second = doc.color_table();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    // A changed instance gets its own table.
    let changed = doc
        .set(&PropertyKey::numbered_color(1), Color::white())
        .unwrap();
    assert_eq!(changed.color_table().color_for_number(1), Some(Color::white()));
    assert_eq!(first.color_for_number(1), Some(Color::black()));
}

#[test]
fn generated_keys_beyond_the_cache_behave_the_same() {
    let beyond = NUMBERED_COLOR_CACHE_SIZE + 100;
    let metadata = SpreadsheetMetadata::EMPTY
        .set(&PropertyKey::numbered_color(beyond), Color::black())
        .unwrap()
        .set(&PropertyKey::numbered_color(2), Color::white())
        .unwrap();
    assert_eq!(
        metadata.get(&PropertyKey::numbered_color(beyond)),
        Some(&Color::black())
    );
    let names: Vec<&str> = metadata.entries().map(|(name, _)| name.name()).collect();
    assert_eq!(names, ["color-132", "color-2"]);
}

#[derive(Default)]
struct CountColors {
    numbered: usize,
    named: usize,
}

impl MetadataVisitor for CountColors {
    fn visit_numbered_color(&mut self, _number: u32, _color: Color) {
        self.numbered += 1;
    }

    fn visit_named_color(&mut self, _name: &ColorName, _number: u32) {
        self.named += 1;
    }
}

#[test]
fn visitors_see_defaults_then_local() {
    let doc = SpreadsheetMetadata::EMPTY
        .set_defaults(&SpreadsheetMetadata::non_locale_defaults())
        .unwrap()
        .set(&PropertyKey::numbered_color(9), Color::black())
        .unwrap();

    let mut local = CountColors::default();
    doc.accept(&mut local);
    assert_eq!((local.numbered, local.named), (1, 0));

    let mut all = CountColors::default();
    doc.accept_with_defaults(&mut all);
    assert_eq!((all.numbered, all.named), (9, 8));
}
