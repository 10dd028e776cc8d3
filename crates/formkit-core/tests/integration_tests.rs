//! Integration tests for formkit-core.
//!
//! Exercises fields and sets only through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use formkit_core::domain::ValueChanged;
use formkit_core::prelude::*;

fn price_field() -> Field<Option<i64>> {
    Field::new("Price", None)
        .accept_invalid(false)
        .configure(|f| f.create_validator(|v| v.is_none_or(|n| n >= 0), "invalid price"))
}

fn counter() -> (Rc<RefCell<u32>>, impl FnMut(&ValueChanged<Option<i64>>)) {
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    (count, move |_: &ValueChanged<Option<i64>>| *c.borrow_mut() += 1)
}

// ============================================================================
// Field behaviour
// ============================================================================

#[test]
fn test_price_scenario() {
    let mut price = price_field();

    price.set_value(Some(-5)).unwrap();
    assert_eq!(price.value(), None);
    assert!(price.has_error());
    assert_eq!(price.error_message(), Some("invalid price"));

    price.set_value(Some(10)).unwrap();
    assert_eq!(price.value(), Some(10));
    assert!(!price.has_error());
    assert!(price.is_changed());
}

#[test]
fn test_accepting_invalid_values_commits_them() {
    let mut price = price_field().accept_invalid(true);

    price.set_value(Some(-5)).unwrap();

    assert_eq!(price.value(), Some(-5));
    assert!(price.has_error());
}

#[test]
fn test_repeated_write_is_idempotent() {
    let mut price = price_field();
    let (changes, handler) = counter();
    price.on_value_changed(handler);

    price.set_value(Some(100)).unwrap();
    price.set_value(Some(100)).unwrap();

    assert_eq!(*changes.borrow(), 1);
    assert!(price.is_changed());
}

#[test]
fn test_reset_returns_to_latest_init() {
    let mut price = price_field().accept_invalid(true);
    price.init(Some(1200));
    for v in [-1, 5, -9, 40] {
        price.set_value(Some(v)).unwrap();
    }
    price.init(Some(800));
    price.set_value(Some(-3)).unwrap();

    price.reset();

    assert_eq!(price.value(), Some(800));
    assert!(!price.has_error());
    assert!(!price.is_changed());
}

#[test]
fn test_cancelled_write_leaves_value_and_dirty_flag() {
    let mut price = price_field().accept_invalid(true);
    let checked = Rc::new(RefCell::new(0));
    let c = Rc::clone(&checked);
    price.on_validation_checked(move |_| *c.borrow_mut() += 1);
    price.on_value_changing(|e| e.cancel());

    let outcome = price.set_value(Some(-1)).unwrap();

    assert_eq!(outcome, WriteOutcome::Cancelled);
    assert_eq!(price.value(), None);
    assert!(!price.is_changed());
    assert_eq!(*checked.borrow(), 1);
    assert_eq!(price.error_message(), Some("invalid price"));
}

// ============================================================================
// FieldSet behaviour
// ============================================================================

#[test]
fn test_is_changed_filter_excludes_field() {
    let mut set = FieldSet::new();
    set.create_field("A", 0_i32, true, false);
    let b = set.create_field("B", 0_i32, true, false);
    set.get_mut(b).unwrap().set_value(1).unwrap();

    set.set_filter(FilterKind::IsChanged, |f| f.name() != "B");

    assert!(!set.field("A").unwrap().is_changed());
    assert!(set.field("B").unwrap().is_changed());
    assert!(!set.is_changed());
}

#[test]
fn test_set_values_skips_unknown_names() {
    let mut source = FieldSet::new();
    source.create_field("Title", String::from("Kusamakura"), true, false);
    source.create_field("Extra", 42_u8, true, false);

    let mut target = FieldSet::new();
    let title = target.create_field("Title", String::new(), true, false);

    target.set_values(&source).unwrap();

    assert_eq!(target.get(title).unwrap().value(), "Kusamakura");
    assert_eq!(target.len(), 1);
    assert!(matches!(
        target.field("Extra"),
        Err(FieldError::NotFound { .. })
    ));
}

#[test]
fn test_error_cleared_fires_once_with_last_error() {
    let mut set = FieldSet::new();
    let price = set.add_field(price_field());
    let title = set.create_field_with("Title", String::new(), |f| {
        f.create_validator(|s| !s.is_empty(), "title required");
    });

    assert!(!set.validation_check());
    assert!(set.has_error());

    let cleared = Rc::new(RefCell::new(Vec::new()));
    let aggregate = Rc::new(RefCell::new(Vec::new()));
    {
        let cleared = Rc::clone(&cleared);
        let aggregate = Rc::clone(&aggregate);
        set.subscribe(move |event| match event {
            SetEvent::ErrorCleared(f) => cleared.borrow_mut().push(f.name().to_owned()),
            SetEvent::PropertyChanged(SetProperty::HasError) => {
                aggregate.borrow_mut().push(());
            }
            _ => {}
        });
    }

    set.get_mut(title).unwrap().set_value("Sorekara".into()).unwrap();
    set.get_mut(price).unwrap().set_value(Some(10)).unwrap();

    assert!(!set.has_error());
    assert_eq!(*cleared.borrow(), ["Title"]);
    assert_eq!(aggregate.borrow().len(), 1);
}

#[test]
fn test_set_has_error_is_or_over_filtered_fields() {
    let mut set = FieldSet::new();
    let a = set.add_field(price_field());
    let b = set.add_field(Field::new("B", None::<i64>).configure(|f| {
        f.create_validator(|v| v.is_some(), "required");
    }));
    set.validation_check();
    assert!(set.get(b).unwrap().has_error());
    assert!(!set.get(a).unwrap().has_error());

    set.set_filter(FilterKind::HasError, |f| f.name() == "Price");
    assert!(!set.has_error());

    set.clear_filter(FilterKind::HasError);
    assert!(set.has_error());
}

#[test]
fn test_field_invalidated_reaches_set_subscribers() {
    let mut set = FieldSet::new();
    let price = set.add_field(price_field());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    set.subscribe(move |event| {
        if let SetEvent::FieldInvalidated { field, result } = event {
            s.borrow_mut()
                .push((field.name().to_owned(), result.message().map(str::to_owned)));
        }
    });

    set.get_mut(price).unwrap().set_value(Some(-1)).unwrap();
    set.validation_check();

    assert_eq!(
        *seen.borrow(),
        [("Price".to_owned(), Some("invalid price".to_owned()))]
    );
}

#[test]
fn test_snapshot_moves_to_another_thread() {
    let mut set = FieldSet::new();
    let price = set.add_field(price_field());
    set.get_mut(price).unwrap().set_value(Some(330)).unwrap();

    let snapshot = set.snapshot();
    let read = std::thread::spawn(move || *snapshot.get::<Option<i64>>("Price").unwrap())
        .join()
        .unwrap();

    assert_eq!(read, Some(330));
}
