use chrono::NaiveDate;
use core_types::{CoreError, EntryId, Journal, NewEntry};
use pretty_assertions::assert_eq;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn add_keeps_entries_sorted_by_date() {
    let mut journal = Journal::new();
    journal.add(NewEntry::new(day(3), 79.0)).unwrap();
    journal.add(NewEntry::new(day(1), 80.0)).unwrap();
    journal.add(NewEntry::new(day(2), 79.5)).unwrap();

    let dates: Vec<_> = journal.entries().iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(1), day(2), day(3)]);
}

#[test]
fn same_day_entries_keep_insertion_order() {
    let mut journal = Journal::new();
    journal.add(NewEntry::new(day(1), 80.0)).unwrap();
    journal.add(NewEntry::new(day(1), 81.0)).unwrap();
    journal.add(NewEntry::new(day(1), 82.0)).unwrap();

    let weights: Vec<_> = journal.entries().iter().map(|e| e.weight).collect();
    assert_eq!(weights, vec![80.0, 81.0, 82.0]);
}

#[test]
fn add_rejects_invalid_weight() {
    let mut journal = Journal::new();
    let err = journal.add(NewEntry::new(day(1), 0.0)).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "weight"));
    assert!(journal.is_empty());
}

#[test]
fn update_replaces_whole_record_and_resorts() {
    let mut journal = Journal::new();
    let first = journal.add(NewEntry::new(day(1), 80.0).with_note("morning")).unwrap().id;
    journal.add(NewEntry::new(day(2), 79.0)).unwrap();

    let updated = journal.update(first, NewEntry::new(day(5), 78.0)).unwrap();
    assert_eq!(updated.id, first);
    assert_eq!(updated.note, None);

    let last = journal.entries().last().unwrap();
    assert_eq!(last.id, first);
    assert_eq!(last.weight, 78.0);
    assert_eq!(journal.len(), 2);
}

#[test]
fn note_only_edit_keeps_same_day_order() {
    let mut journal = Journal::new();
    let first = journal.add(NewEntry::new(day(1), 80.0)).unwrap().id;
    journal.add(NewEntry::new(day(1), 81.0)).unwrap();
    journal.add(NewEntry::new(day(5), 78.0)).unwrap();

    journal
        .update(first, NewEntry::new(day(1), 80.0).with_note("morning"))
        .unwrap();

    let order: Vec<_> = journal.entries().iter().map(|e| e.weight).collect();
    assert_eq!(order, vec![80.0, 81.0, 78.0]);
    assert_eq!(journal.entries()[0].id, first);
    assert_eq!(journal.entries()[0].note.as_deref(), Some("morning"));
}

#[test]
fn moving_an_entry_to_another_day_puts_it_last_on_that_day() {
    let mut journal = Journal::new();
    let moved = journal.add(NewEntry::new(day(1), 80.0)).unwrap().id;
    journal.add(NewEntry::new(day(2), 79.0)).unwrap();

    journal.update(moved, NewEntry::new(day(2), 78.5)).unwrap();

    let order: Vec<_> = journal.entries().iter().map(|e| (e.date, e.weight)).collect();
    assert_eq!(order, vec![(day(2), 79.0), (day(2), 78.5)]);
}

#[test]
fn update_and_remove_report_unknown_ids() {
    let mut journal = Journal::new();
    let missing = EntryId::new();
    assert_eq!(
        journal.update(missing, NewEntry::new(day(1), 80.0)).unwrap_err(),
        CoreError::NotFound(missing)
    );
    assert_eq!(journal.remove(missing).unwrap_err(), CoreError::NotFound(missing));
}

#[test]
fn remove_returns_the_entry() {
    let mut journal = Journal::new();
    let id = journal.add(NewEntry::new(day(1), 80.0)).unwrap().id;
    journal.add(NewEntry::new(day(2), 79.0)).unwrap();

    let removed = journal.remove(id).unwrap();
    assert_eq!(removed.weight, 80.0);
    assert!(journal.get(id).is_none());
    assert!(!journal.has_entry_on(day(1)));
    assert!(journal.has_entry_on(day(2)));
}

#[test]
fn from_entries_sorts_stably() {
    let mut scratch = Journal::new();
    scratch.add(NewEntry::new(day(2), 70.0)).unwrap();
    scratch.add(NewEntry::new(day(1), 71.0)).unwrap();
    scratch.add(NewEntry::new(day(2), 72.0)).unwrap();
    let mut shuffled = scratch.into_entries();
    shuffled.reverse();

    let journal = Journal::from_entries(shuffled);
    let weights: Vec<_> = journal.entries().iter().map(|e| e.weight).collect();
    // Reversed input puts 72 before 70 on day 2; the stable sort keeps that.
    assert_eq!(weights, vec![71.0, 72.0, 70.0]);
}

#[test]
fn clear_drops_every_entry() {
    let mut journal = Journal::new();
    journal.add(NewEntry::new(day(1), 80.0)).unwrap();
    journal.add(NewEntry::new(day(2), 79.0)).unwrap();

    journal.clear();
    assert!(journal.is_empty());
    assert!(!journal.has_entry_on(day(1)));
}
