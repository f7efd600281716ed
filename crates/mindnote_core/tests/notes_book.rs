use chrono::NaiveDate;
use mindnote_core::model::note::default_categories;
use mindnote_core::{CategoryPatch, Note, NotePatch, NotesBook, NotesError};

// 2024-03-01T10:00:00Z
const MARCH_FIRST_MS: i64 = 1_709_287_200_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

fn note(id: &str, title: &str, category: &str, updated_at: i64) -> Note {
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: String::new(),
        category: category.to_string(),
        tags: Vec::new(),
        is_pinned: false,
        color: None,
        created_at: updated_at,
        updated_at,
    }
}

fn sample_book() -> NotesBook {
    let mut pinned = note("n-pinned", "Pinned plan", "work", MARCH_FIRST_MS);
    pinned.is_pinned = true;
    let mut tagged = note("n-tagged", "Shopping", "todo", MARCH_FIRST_MS + HOUR_MS);
    tagged.tags = vec!["Errands".to_string()];
    let mut body = note("n-body", "Journal", "personal", MARCH_FIRST_MS + DAY_MS);
    body.content = "Met the design team".to_string();

    NotesBook::new(vec![pinned, tagged, body], default_categories())
}

fn ids(notes: Vec<&Note>) -> Vec<&str> {
    notes.into_iter().map(|note| note.id.as_str()).collect()
}

#[test]
fn counts_are_derived_on_construction() {
    let book = sample_book();
    let count = |id: &str| {
        book.categories()
            .iter()
            .find(|category| category.id == id)
            .unwrap()
            .note_count
    };
    assert_eq!(count("work"), 1);
    assert_eq!(count("todo"), 1);
    assert_eq!(count("personal"), 1);
    assert_eq!(count("ideas"), 0);
}

#[test]
fn search_matches_title_content_and_tags_case_insensitively() {
    let book = sample_book();

    assert_eq!(ids(book.search_notes("PLAN")), vec!["n-pinned"]);
    assert_eq!(ids(book.search_notes("design")), vec!["n-body"]);
    assert_eq!(ids(book.search_notes("errand")), vec!["n-tagged"]);
    assert_eq!(book.search_notes("   ").len(), 3);
    assert!(book.search_notes("nothing-here").is_empty());
}

#[test]
fn sorted_notes_put_pinned_first_then_most_recent() {
    let book = sample_book();

    assert_eq!(
        ids(book.sorted_notes("", None)),
        vec!["n-pinned", "n-body", "n-tagged"]
    );
    assert_eq!(ids(book.sorted_notes("", Some("todo"))), vec!["n-tagged"]);
    assert_eq!(ids(book.filter_by_category("personal")), vec!["n-body"]);
}

#[test]
fn calendar_day_lists_notes_created_that_day() {
    let book = sample_book();
    let march_first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let march_second = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

    assert_eq!(
        ids(book.notes_on_day(march_first)),
        vec!["n-tagged", "n-pinned"]
    );
    assert_eq!(ids(book.notes_on_day(march_second)), vec!["n-body"]);
}

#[test]
fn update_bumps_timestamp_and_keeps_unset_fields() {
    let mut book = sample_book();
    let updated = book
        .update_note(
            "n-tagged",
            NotePatch {
                content: Some("milk".to_string()),
                ..NotePatch::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "Shopping");
    assert_eq!(updated.content, "milk");
    assert_eq!(updated.tags, vec!["Errands".to_string()]);
    assert!(updated.updated_at > MARCH_FIRST_MS + HOUR_MS);
}

#[test]
fn moving_note_between_categories_updates_counts() {
    let mut book = sample_book();
    book.update_note(
        "n-body",
        NotePatch {
            category: Some("ideas".to_string()),
            ..NotePatch::default()
        },
    )
    .unwrap();

    let ideas = book
        .categories()
        .iter()
        .find(|category| category.id == "ideas")
        .unwrap();
    assert_eq!(ideas.note_count, 1);
}

#[test]
fn delete_category_moves_notes_to_personal() {
    let mut book = sample_book();

    assert_eq!(book.delete_category("work").unwrap(), 1);
    assert_eq!(book.note("n-pinned").unwrap().category, "personal");
    let personal = book
        .categories()
        .iter()
        .find(|category| category.id == "personal")
        .unwrap();
    assert_eq!(personal.note_count, 2);
    assert_eq!(
        book.delete_category("work"),
        Err(NotesError::CategoryNotFound("work".to_string()))
    );
}

#[test]
fn category_rename_rejects_blank_names() {
    let mut book = sample_book();
    assert_eq!(
        book.update_category(
            "todo",
            CategoryPatch {
                name: Some(" ".to_string()),
                color: None,
            },
        ),
        Err(NotesError::InvalidCategoryName)
    );

    let renamed = book
        .update_category(
            "todo",
            CategoryPatch {
                name: Some(" Tasks ".to_string()),
                color: Some("bg-red-500".to_string()),
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Tasks");
    assert_eq!(renamed.note_count, 1);
}

#[test]
fn deleted_notes_are_gone() {
    let mut book = sample_book();
    let removed = book.delete_note("n-body").unwrap();
    assert_eq!(removed.title, "Journal");
    assert_eq!(
        book.delete_note("n-body"),
        Err(NotesError::NoteNotFound("n-body".to_string()))
    );
    assert_eq!(book.notes().len(), 2);
}
