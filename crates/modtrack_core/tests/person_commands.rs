use std::collections::BTreeSet;

use modtrack_core::{
    Command, CommandError, CommandOutcome, CommandParser, Email, MessageCatalog, Name, Person,
    Phone, RecordStore,
};

fn run(store: &mut RecordStore, input: &str) -> Result<CommandOutcome, String> {
    let messages = MessageCatalog::default();
    let command = CommandParser::new(&messages)
        .parse(input)
        .map_err(|error| error.to_string())?;
    command
        .execute(store, &messages)
        .map_err(|error| error.to_string())
}

fn run_command(store: &mut RecordStore, input: &str) -> Result<CommandOutcome, CommandError> {
    let messages = MessageCatalog::default();
    let command = CommandParser::new(&messages)
        .parse(input)
        .expect("test input should parse");
    command.execute(store, &messages)
}

fn person(name: &str, phone: &str, email: &str) -> Person {
    Person::new(
        Name::new(name).expect("valid name"),
        Phone::new(phone).expect("valid phone"),
        Email::new(email).expect("valid email"),
        BTreeSet::new(),
    )
}

fn store_of_three() -> RecordStore {
    let mut store = RecordStore::new();
    for (name, phone, email) in [
        ("Amy Bee", "11111111", "amy@example.com"),
        ("Bob Choo", "22222222", "bob@example.com"),
        ("Carl Kurz", "33333333", "carl@example.com"),
    ] {
        store
            .add_person(person(name, phone, email))
            .expect("seed person should insert");
    }
    store
}

#[test]
fn add_against_empty_store_yields_one_visible_person() {
    let mut store = RecordStore::new();
    let outcome =
        run(&mut store, "add n/Amy Bee p/11111111 e/amy@example.com").expect("add should succeed");

    assert_eq!(
        outcome.feedback,
        "New person added: Amy Bee; Phone: 11111111; Email: amy@example.com"
    );
    let visible: Vec<&Person> = store.visible_persons().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name().as_str(), "Amy Bee");
    assert_eq!(visible[0].phone().as_str(), "11111111");
    assert_eq!(visible[0].email().as_str(), "amy@example.com");
    assert!(visible[0].tags().is_empty());
}

#[test]
fn duplicate_add_fails_and_leaves_master_unchanged() {
    let mut store = store_of_three();
    let before = store.clone();

    let error = run_command(&mut store, "add n/Amy Bee p/11111111 e/changed@example.com")
        .expect_err("duplicate identity must fail");
    assert_eq!(
        error,
        CommandError::DuplicatePerson("This person already exists in the records.".to_string())
    );
    assert_eq!(store, before);
}

#[test]
fn delete_removes_the_entity_at_the_visible_position() {
    let mut store = store_of_three();
    let outcome = run(&mut store, "delete 2").expect("delete should succeed");
    assert_eq!(
        outcome.feedback,
        "Deleted Person: Bob Choo; Phone: 22222222; Email: bob@example.com"
    );
    let names: Vec<&str> = store.persons().iter().map(|p| p.name().as_str()).collect();
    assert_eq!(names, ["Amy Bee", "Carl Kurz"]);
}

#[test]
fn delete_resolves_indices_against_the_filtered_view() {
    let mut store = store_of_three();
    run(&mut store, "find carl").expect("find should succeed");

    // Visible view holds only Carl, so index 1 deletes him.
    run(&mut store, "delete 1").expect("delete should succeed");
    let names: Vec<&str> = store.persons().iter().map(|p| p.name().as_str()).collect();
    assert_eq!(names, ["Amy Bee", "Bob Choo"]);
}

#[test]
fn delete_far_out_of_range_fails_and_changes_nothing() {
    let mut store = store_of_three();
    let before = store.clone();

    let error = run_command(&mut store, "delete 999999").expect_err("index must be invalid");
    assert_eq!(
        error,
        CommandError::InvalidPersonIndex("The person index provided is invalid".to_string())
    );
    assert_eq!(store, before);
    assert_eq!(store.persons().len(), 3);
}

#[test]
fn edit_replaces_fields_and_resets_the_filter() {
    let mut store = store_of_three();
    run(&mut store, "find amy").expect("find should succeed");

    let outcome =
        run(&mut store, "edit 1 p/91234567 e/amybee@example.com").expect("edit should succeed");
    assert_eq!(
        outcome.feedback,
        "Edited Person: Amy Bee; Phone: 91234567; Email: amybee@example.com"
    );
    // Position in the master list is preserved and the filter shows everyone.
    assert_eq!(store.persons()[0].phone().as_str(), "91234567");
    assert_eq!(store.visible_person_count(), 3);
}

#[test]
fn edit_into_an_existing_identity_fails() {
    let mut store = store_of_three();
    let before = store.clone();

    let error = run_command(&mut store, "edit 2 n/Amy Bee p/11111111")
        .expect_err("identity collision must fail");
    assert_eq!(
        error,
        CommandError::DuplicatePerson("This person already exists in the records.".to_string())
    );
    assert_eq!(store, before);
}

#[test]
fn find_filters_by_whole_word_keyword_and_reports_count() {
    let mut store = store_of_three();
    let outcome = run(&mut store, "find amy bob").expect("find should succeed");
    assert_eq!(outcome.feedback, "2 persons listed!");
    let names: Vec<&str> = store.visible_persons().map(|p| p.name().as_str()).collect();
    assert_eq!(names, ["Amy Bee", "Bob Choo"]);

    let outcome = run(&mut store, "find bee").expect("find should succeed");
    assert_eq!(outcome.feedback, "1 persons listed!");
}

#[test]
fn list_restores_the_full_view() {
    let mut store = store_of_three();
    run(&mut store, "find amy").expect("find should succeed");
    assert_eq!(store.visible_person_count(), 1);

    let outcome = run(&mut store, "list").expect("list should succeed");
    assert_eq!(outcome.feedback, "Listed all persons");
    assert_eq!(store.visible_person_count(), 3);
}

#[test]
fn clear_empties_everything() {
    let mut store = store_of_three();
    let outcome = run(&mut store, "clear").expect("clear should succeed");
    assert_eq!(outcome.feedback, "All records have been cleared!");
    assert!(store.persons().is_empty());
}

#[test]
fn help_and_exit_set_their_directives() {
    let mut store = RecordStore::new();

    let help = run(&mut store, "help").expect("help should succeed");
    assert!(help.show_help);
    assert!(!help.exit);

    let exit = run(&mut store, "exit").expect("exit should succeed");
    assert!(exit.exit);
    assert!(!exit.show_help);
}

#[test]
fn commands_parse_into_expected_variants() {
    let messages = MessageCatalog::default();
    let parser = CommandParser::new(&messages);
    assert!(matches!(
        parser.parse("list").expect("parses"),
        Command::ListPersons
    ));
    assert!(matches!(parser.parse("home").expect("parses"), Command::Home));
}
