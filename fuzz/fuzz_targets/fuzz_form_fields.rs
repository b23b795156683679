#![no_main]

//! Feeds arbitrary field edits through the issue form and renders the result.
//! Titles and assignees may contain any Unicode, so this also covers the
//! character-based truncation in the issue table.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use issueboard::commands::render;
use issueboard::controllers::{FormFields, FormMode, FormState, IssueFields, ListState};
use issueboard::models::Issue;

#[derive(Arbitrary, Debug)]
struct Edit {
    field: u8,
    value: String,
}

#[derive(Arbitrary, Debug)]
struct FormInput {
    edits: Vec<Edit>,
    created_at: String,
}

const FIELDS: [&str; 5] = ["title", "description", "assigned_to", "status", "bogus"];

fuzz_target!(|input: FormInput| {
    let mut form: FormState<IssueFields, i64> = FormState::new(1, FormMode::Create);

    for edit in input.edits.iter().take(32) {
        let name = FIELDS[edit.field as usize % FIELDS.len()];
        let _ = form.field_changed(name, &edit.value);
    }

    let fields = form.fields().clone();
    let payload = fields.payload();
    assert_eq!(payload.title, payload.title.trim());
    if form.can_submit() {
        assert!(!payload.title.is_empty());
        assert!(!payload.assigned_to.is_empty());
    }

    let _ = render::issue_form(&form);

    let issue = Issue {
        id: 1,
        project_id: 1,
        title: fields.title,
        description: fields.description,
        assigned_to: fields.assigned_to,
        status: fields.status,
        created_at: input.created_at.clone(),
        updated_at: input.created_at,
    };
    let mut list: ListState<Issue, i64> = ListState::new();
    let ticket = list.begin_load(1);
    list.finish_load(ticket, Ok(vec![issue]));
    let _ = render::issue_table(&list);
});
