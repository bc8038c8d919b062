use std::sync::Once;

use newsdesk_core::{update, Entity, InsertPosition, Pagination, ResourceMsg, ResourceState};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(desk_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: String,
    title: String,
}

impl Row {
    fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

impl Entity for Row {
    fn id(&self) -> &str {
        &self.id
    }
}

fn page(page: u32, pages: u32) -> Pagination {
    Pagination {
        total: 3,
        page,
        pages,
        limit: 10,
    }
}

fn listed(state: ResourceState<Row>, ids: &[&str]) -> ResourceState<Row> {
    let state = update(state, ResourceMsg::Started);
    update(
        state,
        ResourceMsg::Listed {
            items: ids.iter().map(|id| Row::new(id, "t")).collect(),
            pagination: Some(page(1, 1)),
        },
    )
}

#[test]
fn list_replaces_items_and_pagination() {
    init_logging();
    let state = listed(ResourceState::default(), &["1", "2", "3"]);

    assert_eq!(state.ids(), vec!["1", "2", "3"]);
    assert_eq!(state.pagination(), Some(page(1, 1)));
    assert!(!state.loading());
    assert_eq!(state.error(), None);

    let state = listed(state, &["4"]);
    assert_eq!(state.ids(), vec!["4"]);
}

#[test]
fn list_drops_repeated_ids() {
    init_logging();
    let state = listed(ResourceState::default(), &["1", "2", "1"]);
    assert_eq!(state.ids(), vec!["1", "2"]);
}

#[test]
fn started_clears_previous_error() {
    init_logging();
    let state = update(ResourceState::<Row>::default(), ResourceMsg::Started);
    let state = update(
        state,
        ResourceMsg::Failed {
            message: "network error".into(),
        },
    );
    assert_eq!(state.error(), Some("network error"));

    let state = update(state, ResourceMsg::Started);
    assert_eq!(state.error(), None);
    assert!(state.loading());
}

#[test]
fn failed_list_preserves_prior_items_and_pagination() {
    init_logging();
    let state = listed(ResourceState::default(), &["1", "2", "3", "4", "5"]);

    let state = update(state, ResourceMsg::Started);
    let state = update(
        state,
        ResourceMsg::Failed {
            message: "Internal Server Error".into(),
        },
    );

    assert_eq!(state.items().len(), 5);
    assert_eq!(state.pagination(), Some(page(1, 1)));
    assert_eq!(state.error(), Some("Internal Server Error"));
    assert!(!state.loading());
}

#[test]
fn create_prepends_or_appends_per_resource() {
    init_logging();
    let prepend = listed(ResourceState::new(InsertPosition::Prepend), &["1", "2"]);
    let prepend = update(prepend, ResourceMsg::Started);
    let prepend = update(prepend, ResourceMsg::Created(Row::new("9", "new")));
    assert_eq!(prepend.ids(), vec!["9", "1", "2"]);

    let append = listed(ResourceState::new(InsertPosition::Append), &["1", "2"]);
    let append = update(append, ResourceMsg::Started);
    let append = update(append, ResourceMsg::Created(Row::new("9", "new")));
    assert_eq!(append.ids(), vec!["1", "2", "9"]);
    assert_eq!(append.current(), Some(&Row::new("9", "new")));
}

#[test]
fn create_of_known_id_replaces_instead_of_duplicating() {
    init_logging();
    let state = listed(ResourceState::default(), &["1", "2"]);
    let state = update(state, ResourceMsg::Started);
    let state = update(state, ResourceMsg::Created(Row::new("2", "fresh")));

    assert_eq!(state.ids(), vec!["1", "2"]);
    assert_eq!(state.find("2").map(|row| row.title.as_str()), Some("fresh"));
}

#[test]
fn update_replaces_in_place() {
    init_logging();
    let state = listed(ResourceState::default(), &["1", "2", "3"]);
    let state = update(state, ResourceMsg::Started);
    let state = update(state, ResourceMsg::Updated(Row::new("2", "edited")));

    assert_eq!(state.ids(), vec!["1", "2", "3"]);
    assert_eq!(state.items()[1].title, "edited");
    assert_eq!(state.current().map(|row| row.id.as_str()), Some("2"));
}

#[test]
fn update_of_unknown_id_leaves_items_alone() {
    init_logging();
    let state = listed(ResourceState::default(), &["1"]);
    let state = update(state, ResourceMsg::Started);
    let state = update(state, ResourceMsg::Updated(Row::new("7", "elsewhere")));

    assert_eq!(state.ids(), vec!["1"]);
}

#[test]
fn delete_removes_exactly_one_keeping_order() {
    init_logging();
    let state = listed(ResourceState::default(), &["1", "2", "3"]);
    let state = update(state, ResourceMsg::Started);
    let state = update(state, ResourceMsg::Deleted { id: "2".into() });

    assert_eq!(state.ids(), vec!["1", "3"]);
    assert!(!state.loading());
}

#[test]
fn delete_clears_matching_current() {
    init_logging();
    let state = update(ResourceState::default(), ResourceMsg::Started);
    let state = update(state, ResourceMsg::Fetched(Row::new("5", "x")));
    assert!(state.current().is_some());

    let state = update(state, ResourceMsg::Started);
    let state = update(state, ResourceMsg::Deleted { id: "5".into() });
    assert_eq!(state.current(), None);
}

#[test]
fn loading_stays_true_until_last_concurrent_operation_completes() {
    init_logging();
    let state = listed(ResourceState::default(), &["1", "2", "3"]);
    let state = update(state, ResourceMsg::Started);
    let state = update(state, ResourceMsg::Started);
    assert!(state.loading());

    let state = update(state, ResourceMsg::Deleted { id: "2".into() });
    assert!(state.loading());

    let state = update(
        state,
        ResourceMsg::Listed {
            items: vec![Row::new("1", "t"), Row::new("2", "t"), Row::new("3", "t")],
            pagination: Some(page(1, 1)),
        },
    );
    assert!(!state.loading());
    // Last response wins: the slow list brings the deleted row back.
    assert_eq!(state.ids(), vec!["1", "2", "3"]);
}
