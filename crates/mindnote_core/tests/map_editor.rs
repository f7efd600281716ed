use mindnote_core::{
    ActionOutcome, ClickOutcome, GraphError, InteractionState, MapEditor, NodeStyle,
    ToolbarAction, ROOT_NODE_ID,
};

fn add_child(editor: &mut MapEditor, parent: &str) -> String {
    match editor
        .apply(parent, ToolbarAction::AddChild { position: None })
        .unwrap()
    {
        ActionOutcome::NodeCreated(id) => id,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn new_child_becomes_selected() {
    let mut editor = MapEditor::default();
    let child = add_child(&mut editor, ROOT_NODE_ID);

    assert_eq!(editor.selected(), Some(child.as_str()));
    assert_eq!(editor.store().nodes().len(), 2);
}

#[test]
fn connection_flow_creates_edge_between_clicked_nodes() {
    let mut editor = MapEditor::default();
    let a = add_child(&mut editor, ROOT_NODE_ID);
    let b = add_child(&mut editor, ROOT_NODE_ID);
    let edges_before = editor.store().edges().len();

    editor.click_node(&a).unwrap();
    assert!(editor.begin_connection());
    assert_eq!(editor.click_node(&a).unwrap(), ClickOutcome::Ignored);
    assert_eq!(editor.store().edges().len(), edges_before);

    let outcome = editor.click_node(&b).unwrap();
    assert_eq!(
        outcome,
        ClickOutcome::Connect {
            source: a.clone(),
            target: b.clone(),
        }
    );
    assert_eq!(editor.interaction(), &InteractionState::Idle);
    let edge = editor.store().edges().last().unwrap();
    assert_eq!((edge.source.as_str(), edge.target.as_str()), (a.as_str(), b.as_str()));
}

#[test]
fn toolbar_connection_starts_from_given_node() {
    let mut editor = MapEditor::default();
    let child = add_child(&mut editor, ROOT_NODE_ID);

    let outcome = editor
        .apply(ROOT_NODE_ID, ToolbarAction::AddConnection)
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Connecting(ROOT_NODE_ID.to_string()));
    assert!(editor.interaction().is_connecting());

    editor.click_pane();
    assert_eq!(editor.interaction(), &InteractionState::Idle);
    assert_eq!(editor.click_node(&child).unwrap(), ClickOutcome::Selected(child));
}

#[test]
fn deleting_selected_node_returns_to_idle() {
    let mut editor = MapEditor::default();
    let child = add_child(&mut editor, ROOT_NODE_ID);

    editor.apply(&child, ToolbarAction::Delete).unwrap();

    assert_eq!(editor.interaction(), &InteractionState::Idle);
    assert!(editor.store().edges().is_empty());
}

#[test]
fn deleting_root_through_toolbar_is_refused() {
    let mut editor = MapEditor::default();
    editor.click_node(ROOT_NODE_ID).unwrap();

    assert_eq!(
        editor.apply(ROOT_NODE_ID, ToolbarAction::Delete),
        Err(GraphError::RootProtected)
    );
    assert_eq!(editor.selected(), Some(ROOT_NODE_ID));
}

#[test]
fn clicking_unknown_node_is_reported() {
    let mut editor = MapEditor::default();
    assert_eq!(
        editor.click_node("ghost"),
        Err(GraphError::NodeNotFound("ghost".to_string()))
    );
    assert_eq!(editor.interaction(), &InteractionState::Idle);
}

#[test]
fn copy_paste_through_toolbar() {
    let mut editor = MapEditor::default();
    assert!(!editor.has_clipboard());
    assert_eq!(
        editor.apply(ROOT_NODE_ID, ToolbarAction::Paste),
        Err(GraphError::NothingCopied)
    );

    editor.apply(ROOT_NODE_ID, ToolbarAction::Copy).unwrap();
    assert!(editor.has_clipboard());
    let outcome = editor.apply(ROOT_NODE_ID, ToolbarAction::Paste).unwrap();
    let ActionOutcome::NodeCreated(pasted) = outcome else {
        panic!("paste should create a node");
    };
    assert_eq!(editor.selected(), Some(pasted.as_str()));
}

#[test]
fn content_actions_edit_the_node() {
    let mut editor = MapEditor::default();
    for action in [
        ToolbarAction::Style(NodeStyle::Primary),
        ToolbarAction::Emoji("🚀".to_string()),
        ToolbarAction::Link("docs.test/page".to_string()),
        ToolbarAction::Comment("first".to_string()),
        ToolbarAction::Label("Plan".to_string()),
        ToolbarAction::Media("https://img.test/a.png".to_string()),
    ] {
        assert_eq!(
            editor.apply(ROOT_NODE_ID, action).unwrap(),
            ActionOutcome::Updated
        );
    }

    let data = &editor.store().root().unwrap().data;
    assert_eq!(data.style, NodeStyle::Primary);
    assert_eq!(data.emoji.as_deref(), Some("🚀"));
    assert_eq!(data.links[0].url, "https://docs.test/page");
    assert_eq!(data.links[0].title, "https://docs.test/page");
    assert_eq!(data.comments[0].text, "first");
    assert_eq!(data.label, "Plan");
    assert_eq!(data.media.as_deref(), Some("https://img.test/a.png"));
}

#[test]
fn whitespace_comment_does_not_change_comments() {
    let mut editor = MapEditor::default();
    assert_eq!(
        editor.apply(ROOT_NODE_ID, ToolbarAction::Comment("   ".to_string())),
        Err(GraphError::EmptyComment)
    );
    assert!(editor.store().root().unwrap().data.comments.is_empty());
}

#[test]
fn import_resets_interaction_state() {
    let mut editor = MapEditor::default();
    let child = add_child(&mut editor, ROOT_NODE_ID);
    let exported = editor.export_json();

    editor.click_node(&child).unwrap();
    editor.import_json(&exported).unwrap();

    assert_eq!(editor.interaction(), &InteractionState::Idle);
    assert!(editor.store().contains_node(&child));
}
