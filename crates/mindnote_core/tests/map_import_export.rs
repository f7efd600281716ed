use mindnote_core::persistence::json_bridge::{write_export, EXPORT_FILE_NAME};
use mindnote_core::{
    read_import, DocumentStore, DocumentStoreError, GraphStore, ImportError, JsonFileDocumentStore,
    KeyValueStore, KvDocumentStore, MapDocument, MapEditor, MemoryKvStore, NodeStyle, TextStyle,
    ROOT_NODE_ID,
};

fn populated_store() -> GraphStore {
    let mut store = GraphStore::new();
    let child = store.add_node(ROOT_NODE_ID, None).unwrap();
    let other = store.add_node(ROOT_NODE_ID, None).unwrap();
    store.connect(&child, &other).unwrap();
    store.set_style(&child, NodeStyle::Warning).unwrap();
    store.set_text_style(&child, TextStyle::Heading).unwrap();
    store.set_emoji(&child, "💡").unwrap();
    store.add_link(&child, "example.com").unwrap();
    store.add_comment(&other, "  check this  ").unwrap();
    store
}

#[test]
fn export_then_import_preserves_nodes_and_edges() {
    let source = populated_store();
    let json = source.save();

    let mut target = GraphStore::new();
    target.load(&json).unwrap();

    assert_eq!(target.nodes(), source.nodes());
    assert_eq!(target.edges(), source.edges());
}

#[test]
fn import_missing_edges_leaves_store_unchanged() {
    let mut store = populated_store();
    let before = store.document();

    let err = store
        .load(r#"{ "nodes": [{ "id": "x", "position": { "x": 0, "y": 0 }, "data": {} }] }"#)
        .unwrap_err();

    assert!(matches!(err, ImportError::MissingField("edges")));
    assert_eq!(store.document(), before);
}

#[test]
fn import_of_invalid_json_leaves_store_unchanged() {
    let mut store = populated_store();
    let before = store.document();

    assert!(matches!(
        store.load("{ not json"),
        Err(ImportError::Json(_))
    ));
    assert_eq!(store.document(), before);
}

#[test]
fn import_ignores_unknown_keys_and_repairs_missing_root() {
    let mut store = GraphStore::new();
    store
        .load(
            r#"{
                "version": 3,
                "nodes": [{
                    "id": "a",
                    "type": "editableNode",
                    "position": { "x": 1, "y": 2 },
                    "data": { "label": "A", "style": "sparkly" },
                    "selected": true
                }],
                "edges": [{ "id": "e1", "source": "a", "target": "b", "animated": true }]
            }"#,
        )
        .unwrap();

    assert_eq!(store.nodes().len(), 2);
    assert!(store.document().has_root());
    assert_eq!(store.node("a").unwrap().data.style, NodeStyle::Default);
    assert_eq!(store.edges()[0].target, "b");
}

#[test]
fn export_file_round_trips_through_editor() {
    let dir = tempfile::tempdir().unwrap();
    let editor = MapEditor::new(populated_store());

    let path = editor.export_to_dir(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);

    let mut restored = MapEditor::default();
    restored.import_file(&path).unwrap();
    assert_eq!(restored.store().document(), editor.store().document());
}

#[test]
fn reading_missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_import(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}

#[test]
fn json_file_document_store_saves_and_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut documents = JsonFileDocumentStore::new(dir.path().join("maps").join("one.json"));

    assert!(documents.load().unwrap().is_none());

    let document = populated_store().document();
    documents.save(&document).unwrap();
    assert_eq!(documents.load().unwrap(), Some(document));
}

#[test]
fn json_file_document_store_reports_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_export(&MapDocument::with_root(), dir.path()).unwrap();
    std::fs::write(&path, r#"{ "nodes": [] }"#).unwrap();

    let documents = JsonFileDocumentStore::new(path);
    assert!(matches!(
        documents.load(),
        Err(DocumentStoreError::Decode(ImportError::MissingField("edges")))
    ));
}

#[test]
fn kv_document_store_uses_mindmap_key() {
    let mut kv = MemoryKvStore::new();
    {
        let mut documents = KvDocumentStore::new(&mut kv, "abc");
        assert_eq!(documents.key(), "mindmap:abc");
        documents.save(&MapDocument::with_root()).unwrap();
    }

    assert!(kv.get("mindmap:abc").unwrap().is_some());
    let documents = KvDocumentStore::new(kv, "abc");
    assert_eq!(documents.load().unwrap(), Some(MapDocument::with_root()));
}

fn root_document_with_data(data: serde_json::Value) -> String {
    serde_json::json!({
        "nodes": [{
            "id": ROOT_NODE_ID,
            "type": "editableNode",
            "position": { "x": 0, "y": 0 },
            "data": data
        }],
        "edges": []
    })
    .to_string()
}

#[test]
fn unreadable_style_values_import_as_default() {
    for value in [
        serde_json::json!(null),
        serde_json::json!(3),
        serde_json::json!("neon"),
        serde_json::json!({ "color": "red" }),
    ] {
        let mut store = GraphStore::new();
        store
            .load(&root_document_with_data(serde_json::json!({
                "label": "Root",
                "style": value.clone(),
                "textStyle": value.clone()
            })))
            .unwrap();

        let data = &store.root().unwrap().data;
        assert_eq!(data.style, NodeStyle::Default, "style {value}");
        assert_eq!(data.text_style, TextStyle::Default, "textStyle {value}");
        assert_eq!(data.label, "Root");
    }
}

#[test]
fn known_style_values_still_import() {
    let mut store = GraphStore::new();
    store
        .load(&root_document_with_data(serde_json::json!({
            "label": "Root",
            "style": "danger",
            "textStyle": "subheading"
        })))
        .unwrap();

    let data = &store.root().unwrap().data;
    assert_eq!(data.style, NodeStyle::Danger);
    assert_eq!(data.text_style, TextStyle::Subheading);
}

#[test]
fn imported_busy_flag_is_not_exported_again() {
    let mut store = GraphStore::new();
    store
        .load(&root_document_with_data(serde_json::json!({
            "label": "Root",
            "isGenerating": true
        })))
        .unwrap();

    assert!(!store.root().unwrap().data.is_generating);
    store.set_label(ROOT_NODE_ID, "Editable").unwrap();
    assert!(!store.save().contains("isGenerating"));
}
