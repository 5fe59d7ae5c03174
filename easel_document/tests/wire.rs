// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wire-format and traversal tests for `easel_document`.

use easel_document::{
    Changes, Document, NodeKind, NodePatch, NodePath, NodeRef, NodeTag, TextAlign,
    count_nodes, find_by_id, get_descendants, resolve_path, traverse_document,
};

const FIXTURE: &str = r##"{
    "schemaVersion": "1.0",
    "id": "doc",
    "name": "Kitchen sink",
    "artboards": [
        {
            "id": "board-a",
            "name": "A",
            "frame": { "x": 0, "y": 0, "width": 800, "height": 600 },
            "children": [
                {
                    "id": "card", "type": "frame", "name": "Card",
                    "frame": { "x": 10, "y": 10, "width": 300, "height": 200 },
                    "fill": "#fff", "clipsContent": true,
                    "children": [
                        { "id": "title", "type": "text", "text": "Title",
                          "frame": { "x": 8, "y": 8, "width": 200, "height": 24 },
                          "textStyle": { "fontSize": 20, "fontWeight": 700, "align": "center" } },
                        { "id": "icon", "type": "vector", "path": "M0 0 L10 10",
                          "visible": false,
                          "frame": { "x": 260, "y": 8, "width": 24, "height": 24 } }
                    ]
                },
                {
                    "id": "button", "type": "component", "componentId": "btn/primary",
                    "frame": { "x": 10, "y": 240, "width": 120, "height": 40 },
                    "children": [
                        { "id": "button-label", "type": "text", "text": "Go",
                          "frame": { "x": 0, "y": 0, "width": 120, "height": 40 } }
                    ]
                }
            ]
        },
        {
            "id": "board-b",
            "frame": { "x": 900, "y": 0, "width": 400, "height": 400 },
            "children": [
                { "id": "photo", "type": "image", "src": "cat.png", "alt": "A cat",
                  "frame": { "x": 0, "y": 0, "width": 400, "height": 300 } }
            ]
        }
    ]
}"##;

#[test]
fn decodes_every_variant() {
    let doc = Document::from_json(FIXTURE).unwrap();
    assert_eq!(doc.schema_version, "1.0");
    assert_eq!(count_nodes(&doc), 8);

    let tags: Vec<_> = traverse_document(&doc).map(|v| v.node.tag()).collect();
    assert_eq!(
        tags,
        [
            None,
            Some(NodeTag::Frame),
            Some(NodeTag::Text),
            Some(NodeTag::Vector),
            Some(NodeTag::Component),
            Some(NodeTag::Text),
            None,
            Some(NodeTag::Image),
        ]
    );

    let icon = find_by_id(&doc, "icon").unwrap();
    assert!(!icon.node.visible(), "explicit visible=false must survive decoding");
    assert_eq!(icon.path, NodePath::new(0, &[0, 1]));

    let title = find_by_id(&doc, "title").unwrap().node.as_node().unwrap();
    let NodeKind::Text { text_style, .. } = &title.kind else {
        panic!("title should decode as text");
    };
    assert_eq!(text_style.font_size, 20.0);
    assert_eq!(text_style.font_weight, 700);
    assert_eq!(text_style.align, TextAlign::Center);
    assert_eq!(text_style.font_family, "sans-serif");
}

#[test]
fn round_trips_through_json() {
    let doc = Document::from_json(FIXTURE).unwrap();
    let again = Document::from_json(&doc.to_json().unwrap()).unwrap();
    assert_eq!(doc, again);
}

#[test]
fn artboard_index_and_depth_follow_structure() {
    let doc = Document::from_json(FIXTURE).unwrap();
    let photo = find_by_id(&doc, "photo").unwrap();
    assert_eq!(photo.artboard_index, 1);
    assert_eq!(photo.depth, 1);

    let label = find_by_id(&doc, "button-label").unwrap();
    assert_eq!(label.depth, 2);
    assert!(matches!(
        resolve_path(&doc, &label.path),
        Some(NodeRef::Node(n)) if n.id.as_str() == "button-label"
    ));
}

#[test]
fn descendants_of_artboard_cover_its_whole_subtree() {
    let doc = Document::from_json(FIXTURE).unwrap();
    let ids: Vec<_> = get_descendants(&doc, &NodePath::artboard(0))
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(ids, ["card", "title", "icon", "button", "button-label"]);
}

#[test]
fn patches_decode_by_type_tag() {
    let patch: NodePatch = serde_json::from_str(
        r#"{ "type": "text", "text": "Renamed", "visible": false,
             "frame": { "x": 1, "y": 2, "width": 3, "height": 4 } }"#,
    )
    .unwrap();
    assert_eq!(patch.tag(), NodeTag::Text);
    assert_eq!(patch.common().visible, Some(false));

    let mut doc = Document::from_json(FIXTURE).unwrap();
    let path = find_by_id(&doc, "title").unwrap().path;
    let node = easel_document::resolve_path_mut(&mut doc, &path).unwrap();
    let changes = node.apply_patch(patch).unwrap();
    assert_eq!(
        changes,
        Changes::CONTENT | Changes::VISIBILITY | Changes::GEOMETRY
    );
}
