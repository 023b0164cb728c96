use relational_json_pointer::{
    get, resolve, set, set_with_frame, tokenize, RelationalPointerError, Resolver,
};
use serde_json::{json, Value};

fn read(pointers: &[&str], doc: &Value) -> Option<Value> {
    get(pointers, doc)
        .unwrap_or_else(|e| panic!("get failed for {pointers:?}: {e}"))
        .map(|v| v.into_owned())
}

#[test]
fn absolute_pointer_matrix() {
    let doc = json!({
        "foo": ["bar", "baz"],
        "": 0,
        "a/b": 1,
        "c%d": 2,
        "e^f": 3,
        "g|h": 4,
        "i\\j": 5,
        "k\"l": 6,
        " ": 7,
        "m~n": 8
    });

    let cases = [
        ("", doc.clone()),
        ("/foo", json!(["bar", "baz"])),
        ("/foo/0", json!("bar")),
        ("/", json!(0)),
        ("/a~1b", json!(1)),
        ("/c%25d", json!(2)),
        ("/e^f", json!(3)),
        ("/g|h", json!(4)),
        ("/i\\j", json!(5)),
        ("/k\"l", json!(6)),
        ("/ ", json!(7)),
        ("/m~0n", json!(8)),
        ("/m%7En", json!(8)),
    ];
    for (pointer, expected) in cases {
        assert_eq!(read(&[pointer], &doc), Some(expected), "pointer {pointer:?}");
    }
}

#[test]
fn relative_pointer_matrix() {
    // Relative JSON Pointer draft examples, evaluated from /foo/1.
    let doc = json!({
        "foo": ["bar", "baz"],
        "highly": {"nested": {"objects": true}}
    });
    let from = "/foo/1";
    let cases = [
        ("0", json!("baz")),
        ("1/0", json!("bar")),
        ("0-1", json!("bar")),
        ("2/highly/nested/objects", json!(true)),
        ("0#", json!("1")),
        ("0-1#", json!("0")),
        ("1#", json!("foo")),
    ];
    for (pointer, expected) in cases {
        assert_eq!(read(&[from, pointer], &doc), Some(expected), "pointer {pointer:?}");
    }

    // From /highly/nested.
    let from = "/highly/nested";
    let cases = [
        ("0/objects", json!(true)),
        ("1/nested/objects", json!(true)),
        ("2/foo/0", json!("bar")),
        ("0#", json!("nested")),
        ("1#", json!("highly")),
    ];
    for (pointer, expected) in cases {
        assert_eq!(read(&[from, pointer], &doc), Some(expected), "pointer {pointer:?}");
    }
}

#[test]
fn chained_pointers_continue_from_previous() {
    let doc = json!({"a": {"b": {"c": {"d": 1}}, "x": 2}});
    assert_eq!(read(&["/a", "0/b", "0/c", "0/d"], &doc), Some(json!(1)));
    assert_eq!(read(&["/a/b/c", "2/x"], &doc), Some(json!(2)));
    assert_eq!(read(&["/a/b/c", "/a/x"], &doc), Some(json!(2)));
    assert_eq!(read(&["/a/b/c", "#/a/x"], &doc), Some(json!(2)));
}

#[test]
fn ascending_beyond_depth_fails() {
    let doc = json!({"a": {"b": 1}});
    for (from, depth) in [("", 0), ("/a", 1), ("/a/b", 2)] {
        let too_far = (depth + 1).to_string();
        assert!(
            matches!(
                get(&[from, too_far.as_str()], &doc),
                Err(RelationalPointerError::ExceededRoot { .. })
            ),
            "from {from:?} ascending {too_far}"
        );
    }
}

#[test]
fn array_shift_arithmetic() {
    let doc = json!(["a", "b", "c"]);
    assert_eq!(read(&["/1", "0+1"], &doc), Some(json!("c")));
    assert_eq!(read(&["/1", "0-1"], &doc), Some(json!("a")));
    assert_eq!(read(&["/1", "0+0"], &doc), Some(json!("b")));
    for shift in ["0-2", "0+2", "0+99999999999999999999999"] {
        assert!(
            matches!(
                get(&["/1", shift], &doc),
                Err(RelationalPointerError::IndexOutOfBounds { len: 3, .. })
            ),
            "shift {shift}"
        );
    }
}

#[test]
fn indirection_matrix() {
    let doc = json!({"a": {"$ref": "#/b"}, "b": 42});
    assert_eq!(read(&["/a"], &doc), Some(json!(42)));
    let reference = resolve("/a", &doc).expect("resolve /a");
    assert_eq!(reference.key(), "a");

    // Chained indirections.
    let doc = json!({
        "a": {"$ref": "#/b"},
        "b": {"$ref": "/c"},
        "c": {"d": [1, 2]}
    });
    assert_eq!(read(&["/a/d/1"], &doc), Some(json!(2)));

    // Indirection objects reached by array index are not followed.
    let doc = json!({"list": [{"$ref": "#/x"}], "x": 1});
    assert_eq!(read(&["/list/0/$ref"], &doc), Some(json!("#/x")));
}

#[test]
fn dangling_end_marker() {
    let doc = json!({"arr": [1, 2]});
    assert!(matches!(
        get("/arr/-", &doc),
        Err(RelationalPointerError::DanglingArrayEnd { .. })
    ));

    let mut doc = doc;
    set(json!(3), "/arr/-", &mut doc).expect("append");
    assert_eq!(doc, json!({"arr": [1, 2, 3]}));
}

#[test]
fn root_cannot_be_set() {
    let mut doc = json!({"a": 1});
    for pointer in ["", "#"] {
        assert_eq!(
            set(json!(1), pointer, &mut doc),
            Err(RelationalPointerError::CannotSetRoot)
        );
    }
}

#[test]
fn malformed_escapes_pass_through() {
    assert_eq!(tokenize("/~2"), vec!["", "~2"]);
    let doc = json!({"~2": "literal"});
    assert_eq!(read(&["/~2"], &doc), Some(json!("literal")));
}

#[test]
fn write_then_read_relative() {
    let mut doc = json!({"rows": [{"id": 1}, {"id": 2}]});
    let written = set_with_frame(json!(true), &["/rows/1/id", "1/seen"], &mut doc, None)
        .expect("relative write");
    assert_eq!(written.step.absolute_path(), "/rows/1/seen");
    assert_eq!(read(&["/rows/1/seen"], &doc), Some(json!(true)));
}

#[test]
fn resolver_configuration() {
    let doc = json!({"self": {"$ref": "#/self"}});
    let resolver = Resolver::new().with_max_indirection_depth(3);
    assert_eq!(resolver.max_indirection_depth(), 3);
    match resolver.get("/self", &doc) {
        Err(RelationalPointerError::IndirectionCycle { limit, pointer, .. }) => {
            assert_eq!(limit, 3);
            assert_eq!(pointer, "#/self");
        }
        other => panic!("expected IndirectionCycle, got {other:?}"),
    }
}
