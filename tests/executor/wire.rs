//! JSON form of commands and outputs.

use crate::common::*;

#[test]
fn command_parses_from_external_json() {
    let cmd: Command = serde_json::from_value(json!({
        "Increment": {"path": "counters/a.json", "field": "count"}
    }))
    .unwrap();
    assert_eq!(
        cmd,
        Command::Increment {
            path: "counters/a.json".into(),
            field: "count".into(),
        }
    );
    assert!(cmd.is_write());
}

#[test]
fn optional_flags_default_to_false() {
    let cmd: Command = serde_json::from_value(json!({
        "DeleteItem": {"path": "old"}
    }))
    .unwrap();
    assert_eq!(
        cmd,
        Command::DeleteItem {
            path: "old".into(),
            is_directory: false,
        }
    );

    let cmd: Command = serde_json::from_value(json!({
        "CopyItem": {"source": "a", "target": "b"}
    }))
    .unwrap();
    assert!(matches!(cmd, Command::CopyItem { recursive: false, .. }));
}

#[test]
fn unknown_fields_rejected() {
    let result: Result<Command, _> = serde_json::from_value(json!({
        "GetDocument": {"path": "a.json", "force": true}
    }));
    assert!(result.is_err());
}

#[test]
fn document_values_travel_unwrapped() {
    let cmd = Command::InitDocument {
        path: "a.json".into(),
        value: json!({"k": [1, 2]}).into(),
    };
    assert_eq!(
        serde_json::to_value(&cmd).unwrap(),
        json!({"InitDocument": {"path": "a.json", "value": {"k": [1, 2]}}})
    );
}

#[test]
fn listing_output_shape() {
    let t = TestRoot::new();
    t.write_raw("dir/x.json", "{}");
    let out = t
        .executor()
        .execute(Command::ListDirectory { path: "".into() })
        .unwrap();
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!({"Entries": [{"name": "dir", "kind": "directory"}]})
    );
}

#[test]
fn executed_command_from_json_round_trips_through_store() {
    let t = TestRoot::new();
    let ex = t.executor();
    let script = json!([
        {"InitDocument": {"path": "s.json", "value": {"n": 0}}},
        {"Increment": {"path": "s.json", "field": "n"}},
        {"GetNestedValue": {"path": "s.json", "keys": ["n"]}}
    ]);
    let cmds: Vec<Command> = serde_json::from_value(script).unwrap();
    let results = ex.execute_many(cmds);
    assert_eq!(results[2], Ok(Output::Value(json!(1).into())));
}
