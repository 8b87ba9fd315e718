//! End-to-end reconciliation tests
//!
//! Schema, baseline, config and overlays are written to a temporary
//! directory and read back the same way the CLI reads them.

use overlay_core::operation::{ADD, LIST_ADD, REMOVE, UNDEFINE_ATTRIBUTE, WRITE_ATTRIBUTE};
use overlay_core::{
    AdvisoryKind, Error, ModelValue, Operation, OverlayConfig, Reconciler, SchemaTree,
    load_baseline,
};
use overlay_document::{DocumentValue, OverlaySet, TagRegistry, YamlParser};
use overlay_test_utils::{TestWorkspace, sample_schema};
use pretty_assertions::assert_eq;

const BASELINE: &str = r#"[
  {"address": "/extension=org.example.logging", "operation": "add", "params": {"module": "org.example.logging"}},
  {"address": "/", "operation": "composite", "steps": [
    {"address": "/subsystem=logging", "operation": "add", "params": {"level": "INFO"}},
    {"address": "/subsystem=logging/console-handler=CONSOLE", "operation": "add"}
  ]},
  {"address": "/interface=public", "operation": "add", "params": {"inet-address": "127.0.0.1"}}
]"#;

fn reconcile(
    ws: &TestWorkspace,
    overlays: &[&str],
    config: OverlayConfig,
) -> overlay_core::Result<overlay_core::Reconciliation> {
    let schema = SchemaTree::load(&ws.write_sample_schema())?;
    let baseline = load_baseline(&ws.write_baseline(BASELINE))?;
    let paths: Vec<_> = overlays
        .iter()
        .enumerate()
        .map(|(i, content)| ws.write(&format!("overlay-{i}.yml"), content))
        .collect();
    let set = OverlaySet::load_all(&paths, &config.root_key, &YamlParser::new())?;
    Reconciler::new(&schema, config).reconcile(&set, baseline)
}

fn lines(ops: &[Operation]) -> Vec<String> {
    ops.iter().map(ToString::to_string).collect()
}

#[test]
fn test_full_overlay_against_batched_baseline() {
    let ws = TestWorkspace::new();
    let overlay = r#"
configuration:
  extension:
    org.example.logging:
      module: org.example.logging
    org.example.jmx:
      module: org.example.jmx
  subsystem:
    logging:
      level: DEBUG
      handlers:
        - CONSOLE
        - {index: 0, name: AUDIT}
      console-handler:
        CONSOLE:
          level: !undefine
        FILE:
          level: TRACE
          formatter:
            pattern: "%d %m%n"
  interface:
    public: !remove
    private:
      inet-address: 10.0.0.1
  deployment:
    app.war: {}
unrelated:
  ignored: true
"#;

    let result = reconcile(&ws, &[overlay], OverlayConfig::default()).unwrap();

    assert_eq!(result.script.baseline().len(), 3);
    assert_eq!(
        lines(result.script.overlay()),
        vec![
            "/extension=org.example.jmx:add(module=org.example.jmx)",
            "/subsystem=logging:write-attribute(name=level,value=DEBUG)",
            "/subsystem=logging:list-add(name=handlers,value=CONSOLE)",
            "/subsystem=logging:list-add(name=handlers,value=AUDIT,index=0)",
            "/subsystem=logging/console-handler=CONSOLE:undefine-attribute(name=level)",
            "/subsystem=logging/console-handler=FILE:add(level=TRACE,formatter={pattern=%d %m%n})",
            "/interface=public:remove",
            "/interface=private:add(inet-address=10.0.0.1)",
        ]
    );
    assert!(result.report.is_clean());
}

#[test]
fn test_handlers_follow_schema() {
    let ws = TestWorkspace::new();
    let overlay = "configuration:\n  subsystem:\n    logging:\n      level: WARN\n";
    let result = reconcile(&ws, &[overlay], OverlayConfig::default()).unwrap();

    let write = &result.script.overlay()[0];
    assert_eq!(write.name, WRITE_ATTRIBUTE);
    assert_eq!(
        write.handler.as_ref().map(|h| h.as_str()),
        Some("global-write-attribute")
    );
}

#[test]
fn test_reapplying_output_creates_nothing_new() {
    let ws = TestWorkspace::new();
    let overlay = "configuration:\n  interface:\n    management:\n      inet-address: 0.0.0.0\n  subsystem:\n    logging:\n      console-handler:\n        FILE:\n          level: ERROR\n";

    let first = reconcile(&ws, &[overlay], OverlayConfig::default()).unwrap();
    assert_eq!(
        first.script.overlay().iter().filter(|op| op.name == ADD).count(),
        2
    );

    let schema = sample_schema();
    let doc = OverlaySet::load_all(
        &[ws.write("again.yml", overlay)],
        "configuration",
        &YamlParser::new(),
    )
    .unwrap();
    let second = Reconciler::new(&schema, OverlayConfig::default())
        .reconcile(&doc, first.script.into_operations())
        .unwrap();
    assert!(second.script.overlay().iter().all(|op| op.name != ADD));
}

#[test]
fn test_documents_apply_in_order() {
    let ws = TestWorkspace::new();
    let first = "configuration:\n  interface:\n    a:\n      inet-address: 1.1.1.1\n";
    let second = "configuration:\n  interface:\n    b:\n      inet-address: 2.2.2.2\n    public: !remove\n";

    let result = reconcile(&ws, &[first, second], OverlayConfig::default()).unwrap();
    let names: Vec<_> = result.script.overlay().iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, vec![ADD, ADD, REMOVE]);
    assert_eq!(result.script.overlay()[0].address.to_string(), "/interface=a");
}

#[test]
fn test_reindex_from_config_file() {
    let ws = TestWorkspace::new();
    let config = OverlayConfig::load(&ws.write("overlay.toml", "reindex-between-documents = true\n")).unwrap();
    let first = "configuration:\n  interface:\n    a:\n      inet-address: 1.1.1.1\n";
    let second = "configuration:\n  interface:\n    a:\n      inet-address: 3.3.3.3\n";

    let result = reconcile(&ws, &[first, second], config).unwrap();
    let names: Vec<_> = result.script.overlay().iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, vec![ADD, WRITE_ATTRIBUTE]);
}

#[test]
fn test_custom_root_key() {
    let ws = TestWorkspace::new();
    let config = OverlayConfig {
        root_key: "wildfly-configuration".to_string(),
        ..OverlayConfig::default()
    };
    let overlay = "wildfly-configuration:\n  subsystem:\n    logging:\n      level: ERROR\nconfiguration:\n  subsystem:\n    logging:\n      level: WARN\n";

    let result = reconcile(&ws, &[overlay], config).unwrap();
    assert_eq!(result.script.overlay().len(), 1);
    assert_eq!(
        result.script.overlay()[0].param("value"),
        Some(&ModelValue::from("ERROR"))
    );
}

#[test]
fn test_undefine_on_missing_resource_names_address() {
    let ws = TestWorkspace::new();
    let overlay = "configuration:\n  subsystem:\n    logging:\n      console-handler:\n        FILE:\n          level: !undefine\n";

    let err = reconcile(&ws, &[overlay], OverlayConfig::default()).unwrap_err();
    let message = match &err {
        Error::DocumentFailed { index: 0, source } => source.to_string(),
        other => panic!("unexpected error: {other}"),
    };
    assert!(message.contains("/subsystem=logging/console-handler=FILE"));
    assert!(message.contains("'level'"));
}

#[test]
fn test_existing_resource_undefine_and_list() {
    let ws = TestWorkspace::new();
    let overlay = "configuration:\n  subsystem:\n    logging:\n      level: !undefine\n      handlers: [FILE]\n";
    let result = reconcile(&ws, &[overlay], OverlayConfig::default()).unwrap();
    let names: Vec<_> = result.script.overlay().iter().map(|op| op.name.as_str()).collect();
    assert_eq!(names, vec![UNDEFINE_ATTRIBUTE, LIST_ADD]);
}

#[test]
fn test_advisories_are_reported_not_fatal() {
    let ws = TestWorkspace::new();
    let overlay = "configuration:\n  subsystem:\n    logging:\n      uptime: 1\n      console-handler:\n        CONSOLE:\n          name: renamed\n    jmx:\n      show-model: true\n";
    let result = reconcile(&ws, &[overlay], OverlayConfig::default()).unwrap();

    let kinds: Vec<_> = result.report.advisories.iter().map(|a| a.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            AdvisoryKind::RuntimeAttribute,
            AdvisoryKind::ResourceOnlyAttribute,
            AdvisoryKind::NotCreatable,
        ]
    );
    // The jmx attribute is still written against the non-creatable resource.
    assert_eq!(lines(result.script.overlay()), vec!["/subsystem=jmx:write-attribute(name=show-model,value=true)"]);
}

#[test]
fn test_custom_tag_constructor() {
    fn env_tag(_: &serde_yaml::Value) -> overlay_document::Result<DocumentValue> {
        Ok(DocumentValue::string("from-env"))
    }

    let mut tags = TagRegistry::with_directives();
    tags.register("!env", env_tag);
    let parser = YamlParser::with_tags(tags);

    let ws = TestWorkspace::new();
    let path = ws.write(
        "overlay.yml",
        "configuration:\n  subsystem:\n    logging:\n      level: !env LOG_LEVEL\n",
    );
    let set = OverlaySet::load_all(&[path], "configuration", &parser).unwrap();
    let schema = sample_schema();
    let result = Reconciler::new(&schema, OverlayConfig::default())
        .reconcile(&set, Vec::new())
        .unwrap();
    assert_eq!(
        lines(result.script.overlay()),
        vec!["/subsystem=logging:add(level=from-env)"]
    );
}
