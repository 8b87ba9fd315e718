//! Compiler scenarios against the sample schema

use overlay_core::operation::{ADD, INDEX, LIST_ADD, NAME, REMOVE, VALUE, WRITE_ATTRIBUTE};
use overlay_core::{
    AdvisoryKind, BaselineIndex, ModelObject, ModelValue, Operation, OverlayConfig, Reconciler,
    ResourceAddress, Walker,
};
use overlay_document::{Mapping, OverlayDocument, OverlaySet, YamlParser};
use overlay_test_utils::sample_schema;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn root(source: &str) -> Mapping {
    OverlayDocument::parse(source, "configuration", &YamlParser::new())
        .unwrap()
        .root()
        .clone()
}

fn addr(pairs: &[(&str, &str)]) -> ResourceAddress {
    ResourceAddress::from_pairs(pairs.iter().copied())
}

fn compile(baseline: &[Operation], source: &str) -> Vec<Operation> {
    let schema = sample_schema();
    let index = BaselineIndex::build(baseline);
    let mut walker = Walker::new(&schema, &index);
    walker.compile(&root(source)).unwrap();
    walker.finish().0
}

#[test]
fn test_new_subsystem_is_one_add() {
    let ops = compile(
        &[],
        "configuration:\n  subsystem:\n    logging:\n      level: INFO\n",
    );
    assert_eq!(
        ops,
        vec![
            Operation::new(addr(&[("subsystem", "logging")]), ADD)
                .with_param("level", "INFO")
                .with_handler(Some("logging-add".into()))
        ]
    );
}

#[test]
fn test_console_handler_add_carries_object_attribute() {
    let baseline = vec![Operation::new(addr(&[("subsystem", "logging")]), ADD)];
    let ops = compile(
        &baseline,
        r#"
configuration:
  subsystem:
    logging:
      console-handler:
        CONSOLE:
          level: TRACE
          name: ignored
          formatter:
            color: "true"
            pattern: "%m%n"
            unknown: dropped
"#,
    );
    let console = addr(&[("subsystem", "logging"), ("console-handler", "CONSOLE")]);
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].address, console);
    assert_eq!(ops[0].name, ADD);
    assert_eq!(
        ops[0].params,
        ModelObject::new().with("level", "TRACE").with(
            "formatter",
            ModelObject::new().with("pattern", "%m%n").with("color", "true")
        )
    );
}

#[test]
fn test_existing_list_grows_per_element() {
    let baseline = vec![Operation::new(addr(&[("subsystem", "logging")]), ADD)];
    let ops = compile(
        &baseline,
        "configuration:\n  subsystem:\n    logging:\n      handlers:\n        - {index: 1, name: FILE}\n        - CONSOLE\n",
    );
    let logging = addr(&[("subsystem", "logging")]);
    assert_eq!(
        ops,
        vec![
            Operation::new(logging.clone(), LIST_ADD)
                .with_param(NAME, "handlers")
                .with_param(VALUE, "FILE")
                .with_param(INDEX, "1")
                .with_handler(Some("global-list-add".into())),
            Operation::new(logging, LIST_ADD)
                .with_param(NAME, "handlers")
                .with_param(VALUE, "CONSOLE")
                .with_handler(Some("global-list-add".into())),
        ]
    );
}

#[test]
fn test_batched_baseline_counts_as_existing() {
    let baseline = vec![Operation::composite(vec![Operation::new(
        addr(&[("subsystem", "logging")]),
        ADD,
    )])];
    let ops = compile(
        &baseline,
        "configuration:\n  subsystem:\n    logging:\n      level: WARN\n",
    );
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].name, WRITE_ATTRIBUTE);
    assert_eq!(ops[0].param(VALUE), Some(&ModelValue::from("WARN")));
}

#[test]
fn test_remove_existing_interface() {
    let public = addr(&[("interface", "public")]);
    let baseline = vec![Operation::new(public.clone(), ADD)];
    let ops = compile(&baseline, "configuration:\n  interface:\n    public: !remove\n");
    assert_eq!(
        ops,
        vec![Operation::new(public, REMOVE).with_handler(Some("global-remove".into()))]
    );
}

#[rstest]
#[case::no_add("configuration:\n  subsystem:\n    jmx:\n      show-model: true\n", AdvisoryKind::NotCreatable)]
#[case::runtime(
    "configuration:\n  subsystem:\n    logging:\n      uptime: 10\n",
    AdvisoryKind::RuntimeAttribute
)]
#[case::unknown_subsystem(
    "configuration:\n  subsystem:\n    mail:\n      host: smtp\n",
    AdvisoryKind::NotActionable { value: "smtp".to_string() }
)]
fn test_advisories(#[case] source: &str, #[case] expected: AdvisoryKind) {
    let schema = sample_schema();
    let baseline = [Operation::new(addr(&[("subsystem", "logging")]), ADD)];
    let index = BaselineIndex::build(&baseline);
    let mut walker = Walker::new(&schema, &index);
    walker.compile(&root(source)).unwrap();
    assert_eq!(walker.advisories()[0].kind, expected);
}

#[test]
fn test_reconcile_appends_after_baseline() {
    let schema = sample_schema();
    let baseline = vec![
        Operation::new(addr(&[("extension", "org.example.logging")]), ADD)
            .with_param("module", "org.example.logging"),
        Operation::new(addr(&[("subsystem", "logging")]), ADD),
    ];
    let overlays: OverlaySet = [OverlayDocument::parse(
        "configuration:\n  extension:\n    org.example.logging:\n      module: org.example.logging\n    org.example.jmx:\n      module: org.example.jmx\n  subsystem:\n    logging:\n      level: ERROR\n",
        "configuration",
        &YamlParser::new(),
    )
    .unwrap()]
    .into_iter()
    .collect();

    let result = Reconciler::new(&schema, OverlayConfig::default())
        .reconcile(&overlays, baseline.clone())
        .unwrap();

    assert_eq!(result.script.baseline(), baseline.as_slice());
    let appended: Vec<String> = result.script.overlay().iter().map(ToString::to_string).collect();
    assert_eq!(
        appended,
        vec![
            "/extension=org.example.jmx:add(module=org.example.jmx)",
            "/subsystem=logging:write-attribute(name=level,value=ERROR)",
        ]
    );
    assert!(result.report.is_clean());
}
