//! Sample management schema.
//!
//! - `/extension=*` with an `add` taking `module`
//! - `/interface=*` with `inet-address`
//! - `/subsystem=logging` with a scalar, a runtime attribute and a list, and
//!   a wildcard `console-handler` child carrying an object attribute and a
//!   resource-only attribute
//! - `/subsystem=jmx`, registered without an `add`
//!
//! `/subsystem=*` is not registered, so `subsystem` is a placeholder grouping.

use overlay_core::SchemaTree;

pub const SAMPLE_SCHEMA_YAML: &str = r#"
global-operations:
  - name: write-attribute
    handler: global-write-attribute
  - name: undefine-attribute
    handler: global-undefine-attribute
  - name: list-add
    handler: global-list-add
  - name: remove
    handler: global-remove
children:
  extension:
    "*":
      operations:
        - name: add
          handler: extension-add
          parameters:
            - name: module
  interface:
    "*":
      attributes:
        - name: inet-address
      operations:
        - name: add
          handler: interface-add
          parameters:
            - name: inet-address
  subsystem:
    logging:
      attributes:
        - name: level
        - name: uptime
          storage: runtime
        - name: handlers
          kind: list
          element:
            name: handler
      operations:
        - name: add
          handler: logging-add
          parameters:
            - name: level
            - name: handlers
              kind: list
              element:
                name: handler
      children:
        console-handler:
          "*":
            attributes:
              - name: level
              - name: name
                resource-only: true
              - name: formatter
                kind: object
                children:
                  - name: pattern
                  - name: color
            operations:
              - name: add
                handler: console-handler-add
                parameters:
                  - name: level
                  - name: formatter
                    kind: object
                    children:
                      - name: pattern
                      - name: color
    jmx:
      attributes:
        - name: show-model
"#;

/// The sample schema, parsed.
pub fn sample_schema() -> SchemaTree {
    SchemaTree::from_yaml_str(SAMPLE_SCHEMA_YAML).expect("sample schema must parse")
}
