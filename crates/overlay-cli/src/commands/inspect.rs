//! Inspect command

use colored::Colorize;
use std::fmt::Write as _;
use std::path::Path;

use overlay_core::{AttributeDefinition, ResourceAddress, SchemaTree, StorageKind};

use crate::error::{CliError, Result};

/// Run the inspect command
pub fn run_inspect(schema: &Path, address: &str) -> Result<()> {
    let schema = SchemaTree::load(schema)?;
    let address: ResourceAddress = address.parse()?;
    let description = describe(&schema, &address)?;

    println!("{} {}", "Resource".bold(), address.to_string().cyan());
    print!("{description}");
    Ok(())
}

/// Plain-text summary of what `schema` registers at `address`.
pub fn describe(schema: &SchemaTree, address: &ResourceAddress) -> Result<String> {
    let Some((registration, path)) = schema.resolve(address) else {
        return Err(CliError::user(format!("No resource registered at {address}")));
    };

    let mut out = String::new();
    if &path != address {
        let _ = writeln!(out, "registered as {path}");
    }

    let _ = writeln!(out, "child types:");
    for (key, names) in &registration.children {
        let names: Vec<&str> = names.keys().map(String::as_str).collect();
        let _ = writeln!(out, "  {key} [{}]", names.join(", "));
    }

    let _ = writeln!(out, "attributes:");
    for attribute in &registration.attributes {
        let _ = writeln!(out, "  {}", attribute_line(attribute));
    }

    let _ = writeln!(out, "operations:");
    for operation in &registration.operations {
        let params: Vec<&str> = operation.parameters.iter().map(|p| p.name.as_str()).collect();
        let _ = write!(out, "  {}({})", operation.name, params.join(", "));
        if let Some(handler) = &operation.handler {
            let _ = write!(out, " -> {handler}");
        }
        out.push('\n');
    }
    for operation in &schema.global_operations {
        if registration.operations.iter().all(|op| op.name != operation.name) {
            let _ = writeln!(out, "  {} (global)", operation.name);
        }
    }
    Ok(out)
}

fn attribute_line(attribute: &AttributeDefinition) -> String {
    let mut line = format!("{} {}", attribute.name, attribute.kind);
    if attribute.resource_only {
        line.push_str(" resource-only");
    }
    if attribute.storage == StorageKind::Runtime {
        line.push_str(" runtime");
    }
    line
}
