//! Operation script
//!
//! The output of a reconciliation: the baseline sequence, untouched, followed
//! by every operation compiled from the overlays in emission order. Nothing
//! is ever removed from the baseline prefix; a resource removal is itself an
//! appended `remove` operation.

use serde::Serialize;
use std::fmt;

use crate::operation::Operation;

/// Baseline operations followed by overlay operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OperationScript {
    operations: Vec<Operation>,
    #[serde(skip)]
    baseline_len: usize,
}

impl OperationScript {
    /// Start a script from the baseline sequence.
    pub fn from_baseline(baseline: Vec<Operation>) -> Self {
        let baseline_len = baseline.len();
        Self {
            operations: baseline,
            baseline_len,
        }
    }

    /// Append compiled operations after everything already in the script.
    pub fn append(&mut self, operations: impl IntoIterator<Item = Operation>) {
        self.operations.extend(operations);
    }

    /// All operations in execution order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// The baseline prefix
    pub fn baseline(&self) -> &[Operation] {
        &self.operations[..self.baseline_len]
    }

    /// Operations compiled from overlays
    pub fn overlay(&self) -> &[Operation] {
        &self.operations[self.baseline_len..]
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

/// One CLI-style line per operation.
impl fmt::Display for OperationScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for operation in &self.operations {
            writeln!(f, "{operation}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::ResourceAddress;
    use crate::operation::{ADD, REMOVE};

    #[test]
    fn append_keeps_baseline_prefix() {
        let logging = ResourceAddress::from_pairs([("subsystem", "logging")]);
        let baseline = vec![Operation::new(logging.clone(), ADD)];
        let mut script = OperationScript::from_baseline(baseline.clone());
        script.append([Operation::new(logging, REMOVE)]);

        assert_eq!(script.baseline(), baseline.as_slice());
        assert_eq!(script.overlay().len(), 1);
        assert_eq!(script.len(), 2);
        assert_eq!(
            script.to_string(),
            "/subsystem=logging:add\n/subsystem=logging:remove\n"
        );
    }

    #[test]
    fn serializes_as_plain_list() {
        let script = OperationScript::from_baseline(vec![Operation::new(ResourceAddress::root(), REMOVE)]);
        assert_eq!(
            serde_json::to_string(&script).unwrap(),
            r#"[{"address":"/","operation":"remove"}]"#
        );
    }
}
