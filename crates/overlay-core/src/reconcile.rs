//! Reconciliation driver
//!
//! Compiles a set of overlay documents, in order, against one baseline and
//! appends the result to the baseline script. Each document compiles into
//! its own buffer, so a failed document contributes nothing.

use overlay_document::{Mapping, OverlaySet};

use crate::baseline::BaselineIndex;
use crate::config::{DEPLOYMENT_KEYS, EXTENSION_KEY, OverlayConfig};
use crate::error::{Error, Result};
use crate::extensions::ExtensionProcessor;
use crate::operation::Operation;
use crate::report::{Advisory, CompileReport, DocumentFailure};
use crate::schema::ResourceSchema;
use crate::script::OperationScript;
use crate::walker::Walker;

/// The outcome of a reconciliation
#[derive(Debug)]
pub struct Reconciliation {
    pub script: OperationScript,
    pub report: CompileReport,
}

/// Applies overlay documents on top of a baseline
pub struct Reconciler<'a> {
    schema: &'a dyn ResourceSchema,
    config: OverlayConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(schema: &'a dyn ResourceSchema, config: OverlayConfig) -> Self {
        Self { schema, config }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Compile every document in `overlays` and append the operations to
    /// `baseline`.
    ///
    /// By default all documents see the same baseline snapshot. With
    /// `reindex_between_documents` set, a document also sees the resources
    /// created, and no longer sees the resources removed, by the documents
    /// before it.
    pub fn reconcile(&self, overlays: &OverlaySet, baseline: Vec<Operation>) -> Result<Reconciliation> {
        let mut index = BaselineIndex::build(&baseline);
        let mut script = OperationScript::from_baseline(baseline);
        let mut report = CompileReport::new();

        for (position, document) in overlays.iter().enumerate() {
            let source = document.source().map(|p| p.display().to_string());
            tracing::debug!(document = position, ?source, "Compiling overlay document");

            match self.compile_document(document.root(), &index) {
                Ok((operations, advisories)) => {
                    if self.config.reindex_between_documents {
                        index.apply_all(&operations);
                    }
                    script.append(operations);
                    report.advisories.extend(advisories);
                }
                Err(error) if self.config.fail_fast => {
                    return Err(Error::DocumentFailed {
                        index: position,
                        source: Box::new(error),
                    });
                }
                Err(error) => {
                    tracing::warn!(document = position, ?source, %error, "Overlay document failed, continuing");
                    report.failures.push(DocumentFailure {
                        index: position,
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            baseline = script.baseline().len(),
            appended = script.overlay().len(),
            advisories = report.advisories.len(),
            "Reconciliation complete"
        );
        Ok(Reconciliation { script, report })
    }

    /// Compile one overlay root against `index`.
    ///
    /// Extensions are compiled first while the `extension` key is excluded
    /// from the walk; excluded keys are then dropped and the rest is walked
    /// as the resource tree.
    pub fn compile_document(
        &self,
        root: &Mapping,
        index: &BaselineIndex,
    ) -> Result<(Vec<Operation>, Vec<Advisory>)> {
        let (mut operations, mut advisories) = if self.config.is_excluded(EXTENSION_KEY) {
            ExtensionProcessor::new(self.schema, index).process(root)
        } else {
            (Vec::new(), Vec::new())
        };

        let resources: Mapping = root
            .iter()
            .filter(|(key, _)| self.walks(key))
            .map(|(key, value)| (key, value.clone()))
            .collect();

        let mut walker = Walker::new(self.schema, index);
        walker.compile(&resources)?;
        let (compiled, skipped) = walker.finish();
        operations.extend(compiled);
        advisories.extend(skipped);
        Ok((operations, advisories))
    }

    fn walks(&self, key: &str) -> bool {
        if DEPLOYMENT_KEYS.contains(&key) {
            tracing::debug!(key, "Deployments are handled by the deployment collaborator");
        }
        !self.config.is_excluded(key)
    }
}
