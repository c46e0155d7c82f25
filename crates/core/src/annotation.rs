//! Optional free-text commentary on the best target.
//!
//! An external annotator (a language model, a forecaster's notes service)
//! may look at the ranked list and write a short narrative. Annotation is
//! best-effort: it never changes scores, ranks or filtering, and any failure
//! leaves the list exactly as generated.

use crate::atmosphere::compute_composite_indices;
use crate::core_types::{BaseParameters, CompositeIndices, Target};
use crate::error::AnnotationError;
use tracing::{debug, warn};

/// Number of leading targets shown to the annotator.
pub const ANNOTATION_CONTEXT_TARGETS: usize = 3;

/// What the annotator gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationContext<'a> {
    /// Conditions at the base location.
    pub parameters: &'a BaseParameters,
    pub indices: &'a CompositeIndices,
    /// Leading targets, best first.
    pub targets: &'a [Target],
}

/// Source of narrative text for a target list.
pub trait NarrativeAnnotator {
    /// Narrative for the first target in `context.targets`.
    ///
    /// # Errors
    ///
    /// Any [`AnnotationError`]; the caller logs it and moves on.
    fn annotate(&self, context: &AnnotationContext<'_>) -> Result<String, AnnotationError>;
}

impl<F> NarrativeAnnotator for F
where
    F: Fn(&AnnotationContext<'_>) -> Result<String, AnnotationError>,
{
    fn annotate(&self, context: &AnnotationContext<'_>) -> Result<String, AnnotationError> {
        self(context)
    }
}

/// Attach a narrative to `targets[0]`, if an annotator is available.
///
/// Empty lists, a missing annotator, errors and blank text all return the
/// list unchanged.
#[must_use]
pub fn annotate_top_target(
    mut targets: Vec<Target>,
    base: &BaseParameters,
    annotator: Option<&dyn NarrativeAnnotator>,
) -> Vec<Target> {
    let Some(annotator) = annotator else {
        return targets;
    };
    if targets.is_empty() {
        return targets;
    }

    let indices = compute_composite_indices(base);
    let shown = targets.len().min(ANNOTATION_CONTEXT_TARGETS);
    let context = AnnotationContext {
        parameters: base,
        indices: &indices,
        targets: &targets[..shown],
    };

    let narrative = annotator.annotate(&context).and_then(|text| {
        let text = text.trim();
        if text.is_empty() {
            Err(AnnotationError::Empty)
        } else {
            Ok(text.to_string())
        }
    });

    match narrative {
        Ok(text) => {
            debug!("Attached {}-byte narrative to {}", text.len(), targets[0].label);
            targets[0] = targets[0].with_narrative(text);
        }
        Err(e) => warn!("Narrative annotation skipped: {e}"),
    }
    targets
}
