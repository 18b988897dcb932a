use std::collections::{HashMap, HashSet};

use crate::{
    models::{Candidate, RecommendationResult, SourceTag},
    services::image::resolve_image,
};

/// Re-attaches canonical catalog data to a ranked list of identifiers
///
/// Identifiers absent from the catalog are skipped, never fabricated. The first
/// occurrence of a repeated identifier wins, order is otherwise preserved, and the
/// output is capped at `limit`.
pub fn reconcile<I, S>(
    identifiers: I,
    catalog: &[Candidate],
    source: SourceTag,
    limit: usize,
) -> Vec<RecommendationResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut by_id: HashMap<&str, &Candidate> = HashMap::with_capacity(catalog.len());
    for candidate in catalog {
        by_id.entry(candidate.id.as_str()).or_insert(candidate);
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut results = Vec::new();

    for identifier in identifiers {
        if results.len() >= limit {
            break;
        }

        let id = identifier.as_ref();
        let Some(candidate) = by_id.get(id).copied() else {
            tracing::debug!(id = %id, source = %source, "Identifier not in catalog, skipping");
            continue;
        };

        if !seen.insert(candidate.id.as_str()) {
            continue;
        }

        results.push(RecommendationResult {
            candidate: candidate.clone(),
            display_image: resolve_image(candidate),
            source,
        });
    }

    results
}
