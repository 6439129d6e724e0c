// Security zone resolution
//
// The operator names a zone loosely ("zscaler", "prisma"); the best fuzzy
// match wins, but only if it clears the threshold.

use serde::Serialize;
use tracing::{debug, info};
use zonebind_api::{CgxClient, SecurityZone};

use crate::error::CoreError;
use crate::fuzzy;

/// Score a zone name must strictly exceed to be accepted.
pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

/// The zone picked for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneMatch {
    pub id: String,
    pub name: String,
    /// Fuzzy score of `name` against the query, `0..=100`.
    pub score: u8,
}

/// Pick the zone whose name best matches `query`.
///
/// The best-scoring zone (first one on ties) is returned when its score is
/// strictly greater than `threshold`; otherwise `CoreError::NoZoneMatch`
/// carries the closest candidate.
pub fn match_zone(
    zones: &[SecurityZone],
    query: &str,
    threshold: u8,
) -> Result<ZoneMatch, CoreError> {
    let best = fuzzy::extract_one(query, zones.iter().map(|z| z.name.as_str()));

    let Some((idx, score)) = best else {
        return Err(CoreError::NoZoneMatch {
            query: query.to_owned(),
            best: None,
        });
    };
    let Some(zone) = zones.get(idx) else {
        return Err(CoreError::Internal(format!("zone index {idx} out of range")));
    };

    debug!(query, candidate = %zone.name, score, threshold, "best zone candidate");

    if score > threshold {
        Ok(ZoneMatch {
            id: zone.id.clone(),
            name: zone.name.clone(),
            score,
        })
    } else {
        Err(CoreError::NoZoneMatch {
            query: query.to_owned(),
            best: Some((zone.name.clone(), score)),
        })
    }
}

/// Fetch the tenant's zones and match `query` against them.
pub async fn resolve_zone(
    client: &CgxClient,
    query: &str,
    threshold: u8,
) -> Result<ZoneMatch, CoreError> {
    let zones = client.list_security_zones().await?;
    let matched = match_zone(&zones, query, threshold)?;
    info!(zone = %matched.name, id = %matched.id, score = matched.score, "found zone match");
    Ok(matched)
}
