// Site scan and bind pipeline
//
// Spoke sites → their elements → interfaces matching the prefix → one
// bind decision each. Listing sites or elements failing aborts the run;
// anything that fails below that is recorded and the scan moves on.

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use tracing::{debug, info, warn};
use zonebind_api::{CgxClient, Element, Interface, Site};

use crate::bind::{self, BindDecision};
use crate::error::CoreError;
use crate::filter;
use crate::zone::ZoneMatch;

/// Knobs for one run.
#[derive(Debug, Clone)]
pub struct BindOptions {
    /// Interface name prefix to select.
    pub interface_prefix: String,
    /// Decide and report, but never create mappings.
    pub dry_run: bool,
}

/// Result for one (site, element, interface) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BindOutcome {
    /// A new mapping was created.
    Created,
    /// A mapping would have been created (dry run).
    Planned,
    /// The interface is already in the zone's mapping.
    AlreadyBound,
    /// The zone is mapped to other interfaces on this element.
    ZoneInUse { bound_interface_ids: Vec<String> },
    /// A controller call failed for this triple.
    Failed { reason: String },
}

/// One line of the report.
#[derive(Debug, Clone, Serialize)]
pub struct BindRecord {
    pub site_id: String,
    pub site_name: Option<String>,
    pub element_id: String,
    pub element_name: Option<String>,
    /// `None` when the element's interfaces could not be listed.
    pub interface_id: Option<String>,
    pub interface_name: Option<String>,
    #[serde(flatten)]
    pub outcome: BindOutcome,
}

/// Everything a run did.
#[derive(Debug, Clone, Serialize)]
pub struct BindReport {
    pub zone: ZoneMatch,
    pub interface_prefix: String,
    pub dry_run: bool,
    pub spoke_sites: usize,
    pub elements_scanned: usize,
    pub records: Vec<BindRecord>,
}

impl BindReport {
    fn count(&self, pred: impl Fn(&BindOutcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, BindOutcome::Created | BindOutcome::Planned))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, BindOutcome::AlreadyBound | BindOutcome::ZoneInUse { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, BindOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Walks the tenant and binds matching interfaces to one zone.
pub struct ZoneBinder<'a> {
    client: &'a CgxClient,
    zone: &'a ZoneMatch,
    options: BindOptions,
}

impl<'a> ZoneBinder<'a> {
    pub fn new(client: &'a CgxClient, zone: &'a ZoneMatch, options: BindOptions) -> Self {
        Self {
            client,
            zone,
            options,
        }
    }

    /// Scan every spoke site and bind matching interfaces, sequentially.
    pub async fn run(&self) -> Result<BindReport, CoreError> {
        let sites = self.client.list_sites().await?;
        let spokes: Vec<&Site> = sites.iter().filter(|s| filter::is_spoke(s)).collect();
        info!(total = sites.len(), spokes = spokes.len(), "loaded sites");

        let elements = self.client.list_elements().await?;
        debug!(count = elements.len(), "loaded elements");

        let mut report = BindReport {
            zone: self.zone.clone(),
            interface_prefix: self.options.interface_prefix.clone(),
            dry_run: self.options.dry_run,
            spoke_sites: spokes.len(),
            elements_scanned: 0,
            records: Vec::new(),
        };

        for site in spokes {
            for element in filter::elements_at(site, &elements) {
                report.elements_scanned += 1;
                self.scan_element(site, element, &mut report.records).await;
            }
        }

        info!(
            created = report.created(),
            skipped = report.skipped(),
            failed = report.failed(),
            "scan complete"
        );
        Ok(report)
    }

    async fn scan_element(&self, site: &Site, element: &Element, records: &mut Vec<BindRecord>) {
        let interfaces = match self.client.list_interfaces(&site.id, &element.id).await {
            Ok(list) => list,
            Err(e) => {
                let err = CoreError::from(e);
                warn!(
                    site = %label(site.name.as_deref(), &site.id),
                    element = %element.id,
                    %err,
                    "cannot list interfaces"
                );
                let outcome = BindOutcome::Failed {
                    reason: err.to_string(),
                };
                records.push(record(site, element, None, outcome));
                return;
            }
        };

        // Set once a dry run has planned a mapping on this element, so later
        // interfaces see the zone as taken, as they would after a real create.
        let mut planned: Option<String> = None;

        for interface in interfaces
            .iter()
            .filter(|i| filter::interface_matches(i, &self.options.interface_prefix))
        {
            let outcome = self
                .bind_interface(site, element, interface, &mut planned)
                .await;
            records.push(record(site, element, Some(interface), outcome));
        }
    }

    async fn bind_interface(
        &self,
        site: &Site,
        element: &Element,
        interface: &Interface,
        planned: &mut Option<String>,
    ) -> BindOutcome {
        let site_label = label(site.name.as_deref(), &site.id);
        let element_label = label(element.name.as_deref(), &element.id);

        let mappings = match self
            .client
            .list_element_security_zones(&site.id, &element.id)
            .await
        {
            Ok(m) => m,
            Err(e) => {
                let err = CoreError::from(e);
                warn!(
                    site = %site_label,
                    element = %element_label,
                    %err,
                    "cannot read zone mappings"
                );
                return BindOutcome::Failed {
                    reason: err.to_string(),
                };
            }
        };

        let decision = match bind::decide(&mappings, &self.zone.id, &interface.id) {
            BindDecision::Create => match planned.as_ref() {
                Some(first) => BindDecision::ZoneInUse {
                    bound: vec![first.clone()],
                },
                None => BindDecision::Create,
            },
            decided => decided,
        };

        match decision {
            BindDecision::AlreadyBound => {
                info!(site = %site_label, element = %element_label, "ignoring: mapping exists");
                BindOutcome::AlreadyBound
            }
            BindDecision::ZoneInUse { bound } => {
                warn!(
                    site = %site_label,
                    element = %element_label,
                    bound = bound.len(),
                    "aborting: zone already has interfaces mapped"
                );
                BindOutcome::ZoneInUse {
                    bound_interface_ids: bound,
                }
            }
            BindDecision::Create if self.options.dry_run => {
                info!(
                    site = %site_label,
                    element = %element_label,
                    interface = %interface.id,
                    "dry run: would create mapping"
                );
                *planned = Some(interface.id.clone());
                BindOutcome::Planned
            }
            BindDecision::Create => {
                let body = bind::new_mapping(&self.zone.id, &interface.id);
                match self
                    .client
                    .create_element_security_zone(&site.id, &element.id, &body)
                    .await
                {
                    Ok(_) => {
                        info!(
                            site = %site_label,
                            element = %element_label,
                            interface = %interface.id,
                            "created mapping"
                        );
                        BindOutcome::Created
                    }
                    Err(e) => {
                        let err = CoreError::from(e);
                        warn!(
                            site = %site_label,
                            element = %element_label,
                            %err,
                            "failed creating mapping"
                        );
                        BindOutcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                }
            }
        }
    }
}

fn label<'s>(name: Option<&'s str>, id: &'s str) -> &'s str {
    name.unwrap_or(id)
}

fn record(
    site: &Site,
    element: &Element,
    interface: Option<&Interface>,
    outcome: BindOutcome,
) -> BindRecord {
    BindRecord {
        site_id: site.id.clone(),
        site_name: site.name.clone(),
        element_id: element.id.clone(),
        element_name: element.name.clone(),
        interface_id: interface.map(|i| i.id.clone()),
        interface_name: interface.and_then(|i| i.name.clone()),
        outcome,
    }
}
