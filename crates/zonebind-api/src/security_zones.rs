// Security zone endpoints
//
// Zones are defined tenant-wide (`securityzones`); their bindings to
// interfaces and networks live per element (`.../elements/{id}/securityzones`).

use tracing::debug;

use crate::client::CgxClient;
use crate::error::Error;
use crate::models::{ElementSecurityZone, NewElementSecurityZone, SecurityZone};

const SECURITY_ZONES_VERSION: &str = "v2.0";
const ELEMENT_SECURITY_ZONES_VERSION: &str = "v2.0";

impl CgxClient {
    /// List the tenant's security zones.
    ///
    /// `GET /v2.0/api/tenants/{tenant}/securityzones`
    pub async fn list_security_zones(&self) -> Result<Vec<SecurityZone>, Error> {
        let url = self.tenant_url(SECURITY_ZONES_VERSION, "securityzones")?;
        debug!("listing security zones");
        self.get_items(url).await
    }

    /// List the zone mappings of one element.
    ///
    /// `GET /v2.0/api/tenants/{tenant}/sites/{site}/elements/{element}/securityzones`
    pub async fn list_element_security_zones(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<ElementSecurityZone>, Error> {
        let url = self.element_zones_url(site_id, element_id)?;
        debug!(site_id, element_id, "listing element zone mappings");
        self.get_items(url).await
    }

    /// Create a zone mapping on one element.
    ///
    /// `POST /v2.0/api/tenants/{tenant}/sites/{site}/elements/{element}/securityzones`
    ///
    /// Any 2xx status counts as created. The stored mapping is returned when
    /// the body decodes as one, `None` otherwise.
    pub async fn create_element_security_zone(
        &self,
        site_id: &str,
        element_id: &str,
        mapping: &NewElementSecurityZone,
    ) -> Result<Option<ElementSecurityZone>, Error> {
        let url = self.element_zones_url(site_id, element_id)?;
        debug!(site_id, element_id, zone_id = %mapping.zone_id, "creating element zone mapping");
        match self.post(url, mapping).await {
            Ok(created) => Ok(Some(created)),
            Err(Error::Deserialization { body, .. }) => {
                debug!(body_len = body.len(), "mapping created without a decodable body");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn element_zones_url(&self, site_id: &str, element_id: &str) -> Result<url::Url, Error> {
        self.tenant_url(
            ELEMENT_SECURITY_ZONES_VERSION,
            &format!("sites/{site_id}/elements/{element_id}/securityzones"),
        )
    }
}
