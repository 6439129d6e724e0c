// Element and interface endpoints
//
// Elements are listed tenant-wide; interfaces are scoped to a
// site/element pair.

use tracing::debug;

use crate::client::CgxClient;
use crate::error::Error;
use crate::models::{Element, Interface};

const ELEMENTS_VERSION: &str = "v2.3";
const INTERFACES_VERSION: &str = "v4.15";

impl CgxClient {
    /// List every element of the tenant, assigned or not.
    ///
    /// `GET /v2.3/api/tenants/{tenant}/elements`
    pub async fn list_elements(&self) -> Result<Vec<Element>, Error> {
        let url = self.tenant_url(ELEMENTS_VERSION, "elements")?;
        debug!("listing elements");
        self.get_items(url).await
    }

    /// List the interfaces configured on one element.
    ///
    /// `GET /v4.15/api/tenants/{tenant}/sites/{site}/elements/{element}/interfaces`
    pub async fn list_interfaces(
        &self,
        site_id: &str,
        element_id: &str,
    ) -> Result<Vec<Interface>, Error> {
        let url = self.tenant_url(
            INTERFACES_VERSION,
            &format!("sites/{site_id}/elements/{element_id}/interfaces"),
        )?;
        debug!(site_id, element_id, "listing interfaces");
        self.get_items(url).await
    }
}
