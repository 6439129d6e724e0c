// Site endpoints

use tracing::debug;

use crate::client::CgxClient;
use crate::error::Error;
use crate::models::Site;

const SITES_VERSION: &str = "v4.7";

impl CgxClient {
    /// List every site of the tenant.
    ///
    /// `GET /v4.7/api/tenants/{tenant}/sites`
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let url = self.tenant_url(SITES_VERSION, "sites")?;
        debug!("listing sites");
        self.get_items(url).await
    }
}
