//! Private account endpoints
//!
//! These endpoints require API credentials; an unsigned call reaches the
//! server and comes back as an [`Api`](crate::error::RestError::Api) error.

use crate::client::GdaxRestClient;
use crate::error::RestResult;
use crate::types::{ReportStatus, TrailingVolume};
use tracing::{debug, instrument};

/// Private account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a GdaxRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(client: &'a GdaxRestClient) -> Self {
        Self { client }
    }

    /// Get the status of a previously requested report
    ///
    /// # Arguments
    /// * `report_id` - Report identifier returned when the report was created
    #[instrument(skip(self))]
    pub async fn get_report_status(&self, report_id: &str) -> RestResult<ReportStatus> {
        let path = format!("/reports/{}", report_id);
        debug!("Fetching report status for {}", report_id);
        self.client.get(&path, &[]).await
    }

    /// Get 30-day trailing volume per product
    #[instrument(skip(self))]
    pub async fn get_trailing_volume(&self) -> RestResult<Vec<TrailingVolume>> {
        debug!("Fetching trailing volume");
        self.client.get("/users/self/trailing-volume", &[]).await
    }
}
