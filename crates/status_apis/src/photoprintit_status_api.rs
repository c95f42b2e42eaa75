use crate::parser::{StatusParser, SummaryStateParser};
use anyhow::Context;
use base::entities::{OrderId, OrderStatus, ShopId};
use base::errors::FetchError;
use base::requests::api::SyncHttpRequest;
use base::requests::entities::{HttpRequestData, HttpRequestMethod};
use base::status_api::StatusApi;

pub const DEFAULT_API_URL: &str = "https://spot.photoprintit.com/spotapi/orderInfo/forShop";
pub const DEFAULT_API_CONFIG: &str = "1320";

pub type ApiUrl = String;
pub type ApiConfigId = String;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ApiSettings {
    pub url: ApiUrl,
    /// Identifies the retail chain on the photoprintit platform.
    pub config_id: ApiConfigId,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_API_URL),
            config_id: String::from(DEFAULT_API_CONFIG),
        }
    }
}

/// Fetches order statuses from the photoprintit order info endpoint.
///
/// Does a single request per call and keeps no state between calls.
pub struct PhotoprintitStatusApi<R, P = SummaryStateParser>
where
    R: SyncHttpRequest,
    P: StatusParser,
{
    settings: ApiSettings,
    request_api: R,
    parser: P,
}

impl<R> PhotoprintitStatusApi<R, SummaryStateParser>
where
    R: SyncHttpRequest,
{
    pub fn new(settings: ApiSettings, request_api: R) -> Self {
        Self::with_parser(settings, request_api, SummaryStateParser::new())
    }
}

impl<R, P> PhotoprintitStatusApi<R, P>
where
    R: SyncHttpRequest,
    P: StatusParser,
{
    pub fn with_parser(settings: ApiSettings, request_api: R, parser: P) -> Self {
        Self {
            settings,
            request_api,
            parser,
        }
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    fn order_info_request(&self, shop_id: ShopId, order_id: OrderId) -> HttpRequestData {
        HttpRequestData::new(HttpRequestMethod::Get, &self.settings.url)
            .with_header("Accept", "application/json")
            .with_query("config", &self.settings.config_id)
            .with_query("shop", &shop_id.to_string())
            .with_query("order", &order_id.to_string())
    }
}

impl<R, P> StatusApi for PhotoprintitStatusApi<R, P>
where
    R: SyncHttpRequest,
    P: StatusParser,
{
    fn try_fetch_status(
        &self,
        shop_id: ShopId,
        order_id: OrderId,
    ) -> Result<OrderStatus, FetchError> {
        let req = self.order_info_request(shop_id, order_id);

        let payload = self.request_api.call(req).context(format!(
            "error on requesting the order info of shop {} order {}",
            shop_id, order_id
        ))?;

        self.parser.parse(&payload)
    }
}
