use crate::entities::OrderInfoJson;
use base::entities::OrderStatus;
use base::errors::FetchError;

/// Turns a raw status payload into an order status.
pub trait StatusParser {
    /// Must only yield `Pending`, `Ready` or `Delivered`; anything else is a parse error.
    fn parse(&self, payload: &str) -> Result<OrderStatus, FetchError>;
}

/// Reads the `summaryStateCode` field of the order info json.
#[derive(Default, Debug, Clone, Copy)]
pub struct SummaryStateParser;

impl SummaryStateParser {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn status_from_code(code: &str) -> Option<OrderStatus> {
        match code.trim().to_ascii_uppercase().as_str() {
            "DELIVERED" => Some(OrderStatus::Delivered),
            "READY" | "SHIPPED" | "ARRIVED" => Some(OrderStatus::Ready),
            "PENDING" | "OPEN" | "RECEIVED" | "PROCESSING" | "PRODUCTION" | "IN_PRODUCTION" => {
                Some(OrderStatus::Pending)
            }
            _ => None,
        }
    }
}

impl StatusParser for SummaryStateParser {
    fn parse(&self, payload: &str) -> Result<OrderStatus, FetchError> {
        let order_info: OrderInfoJson = serde_json::from_str(payload)
            .map_err(|e| FetchError::Parse(format!("invalid order info json: {}", e)))?;

        let code = order_info
            .summary_state_code
            .ok_or_else(|| FetchError::Parse(String::from("no summaryStateCode in order info")))?;

        let status = Self::status_from_code(&code)
            .ok_or_else(|| FetchError::Parse(format!("unknown summaryStateCode: {}", code)))?;

        if let Some(text) = order_info.summary_state_text {
            log::debug!("summary state {} ({}) -> {}", code, text, status);
        }

        Ok(status)
    }
}
