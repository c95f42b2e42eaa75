use serde::Deserialize;

/// Order info as returned by the photoprintit order endpoint.
/// Only the fields the tracker reads are declared; the rest is ignored.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfoJson {
    pub summary_state_code: Option<String>,
    pub summary_state_text: Option<String>,
}
