use crate::requests::api::SyncHttpRequest;
use crate::requests::entities::{HttpRequestData, HttpRequestMethod};
use anyhow::{bail, Context, Result};
use std::time::Duration;
use ureq::{Agent, AgentBuilder, Error};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct UreqRequestApi {
    agent: Agent,
}

impl Default for UreqRequestApi {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl UreqRequestApi {
    pub fn new() -> Self {
        Default::default()
    }

    /// Every request made through this api fails once `timeout` elapses.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl SyncHttpRequest for UreqRequestApi {
    fn call(&self, req: HttpRequestData) -> Result<String> {
        let mut request = match req.method {
            HttpRequestMethod::Get => self.agent.get(&req.url),
        };

        if let Some(headers) = &req.headers {
            for (header, value) in headers {
                request = request.set(header, value);
            }
        }

        if let Some(queries) = &req.queries {
            for (param, value) in queries {
                request = request.query(param, value);
            }
        }

        match request.call() {
            Ok(resp) => resp
                .into_string()
                .context(format!("couldn't read the response body of {}", req.url)),
            Err(e) => match e {
                Error::Status(code, resp) => {
                    bail!(
                        "request to {} failed with a code {}: {}",
                        resp.get_url().to_string(),
                        code,
                        resp.into_string()?
                    );
                }
                e => bail!(e),
            },
        }
    }
}
