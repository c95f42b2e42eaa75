use crate::requests::entities::HttpRequestData;
use anyhow::Result;

pub trait SyncHttpRequest {
    fn call(&self, req: HttpRequestData) -> Result<String>;
}

impl<R: SyncHttpRequest + ?Sized> SyncHttpRequest for &R {
    fn call(&self, req: HttpRequestData) -> Result<String> {
        (**self).call(req)
    }
}
