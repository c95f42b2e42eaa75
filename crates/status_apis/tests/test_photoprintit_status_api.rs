use anyhow::{bail, Result};
use base::entities::OrderStatus;
use base::errors::FetchError;
use base::requests::api::SyncHttpRequest;
use base::requests::entities::HttpRequestData;
use base::status_api::StatusApi;
use log::Level;
use status_apis::{ApiSettings, PhotoprintitStatusApi, StatusParser};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingRequest {
    body: String,
    requests: RefCell<Vec<HttpRequestData>>,
}

impl RecordingRequest {
    fn answering(body: &str) -> Self {
        Self {
            body: String::from(body),
            ..Default::default()
        }
    }
}

impl SyncHttpRequest for RecordingRequest {
    fn call(&self, req: HttpRequestData) -> Result<String> {
        self.requests.borrow_mut().push(req);
        Ok(self.body.clone())
    }
}

#[derive(Default)]
struct FailingRequest {
    number_of_requests: RefCell<u32>,
}

impl SyncHttpRequest for FailingRequest {
    fn call(&self, _req: HttpRequestData) -> Result<String> {
        *self.number_of_requests.borrow_mut() += 1;
        bail!("connection reset by peer")
    }
}

#[test]
#[allow(non_snake_case)]
fn fetch_status__delivered_payload__delivered_and_request_built_from_ids() {
    let request = RecordingRequest::answering(
        r#"{"summaryStateCode": "DELIVERED", "summaryStateText": "Abholbereit", "summaryPrice": 4.5}"#,
    );
    let api = PhotoprintitStatusApi::new(Default::default(), &request);

    let status = api.fetch_status(1012, 55667788);

    assert_eq!(status, OrderStatus::Delivered);

    let requests = request.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://spot.photoprintit.com/spotapi/orderInfo/forShop"
    );
    assert_eq!(requests[0].query("config"), Some("1320"));
    assert_eq!(requests[0].query("shop"), Some("1012"));
    assert_eq!(requests[0].query("order"), Some("55667788"));
}

#[test]
#[allow(non_snake_case)]
fn fetch_status__custom_settings__used_in_request() {
    let request = RecordingRequest::answering(r#"{"summaryStateCode": "PROCESSING"}"#);
    let api = PhotoprintitStatusApi::new(
        ApiSettings {
            url: String::from("http://localhost:8080/orderInfo"),
            config_id: String::from("42"),
        },
        &request,
    );

    assert_eq!(api.fetch_status(7, 8), OrderStatus::Pending);

    let requests = request.requests.borrow();
    assert_eq!(requests[0].url, "http://localhost:8080/orderInfo");
    assert_eq!(requests[0].query("config"), Some("42"));
}

#[test]
#[allow(non_snake_case)]
fn fetch_status__request_fails__error_status_without_retries() {
    let request: FailingRequest = Default::default();
    let api = PhotoprintitStatusApi::new(Default::default(), &request);

    testing_logger::setup();

    assert_eq!(api.fetch_status(1012, 55667788), OrderStatus::Error);
    assert_eq!(*request.number_of_requests.borrow(), 1);

    testing_logger::validate(|captured_logs| {
        let number_of_warnings = captured_logs
            .iter()
            .filter(|log| matches!(log.level, Level::Warn))
            .count();

        assert_eq!(number_of_warnings, 1);
    });
}

#[test]
#[allow(non_snake_case)]
fn try_fetch_status__request_fails__request_error_with_context() {
    let request: FailingRequest = Default::default();
    let api = PhotoprintitStatusApi::new(Default::default(), &request);

    let res = api.try_fetch_status(1012, 55667788);

    match res {
        Err(FetchError::Request(e)) => {
            let message = format!("{:#}", e);
            assert!(message.contains("shop 1012 order 55667788"));
            assert!(message.contains("connection reset by peer"));
        }
        other => panic!("expected a request error, got {:?}", other),
    }
}

#[test]
#[allow(non_snake_case)]
fn fetch_status__garbage_payload__error_status() {
    let request = RecordingRequest::answering("Service Unavailable");
    let api = PhotoprintitStatusApi::new(Default::default(), &request);

    assert_eq!(api.fetch_status(1012, 55667788), OrderStatus::Error);
}

struct AlwaysReadyParser;

impl StatusParser for AlwaysReadyParser {
    fn parse(&self, _payload: &str) -> Result<OrderStatus, FetchError> {
        Ok(OrderStatus::Ready)
    }
}

#[test]
#[allow(non_snake_case)]
fn fetch_status__custom_parser__parser_decides_status() {
    let request = RecordingRequest::answering("<html>Bereit zur Abholung</html>");
    let api = PhotoprintitStatusApi::with_parser(Default::default(), &request, AlwaysReadyParser);

    assert_eq!(api.fetch_status(1012, 55667788), OrderStatus::Ready);
}
