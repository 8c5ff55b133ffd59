use chrono::NaiveDate;
use serde_json::json;
use sf_client::{Error, LixingerClient};
use sf_core::{Config, ScreenProfile};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer, max_retries: u32) -> Config {
  Config {
    api_token: "test_token".to_string(),
    rate_limit: 600,
    timeout_secs: 5,
    max_retries,
    base_url: format!("{}/api", server.uri()),
  }
}

#[tokio::test]
async fn test_fs_industry_posts_query_and_returns_raw_body() {
  let server = MockServer::start().await;
  let profile = ScreenProfile::default();

  let body = json!({
    "code": 1,
    "message": "success",
    "data": [
      {
        "standardDate": "2017-12-31T00:00:00+08:00",
        "reportType": "annual_report",
        "stockCode": "600519",
        "h_y": {"profitStatement": {"oi": {"t": 58217861314.0}}}
      }
    ]
  });

  Mock::given(method("POST"))
    .and(path("/api/a/stock/fs/industry"))
    .and(header("content-type", "application/json"))
    .and(body_partial_json(json!({
      "token": "test_token",
      "startDate": "2015-12-01",
      "endDate": "2019-01-30",
      "stockCodes": ["600519"],
      "metrics": [
        "h_y.profitStatement.oi.t",
        "h_y.balanceSheet.ar.t",
        "h_y.balanceSheet.i.t",
        "h_y.balanceSheet.tca_tcl_r.t",
        "h_y.metrics.fcf.t",
        "h_y.cashFlow.ncffoa.t"
      ]
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
    .expect(1)
    .mount(&server)
    .await;

  let client = LixingerClient::new(test_config(&server, 0)).unwrap();
  let response = client
    .statements()
    .fs_industry("600519", &profile.statement_window, &profile.metrics.identifiers())
    .await
    .unwrap();

  assert_eq!(response, body);
}

#[tokio::test]
async fn test_fundamental_returns_first_record() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/a/stock/fundamental"))
    .and(body_partial_json(json!({
      "token": "test_token",
      "date": "2020-01-03",
      "stockCodes": ["000651"],
      "metrics": ["d_pe_ttm_pos10", "pb_wo_gw_pos10"]
    })))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "code": 1,
      "message": "success",
      "data": [{"stockCode": "000651", "d_pe_ttm_pos10": 0.25, "pb_wo_gw_pos10": 0.4}]
    })))
    .mount(&server)
    .await;

  let client = LixingerClient::new(test_config(&server, 0)).unwrap();
  let metrics = vec!["d_pe_ttm_pos10".to_string(), "pb_wo_gw_pos10".to_string()];
  let date = NaiveDate::from_ymd_opt(2020, 1, 3).unwrap();

  let record = client.valuation().fundamental("000651", date, &metrics).await.unwrap();
  assert_eq!(record.metric("d_pe_ttm_pos10"), Some(0.25));
  assert_eq!(record.metric("pb_wo_gw_pos10"), Some(0.4));
}

#[tokio::test]
async fn test_fundamental_empty_data_is_no_data() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/api/a/stock/fundamental"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({"code": 1, "message": "success", "data": []})),
    )
    .mount(&server)
    .await;

  let client = LixingerClient::new(test_config(&server, 0)).unwrap();
  let date = NaiveDate::from_ymd_opt(2020, 1, 4).unwrap();

  let err = client.valuation().fundamental("000651", date, &["d_pe_ttm_pos10".to_string()]).await;
  assert!(matches!(err, Err(Error::NoData(_))));
}

#[tokio::test]
async fn test_error_envelope_maps_to_api_error() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "Illegal token."})),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = LixingerClient::new(test_config(&server, 3)).unwrap();
  let profile = ScreenProfile::default();

  let result = client
    .statements()
    .fs_industry("600519", &profile.statement_window, &profile.metrics.identifiers())
    .await;

  match result {
    Err(Error::Api(msg)) => assert!(msg.contains("Illegal token.")),
    other => panic!("Expected Api error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_server_error_is_retried() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(503))
    .up_to_n_times(1)
    .expect(1)
    .mount(&server)
    .await;

  Mock::given(method("POST"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({"code": 1, "message": "success", "data": []})),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = LixingerClient::new(test_config(&server, 1)).unwrap();
  let profile = ScreenProfile::default();

  let body = client
    .statements()
    .fs_industry("600519", &profile.statement_window, &profile.metrics.identifiers())
    .await
    .unwrap();

  assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_server_error_without_retries_fails() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let client = LixingerClient::new(test_config(&server, 0)).unwrap();
  let profile = ScreenProfile::default();

  let result = client
    .statements()
    .fs_industry("600519", &profile.statement_window, &profile.metrics.identifiers())
    .await;

  assert!(matches!(result, Err(Error::Http(_))));
}
