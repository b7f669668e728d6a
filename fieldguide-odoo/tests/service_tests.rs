//! `OdooService` against a mock Odoo server.

use fieldguide_core::{ApiConfig, GuideState};
use fieldguide_fetch::header::HeaderMap;
use fieldguide_odoo::OdooService;
use fieldguide_store::SessionStore;
use serde_json::{Map, Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_PATH: &str = "/web/dataset/call_kw/ek.contract.work.guide.service";

fn service(server: &MockServer) -> OdooService {
    let config = ApiConfig::new(server.uri())
        .with_db_name("test_db")
        .with_timeout_ms(2_000)
        .with_retries(2, 10);
    OdooService::new(config, SessionStore::in_memory()).unwrap()
}

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 7, "result": result}))
}

fn rpc_error(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 7,
        "error": {
            "code": 200,
            "message": "Odoo Server Error",
            "data": {"name": "odoo.exceptions.UserError", "message": message}
        }
    }))
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/web/session/authenticate"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "call",
            "params": {"db": "test_db", "login": "tech@example.com", "password": "secret"}
        })))
        .respond_with(
            rpc_result(json!({
                "uid": 7,
                "name": "Ana Pérez",
                "username": "tech@example.com",
                "partner_id": 12,
                "company_id": 1,
                "is_admin": false
            }))
            .insert_header("set-cookie", "session_id=abc; HttpOnly; Path=/"),
        )
        .mount(server)
        .await;
}

async fn logged_in(server: &MockServer) -> OdooService {
    mount_login(server).await;
    let service = service(server);
    assert!(service.login("tech@example.com", "secret").await.is_success());
    service
}

fn patch(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_login_stores_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let service = service(&server);

    let result = service.login("tech@example.com", "secret").await;

    assert!(result.is_success(), "{:?}", result.error());
    let user = result.data().unwrap();
    assert_eq!(user.uid, 7);
    assert_eq!(user.name, "Ana Pérez");
    assert_eq!(service.get_current_user_id().await, Some(7));
    assert!(service.check_session().await);
    assert_eq!(service.get_user_data().await.map(|u| u.partner_id), Some(12));
    assert_eq!(
        service.session().session_cookie().await.unwrap().as_deref(),
        Some("session_id=abc; HttpOnly; Path=/")
    );
}

#[tokio::test]
async fn test_login_rpc_error_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/web/session/authenticate"))
        .respond_with(rpc_error("Access Denied"))
        .expect(1)
        .mount(&server)
        .await;
    let service = service(&server);

    let result = service.login("tech@example.com", "wrong").await;

    assert_eq!(result.error(), Some("Invalid credentials"));
    assert!(!service.check_session().await);
    assert_eq!(service.get_current_user_id().await, None);
}

#[tokio::test]
async fn test_login_without_uid_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/web/session/authenticate"))
        .respond_with(rpc_result(json!({"uid": false})))
        .mount(&server)
        .await;
    let service = service(&server);

    let result = service.login("tech@example.com", "secret").await;

    assert_eq!(result.error(), Some("Invalid credentials"));
    assert!(!service.check_session().await);
}

#[tokio::test]
async fn test_login_requires_credentials() {
    let server = MockServer::start().await;
    let service = service(&server);

    let result = service.login("  ", "secret").await;

    assert_eq!(result.error(), Some("Email and password are required"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_clears_session() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path("/web/session/destroy"))
        .and(header("cookie", "session_id=abc; HttpOnly; Path=/"))
        .respond_with(rpc_result(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let result = service.logout().await;

    assert!(result.is_success());
    assert!(!service.check_session().await);
    assert_eq!(service.get_current_user_id().await, None);
    assert!(
        service
            .session()
            .attach_session_header(HeaderMap::new())
            .await
            .is_empty()
    );

    let guides = service.get_all_guides().await;
    assert_eq!(guides.error(), Some("No active session"));
}

#[tokio::test]
async fn test_logout_survives_server_failure() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path("/web/session/destroy"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    assert!(service.logout().await.is_success());
    assert!(!service.check_session().await);
}

#[tokio::test]
async fn test_verify_session() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path("/web/session/check"))
        .respond_with(rpc_result(Value::Null))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/web/session/check"))
        .respond_with(rpc_error("Session expired"))
        .mount(&server)
        .await;

    assert_eq!(service.verify_session().await.data(), Some(&true));
    assert_eq!(service.verify_session().await.data(), Some(&false));
}

// ============================================================================
// Guides and Orders
// ============================================================================

#[tokio::test]
async fn test_operations_require_session() {
    let server = MockServer::start().await;
    let service = service(&server);

    assert_eq!(service.get_all_guides().await.error(), Some("No active session"));
    assert_eq!(service.get_order_detail(1).await.error(), Some("No active session"));
    assert_eq!(
        service.update_order(1, &Map::new()).await.error(),
        Some("No active session")
    );
    assert_eq!(service.get_warehouse().await.error(), Some("No active session"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_all_guides_sends_envelope_with_cookie() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_all_guides")))
        .and(header("cookie", "session_id=abc; HttpOnly; Path=/"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "call",
            "id": 7,
            "params": {
                "model": "ek.contract.work.guide.service",
                "method": "get_all_guides",
                "args": [],
                "kwargs": {}
            }
        })))
        .respond_with(rpc_result(json!([
            {"id": 1, "name": "GT/0001", "state": "open", "date": "2024-03-15 08:00:00", "team_id": [3, "Team A"]},
            {"id": 2, "name": "GT/0002", "state": "draft", "date": false, "team_id": false}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let result = service.get_all_guides().await;

    let guides = result.into_result().unwrap();
    assert_eq!(guides.len(), 2);
    assert_eq!(guides[0].state, GuideState::Open);
    assert_eq!(guides[0].team_name(), Some("Team A"));
    assert_eq!(guides[1].team_id, None);
}

#[tokio::test]
async fn test_empty_guide_list_is_success() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_all_guides")))
        .respond_with(rpc_result(json!([])))
        .mount(&server)
        .await;

    assert_eq!(service.get_all_guides().await.data(), Some(&Vec::new()));
}

#[tokio::test]
async fn test_get_guide() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_guide")))
        .and(body_partial_json(json!({"params": {"args": [5]}})))
        .respond_with(rpc_result(
            json!({"id": 5, "name": "GT/0005", "state": "closed", "date": "2024-03-15", "team_id": [3, "Team A"]}),
        ))
        .mount(&server)
        .await;

    let guide = service.get_guide(5).await.into_result().unwrap();
    assert_eq!(guide.id, 5);
    assert_eq!(guide.state, GuideState::Closed);
}

#[tokio::test]
async fn test_get_orders_by_guide_retries_then_fails() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_orders_by_guide")))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let result = service.get_orders_by_guide(1).await;
    assert_eq!(result.error(), Some("HTTP Error: 500"));
}

#[tokio::test]
async fn test_get_orders_by_guide() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_orders_by_guide")))
        .and(body_partial_json(json!({"params": {"args": [1]}})))
        .respond_with(rpc_result(json!([
            {"id": 42, "name": "OT/0042", "state": "progress", "type_id": [1, "Installation"], "subscription_id": [9, "SUB-9"]}
        ])))
        .mount(&server)
        .await;

    let orders = service.get_orders_by_guide(1).await.into_result().unwrap();
    assert_eq!(orders[0].id, 42);
    assert_eq!(orders[0].type_name(), Some("Installation"));
}

#[tokio::test]
async fn test_get_order_detail_rpc_error_message() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_order")))
        .respond_with(rpc_error("Order 99 does not exist"))
        .expect(1)
        .mount(&server)
        .await;

    let result = service.get_order_detail(99).await;
    assert_eq!(result.error(), Some("Order 99 does not exist"));
}

#[tokio::test]
async fn test_get_order_detail_false_result() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_order")))
        .respond_with(rpc_result(json!(false)))
        .mount(&server)
        .await;

    let result = service.get_order_detail(99).await;
    assert_eq!(result.error(), Some("Could not load the order detail"));
}

#[tokio::test]
async fn test_get_order_detail() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_order")))
        .respond_with(rpc_result(json!({
            "id": 42,
            "name": "OT/0042",
            "state": "progress",
            "partner": {"name": "Carlos", "cedula": "0912345678", "telefono": false, "celular": "0991234567"},
            "isp": {"olt": {"name": "OLT-1"}, "current_status": {"status": "active"}},
            "ubicacion": {"latitude": -2.17, "longitude": -79.92},
            "note": false
        })))
        .mount(&server)
        .await;

    let order = service.get_order_detail(42).await.into_result().unwrap();
    assert_eq!(order.partner.name, "Carlos");
    assert_eq!(order.partner.telefono, "");
    assert_eq!(order.isp.olt.name, "OLT-1");
    assert_eq!(order.note, "");
}

#[tokio::test]
async fn test_get_order_detail_with_blank_relations() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_order")))
        .respond_with(rpc_result(json!({
            "id": 42,
            "name": "OT/0042",
            "state": "progress",
            "partner": false,
            "ubicacion": false,
            "isp": {"core": false, "olt": {"name": "OLT-1"}}
        })))
        .mount(&server)
        .await;

    let result = service.get_order_detail(42).await;

    assert!(result.is_success(), "{:?}", result.error());
    let order = result.into_result().unwrap();
    assert_eq!(order.partner.name, "");
    assert!(order.ubicacion.is_unset());
    assert_eq!(order.isp.core.name, "");
    assert_eq!(order.isp.olt.name, "OLT-1");
}

#[tokio::test]
async fn test_update_order_false_is_failure() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/update_order")))
        .and(body_partial_json(json!({"id": 7, "params": {"args": [42, {"note": "x"}]}})))
        .respond_with(rpc_result(json!(false)))
        .expect(1)
        .mount(&server)
        .await;

    let result = service.update_order(42, &patch(json!({"note": "x"}))).await;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("Could not update the order"));
}

#[tokio::test]
async fn test_update_order_true_is_success() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/update_order")))
        .respond_with(rpc_result(json!(true)))
        .mount(&server)
        .await;

    let result = service.update_order(42, &patch(json!({"note": "done"}))).await;
    assert!(result.is_success());
}

// ============================================================================
// Warehouse
// ============================================================================

#[tokio::test]
async fn test_get_warehouse() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_detailed_store")))
        .respond_with(rpc_result(json!({
            "location_id": 8,
            "location_name": "WH/Tech-7",
            "stocks": [
                {"product_id": 1, "product_name": "ONT", "total_quantity": 2.0, "serials": [
                    {"lot_id": 10, "serial_number": "ZTEG00000001", "quantity": 1.0},
                    {"lot_id": 11, "serial_number": "ZTEG00000002", "quantity": 1.0}
                ]},
                {"product_id": 2, "product_name": "Drop cable", "total_quantity": 150.5, "serials": []}
            ]
        })))
        .mount(&server)
        .await;

    let warehouse = service.get_warehouse().await.into_result().unwrap();
    assert_eq!(warehouse.location_name, "WH/Tech-7");
    assert_eq!(warehouse.stocks.len(), 2);
    assert!(warehouse.stocks[0].has_serials());
}

#[tokio::test]
async fn test_get_warehouse_without_location() {
    let server = MockServer::start().await;
    let service = logged_in(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("{SERVICE_PATH}/get_detailed_store")))
        .respond_with(rpc_result(json!({
            "location_id": false,
            "location_name": false,
            "stocks": []
        })))
        .mount(&server)
        .await;

    let result = service.get_warehouse().await;

    assert!(result.is_success(), "{:?}", result.error());
    let warehouse = result.into_result().unwrap();
    assert_eq!(warehouse.location_id, 0);
    assert_eq!(warehouse.location_name, "");
    assert!(warehouse.stocks.is_empty());
}
