use pretty_assertions::assert_eq;
use showcase_client::ClientError;
use showcase_client::ProjectRecord;
use showcase_client::ProjectSource;
use showcase_client::ProjectsClient;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn client_for(server: &MockServer) -> ProjectsClient {
    ProjectsClient::new(&format!("{}/ps/projects", server.uri())).unwrap()
}

#[tokio::test]
async fn fetches_projects_for_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ps/projects"))
        .and(query_param("category", "STATIC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "projects": [
                {"id": "1", "name": "Hotel App", "image_url": "http://x/1.png"},
                {"id": "2", "name": "Portfolio", "image_url": ""}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server).list_projects("STATIC").await.unwrap();

    assert_eq!(
        records,
        vec![
            ProjectRecord {
                id: "1".to_string(),
                name: "Hotel App".to_string(),
                image_url: Some("http://x/1.png".to_string()),
            },
            ProjectRecord {
                id: "2".to_string(),
                name: "Portfolio".to_string(),
                image_url: Some(String::new()),
            },
        ]
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ps/projects"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).list_projects("ALL").await.unwrap_err();

    assert!(err.is_status(), "expected status error, got {err:?}");
    assert!(matches!(err, ClientError::Status(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn body_without_projects_is_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ps/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let records = client_for(&server).list_projects("ALL").await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn trait_object_dispatches_to_http_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("category", "REACT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "projects": [{"id": "9", "name": "Jobby", "image_url": null}]
        })))
        .mount(&server)
        .await;

    let source: Box<dyn ProjectSource> = Box::new(client_for(&server));
    let records = source.list_projects("REACT").await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Jobby");
}

#[tokio::test]
async fn connection_failure_is_transport_error() {
    // Nothing listens on the discard port.
    let client = ProjectsClient::new("http://127.0.0.1:9/ps/projects").unwrap();

    let err = client.list_projects("ALL").await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
}
