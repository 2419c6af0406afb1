//! Drives `ProjectFilterView` end to end: view -> loader -> HTTP client ->
//! mock server -> app event channel -> view.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use serde_json::json;
use showcase_async_utils::RequestToken;
use showcase_client::ProjectsClient;
use showcase_tui::app_event::AppEvent;
use showcase_tui::app_event_sender::AppEventSender;
use showcase_tui::config::default_categories;
use showcase_tui::project_filter::Assets;
use showcase_tui::project_filter::FETCH_FAILED_MESSAGE;
use showcase_tui::project_filter::FetchOutcome;
use showcase_tui::project_filter::ProjectFilterView;
use showcase_tui::project_filter::ProjectSummary;
use showcase_tui::project_filter::spawn_loader;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

const LISTING_PATH: &str = "/ps/projects";

fn view_for(server: &MockServer) -> (ProjectFilterView, UnboundedReceiver<AppEvent>) {
    let client = ProjectsClient::new(&format!("{}{LISTING_PATH}", server.uri())).unwrap();
    let (tx, rx) = unbounded_channel();
    let loader = spawn_loader(Arc::new(client), AppEventSender::new(tx));
    let view = ProjectFilterView::new(
        default_categories(),
        Assets {
            logo_url: "http://assets/logo.png".to_string(),
            failure_image_url: "http://assets/failure.png".to_string(),
        },
        "ALL",
        loader,
    );
    (view, rx)
}

/// Wait for the next fetch completion and hand it to the view.
async fn deliver_next(
    view: &mut ProjectFilterView,
    rx: &mut UnboundedReceiver<AppEvent>,
) -> (RequestToken, FetchOutcome) {
    loop {
        let event = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("timed out waiting for fetch")
            .expect("event channel closed");
        if let AppEvent::ProjectsLoaded { token, outcome } = event {
            view.on_fetch_finished(token, outcome.clone());
            return (token, outcome);
        }
    }
}

async fn mount_listing(server: &MockServer, category: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("category", category))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn render(view: &ProjectFilterView) -> String {
    let (width, height) = (80, 20);
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| f.render_widget(view, f.area()))
        .unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary(id: &str, name: &str, image_url: Option<&str>) -> ProjectSummary {
    ProjectSummary {
        id: id.to_string(),
        name: name.to_string(),
        image_url: image_url.map(str::to_string),
    }
}

#[tokio::test]
async fn mount_loads_all_and_renders_card() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "ALL",
        json!({"projects": [{"id": "1", "name": "Hotel App", "image_url": "https://x/hotel.png"}]}),
    )
    .await;
    let (mut view, mut rx) = view_for(&server);

    view.mount();
    assert!(view.state().is_loading());
    deliver_next(&mut view, &mut rx).await;

    assert_eq!(
        view.state().projects(),
        &[summary("1", "Hotel App", Some("https://x/hotel.png"))]
    );
    let screen = render(&view);
    assert!(screen.contains("Hotel App"), "missing card in:\n{screen}");
    assert!(screen.contains("https://x/hotel.png"));
}

#[tokio::test]
async fn every_category_is_requested_by_id() {
    let server = MockServer::start().await;
    for category in default_categories() {
        mount_listing(
            &server,
            &category.id,
            json!({"projects": [{"id": category.id, "name": category.display_text, "image_url": ""}]}),
        )
        .await;
    }
    let (mut view, mut rx) = view_for(&server);
    view.mount();
    deliver_next(&mut view, &mut rx).await;

    for category in default_categories().into_iter().skip(1) {
        view.select_category(&category.id);
        deliver_next(&mut view, &mut rx).await;

        assert_eq!(view.state().category(), category.id);
        assert_eq!(
            view.state().projects(),
            &[summary(&category.id, &category.display_text, None)]
        );
    }

    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "category")
                .map(|(_, v)| v.into_owned())
        })
        .collect();
    assert_eq!(requested, vec!["ALL", "STATIC", "RESPONSIVE", "DYNAMIC", "REACT"]);
}

#[tokio::test]
async fn slow_earlier_category_never_overwrites_later_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("category", "ALL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"projects": [{"id": "a", "name": "Slow A", "image_url": ""}]}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_listing(
        &server,
        "REACT",
        json!({"projects": [{"id": "b", "name": "Fast B", "image_url": ""}]}),
    )
    .await;
    let (mut view, mut rx) = view_for(&server);

    view.mount();
    view.select_category("REACT");
    // One completion per request: the superseded fetch and the live one.
    deliver_next(&mut view, &mut rx).await;
    deliver_next(&mut view, &mut rx).await;

    assert_eq!(view.state().category(), "REACT");
    assert_eq!(view.state().projects(), &[summary("b", "Fast B", None)]);
    assert!(!render(&view).contains("Slow A"));
}

#[tokio::test]
async fn failure_then_retry_refetches_held_category() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("category", "DYNAMIC"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_listing(
        &server,
        "DYNAMIC",
        json!({"projects": [{"id": "7", "name": "Chat Room", "image_url": "https://x/chat.png"}]}),
    )
    .await;
    mount_listing(&server, "ALL", json!({"projects": []})).await;
    let (mut view, mut rx) = view_for(&server);
    view.mount();
    deliver_next(&mut view, &mut rx).await;

    view.select_category("DYNAMIC");
    let (_, outcome) = deliver_next(&mut view, &mut rx).await;
    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(view.state().error(), Some(FETCH_FAILED_MESSAGE));
    assert!(render(&view).contains("Retry"));

    view.retry();
    assert!(view.state().is_loading());
    deliver_next(&mut view, &mut rx).await;

    assert_eq!(view.state().category(), "DYNAMIC");
    assert_eq!(
        view.state().projects(),
        &[summary("7", "Chat Room", Some("https://x/chat.png"))]
    );
    let dynamic_requests = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.query() == Some("category=DYNAMIC"))
        .count();
    assert_eq!(dynamic_requests, 2);
}

#[tokio::test]
async fn same_response_renders_identically_each_time() {
    let server = MockServer::start().await;
    let body = json!({"projects": [
        {"id": "1", "name": "Hotel App", "image_url": "https://x/1.png"},
        {"id": "2", "name": "Portfolio"}
    ]});
    mount_listing(&server, "ALL", body).await;
    mount_listing(&server, "STATIC", json!({"projects": []})).await;
    let (mut view, mut rx) = view_for(&server);

    view.mount();
    deliver_next(&mut view, &mut rx).await;
    let first = render(&view);

    view.select_category("STATIC");
    deliver_next(&mut view, &mut rx).await;
    view.select_category("ALL");
    deliver_next(&mut view, &mut rx).await;

    assert_eq!(render(&view), first);
}

#[tokio::test]
async fn missing_and_empty_projects_render_empty_state() {
    let server = MockServer::start().await;
    mount_listing(&server, "ALL", json!({})).await;
    mount_listing(&server, "REACT", json!({"projects": []})).await;
    let (mut view, mut rx) = view_for(&server);

    view.mount();
    deliver_next(&mut view, &mut rx).await;
    assert!(view.state().projects().is_empty());
    assert!(render(&view).contains("No projects found for this category."));

    view.select_category("REACT");
    deliver_next(&mut view, &mut rx).await;
    assert!(view.state().projects().is_empty());
    assert!(render(&view).contains("No projects found for this category."));
}
