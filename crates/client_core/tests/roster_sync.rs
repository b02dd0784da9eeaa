//! End-to-end roster synchronisation against an in-process activities service.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Instant,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use client_core::{
    ActivitiesRegion, ClientEvent, NoticeKind, PageState, SignupClient, NOTICE_TTL,
    UNREGISTER_FAILED_MESSAGE,
};
use shared::{
    domain::{Activity, Roster},
    error::ErrorBody,
    protocol::{EmailQuery, SignupResponse, ACTIVITIES_ROUTE},
};
use tokio::{net::TcpListener, sync::broadcast};

type Rejection = (StatusCode, Json<ErrorBody>);

#[derive(Clone)]
struct FakeService {
    activities: Arc<Mutex<Vec<(String, Activity)>>>,
    roster_fetches: Arc<AtomicUsize>,
}

impl FakeService {
    fn new() -> Self {
        let activity = |schedule: &str, max_participants: u32, participants: &[&str]| Activity {
            description: "After-school activity".to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: participants.iter().map(|p| p.to_string()).collect(),
        };
        Self {
            activities: Arc::new(Mutex::new(vec![
                (
                    "Chess Club".to_string(),
                    activity("Mon 3pm", 10, &["a@x.com"]),
                ),
                ("Drama Club".to_string(), activity("Wed 4pm", 1, &[])),
            ])),
            roster_fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn fetches(&self) -> usize {
        self.roster_fetches.load(Ordering::SeqCst)
    }
}

fn not_found() -> Rejection {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("Activity not found")),
    )
}

async fn list_activities(State(state): State<FakeService>) -> Json<Roster> {
    state.roster_fetches.fetch_add(1, Ordering::SeqCst);
    let activities = state.activities.lock().expect("activities");
    Json(activities.iter().cloned().collect())
}

async fn signup(
    State(state): State<FakeService>,
    Path(activity): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<SignupResponse>, Rejection> {
    let mut activities = state.activities.lock().expect("activities");
    let (_, details) = activities
        .iter_mut()
        .find(|(name, _)| *name == activity)
        .ok_or_else(not_found)?;
    if details.has_participant(&query.email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Student is already signed up")),
        ));
    }
    details.participants.push(query.email.clone());
    Ok(Json(SignupResponse {
        message: format!("Signed up {} for {activity}", query.email),
    }))
}

async fn unregister(
    State(state): State<FakeService>,
    Path(activity): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<SignupResponse>, Rejection> {
    let mut activities = state.activities.lock().expect("activities");
    let (_, details) = activities
        .iter_mut()
        .find(|(name, _)| *name == activity)
        .ok_or_else(not_found)?;
    let Some(position) = details.participants.iter().position(|p| *p == query.email) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new("Student is not signed up for this activity")),
        ));
    };
    details.participants.remove(position);
    Ok(Json(SignupResponse {
        message: format!("Unregistered {} from {activity}", query.email),
    }))
}

async fn spawn_service(state: FakeService) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route(ACTIVITIES_ROUTE, get(list_activities))
        .route(
            "/activities/:activity/signup",
            post(signup).delete(unregister),
        )
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn apply_pending(
    page: &mut PageState,
    rx: &mut broadcast::Receiver<ClientEvent>,
    now: Instant,
) -> usize {
    let mut applied = 0;
    while let Ok(event) = rx.try_recv() {
        page.apply(event, now);
        applied += 1;
    }
    applied
}

fn participants(page: &PageState, activity: &str) -> Vec<String> {
    page.cards()
        .iter()
        .find(|card| card.name == activity)
        .map(|card| {
            card.removal_controls()
                .map(|control| control.email.clone())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn initial_load_renders_cards_and_options() {
    let fake = FakeService::new();
    let client = SignupClient::connect(&spawn_service(fake.clone()).await).expect("client");
    let mut rx = client.subscribe_events();
    let mut page = PageState::default();

    let roster = client.load_roster().await.expect("load");
    apply_pending(&mut page, &mut rx, Instant::now());

    let drama = roster.get("Drama Club").expect("Drama Club listed");
    assert_eq!(drama.max_participants, 1);
    assert!(drama.participants.is_empty());
    assert!(roster.get("Basket Weaving").is_none());

    let options: Vec<&str> = page.options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(options, ["Chess Club", "Drama Club"]);
    assert_eq!(page.cards()[0].participants_heading(), "Participants (1/10)");
    assert_eq!(participants(&page, "Chess Club"), ["a@x.com"]);
    assert_eq!(page.cards()[1].removal_controls().count(), 0);
    assert_eq!(fake.fetches(), 1);
}

#[tokio::test]
async fn enroll_then_unregister_round_trip() {
    let fake = FakeService::new();
    let client = SignupClient::connect(&spawn_service(fake.clone()).await).expect("client");
    let mut rx = client.subscribe_events();
    let mut page = PageState::default();
    let now = Instant::now();

    client.load_roster().await.expect("load");
    apply_pending(&mut page, &mut rx, now);
    page.form.email = "b@x.com".to_string();
    page.form.activity = "Chess Club".to_string();

    let submission = page.form.submission().expect("both fields filled");
    client
        .enroll(&submission.activity, &submission.email)
        .await
        .expect("enroll");
    apply_pending(&mut page, &mut rx, now);

    let notice = page.message.visible().expect("success notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.text, "Signed up b@x.com for Chess Club");
    assert!(page.form.email.is_empty());
    assert!(page.form.activity.is_empty());
    assert_eq!(participants(&page, "Chess Club"), ["a@x.com", "b@x.com"]);
    assert_eq!(page.cards()[0].spots_left, 8);

    page.tick(now + NOTICE_TTL);
    assert!(page.message.visible().is_none());

    let control = page.cards()[0]
        .removal_controls()
        .find(|control| control.email == "b@x.com")
        .cloned()
        .expect("removal control for b@x.com");
    client
        .unregister(&control.activity, &control.email)
        .await
        .expect("unregister");
    apply_pending(&mut page, &mut rx, now);

    assert_eq!(participants(&page, "Chess Club"), ["a@x.com"]);
    assert!(page.alert.is_none());
    assert_eq!(fake.fetches(), 3);
}

#[tokio::test]
async fn duplicate_enroll_shows_detail_and_keeps_form() {
    let fake = FakeService::new();
    let client = SignupClient::connect(&spawn_service(fake.clone()).await).expect("client");
    let mut rx = client.subscribe_events();
    let mut page = PageState::default();
    let now = Instant::now();

    client.load_roster().await.expect("load");
    apply_pending(&mut page, &mut rx, now);
    page.form.email = "a@x.com".to_string();
    page.form.activity = "Chess Club".to_string();

    client
        .enroll("Chess Club", "a@x.com")
        .await
        .expect_err("already enrolled");
    apply_pending(&mut page, &mut rx, now);

    let notice = page.message.visible().expect("error notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Student is already signed up");
    assert_eq!(page.form.email, "a@x.com");
    assert_eq!(page.form.activity, "Chess Club");
    assert_eq!(fake.fetches(), 1);
}

#[tokio::test]
async fn stale_removal_control_surfaces_service_alert() {
    let fake = FakeService::new();
    let client = SignupClient::connect(&spawn_service(fake.clone()).await).expect("client");
    let mut rx = client.subscribe_events();
    let mut page = PageState::default();
    let now = Instant::now();

    client.load_roster().await.expect("load");
    apply_pending(&mut page, &mut rx, now);
    let control = page.cards()[0]
        .removal_controls()
        .next()
        .cloned()
        .expect("control");

    client
        .unregister(&control.activity, &control.email)
        .await
        .expect("first removal");
    client
        .unregister(&control.activity, &control.email)
        .await
        .expect_err("already removed");
    apply_pending(&mut page, &mut rx, now);

    assert_eq!(
        page.alert.as_deref(),
        Some("Student is not signed up for this activity")
    );
    assert!(participants(&page, "Chess Club").is_empty());
}

#[tokio::test]
async fn unreachable_service_on_unregister_alerts_without_refetch() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = SignupClient::connect(&format!("http://{addr}")).expect("client");
    let mut rx = client.subscribe_events();
    let mut page = PageState::default();

    client
        .unregister("Chess Club", "a@x.com")
        .await
        .expect_err("network unavailable");
    let applied = apply_pending(&mut page, &mut rx, Instant::now());

    assert_eq!(applied, 1);
    assert_eq!(page.alert.as_deref(), Some(UNREGISTER_FAILED_MESSAGE));
    assert_eq!(page.activities, ActivitiesRegion::Loading);
}
