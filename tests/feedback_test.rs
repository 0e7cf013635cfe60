//! Feedback submission: landmark loading, ordering of the two phases,
//! retries after a metadata failure

mod support;

use geogenie::api::UploadReceipt;
use geogenie::error::GeoError;
use geogenie::flows::{FeedbackFlow, FeedbackForm, FeedbackOutcome, ScreenScope};
use geogenie_common::{FeedbackMeta, NoticeLevel, Suggestion};
use serde_json::{json, Value};
use std::time::Duration;
use support::{photo, server_error, Call, FakeApi};

fn filled_form() -> FeedbackForm {
    let mut form = FeedbackForm::new();
    form.set_known_landmarks(vec!["Golden Temple".into(), "Lotus Temple".into()]);
    form.set_image(Some(photo("temple.jpg")));
    form.set_search("golden");
    form.select("Golden Temple");
    form
}

#[tokio::test]
async fn test_load_landmarks_fills_autocomplete() {
    let api = FakeApi::new();
    api.push_folders(Ok(vec!["Hampi".into(), "Hawa Mahal".into(), "Qutub Minar".into()]));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = FeedbackForm::new();

    assert_eq!(flow.load_landmarks(&mut form).await.unwrap(), 3);

    form.set_search("ha");
    assert_eq!(
        form.suggestion(),
        Suggestion::Dropdown(vec!["Hampi".into(), "Hawa Mahal".into()])
    );
}

#[tokio::test]
async fn test_load_landmarks_failure_leaves_list_empty() {
    let api = FakeApi::new();
    api.push_folders(Err(server_error()));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = FeedbackForm::new();

    assert!(flow.load_landmarks(&mut form).await.is_err());
    assert!(form.known_landmarks().is_empty());
}

#[tokio::test]
async fn test_submit_uploads_then_attaches_metadata() {
    let api = FakeApi::new();
    api.push_upload(Ok(UploadReceipt::with_id("img-42")));
    api.push_meta(Ok(json!({ "status": "ok" })));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = filled_form();
    form.set_description("North gate at dusk");
    form.set_latitude("31.619980");
    form.set_longitude("74.876485");

    let outcome = flow.submit(&mut form).await;

    let FeedbackOutcome::Submitted { image_id, notice } = outcome else {
        panic!("expected success, got {:?}", outcome);
    };
    assert_eq!(image_id, "img-42");
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(
        api.calls(),
        vec![
            Call::UploadImage("temple.jpg".into()),
            Call::UpdateMeta(FeedbackMeta {
                image_id: "img-42".into(),
                landmark_name: "Golden Temple".into(),
                description: Some("North gate at dusk".into()),
                latitude: Some("31.619980".into()),
                longitude: Some("74.876485".into()),
            }),
        ]
    );
}

#[tokio::test]
async fn test_success_resets_form() {
    let api = FakeApi::new();
    api.push_upload(Ok(UploadReceipt::with_id("7")));
    api.push_meta(Ok(Value::Null));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = filled_form();
    form.set_description("something");

    assert!(flow.submit(&mut form).await.is_submitted());

    assert!(form.image().is_none());
    assert!(form.selected().is_none());
    assert_eq!(form.search(), "");
    assert_eq!(form.description(), "");
    assert_eq!(form.coordinates(), ("", ""));
    assert!(form.uploaded_image_id().is_none());
    assert_eq!(form.known_landmarks().len(), 2);
    assert!(!form.is_loading());
    assert!(form.take_scroll_request());
}

#[tokio::test]
async fn test_missing_fields_rejected_without_request() {
    let api = FakeApi::new();
    let flow = FeedbackFlow::new(&api, ScreenScope::new());

    let mut no_landmark = FeedbackForm::new();
    no_landmark.set_image(Some(photo("a.jpg")));
    let outcome = flow.submit(&mut no_landmark).await;
    assert_eq!(
        outcome.notice().map(|n| n.text.as_str()),
        Some("Photo + place required!")
    );

    let mut no_image = FeedbackForm::new();
    no_image.select("Hampi");
    assert!(matches!(flow.submit(&mut no_image).await, FeedbackOutcome::Rejected(_)));

    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_no_metadata_call_without_image_id() {
    let api = FakeApi::new();
    api.push_upload(Ok(UploadReceipt::from_payload(json!({ "status": "stored" }))));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = filled_form();

    let outcome = flow.submit(&mut form).await;

    assert!(matches!(
        outcome,
        FeedbackOutcome::UploadFailed { error: GeoError::MissingField("image_id"), .. }
    ));
    assert_eq!(
        outcome.notice().map(|n| n.text.as_str()),
        Some("Failed to submit feedback.")
    );
    assert_eq!(api.calls(), vec![Call::UploadImage("temple.jpg".into())]);
    assert_eq!(form.selected(), Some("Golden Temple"));
    assert!(form.image().is_some());
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_upload_failure_keeps_form() {
    let api = FakeApi::new();
    api.push_upload(Err(server_error()));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = filled_form();

    let outcome = flow.submit(&mut form).await;

    assert!(matches!(outcome, FeedbackOutcome::UploadFailed { .. }));
    assert_eq!(api.calls().len(), 1);
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_metadata_retry_reuses_uploaded_image() {
    let api = FakeApi::new();
    api.push_upload(Ok(UploadReceipt::with_id("img-9")));
    api.push_meta(Err(server_error()));
    api.push_meta(Ok(Value::Null));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = filled_form();

    let first = flow.submit(&mut form).await;
    let FeedbackOutcome::MetadataFailed { image_id, notice, .. } = &first else {
        panic!("expected metadata failure, got {:?}", first);
    };
    assert_eq!(image_id, "img-9");
    assert_eq!(notice.text, "Failed to submit feedback.");
    assert_eq!(form.uploaded_image_id(), Some("img-9"));

    let second = flow.submit(&mut form).await;
    assert!(second.is_submitted());

    let uploads = api
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::UploadImage(_)))
        .count();
    assert_eq!(uploads, 1);
    assert_eq!(api.calls().len(), 3);
}

#[tokio::test]
async fn test_resume_upload_skips_image_phase() {
    let api = FakeApi::new();
    api.push_meta(Ok(Value::Null));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = FeedbackForm::new();
    form.resume_upload("orphan-3");
    form.set_search("Stepwell of Adalaj");
    assert!(form.use_new_landmark());

    let outcome = flow.submit(&mut form).await;

    assert!(outcome.is_submitted());
    assert_eq!(
        api.calls(),
        vec![Call::UpdateMeta(FeedbackMeta {
            image_id: "orphan-3".into(),
            landmark_name: "Stepwell of Adalaj".into(),
            ..Default::default()
        })]
    );
}

#[tokio::test]
async fn test_cancelled_submit_changes_nothing() {
    let api = FakeApi::hanging();
    let scope = ScreenScope::new();
    let token = scope.token();
    let flow = FeedbackFlow::new(&api, scope);
    let mut form = filled_form();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        token.cancel();
    });
    let outcome = flow.submit(&mut form).await;

    assert!(matches!(outcome, FeedbackOutcome::Cancelled));
    assert!(outcome.notice().is_none());
    assert_eq!(form.selected(), Some("Golden Temple"));
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_locate_without_photo_reports_permission_denied() {
    let api = FakeApi::new();
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = FeedbackForm::new();

    let notice = flow.locate_from_photo(&mut form).unwrap_err();
    assert_eq!(notice.text, "Permission denied.");
    assert_eq!(form.coordinates(), ("", ""));
}

#[tokio::test]
async fn test_locate_from_photo_without_gps() {
    let api = FakeApi::new();
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = FeedbackForm::new();
    form.set_image(Some(photo("no-such-file.jpg")));
    form.set_latitude("1.0");

    let notice = flow.locate_from_photo(&mut form).unwrap_err();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(form.coordinates(), ("1.0", ""));
}

#[tokio::test]
async fn test_resumed_upload_with_photo_sends_only_metadata() {
    let api = FakeApi::new();
    api.push_meta(Ok(Value::Null));
    let flow = FeedbackFlow::new(&api, ScreenScope::new());
    let mut form = FeedbackForm::new();
    form.resume_upload("orphan-3");
    form.set_image(Some(photo("temple.jpg")));
    form.select("Golden Temple");

    assert_eq!(form.uploaded_image_id(), Some("orphan-3"));
    assert!(flow.submit(&mut form).await.is_submitted());
    assert_eq!(
        api.calls(),
        vec![Call::UpdateMeta(FeedbackMeta {
            image_id: "orphan-3".into(),
            landmark_name: "Golden Temple".into(),
            ..Default::default()
        })]
    );
}
