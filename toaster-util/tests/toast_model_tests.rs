//! Integration tests for the toast data model as seen by a presentation layer

use std::time::Duration;
use toaster_util::{
    Content, Position, RichContent, Toast, ToastAction, ToastId, ToastKind, ToastOptions,
    ToastPatch, ToasterConfig, group_by_position,
};

fn config() -> ToasterConfig {
    ToasterConfig {
        default_position: Position::BottomCenter,
        ..ToasterConfig::default()
    }
}

#[test]
fn test_options_from_partial_json() {
    // Requests coming from another process only carry what they override
    let options: ToastOptions =
        serde_json::from_str(r#"{"kind":"warning","position":"top-left"}"#).unwrap();
    let toast = Toast::new(ToastId(1), "Low battery".into(), options, &config());

    assert_eq!(toast.kind, ToastKind::Warning);
    assert_eq!(toast.position, Position::TopLeft);
    assert_eq!(toast.duration, Duration::from_millis(3000));
    assert!(toast.actions.is_empty());
    assert!(toast.expires());
}

#[test]
fn test_toast_survives_json_transport() {
    let options = ToastOptions::new()
        .kind(ToastKind::Info)
        .action(ToastAction::new("open", "Open"))
        .persistent();
    let content = RichContent::new("Download finished", "report.pdf").with_progress(100);
    let toast = Toast::new(ToastId(9), content.into(), options, &config());

    let json = serde_json::to_string(&toast).unwrap();
    let back: Toast = serde_json::from_str(&json).unwrap();

    assert_eq!(back, toast);
    assert!(!back.expires());
}

#[test]
fn test_loading_toast_turns_into_result() {
    let options = ToastOptions::new().kind(ToastKind::Loading).loading(true).persistent();
    let mut toast = Toast::new(ToastId(3), "Uploading...".into(), options, &config());
    assert!(!toast.expires());

    ToastPatch::new()
        .content("Uploaded")
        .kind(ToastKind::Success)
        .loading(false)
        .duration(Duration::from_secs(2))
        .apply(&mut toast);

    assert_eq!(toast.content, Content::from("Uploaded"));
    assert_eq!(toast.kind, ToastKind::Success);
    assert!(toast.expires());
    assert_eq!(toast.position, Position::BottomCenter);
}

#[test]
fn test_groups_follow_position_order() {
    let config = config();
    let toasts: Vec<Toast> = [
        (1, Position::BottomRight),
        (2, Position::TopLeft),
        (3, Position::BottomRight),
    ]
    .into_iter()
    .map(|(id, position)| {
        Toast::new(
            ToastId(id),
            format!("toast {id}").into(),
            ToastOptions::new().position(position),
            &config,
        )
    })
    .collect();

    let groups = group_by_position(&toasts);
    let positions: Vec<Position> = groups.iter().map(|g| g.position).collect();

    assert_eq!(positions, vec![Position::TopLeft, Position::BottomRight]);
    assert_eq!(groups[1].count(), 2);
    assert_eq!(groups[1].newest().map(|t| t.id), Some(ToastId(3)));
}
