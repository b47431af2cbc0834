use mediaload_pwa::objects::{
    job_registry::{Effect, JobRegistry, PollOutcome},
    job_view::JobViews,
    JobState, StatusResponse,
};

fn status(json: &str) -> PollOutcome {
    PollOutcome::Status(serde_json::from_str::<StatusResponse>(json).unwrap())
}

fn poll(registry: &mut JobRegistry, id: &str, json: &str) -> Vec<Effect> {
    let seq = registry.issue_poll(id).unwrap();

    registry.apply(id, seq, status(json))
}

fn render_views(effects: &[Effect], views: &mut JobViews) {
    for effect in effects {
        if let Effect::Render(job) = effect {
            views.upsert(job);
        }
    }
}

#[test]
fn job_runs_from_start_to_completion() {
    let mut registry = JobRegistry::new(true);
    let mut views = JobViews::default();
    let mut effects = Vec::new();

    let job = registry.start("abc123", "My Video").unwrap();
    views.upsert(&job);

    let mut labels = Vec::new();
    for json in [
        r#"{"status": "downloading", "progress": 10, "speed": "1.2MiB/s", "eta": "00:30"}"#,
        r#"{"status": "downloading", "progress": "55%"}"#,
        r#"{"status": "completed", "progress": 100, "title": "My Video"}"#,
    ] {
        let step = poll(&mut registry, "abc123", json);

        render_views(&step, &mut views);
        labels.push(views.rows()[0].percent_label.clone());
        effects.extend(step);
    }

    assert_eq!(labels, vec!["10%", "55%", "Completed!"]);
    assert_eq!(
        effects.iter().filter(|e| matches!(e, Effect::Render(_))).count(),
        3
    );
    assert_eq!(
        effects.iter().filter(|e| **e == Effect::RefreshLibrary).count(),
        1
    );
    assert_eq!(
        effects
            .iter()
            .filter(|e| matches!(e, Effect::NotifySuccess { title, .. } if title == "My Video"))
            .count(),
        1
    );
    assert!(effects.contains(&Effect::StopPolling("abc123".into())));
    assert!(effects.contains(&Effect::ScheduleRemoval("abc123".into())));
    assert_eq!(registry.issue_poll("abc123"), None);

    registry.purge("abc123");
    views.remove("abc123");
    assert!(registry.is_empty());
    assert!(views.is_empty());
}

#[test]
fn unknown_job_fails_without_refreshing_the_library() {
    let mut registry = JobRegistry::new(true);
    registry.start("gone", "Lost clip");

    let effects = poll(&mut registry, "gone", r#"{"status": "not_found"}"#);

    assert!(!effects.contains(&Effect::RefreshLibrary));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::NotifySuccess { .. })));
    assert!(effects.contains(&Effect::StopPolling("gone".into())));
    assert_eq!(registry.get("gone").unwrap().state, JobState::NotFound);
    assert!(!registry.is_polling("gone"));
}

#[test]
fn second_start_for_same_id_is_ignored() {
    let mut registry = JobRegistry::new(true);

    assert!(registry.start("dup", "First").is_some());
    assert!(registry.start("dup", "Second").is_none());
    assert_eq!(registry.jobs().len(), 1);
    assert_eq!(registry.jobs()[0].title, "First");
}

#[test]
fn lost_connection_is_terminal() {
    let mut registry = JobRegistry::new(true);
    let mut views = JobViews::default();
    registry.start("net", "Clip");

    let seq = registry.issue_poll("net").unwrap();
    let effects = registry.apply("net", seq, PollOutcome::Unreachable("offline".into()));
    render_views(&effects, &mut views);

    assert_eq!(views.rows()[0].percent_label, "Connection lost");
    assert!(views.rows()[0].is_failure());
    assert_eq!(registry.issue_poll("net"), None);
}
