mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Event, Harness, ProbeBehavior};
use tokio::sync::Notify;
use vitrine_engine::coords::SurfaceSize;
use vitrine_engine::surface::RenderSurface;
use vitrine_gallery::{NavigateError, Route, SceneState, Transition};

#[tokio::test(start_paused = true)]
async fn first_navigation_installs_and_draws() {
    let h = Harness::new();
    assert_eq!(h.director.active_route(), None);

    let t = h.director.navigate(Some("#/galaxy")).await.unwrap();

    assert!(t.is_installed());
    assert_eq!(t.route(), Route::Galaxy);
    assert_eq!(h.director.active_route(), Some(Route::Galaxy));
    assert_eq!(h.director.active_state(), Some(SceneState::Running));
    assert!(h.surface.draw_count() >= 1);
    assert_eq!(*h.director.watch_active().borrow(), Some(Route::Galaxy));
}

#[tokio::test(start_paused = true)]
async fn old_scene_is_stopped_and_disposed_before_new_one_starts() {
    let h = Harness::new();
    h.director.navigate(Some("#/galaxy")).await.unwrap();
    h.director.navigate(Some("#/wave")).await.unwrap();

    let galaxy = h.journal.constructed(Route::Galaxy)[0];
    let wave = h.journal.constructed(Route::Wave)[0];
    assert_eq!(
        h.journal.events(),
        vec![
            Event::Constructed(galaxy, Route::Galaxy),
            Event::Started(galaxy),
            Event::Constructed(wave, Route::Wave),
            Event::Stopped(galaxy),
            Event::Disposed(galaxy),
            Event::Started(wave),
        ]
    );
    assert_eq!(h.director.active_route(), Some(Route::Wave));
    assert_eq!(h.journal.max_running(), 1);
}

#[tokio::test(start_paused = true)]
async fn unknown_empty_and_absent_tokens_all_land_on_galaxy() {
    let h = Harness::new();

    for token in [None, Some(""), Some("#/doesnotexist"), Some("  #/galaxy  ")] {
        let t = h.director.navigate(token).await.unwrap();
        assert_eq!(t.route(), Route::Galaxy, "token {token:?}");
    }
    assert_eq!(h.journal.constructed(Route::Galaxy).len(), 4);
    assert_eq!(h.journal.running_now(), 1);
}

#[tokio::test(start_paused = true)]
async fn navigation_completing_late_is_disposed_without_starting() {
    let gate = Arc::new(Notify::new());
    let wave_gate = gate.clone();
    let h = Harness::with_behavior(move |route| ProbeBehavior {
        construct_gate: (route == Route::Wave).then(|| wave_gate.clone()),
        ..ProbeBehavior::default()
    });

    let director = h.director.clone();
    let slow = tokio::spawn(async move { director.navigate(Some("#/wave")).await });
    tokio::task::yield_now().await;

    let fast = h.director.navigate(Some("#/instanced")).await.unwrap();
    assert!(fast.is_installed());

    gate.notify_one();
    let slow = slow.await.unwrap().unwrap();

    assert!(matches!(slow, Transition::Superseded { route: Route::Wave, .. }));
    let wave = h.journal.constructed(Route::Wave)[0];
    assert_eq!(h.journal.count(&Event::Started(wave)), 0);
    assert_eq!(h.journal.count(&Event::Disposed(wave)), 1);
    assert_eq!(h.director.active_route(), Some(Route::Instanced));
    assert_eq!(h.journal.max_running(), 1);
}

#[tokio::test(start_paused = true)]
async fn navigation_stale_after_loading_skips_construction() {
    let gate = Arc::new(Notify::new());
    let wave_gate = gate.clone();
    let h = Harness::with_behavior(move |route| ProbeBehavior {
        load_gate: (route == Route::Wave).then(|| wave_gate.clone()),
        ..ProbeBehavior::default()
    });

    let director = h.director.clone();
    let slow = tokio::spawn(async move { director.navigate(Some("#/wave")).await });
    tokio::task::yield_now().await;

    h.director.navigate(Some("#/raymarch")).await.unwrap();
    gate.notify_one();
    let slow = slow.await.unwrap().unwrap();

    assert!(!slow.is_installed());
    assert!(h.journal.constructed(Route::Wave).is_empty());
    assert_eq!(h.director.active_route(), Some(Route::Raymarch));
}

#[tokio::test(start_paused = true)]
async fn burst_of_navigations_keeps_one_scene_running() {
    let h = Harness::new();
    let tokens = ["#/wave", "#/galaxy", "#/raymarch", "#/instanced", "#/wave", "#/raymarch"];

    let mut tasks = Vec::new();
    for token in tokens {
        let director = h.director.clone();
        tasks.push(tokio::spawn(async move { director.navigate(Some(token)).await }));
    }
    let mut installed = 0;
    for task in tasks {
        if task.await.unwrap().unwrap().is_installed() {
            installed += 1;
        }
    }

    assert!(installed >= 1);
    assert_eq!(h.journal.max_running(), 1);
    assert_eq!(h.journal.running_now(), 1);
    assert_eq!(h.director.active_route(), Some(Route::Raymarch));

    // Everything built except the active scene has been disposed exactly once.
    let events = h.journal.events();
    let built: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            Event::Constructed(id, _) => Some(*id),
            _ => None,
        })
        .collect();
    let disposed_once = built
        .iter()
        .filter(|id| h.journal.count(&Event::Disposed(**id)) == 1)
        .count();
    assert_eq!(disposed_once, built.len() - 1);
}

#[tokio::test(start_paused = true)]
async fn construction_failure_keeps_previous_scene_running() {
    let h = Harness::with_behavior(|route| ProbeBehavior {
        fail_construct: route == Route::Raymarch,
        ..ProbeBehavior::default()
    });
    h.director.navigate(Some("#/galaxy")).await.unwrap();

    let err = h.director.navigate(Some("#/raymarch")).await.unwrap_err();

    assert!(matches!(err, NavigateError::Construct { route: Route::Raymarch, .. }));
    assert_eq!(err.route(), Route::Raymarch);
    let galaxy = h.journal.constructed(Route::Galaxy)[0];
    assert_eq!(h.journal.count(&Event::Stopped(galaxy)), 0);
    assert_eq!(h.journal.count(&Event::Disposed(galaxy)), 0);
    assert_eq!(h.director.active_route(), Some(Route::Galaxy));
    assert_eq!(h.director.active_state(), Some(SceneState::Running));
}

#[tokio::test(start_paused = true)]
async fn load_failure_is_reported_and_changes_nothing() {
    let h = Harness::with_behavior(|route| ProbeBehavior {
        fail_load: route == Route::Wave,
        ..ProbeBehavior::default()
    });
    h.director.navigate(Some("#/instanced")).await.unwrap();

    let err = h.director.navigate(Some("#/wave")).await.unwrap_err();

    assert!(matches!(err, NavigateError::Load { route: Route::Wave, .. }));
    assert!(h.journal.constructed(Route::Wave).is_empty());
    assert_eq!(h.director.active_route(), Some(Route::Instanced));
    assert_eq!(h.journal.running_now(), 1);
}

#[tokio::test(start_paused = true)]
async fn teardown_errors_and_panics_do_not_block_the_next_scene() {
    let h = Harness::with_behavior(|route| ProbeBehavior {
        fail_stop: route == Route::Galaxy,
        panic_on_dispose: route == Route::Galaxy,
        ..ProbeBehavior::default()
    });
    h.director.navigate(Some("#/galaxy")).await.unwrap();

    let t = h.director.navigate(Some("#/wave")).await.unwrap();

    assert!(t.is_installed());
    let galaxy = h.journal.constructed(Route::Galaxy)[0];
    assert_eq!(h.journal.count(&Event::Stopped(galaxy)), 1);
    assert_eq!(h.journal.count(&Event::Disposed(galaxy)), 1);
    assert_eq!(h.director.active_state(), Some(SceneState::Running));
    assert_eq!(h.journal.running_now(), 1);
}

#[tokio::test(start_paused = true)]
async fn start_failure_leaves_nothing_active() {
    let h = Harness::with_behavior(|route| ProbeBehavior {
        fail_start: route == Route::Wave,
        ..ProbeBehavior::default()
    });
    h.director.navigate(Some("#/galaxy")).await.unwrap();
    let mut active = h.director.watch_active();

    let err = h.director.navigate(Some("#/wave")).await.unwrap_err();

    assert!(matches!(err, NavigateError::Start { route: Route::Wave, .. }));
    assert_eq!(h.director.active_route(), None);
    assert!(active.has_changed().unwrap());
    assert_eq!(*active.borrow_and_update(), None);
    let wave = h.journal.constructed(Route::Wave)[0];
    assert_eq!(h.journal.count(&Event::Disposed(wave)), 1);
    assert_eq!(h.journal.running_now(), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_retires_active_scene_once() {
    let h = Harness::new();
    h.director.navigate(Some("#/instanced")).await.unwrap();

    assert!(h.director.shutdown());
    assert!(!h.director.shutdown());

    let id = h.journal.constructed(Route::Instanced)[0];
    assert_eq!(h.journal.count(&Event::Disposed(id)), 1);
    assert_eq!(h.director.active_route(), None);
    assert_eq!(*h.director.watch_active().borrow(), None);
    assert_eq!(h.journal.running_now(), 0);
}

#[tokio::test(start_paused = true)]
async fn builtin_scenes_release_resources_and_listeners_between_routes() {
    let h = Harness::builtin();
    let ledger = h.surface.resources().clone();
    // The surface provider keeps its own resize listener.
    assert_eq!(h.container.resize_listener_count(), 1);

    h.director.navigate(Some("#/galaxy")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(h.surface.draw_count() > 1);
    assert_eq!(ledger.live(), 3);
    assert_eq!(h.container.resize_listener_count(), 2);
    assert_eq!(h.container.pointer_listener_count(), 1);

    h.director.navigate(Some("#/raymarch")).await.unwrap();
    assert_eq!(ledger.live(), 3);
    assert_eq!(h.container.resize_listener_count(), 2);
    assert_eq!(h.container.pointer_listener_count(), 0);

    h.container.resize(SurfaceSize::new(320, 320));
    assert_eq!(h.surface.current_size(), SurfaceSize::new(320, 320));

    h.director.shutdown();
    assert_eq!(ledger.live(), 0);
    assert_eq!(h.container.resize_listener_count(), 1);
    assert_eq!(h.container.pointer_listener_count(), 0);

    let drawn = h.surface.draw_count();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(h.surface.draw_count(), drawn);
}

#[test]
fn begun_navigations_keep_call_order_across_worker_threads() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .unwrap();

    for _ in 0..200 {
        let h = Harness::new();
        let earlier = h.director.begin(Some("#/wave"));
        let later = h.director.begin(Some("#/instanced"));
        assert!(earlier.ticket() < later.ticket());

        let director = h.director.clone();
        let earlier = runtime.spawn(async move { director.complete(earlier).await });
        let director = h.director.clone();
        let later = runtime.spawn(async move { director.complete(later).await });

        let (earlier, later) = runtime.block_on(async { (earlier.await, later.await) });
        assert!(!earlier.unwrap().unwrap().is_installed());
        assert!(later.unwrap().unwrap().is_installed());
        assert_eq!(h.director.active_route(), Some(Route::Instanced));
        assert_eq!(h.journal.max_running(), 1);
    }
}
