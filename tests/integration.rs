// SPDX-License-Identifier: MPL-2.0
use bulma_toast::config::{self, Animation, Position, ToastOptions};
use bulma_toast::dom::{Document, Event};
use bulma_toast::error::Error;
use bulma_toast::notifications::ToastService;
use bulma_toast::runtime::{Runtime, VirtualLoop};
use std::rc::Rc;
use tempfile::tempdir;

fn service() -> (ToastService, Rc<VirtualLoop>) {
    let event_loop = VirtualLoop::new();
    let service = ToastService::new(Document::new(), Runtime::from_virtual(&event_loop));
    (service, event_loop)
}

#[test]
fn toast_requires_a_message_whatever_the_other_options() {
    let (service, _) = service();
    let variants = [
        ToastOptions::default(),
        ToastOptions::default().with_dismissible(true),
        ToastOptions::default().with_position(Position::Center).with_single(true),
        ToastOptions::default().with_animation(Animation::new("fadeIn", "fadeOut")),
    ];
    for options in variants {
        assert!(matches!(service.toast(options.clone()), Err(Error::MissingMessage)));
        assert!(service.toast(options.with_message("ok")).is_ok());
    }
}

#[test]
fn saved_example_renders_expected_markup() {
    let (service, event_loop) = service();
    service.toast(ToastOptions::new("Saved")).unwrap();

    assert_eq!(
        service.document().body_html(),
        concat!(
            r#"<body><div style="width:100%;z-index:99999;position:fixed;pointer-events:none;display:flex;"#,
            r#"flex-direction:column;padding:15px;right:0px;top:0px;text-align:right;align-items:flex-end;">"#,
            r#"<div class="notification" style="width:auto;pointer-events:auto;display:inline-flex;"#,
            r#"white-space:pre-wrap;opacity:1;padding: 1.25rem 1.5rem;">Saved</div></div></body>"#,
        )
    );

    event_loop.advance_ms(2000);
    assert_eq!(service.document().body_html(), "<body></body>");
}

#[test]
fn error_example_reuses_bottom_center_container() {
    let (service, _) = service();
    let options = ToastOptions::new("Error")
        .with_position(Position::BottomCenter)
        .with_dismissible(true);

    let first = service.toast(options.clone()).unwrap();
    let container = service.container(Position::BottomCenter).unwrap();
    let second = service.toast(options).unwrap();

    assert!(container.style().contains("bottom:0px;left:0;right:0;text-align:center;"));
    assert_eq!(service.container_count(), 1);
    assert_eq!(container.children(), vec![first.element(), second.element()]);
    for toast in [first, second] {
        assert!(toast.element().children()[0].has_class("delete"));
    }
}

#[test]
fn single_mode_keeps_exactly_one_toast() {
    let (service, _) = service();
    let options = ToastOptions::new("only").with_single(true);
    service.toast(options.clone()).unwrap();
    service.toast(options).unwrap();

    let container = service.container(Position::TopRight).unwrap();
    assert_eq!(container.child_element_count(), 1);
}

#[test]
fn hover_pause_extends_lifetime_by_paused_duration() {
    let (service, event_loop) = service();
    let toast = service
        .toast(ToastOptions::new("hover me").with_pause_on_hover(true))
        .unwrap();

    event_loop.advance_ms(800);
    toast.element().dispatch_event(&Event::mouse_enter());
    event_loop.advance_ms(3000);
    toast.element().dispatch_event(&Event::mouse_leave());

    event_loop.advance_ms(1199);
    assert!(!toast.is_removed());
    event_loop.advance_ms(1);
    assert!(toast.is_removed());
}

#[test]
fn reset_after_set_defaults_restores_builtin_values() {
    let (mut service, _) = service();
    service.set_defaults(
        ToastOptions::default()
            .with_duration(9000)
            .with_position(Position::TopLeft)
            .with_close_on_click(false),
    );
    service.reset_defaults();

    let toast = service.toast(ToastOptions::new("x")).unwrap();
    assert_eq!(toast.config().duration.as_millis(), 2000);
    assert_eq!(toast.config().position, Position::TopRight);
    assert!(toast.config().close_on_click);
}

#[test]
fn set_doc_moves_future_toasts_to_new_document() {
    let (mut service, _) = service();
    let old = service.document().clone();
    service.toast(ToastOptions::new("before")).unwrap();

    let new_doc = Document::new();
    service.set_doc(new_doc.clone());
    let toast = service.toast(ToastOptions::new("after")).unwrap();

    assert_eq!(old.body_html(), "<body></body>");
    assert!(new_doc.contains(&toast.element()));
}

#[test]
fn defaults_loaded_from_settings_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "duration = 500\nposition = \"bottom-left\"\nextraClasses = \"is-warning\"\n",
    )
    .expect("Failed to write settings");

    let (mut service, event_loop) = service();
    service.set_defaults(config::load_from_path(&path).expect("Failed to load settings"));
    let toast = service.toast(ToastOptions::new("from file")).unwrap();

    assert!(toast.element().has_class("is-warning"));
    assert!(service.container(Position::BottomLeft).is_some());
    event_loop.advance_ms(500);
    assert!(toast.is_removed());
}

#[tokio::test]
async fn tokio_runtime_dismisses_on_real_timers() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let service = ToastService::new(Document::new(), Runtime::tokio());
            let toast = service
                .toast(ToastOptions::new("quick").with_duration(10))
                .unwrap();
            assert!(!toast.is_removed());

            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            assert!(toast.is_removed());
            assert_eq!(service.container_count(), 0);
        })
        .await;
}
