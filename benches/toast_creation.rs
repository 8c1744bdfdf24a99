// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for toast creation and expiry.
//!
//! Measures the performance of:
//! - Showing toasts (merge, element construction, container lookup)
//! - Expiring a batch of toasts through the virtual event loop

use bulma_toast::config::{Animation, Position, ToastOptions};
use bulma_toast::dom::Document;
use bulma_toast::notifications::ToastService;
use bulma_toast::runtime::{Runtime, VirtualLoop};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_show(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_creation");

    group.bench_function("show_plain", |b| {
        let event_loop = VirtualLoop::new();
        let service = ToastService::new(Document::new(), Runtime::from_virtual(&event_loop));
        b.iter(|| {
            let toast = service.toast(ToastOptions::new("Saved")).unwrap();
            black_box(&toast);
            toast.dismiss();
        });
    });

    group.bench_function("show_markup_animated_dismissible", |b| {
        let event_loop = VirtualLoop::new();
        let service = ToastService::new(Document::new(), Runtime::from_virtual(&event_loop));
        let options = ToastOptions::new("<strong>Saved</strong> to <em>disk</em>")
            .with_dismissible(true)
            .with_position(Position::BottomCenter)
            .with_animation(Animation::new("fadeIn", "fadeOut"));
        b.iter(|| {
            black_box(service.toast(options.clone()).unwrap());
        });
    });

    group.finish();
}

fn bench_expire_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("toast_creation");

    group.bench_function("expire_100", |b| {
        b.iter(|| {
            let event_loop = VirtualLoop::new();
            let service = ToastService::new(Document::new(), Runtime::from_virtual(&event_loop));
            for i in 0..100u64 {
                service
                    .toast(ToastOptions::new("tick").with_duration(i * 10))
                    .unwrap();
            }
            black_box(event_loop.run_until_idle());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_show, bench_expire_batch);
criterion_main!(benches);
