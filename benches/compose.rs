use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use snapview::friends::{FriendsApp, FriendsEvent, FriendsState};
use snapview::{App, AnyStorage, Emitter, MemoryRenderer, MountTarget, Runtime, UnsyncStorage};

fn compose_friends(count: usize) {
    let owner = UnsyncStorage::owner();
    let emitter = Emitter::new_in(&owner, |_: FriendsEvent| {});
    let app = FriendsApp::new("Cody", (0..count).map(|i| format!("Friend {}", i)));
    let state: FriendsState = app.init();
    black_box(app.compose(&state, emitter));
}

fn commit_friends(count: usize) {
    let runtime = Runtime::mount(
        FriendsApp::default(),
        MountTarget::default(),
        MemoryRenderer::new(),
    );
    for i in 0..count {
        runtime.dispatch(FriendsEvent::UpdateText(format!("Friend {}", i)));
        runtime.dispatch(FriendsEvent::CommitNewFriend);
    }
    black_box(runtime.snapshot());
}

fn criterion_benchmark(c: &mut Criterion) {
    for count in [100, 1000, 5000, 10000] {
        c.bench_function(&format!("compose {}", count), |b| {
            b.iter(|| compose_friends(black_box(count)))
        });
    }
    for count in [10, 100, 500] {
        c.bench_function(&format!("commit {}", count), |b| {
            b.iter(|| commit_friends(black_box(count)))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
