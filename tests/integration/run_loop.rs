use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use signal_hook::{consts::SIGTERM, iterator::Signals, low_level};
use svckit::{
    descriptor::ServiceDescriptor,
    error::ServiceError,
    service::{HookError, ProgramFn, ServiceManager},
    systemd::Systemd,
};

fn counting_stop(stops: Arc<AtomicUsize>) -> impl FnMut() -> Result<(), HookError> {
    move || {
        stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// The blocking wait is allowed at most once per process, so this test
// owns both halves: one run that consumes a synthetic SIGTERM, then a
// second run that must return without waiting.
#[test]
fn blocking_run_consumes_one_signal_then_never_waits_again() {
    // Installs the process-wide SIGTERM handler up front so a raise can
    // never hit the default disposition, whatever the thread timing.
    let _keepalive = Signals::new([SIGTERM]).expect("failed to register keepalive");

    let stops = Arc::new(AtomicUsize::new(0));
    let program = ProgramFn::new(|| Ok(()), counting_stop(Arc::clone(&stops)));
    let mut manager = Systemd::new(program, ServiceDescriptor::new("wait-demo"));

    let done = Arc::new(AtomicBool::new(false));
    let raiser = thread::spawn({
        let done = Arc::clone(&done);
        move || {
            while !done.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(100));
                low_level::raise(SIGTERM).expect("failed to raise SIGTERM");
            }
        }
    });

    manager.run().expect("run failed");
    done.store(true, Ordering::SeqCst);
    raiser.join().expect("raiser panicked");
    assert_eq!(stops.load(Ordering::SeqCst), 1);

    let stops = Arc::new(AtomicUsize::new(0));
    let program = ProgramFn::new(|| Ok(()), counting_stop(Arc::clone(&stops)));
    let mut manager = Systemd::new(program, ServiceDescriptor::new("wait-demo"));

    let started = Instant::now();
    manager.run().expect("second run failed");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[test]
fn non_blocking_run_needs_no_signal() {
    let stops = Arc::new(AtomicUsize::new(0));
    let mut descriptor = ServiceDescriptor::new("nowait-demo");
    descriptor.options.run_wait = false;
    let program = ProgramFn::new(|| Ok(()), counting_stop(Arc::clone(&stops)));
    let mut manager = Systemd::new(program, descriptor);

    manager.run().expect("run failed");
    assert_eq!(stops.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_start_aborts_before_the_signal_wait() {
    let stops = Arc::new(AtomicUsize::new(0));
    let program = ProgramFn::new(|| Err("port in use".into()), counting_stop(Arc::clone(&stops)));
    let mut manager = Systemd::new(program, ServiceDescriptor::new("abort-demo"));

    let started = Instant::now();
    let err = manager.run().expect_err("run should fail");

    assert!(matches!(err, ServiceError::StartHook { .. }));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(stops.load(Ordering::SeqCst), 0);
}
