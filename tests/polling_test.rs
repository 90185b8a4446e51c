mod common;

use std::time::Duration;

use anyhow::Result;
use testserver_client::models::ExecutionStatus;
use testserver_client::recipe::{get_request, new_test_recipe};
use testserver_client::PollingState;

use common::{report, ListenerEvent, TestHarness};

fn simple_recipe() -> testserver_client::models::TestRecipe {
    new_test_recipe()
        .add_step(get_request("http://example.com/ping").named("Ping"))
        .build()
}

#[tokio::test(start_paused = true)]
async fn test_polling_stops_within_one_tick_of_terminal_status() -> Result<()> {
    let harness = TestHarness::with_poll_interval(Duration::from_secs(1));
    harness
        .server
        .enqueue_submit_report(report("exec-1", ExecutionStatus::Running))
        .await;
    // First tick still running, second tick finished
    harness
        .server
        .push_status_report("exec-1", report("exec-1", ExecutionStatus::Running))
        .await;
    harness
        .server
        .push_status_report("exec-1", report("exec-1", ExecutionStatus::Finished))
        .await;

    let start = tokio::time::Instant::now();
    let execution = harness
        .executor
        .submit_recipe(&simple_recipe())
        .await?
        .expect("submission should succeed");
    harness.wait_for_terminal(&execution).await;

    assert_eq!(execution.polling_state(), PollingState::Finished);
    // The terminal report became available at the second tick (t = 1s);
    // polling must stop within one further tick
    assert!(tokio::time::Instant::now() - start <= Duration::from_secs(2));
    Ok(())
}

#[tokio::test]
async fn test_polling_abandons_after_four_consecutive_errors() -> Result<()> {
    let harness = TestHarness::new();
    harness
        .server
        .enqueue_submit_report(report("exec-1", ExecutionStatus::Running))
        .await;
    for _ in 0..4 {
        harness.server.push_status_error("exec-1", "bad gateway").await;
    }

    let execution = harness
        .executor
        .submit_recipe(&simple_recipe())
        .await?
        .expect("submission should succeed");
    harness.wait_for_terminal(&execution).await;

    assert_eq!(execution.polling_state(), PollingState::Abandoned);
    // Only the initial report; failed fetches append nothing
    assert_eq!(execution.report_count(), 1);

    let events = harness.listener.events();
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, ListenerEvent::ExecutionFinished { .. })),
        "no finished notification may be emitted when polling is abandoned"
    );
    assert!(events
        .iter()
        .any(|e| matches!(e, ListenerEvent::ErrorOccurred { abandoned: true, .. })));
    Ok(())
}

#[tokio::test]
async fn test_three_errors_are_tolerated() -> Result<()> {
    let harness = TestHarness::new();
    harness
        .server
        .enqueue_submit_report(report("exec-1", ExecutionStatus::Running))
        .await;
    for _ in 0..3 {
        harness.server.push_status_error("exec-1", "bad gateway").await;
    }
    harness
        .server
        .push_status_report("exec-1", report("exec-1", ExecutionStatus::Finished))
        .await;

    let execution = harness
        .executor
        .submit_recipe(&simple_recipe())
        .await?
        .expect("submission should succeed");
    harness.wait_for_terminal(&execution).await;

    assert_eq!(execution.polling_state(), PollingState::Finished);
    assert_eq!(harness.listener.finished_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_error_counter_resets_on_successful_fetch() -> Result<()> {
    let harness = TestHarness::new();
    harness
        .server
        .enqueue_submit_report(report("exec-1", ExecutionStatus::Running))
        .await;
    // Three errors, a success, then three more errors: never four in a row
    for _ in 0..3 {
        harness.server.push_status_error("exec-1", "bad gateway").await;
    }
    harness
        .server
        .push_status_report("exec-1", report("exec-1", ExecutionStatus::Running))
        .await;
    for _ in 0..3 {
        harness.server.push_status_error("exec-1", "bad gateway").await;
    }
    harness
        .server
        .push_status_report("exec-1", report("exec-1", ExecutionStatus::Finished))
        .await;

    let execution = harness
        .executor
        .submit_recipe(&simple_recipe())
        .await?
        .expect("submission should succeed");
    harness.wait_for_terminal(&execution).await;

    assert_eq!(execution.polling_state(), PollingState::Finished);
    // Initial report plus the two successful fetches
    assert_eq!(execution.report_count(), 3);
    Ok(())
}

#[tokio::test]
async fn test_executions_poll_independently() -> Result<()> {
    let harness = TestHarness::new();

    harness
        .server
        .enqueue_submit_report(report("exec-1", ExecutionStatus::Running))
        .await;
    harness
        .server
        .push_status_report("exec-1", report("exec-1", ExecutionStatus::Finished))
        .await;

    harness
        .server
        .enqueue_submit_report(report("exec-2", ExecutionStatus::Running))
        .await;
    for _ in 0..4 {
        harness.server.push_status_error("exec-2", "bad gateway").await;
    }

    let first = harness
        .executor
        .submit_recipe(&simple_recipe())
        .await?
        .expect("submission should succeed");
    let second = harness
        .executor
        .submit_recipe(&simple_recipe())
        .await?
        .expect("submission should succeed");

    harness.wait_for_terminal(&first).await;
    harness.wait_for_terminal(&second).await;

    assert_eq!(first.polling_state(), PollingState::Finished);
    assert_eq!(second.polling_state(), PollingState::Abandoned);
    Ok(())
}
