mod common;

use anyhow::Result;
use testserver_client::models::{AssertionStatus, ExecutionStatus};
use testserver_client::recipe::{get_request, new_test_recipe};

use common::{report, report_with_steps, step, TestHarness};

#[tokio::test]
async fn test_result_accessors_over_a_polled_execution() -> Result<()> {
    let harness = TestHarness::new();
    harness
        .server
        .enqueue_submit_report(report("exec-1", ExecutionStatus::Running))
        .await;
    harness
        .server
        .push_status_report(
            "exec-1",
            report_with_steps(
                "exec-1",
                ExecutionStatus::Finished,
                vec![
                    step("Step1", AssertionStatus::Passed, &[]),
                    step("step1", AssertionStatus::Failed, &["wrong status code"]),
                    step("STEP1", AssertionStatus::Passed, &[]),
                    step("Step2", AssertionStatus::Failed, &["timeout"]),
                ],
            ),
        )
        .await;

    let recipe = new_test_recipe()
        .add_step(get_request("http://example.com").named("Step1"))
        .build();
    let execution = harness
        .executor
        .submit_recipe(&recipe)
        .await?
        .expect("submission should succeed");
    harness.wait_for_terminal(&execution).await;

    let result = execution.result();
    assert_eq!(result.execution_id(), "exec-1");
    assert_eq!(result.status(), ExecutionStatus::Finished);
    assert_eq!(result.result_count(), 4);

    let first = result.first_test_step_result("Step1").unwrap();
    assert_eq!(first.test_step_name, "Step1");
    let last = result.last_test_step_result("Step1").unwrap();
    assert_eq!(last.test_step_name, "STEP1");

    let failed: Vec<_> = result
        .failed_test_steps_results()
        .iter()
        .map(|r| r.test_step_name.as_str())
        .collect();
    assert_eq!(failed, vec!["step1", "Step2"]);

    assert_eq!(result.error_messages(), vec!["wrong status code", "timeout"]);
    Ok(())
}
