//! Common test utilities for building workflow metadata.
use wfgraph::prelude::*;

/// Three unconditional activities and no branch points.
#[allow(dead_code)]
pub fn create_linear_workflow() -> WorkflowMetadata {
    let mut builder = WorkflowMetadata::builder("LinearWorkflow");
    builder
        .activity("withdrawFunds", 10, Guard::Always)
        .activity("depositFunds", 11, Guard::Always)
        .activity("sendReceipt", 12, Guard::Always);
    builder.finish().expect("valid linear workflow")
}

/// One activity followed by two independent decisions, each guarding one activity.
///
/// ```text
/// withdraw
/// if NeedToConvert: currencyConvert
/// if IsTFNKnown: notifyAto else takeNonResidentTax
/// deposit
/// ```
#[allow(dead_code)]
pub fn create_two_decision_workflow() -> WorkflowMetadata {
    let mut builder = WorkflowMetadata::builder("MoneyTransfer");
    builder.activity("withdraw", 10, Guard::Always);
    let convert = builder.decision("NeedToConvert", 12, Guard::Always);
    builder.activity("currencyConvert", 13, Guard::when(convert, true));
    let tfn = builder.decision("IsTFNKnown", 15, Guard::Always);
    builder.activity("notifyAto", 16, Guard::when(tfn, true));
    builder.activity("takeNonResidentTax", 18, Guard::when(tfn, false));
    builder.activity("deposit", 20, Guard::Always);
    builder.finish().expect("valid two-decision workflow")
}

/// A single activity and two decisions that guard nothing.
#[allow(dead_code)]
pub fn create_bare_decisions_workflow() -> WorkflowMetadata {
    let mut builder = WorkflowMetadata::builder("BareDecisions");
    builder.activity("withdraw", 10, Guard::Always);
    builder.decision("NeedToConvert", 12, Guard::Always);
    builder.decision("IsTFNKnown", 14, Guard::Always);
    builder.finish().expect("valid workflow")
}

/// `count` sequential decisions with no guarded steps.
#[allow(dead_code)]
pub fn create_decision_chain(count: usize) -> WorkflowMetadata {
    let mut builder = WorkflowMetadata::builder("DecisionChain");
    builder.activity("prepare", 1, Guard::Always);
    for i in 0..count {
        builder.decision(format!("Check{}", i), 10 + i as u32, Guard::Always);
    }
    builder.finish().expect("valid decision chain")
}

/// Order workflow that signals a peer shipping workflow.
#[allow(dead_code)]
pub fn create_signal_workflow(target: TargetPattern) -> WorkflowMetadata {
    let mut builder = WorkflowMetadata::builder("OrderWorkflow");
    builder
        .activity("reserveStock", 10, Guard::Always)
        .external_signal("ship_order", target, 12, Guard::Always)
        .activity("chargeCard", 14, Guard::Always);
    builder.finish().expect("valid signal workflow")
}

/// Approval flow with a signal wait, a child workflow and a nested decision.
#[allow(dead_code)]
pub fn create_approval_workflow() -> WorkflowMetadata {
    let mut builder = WorkflowMetadata::builder("ApprovalWorkflow");
    builder.activity("submitRequest", 10, Guard::Always);
    let approved = builder.signal_wait(
        "approval",
        12,
        "self.approved",
        "timedelta(hours=24)",
        Guard::Always,
    );
    builder.branch_labels(approved, "approved", "timeout");
    let urgent = builder.decision("IsUrgent", 14, Guard::when(approved, true));
    builder.child_workflow("ExpressShipping", 15, Guard::when(approved, true).and(urgent, true));
    builder.activity("escalate", 18, Guard::when(approved, false));
    builder.activity("archive", 20, Guard::Always);
    builder.finish().expect("valid approval workflow")
}

/// Context with the given output format and defaults otherwise.
#[allow(dead_code)]
pub fn context_with_format(format: OutputFormat) -> GraphBuildingContext {
    GraphBuildingContext::builder()
        .with_output_format(format)
        .build()
        .expect("valid context")
}
