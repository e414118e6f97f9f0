use crate::{Event, EventEnvelope, PlayerState, TaskCriterion, TaskState, Yields};

/// What just happened, as far as task criteria are concerned.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TaskStep {
    Action { yields: Yields },
    Purchase,
}

/// Progress a single task earns from `step`.
fn step_amount(criterion: TaskCriterion, step: TaskStep) -> u64 {
    match (criterion, step) {
        (TaskCriterion::Actions, TaskStep::Action { .. })
        | (TaskCriterion::UpgradesPurchased, TaskStep::Purchase) => 1,
        (TaskCriterion::Gathered { kind }, TaskStep::Action { yields }) => yields.get(kind),
        _ => 0,
    }
}

pub(crate) fn is_active(task: &TaskState, now_ms: u64) -> bool {
    !task.completed && now_ms < task.expires_at_ms
}

/// Advance every active task whose criterion matches `step`, clamping at the
/// goal. Emits `TaskCompleted` for each task that reaches its goal.
pub(crate) fn advance_tasks(
    state: &mut PlayerState,
    step: TaskStep,
    now_ms: u64,
    events: &mut Vec<EventEnvelope>,
) {
    let mut completed = Vec::new();
    for task in &mut state.tasks {
        if !is_active(task, now_ms) {
            continue;
        }
        let amount = step_amount(task.criterion, step);
        if amount == 0 {
            continue;
        }
        task.progress = task.progress.saturating_add(amount).min(task.goal);
        if task.progress >= task.goal {
            task.completed = true;
            completed.push(task.id.clone());
        }
    }

    for task_id in completed {
        events.push(crate::emit(
            &mut state.counters,
            now_ms,
            Event::TaskCompleted { task_id },
        ));
    }
}
