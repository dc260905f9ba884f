use super::*;

/// Deferred work a timer can run. Closed set: the harness schedules nothing
/// on behalf of page scripts, only on behalf of its own components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerCallback {
    NavResizeSettled,
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) callback: TimerCallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) next_timer_id: i64,
    pub(crate) next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    fn allocate_timer_id(&mut self) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        id
    }

    fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }

    pub(crate) fn schedule(&mut self, delay_ms: i64, callback: TimerCallback) -> i64 {
        let id = self.allocate_timer_id();
        let order = self.allocate_task_order();
        let due_at = self.now_ms.saturating_add(delay_ms.max(0));
        self.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            callback,
        });
        id
    }

    pub(crate) fn cancel(&mut self, timer_id: i64) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != timer_id);
        self.task_queue.len() != before
    }

    /// Remove and return the earliest task due at or before `until`,
    /// ordered by `(due_at, order)`.
    pub(crate) fn pop_due(&mut self, until: i64) -> Option<ScheduledTask> {
        let mut best: Option<usize> = None;
        for (index, task) in self.task_queue.iter().enumerate() {
            if task.due_at > until {
                continue;
            }
            let better = match best {
                None => true,
                Some(current) => {
                    let current = &self.task_queue[current];
                    (task.due_at, task.order) < (current.due_at, current.order)
                }
            };
            if better {
                best = Some(index);
            }
        }
        best.map(|index| self.task_queue.remove(index))
    }

    pub(crate) fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.id));
        timers
    }
}
