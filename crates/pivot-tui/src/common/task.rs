#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// One variant per backend operation the reducer can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Careers,
    Insights,
    Market,
    College,
    Resume,
    Chat,
    Jobs,
}

impl From<pivot_core::api::types::GenerateKind> for TaskKind {
    fn from(kind: pivot_core::api::types::GenerateKind) -> Self {
        use pivot_core::api::types::GenerateKind;
        match kind {
            GenerateKind::Insights => TaskKind::Insights,
            GenerateKind::Market => TaskKind::Market,
            GenerateKind::College => TaskKind::College,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub careers: TaskState,
    pub insights: TaskState,
    pub market: TaskState,
    pub college: TaskState,
    pub resume: TaskState,
    pub chat: TaskState,
    pub jobs: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Careers => &self.careers,
            TaskKind::Insights => &self.insights,
            TaskKind::Market => &self.market,
            TaskKind::College => &self.college,
            TaskKind::Resume => &self.resume,
            TaskKind::Chat => &self.chat,
            TaskKind::Jobs => &self.jobs,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Careers => &mut self.careers,
            TaskKind::Insights => &mut self.insights,
            TaskKind::Market => &mut self.market,
            TaskKind::College => &mut self.college,
            TaskKind::Resume => &mut self.resume,
            TaskKind::Chat => &mut self.chat,
            TaskKind::Jobs => &mut self.jobs,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.careers.is_running()
            || self.insights.is_running()
            || self.market.is_running()
            || self.college.is_running()
            || self.resume.is_running()
            || self.chat.is_running()
            || self.jobs.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_yields_distinct_ids() {
        let mut seq = TaskSeq::default();
        let a = seq.next_id();
        let b = seq.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn finish_if_active_matches_only_current_id() {
        let mut state = TaskState::default();
        state.on_started(&TaskStarted { id: TaskId(3) });
        assert!(state.is_running());

        assert!(!state.finish_if_active(TaskId(2)));
        assert!(state.is_running());

        assert!(state.finish_if_active(TaskId(3)));
        assert!(!state.is_running());
    }

    #[test]
    fn any_running_reflects_each_kind() {
        let mut tasks = Tasks::default();
        assert!(!tasks.is_any_running());

        tasks
            .state_mut(TaskKind::Chat)
            .on_started(&TaskStarted { id: TaskId(0) });
        assert!(tasks.is_any_running());
        assert!(tasks.state(TaskKind::Chat).is_running());
        assert!(!tasks.state(TaskKind::Jobs).is_running());
    }
}
