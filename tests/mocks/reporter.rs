use urlsum::{Reporter, RunState, Warning};

#[derive(Default)]
pub struct RecordingReporter {
    pub states: Vec<RunState>,
    pub warnings: Vec<Warning>,
    pub chunks: Vec<(usize, usize)>,
}

impl Reporter for RecordingReporter {
    fn state(&mut self, state: RunState) {
        self.states.push(state);
    }

    fn warning(&mut self, warning: &Warning) {
        self.warnings.push(warning.clone());
    }

    fn chunk(&mut self, index: usize, of: usize) {
        self.chunks.push((index, of));
    }
}
