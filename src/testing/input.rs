//! Scripted timeline input injection for scenarios

use bevy::prelude::*;
use std::collections::HashMap;

use super::parser::{FrameInput, TimelineAction};
use crate::timeline::SeasonTimeline;

/// Resource holding scripted actions for a scenario
#[derive(Resource, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> actions applied in file order
    pub frames: HashMap<u64, Vec<TimelineAction>>,
    /// Frame about to run (set by the runner before each update)
    pub current_frame: u64,
    /// Last frame that carries an input
    pub max_frame: u64,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs
    pub fn from_inputs(inputs: &[FrameInput]) -> Self {
        let mut frames: HashMap<u64, Vec<TimelineAction>> = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            max_frame = max_frame.max(fi.frame);
            frames.entry(fi.frame).or_default().push(fi.action.clone());
        }

        Self {
            frames,
            current_frame: 0,
            max_frame,
        }
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    pub fn actions_for_current_frame(&self) -> &[TimelineAction] {
        self.frames
            .get(&self.current_frame)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub fn apply_action(timeline: &mut SeasonTimeline, action: &TimelineAction) {
    match action {
        TimelineAction::TogglePlay => timeline.toggle_play(),
        TimelineAction::Scrub { index } => {
            timeline.set_index(*index);
        }
        TimelineAction::StepForward => {
            timeline.step_forward();
        }
        TimelineAction::StepBackward => {
            timeline.step_backward();
        }
        TimelineAction::JumpStart => {
            timeline.jump_to_start();
        }
        TimelineAction::JumpEnd => {
            timeline.jump_to_end();
        }
    }
}

/// Apply this frame's scripted actions to the timeline
pub fn input_injection(inputs: Res<ScriptedInputs>, mut timeline: ResMut<SeasonTimeline>) {
    for action in inputs.actions_for_current_frame() {
        apply_action(&mut timeline, action);
    }
}
