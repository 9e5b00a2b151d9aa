//! Classroom-wide engagement aggregation.
//!
//! An instructor's session receives engagement updates relayed from student
//! sessions. The relay transport is owned by the host; this module only
//! folds the updates into the dashboard numbers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engagement::EngagementState;

/// Default lesson length in seconds (45 minutes).
pub const DEFAULT_LESSON_SECONDS: u32 = 2700;

/// Aggregated classroom statistics shown on the instructor dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomStats {
    pub student_count: u32,
    pub active_students: u32,
    pub avg_engagement: EngagementState,
    pub confused_count: u32,
    /// Seconds left in the lesson, never negative.
    pub lesson_time_remaining: u32,
}

impl Default for ClassroomStats {
    fn default() -> Self {
        Self::new(DEFAULT_LESSON_SECONDS)
    }
}

impl ClassroomStats {
    pub fn new(lesson_seconds: u32) -> Self {
        Self {
            student_count: 0,
            active_students: 0,
            avg_engagement: EngagementState::Neutral,
            confused_count: 0,
            lesson_time_remaining: lesson_seconds,
        }
    }

    /// Update the roster after a peer connects or disconnects.
    pub fn set_connected_peers(&mut self, count: u32) {
        self.student_count = count;
        self.active_students = count;
    }

    /// Fold one relayed engagement update into the aggregate.
    ///
    /// A `Confused` update raises the confused count, any other state lowers
    /// it. The class reads as confused once more than a third of the active
    /// students are.
    pub fn apply_engagement_update(&mut self, state: EngagementState) {
        self.confused_count = if state == EngagementState::Confused {
            self.confused_count + 1
        } else {
            self.confused_count.saturating_sub(1)
        };

        self.avg_engagement = if self.confused_count as f32 > self.active_students as f32 / 3.0 {
            EngagementState::Confused
        } else {
            EngagementState::Focused
        };
    }

    /// Advance the lesson clock by one second.
    pub fn tick_second(&mut self) {
        self.lesson_time_remaining = self.lesson_time_remaining.saturating_sub(1);
    }

    /// Remaining lesson time formatted as `m:ss`.
    pub fn remaining_display(&self) -> String {
        format!(
            "{}:{:02}",
            self.lesson_time_remaining / 60,
            self.lesson_time_remaining % 60
        )
    }
}
