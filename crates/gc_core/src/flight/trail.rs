use std::collections::vec_deque::{self, VecDeque};

use serde::{Deserialize, Serialize};

use crate::config::TrailConfig;
use crate::geometry::Vec3;

/// One trail point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectorySample {
    pub position: Vec3,
    pub t_seconds: f32,
}

impl TrajectorySample {
    pub fn new(position: Vec3, t_seconds: f32) -> Self {
        Self { position, t_seconds }
    }
}

/// Bounded trail; the oldest sample is evicted once full.
#[derive(Debug, Clone)]
pub struct TrajectoryTrail {
    samples: VecDeque<TrajectorySample>,
    capacity: usize,
}

impl Default for TrajectoryTrail {
    fn default() -> Self {
        Self::new(&TrailConfig::default())
    }
}

impl TrajectoryTrail {
    pub fn new(config: &TrailConfig) -> Self {
        Self::with_capacity(config.effective_capacity())
    }

    /// Trail holding at most `capacity` samples (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { samples: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, sample: TrajectorySample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&TrajectorySample> {
        self.samples.back()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> vec_deque::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.position).collect()
    }
}

impl<'a> IntoIterator for &'a TrajectoryTrail {
    type Item = &'a TrajectorySample;
    type IntoIter = vec_deque::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
