//! Which indicator outputs are lit.
//!
//! The event loop owns exactly one [`OutputState`] and updates it in step
//! with every [`OutputPort`](super::ports::OutputPort) call, so the current
//! picture is always an explicit value rather than ambient hardware state.

use heapless::Vec;

use crate::resolver::MAX_BUTTONS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputState {
    levels: Vec<bool, MAX_BUTTONS>,
}

impl OutputState {
    /// `count` outputs, all off.  Capped at [`MAX_BUTTONS`].
    pub fn new(count: usize) -> Self {
        let mut levels = Vec::new();
        for _ in 0..count.min(MAX_BUTTONS) {
            let _ = levels.push(false);
        }
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn is_on(&self, index: usize) -> bool {
        self.levels.get(index).copied().unwrap_or(false)
    }

    /// Indices of lit outputs, ascending.
    pub fn lit(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
    }

    pub fn any_lit(&self) -> bool {
        self.levels.contains(&true)
    }

    pub(crate) fn clear(&mut self) {
        self.levels.iter_mut().for_each(|l| *l = false);
    }

    pub(crate) fn light(&mut self, index: usize) {
        if let Some(level) = self.levels.get_mut(index) {
            *level = true;
        }
    }
}
