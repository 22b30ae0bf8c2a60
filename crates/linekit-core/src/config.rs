//! Editor configuration.

/// How the erase width used when repainting a row evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderWidthPolicy {
    /// Grow by one on every input event, whatever the line length.
    /// Erasure gets wider over a long session.
    #[default]
    Monotonic,
    /// Grow only as far as the longest line repainted so far, plus one.
    TrackLine,
}

/// Configuration for a [`LineBuffer`](crate::buffer::LineBuffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Starting erase width, at least 1
    pub initial_render_width: usize,
    pub render_width_policy: RenderWidthPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            initial_render_width: 1,
            render_width_policy: RenderWidthPolicy::Monotonic,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting erase width. Values below 1 are raised to 1.
    pub fn with_initial_render_width(mut self, width: usize) -> Self {
        self.initial_render_width = width.max(1);
        self
    }

    pub fn with_render_width_policy(mut self, policy: RenderWidthPolicy) -> Self {
        self.render_width_policy = policy;
        self
    }
}
