//! Key-binding registry.
//!
//! Each [`Channel`] owns an ordered list of callbacks. Callbacks run in the
//! order they were bound and get the line buffer to act on. There is no
//! de-duplication and no way to unbind.

use std::collections::HashMap;

use log::debug;

use crate::buffer::LineBuffer;
use crate::error::EditorResult;
use crate::key::Channel;

/// What the input loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep reading input
    Continue,
    /// Stop the loop and exit with this code
    Exit(i32),
}

impl Signal {
    pub fn is_exit(self) -> bool {
        matches!(self, Signal::Exit(_))
    }
}

/// Callback bound to a channel.
pub type Callback = Box<dyn FnMut(&mut LineBuffer) -> EditorResult<Signal>>;

/// Channel -> ordered callbacks.
#[derive(Default)]
pub struct BindingRegistry {
    channels: HashMap<Channel, Vec<Callback>>,
}

impl std::fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for channel in Channel::ALL {
            map.entry(&channel, &self.len(channel));
        }
        map.finish()
    }
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback to `channel`.
    pub fn bind<F>(&mut self, channel: Channel, callback: F)
    where
        F: FnMut(&mut LineBuffer) -> EditorResult<Signal> + 'static,
    {
        let callbacks = self.channels.entry(channel).or_default();
        callbacks.push(Box::new(callback));
        debug!("bound callback #{} on {channel}", callbacks.len());
    }

    /// Number of callbacks bound to `channel`.
    pub fn len(&self, channel: Channel) -> usize {
        self.channels.get(&channel).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.channels.values().all(Vec::is_empty)
    }

    /// Run every callback of `channel` in binding order.
    ///
    /// Stops at the first callback that returns [`Signal::Exit`] or an error
    /// and hands that back; otherwise returns [`Signal::Continue`].
    pub fn invoke(&mut self, channel: Channel, buffer: &mut LineBuffer) -> EditorResult<Signal> {
        let Some(callbacks) = self.channels.get_mut(&channel) else {
            return Ok(Signal::Continue);
        };
        for callback in callbacks.iter_mut() {
            if let Signal::Exit(code) = callback(&mut *buffer)? {
                debug!("{channel} callback requested exit with code {code}");
                return Ok(Signal::Exit(code));
            }
        }
        Ok(Signal::Continue)
    }
}
