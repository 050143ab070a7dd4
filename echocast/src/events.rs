//! Event types for echocast

use crate::scene::EntityId;
use crate::tick::TickReport;

/// Notifications published by an [`AudioReceiver`](crate::AudioReceiver).
///
/// Drained with `AudioReceiver::poll_events()`; nothing here is needed for the receiver
/// to function.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiverEvent {
    SourceAdded {
        source_id: EntityId,
    },
    SourceRemoved {
        source_id: EntityId,
    },
    TickCompleted(TickReport),
    /// A tick was skipped because the configuration cannot sample anything
    DegenerateTick {
        reason: &'static str,
    },
    /// The transform provider did not know the listener's position
    ListenerMissing {
        listener: EntityId,
    },
}

impl ReceiverEvent {
    pub fn source_id(&self) -> Option<EntityId> {
        match self {
            Self::SourceAdded { source_id } | Self::SourceRemoved { source_id } => {
                Some(*source_id)
            }
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DegenerateTick { .. } | Self::ListenerMissing { .. }
        )
    }

    pub fn is_source_event(&self) -> bool {
        matches!(self, Self::SourceAdded { .. } | Self::SourceRemoved { .. })
    }
}
