//! Change notifications for editor subscribers.
//!
//! Every committed data change (including undo and redo) emits exactly one
//! `DataChanged`, tagged with the revision that produced it. Filter and sort
//! changes only touch the view and emit `ViewChanged`.

use std::fmt;

use serde::Serialize;

/// The command that produced a data change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    SetCell,
    ClearCell,
    InsertRow,
    InsertColumn,
    DeleteRow,
    DeleteColumn,
    AddRow,
    AddColumn,
    ClearAll,
    Cut,
    Paste,
    Undo,
    Redo,
    Import,
    Refresh,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetCell => "setCell",
            Command::ClearCell => "clearCell",
            Command::InsertRow => "insertRow",
            Command::InsertColumn => "insertColumn",
            Command::DeleteRow => "deleteRow",
            Command::DeleteColumn => "deleteColumn",
            Command::AddRow => "addRow",
            Command::AddColumn => "addColumn",
            Command::ClearAll => "clearAll",
            Command::Cut => "cut",
            Command::Paste => "paste",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::Import => "import",
            Command::Refresh => "refresh",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    /// The active snapshot changed.
    DataChanged { revision: u64, command: Command },
    /// Filter or sort changed; data did not.
    ViewChanged,
}

/// Callback type for receiving editor events.
pub type EventCallback = Box<dyn FnMut(&GridEvent) + Send>;

/// Simple event collector for testing.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<GridEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: GridEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Commands of the DataChanged events, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::DataChanged { command, .. } => Some(*command),
                GridEvent::ViewChanged => None,
            })
            .collect()
    }

    /// Revisions of the DataChanged events, in order.
    pub fn revisions(&self) -> Vec<u64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::DataChanged { revision, .. } => Some(*revision),
                GridEvent::ViewChanged => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_collector_filtering() {
        let mut collector = EventCollector::new();

        collector.push(GridEvent::DataChanged { revision: 1, command: Command::SetCell });
        collector.push(GridEvent::ViewChanged);
        collector.push(GridEvent::DataChanged { revision: 2, command: Command::Undo });

        assert_eq!(collector.len(), 3);
        assert_eq!(collector.commands(), vec![Command::SetCell, Command::Undo]);
        assert_eq!(collector.revisions(), vec![1, 2]);

        collector.clear();
        assert!(collector.is_empty());
    }

    #[test]
    fn test_event_serializes_tagged() {
        let event = GridEvent::DataChanged { revision: 3, command: Command::DeleteRow };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"dataChanged","revision":3,"command":"deleteRow"}"#);
    }
}
